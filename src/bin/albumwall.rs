use std::{net::SocketAddr, path::PathBuf};

use albumwall::{
    CommandTarget, WallpaperClient, WallpaperState, config::UpstreamArgs,
    telemetry::init_telemetry,
};
use anyhow::Context as _;
use clap::{Parser, Subcommand};
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "albumwall", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve walls over HTTP at `GET /?username=<name>`.
    Serve(ServeArgs),
    /// Render one wall to a PNG file.
    Render(RenderArgs),
    /// Fetch a wall from a running server and set it as desktop background.
    Wallpaper(WallpaperArgs),
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Socket address to listen on.
    #[arg(long, env = "ALBUMWALL_BIND", default_value = "0.0.0.0:3000")]
    bind: SocketAddr,

    #[command(flatten)]
    upstream: UpstreamArgs,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Last.fm user name.
    #[arg(long)]
    username: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    upstream: UpstreamArgs,
}

#[derive(Parser, Debug)]
struct WallpaperArgs {
    /// Base URL of a running `albumwall serve`.
    #[arg(long)]
    server: Url,

    /// Last.fm user name.
    #[arg(long)]
    username: String,

    /// Program that sets the background, e.g. `feh` or `swww`.
    #[arg(long)]
    command: String,

    /// Argument passed to the program; `{path}` and `{display}` are substituted.
    #[arg(long = "arg", allow_hyphen_values = true)]
    args: Vec<String>,

    /// Display to apply to; repeat for several. Defaults to a single display.
    #[arg(long = "display")]
    displays: Vec<String>,
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_telemetry()?;
    let cli = Cli::parse();
    match cli.cmd {
        Command::Serve(args) => serve(args).await,
        Command::Render(args) => render(args).await,
        Command::Wallpaper(args) => wallpaper(args).await,
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let state = args.upstream.build_state()?;
    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("bind {}", args.bind))?;
    albumwall::serve(listener, state, shutdown_signal()).await
}

async fn render(args: RenderArgs) -> anyhow::Result<()> {
    let state = args.upstream.build_state()?;
    let capacity = state.renderer.spec().grid_capacity();
    let sources = state
        .metadata
        .fetch_top_sources(args.username.trim(), capacity)
        .await?;
    let result = state.renderer.render(&sources).await?;

    tokio::fs::write(&args.out, &result.image_bytes)
        .await
        .with_context(|| format!("write png to '{}'", args.out.display()))?;
    for name in &result.failed_names {
        eprintln!("missing cover: {name}");
    }
    eprintln!(
        "wrote {} ({} of {} covers drawn)",
        args.out.display(),
        sources.len() - result.failed_names.len().min(sources.len()),
        sources.len()
    );
    Ok(())
}

async fn wallpaper(args: WallpaperArgs) -> anyhow::Result<()> {
    let client = WallpaperClient::new(reqwest::Client::new(), args.server);
    let target = CommandTarget::new(args.command, args.args, args.displays);
    let mut state = WallpaperState::default();
    let path = client
        .set_wallpaper(&args.username, &target, &mut state)
        .await?;
    eprintln!("wallpaper set from {}", path.display());
    Ok(())
}
