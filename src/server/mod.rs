use std::future::Future;
use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};

use crate::metadata::MetadataFetcher;
use crate::render::pipeline::CollageRenderer;

pub(crate) mod errors;
pub(crate) mod handlers;

/// Shared, immutable per-process state of the endpoint.
#[derive(Clone)]
pub struct AppState {
    pub metadata: Arc<dyn MetadataFetcher>,
    pub renderer: Arc<CollageRenderer>,
}

impl AppState {
    /// Bundle a metadata provider and a renderer.
    pub fn new(metadata: Arc<dyn MetadataFetcher>, renderer: Arc<CollageRenderer>) -> Self {
        Self { metadata, renderer }
    }
}

/// Build the router: `GET /` renders, `GET /healthz` answers liveness probes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::wall))
        .route("/healthz", get(handlers::healthz))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Serve until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    info!(%addr, "albumwall listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
