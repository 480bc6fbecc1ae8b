//! Command-line and environment configuration of the upstream side.

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::assets::fetch::HttpImageFetcher;
use crate::foundation::core::CollageSpec;
use crate::foundation::error::{AlbumWallError, AlbumWallResult};
use crate::metadata::lastfm::{DEFAULT_LASTFM_URL, LastFmFetcher, Period};
use crate::render::pipeline::{CollageRenderer, DEFAULT_FETCH_CONCURRENCY};
use crate::server::AppState;

const USER_AGENT: &str = concat!("albumwall/", env!("CARGO_PKG_VERSION"));

/// Where covers and listening history come from, and how hard to hit them.
#[derive(clap::Args, Clone, Debug)]
pub struct UpstreamArgs {
    /// Last.fm API key.
    #[arg(long, env = "LASTFM_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Last.fm API root.
    #[arg(long, env = "LASTFM_API_URL", default_value = DEFAULT_LASTFM_URL)]
    pub lastfm_url: Url,

    /// Listening window of the top albums.
    #[arg(long, env = "ALBUMWALL_PERIOD", value_enum, default_value_t = Period::Week)]
    pub period: Period,

    /// Per-cover fetch timeout, e.g. `10s` or `1500ms`.
    #[arg(
        long,
        env = "ALBUMWALL_FETCH_TIMEOUT",
        value_parser = humantime::parse_duration,
        default_value = "10s"
    )]
    pub fetch_timeout: Duration,

    /// Covers fetched at the same time.
    #[arg(long, env = "ALBUMWALL_FETCH_CONCURRENCY", default_value_t = DEFAULT_FETCH_CONCURRENCY)]
    pub fetch_concurrency: usize,
}

impl UpstreamArgs {
    /// Check values clap cannot check on its own.
    pub fn validate(&self) -> AlbumWallResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(AlbumWallError::config("api key must be non-empty"));
        }
        if self.fetch_timeout.is_zero() {
            return Err(AlbumWallError::config("fetch timeout must be > 0"));
        }
        if self.fetch_concurrency == 0 {
            return Err(AlbumWallError::config("fetch concurrency must be > 0"));
        }
        Ok(())
    }

    /// Wire the Last.fm fetcher and the renderer around one shared HTTP client.
    pub fn build_state(&self) -> AlbumWallResult<AppState> {
        self.validate()?;
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AlbumWallError::config(format!("http client: {e}")))?;

        let fetcher = HttpImageFetcher::new(http.clone(), self.fetch_timeout);
        let renderer = CollageRenderer::new(CollageSpec::default(), Arc::new(fetcher))?
            .with_concurrency(self.fetch_concurrency);
        let metadata = LastFmFetcher::new(
            http,
            self.lastfm_url.clone(),
            self.api_key.clone(),
            self.period,
        );
        Ok(AppState::new(Arc::new(metadata), Arc::new(renderer)))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
