//! Desktop-side consumer of the wall endpoint.
//!
//! The flow is one awaited sequence: fetch the PNG, check it decodes, write it to a temp file,
//! then hand it to every display of a [`DesktopTarget`]. Progress is tracked by a
//! [`WallpaperState`] owned by the caller.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tracing::{info, warn};
use url::Url;

pub(crate) mod target;

/// Errors surfaced to the user of the wallpaper client.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("Username cannot be empty")]
    EmptyIdentity,

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("server answered {code}: {body}")]
    Status {
        code: u16,
        body: String,
    },

    #[error("Failed to load image: {0}")]
    Decode(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to set wallpaper on {display}: {message}")]
    Apply {
        display: String,
        message: String,
    },

    #[error("a wallpaper update is already in progress")]
    Busy,
}

/// Per-interaction progress of a wallpaper update.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum WallpaperState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

impl WallpaperState {
    /// Enter `Submitting`. Fails with [`ClientError::Busy`] if already submitting.
    pub fn submit(&mut self) -> Result<(), ClientError> {
        if *self == WallpaperState::Submitting {
            return Err(ClientError::Busy);
        }
        *self = WallpaperState::Submitting;
        Ok(())
    }

    /// Leave `Submitting` with the outcome of the update. No-op in any other state.
    pub fn complete<T>(&mut self, outcome: &Result<T, ClientError>) {
        if *self != WallpaperState::Submitting {
            return;
        }
        *self = match outcome {
            Ok(_) => WallpaperState::Succeeded,
            Err(e) => WallpaperState::Failed(e.to_string()),
        };
    }

    /// Return `true` while a request is in flight.
    pub fn is_busy(&self) -> bool {
        *self == WallpaperState::Submitting
    }

    /// User-facing error text of the last update, if it failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            WallpaperState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Platform capability to set the desktop background.
#[async_trait]
pub trait DesktopTarget: Send + Sync {
    /// Identifiers of every attached display.
    fn displays(&self) -> Vec<String>;

    /// Set the background of `display` to the image at `path`.
    async fn set_background(&self, display: &str, path: &Path) -> Result<(), ClientError>;
}

/// Apply `path` to every display independently.
///
/// Every display is attempted even after a failure; the last error encountered, if any, is
/// returned.
pub async fn apply_to_all_displays(
    target: &dyn DesktopTarget,
    path: &Path,
) -> Result<(), ClientError> {
    let mut last_err = None;
    for name in target.displays() {
        match target.set_background(&name, path).await {
            Ok(()) => info!(display = %name, path = %path.display(), "wallpaper applied"),
            Err(e) => {
                warn!(display = %name, error = %e, "wallpaper not applied");
                last_err = Some(e);
            }
        }
    }
    match last_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// HTTP client for the wall endpoint.
#[derive(Clone, Debug)]
pub struct WallpaperClient {
    http: reqwest::Client,
    server: Url,
    temp_dir: PathBuf,
}

impl WallpaperClient {
    /// Talk to the wall server at `server`; files are written to the OS temp dir.
    pub fn new(http: reqwest::Client, server: Url) -> Self {
        Self {
            http,
            server,
            temp_dir: std::env::temp_dir(),
        }
    }

    /// Write downloaded walls to `dir` instead of the OS temp dir.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    /// Download the wall of `identity` and check that it decodes as an image.
    pub async fn fetch_wall(&self, identity: &str) -> Result<Vec<u8>, ClientError> {
        let identity = identity.trim();
        if identity.is_empty() {
            return Err(ClientError::EmptyIdentity);
        }

        let mut url = self.server.clone();
        if url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(url.to_string()));
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("username", identity);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                code: status.as_u16(),
                body,
            });
        }
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        image::load_from_memory(&bytes).map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    /// Fetch, store and apply the wall of `identity`, tracking progress in `state`.
    pub async fn set_wallpaper(
        &self,
        identity: &str,
        target: &dyn DesktopTarget,
        state: &mut WallpaperState,
    ) -> Result<PathBuf, ClientError> {
        state.submit()?;
        let outcome = self.fetch_store_apply(identity, target).await;
        state.complete(&outcome);
        outcome
    }

    async fn fetch_store_apply(
        &self,
        identity: &str,
        target: &dyn DesktopTarget,
    ) -> Result<PathBuf, ClientError> {
        let png = self.fetch_wall(identity).await?;

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let path = self.temp_dir.join(format!("wallpaper_{timestamp}.png"));
        match tokio::fs::remove_file(&path).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e.into()),
            _ => {}
        }
        tokio::fs::write(&path, &png).await?;

        apply_to_all_displays(target, &path).await?;
        Ok(path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/client/mod.rs"]
mod tests;
