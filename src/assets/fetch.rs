use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};

/// Why a single source could not be placed on the wall.
///
/// These never escape the renderer as errors; they only end up in logs and in
/// [`crate::CollageResult::failed_names`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageFailure {
    #[error("source has no image url")]
    MissingUrl,

    #[error("request failed: {0}")]
    Network(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("decode failed: {0}")]
    Decode(String),
}

/// Retrieves the encoded bytes of one cover image.
#[async_trait]
pub trait ImageFetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes, ImageFailure>;
}

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Largest cover body accepted before the download is abandoned.
pub const MAX_COVER_BYTES: usize = 16 * 1024 * 1024;

/// [`ImageFetch`] over HTTP(S) with a per-request timeout and a body size cap.
#[derive(Clone, Debug)]
pub struct HttpImageFetcher {
    client: reqwest::Client,
    timeout: Duration,
    max_bytes: usize,
}

impl HttpImageFetcher {
    /// Wrap a shared client; `timeout` bounds each image request end to end.
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            max_bytes: MAX_COVER_BYTES,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    fn too_large(&self, len: u64) -> ImageFailure {
        ImageFailure::Network(format!(
            "body of {len} bytes exceeds the {} byte limit",
            self.max_bytes
        ))
    }
}

#[async_trait]
impl ImageFetch for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, ImageFailure> {
        if url.trim().is_empty() {
            return Err(ImageFailure::MissingUrl);
        }

        let map_err = |e: reqwest::Error| {
            if e.is_timeout() {
                ImageFailure::Timeout(self.timeout)
            } else {
                ImageFailure::Network(e.to_string())
            }
        };

        let mut resp = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(map_err)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ImageFailure::Status(status.as_u16()));
        }
        if let Some(len) = resp.content_length()
            && len > self.max_bytes as u64
        {
            return Err(self.too_large(len));
        }

        // Content-Length may be absent or wrong; enforce the cap while streaming.
        let mut body = BytesMut::new();
        while let Some(chunk) = resp.chunk().await.map_err(map_err)? {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(self.too_large((body.len() + chunk.len()) as u64));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body.freeze())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fetch.rs"]
mod tests;
