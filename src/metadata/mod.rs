use async_trait::async_trait;

use crate::foundation::error::AlbumWallResult;

pub(crate) mod lastfm;

/// One cover to place on the wall.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImageSource {
    pub display_name: String,
    pub url: String,
}

/// Provider of the ordered covers for a listener.
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    /// Return at most `limit` sources for `identity`, most relevant first.
    ///
    /// Fails with [`crate::AlbumWallError::IdentityNotFound`] or
    /// [`crate::AlbumWallError::UpstreamUnavailable`].
    async fn fetch_top_sources(
        &self,
        identity: &str,
        limit: usize,
    ) -> AlbumWallResult<Vec<ImageSource>>;
}
