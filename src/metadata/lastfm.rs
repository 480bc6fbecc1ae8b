use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::foundation::error::{AlbumWallError, AlbumWallResult};
use crate::metadata::{ImageSource, MetadataFetcher};

/// Public Last.fm API root.
pub const DEFAULT_LASTFM_URL: &str = "https://ws.audioscrobbler.com/2.0/";

/// Last.fm error code for an unknown user.
const LASTFM_INVALID_USER: i64 = 6;

/// Last.fm lists covers smallest first; index 2 is the third-largest listed variant
/// ("large", 174px at the time of writing).
const PREFERRED_VARIANT: usize = 2;

/// Listening window the top albums are computed over.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, serde::Serialize, Deserialize,
)]
pub enum Period {
    #[value(name = "overall")]
    #[serde(rename = "overall")]
    Overall,
    #[default]
    #[value(name = "7day")]
    #[serde(rename = "7day")]
    Week,
    #[value(name = "1month")]
    #[serde(rename = "1month")]
    Month,
    #[value(name = "3month")]
    #[serde(rename = "3month")]
    Quarter,
    #[value(name = "6month")]
    #[serde(rename = "6month")]
    HalfYear,
    #[value(name = "12month")]
    #[serde(rename = "12month")]
    Year,
}

impl Period {
    /// Value of the `period` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Overall => "overall",
            Period::Week => "7day",
            Period::Month => "1month",
            Period::Quarter => "3month",
            Period::HalfYear => "6month",
            Period::Year => "12month",
        }
    }
}

/// [`MetadataFetcher`] backed by Last.fm's `user.gettopalbums`.
#[derive(Clone, Debug)]
pub struct LastFmFetcher {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
    period: Period,
}

impl LastFmFetcher {
    /// Create a fetcher talking to `base_url` (normally [`DEFAULT_LASTFM_URL`]).
    pub fn new(
        client: reqwest::Client,
        base_url: Url,
        api_key: impl Into<String>,
        period: Period,
    ) -> Self {
        Self {
            client,
            base_url,
            api_key: api_key.into(),
            period,
        }
    }
}

#[async_trait]
impl MetadataFetcher for LastFmFetcher {
    #[tracing::instrument(skip(self), fields(period = self.period.as_str()))]
    async fn fetch_top_sources(
        &self,
        identity: &str,
        limit: usize,
    ) -> AlbumWallResult<Vec<ImageSource>> {
        if identity.trim().is_empty() {
            return Err(AlbumWallError::invalid_request("identity must be non-empty"));
        }

        let limit_param = limit.to_string();
        let resp = self
            .client
            .get(self.base_url.clone())
            .query(&[
                ("method", "user.gettopalbums"),
                ("user", identity),
                ("period", self.period.as_str()),
                ("limit", limit_param.as_str()),
                ("api_key", self.api_key.as_str()),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| {
                // The URL carries the API key.
                AlbumWallError::upstream(format!("last.fm request failed: {}", e.without_url()))
            })?;

        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| {
                AlbumWallError::upstream(format!("last.fm body read failed: {}", e.without_url()))
            })?;

        let sources = parse_top_albums(status, &body, identity, limit)?;
        debug!(count = sources.len(), "fetched top albums");
        Ok(sources)
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct TopAlbumsResponse {
    topalbums: TopAlbums,
}

#[derive(Debug, Deserialize)]
struct TopAlbums {
    #[serde(default)]
    album: OneOrMany<Album>,
}

/// Last.fm collapses single-element lists into a bare object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(v) => v,
            Self::One(t) => vec![t],
        }
    }
}

#[derive(Debug, Deserialize)]
struct Album {
    #[serde(default)]
    name: String,
    #[serde(default)]
    image: Vec<ImageVariant>,
}

#[derive(Debug, Deserialize)]
struct ImageVariant {
    #[serde(rename = "#text", default)]
    url: String,
}

/// Turn a raw `user.gettopalbums` answer into ordered sources.
pub(crate) fn parse_top_albums(
    status: u16,
    body: &[u8],
    identity: &str,
    limit: usize,
) -> AlbumWallResult<Vec<ImageSource>> {
    if let Ok(err) = serde_json::from_slice::<ApiError>(body) {
        return Err(if err.error == LASTFM_INVALID_USER {
            AlbumWallError::identity_not_found(format!("last.fm does not know '{identity}'"))
        } else {
            AlbumWallError::upstream(format!(
                "last.fm error {}: {}",
                err.error, err.message
            ))
        });
    }
    if !(200..300).contains(&status) {
        return Err(AlbumWallError::upstream(format!(
            "last.fm answered with status {status}"
        )));
    }

    let parsed: TopAlbumsResponse = serde_json::from_slice(body)
        .map_err(|e| AlbumWallError::upstream(format!("malformed last.fm response: {e}")))?;

    Ok(parsed
        .topalbums
        .album
        .into_vec()
        .into_iter()
        .take(limit)
        .map(|album| ImageSource {
            url: select_variant(&album.image).unwrap_or_default().to_string(),
            display_name: album.name,
        })
        .collect())
}

/// Pick the cover URL: the preferred variant when listed and non-empty, else the last
/// non-empty one.
fn select_variant(variants: &[ImageVariant]) -> Option<&str> {
    let usable = |v: &ImageVariant| !v.url.trim().is_empty();
    variants
        .get(PREFERRED_VARIANT)
        .filter(|v| usable(*v))
        .or_else(|| variants.iter().rev().find(|v| usable(*v)))
        .map(|v| v.url.as_str())
}

#[cfg(test)]
#[path = "../../tests/unit/metadata/lastfm.rs"]
mod tests;
