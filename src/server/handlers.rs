use axum::{
    extract::{Query, State},
    http::{HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::foundation::error::AlbumWallError;
use crate::server::AppState;

/// Body of the 400 answer when no identity was given.
pub const USERNAME_MISSING: &str = "Username not provided!";

/// Number of sources that degraded to blank cells.
pub const FAILED_SOURCES_HEADER: HeaderName = HeaderName::from_static("x-albumwall-failed");

#[derive(Debug, Deserialize)]
pub struct WallQuery {
    username: Option<String>,
}

/// `GET /?username=<identity>`: render the identity's wall as PNG.
pub async fn wall(
    State(state): State<AppState>,
    Query(query): Query<WallQuery>,
) -> Result<Response, AlbumWallError> {
    let Some(identity) = query
        .username
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    else {
        return Err(AlbumWallError::invalid_request(USERNAME_MISSING));
    };

    let capacity = state.renderer.spec().grid_capacity();
    let sources = state.metadata.fetch_top_sources(identity, capacity).await?;
    let result = state.renderer.render(&sources).await?;

    let mut resp = (StatusCode::OK, result.image_bytes).into_response();
    let headers = resp.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/png"));
    headers.insert(
        FAILED_SOURCES_HEADER,
        HeaderValue::from(result.failed_names.len()),
    );
    Ok(resp)
}

/// Liveness probe.
pub async fn healthz() -> &'static str {
    "ok"
}
