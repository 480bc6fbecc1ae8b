use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::foundation::error::AlbumWallError;

impl AlbumWallError {
    /// HTTP status the endpoint answers with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AlbumWallError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AlbumWallError::IdentityNotFound(_) => StatusCode::NOT_FOUND,
            AlbumWallError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            AlbumWallError::Config(_) | AlbumWallError::Render(_) | AlbumWallError::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            AlbumWallError::InvalidRequest(msg) => msg.clone(),
            AlbumWallError::IdentityNotFound(msg) => msg.clone(),
            AlbumWallError::UpstreamUnavailable(_) => {
                "Could not load listening history, try again later".to_string()
            }
            AlbumWallError::Config(_) | AlbumWallError::Render(_) | AlbumWallError::Other(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for AlbumWallError {
    fn into_response(self) -> Response {
        match &self {
            AlbumWallError::Config(_) | AlbumWallError::Render(_) | AlbumWallError::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            AlbumWallError::UpstreamUnavailable(_) => {
                tracing::warn!("Upstream error: {}", self);
            }
            AlbumWallError::InvalidRequest(_) | AlbumWallError::IdentityNotFound(_) => {
                tracing::debug!("Client error: {}", self);
            }
        }

        (self.status_code(), self.user_message()).into_response()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/server/errors.rs"]
mod tests;
