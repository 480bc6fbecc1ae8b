pub type AlbumWallResult<T> = Result<T, AlbumWallError>;

#[derive(thiserror::Error, Debug)]
pub enum AlbumWallError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("identity not found: {0}")]
    IdentityNotFound(String),

    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("render failure: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AlbumWallError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn identity_not_found(msg: impl Into<String>) -> Self {
        Self::IdentityNotFound(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::UpstreamUnavailable(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
