//! API error types.

use thiserror::Error;

/// Result type for API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by API calls.
///
/// Mapping HTTP statuses onto [`NotFound`](ApiError::NotFound) and
/// [`Forbidden`](ApiError::Forbidden) is the transport's job; call sites only
/// match on them.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("response model error: {0}")]
    Model(#[from] twitter_types::Error),
}

impl ApiError {
    /// True for the two statuses membership checks read as "no".
    pub fn is_not_found_or_forbidden(&self) -> bool {
        matches!(self, ApiError::NotFound(_) | ApiError::Forbidden(_))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Model(err.into())
    }
}
