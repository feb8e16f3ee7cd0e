//! Token refresh error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur while refreshing an access token.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The stored token has expired and there is no refresh token.
    #[error("access token expired and no refresh token is stored")]
    NoRefreshToken,

    /// The token endpoint rejected the refresh.
    #[error("token refresh rejected ({status}): {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body excerpt.
        body: String,
    },

    /// HTTP request to the token endpoint failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The token endpoint URL could not be built.
    #[error("invalid token endpoint: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Reading or writing tokens failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
