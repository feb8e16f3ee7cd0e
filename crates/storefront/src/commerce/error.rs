//! Commerce API error types.

use thiserror::Error;

/// Errors that can occur when talking to the commerce API.
#[derive(Debug, Error)]
pub enum CommerceError {
    /// HTTP request failed (connection, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The API answered with a non-success status.
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the API error body, or a body excerpt.
        message: String,
    },

    /// Rate limited by the API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// A resource URL could not be built from the configured base URL.
    #[error("Invalid resource URL: {0}")]
    InvalidUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = CommerceError::Api {
            status: 409,
            message: "Version mismatch. Concurrent modification.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error 409: Version mismatch. Concurrent modification."
        );
    }

    #[test]
    fn test_rate_limited_error() {
        let err = CommerceError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }
}
