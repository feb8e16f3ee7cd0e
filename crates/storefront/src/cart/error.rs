//! Cart service error types.

use thiserror::Error;

use crate::commerce::CommerceError;
use crate::storage::StorageError;

/// Errors that can occur while applying a cart action.
///
/// None of these leave the cart cache modified.
#[derive(Debug, Error)]
pub enum CartError {
    /// No cart is cached for the current identity.
    #[error("no cart is cached")]
    NoCart,

    /// The cached cart lacks an id or version.
    #[error("cached cart is unreadable: {0}")]
    InvalidCachedCart(#[source] serde_json::Error),

    /// The product id list could not be encoded.
    #[error("failed to encode cart items: {0}")]
    Encode(#[source] serde_json::Error),

    /// No access token is stored after the refresh step.
    #[error("no access token")]
    MissingToken,

    /// Reading or writing the store failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The commerce API call failed.
    #[error(transparent)]
    Commerce(#[from] CommerceError),
}

impl CartError {
    /// Whether the action was skipped rather than attempted and failed.
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::NoCart | Self::MissingToken)
    }
}
