//! Command implementations.

pub mod cart;
pub mod signup;

use std::path::PathBuf;

use cartwheel_core::CountryError;
use cartwheel_storefront::auth::{OAuthRefresher, TokenError};
use cartwheel_storefront::cart::CartError;
use cartwheel_storefront::commerce::CommerceError;
use cartwheel_storefront::config::{ConfigError, StorefrontConfig};
use cartwheel_storefront::storage::StorageError;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input or output JSON was malformed.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The sign-up form failed validation.
    #[error("Sign-up form has {0} invalid field(s)")]
    InvalidForm(usize),

    /// A country is needed but none was given.
    #[error("Missing {0} country")]
    MissingCountry(&'static str),

    /// Unsupported country name.
    #[error(transparent)]
    Country(#[from] CountryError),

    /// Postal code does not match the country's format.
    #[error("Invalid postal code for {country}: {code}")]
    InvalidPostalCode { country: String, code: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Local storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Token refresher could not be built.
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// No access token is stored.
    #[error("No access token stored; log in or start a session first")]
    MissingToken,

    /// Commerce API error.
    #[error("Commerce API error: {0}")]
    Commerce(#[from] CommerceError),

    /// Cart action failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),
}

/// Token refresher for the configured OAuth client, if any.
fn refresher(config: &StorefrontConfig) -> Result<Option<OAuthRefresher>, CliError> {
    Ok(config
        .commerce
        .oauth
        .as_ref()
        .map(OAuthRefresher::new)
        .transpose()?)
}

#[allow(clippy::print_stdout)]
fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
