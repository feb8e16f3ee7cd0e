//! Access token refresh.
//!
//! Every authenticated call first gives a [`TokenRefresher`] the chance to
//! make sure the stored access token is usable. The contract is small: after
//! `schedule_token_refresh` returns, either a valid token is stored or none
//! is. Callers then read the token from the store and skip the call if it is
//! missing.
//!
//! # Refresh Flow
//!
//! 1. Read the access token and its expiry from the store
//! 2. If the token is present and not within 60s of expiry, stop
//! 3. Exchange the stored refresh token at `{auth_url}/oauth/token`
//! 4. Store the new access token and expiry
//! 5. On any failure, remove the access token

mod error;

pub use error::TokenError;

use std::future::Future;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

use crate::config::OAuthConfig;
use crate::storage::{KeyValueStore, StorageKeys};

/// Refresh tokens this many seconds before they actually expire.
const EXPIRY_BUFFER_SECS: i64 = 60;

/// Keeps the stored access token usable.
pub trait TokenRefresher: Send + Sync {
    /// Ensure the token under `keys.access_token` is valid, or remove it.
    ///
    /// Never fails: problems are logged and leave no token behind.
    fn schedule_token_refresh<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        keys: &StorageKeys,
    ) -> impl Future<Output = ()> + Send;
}

/// Trusts whatever token is stored. For sessions whose tokens are managed
/// elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoredToken;

impl TokenRefresher for StoredToken {
    async fn schedule_token_refresh<S: KeyValueStore + ?Sized>(
        &self,
        _store: &S,
        _keys: &StorageKeys,
    ) {
    }
}

/// `None` trusts the stored token, like [`StoredToken`].
impl<T: TokenRefresher> TokenRefresher for Option<T> {
    async fn schedule_token_refresh<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        keys: &StorageKeys,
    ) {
        if let Some(refresher) = self {
            refresher.schedule_token_refresh(store, keys).await;
        }
    }
}

/// Raw token response from the OAuth endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
    refresh_token: Option<String>,
}

/// Refreshes expiring tokens with the OAuth refresh-token grant.
///
/// Implements `Debug` manually to redact the client secret.
#[derive(Clone)]
pub struct OAuthRefresher {
    client: reqwest::Client,
    token_url: Url,
    client_id: String,
    client_secret: SecretString,
    clock: fn() -> i64,
}

impl std::fmt::Debug for OAuthRefresher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthRefresher")
            .field("token_url", &self.token_url.as_str())
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

impl OAuthRefresher {
    /// Create a refresher for the configured OAuth client.
    ///
    /// The token endpoint is `oauth/token` resolved against `auth_url`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidUrl`] if the endpoint cannot be built.
    pub fn new(config: &OAuthConfig) -> Result<Self, TokenError> {
        Ok(Self {
            client: reqwest::Client::new(),
            token_url: config.auth_url.join("oauth/token")?,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            clock: unix_now,
        })
    }

    /// Replace the clock (unix seconds). Used by tests.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    /// Refresh the token if it is missing or about to expire.
    ///
    /// Returns `true` if a new token was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is expired and cannot be refreshed.
    /// The stored token is left untouched; [`TokenRefresher`] removes it.
    pub async fn refresh<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        keys: &StorageKeys,
    ) -> Result<bool, TokenError> {
        let now = (self.clock)();
        let has_token = store
            .get(keys.access_token)?
            .is_some_and(|token| !token.is_empty());
        let expires_at = store
            .get(keys.token_expires_at)?
            .and_then(|value| value.parse::<i64>().ok());

        let expiring = expires_at.is_some_and(|at| now >= at.saturating_sub(EXPIRY_BUFFER_SECS));
        if has_token && !expiring {
            return Ok(false);
        }

        let Some(refresh_token) = store
            .get(keys.refresh_token)?
            .filter(|token| !token.is_empty())
        else {
            return if has_token {
                Err(TokenError::NoRefreshToken)
            } else {
                Ok(false)
            };
        };

        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token.as_str()),
        ];

        let response = self
            .client
            .post(self.token_url.clone())
            .basic_auth(&self.client_id, Some(self.client_secret.expose_secret()))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TokenError::Rejected {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let token: TokenResponse = response.json().await?;

        store.set(keys.access_token, &token.access_token)?;
        match token.expires_in {
            Some(expires_in) => {
                let expires_at = now.saturating_add(expires_in);
                store.set(keys.token_expires_at, &expires_at.to_string())?;
            }
            None => store.remove(keys.token_expires_at)?,
        }
        if let Some(refresh_token) = token.refresh_token {
            store.set(keys.refresh_token, &refresh_token)?;
        }

        Ok(true)
    }
}

impl TokenRefresher for OAuthRefresher {
    async fn schedule_token_refresh<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        keys: &StorageKeys,
    ) {
        match self.refresh(store, keys).await {
            Ok(true) => tracing::debug!(key = keys.access_token, "Access token refreshed"),
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(error = %e, key = keys.access_token, "Token refresh failed");
                if let Err(e) = store.remove(keys.access_token) {
                    tracing::error!(error = %e, "Failed to drop stale access token");
                }
            }
        }
    }
}
