//! Commerce API client.
//!
//! # Architecture
//!
//! - Plain REST over `reqwest`, one request per call, no retries
//! - The API is the source of truth; callers decide what to cache
//! - Every call is scoped to the token's owner through the `/me` resources
//!
//! # Resources
//!
//! | Method | Path | Call |
//! |--------|------|------|
//! | `GET` | `/{project}/me/carts/{id}` | [`CommerceClient::get_my_cart`] |
//! | `POST` | `/{project}/me/carts/{id}` | [`CommerceClient::update_my_cart`] |
//! | `DELETE` | `/{project}/me/carts/{id}?version={v}` | [`CommerceClient::delete_my_cart`] |
//! | `POST` | `/{project}/me/signup` | [`CommerceClient::sign_up`] |
//!
//! # Example
//!
//! ```rust,ignore
//! use cartwheel_core::{CartId, UpdateAction};
//! use cartwheel_storefront::commerce::CommerceClient;
//!
//! let client = CommerceClient::new(&config.commerce);
//!
//! let response = client
//!     .update_my_cart(&token, &CartId::new("c-1"), 3, vec![UpdateAction::AddDiscountCode {
//!         code: "SUMMER".into(),
//!     }])
//!     .await?;
//! println!("{} items", response.cart.total_quantity());
//! ```

mod error;

pub use error::CommerceError;

use std::sync::Arc;

use cartwheel_core::{Cart, CartId, CartUpdate, CustomerDraft, UpdateAction};
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use crate::config::CommerceConfig;

/// A cart response: the body exactly as received, plus its typed view.
#[derive(Debug, Clone)]
pub struct CartResponse {
    /// Response body text, unmodified.
    pub raw: String,
    /// Typed view of the same body.
    pub cart: Cart,
}

impl CartResponse {
    fn parse(raw: String) -> Result<Self, CommerceError> {
        let cart = serde_json::from_str(&raw)?;
        Ok(Self { raw, cart })
    }
}

/// Error body returned by the API on failure.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

// =============================================================================
// CommerceClient
// =============================================================================

/// Client for the commerce API `/me` resources.
///
/// Cheaply cloneable; clones share the connection pool.
#[derive(Clone)]
pub struct CommerceClient {
    inner: Arc<CommerceClientInner>,
}

struct CommerceClientInner {
    client: reqwest::Client,
    api_url: Url,
    project_key: String,
}

impl CommerceClient {
    /// Create a new client.
    #[must_use]
    pub fn new(config: &CommerceConfig) -> Self {
        Self::with_http_client(reqwest::Client::new(), config)
    }

    /// Create a client on top of an existing `reqwest` client.
    #[must_use]
    pub fn with_http_client(client: reqwest::Client, config: &CommerceConfig) -> Self {
        Self {
            inner: Arc::new(CommerceClientInner {
                client,
                api_url: config.api_url.clone(),
                project_key: config.project_key.clone(),
            }),
        }
    }

    /// Build `{api_url}/{project_key}/{segments...}`, percent-encoding each segment.
    fn resource_url(&self, segments: &[&str]) -> Result<Url, CommerceError> {
        let mut url = self.inner.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| CommerceError::InvalidUrl(self.inner.api_url.to_string()))?
            .pop_if_empty()
            .push(&self.inner.project_key)
            .extend(segments);
        Ok(url)
    }

    fn my_cart_url(&self, cart_id: &CartId) -> Result<Url, CommerceError> {
        self.resource_url(&["me", "carts", cart_id.as_str()])
    }

    /// Send a request and return the body of a successful response.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, CommerceError> {
        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CommerceError::RateLimited(retry_after));
        }

        // Read as text first so the cache can keep the body verbatim
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body).map_or_else(
                |_| body.chars().take(200).collect::<String>(),
                |err| err.message,
            );
            tracing::warn!(
                status = %status,
                message = %message,
                "Commerce API returned non-success status"
            );
            return Err(CommerceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }

    /// Fetch one of the token owner's carts.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API rejects it, or the
    /// body is not a cart.
    #[instrument(skip(self, token), fields(cart_id = %cart_id))]
    pub async fn get_my_cart(
        &self,
        token: &str,
        cart_id: &CartId,
    ) -> Result<CartResponse, CommerceError> {
        let url = self.my_cart_url(cart_id)?;
        let request = self.inner.client.get(url).bearer_auth(token);
        CartResponse::parse(self.send(request).await?)
    }

    /// Apply update actions to one of the token owner's carts.
    ///
    /// `version` must match the server's current cart version.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API rejects it (including
    /// a version conflict), or the body is not a cart.
    #[instrument(skip(self, token, actions), fields(cart_id = %cart_id))]
    pub async fn update_my_cart(
        &self,
        token: &str,
        cart_id: &CartId,
        version: i64,
        actions: Vec<UpdateAction>,
    ) -> Result<CartResponse, CommerceError> {
        let url = self.my_cart_url(cart_id)?;
        let body = CartUpdate { version, actions };
        let request = self.inner.client.post(url).bearer_auth(token).json(&body);
        CartResponse::parse(self.send(request).await?)
    }

    /// Delete one of the token owner's carts.
    ///
    /// The version travels as a query parameter; the request has no body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API rejects it, or the
    /// body is not a cart.
    #[instrument(skip(self, token), fields(cart_id = %cart_id))]
    pub async fn delete_my_cart(
        &self,
        token: &str,
        cart_id: &CartId,
        version: i64,
    ) -> Result<CartResponse, CommerceError> {
        let mut url = self.my_cart_url(cart_id)?;
        url.query_pairs_mut()
            .append_pair("version", &version.to_string());
        let request = self.inner.client.delete(url).bearer_auth(token);
        CartResponse::parse(self.send(request).await?)
    }

    /// Register a customer.
    ///
    /// Returns the API's sign-in result (customer plus any merged cart).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects the draft
    /// (for example, a duplicate email).
    #[instrument(skip(self, token, draft))]
    pub async fn sign_up(
        &self,
        token: &str,
        draft: &CustomerDraft,
    ) -> Result<serde_json::Value, CommerceError> {
        let url = self.resource_url(&["me", "signup"])?;
        let request = self.inner.client.post(url).bearer_auth(token).json(draft);
        Ok(serde_json::from_str(&self.send(request).await?)?)
    }
}
