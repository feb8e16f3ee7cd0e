//! Integration test support for Cartwheel.
//!
//! Tests run the storefront library against [`MockCommerce`], an `axum`
//! server on `127.0.0.1:0` that records every request and answers from a
//! table of canned responses keyed by path.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cartwheel-integration-tests
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let mock = MockCommerce::start().await;
//! mock.respond("/test-project/me/carts/c-1", 200, cart_json("c-1", 2, &[], 0));
//!
//! let client = mock.client();
//! // ... drive the client ...
//! assert_eq!(mock.requests().len(), 1);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::IntoResponse;
use cartwheel_storefront::commerce::CommerceClient;
use cartwheel_storefront::config::CommerceConfig;
use serde_json::json;
use url::Url;

/// Project key the mock serves.
pub const PROJECT_KEY: &str = "test-project";

/// A request the mock received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// Body parsed as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }

    /// Body as text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Default)]
struct MockState {
    requests: Mutex<Vec<RecordedRequest>>,
    responses: Mutex<HashMap<String, (u16, String)>>,
}

/// Recording mock of the commerce and auth APIs.
#[derive(Clone)]
pub struct MockCommerce {
    url: Url,
    state: Arc<MockState>,
}

impl MockCommerce {
    /// Start the mock on an ephemeral local port.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let router = Router::new()
            .fallback(record)
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("Failed to read mock address");

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Mock server failed");
        });

        let url = Url::parse(&format!("http://{addr}/")).expect("Invalid mock URL");
        Self { url, state }
    }

    /// Base URL of the mock.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Answer requests to `path` with `status` and `body`.
    ///
    /// Unconfigured paths get a 404.
    ///
    /// # Panics
    ///
    /// Panics if the state lock is poisoned.
    pub fn respond(&self, path: &str, status: u16, body: impl Into<String>) {
        self.state
            .responses
            .lock()
            .expect("mock state poisoned")
            .insert(path.to_string(), (status, body.into()));
    }

    /// Every request received so far, in arrival order.
    ///
    /// # Panics
    ///
    /// Panics if the state lock is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .expect("mock state poisoned")
            .clone()
    }

    /// Commerce configuration pointing at the mock.
    #[must_use]
    pub fn commerce_config(&self) -> CommerceConfig {
        CommerceConfig {
            api_url: self.url.clone(),
            project_key: PROJECT_KEY.to_string(),
            oauth: None,
        }
    }

    /// Commerce client pointing at the mock.
    #[must_use]
    pub fn client(&self) -> CommerceClient {
        CommerceClient::new(&self.commerce_config())
    }
}

async fn record(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let request = RecordedRequest {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body: body.to_vec(),
    };

    let (status, body) = state
        .responses
        .lock()
        .expect("mock state poisoned")
        .get(&request.path)
        .cloned()
        .unwrap_or_else(|| (404, json!({"message": "not found"}).to_string()));

    state
        .requests
        .lock()
        .expect("mock state poisoned")
        .push(request);

    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
}

/// Path of a cart resource on the mock.
#[must_use]
pub fn cart_path(cart_id: &str) -> String {
    format!("/{PROJECT_KEY}/me/carts/{cart_id}")
}

/// A cart body in the API's shape.
///
/// `items` are `(line item id, product id, quantity)`. An empty cart has no
/// `totalLineItemQuantity`, like the real API.
#[must_use]
pub fn cart_json(cart_id: &str, version: i64, items: &[(&str, &str, u64)], cent_amount: i64) -> String {
    let line_items: Vec<_> = items
        .iter()
        .map(|(id, product_id, quantity)| {
            json!({
                "id": id,
                "productId": product_id,
                "name": {"en": format!("Product {product_id}")},
                "quantity": quantity,
                "totalPrice": {"type": "centPrecision", "currencyCode": "EUR", "centAmount": 999, "fractionDigits": 2}
            })
        })
        .collect();

    let mut cart = json!({
        "type": "Cart",
        "id": cart_id,
        "version": version,
        "cartState": "Active",
        "lineItems": line_items,
        "totalPrice": {"type": "centPrecision", "currencyCode": "EUR", "centAmount": cent_amount, "fractionDigits": 2},
        "discountCodes": []
    });

    let quantity: u64 = items.iter().map(|(_, _, quantity)| quantity).sum();
    if quantity > 0 {
        cart["totalLineItemQuantity"] = json!(quantity);
    }

    cart.to_string()
}
