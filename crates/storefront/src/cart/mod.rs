//! Cart mutations.
//!
//! All four storefront cart mutations (discount code, remove item, change
//! quantity, delete cart) run the same protocol:
//!
//! 1. Pick the storage keys from the login flag and read the cached cart
//! 2. Let the [`TokenRefresher`] make the access token usable
//! 3. Read the token; without one, stop
//! 4. Send exactly one request
//! 5. On success, cache the response body verbatim, cache the product id
//!    list, then report the new quantity and total price
//!
//! Any failure leaves the cache as it was and reports nothing. There is no
//! locking: when mutations race, the last response to arrive wins.

mod error;

pub use error::CartError;

use cartwheel_core::{Cart, CartAction, CartRef, LineItemId};
use tracing::instrument;

use crate::auth::{StoredToken, TokenRefresher};
use crate::commerce::{CartResponse, CommerceClient};
use crate::storage::{Identity, KeyValueStore, StorageKeys};

/// Receives the cart totals after a successful mutation.
///
/// `set_cart_quantity` is always called before `total_price`.
pub trait CartCallbacks {
    /// New total line-item quantity.
    fn set_cart_quantity(&mut self, quantity: u64);
    /// New total price, in cents.
    fn total_price(&mut self, cent_amount: i64);
}

impl<Q, P> CartCallbacks for (Q, P)
where
    Q: FnMut(u64),
    P: FnMut(i64),
{
    fn set_cart_quantity(&mut self, quantity: u64) {
        (self.0)(quantity);
    }

    fn total_price(&mut self, cent_amount: i64) {
        (self.1)(cent_amount);
    }
}

/// Ignores the totals.
impl CartCallbacks for () {
    fn set_cart_quantity(&mut self, _quantity: u64) {}
    fn total_price(&mut self, _cent_amount: i64) {}
}

/// Applies cart actions for whoever the store says is browsing.
#[derive(Clone)]
pub struct CartService<S, R = StoredToken> {
    client: CommerceClient,
    store: S,
    refresher: R,
}

impl<S: KeyValueStore, R: TokenRefresher> CartService<S, R> {
    #[must_use]
    pub const fn new(client: CommerceClient, store: S, refresher: R) -> Self {
        Self {
            client,
            store,
            refresher,
        }
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Apply an action, logging failures instead of returning them.
    pub async fn apply(&self, action: &CartAction, callbacks: &mut impl CartCallbacks) {
        if let Err(e) = self.try_apply(action, callbacks).await {
            log_failure(action.name(), &e);
        }
    }

    /// Apply an action.
    ///
    /// Returns the updated cart. Callbacks run only on success.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NoCart`] if no cart is cached,
    /// [`CartError::MissingToken`] if no token survives the refresh step, or
    /// the storage or API error that stopped the mutation.
    #[instrument(skip_all, fields(action = action.name()))]
    pub async fn try_apply(
        &self,
        action: &CartAction,
        callbacks: &mut impl CartCallbacks,
    ) -> Result<Cart, CartError> {
        let keys = Identity::detect(&self.store)?.keys();
        let cart = self.cached_ref(&keys)?;
        let token = self.access_token(&keys).await?;

        let response = match action.update_action() {
            Some(update) => {
                self.client
                    .update_my_cart(&token, &cart.id, cart.version, vec![update])
                    .await?
            }
            None => {
                self.client
                    .delete_my_cart(&token, &cart.id, cart.version)
                    .await?
            }
        };

        self.commit(&keys, response, callbacks)
    }

    /// Apply a discount code.
    pub async fn promo_code(&self, code: impl Into<String>, callbacks: &mut impl CartCallbacks) {
        let action = CartAction::AddDiscountCode { code: code.into() };
        self.apply(&action, callbacks).await;
    }

    /// Remove `quantity` units of a line item.
    pub async fn remove_item(
        &self,
        line_item_id: LineItemId,
        quantity: u64,
        callbacks: &mut impl CartCallbacks,
    ) {
        let action = CartAction::RemoveLineItem {
            line_item_id,
            quantity,
        };
        self.apply(&action, callbacks).await;
    }

    /// Set a line item's quantity.
    pub async fn change_quantity_item(
        &self,
        line_item_id: LineItemId,
        quantity: u64,
        callbacks: &mut impl CartCallbacks,
    ) {
        let action = CartAction::ChangeQuantity {
            line_item_id,
            quantity,
        };
        self.apply(&action, callbacks).await;
    }

    /// Delete the cart.
    pub async fn remove_cart(&self, callbacks: &mut impl CartCallbacks) {
        self.apply(&CartAction::DeleteCart, callbacks).await;
    }

    /// Re-fetch the cached cart, logging failures instead of returning them.
    pub async fn refresh(&self, callbacks: &mut impl CartCallbacks) {
        if let Err(e) = self.try_refresh(callbacks).await {
            log_failure("refresh", &e);
        }
    }

    /// Re-fetch the cached cart and update the cache.
    ///
    /// # Errors
    ///
    /// Same as [`CartService::try_apply`].
    #[instrument(skip_all)]
    pub async fn try_refresh(&self, callbacks: &mut impl CartCallbacks) -> Result<Cart, CartError> {
        let keys = Identity::detect(&self.store)?.keys();
        let cart = self.cached_ref(&keys)?;
        let token = self.access_token(&keys).await?;
        let response = self.client.get_my_cart(&token, &cart.id).await?;
        self.commit(&keys, response, callbacks)
    }

    /// The cached cart for the current identity, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or the cached value is
    /// not a cart.
    pub fn cached_cart(&self) -> Result<Option<Cart>, CartError> {
        let keys = Identity::detect(&self.store)?.keys();
        self.store
            .get(keys.cart)?
            .map(|raw| serde_json::from_str(&raw).map_err(CartError::InvalidCachedCart))
            .transpose()
    }

    fn cached_ref(&self, keys: &StorageKeys) -> Result<CartRef, CartError> {
        let raw = self.store.get(keys.cart)?.ok_or(CartError::NoCart)?;
        serde_json::from_str(&raw).map_err(CartError::InvalidCachedCart)
    }

    async fn access_token(&self, keys: &StorageKeys) -> Result<String, CartError> {
        self.refresher
            .schedule_token_refresh(&self.store, keys)
            .await;
        self.store
            .get(keys.access_token)?
            .filter(|token| !token.is_empty())
            .ok_or(CartError::MissingToken)
    }

    fn commit(
        &self,
        keys: &StorageKeys,
        response: CartResponse,
        callbacks: &mut impl CartCallbacks,
    ) -> Result<Cart, CartError> {
        let CartResponse { raw, cart } = response;
        let items =
            serde_json::to_string(&cart.item_product_ids()).map_err(CartError::Encode)?;

        // Cart and item list change together or not at all.
        self.store
            .set_many(&[(keys.cart, raw.as_str()), (keys.cart_items, items.as_str())])?;

        tracing::debug!(
            cart_id = %cart.id,
            version = cart.version,
            items = cart.line_items.len(),
            "Cart cached"
        );

        callbacks.set_cart_quantity(cart.total_quantity());
        callbacks.total_price(cart.total_price.cent_amount);
        Ok(cart)
    }
}

fn log_failure(action: &str, error: &CartError) {
    if error.is_skipped() {
        tracing::info!(action, reason = %error, "Cart action skipped");
    } else {
        tracing::error!(action, error = %error, "Cart action failed");
    }
}
