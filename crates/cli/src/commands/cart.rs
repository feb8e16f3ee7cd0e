//! Cart commands.
//!
//! All cart commands work on the cart cached in the storage file, for the
//! customer if `isAuth` is set there and for the anonymous session otherwise.

use cartwheel_core::{Cart, CartAction};
use cartwheel_storefront::auth::OAuthRefresher;
use cartwheel_storefront::cart::{CartCallbacks, CartService};
use cartwheel_storefront::commerce::CommerceClient;
use cartwheel_storefront::config::StorefrontConfig;
use cartwheel_storefront::storage::FileStore;

use super::{CliError, refresher};

/// Cart service backed by the storage file.
pub type Service = CartService<FileStore, Option<OAuthRefresher>>;

/// Logs the new totals.
struct LogTotals;

impl CartCallbacks for LogTotals {
    fn set_cart_quantity(&mut self, quantity: u64) {
        tracing::info!(quantity, "Cart quantity updated");
    }

    fn total_price(&mut self, cent_amount: i64) {
        tracing::info!(cent_amount, "Cart total updated");
    }
}

/// Build the cart service from the environment.
///
/// # Errors
///
/// Returns an error if configuration is missing or invalid.
pub fn service() -> Result<Service, CliError> {
    let config = StorefrontConfig::from_env()?;
    let refresher = refresher(&config)?;
    let store = FileStore::new(config.storage_path.clone());
    tracing::debug!(path = %store.path().display(), "Using storage file");

    Ok(CartService::new(
        CommerceClient::new(&config.commerce),
        store,
        refresher,
    ))
}

/// Print the cached cart.
///
/// # Errors
///
/// Returns an error if the storage file cannot be read.
pub fn show(service: &Service) -> Result<(), CliError> {
    match service.cached_cart()? {
        Some(cart) => print_cart(&cart),
        None => tracing::info!("No cart cached"),
    }
    Ok(())
}

/// Re-fetch the cached cart.
///
/// # Errors
///
/// Returns an error if there is no cached cart or token, or the API call
/// fails.
pub async fn refresh(service: &Service) -> Result<(), CliError> {
    let cart = service.try_refresh(&mut LogTotals).await?;
    print_cart(&cart);
    Ok(())
}

/// Apply an action to the cached cart.
///
/// # Errors
///
/// Returns an error if there is no cached cart or token, or the API call
/// fails. The cache is unchanged on error.
pub async fn apply(service: &Service, action: &CartAction) -> Result<(), CliError> {
    let cart = service.try_apply(action, &mut LogTotals).await?;
    tracing::info!(
        action = action.name(),
        cart_id = %cart.id,
        version = cart.version,
        "Cart updated"
    );
    print_cart(&cart);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_cart(cart: &Cart) {
    println!("Cart {} (version {})", cart.id, cart.version);
    for line in &cart.line_items {
        let name = line
            .display_name("en")
            .unwrap_or_else(|| line.product_id.as_str());
        println!("  {} x {}  [{}]", line.quantity, name, line.id);
    }
    println!("Items: {}", cart.total_quantity());
    println!("Total: {}", cart.total_price);
}
