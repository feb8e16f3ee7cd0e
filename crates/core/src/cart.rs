//! Cart view and update actions.
//!
//! The commerce API owns the cart. These types are a read-only view of the
//! fields the storefront needs (`id`, `version`, line items and totals) plus
//! the update actions it sends back. Everything else in the cart payload is
//! ignored here and preserved by whoever caches the raw response.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{CartId, LineItemId, Money, ProductId};

/// Identity and optimistic-concurrency version of a cart.
///
/// This is all a mutation needs from the cached cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartRef {
    pub id: CartId,
    pub version: i64,
}

/// A line item in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Line item ID (used by remove/change-quantity actions).
    pub id: LineItemId,
    /// The product this line refers to.
    pub product_id: ProductId,
    /// Localized product name, keyed by locale.
    #[serde(default)]
    pub name: BTreeMap<String, String>,
    /// Quantity of the product in the cart.
    pub quantity: u64,
    /// Total price of the line (quantity × unit price, after discounts).
    #[serde(default)]
    pub total_price: Option<Money>,
}

impl LineItem {
    /// Product name in the given locale, falling back to any available one.
    #[must_use]
    pub fn display_name(&self, locale: &str) -> Option<&str> {
        self.name
            .get(locale)
            .or_else(|| self.name.values().next())
            .map(String::as_str)
    }
}

/// A cart as returned by the commerce API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: CartId,
    pub version: i64,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    pub total_price: Money,
    /// Absent when the cart has no line items.
    #[serde(default)]
    pub total_line_item_quantity: Option<u64>,
}

impl Cart {
    /// Total quantity across all line items (zero for an empty cart).
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.total_line_item_quantity.unwrap_or(0)
    }

    /// Product IDs of every line item, in response order.
    #[must_use]
    pub fn item_product_ids(&self) -> Vec<ProductId> {
        self.line_items
            .iter()
            .map(|line| line.product_id.clone())
            .collect()
    }

    /// Identity and version of this cart.
    #[must_use]
    pub fn cart_ref(&self) -> CartRef {
        CartRef {
            id: self.id.clone(),
            version: self.version,
        }
    }
}

/// A mutation the storefront can apply to a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Apply a discount code.
    AddDiscountCode { code: String },
    /// Remove `quantity` units of a line item.
    RemoveLineItem {
        line_item_id: LineItemId,
        quantity: u64,
    },
    /// Set a line item's quantity.
    ChangeQuantity {
        line_item_id: LineItemId,
        quantity: u64,
    },
    /// Delete the whole cart.
    DeleteCart,
}

impl CartAction {
    /// Name of the action, as used in logs and in the API payload.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddDiscountCode { .. } => "addDiscountCode",
            Self::RemoveLineItem { .. } => "removeLineItem",
            Self::ChangeQuantity { .. } => "changeLineItemQuantity",
            Self::DeleteCart => "deleteCart",
        }
    }

    /// The update action to send, or `None` for cart deletion (which is a
    /// `DELETE` request rather than an update).
    #[must_use]
    pub fn update_action(&self) -> Option<UpdateAction> {
        match self {
            Self::AddDiscountCode { code } => {
                Some(UpdateAction::AddDiscountCode { code: code.clone() })
            }
            Self::RemoveLineItem {
                line_item_id,
                quantity,
            } => Some(UpdateAction::RemoveLineItem {
                line_item_id: line_item_id.clone(),
                quantity: *quantity,
            }),
            Self::ChangeQuantity {
                line_item_id,
                quantity,
            } => Some(UpdateAction::ChangeLineItemQuantity {
                line_item_id: line_item_id.clone(),
                quantity: *quantity,
            }),
            Self::DeleteCart => None,
        }
    }
}

/// Wire form of a cart update action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum UpdateAction {
    AddDiscountCode { code: String },
    RemoveLineItem { line_item_id: LineItemId, quantity: u64 },
    ChangeLineItemQuantity { line_item_id: LineItemId, quantity: u64 },
}

/// Body of a cart update request.
#[derive(Debug, Clone, Serialize)]
pub struct CartUpdate {
    pub version: i64,
    pub actions: Vec<UpdateAction>,
}
