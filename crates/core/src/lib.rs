//! Cartwheel Core - Shared types and validation.
//!
//! This crate provides the pure pieces used by every Cartwheel component:
//! - `storefront` - Commerce API client, local storage mirror and cart service
//! - `cli` - Command-line surface over the storefront library
//!
//! # Architecture
//!
//! The core crate contains only types, traits and validation - no I/O, no
//! storage access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere, including in tests without a runtime.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, money, emails and countries
//! - [`cart`] - Cart view and the update actions the commerce API accepts
//! - [`signup`] - Registration form data and its validator
//! - [`nav`] - Navigation menu state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod nav;
pub mod signup;
pub mod types;

pub use cart::{Cart, CartAction, CartRef, CartUpdate, LineItem, UpdateAction};
pub use nav::{NavLink, NavMenu};
pub use signup::{
    AddressDraft, CustomerDraft, SignUpData, SignUpErrors, SignUpField, validate_postal_code,
    validate_sign_up,
};
pub use types::*;
