//! Core types for Cartwheel.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod country;
pub mod email;
pub mod id;
pub mod money;

pub use country::{Country, CountryError};
pub use email::{Email, EmailError};
pub use id::*;
pub use money::Money;
