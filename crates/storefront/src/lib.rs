//! Cartwheel Storefront library.
//!
//! Client-side plumbing for a storefront backed by a hosted commerce API:
//!
//! - [`config`] - Environment-driven configuration
//! - [`storage`] - String-keyed store mirroring browser local storage
//! - [`auth`] - Access token refresh before authenticated calls
//! - [`commerce`] - HTTP client for the `/me` cart and sign-up resources
//! - [`cart`] - The cart mutation protocol and its local cache

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod cart;
pub mod commerce;
pub mod config;
pub mod storage;
