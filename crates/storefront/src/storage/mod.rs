//! String-keyed local storage.
//!
//! The storefront keeps its login flag, access tokens and a copy of the cart
//! in a flat key-value store, the way a browser keeps them in
//! `localStorage`. Access goes through the [`KeyValueStore`] trait so callers
//! choose the backing: [`MemoryStore`] for tests and embedding, [`FileStore`]
//! for the command line.
//!
//! Values are plain strings; structured values (the cart, the item list) are
//! stored as JSON text. There are no transactions: concurrent writers simply
//! overwrite each other.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use thiserror::Error;

/// Errors that can occur when reading or writing the store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a JSON object of strings.
    #[error("storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// A writer panicked while holding the store lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A flat string-keyed store.
pub trait KeyValueStore: Send + Sync {
    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Write several values so that either all of them land or none do.
    ///
    /// The default writes one key at a time and, when a write fails, puts
    /// back the values it already replaced. Stores that can write in one
    /// step should override it.
    ///
    /// # Errors
    ///
    /// Returns the error of the write that failed.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let previous = entries
            .iter()
            .map(|&(key, _)| self.get(key).map(|value| (key, value)))
            .collect::<Result<Vec<_>, _>>()?;

        for (written, &(key, value)) in entries.iter().enumerate() {
            if let Err(e) = self.set(key, value) {
                for (key, value) in previous.iter().take(written).rev() {
                    let restored = match value {
                        Some(value) => self.set(key, value),
                        None => self.remove(key),
                    };
                    if let Err(restore_error) = restored {
                        tracing::error!(
                            key = *key,
                            error = %restore_error,
                            "Failed to restore storage key"
                        );
                    }
                }
                return Err(e);
            }
        }
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        (**self).set_many(entries)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        (**self).set_many(entries)
    }
}

/// Storage keys.
pub mod keys {
    /// `"true"` while a customer is logged in.
    pub const IS_AUTH: &str = "isAuth";

    /// Customer access token.
    pub const AUTH_TOKEN: &str = "authToken";
    /// Anonymous session access token.
    pub const ANON_TOKEN: &str = "anonToken";

    /// Customer cart, as returned by the API.
    pub const CART_DATA: &str = "cartData";
    /// Anonymous cart, as returned by the API.
    pub const ANON_CART_DATA: &str = "anonCartData";

    /// Product IDs in the customer cart (JSON array).
    pub const CART_ITEM: &str = "cartItem";
    /// Product IDs in the anonymous cart (JSON array).
    pub const ANON_CART_ITEM: &str = "anonCartItem";

    /// Customer refresh token.
    pub const REFRESH_TOKEN: &str = "refreshToken";
    /// Anonymous session refresh token.
    pub const ANON_REFRESH_TOKEN: &str = "anonRefreshToken";

    /// Unix time (seconds) at which the customer access token expires.
    pub const TOKEN_EXPIRES_AT: &str = "tokenExpiresAt";
    /// Unix time (seconds) at which the anonymous access token expires.
    pub const ANON_TOKEN_EXPIRES_AT: &str = "anonTokenExpiresAt";
}

/// Whose cart and tokens are in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    /// A logged-in customer.
    Customer,
    /// An anonymous visitor.
    Anonymous,
}

impl Identity {
    /// Read the login flag from the store.
    ///
    /// Only the exact value `"true"` means logged in.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn detect<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self, StorageError> {
        let is_auth = store.get(keys::IS_AUTH)?;
        Ok(if is_auth.as_deref() == Some("true") {
            Self::Customer
        } else {
            Self::Anonymous
        })
    }

    /// The storage keys for this identity.
    #[must_use]
    pub const fn keys(self) -> StorageKeys {
        match self {
            Self::Customer => StorageKeys {
                access_token: keys::AUTH_TOKEN,
                refresh_token: keys::REFRESH_TOKEN,
                token_expires_at: keys::TOKEN_EXPIRES_AT,
                cart: keys::CART_DATA,
                cart_items: keys::CART_ITEM,
            },
            Self::Anonymous => StorageKeys {
                access_token: keys::ANON_TOKEN,
                refresh_token: keys::ANON_REFRESH_TOKEN,
                token_expires_at: keys::ANON_TOKEN_EXPIRES_AT,
                cart: keys::ANON_CART_DATA,
                cart_items: keys::ANON_CART_ITEM,
            },
        }
    }
}

/// The set of keys one identity reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageKeys {
    pub access_token: &'static str,
    pub refresh_token: &'static str,
    pub token_expires_at: &'static str,
    pub cart: &'static str,
    pub cart_items: &'static str,
}
