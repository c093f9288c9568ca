//! Storage
//!
//! Key-value persistence collaborator for session state. The core writes the
//! serialized cart and payment history through this trait and rehydrates from
//! it at construction time; everything else about durability belongs to the
//! backend.

use mockall::automock;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Storage key for the serialized cart line items.
pub const CART_KEY: &str = "cart";

/// Storage key for the serialized payment-record history.
pub const PAYMENTS_KEY: &str = "recentPayments";

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend failed to read or write the given key.
    #[error("storage backend error for key {key}: {reason}")]
    Backend {
        /// Key the backend was asked to read or write.
        key: String,
        /// Backend-specific failure description.
        reason: String,
    },
}

/// String key-value store the cart persists itself through.
///
/// Writes are fire-and-forget from the cart's point of view: a failed `set`
/// loses at most the most recent mutation of local session state.
#[automock]
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory [`KeyValueStore`] backed by a hash map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: FxHashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with the given entries.
    pub fn with_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            values: entries.into_iter().collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
