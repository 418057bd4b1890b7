//! Cross-scene key/value store.
//!
//! Scenes own their internal state exclusively between `setup` and
//! `cleanup`; the shared store is the one sanctioned side channel for data
//! that must outlive a scene (a selected difficulty, a final score). It is
//! a deliberate escape hatch, not a type-safe contract: scenes coordinate
//! key naming and value shapes out of band.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Error raised when a value cannot be stored.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The value failed to serialize into a JSON value.
    #[error("value for key '{key}' is not storable: {source}")]
    Unstorable {
        key: String,
        source: serde_json::Error,
    },
}

/// String-keyed store of arbitrary JSON values, shared by all scenes.
///
/// Owned by the director and passed to every hook. Keys are unique; no
/// other invariant is enforced.
///
/// # Example
///
/// ```rust
/// use stagehand::core::SharedStore;
///
/// let mut store = SharedStore::new();
/// store.set("score", 1200u32).unwrap();
/// store.set("player", "ada").unwrap();
///
/// assert_eq!(store.get::<u32>("score"), Some(1200));
/// assert_eq!(store.get::<String>("player").as_deref(), Some("ada"));
/// // A wrong-shaped read comes back empty, same as a missing key.
/// assert_eq!(store.get::<u32>("player"), None);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SharedStore {
    entries: HashMap<String, Value>,
}

impl SharedStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Store a serializable value under `key`, replacing any previous
    /// value.
    pub fn set<T: Serialize>(&mut self, key: impl Into<String>, value: T) -> Result<(), StoreError> {
        let key = key.into();
        let value = serde_json::to_value(value).map_err(|source| StoreError::Unstorable {
            key: key.clone(),
            source,
        })?;
        self.entries.insert(key, value);
        Ok(())
    }

    /// Read a value back as `T`.
    ///
    /// Returns `None` when the key is absent or the stored value does not
    /// deserialize into `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.entries.get(key)?;
        serde_json::from_value(value.clone()).ok()
    }

    /// Insert a raw JSON value, returning the previous one if any.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Read the raw JSON value under `key`.
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Remove the value under `key`, returning it if present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the stored keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
