//! Key-value persistence for the four record collections.
//!
//! The backend is a trivial get/set collaborator: one JSON document per
//! collection key. [`Store`] layers the read/write policy on top of a
//! [`Storage`] backend: failed reads degrade to an empty collection under
//! the default policy, and failed writes are logged and swallowed (the
//! in-memory state has already moved on).

pub mod json;
pub mod memory;

pub use json::JsonStorage;
pub use memory::MemoryStorage;

use crate::error::StoreError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, warn};

/// Collection keys, one per persisted JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Items,
    Recurring,
    Locations,
    History,
    /// Location groups collapsed in the list view.
    HiddenLocations,
}

impl Key {
    /// Stable on-disk name for this collection.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Items => "items",
            Self::Recurring => "recurring",
            Self::Locations => "locations",
            Self::History => "history",
            Self::HiddenLocations => "hidden_locations",
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do when reading a collection fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadPolicy {
    /// Log and treat the collection as empty. A single corrupt document
    /// never blocks the rest of the app.
    #[default]
    DefaultEmpty,
    /// Surface the failure to the caller.
    Propagate,
}

/// Raw document access. Implementations are synchronous and
/// single-process.
pub trait Storage {
    /// Read the document for `key`, `None` when it has never been written.
    fn read(&self, key: Key) -> Result<Option<Value>, StoreError>;

    /// Replace the document for `key`.
    fn write(&self, key: Key, value: &Value) -> Result<(), StoreError>;

    /// Delete the document for `key`. Deleting a missing key is a no-op.
    fn remove(&self, key: Key) -> Result<(), StoreError>;
}

/// A [`Storage`] backend paired with the read policy.
#[derive(Debug)]
pub struct Store<S> {
    backend: S,
    policy: ReadPolicy,
}

impl<S: Storage> Store<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            policy: ReadPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ReadPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub const fn policy(&self) -> ReadPolicy {
        self.policy
    }

    /// Load a collection, applying the read policy to both backend
    /// failures and documents that no longer parse as `Vec<T>`.
    pub fn get<T: DeserializeOwned>(&self, key: Key) -> Result<Vec<T>, StoreError> {
        let value = match self.backend.read(key) {
            Ok(Some(value)) => value,
            Ok(None) => return Ok(Vec::new()),
            Err(err) => return self.degrade(key, err),
        };
        match serde_json::from_value(value) {
            Ok(list) => Ok(list),
            Err(err) => self.degrade(key, StoreError::storage(key.as_str(), err)),
        }
    }

    /// Persist a collection. Write failures are logged, never propagated:
    /// in-memory state has already been mutated, so the caller cannot
    /// meaningfully roll back.
    pub fn set<T: Serialize>(&self, key: Key, list: &[T]) {
        let value = match serde_json::to_value(list) {
            Ok(value) => value,
            Err(err) => {
                error!(%key, %err, "failed to serialize collection");
                return;
            }
        };
        if let Err(err) = self.backend.write(key, &value) {
            error!(%key, %err, "failed to persist collection");
        }
    }

    /// Persist a collection, surfacing the write failure. Used where the
    /// caller reports per-collection outcomes (cascade propagation).
    pub fn try_set<T: Serialize>(&self, key: Key, list: &[T]) -> Result<(), StoreError> {
        let value = serde_json::to_value(list).map_err(|e| StoreError::storage(key.as_str(), e))?;
        self.backend.write(key, &value)
    }

    /// Delete a collection document entirely.
    pub fn remove(&self, key: Key) -> Result<(), StoreError> {
        self.backend.remove(key)
    }

    fn degrade<T>(&self, key: Key, err: StoreError) -> Result<Vec<T>, StoreError> {
        match self.policy {
            ReadPolicy::DefaultEmpty => {
                warn!(%key, %err, "read failed, treating collection as empty");
                Ok(Vec::new())
            }
            ReadPolicy::Propagate => Err(err),
        }
    }
}
