//! In-memory storage for tests, with per-key fault injection so the
//! degraded-read and best-effort-write paths can be exercised.

use super::{Key, Storage};
use crate::error::StoreError;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Default)]
pub struct MemoryStorage {
    docs: RefCell<HashMap<Key, Value>>,
    failing_reads: RefCell<HashSet<Key>>,
    failing_writes: RefCell<HashSet<Key>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent read of `key` fail.
    pub fn fail_reads(&self, key: Key) {
        self.failing_reads.borrow_mut().insert(key);
    }

    /// Make every subsequent write of `key` fail.
    pub fn fail_writes(&self, key: Key) {
        self.failing_writes.borrow_mut().insert(key);
    }

    /// Seed a raw document, bypassing the `Storage` trait.
    pub fn seed_raw(&self, key: Key, value: Value) {
        self.docs.borrow_mut().insert(key, value);
    }

    /// Snapshot a raw document for assertions.
    #[must_use]
    pub fn raw(&self, key: Key) -> Option<Value> {
        self.docs.borrow().get(&key).cloned()
    }
}

#[derive(Debug)]
struct InjectedFault(&'static str);

impl fmt::Display for InjectedFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "injected {} fault", self.0)
    }
}

impl std::error::Error for InjectedFault {}

impl Storage for MemoryStorage {
    fn read(&self, key: Key) -> Result<Option<Value>, StoreError> {
        if self.failing_reads.borrow().contains(&key) {
            return Err(StoreError::storage(key.as_str(), InjectedFault("read")));
        }
        Ok(self.docs.borrow().get(&key).cloned())
    }

    fn write(&self, key: Key, value: &Value) -> Result<(), StoreError> {
        if self.failing_writes.borrow().contains(&key) {
            return Err(StoreError::storage(key.as_str(), InjectedFault("write")));
        }
        self.docs.borrow_mut().insert(key, value.clone());
        Ok(())
    }

    fn remove(&self, key: Key) -> Result<(), StoreError> {
        self.docs.borrow_mut().remove(&key);
        Ok(())
    }
}
