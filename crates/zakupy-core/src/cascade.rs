//! Cascade name propagation.
//!
//! Items reference a location by a denormalized copy of its name, so a
//! rename must rewrite the `location` field in every collection that
//! carries one: active items, recurring templates, and history entries.
//!
//! Contract:
//! - matching is case-insensitive on the stored value; the replacement is
//!   written exactly as supplied,
//! - the three collections are updated unconditionally and independently;
//!   a failing collection never blocks the others (best-effort, no
//!   rollback),
//! - idempotent: a second run of the same rename finds nothing left to
//!   update.

use crate::error::StoreError;
use crate::model::{HistoryItem, Item, RecurringItem};
use crate::model::location::names_match;
use crate::storage::{Key, Storage, Store};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

/// Per-collection result of one cascade run.
#[derive(Debug)]
pub struct CollectionOutcome {
    pub key: Key,
    /// Number of records rewritten. Zero when the collection failed.
    pub updated: usize,
    pub error: Option<StoreError>,
}

/// Outcome of propagating one rename across all three collections.
#[derive(Debug)]
pub struct CascadeOutcome {
    pub collections: Vec<CollectionOutcome>,
}

impl CascadeOutcome {
    /// True when every collection was loaded, rewritten, and persisted.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.collections.iter().all(|c| c.error.is_none())
    }

    /// Total records rewritten across the collections that succeeded.
    #[must_use]
    pub fn total_updated(&self) -> usize {
        self.collections.iter().map(|c| c.updated).sum()
    }
}

/// Rewrite the `location` field of every item matching `old_name` to
/// `new_name`, in all three item collections.
///
/// Errors are reported in the outcome (and logged), never retried.
pub fn propagate<S: Storage>(store: &Store<S>, old_name: &str, new_name: &str) -> CascadeOutcome {
    let collections = vec![
        rewrite::<S, Item>(store, Key::Items, old_name, new_name, |i| &mut i.location),
        rewrite::<S, RecurringItem>(store, Key::Recurring, old_name, new_name, |i| {
            &mut i.location
        }),
        rewrite::<S, HistoryItem>(store, Key::History, old_name, new_name, |i| {
            &mut i.location
        }),
    ];
    CascadeOutcome { collections }
}

fn rewrite<S, T>(
    store: &Store<S>,
    key: Key,
    old_name: &str,
    new_name: &str,
    location: impl Fn(&mut T) -> &mut String,
) -> CollectionOutcome
where
    S: Storage,
    T: Serialize + DeserializeOwned,
{
    let mut records: Vec<T> = match store.get(key) {
        Ok(records) => records,
        Err(err) => {
            error!(%key, %err, "cascade: failed to load collection");
            return CollectionOutcome {
                key,
                updated: 0,
                error: Some(err),
            };
        }
    };

    let mut updated = 0;
    for record in &mut records {
        let field = location(record);
        if names_match(field, old_name) {
            *field = new_name.to_string();
            updated += 1;
        }
    }

    if let Err(err) = store.try_set(key, &records) {
        error!(%key, %err, "cascade: failed to persist collection");
        return CollectionOutcome {
            key,
            updated: 0,
            error: Some(err),
        };
    }

    debug!(%key, updated, "cascade: collection rewritten");
    CollectionOutcome {
        key,
        updated,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::propagate;
    use crate::model::{HistoryItem, Item, RecurringItem};
    use crate::storage::{Key, MemoryStorage, Store};

    fn item(name: &str, location: &str) -> Item {
        Item {
            id: crate::id::generate(),
            name: name.into(),
            quantity: "1".into(),
            location: location.into(),
            checked: false,
        }
    }

    fn seeded_store() -> Store<MemoryStorage> {
        let store = Store::new(MemoryStorage::new());
        store.set(
            Key::Items,
            &[item("Bread", "Bakery"), item("Rolls", "bakery"), item("Milk", "Supermarket")],
        );
        store.set(
            Key::Recurring,
            &[RecurringItem {
                id: "r1".into(),
                name: "Croissant".into(),
                quantity: "2".into(),
                location: "BAKERY".into(),
            }],
        );
        store.set(
            Key::History,
            &[HistoryItem {
                id: "h1".into(),
                name: "Baguette".into(),
                quantity: "1".into(),
                location: "bakery".into(),
                completed_at: "2026-08-01T09:00:00Z".into(),
            }],
        );
        store
    }

    #[test]
    fn matches_case_insensitively_and_replaces_exactly() {
        let store = seeded_store();
        let outcome = propagate(&store, "Bakery", "Bread Shop");
        assert!(outcome.is_clean());
        assert_eq!(outcome.total_updated(), 4);

        let items: Vec<Item> = store.get(Key::Items).expect("read");
        assert_eq!(items[0].location, "Bread Shop");
        assert_eq!(items[1].location, "Bread Shop");
        assert_eq!(items[2].location, "Supermarket");

        let recurring: Vec<RecurringItem> = store.get(Key::Recurring).expect("read");
        assert_eq!(recurring[0].location, "Bread Shop");

        let history: Vec<HistoryItem> = store.get(Key::History).expect("read");
        assert_eq!(history[0].location, "Bread Shop");
    }

    #[test]
    fn second_run_is_a_no_op() {
        let store = seeded_store();
        propagate(&store, "Bakery", "Bread Shop");
        let after_first = store.get::<Item>(Key::Items).expect("read");

        let outcome = propagate(&store, "Bakery", "Bread Shop");
        assert_eq!(outcome.total_updated(), 0);
        assert_eq!(store.get::<Item>(Key::Items).expect("read"), after_first);
    }

    #[test]
    fn failing_collection_does_not_block_the_others() {
        let backend = MemoryStorage::new();
        backend.fail_writes(Key::Items);
        let store = Store::new(backend);
        store.set(
            Key::Recurring,
            &[RecurringItem {
                id: "r1".into(),
                name: "Croissant".into(),
                quantity: "2".into(),
                location: "Bakery".into(),
            }],
        );

        let outcome = propagate(&store, "Bakery", "Bread Shop");
        assert!(!outcome.is_clean());

        let recurring: Vec<RecurringItem> = store.get(Key::Recurring).expect("read");
        assert_eq!(recurring[0].location, "Bread Shop");
    }
}
