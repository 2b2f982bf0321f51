//! History: archived location groups and their restoration.

use crate::error::StoreError;
use crate::id;
use crate::model::location::names_match;
use crate::model::{HistoryItem, Item};
use crate::storage::{Key, Storage, Store};
use tracing::info;

/// Load the full history.
pub fn all<S: Storage>(store: &Store<S>) -> Result<Vec<HistoryItem>, StoreError> {
    store.get(Key::History)
}

/// Move one history entry back onto the active list (fresh id,
/// unchecked).
pub fn restore_item<S: Storage>(store: &Store<S>, entry_id: &str) -> Result<Item, StoreError> {
    let mut history: Vec<HistoryItem> = store.get(Key::History)?;
    let pos = history
        .iter()
        .position(|e| e.id == entry_id)
        .ok_or_else(|| StoreError::NotFound {
            id: entry_id.into(),
        })?;
    let entry = history.remove(pos);
    store.set(Key::History, &history);

    let restored = Item {
        id: id::generate(),
        name: entry.name,
        quantity: entry.quantity,
        location: entry.location,
        checked: false,
    };
    let mut items: Vec<Item> = store.get(Key::Items)?;
    items.push(restored.clone());
    store.set(Key::Items, &items);
    Ok(restored)
}

/// Restore every history entry whose location matches `location`
/// case-insensitively. Returns how many items were restored.
pub fn restore_location<S: Storage>(store: &Store<S>, location: &str) -> Result<usize, StoreError> {
    let history: Vec<HistoryItem> = store.get(Key::History)?;
    let (matching, remaining): (Vec<HistoryItem>, Vec<HistoryItem>) = history
        .into_iter()
        .partition(|e| names_match(&e.location, location));
    if matching.is_empty() {
        return Ok(0);
    }

    let mut items: Vec<Item> = store.get(Key::Items)?;
    let count = matching.len();
    for entry in matching {
        items.push(Item {
            id: id::generate(),
            name: entry.name,
            quantity: entry.quantity,
            location: entry.location,
            checked: false,
        });
    }
    store.set(Key::Items, &items);
    store.set(Key::History, &remaining);
    info!(%location, count, "restored location group from history");
    Ok(count)
}

/// Empty the history collection.
pub fn clear<S: Storage>(store: &Store<S>) -> Result<(), StoreError> {
    store.set::<HistoryItem>(Key::History, &[]);
    Ok(())
}
