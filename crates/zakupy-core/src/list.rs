//! Active shopping list operations.
//!
//! Items are grouped by their (denormalized) location name. A group whose
//! items are all checked is archived into history as a unit.

use crate::error::StoreError;
use crate::id;
use crate::locations;
use crate::model::{HistoryItem, Item, RecurringItem};
use crate::storage::{Key, Storage, Store};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Group label for items whose location field is empty.
pub const UNKNOWN_GROUP: &str = "Unknown";

/// How the location for a new item was chosen.
#[derive(Debug, Clone)]
pub enum LocationChoice {
    /// An existing location name, used as-is.
    Existing(String),
    /// A name typed inline: it is canonicalized and registered as a fresh
    /// location record, replacing any case-insensitive duplicate.
    New {
        name: String,
        /// Color for the fresh record; the default color when `None`.
        color: Option<String>,
    },
}

/// Add an item to the active list. With `recurring` set, a template with
/// the same fields is saved as well.
pub fn add_item<S: Storage>(
    store: &Store<S>,
    name: &str,
    quantity: &str,
    choice: LocationChoice,
    recurring: bool,
) -> Result<Item, StoreError> {
    let location = match choice {
        LocationChoice::Existing(name) => name,
        LocationChoice::New { name, color } => {
            locations::ensure_fresh(store, &name, color.as_deref())?.name
        }
    };

    let item = Item {
        id: id::generate(),
        name: name.trim().to_string(),
        quantity: quantity.trim().to_string(),
        location,
        checked: false,
    };

    if recurring {
        let mut templates: Vec<RecurringItem> = store.get(Key::Recurring)?;
        templates.push(RecurringItem {
            id: id::generate(),
            name: item.name.clone(),
            quantity: item.quantity.clone(),
            location: item.location.clone(),
        });
        store.set(Key::Recurring, &templates);
    }

    let mut items: Vec<Item> = store.get(Key::Items)?;
    items.push(item.clone());
    store.set(Key::Items, &items);
    debug!(name = %item.name, location = %item.location, "added item");
    Ok(item)
}

/// Load the active list.
pub fn all<S: Storage>(store: &Store<S>) -> Result<Vec<Item>, StoreError> {
    store.get(Key::Items)
}

/// Flip one item's checked flag, then archive any group that became fully
/// checked. Returns the new flag.
pub fn toggle_item<S: Storage>(store: &Store<S>, item_id: &str) -> Result<bool, StoreError> {
    let mut items: Vec<Item> = store.get(Key::Items)?;
    let item = items
        .iter_mut()
        .find(|i| i.id == item_id)
        .ok_or_else(|| StoreError::NotFound { id: item_id.into() })?;
    item.checked = !item.checked;
    let checked = item.checked;
    store.set(Key::Items, &items);
    archive_completed(store)?;
    Ok(checked)
}

/// Check or uncheck a whole location group at once: when every item is
/// already checked they are all unchecked, otherwise all checked. Returns
/// the state that was applied.
pub fn toggle_location<S: Storage>(store: &Store<S>, location: &str) -> Result<bool, StoreError> {
    let mut items: Vec<Item> = store.get(Key::Items)?;
    let group: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, i)| i.location == location)
        .map(|(idx, _)| idx)
        .collect();
    if group.is_empty() {
        return Err(StoreError::NotFound {
            id: location.into(),
        });
    }

    let all_checked = group.iter().all(|&idx| items[idx].checked);
    for &idx in &group {
        items[idx].checked = !all_checked;
    }
    store.set(Key::Items, &items);
    archive_completed(store)?;
    Ok(!all_checked)
}

/// Move every fully-checked location group into history, stamping
/// `completedAt`. Returns the names of the archived groups.
pub fn archive_completed<S: Storage>(store: &Store<S>) -> Result<Vec<String>, StoreError> {
    let items: Vec<Item> = store.get(Key::Items)?;

    let mut groups: BTreeMap<&str, Vec<&Item>> = BTreeMap::new();
    for item in &items {
        groups.entry(&item.location).or_default().push(item);
    }
    let completed: Vec<String> = groups
        .into_iter()
        .filter(|(_, members)| members.iter().all(|i| i.checked))
        .map(|(name, _)| name.to_string())
        .collect();
    if completed.is_empty() {
        return Ok(completed);
    }

    let now = chrono::Utc::now().to_rfc3339();
    let mut history: Vec<HistoryItem> = store.get(Key::History)?;
    let mut remaining = Vec::with_capacity(items.len());
    for item in items {
        if completed.contains(&item.location) {
            history.push(HistoryItem {
                id: item.id,
                name: item.name,
                quantity: item.quantity,
                location: item.location,
                completed_at: now.clone(),
            });
        } else {
            remaining.push(item);
        }
    }
    store.set(Key::History, &history);
    store.set(Key::Items, &remaining);
    info!(groups = ?completed, "archived completed location groups");
    Ok(completed)
}

/// Group items by location for display, alphabetically; empty locations
/// fall into the [`UNKNOWN_GROUP`] bucket.
#[must_use]
pub fn grouped(items: &[Item]) -> BTreeMap<String, Vec<&Item>> {
    let mut groups: BTreeMap<String, Vec<&Item>> = BTreeMap::new();
    for item in items {
        let label = if item.location.is_empty() {
            UNKNOWN_GROUP.to_string()
        } else {
            item.location.clone()
        };
        groups.entry(label).or_default().push(item);
    }
    groups
}

/// Names of location groups collapsed in the list view.
pub fn hidden_locations<S: Storage>(store: &Store<S>) -> Result<Vec<String>, StoreError> {
    store.get(Key::HiddenLocations)
}

/// Collapse or expand one location group in the list view. Returns true
/// when the group is now hidden.
pub fn toggle_hidden<S: Storage>(store: &Store<S>, location: &str) -> Result<bool, StoreError> {
    let mut hidden: Vec<String> = store.get(Key::HiddenLocations)?;
    let now_hidden = if let Some(pos) = hidden.iter().position(|l| l == location) {
        hidden.remove(pos);
        false
    } else {
        hidden.push(location.to_string());
        true
    };
    store.set(Key::HiddenLocations, &hidden);
    Ok(now_hidden)
}
