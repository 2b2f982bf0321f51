//! Import, export, demo data, and the clear-all reset.
//!
//! The interchange format is a human-editable JSON array of
//! `{name, quantity, location}` objects. Ids are stripped on export and
//! regenerated on import.

use crate::error::StoreError;
use crate::id;
use crate::model::RecurringItem;
use crate::model::location::{Location, name_key};
use crate::storage::{Key, Storage, Store};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// One entry of the interchange file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortableItem {
    pub name: String,
    pub quantity: String,
    pub location: String,
}

/// Why an import file was rejected.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("file is not a JSON array of items: {0}")]
    Json(#[from] serde_json::Error),

    #[error("entry {index} is missing name, quantity, or location")]
    MissingFields { index: usize },
}

/// Parse and validate an import file. Every entry must carry a non-empty
/// `name`, `quantity`, and `location`.
pub fn parse_import(text: &str) -> Result<Vec<PortableItem>, ImportError> {
    let items: Vec<PortableItem> = serde_json::from_str(text)?;
    for (index, item) in items.iter().enumerate() {
        if item.name.is_empty() || item.quantity.is_empty() || item.location.is_empty() {
            return Err(ImportError::MissingFields { index });
        }
    }
    Ok(items)
}

/// Export the recurring templates, ids stripped, as pretty-printed JSON.
pub fn export_recurring<S: Storage>(store: &Store<S>) -> Result<String, StoreError> {
    let templates: Vec<RecurringItem> = store.get(Key::Recurring)?;
    let portable: Vec<PortableItem> = templates
        .into_iter()
        .map(|t| PortableItem {
            name: t.name,
            quantity: t.quantity,
            location: t.location,
        })
        .collect();
    serde_json::to_string_pretty(&portable)
        .map_err(|e| StoreError::storage(Key::Recurring.as_str(), e))
}

/// Replace the recurring collection with the imported items (fresh ids)
/// and merge newly seen location names into the location collection as
/// bare names. The bare names are structured by the next
/// [`crate::locations::clean_duplicates`] pass.
pub fn import_recurring<S: Storage>(
    store: &Store<S>,
    items: &[PortableItem],
) -> Result<usize, StoreError> {
    let templates: Vec<RecurringItem> = items
        .iter()
        .map(|item| RecurringItem {
            id: id::generate(),
            name: item.name.clone(),
            quantity: item.quantity.clone(),
            location: item.location.clone(),
        })
        .collect();
    store.set(Key::Recurring, &templates);

    let mut raw: Vec<Value> = store.get(Key::Locations)?;
    for item in items {
        let already_present = raw.iter().any(|entry| {
            entry
                .as_str()
                .is_some_and(|s| s == item.location)
        });
        if !already_present {
            raw.push(Value::String(item.location.clone()));
        }
    }
    store.set(Key::Locations, &raw);

    info!(count = templates.len(), "imported recurring items");
    Ok(templates.len())
}

/// Sample data appended by the demo action.
#[must_use]
pub fn demo_items() -> Vec<PortableItem> {
    [
        ("Milk", "2", "Supermarket"),
        ("Bread", "1", "Bakery"),
        ("Eggs", "12", "Supermarket"),
        ("Coffee", "500", "Supermarket"),
        ("Apples", "1", "Grocery Store"),
        ("Chicken", "1", "Butcher"),
        ("Tomatoes", "0.5", "Grocery Store"),
        ("Cheese", "200", "Supermarket"),
    ]
    .into_iter()
    .map(|(name, quantity, location)| PortableItem {
        name: name.into(),
        quantity: quantity.into(),
        location: location.into(),
    })
    .collect()
}

fn demo_locations() -> Vec<Location> {
    [
        ("Supermarket", "#4CAF50"),
        ("Bakery", "#FF9800"),
        ("Grocery Store", "#2196F3"),
        ("Butcher", "#f44336"),
    ]
    .into_iter()
    .map(|(name, color)| Location {
        id: id::generate(),
        name: name.into(),
        color: color.into(),
    })
    .collect()
}

/// Append the demo items to the recurring collection and merge the demo
/// locations by case-insensitive name, demo colors winning.
pub fn load_demo<S: Storage>(store: &Store<S>) -> Result<usize, StoreError> {
    let mut templates: Vec<RecurringItem> = store.get(Key::Recurring)?;
    let demo = demo_items();
    for item in &demo {
        templates.push(RecurringItem {
            id: id::generate(),
            name: item.name.clone(),
            quantity: item.quantity.clone(),
            location: item.location.clone(),
        });
    }
    store.set(Key::Recurring, &templates);

    // Order-preserving merge keyed by lowercased name; a demo location
    // replaces an existing entry with the same key.
    let raw: Vec<Value> = store.get(Key::Locations)?;
    let mut keys: Vec<String> = Vec::new();
    let mut merged: Vec<Value> = Vec::new();
    for entry in raw {
        let Some(name) = entry_name(&entry) else {
            continue;
        };
        let key = name_key(&name);
        if !keys.contains(&key) {
            keys.push(key);
            merged.push(entry);
        }
    }
    for location in demo_locations() {
        let key = location.key();
        let value = serde_json::to_value(&location)
            .map_err(|e| StoreError::storage(Key::Locations.as_str(), e))?;
        if let Some(pos) = keys.iter().position(|k| *k == key) {
            merged[pos] = value;
        } else {
            keys.push(key);
            merged.push(value);
        }
    }
    store.set(Key::Locations, &merged);

    Ok(demo.len())
}

/// Delete the active, recurring, and location collections. History is
/// deliberately left in place.
pub fn clear_all<S: Storage>(store: &Store<S>) -> Result<(), StoreError> {
    store.remove(Key::Items)?;
    store.remove(Key::Recurring)?;
    store.remove(Key::Locations)?;
    info!("cleared all data");
    Ok(())
}

fn entry_name(entry: &Value) -> Option<String> {
    match entry {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map.get("name").and_then(Value::as_str).map(String::from),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        clear_all, export_recurring, import_recurring, load_demo, parse_import,
    };
    use crate::model::RecurringItem;
    use crate::storage::{Key, MemoryStorage, Store};
    use serde_json::json;

    fn store() -> Store<MemoryStorage> {
        Store::new(MemoryStorage::new())
    }

    #[test]
    fn parse_import_rejects_non_arrays_and_empty_fields() {
        assert!(parse_import("{}").is_err());
        assert!(parse_import(r#"[{"name":"","quantity":"1","location":"X"}]"#).is_err());
        let ok = parse_import(r#"[{"name":"Milk","quantity":"2","location":"Supermarket"}]"#)
            .expect("valid");
        assert_eq!(ok.len(), 1);
    }

    #[test]
    fn import_replaces_recurring_and_merges_bare_location_names() {
        let store = store();
        store.set(
            Key::Recurring,
            &[RecurringItem {
                id: "old".into(),
                name: "Old".into(),
                quantity: "1".into(),
                location: "Old Place".into(),
            }],
        );
        store
            .try_set(
                Key::Locations,
                &[json!({"id": "a", "name": "Supermarket", "color": "#4CAF50"})],
            )
            .expect("seed");

        let items = parse_import(
            r#"[{"name":"Milk","quantity":"2","location":"Supermarket"},
                {"name":"Bread","quantity":"1","location":"Bakery"}]"#,
        )
        .expect("parse");
        let count = import_recurring(&store, &items).expect("import");
        assert_eq!(count, 2);

        let templates: Vec<RecurringItem> = store.get(Key::Recurring).expect("read");
        assert_eq!(templates.len(), 2, "import replaces, not appends");
        assert!(templates.iter().all(|t| !t.id.is_empty() && t.id != "old"));

        // New names are merged as bare strings, pending cleanup.
        let raw: Vec<serde_json::Value> = store.get(Key::Locations).expect("read");
        assert_eq!(raw.len(), 3);
        assert_eq!(raw[1], json!("Supermarket"));
        assert_eq!(raw[2], json!("Bakery"));

        let cleaned = crate::locations::clean_duplicates(&store).expect("cleanup");
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0].name, "Supermarket");
        assert_eq!(cleaned[0].id, "a", "structured record wins over bare name");
        assert_eq!(cleaned[1].name, "Bakery");
    }

    #[test]
    fn export_strips_ids() {
        let store = store();
        store.set(
            Key::Recurring,
            &[RecurringItem {
                id: "r1".into(),
                name: "Milk".into(),
                quantity: "2".into(),
                location: "Supermarket".into(),
            }],
        );
        let text = export_recurring(&store).expect("export");
        assert!(!text.contains("\"id\""));
        let round: Vec<super::PortableItem> = serde_json::from_str(&text).expect("reparse");
        assert_eq!(round.len(), 1);
        assert_eq!(round[0].name, "Milk");
    }

    #[test]
    fn demo_merge_prefers_demo_colors() {
        let store = store();
        store
            .try_set(
                Key::Locations,
                &[json!({"id": "a", "name": "supermarket", "color": "#000000"})],
            )
            .expect("seed");

        load_demo(&store).expect("demo");
        let locations = crate::locations::migrate(&store).expect("locations");
        let supermarket = locations
            .iter()
            .find(|l| l.name == "Supermarket")
            .expect("merged");
        assert_eq!(supermarket.color, "#4CAF50");
        assert_eq!(locations.len(), 4);
    }

    #[test]
    fn clear_all_keeps_history() {
        let store = store();
        store.set(Key::Items, &[json!({"x": 1})]);
        store.set(Key::History, &[json!({"x": 1})]);
        clear_all(&store).expect("clear");
        assert!(store.get::<serde_json::Value>(Key::Items).expect("items").is_empty());
        assert_eq!(
            store.get::<serde_json::Value>(Key::History).expect("history").len(),
            1
        );
    }
}
