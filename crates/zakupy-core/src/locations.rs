//! The location store reconciler.
//!
//! Owns the canonical list of locations: migrates legacy bare-string
//! entries into structured records, enforces case-insensitive name
//! uniqueness, and hands renames to [`crate::cascade`] so the denormalized
//! name copies in the item collections stay consistent.
//!
//! All operations take the store explicitly; there is no module-level
//! state.

use crate::cascade;
use crate::error::StoreError;
use crate::id;
use crate::model::location::{self, DEFAULT_COLOR, FALLBACK_COLOR, Location, canonical_name};
use crate::storage::{Key, Storage, Store};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info};

/// Load the location collection, migrating legacy bare-string entries
/// into structured records.
///
/// Format detection is a cheap heuristic on the first element: a list
/// whose first entry is already an object with a `name` field is returned
/// unchanged. Otherwise every element is wrapped into a record with a
/// fresh id, capitalized name, and the default color, and the migrated
/// list is written back immediately — so in steady state migration runs
/// at most once per store lifetime.
///
/// Elements that are neither strings nor records are not validated;
/// they are carried through as their JSON rendering.
pub fn migrate<S: Storage>(store: &Store<S>) -> Result<Vec<Location>, StoreError> {
    let raw: Vec<Value> = store.get(Key::Locations)?;

    if raw
        .first()
        .is_some_and(|v| v.is_object() && v.get("name").is_some())
    {
        return Ok(parse_records(raw));
    }

    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let migrated: Vec<Location> = raw
        .into_iter()
        .map(|entry| Location {
            id: id::generate(),
            name: match entry {
                Value::String(s) => canonical_name(&s),
                other => other.to_string(),
            },
            color: DEFAULT_COLOR.to_string(),
        })
        .collect();

    info!(count = migrated.len(), "migrated legacy location list");
    store.set(Key::Locations, &migrated);
    Ok(migrated)
}

/// Remove case-insensitive duplicate names from a raw location list.
///
/// First occurrence of a key wins and keeps its position. A later
/// occurrence replaces the kept entry only when it is a structured record
/// whose name is already in canonical capitalized form — correctly
/// capitalized duplicates win over earlier malformed ones. Everything
/// else is discarded silently.
#[must_use]
pub fn deduplicate_by_name(raw: Vec<Value>) -> Vec<Location> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut cleaned: Vec<Location> = Vec::new();

    for entry in raw {
        let Some(name) = entry_name(&entry) else {
            continue;
        };
        let key = location::name_key(&name);

        match seen.get(&key) {
            None => {
                let record = match as_record(&entry) {
                    Some(record) => record,
                    None => Location {
                        id: id::generate(),
                        name: canonical_name(&name),
                        color: FALLBACK_COLOR.to_string(),
                    },
                };
                seen.insert(key, cleaned.len());
                cleaned.push(record);
            }
            Some(&index) => {
                if let Some(record) = as_record(&entry)
                    && location::is_canonical(&record.name)
                {
                    cleaned[index] = record;
                }
            }
        }
    }

    cleaned
}

/// Deduplicate the persisted location list in place and write it back.
pub fn clean_duplicates<S: Storage>(store: &Store<S>) -> Result<Vec<Location>, StoreError> {
    let raw: Vec<Value> = store.get(Key::Locations)?;
    let cleaned = deduplicate_by_name(raw);
    store.set(Key::Locations, &cleaned);
    Ok(cleaned)
}

/// Create a new location. Fails with [`StoreError::NameConflict`] when an
/// existing location matches the canonicalized name case-insensitively;
/// the store is left unchanged.
pub fn add<S: Storage>(
    store: &Store<S>,
    name: &str,
    color: Option<&str>,
) -> Result<Location, StoreError> {
    let mut locations = migrate(store)?;
    let name = canonical_name(name.trim());

    if let Some(existing) = locations.iter().find(|l| location::names_match(&l.name, &name)) {
        return Err(StoreError::NameConflict {
            name: existing.name.clone(),
        });
    }

    let created = Location {
        id: id::generate(),
        name,
        color: color.unwrap_or(DEFAULT_COLOR).to_string(),
    };
    locations.push(created.clone());
    store.set(Key::Locations, &locations);
    debug!(name = %created.name, "added location");
    Ok(created)
}

/// Rename and/or recolor a location.
///
/// The cascade into the item collections runs only when the canonical
/// name text actually changed; color-only edits never touch items.
pub fn rename<S: Storage>(
    store: &Store<S>,
    loc_id: &str,
    new_name: &str,
    new_color: &str,
) -> Result<(), StoreError> {
    let mut locations = migrate(store)?;
    let index = locations
        .iter()
        .position(|l| l.id == loc_id)
        .ok_or_else(|| StoreError::NotFound { id: loc_id.into() })?;

    let new_name = canonical_name(new_name.trim());
    if let Some(existing) = locations
        .iter()
        .find(|l| l.id != loc_id && location::names_match(&l.name, &new_name))
    {
        return Err(StoreError::NameConflict {
            name: existing.name.clone(),
        });
    }

    let old_name = locations[index].name.clone();
    locations[index].name = new_name.clone();
    locations[index].color = new_color.to_string();
    store.set(Key::Locations, &locations);

    if old_name != new_name {
        info!(%old_name, %new_name, "location renamed, cascading to item collections");
        cascade::propagate(store, &old_name, &new_name);
    }
    Ok(())
}

/// Delete a location by id.
///
/// Items still carrying the deleted name are left in place under the now
/// stale string (soft-delete semantics; see the orphaning test).
pub fn delete<S: Storage>(store: &Store<S>, loc_id: &str) -> Result<(), StoreError> {
    let mut locations = migrate(store)?;
    let before = locations.len();
    locations.retain(|l| l.id != loc_id);
    if locations.len() == before {
        return Err(StoreError::NotFound { id: loc_id.into() });
    }
    store.set(Key::Locations, &locations);
    Ok(())
}

/// Register `name` as a freshly created location while adding an item.
///
/// Mirrors the inline-creation path of the item form: any existing
/// location matching case-insensitively is dropped and replaced by a new
/// record with a fresh id and the supplied color (default when `None`).
/// Returns the canonical name to stamp onto the item.
pub fn ensure_fresh<S: Storage>(
    store: &Store<S>,
    name: &str,
    color: Option<&str>,
) -> Result<Location, StoreError> {
    let mut locations = migrate(store)?;
    let name = canonical_name(name.trim());
    locations.retain(|l| !location::names_match(&l.name, &name));
    let created = Location {
        id: id::generate(),
        name,
        color: color.unwrap_or(DEFAULT_COLOR).to_string(),
    };
    locations.push(created.clone());
    store.set(Key::Locations, &locations);
    Ok(created)
}

/// Display color for a location name, falling back when the name is
/// unknown or orphaned.
pub fn color_of<S: Storage>(store: &Store<S>, name: &str) -> Result<String, StoreError> {
    let locations = migrate(store)?;
    Ok(locations
        .iter()
        .find(|l| location::names_match(&l.name, name))
        .map_or_else(|| FALLBACK_COLOR.to_string(), |l| l.color.clone()))
}

/// Lenient parse for a list whose first element looked structured. Other
/// elements are not deep-validated: stragglers that do not parse as
/// records (e.g. bare names merged in by an import, pending cleanup by
/// [`clean_duplicates`]) are skipped with a warning.
fn parse_records(raw: Vec<Value>) -> Vec<Location> {
    raw.into_iter()
        .filter_map(|entry| match serde_json::from_value::<Location>(entry) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(%err, "skipping malformed location entry");
                None
            }
        })
        .collect()
}

fn entry_name(entry: &Value) -> Option<String> {
    match entry {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map.get("name").and_then(Value::as_str).map(String::from),
        _ => None,
    }
}

fn as_record(entry: &Value) -> Option<Location> {
    entry
        .is_object()
        .then(|| serde_json::from_value(entry.clone()).ok())
        .flatten()
}
