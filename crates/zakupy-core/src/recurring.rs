//! Recurring templates: items saved for quick re-adding.

use crate::error::StoreError;
use crate::id;
use crate::list::LocationChoice;
use crate::locations;
use crate::model::{Item, RecurringItem};
use crate::storage::{Key, Storage, Store};
use tracing::debug;

/// Load all templates.
pub fn all<S: Storage>(store: &Store<S>) -> Result<Vec<RecurringItem>, StoreError> {
    store.get(Key::Recurring)
}

/// Save a new template.
pub fn add<S: Storage>(
    store: &Store<S>,
    name: &str,
    quantity: &str,
    choice: LocationChoice,
) -> Result<RecurringItem, StoreError> {
    let location = resolve(store, choice)?;
    let template = RecurringItem {
        id: id::generate(),
        name: name.trim().to_string(),
        quantity: quantity.trim().to_string(),
        location,
    };
    let mut templates: Vec<RecurringItem> = store.get(Key::Recurring)?;
    templates.push(template.clone());
    store.set(Key::Recurring, &templates);
    Ok(template)
}

/// Update a template's fields in place.
pub fn edit<S: Storage>(
    store: &Store<S>,
    template_id: &str,
    name: &str,
    quantity: &str,
    choice: LocationChoice,
) -> Result<(), StoreError> {
    let location = resolve(store, choice)?;
    let mut templates: Vec<RecurringItem> = store.get(Key::Recurring)?;
    let template = templates
        .iter_mut()
        .find(|t| t.id == template_id)
        .ok_or_else(|| StoreError::NotFound {
            id: template_id.into(),
        })?;
    template.name = name.trim().to_string();
    template.quantity = quantity.trim().to_string();
    template.location = location;
    store.set(Key::Recurring, &templates);
    Ok(())
}

/// Delete a template.
pub fn delete<S: Storage>(store: &Store<S>, template_id: &str) -> Result<(), StoreError> {
    let mut templates: Vec<RecurringItem> = store.get(Key::Recurring)?;
    let before = templates.len();
    templates.retain(|t| t.id != template_id);
    if templates.len() == before {
        return Err(StoreError::NotFound {
            id: template_id.into(),
        });
    }
    store.set(Key::Recurring, &templates);
    Ok(())
}

/// Append a copy of every template to the active list (fresh ids,
/// unchecked). Returns how many items were added.
pub fn load_all<S: Storage>(store: &Store<S>) -> Result<usize, StoreError> {
    let templates: Vec<RecurringItem> = store.get(Key::Recurring)?;
    if templates.is_empty() {
        return Ok(0);
    }

    let mut items: Vec<Item> = store.get(Key::Items)?;
    for template in &templates {
        items.push(Item {
            id: id::generate(),
            name: template.name.clone(),
            quantity: template.quantity.clone(),
            location: template.location.clone(),
            checked: false,
        });
    }
    store.set(Key::Items, &items);
    debug!(count = templates.len(), "loaded recurring items onto the list");
    Ok(templates.len())
}

fn resolve<S: Storage>(store: &Store<S>, choice: LocationChoice) -> Result<String, StoreError> {
    Ok(match choice {
        LocationChoice::Existing(name) => name,
        LocationChoice::New { name, color } => {
            locations::ensure_fresh(store, &name, color.as_deref())?.name
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{add, delete, edit, load_all};
    use crate::list::LocationChoice;
    use crate::model::Item;
    use crate::storage::{Key, MemoryStorage, Store};

    fn store() -> Store<MemoryStorage> {
        Store::new(MemoryStorage::new())
    }

    #[test]
    fn load_all_copies_templates_with_fresh_ids() {
        let store = store();
        let t = add(&store, "Milk", "2", LocationChoice::New { name: "Supermarket".into(), color: None })
            .expect("add");
        let count = load_all(&store).expect("load");
        assert_eq!(count, 1);

        let items: Vec<Item> = store.get(Key::Items).expect("items");
        assert_eq!(items.len(), 1);
        assert_ne!(items[0].id, t.id);
        assert!(!items[0].checked);
        assert_eq!(items[0].location, "Supermarket");
    }

    #[test]
    fn load_all_with_no_templates_adds_nothing() {
        let store = store();
        assert_eq!(load_all(&store).expect("load"), 0);
        assert!(store.get::<Item>(Key::Items).expect("items").is_empty());
    }

    #[test]
    fn edit_rewrites_fields_and_can_mint_a_location() {
        let store = store();
        let t = add(&store, "Milk", "2", LocationChoice::New { name: "Supermarket".into(), color: None })
            .expect("add");
        edit(
            &store,
            &t.id,
            "Oat milk",
            "1",
            LocationChoice::New { name: "health shop".into(), color: None },
        )
        .expect("edit");

        let templates = super::all(&store).expect("templates");
        assert_eq!(templates[0].name, "Oat milk");
        assert_eq!(templates[0].location, "Health shop");

        let locations = crate::locations::migrate(&store).expect("locations");
        assert!(locations.iter().any(|l| l.name == "Health shop"));
    }

    #[test]
    fn delete_unknown_template_is_not_found() {
        let store = store();
        assert!(delete(&store, "missing").is_err());
    }
}
