use proptest::prelude::*;
use serde_json::{Value, json};
use std::collections::HashSet;
use zakupy_core::locations::deduplicate_by_name;
use zakupy_core::model::location::{canonical_name, name_key};

/// A raw location entry as found in persisted stores: either a bare name
/// string or a structured record, with names drawn from a small alphabet
/// so case-insensitive collisions actually happen.
fn arb_entry() -> impl Strategy<Value = Value> {
    let name = prop::sample::select(vec![
        "bakery",
        "Bakery",
        "BAKERY",
        "supermarket",
        "Supermarket",
        "butcher",
        "Grocery store",
        "grocery store",
        "épicerie",
        "Épicerie",
    ]);
    prop_oneof![
        name.clone().prop_map(|n| json!(n)),
        (name, "[a-z0-9]{6}", "#[0-9A-F]{6}").prop_map(|(n, id, color)| {
            json!({"id": id, "name": n, "color": color})
        }),
    ]
}

proptest! {
    #[test]
    fn dedupe_output_has_unique_case_insensitive_names(
        entries in prop::collection::vec(arb_entry(), 0..24)
    ) {
        let cleaned = deduplicate_by_name(entries);
        let mut keys = HashSet::new();
        for record in &cleaned {
            prop_assert!(
                keys.insert(name_key(&record.name)),
                "duplicate case-insensitive name: {}",
                record.name
            );
        }
    }

    #[test]
    fn dedupe_preserves_first_seen_key_order(
        entries in prop::collection::vec(arb_entry(), 0..24)
    ) {
        let mut first_seen = Vec::new();
        for entry in &entries {
            let name = match entry {
                Value::String(s) => s.clone(),
                Value::Object(map) => map["name"].as_str().unwrap_or_default().to_string(),
                _ => continue,
            };
            let key = name_key(&name);
            if !first_seen.contains(&key) {
                first_seen.push(key);
            }
        }

        let cleaned = deduplicate_by_name(entries);
        let cleaned_keys: Vec<String> =
            cleaned.iter().map(|r| name_key(&r.name)).collect();
        prop_assert_eq!(cleaned_keys, first_seen);
    }

    #[test]
    fn dedupe_is_idempotent(entries in prop::collection::vec(arb_entry(), 0..24)) {
        let once = deduplicate_by_name(entries);
        let raw_again: Vec<Value> = once
            .iter()
            .map(|r| serde_json::to_value(r).expect("serialize"))
            .collect();
        let twice = deduplicate_by_name(raw_again);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn canonical_is_a_fixed_point(name in "\\PC{0,12}") {
        let canonical = canonical_name(&name);
        prop_assert_eq!(canonical_name(&canonical), canonical);
    }
}
