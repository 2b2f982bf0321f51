use serde::{Deserialize, Serialize};

/// Color assigned to locations created without an explicit choice.
pub const DEFAULT_COLOR: &str = "#FF0000";

/// Color used when resolving a location that has none recorded (bare
/// legacy entries, orphaned names).
pub const FALLBACK_COLOR: &str = "#4CAF50";

/// A named, colored grouping tag for shopping items (e.g. a store).
///
/// Names are stored in canonical form (first letter capitalized, rest
/// unchanged) and are unique case-insensitively within the store. Items
/// reference a location by a denormalized copy of `name`, not by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl Location {
    /// Case-insensitive identity key for this location's name.
    #[must_use]
    pub fn key(&self) -> String {
        name_key(&self.name)
    }
}

/// Canonical display form: first character uppercased, rest unchanged.
#[must_use]
pub fn canonical_name(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whether `name` is already in canonical form.
#[must_use]
pub fn is_canonical(name: &str) -> bool {
    name == canonical_name(name)
}

/// Case-insensitive comparison key for location names.
#[must_use]
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// Whether two location names refer to the same location.
#[must_use]
pub fn names_match(a: &str, b: &str) -> bool {
    name_key(a) == name_key(b)
}

#[cfg(test)]
mod tests {
    use super::{Location, canonical_name, is_canonical, names_match};

    #[test]
    fn canonical_capitalizes_only_the_first_letter() {
        assert_eq!(canonical_name("supermarket"), "Supermarket");
        assert_eq!(canonical_name("milk run"), "Milk run");
        assert_eq!(canonical_name("BAKERY"), "BAKERY");
        assert_eq!(canonical_name(""), "");
    }

    #[test]
    fn canonical_handles_non_ascii() {
        assert_eq!(canonical_name("épicerie"), "Épicerie");
    }

    #[test]
    fn is_canonical_detects_correct_form() {
        assert!(is_canonical("Supermarket"));
        assert!(!is_canonical("supermarket"));
        assert!(is_canonical(""));
    }

    #[test]
    fn names_match_is_case_insensitive() {
        assert!(names_match("Bakery", "bakery"));
        assert!(names_match("BAKERY", "bakery"));
        assert!(!names_match("Bakery", "Butcher"));
    }

    #[test]
    fn location_json_matches_on_disk_shape() {
        let loc = Location {
            id: "abc123".into(),
            name: "Supermarket".into(),
            color: "#4CAF50".into(),
        };
        let json = serde_json::to_value(&loc).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"id": "abc123", "name": "Supermarket", "color": "#4CAF50"})
        );
    }
}
