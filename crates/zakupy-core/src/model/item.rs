use serde::{Deserialize, Serialize};

/// An entry on the active shopping list.
///
/// `location` is the denormalized display name of a [`super::Location`];
/// renames are propagated by [`crate::cascade`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub quantity: String,
    pub location: String,
    #[serde(default)]
    pub checked: bool,
}

/// A saved template that can be loaded back onto the active list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringItem {
    pub id: String,
    pub name: String,
    pub quantity: String,
    pub location: String,
}

/// An archived entry: a completed location group member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    pub name: String,
    pub quantity: String,
    pub location: String,
    /// RFC 3339 timestamp recorded when the location group was archived.
    #[serde(rename = "completedAt")]
    pub completed_at: String,
}
