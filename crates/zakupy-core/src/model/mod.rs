//! Persisted record types for the four collections.

pub mod item;
pub mod location;

pub use item::{HistoryItem, Item, RecurringItem};
pub use location::Location;
