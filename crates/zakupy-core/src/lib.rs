//! zakupy-core library.
//!
//! Data model, storage layer, and the location store reconciler for the
//! zakupy shopping list. The reconciler owns location identity (unique
//! case-insensitive names) and propagates renames to every collection that
//! carries a denormalized copy of a location name.
//!
//! # Conventions
//!
//! - **Errors**: library APIs return [`error::StoreError`]; binaries wrap
//!   with `anyhow` at the boundary.
//! - **Logging**: use `tracing` macros (`info!`, `warn!`, `error!`,
//!   `debug!`, `trace!`).

pub mod cascade;
pub mod config;
pub mod error;
pub mod history;
pub mod id;
pub mod list;
pub mod locations;
pub mod model;
pub mod recurring;
pub mod storage;
pub mod transfer;

pub use error::StoreError;
pub use storage::{Key, ReadPolicy, Storage};
