//! Error types shared across the store operations.

/// Failure modes of store operations.
///
/// `NameConflict` and `NotFound` are recoverable: the store is left
/// unmodified and the caller may retry with different input. `Storage`
/// wraps read/write failures of the underlying persistence layer; whether
/// a read failure surfaces at all depends on the configured
/// [`crate::storage::ReadPolicy`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Another location already has this case-insensitive name.
    #[error("a location named '{name}' already exists")]
    NameConflict { name: String },

    /// The operation referenced an id (or group name) that is not in the
    /// store.
    #[error("no record matching '{id}'")]
    NotFound { id: String },

    /// The underlying persistence read/write failed.
    #[error("storage failure for key '{key}': {source}")]
    Storage {
        key: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl StoreError {
    pub(crate) fn storage(
        key: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Storage {
            key,
            source: Box::new(source),
        }
    }
}
