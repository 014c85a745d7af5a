// Error types for shoplist

use thiserror::Error;

/// Rejected user input. The store is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("item name cannot be empty")]
    EmptyName,
}

/// Failure to read or write the persistence slot.
///
/// These are logged by the store and never roll back in-memory state.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("sqlite storage failed: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to serialize items: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("persisted items are corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("invalid slot name: {0:?}")]
    InvalidSlot(String),
}
