// shoplist - Local shopping list with pluggable key-value persistence

pub mod config;
pub mod error;
pub mod expiry;
pub mod item;
pub mod search;
pub mod session;
pub mod snapshot;
pub mod storage;
pub mod store;

// Re-export main types for convenience
pub use error::{PersistenceError, ValidationError};
pub use expiry::{Expiry, ExpiryLevel};
pub use item::{Item, ItemDraft, ItemId, PRESET_CATEGORIES, UNCATEGORIZED, now_ms};
pub use session::{EditMode, ItemForm, Submitted};
pub use storage::{FileStorage, MemoryStorage, SqliteStorage, Storage};
pub use store::{Counts, DEFAULT_SLOT, ItemStore};
