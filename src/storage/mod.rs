// Key-value storage backends for the persistence slot

mod file;
mod memory;
mod sqlite;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use crate::error::PersistenceError;

/// Named string slots, the local equivalent of browser local storage
pub trait Storage {
    /// Read a slot, `None` if it was never written
    fn get(&self, slot: &str) -> Result<Option<String>, PersistenceError>;

    /// Overwrite a slot
    fn set(&mut self, slot: &str, value: &str) -> Result<(), PersistenceError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, slot: &str) -> Result<Option<String>, PersistenceError> {
        (**self).get(slot)
    }

    fn set(&mut self, slot: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).set(slot, value)
    }
}

/// Slot names double as file names, so keep them to a safe alphabet
pub(crate) fn validate_slot(slot: &str) -> Result<(), PersistenceError> {
    let valid = !slot.is_empty()
        && slot.len() <= 64
        && slot.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(PersistenceError::InvalidSlot(slot.to_string()))
    }
}
