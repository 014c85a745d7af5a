// In-process storage, mostly for tests and demos

use super::{Storage, validate_slot};
use crate::error::PersistenceError;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with one slot already populated
    pub fn with_slot(slot: &str, value: &str) -> Self {
        let mut slots = HashMap::new();
        slots.insert(slot.to_string(), value.to_string());
        Self { slots }
    }
}

impl Storage for MemoryStorage {
    fn get(&self, slot: &str) -> Result<Option<String>, PersistenceError> {
        validate_slot(slot)?;
        Ok(self.slots.get(slot).cloned())
    }

    fn set(&mut self, slot: &str, value: &str) -> Result<(), PersistenceError> {
        validate_slot(slot)?;
        self.slots.insert(slot.to_string(), value.to_string());
        Ok(())
    }
}
