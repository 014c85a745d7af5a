// Item store: the authoritative collection bound to a persistence slot

use crate::error::{PersistenceError, ValidationError};
use crate::item::{Item, ItemDraft, ItemId, now_ms};
use crate::search;
use crate::snapshot;
use crate::storage::Storage;
use std::collections::HashSet;
use tracing::{debug, error, info};

/// Slot name used when none is configured
pub const DEFAULT_SLOT: &str = "shoppingList";

/// Totals shown under the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    pub total: usize,
    pub checked: usize,
}

/// In-memory item collection that rewrites its slot after every mutation
///
/// The in-memory state is the source of truth for the session. A failed write
/// is logged and remembered in `last_persist_error`, never rolled back.
pub struct ItemStore<S: Storage> {
    storage: S,
    slot: String,
    items: Vec<Item>,
    last_id: i64,
    last_persist_error: Option<String>,
}

impl<S: Storage> ItemStore<S> {
    /// Rehydrate from the default slot
    pub fn open(storage: S) -> Self {
        Self::open_slot(storage, DEFAULT_SLOT)
    }

    /// Rehydrate from `slot`, starting empty if it is missing or unreadable
    pub fn open_slot(storage: S, slot: impl Into<String>) -> Self {
        let slot = slot.into();

        let items = match Self::load(&storage, &slot) {
            Ok(items) => items,
            Err(e) => {
                error!(slot = %slot, error = %e, "Failed to load saved items, starting empty");
                Vec::new()
            }
        };

        let last_id = items.iter().map(|item| item.id.0).max().unwrap_or(0);
        info!(slot = %slot, count = items.len(), "Opened item store");

        Self {
            storage,
            slot,
            items,
            last_id,
            last_persist_error: None,
        }
    }

    fn load(storage: &S, slot: &str) -> Result<Vec<Item>, PersistenceError> {
        match storage.get(slot)? {
            Some(raw) => snapshot::decode(&raw),
            None => Ok(Vec::new()),
        }
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn counts(&self) -> Counts {
        Counts {
            total: self.items.len(),
            checked: self.items.iter().filter(|item| item.checked).count(),
        }
    }

    /// Error text of the most recent failed write, cleared by the next good one
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append a new unchecked item
    pub fn add(&mut self, draft: ItemDraft) -> Result<ItemId, ValidationError> {
        let fields = draft.validate()?;
        let id = self.next_id();

        self.items.push(Item::new(id, fields));
        debug!(%id, "Added item");

        self.persist();
        Ok(id)
    }

    /// Replace name, category and expiration in place
    ///
    /// Returns `Ok(false)` when no item has `id`.
    pub fn edit(&mut self, id: ItemId, draft: ItemDraft) -> Result<bool, ValidationError> {
        let fields = draft.validate()?;

        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            debug!(%id, "Edit target not found");
            return Ok(false);
        };

        item.apply(fields);
        debug!(%id, "Edited item");

        self.persist();
        Ok(true)
    }

    /// Remove one item; returns whether it existed
    pub fn delete(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);

        if self.items.len() == before {
            debug!(%id, "Delete target not found");
            return false;
        }

        debug!(%id, "Deleted item");
        self.persist();
        true
    }

    /// Flip `checked`; returns the new value, or `None` if absent
    pub fn toggle_checked(&mut self, id: ItemId) -> Option<bool> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        item.checked = !item.checked;
        let checked = item.checked;

        debug!(%id, checked, "Toggled item");
        self.persist();
        Some(checked)
    }

    /// Remove every checked item; returns how many were removed
    pub fn clear_checked(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.checked);
        let removed = before - self.items.len();

        debug!(removed, "Cleared checked items");
        self.persist();
        removed
    }

    /// Remove every item; returns how many were removed
    pub fn clear_all(&mut self) -> usize {
        let removed = self.items.len();
        self.items.clear();

        debug!(removed, "Cleared all items");
        self.persist();
        removed
    }

    // ========================================================================
    // Derived views
    // ========================================================================

    /// Items whose name contains `query`, case-insensitively
    pub fn search(&self, query: &str) -> Vec<&Item> {
        search::search(&self.items, query)
    }

    /// Distinct categories in use, in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .map(|item| item.category.as_str())
            .filter(|category| seen.insert(*category))
            .collect()
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    // Millisecond timestamps, bumped past the last issued id on collision
    fn next_id(&mut self) -> ItemId {
        let Some(next) = self.last_id.checked_add(1) else {
            // A loaded id sits at i64::MAX, nothing above it is left
            let id = self.smallest_unused_id();
            debug!(id, "Id space exhausted, reusing a free id");
            return ItemId(id);
        };

        let id = now_ms().max(next);
        self.last_id = id;
        ItemId(id)
    }

    fn smallest_unused_id(&self) -> i64 {
        let used: HashSet<i64> = self.items.iter().map(|item| item.id.0).collect();
        (0..).find(|id| !used.contains(id)).unwrap_or_default()
    }

    fn persist(&mut self) {
        let result = snapshot::encode(&self.items).and_then(|json| self.storage.set(&self.slot, &json));

        match result {
            Ok(()) => {
                self.last_persist_error = None;
            }
            Err(e) => {
                error!(slot = %self.slot, error = %e, "Failed to save items");
                self.last_persist_error = Some(e.to_string());
            }
        }
    }
}
