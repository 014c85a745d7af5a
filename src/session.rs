// Add/edit form state driven by a presentation layer

use crate::item::{Item, ItemDraft, ItemId};
use crate::storage::Storage;
use crate::store::ItemStore;
use chrono::NaiveDate;

/// Whether the form is creating a new item or editing an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Idle,
    Editing(ItemId),
}

/// What a successful submit did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submitted {
    Added(ItemId),
    Updated(ItemId),
    /// The item being edited no longer exists
    Vanished(ItemId),
}

/// Raw form inputs plus the current mode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemForm {
    pub name: String,
    pub category: String,
    pub expiration: String,
    mode: EditMode,
    error: Option<String>,
}

impl ItemForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Load `item` into the inputs and switch to editing it
    pub fn begin_edit(&mut self, item: &Item) {
        self.name = item.name.clone();
        // The default category shows as an empty picker
        self.category = if item.is_uncategorized() {
            String::new()
        } else {
            item.category.clone()
        };
        self.expiration = item
            .expiration_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        self.error = None;
        self.mode = EditMode::Editing(item.id);
    }

    /// Drop inputs and go back to adding
    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    /// Add or edit through `store` depending on the mode
    ///
    /// On failure the error is recorded and the inputs are kept.
    pub fn submit<S: Storage>(&mut self, store: &mut ItemStore<S>) -> Option<Submitted> {
        let draft = match self.draft() {
            Ok(draft) => draft,
            Err(message) => {
                self.error = Some(message);
                return None;
            }
        };

        let result = match self.mode {
            EditMode::Idle => store.add(draft).map(Submitted::Added),
            EditMode::Editing(id) => store.edit(id, draft).map(|found| {
                if found {
                    Submitted::Updated(id)
                } else {
                    Submitted::Vanished(id)
                }
            }),
        };

        match result {
            Ok(outcome) => {
                self.cancel();
                Some(outcome)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    fn draft(&self) -> Result<ItemDraft, String> {
        let mut draft = ItemDraft::new(self.name.clone()).category(self.category.clone());

        let expiration = self.expiration.trim();
        if !expiration.is_empty() {
            let date = NaiveDate::parse_from_str(expiration, "%Y-%m-%d")
                .map_err(|_| format!("invalid expiration date {:?}, expected YYYY-MM-DD", expiration))?;
            draft = draft.expires(date);
        }

        Ok(draft)
    }
}
