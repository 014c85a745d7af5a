// Data model for shopping list items

use crate::error::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Category stored when the user does not pick one
pub const UNCATEGORIZED: &str = "uncategorized";

/// Categories offered by the item form
pub const PRESET_CATEGORIES: [&str; 5] = ["Groceries", "Electronics", "Clothing", "Books", "Other"];

/// Unique item identifier (creation timestamp in milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ItemId)
    }
}

/// A single shopping list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default, deserialize_with = "lenient_date")]
    pub expiration_date: Option<NaiveDate>,
}

impl Item {
    /// Build a new unchecked item from validated fields
    pub(crate) fn new(id: ItemId, fields: ValidDraft) -> Self {
        Self {
            id,
            name: fields.name,
            category: fields.category,
            checked: false,
            expiration_date: fields.expiration_date,
        }
    }

    /// Overwrite the user-editable fields, keeping id and checked state
    pub(crate) fn apply(&mut self, fields: ValidDraft) {
        self.name = fields.name;
        self.category = fields.category;
        self.expiration_date = fields.expiration_date;
    }

    pub fn is_uncategorized(&self) -> bool {
        self.category == UNCATEGORIZED
    }
}

/// User-supplied fields for add and edit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub category: Option<String>,
    pub expiration_date: Option<NaiveDate>,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn expires(mut self, date: NaiveDate) -> Self {
        self.expiration_date = Some(date);
        self
    }

    /// Trim the name, reject it if empty, and default a blank category
    pub fn validate(self) -> Result<ValidDraft, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED)
            .to_string();

        Ok(ValidDraft {
            name: name.to_string(),
            category,
            expiration_date: self.expiration_date,
        })
    }
}

/// Draft that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    name: String,
    category: String,
    expiration_date: Option<NaiveDate>,
}

// Older snapshots may hold "" instead of null for "no date"
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Helper function to get current timestamp in milliseconds
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
