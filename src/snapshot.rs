// JSON snapshot of the whole item collection

use crate::error::PersistenceError;
use crate::item::{Item, ItemId};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{info, warn};

/// Serialize items as a JSON array
pub fn encode(items: &[Item]) -> Result<String, PersistenceError> {
    serde_json::to_string(items).map_err(PersistenceError::Serialize)
}

/// Parse a JSON array of items
///
/// A document that is not a JSON array is an error. Inside the array, entries
/// that fail to parse, have a blank name, or repeat an earlier id are skipped.
/// Blank or whitespace-only input decodes to an empty list.
pub fn decode(raw: &str) -> Result<Vec<Item>, PersistenceError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let entries: Vec<Value> = serde_json::from_str(raw).map_err(PersistenceError::Corrupt)?;
    let mut seen: HashSet<ItemId> = HashSet::new();
    let mut items = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        let item: Item = match serde_json::from_value(entry) {
            Ok(item) => item,
            Err(e) => {
                warn!(index, error = ?e, "Failed to parse item, skipping");
                continue;
            }
        };

        if item.name.trim().is_empty() {
            warn!(index, id = %item.id, "Item has empty name, skipping");
            continue;
        }

        if !seen.insert(item.id) {
            warn!(index, id = %item.id, "Duplicate item id, keeping first");
            continue;
        }

        items.push(item);
    }

    info!(count = items.len(), "Decoded items from snapshot");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemDraft;
    use chrono::NaiveDate;

    fn item(id: i64, name: &str) -> Item {
        Item::new(ItemId(id), ItemDraft::new(name).validate().unwrap())
    }

    #[test]
    fn test_round_trip() {
        let mut milk = item(1, "milk");
        milk.checked = true;
        let eggs = Item::new(
            ItemId(2),
            ItemDraft::new("eggs")
                .category("Dairy")
                .expires(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
                .validate()
                .unwrap(),
        );
        let items = vec![milk, eggs];

        let decoded = decode(&encode(&items).unwrap()).unwrap();
        assert_eq!(decoded, items);
    }

    #[test]
    fn test_empty_input() {
        assert!(decode("").unwrap().is_empty());
        assert!(decode("  \n").unwrap().is_empty());
        assert!(decode("[]").unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_document() {
        assert!(matches!(decode("{not json"), Err(PersistenceError::Corrupt(_))));
        assert!(matches!(decode(r#"{"id":1}"#), Err(PersistenceError::Corrupt(_))));
    }

    #[test]
    fn test_malformed_entry_skipped() {
        let raw = r#"[
            {"id":1,"name":"milk","category":"uncategorized","checked":false,"expirationDate":null},
            {"name":"no id"},
            {"id":3,"name":"eggs","category":"uncategorized","checked":false,"expirationDate":null}
        ]"#;

        let items = decode(raw).unwrap();
        let ids: Vec<ItemId> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![ItemId(1), ItemId(3)]);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let raw = r#"[
            {"id":1,"name":"first","category":"a","checked":false},
            {"id":1,"name":"second","category":"b","checked":true}
        ]"#;

        let items = decode(raw).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "first");
    }

    #[test]
    fn test_blank_name_skipped() {
        let raw = r#"[{"id":1,"name":"   ","category":"a","checked":false}]"#;
        assert!(decode(raw).unwrap().is_empty());
    }
}
