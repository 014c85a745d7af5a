// Name search over items

use crate::item::Item;

/// Items whose name contains `query`, ignoring case
///
/// An empty query matches everything. Order follows the input slice.
pub fn search<'a>(items: &'a [Item], query: &str) -> Vec<&'a Item> {
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| needle.is_empty() || item.name.to_lowercase().contains(&needle))
        .collect()
}
