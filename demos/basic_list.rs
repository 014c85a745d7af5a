//! Basic list operations against file storage
//!
//! Adds, edits, checks, searches and clears items, then reopens the store to
//! show that everything was persisted.
//!
//! Run with: cargo run --example basic_list

use chrono::{Duration, Utc};
use eyre::Result;
use shoplist::{Expiry, FileStorage, ItemDraft, ItemStore};

fn main() -> Result<()> {
    // Create a temporary directory for this example
    let temp_dir = tempfile::tempdir()?;
    let data_dir = temp_dir.path().to_path_buf();

    println!("shoplist Basic Example");
    println!("======================\n");
    println!("Data dir: {}\n", data_dir.display());

    let mut store = ItemStore::open(FileStorage::open(&data_dir)?);

    println!("1. ADD");
    let today = Utc::now().date_naive();
    let milk = store.add(ItemDraft::new("Milk").category("Dairy").expires(today + Duration::days(3)))?;
    let bread = store.add(ItemDraft::new("Bread"))?;
    let _soap = store.add(ItemDraft::new("Soap").category("Household"))?;
    println!("   Added {} items\n", store.len());

    println!("2. VALIDATION");
    match store.add(ItemDraft::new("   ")) {
        Ok(_) => println!("   Unexpectedly accepted a blank name"),
        Err(e) => println!("   Rejected: {}\n", e),
    }

    println!("3. EDIT");
    store.edit(bread, ItemDraft::new("Whole grain bread").category("Bakery"))?;
    println!("   {:?}\n", store.get(bread));

    println!("4. TOGGLE + SEARCH");
    store.toggle_checked(milk);
    for item in store.search("MIL") {
        let expiry = Expiry::of(item.expiration_date, Utc::now());
        println!("   {} checked={} expires {}", item.name, item.checked, expiry);
    }
    println!();

    println!("5. CLEAR CHECKED");
    let removed = store.clear_checked();
    println!("   Removed {}, {} left\n", removed, store.len());

    println!("6. REOPEN");
    drop(store);
    let store = ItemStore::open(FileStorage::open(&data_dir)?);
    for item in store.items() {
        println!("   - {} [{}]", item.name, item.category);
    }

    println!("\nExample complete!");
    Ok(())
}
