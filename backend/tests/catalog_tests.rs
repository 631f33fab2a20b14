//! Stock catalog store tests
//!
//! Covers replace-not-merge semantics, the "awaiting first upload" signal,
//! and search filtering.

use restock_portal_backend::services::catalog::{filter_catalog, CatalogStore};
use rust_decimal::Decimal;
use shared::StockItem;
use tempfile::tempdir;

fn item(name: &str, expiry: &str, available: i64) -> StockItem {
    StockItem::new(name, expiry, Decimal::from(available))
}

#[test]
fn absent_store_is_distinct_from_an_empty_catalog() {
    let dir = tempdir().unwrap();
    let store = CatalogStore::new(dir.path().join("stock.csv"));

    // Never uploaded: "awaiting first upload"
    assert_eq!(store.load().unwrap(), None);

    // Uploaded but empty: zero rows, not absent
    store.replace(&[]).unwrap();
    assert_eq!(store.load().unwrap(), Some(vec![]));
}

#[test]
fn replace_round_trips_the_catalog() {
    let dir = tempdir().unwrap();
    let store = CatalogStore::new(dir.path().join("stock.csv"));

    let items = vec![
        item("Paracetamol 500mg", "2026-01", 12),
        item("Ibuprofen 200mg", "2025-11", 3),
    ];
    store.replace(&items).unwrap();

    assert_eq!(store.load().unwrap(), Some(items));
}

#[test]
fn replace_overwrites_rather_than_merges() {
    let dir = tempdir().unwrap();
    let store = CatalogStore::new(dir.path().join("stock.csv"));

    store
        .replace(&[item("Old Item", "2025-01", 9), item("Kept Item", "2026-01", 4)])
        .unwrap();
    store.replace(&[item("Kept Item", "2026-01", 2)]).unwrap();

    // The omitted item is gone and the kept item carries the new quantity.
    let loaded = store.load().unwrap().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].product_name, "Kept Item");
    assert_eq!(loaded[0].available_qty, Decimal::from(2));
}

#[test]
fn duplicate_product_names_survive_the_round_trip() {
    let dir = tempdir().unwrap();
    let store = CatalogStore::new(dir.path().join("stock.csv"));

    let items = vec![item("Paracetamol", "2025-06", 2), item("Paracetamol", "2026-01", 7)];
    store.replace(&items).unwrap();

    assert_eq!(store.load().unwrap(), Some(items));
}

#[test]
fn fractional_quantities_are_preserved() {
    let dir = tempdir().unwrap();
    let store = CatalogStore::new(dir.path().join("stock.csv"));

    let items = vec![StockItem::new("Syrup 100ml", "2026-02", Decimal::new(25, 1))];
    store.replace(&items).unwrap();

    let loaded = store.load().unwrap().unwrap();
    assert_eq!(loaded[0].available_qty, Decimal::new(25, 1));
}

#[test]
fn fields_with_commas_and_quotes_round_trip() {
    let dir = tempdir().unwrap();
    let store = CatalogStore::new(dir.path().join("stock.csv"));

    let items = vec![item("Bandage, sterile \"large\"", "2026-01", 5)];
    store.replace(&items).unwrap();

    assert_eq!(store.load().unwrap(), Some(items));
}

#[test]
fn corrupt_quantity_cells_are_hard_errors() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stock.csv");
    let store = CatalogStore::new(&path);

    // Hand-damaged available quantity
    std::fs::write(
        &path,
        "Product Name,Expiry,Available Qty,Order Qty\nA,2026-01,lots,0\n",
    )
    .unwrap();
    let err = store.load().unwrap_err().to_string();
    assert!(err.contains("available quantity"), "got: {err}");

    // Hand-damaged order quantity is just as fatal
    std::fs::write(
        &path,
        "Product Name,Expiry,Available Qty,Order Qty\nA,2026-01,5,none\n",
    )
    .unwrap();
    let err = store.load().unwrap_err().to_string();
    assert!(err.contains("order quantity"), "got: {err}");
}

#[test]
fn search_matches_any_column_case_insensitively() {
    let items = vec![
        item("Paracetamol 500mg", "2026-01", 12),
        item("Ibuprofen 200mg", "2025-11", 3),
    ];

    let by_name = filter_catalog(items.clone(), "paracet");
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].product_name, "Paracetamol 500mg");

    // Expiry year matches too ("type name or expiry year" search)
    let by_year = filter_catalog(items.clone(), "2025");
    assert_eq!(by_year.len(), 1);
    assert_eq!(by_year[0].product_name, "Ibuprofen 200mg");

    // Blank search returns everything
    assert_eq!(filter_catalog(items.clone(), "  ").len(), 2);

    // No match returns nothing
    assert!(filter_catalog(items, "zzz").is_empty());
}
