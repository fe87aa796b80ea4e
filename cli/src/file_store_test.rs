use cart::{CART_STORAGE_KEY, CartAction, GuestCartStore};

use super::*;

#[test]
fn missing_file_loads_none() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    assert_eq!(storage.load(CART_STORAGE_KEY).unwrap(), None);
}

#[test]
fn save_creates_root_and_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("nested/state"));
    storage.save(CART_STORAGE_KEY, r#"{"1":{"quantity":2}}"#).unwrap();

    assert_eq!(storage.load(CART_STORAGE_KEY).unwrap().as_deref(), Some(r#"{"1":{"quantity":2}}"#));
    assert!(dir.path().join("nested/state/cart.json").exists());
    assert!(!dir.path().join("nested/state/cart.json.tmp").exists());
}

#[test]
fn path_like_keys_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    assert!(matches!(storage.load("../cart"), Err(StorageError::Unavailable(_))));
    assert!(matches!(storage.save("", "{}"), Err(StorageError::Unavailable(_))));
}

#[test]
fn guest_cart_persists_across_store_instances() {
    let dir = tempfile::tempdir().unwrap();
    GuestCartStore::new(FileStorage::new(dir.path())).apply("42", &CartAction::Add);
    GuestCartStore::new(FileStorage::new(dir.path())).apply("42", &CartAction::Add);

    let cart = GuestCartStore::new(FileStorage::new(dir.path())).load();
    assert_eq!(cart.quantity("42"), 2);
}

#[test]
fn corrupt_file_reads_as_empty_cart() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cart.json"), "{not json").unwrap();
    let cart = GuestCartStore::new(FileStorage::new(dir.path())).load();
    assert!(cart.is_empty());
}
