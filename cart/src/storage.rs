//! Key-value storage seam for the guest cart.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser backs this with `localStorage`, the CLI with files on disk.
//! `MemoryStorage` keeps everything in process and is what tests use.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::StorageError;

/// Storage key holding the serialized guest cart.
pub const CART_STORAGE_KEY: &str = "cart";

/// String key-value store with `localStorage` semantics.
pub trait CartStorage {
    /// Read the raw value stored under `key`, or `None` if the key is unset.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend is unreachable or the read fails.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend is unreachable or refuses the write.
    fn save(&self, key: &str, raw: &str) -> Result<(), StorageError>;
}

impl<S: CartStorage + ?Sized> CartStorage for &S {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, raw: &str) -> Result<(), StorageError> {
        (**self).save(key, raw)
    }
}

impl<S: CartStorage + ?Sized> CartStorage for Rc<S> {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, raw: &str) -> Result<(), StorageError> {
        (**self).save(key, raw)
    }
}

/// In-process storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with `raw` under `key`.
    #[must_use]
    pub fn with_entry(key: &str, raw: &str) -> Self {
        let storage = Self::new();
        storage.entries.borrow_mut().insert(key.to_owned(), raw.to_owned());
        storage
    }

    /// Current raw value under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn save(&self, key: &str, raw: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_owned(), raw.to_owned());
        Ok(())
    }
}
