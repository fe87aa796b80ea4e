//! Guest cart persistence for anonymous visitors.
//!
//! Each update is a full read-modify-write of the blob under
//! [`CART_STORAGE_KEY`]. There is no locking; two rapid clicks can race and
//! the later write wins.
//!
//! ERROR HANDLING
//! ==============
//! Unreadable or unparsable data is treated as an empty cart. A failed write
//! is logged and dropped so the caller still gets the computed cart back.

#[cfg(test)]
#[path = "guest_test.rs"]
mod guest_test;

use crate::record::{CartAction, CartRecord, next_cart_state};
use crate::storage::{CART_STORAGE_KEY, CartStorage};

/// Guest cart bound to a storage backend.
pub struct GuestCartStore<S> {
    storage: S,
    key: String,
}

impl<S: CartStorage> GuestCartStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, CART_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: &str) -> Self {
        Self { storage, key: key.to_owned() }
    }

    /// Current guest cart. Never fails.
    pub fn load(&self) -> CartRecord {
        match self.storage.load(&self.key) {
            Ok(Some(raw)) => CartRecord::from_json_lenient(&raw),
            Ok(None) => CartRecord::new(),
            Err(e) => {
                log::warn!("cart: reading guest cart failed, starting empty: {e}");
                CartRecord::new()
            }
        }
    }

    /// Apply `action` to `identifier`, persist the result, and return it.
    pub fn apply(&self, identifier: &str, action: &CartAction) -> CartRecord {
        let next = next_cart_state(self.load(), identifier, action);
        if next.get(identifier).is_none() {
            log::debug!("cart: {identifier} removed from guest cart");
        }
        self.persist(&next);
        log::debug!("cart: guest cart now holds {} item(s)", next.item_count());
        next
    }

    fn persist(&self, record: &CartRecord) {
        let raw = match record.to_json() {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("cart: serializing guest cart failed: {e}");
                return;
            }
        };
        if let Err(e) = self.storage.save(&self.key, &raw) {
            log::warn!("cart: saving guest cart failed: {e}");
        }
    }
}
