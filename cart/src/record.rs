//! Guest cart data model and the pure quantity transition.
//!
//! DESIGN
//! ======
//! `CartRecord` is what sits under the `"cart"` storage key: a JSON object
//! mapping item identifiers to `{ "quantity": n }`. Every stored entry has
//! `quantity >= 1`; [`next_cart_state`] deletes an entry instead of letting it
//! reach zero, so the invariant holds for anything this crate writes.
//! Records decoded from storage may come from older scripts, so the lenient
//! decoder checks each entry on its own and drops only the unreadable or
//! non-positive ones.

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;

use std::collections::BTreeMap;
use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Action token for an `add` control.
pub const ACTION_ADD: &str = "add";
/// Action token for a `remove` control.
pub const ACTION_REMOVE: &str = "remove";

/// A single line in the guest cart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    #[serde(deserialize_with = "deserialize_quantity")]
    pub quantity: i64,
}

/// Mapping from item identifier to cart entry.
///
/// Backed by a `BTreeMap` so serialized output has a stable key order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartRecord {
    items: BTreeMap<String, CartEntry>,
}

impl CartRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&CartEntry> {
        self.items.get(identifier)
    }

    /// Quantity for `identifier`, or 0 when the item is not in the cart.
    #[must_use]
    pub fn quantity(&self, identifier: &str) -> i64 {
        self.items.get(identifier).map_or(0, |entry| entry.quantity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CartEntry)> {
        self.items.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    /// Total number of units across all items, as shown on the cart badge.
    #[must_use]
    pub fn item_count(&self) -> i64 {
        self.items
            .values()
            .filter(|entry| entry.quantity > 0)
            .map(|entry| entry.quantity)
            .fold(0_i64, i64::saturating_add)
    }

    /// Strictly decode a stored cart blob.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if `raw` is not a cart-shaped JSON object.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Decode a stored cart blob entry by entry.
    ///
    /// Anything that is not a JSON object becomes an empty cart. Inside an
    /// object, entries that fail to decode or have a non-positive quantity
    /// are dropped and the rest are kept.
    #[must_use]
    pub fn from_json_lenient(raw: &str) -> Self {
        let entries: BTreeMap<String, serde_json::Value> = match serde_json::from_str(raw) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("cart: discarding unreadable stored cart: {e}");
                return Self::new();
            }
        };

        let mut items = BTreeMap::new();
        for (id, value) in entries {
            match serde_json::from_value::<CartEntry>(value) {
                Ok(entry) if entry.quantity > 0 => {
                    items.insert(id, entry);
                }
                Ok(entry) => log::debug!("cart: dropping {id} with quantity {}", entry.quantity),
                Err(e) => log::warn!("cart: dropping unreadable entry {id}: {e}"),
            }
        }
        Self { items }
    }

    /// Serialize to the storage representation.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error on serialization failure.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl FromIterator<(String, i64)> for CartRecord {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        let items = iter
            .into_iter()
            .filter(|(_, quantity)| *quantity > 0)
            .map(|(id, quantity)| (id, CartEntry { quantity }))
            .collect();
        Self { items }
    }
}

/// Parsed action token carried by an update control.
///
/// Unknown tokens are kept verbatim in `Other`: the guest path ignores them
/// while the server path forwards them unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CartAction {
    Add,
    Remove,
    Other(String),
}

impl CartAction {
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token {
            ACTION_ADD => Self::Add,
            ACTION_REMOVE => Self::Remove,
            other => Self::Other(other.to_owned()),
        }
    }

    /// The raw token as it appeared on the control.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Add => ACTION_ADD,
            Self::Remove => ACTION_REMOVE,
            Self::Other(token) => token,
        }
    }

    /// Quantity change applied to the guest cart.
    #[must_use]
    pub fn delta(&self) -> i64 {
        match self {
            Self::Add => 1,
            Self::Remove => -1,
            Self::Other(_) => 0,
        }
    }
}

impl From<&str> for CartAction {
    fn from(token: &str) -> Self {
        Self::parse(token)
    }
}

impl fmt::Display for CartAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute the cart that results from applying `action` to `identifier`.
///
/// An absent item starts at 0. The result never holds an entry with
/// quantity <= 0.
#[must_use]
pub fn next_cart_state(mut current: CartRecord, identifier: &str, action: &CartAction) -> CartRecord {
    let quantity = current.quantity(identifier).saturating_add(action.delta());
    if quantity <= 0 {
        current.items.remove(identifier);
    } else {
        current.items.insert(identifier.to_owned(), CartEntry { quantity });
    }
    current
}

// Scripts that wrote the blob from JS may have produced `1.0` rather than `1`.
fn deserialize_quantity<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float <= i64::MAX as f64
            {
                return Ok(float as i64);
            }
            Err(D::Error::custom("expected integer quantity"))
        }
        _ => Err(D::Error::custom("expected numeric quantity")),
    }
}
