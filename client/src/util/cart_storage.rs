//! `localStorage`-backed guest cart storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The guest cart lives in `localStorage`, but the server renders cart and
//! checkout pages from the `cart` cookie. Every save therefore mirrors the
//! blob into that cookie so the page reloaded after a click shows the same
//! state. The cookie carries a one-year `max-age` so it survives a browser
//! restart, and [`BrowserStorage::refresh_cookie_mirror`] rewrites it on page
//! load whenever it has expired or drifted from `localStorage`.
//!
//! TRADE-OFFS
//! ==========
//! The cookie mirror is best-effort: a failed cookie write is logged and the
//! `localStorage` write still counts as success.

#[cfg(test)]
#[path = "cart_storage_test.rs"]
mod cart_storage_test;

use cart::{CartStorage, StorageError};

#[cfg(feature = "hydrate")]
use cart::CART_STORAGE_KEY;
#[cfg(feature = "hydrate")]
use wasm_bindgen::JsCast;

/// Lifetime of the mirrored `cart` cookie (one year).
pub const COOKIE_MAX_AGE_SECS: u32 = 31_536_000;

#[cfg(any(test, feature = "hydrate"))]
fn cookie_string(key: &str, raw: &str) -> String {
    format!("{key}={raw};path=/;max-age={COOKIE_MAX_AGE_SECS};SameSite=Lax")
}

/// Value of cookie `name` in a `document.cookie` string.
#[cfg(any(test, feature = "hydrate"))]
fn cookie_value<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find_map(|(key, value)| (key == name).then_some(value))
}

/// True when the cookie jar does not already carry `stored` under `name`.
#[cfg(any(test, feature = "hydrate"))]
fn cookie_is_stale(cookies: &str, name: &str, stored: &str) -> bool {
    cookie_value(cookies, name) != Some(stored)
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .ok_or_else(|| StorageError::Unavailable("no window".to_owned()))?
        .local_storage()
        .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
        .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_owned()))
}

#[cfg(feature = "hydrate")]
fn html_document() -> Result<web_sys::HtmlDocument, String> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "no document".to_owned())?
        .dyn_into::<web_sys::HtmlDocument>()
        .map_err(|_| "document is not an HTML document".to_owned())
}

#[cfg(feature = "hydrate")]
fn write_cookie(cookie: &str) -> Result<(), String> {
    html_document()?.set_cookie(cookie).map_err(|e| format!("{e:?}"))
}

#[cfg(feature = "hydrate")]
fn read_cookies() -> Result<String, String> {
    html_document()?.cookie().map_err(|e| format!("{e:?}"))
}

/// Guest cart storage in the browser's `localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Rewrite the `cart` cookie from `localStorage` if it is missing or out
    /// of date. Returns whether a write happened.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when `localStorage` or the cookie jar cannot
    /// be read or written.
    pub fn refresh_cookie_mirror(&self) -> Result<bool, StorageError> {
        #[cfg(feature = "hydrate")]
        {
            let Some(stored) = self.load(CART_STORAGE_KEY)? else {
                return Ok(false);
            };
            let cookies = read_cookies().map_err(StorageError::Read)?;
            if !cookie_is_stale(&cookies, CART_STORAGE_KEY, &stored) {
                return Ok(false);
            }
            write_cookie(&cookie_string(CART_STORAGE_KEY, &stored)).map_err(StorageError::Write)?;
            log::debug!("cart: refreshed guest cart cookie");
            Ok(true)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = self;
            Err(StorageError::Unavailable("not running in a browser".to_owned()))
        }
    }
}

impl CartStorage for BrowserStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).map_err(|e| StorageError::Read(format!("{e:?}")))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Err(StorageError::Unavailable("not running in a browser".to_owned()))
        }
    }

    fn save(&self, key: &str, raw: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?
                .set_item(key, raw)
                .map_err(|e| StorageError::Write(format!("{e:?}")))?;
            if key == CART_STORAGE_KEY {
                if let Err(e) = write_cookie(&cookie_string(key, raw)) {
                    log::warn!("cart: mirroring guest cart cookie failed: {e}");
                }
            }
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, raw);
            Err(StorageError::Unavailable("not running in a browser".to_owned()))
        }
    }
}
