//! # client
//!
//! WASM entry point for storefront cart controls. Built with the `hydrate`
//! feature it binds every `.update-cart` control on the page to a
//! [`cart::CartUpdater`] backed by `localStorage`, `fetch` and
//! `window.location`. Without `hydrate` the browser glue compiles to inert
//! stubs so the crate still builds and tests natively.

pub mod controls;
pub mod net;
pub mod util;

use cart::CartUpdater;

use crate::net::api::FetchTransport;
use crate::util::cart_storage::BrowserStorage;
use crate::util::page::BrowserPage;

/// Updater wired to the browser backends.
pub type BrowserCartUpdater = CartUpdater<BrowserStorage, FetchTransport, BrowserPage>;

/// Build an updater from the session values the page injected.
#[must_use]
pub fn browser_updater() -> BrowserCartUpdater {
    let session = util::globals::read_session();
    CartUpdater::new(session, BrowserStorage::new(), FetchTransport, BrowserPage)
}

/// Module start hook: install logging, resync the cart cookie and bind cart
/// controls once the DOM is ready.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    if let Err(e) = BrowserStorage::new().refresh_cookie_mirror() {
        log::warn!("cart: could not refresh guest cart cookie: {e}");
    }
    controls::bind_when_ready(std::rc::Rc::new(browser_updater()));
}
