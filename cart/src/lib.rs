//! # cart
//!
//! Platform-neutral core for cart quantity updates triggered from storefront
//! pages. A click on an `update-cart` control is routed either to the guest
//! cart held in browser-local storage or to the server's `/update_item/`
//! endpoint, depending on whether the visitor is authenticated.
//!
//! Nothing in this crate touches the browser. Storage, HTTP and page effects
//! sit behind small traits so the `client` crate can plug in `web-sys` /
//! `gloo-net` and the `cli` crate can plug in files / `reqwest`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`record`] | `CartRecord`, `CartAction` and the pure [`record::next_cart_state`] |
//! | [`storage`] | `CartStorage` seam and an in-process store |
//! | [`guest`] | Read-modify-write of the guest cart blob |
//! | [`sync`] | `CartTransport` seam and the `/update_item/` request |
//! | [`session`] | Session context injected by the host page |
//! | [`updater`] | Click dispatcher tying the above together |
//! | [`error`] | Storage and sync error types |

pub mod error;
pub mod guest;
pub mod record;
pub mod session;
pub mod storage;
pub mod sync;
pub mod updater;

pub use error::{StorageError, SyncError};
pub use guest::GuestCartStore;
pub use record::{CartAction, CartEntry, CartRecord, next_cart_state};
pub use session::SessionContext;
pub use storage::{CART_STORAGE_KEY, CartStorage, MemoryStorage};
pub use sync::{CartTransport, ServerCartSync, TransportResponse, UpdateRequest};
pub use updater::{CartUpdater, ClickOutcome, PageEffects, UpdateControl};
