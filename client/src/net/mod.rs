//! Networking for cart updates.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` implements the cart transport over the browser's `fetch`.

pub mod api;
