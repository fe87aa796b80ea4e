//! Browser environment helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each module wraps one piece of web-sys glue behind a cart trait or a plain
//! function, so hydrate-only code stays out of the dispatcher.

pub mod cart_storage;
pub mod globals;
pub mod page;
