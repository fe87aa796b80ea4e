//! Click dispatcher for cart update controls.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host binds every element carrying [`UPDATE_CONTROL_CLASS`] and calls
//! [`CartUpdater::handle_click`] with the control's product and action
//! attributes. Anonymous visitors go through the guest cart and the page is
//! reloaded unconditionally. Authenticated visitors go through the server;
//! the page reloads only after a successful response, otherwise the visitor
//! is notified and the page is left alone.

#[cfg(test)]
#[path = "updater_test.rs"]
mod updater_test;

use std::rc::Rc;

use crate::error::SyncError;
use crate::guest::GuestCartStore;
use crate::record::{CartAction, CartRecord};
use crate::session::SessionContext;
use crate::storage::CartStorage;
use crate::sync::{CartTransport, ServerCartSync};

/// Class marking cart update controls.
pub const UPDATE_CONTROL_CLASS: &str = "update-cart";
/// Attribute holding the item identifier.
pub const PRODUCT_ATTRIBUTE: &str = "data-product";
/// Attribute holding the action token.
pub const ACTION_ATTRIBUTE: &str = "data-action";

/// Page-level side effects triggered after an update.
pub trait PageEffects {
    /// Reload the current page so server-rendered totals refresh.
    fn reload(&self);

    /// Show a message to the visitor.
    fn notify(&self, message: &str);
}

impl<P: PageEffects + ?Sized> PageEffects for &P {
    fn reload(&self) {
        (**self).reload();
    }

    fn notify(&self, message: &str) {
        (**self).notify(message);
    }
}

impl<P: PageEffects + ?Sized> PageEffects for Rc<P> {
    fn reload(&self) {
        (**self).reload();
    }

    fn notify(&self, message: &str) {
        (**self).notify(message);
    }
}

/// Product and action read off one update control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateControl {
    pub product_id: String,
    pub action: String,
}

impl UpdateControl {
    /// `None` unless both attributes are present.
    #[must_use]
    pub fn from_attributes(product_id: Option<String>, action: Option<String>) -> Option<Self> {
        Some(Self { product_id: product_id?, action: action? })
    }
}

/// What a click ended up doing.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Guest cart was rewritten; the page was reloaded.
    GuestUpdated(CartRecord),
    /// Server accepted the update; the page was reloaded.
    Synced(serde_json::Value),
    /// Server update failed; the visitor was notified and nothing reloaded.
    SyncFailed(SyncError),
}

/// Routes update clicks to the guest cart or the server.
pub struct CartUpdater<S, T, P> {
    session: SessionContext,
    guest: GuestCartStore<S>,
    server: ServerCartSync<T>,
    page: P,
}

impl<S, T, P> CartUpdater<S, T, P>
where
    S: CartStorage,
    T: CartTransport,
    P: PageEffects,
{
    pub fn new(session: SessionContext, storage: S, transport: T, page: P) -> Self {
        let server = ServerCartSync::new(transport, session.csrf_token.clone());
        Self { session, guest: GuestCartStore::new(storage), server, page }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.server = self.server.with_endpoint(endpoint);
        self
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub async fn handle_control(&self, control: &UpdateControl) -> ClickOutcome {
        self.handle_click(&control.product_id, &control.action).await
    }

    /// Dispatch one click on an update control.
    pub async fn handle_click(&self, identifier: &str, action: &str) -> ClickOutcome {
        let action = CartAction::parse(action);
        log::debug!(
            "cart: click product={identifier} action={action} authenticated={}",
            self.session.is_authenticated
        );

        if !self.session.is_authenticated {
            let record = self.guest.apply(identifier, &action);
            self.page.reload();
            return ClickOutcome::GuestUpdated(record);
        }

        match self.server.apply(identifier, &action).await {
            Ok(data) => {
                self.page.reload();
                ClickOutcome::Synced(data)
            }
            Err(e) => {
                log::error!(
                    "cart: server update failed ({}, retryable={}): {e}",
                    e.error_code(),
                    e.retryable()
                );
                self.page.notify(&failure_message(&e));
                ClickOutcome::SyncFailed(e)
            }
        }
    }
}

fn failure_message(err: &SyncError) -> String {
    match err {
        SyncError::Status { status: 401 | 403, .. } => {
            "Your session has expired. Please sign in again to update your cart.".to_owned()
        }
        _ if err.retryable() => "We couldn't update your cart. Please try again.".to_owned(),
        _ => "We couldn't update your cart. Please reload the page.".to_owned(),
    }
}
