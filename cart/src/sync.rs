//! Server-side cart updates for authenticated visitors.
//!
//! SYSTEM CONTEXT
//! ==============
//! One click produces one `POST /update_item/` carrying
//! `{"productId": ..., "action": ...}` and the CSRF token header. The server
//! owns validation, so the action token is forwarded exactly as read from the
//! control. There is no de-duplication, timeout or retry; each call is an
//! independent request.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::SyncError;
use crate::record::CartAction;

/// Default update endpoint path.
pub const UPDATE_ITEM_PATH: &str = "/update_item/";
/// Header carrying the anti-forgery token.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Body of a cart update request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub product_id: String,
    pub action: String,
}

/// Status and raw body of an HTTP response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends JSON bodies to the storefront server. Enables mocking in tests.
#[async_trait::async_trait(?Send)]
pub trait CartTransport {
    /// POST `body` (already serialized JSON) to `path` with the CSRF header set.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Transport`] if no response was received.
    async fn post_json(&self, path: &str, csrf_token: &str, body: String) -> Result<TransportResponse, SyncError>;
}

#[async_trait::async_trait(?Send)]
impl<T: CartTransport + ?Sized> CartTransport for &T {
    async fn post_json(&self, path: &str, csrf_token: &str, body: String) -> Result<TransportResponse, SyncError> {
        (**self).post_json(path, csrf_token, body).await
    }
}

#[async_trait::async_trait(?Send)]
impl<T: CartTransport + ?Sized> CartTransport for Rc<T> {
    async fn post_json(&self, path: &str, csrf_token: &str, body: String) -> Result<TransportResponse, SyncError> {
        (**self).post_json(path, csrf_token, body).await
    }
}

/// Cart updates against the server's update endpoint.
pub struct ServerCartSync<T> {
    transport: T,
    endpoint: String,
    csrf_token: String,
}

impl<T: CartTransport> ServerCartSync<T> {
    pub fn new(transport: T, csrf_token: impl Into<String>) -> Self {
        Self { transport, endpoint: UPDATE_ITEM_PATH.to_owned(), csrf_token: csrf_token.into() }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Send one update request and return the parsed response body.
    ///
    /// # Errors
    ///
    /// Returns a [`SyncError`] if the body cannot be encoded, the request
    /// fails, the server answers with a non-2xx status, or the response is
    /// not JSON.
    pub async fn apply(&self, identifier: &str, action: &CartAction) -> Result<serde_json::Value, SyncError> {
        let request = UpdateRequest { product_id: identifier.to_owned(), action: action.as_str().to_owned() };
        let body = serde_json::to_string(&request).map_err(|e| SyncError::Encode(e.to_string()))?;

        log::debug!("cart: sending {action} for {identifier} to {}", self.endpoint);
        let response = self.transport.post_json(&self.endpoint, &self.csrf_token, body).await?;
        if !response.is_success() {
            return Err(SyncError::Status { status: response.status, body: response.body });
        }

        let data: serde_json::Value =
            serde_json::from_str(&response.body).map_err(|e| SyncError::Decode(e.to_string()))?;
        log::debug!("cart: server replied {data}");
        Ok(data)
    }
}
