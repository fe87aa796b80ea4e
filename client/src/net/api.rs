//! HTTP transport for server-side cart updates.
//!
//! Client-side (hydrate): real `fetch` calls via `gloo-net`, same-origin so
//! the session cookie rides along.
//! Native builds: a stub that fails every request, since the update endpoint
//! is only reachable from the page.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is mapped onto [`SyncError`] so the dispatcher can notify the
//! visitor instead of reloading into an unknown state.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use cart::{CartTransport, SyncError, TransportResponse};

#[cfg(any(test, feature = "hydrate"))]
fn request_failed_message(path: &str, detail: &str) -> String {
    format!("POST {path} failed: {detail}")
}

/// [`CartTransport`] over the browser `fetch` API.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

#[async_trait::async_trait(?Send)]
impl CartTransport for FetchTransport {
    async fn post_json(&self, path: &str, csrf_token: &str, body: String) -> Result<TransportResponse, SyncError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post(path)
                .header("Content-Type", "application/json")
                .header(cart::sync::CSRF_HEADER, csrf_token)
                .body(body)
                .map_err(|e| SyncError::Encode(e.to_string()))?
                .send()
                .await
                .map_err(|e| SyncError::Transport(request_failed_message(path, &e.to_string())))?;
            let status = resp.status();
            let body = resp
                .text()
                .await
                .map_err(|e| SyncError::Transport(request_failed_message(path, &e.to_string())))?;
            Ok(TransportResponse { status, body })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (csrf_token, body);
            Err(SyncError::Transport(format!("POST {path}: not available outside the browser")))
        }
    }
}
