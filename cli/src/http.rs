//! `reqwest` transport for server-side cart updates.
//!
//! Outside the browser nothing attaches cookies for us, so the transport
//! sends the `csrftoken` cookie alongside the `X-CSRFToken` header and, when
//! configured, the `sessionid` cookie that identifies the logged-in visitor.

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use cart::sync::CSRF_HEADER;
use cart::{CartTransport, SyncError, TransportResponse};
use reqwest::header::{CONTENT_TYPE, COOKIE, REFERER};

pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
    session_id: Option<String>,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns the `reqwest` error if the HTTP client cannot be built.
    pub fn new(base_url: &str, session_id: Option<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_owned(), session_id })
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{base_url}{path}")
    } else {
        format!("{base_url}/{path}")
    }
}

fn cookie_header(csrf_token: &str, session_id: Option<&str>) -> String {
    match session_id {
        Some(session_id) => format!("csrftoken={csrf_token}; sessionid={session_id}"),
        None => format!("csrftoken={csrf_token}"),
    }
}

#[async_trait::async_trait(?Send)]
impl CartTransport for ReqwestTransport {
    async fn post_json(&self, path: &str, csrf_token: &str, body: String) -> Result<TransportResponse, SyncError> {
        let url = self.url(path);
        log::debug!("cart: POST {url}");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(CSRF_HEADER, csrf_token)
            .header(COOKIE, cookie_header(csrf_token, self.session_id.as_deref()))
            .header(REFERER, format!("{}/", self.base_url))
            .body(body)
            .send()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| SyncError::Transport(e.to_string()))?;
        Ok(TransportResponse { status, body })
    }
}
