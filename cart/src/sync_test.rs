use std::cell::RefCell;

use serde_json::json;

use super::*;

// =========================================================================
// RecordingTransport
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
struct SentRequest {
    path: String,
    csrf_token: String,
    body: String,
}

struct RecordingTransport {
    reply: Result<TransportResponse, SyncError>,
    sent: RefCell<Vec<SentRequest>>,
}

impl RecordingTransport {
    fn replying(status: u16, body: &str) -> Self {
        Self { reply: Ok(TransportResponse { status, body: body.into() }), sent: RefCell::new(Vec::new()) }
    }

    fn failing(message: &str) -> Self {
        Self { reply: Err(SyncError::Transport(message.into())), sent: RefCell::new(Vec::new()) }
    }
}

#[async_trait::async_trait(?Send)]
impl CartTransport for RecordingTransport {
    async fn post_json(&self, path: &str, csrf_token: &str, body: String) -> Result<TransportResponse, SyncError> {
        self.sent.borrow_mut().push(SentRequest { path: path.into(), csrf_token: csrf_token.into(), body });
        self.reply.clone()
    }
}

// =========================================================================
// UpdateRequest
// =========================================================================

#[test]
fn update_request_uses_camel_case_product_id() {
    let req = UpdateRequest { product_id: "7".into(), action: "add".into() };
    assert_eq!(serde_json::to_string(&req).unwrap(), r#"{"productId":"7","action":"add"}"#);
}

#[test]
fn response_success_range() {
    assert!(TransportResponse { status: 200, body: String::new() }.is_success());
    assert!(TransportResponse { status: 204, body: String::new() }.is_success());
    assert!(!TransportResponse { status: 302, body: String::new() }.is_success());
    assert!(!TransportResponse { status: 403, body: String::new() }.is_success());
}

// =========================================================================
// ServerCartSync::apply
// =========================================================================

#[tokio::test]
async fn add_posts_once_with_csrf_header() {
    let transport = RecordingTransport::replying(200, r#""Item was successfully updated""#);
    let sync = ServerCartSync::new(&transport, "tok-123");

    let data = sync.apply("7", &CartAction::Add).await.unwrap();
    assert_eq!(data, json!("Item was successfully updated"));

    let sent = transport.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].path, "/update_item/");
    assert_eq!(sent[0].csrf_token, "tok-123");
    let body: serde_json::Value = serde_json::from_str(&sent[0].body).unwrap();
    assert_eq!(body, json!({"productId": "7", "action": "add"}));
}

#[tokio::test]
async fn unknown_action_is_forwarded_verbatim() {
    let transport = RecordingTransport::replying(200, "{}");
    let sync = ServerCartSync::new(&transport, "t");
    sync.apply("7", &CartAction::parse("set-5")).await.unwrap();

    let body: serde_json::Value = serde_json::from_str(&transport.sent.borrow()[0].body).unwrap();
    assert_eq!(body["action"], "set-5");
}

#[tokio::test]
async fn custom_endpoint_is_used() {
    let transport = RecordingTransport::replying(200, "{}");
    let sync = ServerCartSync::new(&transport, "t").with_endpoint("/shop/update_item/");
    sync.apply("1", &CartAction::Remove).await.unwrap();
    assert_eq!(transport.sent.borrow()[0].path, "/shop/update_item/");
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let transport = RecordingTransport::replying(403, r#""User not logged in. Cannot update database.""#);
    let sync = ServerCartSync::new(&transport, "t");
    let err = sync.apply("7", &CartAction::Add).await.unwrap_err();
    assert!(matches!(err, SyncError::Status { status: 403, .. }));
}

#[tokio::test]
async fn non_json_body_is_a_decode_error() {
    let transport = RecordingTransport::replying(200, "<html>oops</html>");
    let sync = ServerCartSync::new(&transport, "t");
    let err = sync.apply("7", &CartAction::Add).await.unwrap_err();
    assert_eq!(err.error_code(), "E_DECODE");
}

#[tokio::test]
async fn transport_failure_propagates() {
    let transport = RecordingTransport::failing("connection refused");
    let sync = ServerCartSync::new(&transport, "t");
    let err = sync.apply("7", &CartAction::Add).await.unwrap_err();
    assert_eq!(err, SyncError::Transport("connection refused".into()));
}

#[tokio::test]
async fn each_call_sends_its_own_request() {
    let transport = RecordingTransport::replying(200, "{}");
    let sync = ServerCartSync::new(&transport, "t");
    sync.apply("7", &CartAction::Add).await.unwrap();
    sync.apply("7", &CartAction::Add).await.unwrap();
    assert_eq!(transport.sent.borrow().len(), 2);
}
