use super::*;

#[test]
fn join_url_handles_leading_slash() {
    assert_eq!(join_url("http://shop.test", "/update_item/"), "http://shop.test/update_item/");
    assert_eq!(join_url("http://shop.test", "update_item/"), "http://shop.test/update_item/");
}

#[test]
fn base_url_trailing_slash_is_trimmed() {
    let transport = ReqwestTransport::new("http://shop.test/", None).unwrap();
    assert_eq!(transport.url("/update_item/"), "http://shop.test/update_item/");
}

#[test]
fn cookie_header_includes_session_when_present() {
    assert_eq!(cookie_header("tok", None), "csrftoken=tok");
    assert_eq!(cookie_header("tok", Some("abc")), "csrftoken=tok; sessionid=abc");
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let transport = ReqwestTransport::new("http://127.0.0.1:9", Some("abc".into())).unwrap();
    let err = transport.post_json("/update_item/", "tok", "{}".into()).await.unwrap_err();
    assert!(matches!(err, SyncError::Transport(_)));
}
