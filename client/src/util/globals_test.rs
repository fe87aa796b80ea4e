#![cfg(not(feature = "hydrate"))]

use super::*;

#[test]
fn globals_are_absent_outside_browser() {
    assert_eq!(read_string_global(USER_GLOBAL), None);
    assert_eq!(read_string_global(CSRF_TOKEN_GLOBAL), None);
}

#[test]
fn session_defaults_to_anonymous() {
    let session = read_session();
    assert!(!session.is_authenticated);
    assert!(session.csrf_token.is_empty());
}
