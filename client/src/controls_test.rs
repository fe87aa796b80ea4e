#![cfg(not(feature = "hydrate"))]

use super::*;

#[test]
fn nothing_binds_outside_browser() {
    let updater = Rc::new(crate::browser_updater());
    assert_eq!(bind_update_controls(&updater), 0);
    bind_when_ready(updater);
}

#[test]
fn native_updater_is_anonymous() {
    let updater = crate::browser_updater();
    assert!(!updater.session().is_authenticated);
}
