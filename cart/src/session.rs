//! Session context supplied by the host page.
//!
//! The storefront template injects a `user` string (`"AnonymousUser"` for
//! guests) and a `csrftoken` string into page scope. They are read once and
//! handed to the updater here instead of being looked up on every click.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

/// Marker the template renders for visitors who are not logged in.
pub const ANONYMOUS_USER: &str = "AnonymousUser";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub is_authenticated: bool,
    pub csrf_token: String,
}

impl SessionContext {
    pub fn anonymous(csrf_token: impl Into<String>) -> Self {
        Self { is_authenticated: false, csrf_token: csrf_token.into() }
    }

    pub fn authenticated(csrf_token: impl Into<String>) -> Self {
        Self { is_authenticated: true, csrf_token: csrf_token.into() }
    }

    /// Build from the raw page values. Only the exact `AnonymousUser` marker
    /// or a missing `user` global counts as anonymous, so an empty username
    /// is treated as signed in. A missing token becomes an empty string.
    #[must_use]
    pub fn from_page_globals(user: Option<&str>, csrf_token: Option<&str>) -> Self {
        let is_authenticated = user.is_some_and(|u| u != ANONYMOUS_USER);
        Self { is_authenticated, csrf_token: csrf_token.unwrap_or_default().to_owned() }
    }
}
