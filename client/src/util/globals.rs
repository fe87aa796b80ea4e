//! Session values injected into page scope by the storefront template.
//!
//! The template sets `var user = '{{ request.user }}'` and a `csrftoken`
//! global before loading the cart script. They are read once at start-up
//! and turned into a [`SessionContext`].

#[cfg(test)]
#[path = "globals_test.rs"]
mod globals_test;

use cart::SessionContext;

/// Page global naming the current user.
pub const USER_GLOBAL: &str = "user";
/// Page global holding the CSRF token.
pub const CSRF_TOKEN_GLOBAL: &str = "csrftoken";

/// Read a string-valued global from `window`.
pub fn read_string_global(name: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let window = web_sys::window()?;
        js_sys::Reflect::get(&window, &wasm_bindgen::JsValue::from_str(name))
            .ok()
            .and_then(|value| value.as_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = name;
        None
    }
}

/// Session context from the page globals. Outside the browser this is
/// always an anonymous session with an empty token.
pub fn read_session() -> SessionContext {
    let user = read_string_global(USER_GLOBAL);
    let csrf_token = read_string_global(CSRF_TOKEN_GLOBAL);
    #[cfg(feature = "hydrate")]
    {
        if csrf_token.is_none() {
            log::warn!("cart: page did not define `{CSRF_TOKEN_GLOBAL}`; server updates will be rejected");
        }
    }
    SessionContext::from_page_globals(user.as_deref(), csrf_token.as_deref())
}
