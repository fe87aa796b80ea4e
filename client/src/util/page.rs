//! Page reload and visitor notices via `window`.

use cart::PageEffects;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserPage;

impl PageEffects for BrowserPage {
    fn reload(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.location().reload() {
                    log::warn!("cart: page reload failed: {e:?}");
                }
            }
        }
    }

    fn notify(&self, message: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(message);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = message;
        }
    }
}
