//! DOM wiring for `.update-cart` controls.
//!
//! SYSTEM CONTEXT
//! ==============
//! Product pages and the cart page render buttons like
//! `<button class="update-cart" data-product="42" data-action="add">`.
//! Each one gets a click listener that hands its attributes to the shared
//! [`BrowserCartUpdater`]. Clicks are independent: each spawns its own
//! future and nothing orders or cancels them.

#[cfg(test)]
#[path = "controls_test.rs"]
mod controls_test;

use std::rc::Rc;

use crate::BrowserCartUpdater;

#[cfg(feature = "hydrate")]
use cart::UpdateControl;
#[cfg(feature = "hydrate")]
use cart::updater::{ACTION_ATTRIBUTE, PRODUCT_ATTRIBUTE, UPDATE_CONTROL_CLASS};
#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, closure::Closure};

/// Bind controls now, or after `DOMContentLoaded` if the document is still
/// loading.
pub fn bind_when_ready(updater: Rc<BrowserCartUpdater>) {
    #[cfg(feature = "hydrate")]
    {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::warn!("cart: no document; cart controls not bound");
            return;
        };
        if document.ready_state() != "loading" {
            bind_update_controls(&updater);
            return;
        }

        let cb = Closure::once(move || {
            bind_update_controls(&updater);
        });
        if document
            .add_event_listener_with_callback("DOMContentLoaded", cb.as_ref().unchecked_ref())
            .is_ok()
        {
            cb.forget();
        } else {
            log::warn!("cart: could not wait for DOMContentLoaded; cart controls not bound");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = updater;
    }
}

/// Attach a click listener to every update control in the document.
///
/// Returns the number of controls bound. Controls missing the product or
/// action attribute are skipped.
pub fn bind_update_controls(updater: &Rc<BrowserCartUpdater>) -> usize {
    #[cfg(feature = "hydrate")]
    {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return 0;
        };
        let controls = document.get_elements_by_class_name(UPDATE_CONTROL_CLASS);
        let mut bound = 0_usize;
        for index in 0..controls.length() {
            let Some(element) = controls.item(index) else {
                continue;
            };
            let Some(control) = UpdateControl::from_attributes(
                element.get_attribute(PRODUCT_ATTRIBUTE),
                element.get_attribute(ACTION_ATTRIBUTE),
            ) else {
                log::warn!("cart: skipping .{UPDATE_CONTROL_CLASS} control without {PRODUCT_ATTRIBUTE}/{ACTION_ATTRIBUTE}");
                continue;
            };

            let updater = Rc::clone(updater);
            let cb = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
                let updater = Rc::clone(&updater);
                let control = control.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    updater.handle_control(&control).await;
                });
            });
            if element
                .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
                .is_ok()
            {
                cb.forget();
                bound += 1;
            }
        }
        log::debug!("cart: bound {bound} update control(s)");
        bound
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = updater;
        0
    }
}
