//! Document-level click listening for outside-click dismissal.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ClickSurface` is the only place the menu touches the global document.
//! The browser implementation registers a capturing `click` listener; tests
//! supply an in-memory surface they can dispatch into.

use std::rc::Rc;

/// Handler invoked with the target of each document-level click.
pub type ClickHandler<T> = Rc<dyn Fn(&T)>;

/// A global event source that can host one or more click listeners.
pub trait ClickSurface: 'static {
    /// What a click reports as its target.
    type Target: ?Sized + 'static;
    /// Handle proving a listener is installed; consumed on removal.
    type Registration: 'static;

    fn listen(&self, handler: ClickHandler<Self::Target>) -> Self::Registration;

    fn unlisten(&self, registration: Self::Registration);
}

#[cfg(feature = "hydrate")]
pub use browser::{BrowserClickRegistration, BrowserDocument};

#[cfg(feature = "hydrate")]
mod browser {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    use super::{ClickHandler, ClickSurface};

    /// The page's `document`, listened to in the capture phase.
    #[derive(Clone, Debug)]
    pub struct BrowserDocument {
        document: web_sys::Document,
    }

    impl BrowserDocument {
        pub fn new(document: web_sys::Document) -> Self {
            Self { document }
        }

        /// The current window's document, if running in a browser.
        pub fn current() -> Option<Self> {
            web_sys::window().and_then(|w| w.document()).map(Self::new)
        }
    }

    /// Owns the JS closure so it stays alive while registered.
    pub struct BrowserClickRegistration {
        closure: Closure<dyn FnMut(web_sys::Event)>,
    }

    impl ClickSurface for BrowserDocument {
        type Target = web_sys::EventTarget;
        type Registration = BrowserClickRegistration;

        fn listen(&self, handler: ClickHandler<web_sys::EventTarget>) -> BrowserClickRegistration {
            let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
                if let Some(target) = ev.target() {
                    handler(&target);
                }
            });
            if let Err(err) = self.document.add_event_listener_with_callback_and_bool(
                "click",
                closure.as_ref().unchecked_ref(),
                true,
            ) {
                log::warn!("failed to attach outside-click listener: {err:?}");
            }
            BrowserClickRegistration { closure }
        }

        fn unlisten(&self, registration: BrowserClickRegistration) {
            if let Err(err) = self.document.remove_event_listener_with_callback_and_bool(
                "click",
                registration.closure.as_ref().unchecked_ref(),
                true,
            ) {
                log::warn!("failed to detach outside-click listener: {err:?}");
            }
        }
    }
}
