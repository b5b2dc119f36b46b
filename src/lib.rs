//! # session-shell
//!
//! Leptos + WASM session shell: the persistent header with its dismissible
//! account menu, the login page, and the auth client they share.
//!
//! The auth client and the menu controller are framework-independent and
//! also run natively (see the `cli` crate and `tests/`).

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered `App`.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logger unavailable: {err}");
    }
    leptos::mount::hydrate_body(app::App);
}
