//! # client
//!
//! Leptos + WASM frontend for the merchant portal.
//!
//! This crate contains pages, components, the durable session and signup-flow
//! stores, REST helpers, and the identity-callback relay used by the Nafath
//! verification popup.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
