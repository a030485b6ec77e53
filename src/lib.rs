//! # savora-client
//!
//! Leptos + WASM frontend for the Savora store platform. Serves two roles —
//! store owners and customers — behind role-gated client-side routing.
//!
//! This crate contains pages, components, application state, the REST auth
//! client, and the localStorage-backed session store. The route gate
//! (`ProtectedRoute`/`PublicRoute`) consults the shared [`state::auth`]
//! context to admit or redirect every navigation.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell in the browser.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
