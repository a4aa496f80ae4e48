//! # client
//!
//! Leptos + WASM frontend for ExpenseFlow.
//!
//! This crate contains the root component with its route gate, pages,
//! layout components, reactive state wrappers and the browser transport. The
//! session model itself (store, gate decisions, navigation filtering) lives
//! in the `access` crate; everything here adapts it to signals and the DOM.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install browser logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
