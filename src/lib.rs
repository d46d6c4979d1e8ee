//! ONG ADJAHI - Health Platform Admin
//!
//! Staff front-end for the ONG ADJAHI community health platform (Grand-Bassam
//! and Bonoua): patient records and prenatal follow-up, built with Leptos and
//! WebAssembly on top of the platform's REST API.

#![recursion_limit = "4096"]

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
