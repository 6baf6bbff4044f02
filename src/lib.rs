pub mod components;
pub mod config;
pub mod filter;
pub mod loader;
pub mod state;
pub mod table;
pub mod types;

use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(start)]
pub fn start() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    leptos::mount::mount_to_body(components::app::App);
}
