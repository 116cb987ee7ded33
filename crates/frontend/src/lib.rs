pub mod app;
pub mod domain;
pub mod layout;
pub mod routes;
pub mod shared;

use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen]
pub fn hydrate() {
    // Logger first so a rejected config override is reported
    _ = console_log::init_with_level(log::Level::Trace);
    console_error_panic_hook::set_once();
    let config = shared::config::current();
    log::set_max_level(config.logging.level_filter());
    log::info!("starting, API at {}", shared::api_utils::api_base());

    leptos::mount::mount_to_body(app::App);
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}
