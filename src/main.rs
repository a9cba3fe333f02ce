//! VisionNest Frontend Entry Point

mod models;
mod context;
mod store;
mod session_store;
mod dialog;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    console_logger::init(console_logger::parse_level(option_env!("VISION_NEST_LOG")));
    mount_to_body(App);
}
