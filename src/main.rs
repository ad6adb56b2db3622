#[cfg(target_arch = "wasm32")]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::prelude::mount_to_body(kratos_selfservice_ui::app::App);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
