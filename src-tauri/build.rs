//! Build script for the Website Capture Tauri app.
//!
//! Only the Tauri step is needed: it generates the context consumed by
//! `tauri::generate_context!()` and validates `tauri.conf.json`.

fn main() {
    tauri_build::build();
}
