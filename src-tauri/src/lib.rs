//! Website Capture — Tauri application entry point.
//!
//! This is the app shell that wires together:
//! - Website capture through a headless browser (capture/)
//! - Clipboard writes (clipboard.rs)
//! - The capture window's view state (view/)
//! - Tauri command handlers for frontend communication (commands.rs)

pub mod capture;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod payload;
pub mod view;

use capture::ChromeCapturer;
use clipboard::ArboardClipboard;
use config::AppConfig;
use std::sync::Arc;
use view::ViewController;

/// Entry point — called by Tauri runtime.
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::init();

    let config = AppConfig::load();
    let controller = ViewController::new(
        Arc::new(ChromeCapturer::new(config)),
        Arc::new(ArboardClipboard::new()),
    );

    tauri::Builder::default()
        .manage(controller)
        .invoke_handler(tauri::generate_handler![
            commands::take_screenshot,
            commands::copy_image,
            commands::submit_url,
            commands::copy_screenshot,
            commands::get_view,
            commands::reset_view,
        ])
        .setup(|_app| {
            log::info!("Website Capture ready");
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("Error running Website Capture");
}
