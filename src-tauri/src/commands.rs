//! Tauri command handlers for frontend communication.
//!
//! `take_screenshot` and `copy_image` are the raw capture and clipboard
//! commands. The view commands run the same operations through the
//! `ViewController` and push every state change as a `view-changed` event.

use crate::capture::{self, ScreenshotResult};
use crate::clipboard;
use crate::view::{ViewController, ViewSnapshot};
use tauri::{AppHandle, Emitter, State};

pub const VIEW_CHANGED_EVENT: &str = "view-changed";

/// Tauri command: capture a URL and return the wire result.
#[tauri::command]
pub async fn take_screenshot(
    controller: State<'_, ViewController>,
    url: String,
) -> Result<ScreenshotResult, String> {
    Ok(capture::take_screenshot(controller.capturer(), &url).await)
}

/// Tauri command: put an image payload (data URL or base64) on the clipboard.
#[tauri::command]
pub async fn copy_image(controller: State<'_, ViewController>, image: String) -> Result<(), String> {
    let clipboard = controller.clipboard();
    tokio::task::spawn_blocking(move || {
        clipboard::copy_image(clipboard.as_ref(), &image).map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| format!("Failed to copy image to clipboard: {}", e))?
}

/// Tauri command: the URL form was submitted.
#[tauri::command]
pub async fn submit_url(
    app: AppHandle,
    controller: State<'_, ViewController>,
    url: String,
) -> Result<ViewSnapshot, String> {
    controller
        .submit(&url, |snapshot| publish(&app, snapshot))
        .await
        .map_err(|e| e.to_string())
}

/// Tauri command: the copy button was pressed.
#[tauri::command]
pub async fn copy_screenshot(
    app: AppHandle,
    controller: State<'_, ViewController>,
) -> Result<ViewSnapshot, String> {
    controller
        .copy(|snapshot| publish(&app, snapshot))
        .await
        .map_err(|e| e.to_string())
}

/// Tauri command: current view, for the first render.
#[tauri::command]
pub fn get_view(controller: State<'_, ViewController>) -> Result<ViewSnapshot, String> {
    controller.snapshot().map_err(|e| e.to_string())
}

/// Tauri command: the front-end (re)loaded; start from an empty view.
#[tauri::command]
pub fn reset_view(controller: State<'_, ViewController>) -> Result<ViewSnapshot, String> {
    controller.reset().map_err(|e| e.to_string())
}

fn publish(app: &AppHandle, snapshot: &ViewSnapshot) {
    if let Err(e) = app.emit(VIEW_CHANGED_EVENT, snapshot) {
        log::warn!("[VIEW] Failed to emit {}: {}", VIEW_CHANGED_EVENT, e);
    }
}
