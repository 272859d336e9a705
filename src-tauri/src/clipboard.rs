//! Clipboard-write command — places a captured image on the system clipboard.

use crate::payload::{self, PayloadError};
use arboard::{Clipboard, ImageData};
use std::borrow::Cow;
use std::sync::Mutex;

/// Something that can hold an RGBA image for other applications to paste.
pub trait ImageClipboard: Send + Sync {
    fn write_rgba(&self, width: u32, height: u32, rgba: Vec<u8>) -> Result<(), ClipboardError>;
}

/// System clipboard via `arboard`.
///
/// On X11/Wayland the copied image is only served while a `Clipboard` is
/// alive, so one handle is kept for the life of the app. It is opened on the
/// first write: some Linux sessions have no clipboard at startup, and the app
/// should still launch there.
pub struct ArboardClipboard {
    handle: Mutex<Option<Clipboard>>,
}

impl ArboardClipboard {
    pub fn new() -> Self {
        Self {
            handle: Mutex::new(None),
        }
    }

    /// Whether the system clipboard has been opened yet.
    pub fn is_open(&self) -> bool {
        self.handle.lock().map(|h| h.is_some()).unwrap_or(false)
    }
}

impl Default for ArboardClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageClipboard for ArboardClipboard {
    fn write_rgba(&self, width: u32, height: u32, rgba: Vec<u8>) -> Result<(), ClipboardError> {
        check_dimensions(width, height, rgba.len())?;

        let mut handle = self
            .handle
            .lock()
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        if handle.is_none() {
            let opened =
                Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            log::info!("[CLIPBOARD] Opened system clipboard");
            *handle = Some(opened);
        }
        let clipboard = handle
            .as_mut()
            .ok_or_else(|| ClipboardError::Unavailable("clipboard not opened".to_string()))?;

        let result = clipboard
            .set_image(ImageData {
                width: width as usize,
                height: height as usize,
                bytes: Cow::Owned(rgba),
            })
            .map_err(|e| ClipboardError::Write(e.to_string()));

        // A failed write may mean the display connection went away; reopen
        // on the next attempt.
        if result.is_err() {
            *handle = None;
        }
        result
    }
}

/// Decode an image payload (data URL or bare base64) and copy it.
///
/// Blocking — image decoding and some clipboard backends take a while.
pub fn copy_image(clipboard: &dyn ImageClipboard, image: &str) -> Result<(), ClipboardError> {
    let start = std::time::Instant::now();

    let result = payload::decode_data_url(image)
        .and_then(|bytes| payload::decode_rgba(&bytes))
        .map_err(ClipboardError::Payload)
        .and_then(|rgba| {
            let (width, height) = rgba.dimensions();
            clipboard.write_rgba(width, height, rgba.into_raw())?;
            Ok((width, height))
        });

    match result {
        Ok((width, height)) => {
            log::info!(
                "[CLIPBOARD] Copied {}x{} image in {}ms",
                width,
                height,
                start.elapsed().as_millis()
            );
            Ok(())
        }
        Err(e) => {
            log::error!("[CLIPBOARD] {}", e);
            Err(e)
        }
    }
}

fn check_dimensions(width: u32, height: u32, len: usize) -> Result<(), ClipboardError> {
    let expected = width as usize * height as usize * 4;
    if width == 0 || height == 0 || len != expected {
        return Err(ClipboardError::SizeMismatch {
            width,
            height,
            len,
        });
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("Failed to copy image to clipboard: clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to copy image to clipboard: {0}")]
    Payload(#[from] PayloadError),

    #[error("Failed to copy image to clipboard: {0}")]
    Write(String),

    #[error(
        "Failed to copy image to clipboard: {len} bytes is not a {width}x{height} RGBA image"
    )]
    SizeMismatch { width: u32, height: u32, len: usize },
}
