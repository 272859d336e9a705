//! Website capture domain — public API.
//!
//! This module owns the "take a screenshot of this URL" command.
//! External code should only use the items exported here.

mod browser;
mod target;

pub use browser::ChromeCapturer;
pub use target::normalize_url;

use crate::payload;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Renders a page and returns it as PNG bytes.
///
/// Implementations block; callers run them on the blocking pool.
pub trait PageCapturer: Send + Sync {
    fn capture_png(&self, url: &str) -> Result<Vec<u8>, CaptureError>;
}

/// Wire shape of the capture command, as consumed by the front-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenshotResult {
    pub success: bool,
    pub message: Option<String>,
    /// `data:image/png;base64,...` on success.
    pub image_data: Option<String>,
}

impl ScreenshotResult {
    pub fn captured(png: &[u8]) -> Self {
        Self {
            success: true,
            message: Some("Screenshot taken successfully".to_string()),
            image_data: Some(payload::encode_data_url(png)),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            image_data: None,
        }
    }
}

/// Capture `url` and package the outcome for the front-end.
///
/// Never fails: every error becomes a `success: false` result.
pub async fn take_screenshot(capturer: Arc<dyn PageCapturer>, url: &str) -> ScreenshotResult {
    let url = match normalize_url(url) {
        Ok(url) => url,
        Err(e) => {
            log::warn!("[CAPTURE] Rejected URL {:?}: {}", url, e);
            return ScreenshotResult::failed(e.to_string());
        }
    };

    log::info!("[CAPTURE] Taking screenshot of {}", url);
    let start = std::time::Instant::now();

    let target = url.clone();
    let outcome = tokio::task::spawn_blocking(move || capturer.capture_png(&target))
        .await
        .map_err(|e| CaptureError::Task(e.to_string()))
        .and_then(|r| r);

    match outcome {
        Ok(png) => {
            log::info!(
                "[CAPTURE] Captured {} in {}ms — {} bytes",
                url,
                start.elapsed().as_millis(),
                png.len()
            );
            ScreenshotResult::captured(&png)
        }
        Err(e) => {
            log::error!("[CAPTURE] {}", e);
            ScreenshotResult::failed(e.to_string())
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Please enter a valid URL")]
    EmptyUrl,

    #[error("Unsupported URL: {0}")]
    InvalidUrl(String),

    #[error("Error launching browser: {0}")]
    Launch(String),

    #[error("Error creating new tab: {0}")]
    NewTab(String),

    #[error("Error navigating to URL: {0}")]
    Navigate(String),

    #[error("Error waiting for navigation: {0}")]
    WaitNavigation(String),

    #[error("Error capturing screenshot: {0}")]
    Screenshot(String),

    #[error("Capture task failed: {0}")]
    Task(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recording {
        seen: Mutex<Vec<String>>,
        reply: fn() -> Result<Vec<u8>, CaptureError>,
    }

    impl PageCapturer for Recording {
        fn capture_png(&self, url: &str) -> Result<Vec<u8>, CaptureError> {
            self.seen.lock().unwrap().push(url.to_string());
            (self.reply)()
        }
    }

    fn recording(reply: fn() -> Result<Vec<u8>, CaptureError>) -> Arc<Recording> {
        Arc::new(Recording {
            seen: Mutex::new(Vec::new()),
            reply,
        })
    }

    #[tokio::test]
    async fn success_carries_data_url() {
        let capturer = recording(|| Ok(vec![1, 2, 3]));
        let result = take_screenshot(capturer.clone(), "example.com").await;
        assert!(result.success);
        assert_eq!(result.image_data.as_deref(), Some("data:image/png;base64,AQID"));
        assert_eq!(*capturer.seen.lock().unwrap(), vec!["https://example.com"]);
    }

    #[tokio::test]
    async fn failure_carries_message_and_no_image() {
        let capturer = recording(|| Err(CaptureError::Navigate("net::ERR_NAME_NOT_RESOLVED".into())));
        let result = take_screenshot(capturer, "https://nope.invalid").await;
        assert!(!result.success);
        assert!(result.image_data.is_none());
        assert_eq!(
            result.message.as_deref(),
            Some("Error navigating to URL: net::ERR_NAME_NOT_RESOLVED")
        );
    }

    #[tokio::test]
    async fn rejected_url_never_reaches_capturer() {
        let capturer = recording(|| Ok(vec![0]));
        let result = take_screenshot(capturer.clone(), "   ").await;
        assert!(!result.success);
        assert!(capturer.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn result_serializes_with_snake_case_fields() {
        let json = serde_json::to_value(ScreenshotResult::failed("boom")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "boom");
        assert!(json["image_data"].is_null());
    }
}
