//! View state — what the capture window shows.
//!
//! Pure data plus transitions. The controller owns the only instance and is
//! the only caller; nothing here does I/O.

use crate::capture::ScreenshotResult;
use serde::Serialize;

pub const EMPTY_URL_MESSAGE: &str = "Please enter a valid URL";
pub const CAPTURE_FAILED_MESSAGE: &str = "Failed to take screenshot";
pub const COPIED_NOTICE: &str = "Screenshot copied to clipboard!";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    url: String,
    /// `data:` URL of the last successful capture.
    screenshot: Option<String>,
    error: Option<String>,
    /// Transient confirmation, cleared by the next action.
    notice: Option<String>,
    capturing: bool,
    copying: bool,
    /// Bumped by `reset()`; results of actions started earlier are dropped.
    generation: u64,
}

/// A started capture or copy, tagged with the view generation it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub generation: u64,
    /// URL to capture, or image payload to copy.
    pub payload: String,
}

/// Serialized form sent to the front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub url: String,
    pub screenshot: Option<String>,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub capturing: bool,
    pub copying: bool,
    pub capture_enabled: bool,
    pub copy_enabled: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn screenshot(&self) -> Option<&str> {
        self.screenshot.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    pub fn is_copying(&self) -> bool {
        self.copying
    }

    /// Forget everything shown so far. Actions still in flight can no
    /// longer touch this view.
    pub fn reset(&mut self) {
        *self = Self {
            generation: self.generation + 1,
            ..Self::default()
        };
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    /// Start a capture of the current URL.
    ///
    /// Returns a ticket carrying the URL, or `None` when no request may be
    /// made: the URL is blank (an error is shown) or a capture is running.
    pub fn begin_capture(&mut self) -> Option<Ticket> {
        if self.capturing {
            return None;
        }
        if self.url.trim().is_empty() {
            self.error = Some(EMPTY_URL_MESSAGE.to_string());
            return None;
        }
        self.capturing = true;
        self.error = None;
        self.notice = None;
        Some(self.ticket(self.url.clone()))
    }

    /// Apply the capture command's result. Returns `false` (and changes
    /// nothing) when the ticket predates the last `reset()`.
    pub fn finish_capture(&mut self, generation: u64, result: ScreenshotResult) -> bool {
        if generation != self.generation {
            return false;
        }
        self.capturing = false;
        match result {
            ScreenshotResult {
                success: true,
                image_data: Some(image),
                ..
            } => {
                self.screenshot = Some(image);
                self.error = None;
            }
            ScreenshotResult { message, .. } => {
                self.screenshot = None;
                self.error = Some(
                    message
                        .filter(|m| !m.trim().is_empty())
                        .unwrap_or_else(|| CAPTURE_FAILED_MESSAGE.to_string()),
                );
            }
        }
        true
    }

    /// Start copying the current screenshot.
    ///
    /// Returns a ticket carrying the image payload, or `None` when there is
    /// nothing to copy or a copy is already running.
    pub fn begin_copy(&mut self) -> Option<Ticket> {
        if self.copying {
            return None;
        }
        let image = self.screenshot.clone()?;
        self.copying = true;
        self.error = None;
        self.notice = None;
        Some(self.ticket(image))
    }

    /// Apply the clipboard command's outcome. The screenshot is left as is.
    /// Stale tickets are ignored, as in `finish_capture`.
    pub fn finish_copy(&mut self, generation: u64, outcome: Result<(), String>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.copying = false;
        match outcome {
            Ok(()) => {
                self.notice = Some(COPIED_NOTICE.to_string());
            }
            Err(message) => {
                self.error = Some(message);
            }
        }
        true
    }

    fn ticket(&self, payload: String) -> Ticket {
        Ticket {
            generation: self.generation,
            payload,
        }
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            url: self.url.clone(),
            screenshot: self.screenshot.clone(),
            error: self.error.clone(),
            notice: self.notice.clone(),
            capturing: self.capturing,
            copying: self.copying,
            capture_enabled: !self.capturing,
            copy_enabled: self.screenshot.is_some() && !self.copying,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE: &str = "data:image/png;base64,AQID";

    fn with_screenshot() -> ViewState {
        let mut state = ViewState::new();
        state.set_url("https://example.com");
        let ticket = state.begin_capture().unwrap();
        state.finish_capture(ticket.generation, ScreenshotResult {
            success: true,
            message: None,
            image_data: Some(IMAGE.to_string()),
        });
        state
    }

    #[test]
    fn blank_url_is_rejected_with_message() {
        let mut state = ViewState::new();
        state.set_url("   ");
        assert_eq!(state.begin_capture(), None);
        assert!(!state.is_capturing());
        assert_eq!(state.error(), Some(EMPTY_URL_MESSAGE));
    }

    #[test]
    fn second_capture_is_refused_while_first_runs() {
        let mut state = ViewState::new();
        state.set_url("example.com");
        assert_eq!(state.begin_capture().unwrap().payload, "example.com");
        assert_eq!(state.begin_capture(), None);
        assert!(!state.snapshot().capture_enabled);
    }

    #[test]
    fn begin_capture_clears_previous_error() {
        let mut state = ViewState::new();
        state.begin_capture();
        assert!(state.error().is_some());
        state.set_url("example.com");
        state.begin_capture();
        assert_eq!(state.error(), None);
    }

    #[test]
    fn success_shows_image_and_clears_error() {
        let state = with_screenshot();
        assert_eq!(state.screenshot(), Some(IMAGE));
        assert_eq!(state.error(), None);
        assert!(!state.is_capturing());
    }

    #[test]
    fn failure_clears_image_and_shows_message() {
        let mut state = with_screenshot();
        let ticket = state.begin_capture().unwrap();
        state.finish_capture(ticket.generation, ScreenshotResult::failed("Error navigating to URL: timeout"));
        assert_eq!(state.screenshot(), None);
        assert_eq!(state.error(), Some("Error navigating to URL: timeout"));
    }

    #[test]
    fn failure_without_message_uses_fallback() {
        let mut state = ViewState::new();
        state.set_url("example.com");
        let ticket = state.begin_capture().unwrap();
        state.finish_capture(ticket.generation, ScreenshotResult {
            success: false,
            message: None,
            image_data: None,
        });
        assert_eq!(state.error(), Some(CAPTURE_FAILED_MESSAGE));
    }

    #[test]
    fn success_flag_without_image_counts_as_failure() {
        let mut state = ViewState::new();
        state.set_url("example.com");
        let ticket = state.begin_capture().unwrap();
        state.finish_capture(ticket.generation, ScreenshotResult {
            success: true,
            message: Some(String::new()),
            image_data: None,
        });
        assert_eq!(state.screenshot(), None);
        assert_eq!(state.error(), Some(CAPTURE_FAILED_MESSAGE));
    }

    #[test]
    fn copy_requires_a_screenshot() {
        let mut state = ViewState::new();
        assert_eq!(state.begin_copy(), None);
        assert!(!state.snapshot().copy_enabled);
    }

    #[test]
    fn copy_is_disabled_while_in_flight() {
        let mut state = with_screenshot();
        let ticket = state.begin_copy().unwrap();
        assert_eq!(ticket.payload, IMAGE);
        assert!(!state.snapshot().copy_enabled);
        assert_eq!(state.begin_copy(), None);

        state.finish_copy(ticket.generation, Ok(()));
        let snap = state.snapshot();
        assert!(snap.copy_enabled);
        assert_eq!(snap.notice.as_deref(), Some(COPIED_NOTICE));
    }

    #[test]
    fn copy_failure_keeps_image() {
        let mut state = with_screenshot();
        let ticket = state.begin_copy().unwrap();
        state.finish_copy(ticket.generation, Err("Failed to copy image to clipboard: no display".into()));
        assert_eq!(state.screenshot(), Some(IMAGE));
        assert_eq!(state.error(), Some("Failed to copy image to clipboard: no display"));
        assert!(!state.is_copying());
    }

    #[test]
    fn retried_copy_clears_previous_failure() {
        let mut state = with_screenshot();
        let ticket = state.begin_copy().unwrap();
        state.finish_copy(ticket.generation, Err("Failed to copy image to clipboard: busy".into()));

        let ticket = state.begin_copy().unwrap();
        assert_eq!(state.error(), None);
        state.finish_copy(ticket.generation, Ok(()));

        let snap = state.snapshot();
        assert_eq!(snap.error, None);
        assert_eq!(snap.notice.as_deref(), Some(COPIED_NOTICE));
    }

    #[test]
    fn results_from_before_reset_are_dropped() {
        let mut state = ViewState::new();
        state.set_url("https://old.example");
        let old = state.begin_capture().unwrap();

        state.reset();
        state.set_url("https://new.example");
        let new = state.begin_capture().unwrap();
        assert_ne!(old.generation, new.generation);

        assert!(!state.finish_capture(old.generation, ScreenshotResult::captured(&[1, 2, 3])));
        assert!(state.is_capturing());
        assert_eq!(state.screenshot(), None);
        assert!(!state.snapshot().capture_enabled);
        assert_eq!(state.begin_capture(), None);

        assert!(state.finish_capture(new.generation, ScreenshotResult::captured(&[4, 5, 6])));
        assert_eq!(state.screenshot(), Some("data:image/png;base64,BAUG"));
    }

    #[test]
    fn copy_from_before_reset_is_dropped() {
        let mut state = with_screenshot();
        let ticket = state.begin_copy().unwrap();
        state.reset();
        assert!(!state.finish_copy(ticket.generation, Err("late".into())));
        assert_eq!(state.error(), None);
        assert!(!state.is_copying());
    }

    #[test]
    fn snapshot_uses_camel_case() {
        let json = serde_json::to_value(with_screenshot().snapshot()).unwrap();
        assert_eq!(json["captureEnabled"], true);
        assert_eq!(json["copyEnabled"], true);
        assert_eq!(json["screenshot"], IMAGE);
    }
}
