//! View controller — runs user actions against the capture and clipboard
//! commands and keeps the view state in step.
//!
//! The state lock is only taken for synchronous transitions, never across an
//! `.await`, so a slow capture cannot block `snapshot()` or a copy.

use super::state::{ViewSnapshot, ViewState};
use crate::capture::{self, PageCapturer};
use crate::clipboard::{self, ImageClipboard};
use std::sync::{Arc, Mutex, MutexGuard};

pub struct ViewController {
    state: Mutex<ViewState>,
    capturer: Arc<dyn PageCapturer>,
    clipboard: Arc<dyn ImageClipboard>,
}

impl ViewController {
    pub fn new(capturer: Arc<dyn PageCapturer>, clipboard: Arc<dyn ImageClipboard>) -> Self {
        Self {
            state: Mutex::new(ViewState::new()),
            capturer,
            clipboard,
        }
    }

    pub fn capturer(&self) -> Arc<dyn PageCapturer> {
        self.capturer.clone()
    }

    pub fn clipboard(&self) -> Arc<dyn ImageClipboard> {
        self.clipboard.clone()
    }

    pub fn snapshot(&self) -> Result<ViewSnapshot, ViewError> {
        Ok(self.lock()?.snapshot())
    }

    /// Drop everything the window showed. Called when the front-end loads,
    /// so a reload starts from an empty form.
    pub fn reset(&self) -> Result<ViewSnapshot, ViewError> {
        let mut state = self.lock()?;
        state.reset();
        Ok(state.snapshot())
    }

    /// Handle the URL form submission.
    ///
    /// `on_change` sees the intermediate "capturing" snapshot; the final one
    /// is both passed to `on_change` and returned.
    pub async fn submit<F>(&self, url: &str, on_change: F) -> Result<ViewSnapshot, ViewError>
    where
        F: Fn(&ViewSnapshot) + Send,
    {
        let (target, pending) = {
            let mut state = self.lock()?;
            if !state.is_capturing() {
                state.set_url(url);
            }
            (state.begin_capture(), state.snapshot())
        };
        on_change(&pending);

        let Some(ticket) = target else {
            log::debug!("[VIEW] Capture not started (blank URL or already running)");
            return Ok(pending);
        };

        let result = capture::take_screenshot(self.capturer.clone(), &ticket.payload).await;

        let done = {
            let mut state = self.lock()?;
            if !state.finish_capture(ticket.generation, result) {
                log::info!("[VIEW] Dropped capture of {} (view was reset)", ticket.payload);
            }
            state.snapshot()
        };
        on_change(&done);
        Ok(done)
    }

    /// Handle the copy button.
    pub async fn copy<F>(&self, on_change: F) -> Result<ViewSnapshot, ViewError>
    where
        F: Fn(&ViewSnapshot) + Send,
    {
        let (image, pending) = {
            let mut state = self.lock()?;
            (state.begin_copy(), state.snapshot())
        };
        on_change(&pending);

        let Some(ticket) = image else {
            log::debug!("[VIEW] Copy not started (no screenshot or already copying)");
            return Ok(pending);
        };

        let clipboard = self.clipboard.clone();
        let image = ticket.payload;
        let outcome = tokio::task::spawn_blocking(move || {
            clipboard::copy_image(clipboard.as_ref(), &image).map_err(|e| e.to_string())
        })
        .await
        .unwrap_or_else(|e| Err(format!("Failed to copy image to clipboard: {}", e)));

        let done = {
            let mut state = self.lock()?;
            if !state.finish_copy(ticket.generation, outcome) {
                log::info!("[VIEW] Dropped copy result (view was reset)");
            }
            state.snapshot()
        };
        on_change(&done);
        Ok(done)
    }

    fn lock(&self) -> Result<MutexGuard<'_, ViewState>, ViewError> {
        self.state
            .lock()
            .map_err(|e| ViewError::StateLock(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("View state unavailable: {0}")]
    StateLock(String),
}
