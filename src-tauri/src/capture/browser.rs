//! Page capture using the `headless_chrome` crate.
//!
//! This is the infrastructure layer — it launches a real browser.
//! Everything above it talks to the `PageCapturer` trait instead.

use super::{CaptureError, PageCapturer};
use crate::config::AppConfig;
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::{Browser, LaunchOptions, LaunchOptionsBuilder};

const PNG_QUALITY: u32 = 90;

/// Launches a fresh headless browser per capture.
///
/// A browser per request keeps a crashed or wedged page from poisoning the
/// next capture; launch cost is small next to page load time.
pub struct ChromeCapturer {
    config: AppConfig,
}

impl ChromeCapturer {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    fn launch_options(&self) -> Result<LaunchOptions<'static>, CaptureError> {
        LaunchOptionsBuilder::default()
            .headless(true)
            .sandbox(self.config.sandbox)
            .window_size(Some(self.config.viewport))
            .path(self.config.chrome_path.clone())
            .idle_browser_timeout(self.config.idle_timeout)
            .build()
            .map_err(|e| CaptureError::Launch(e.to_string()))
    }
}

impl PageCapturer for ChromeCapturer {
    fn capture_png(&self, url: &str) -> Result<Vec<u8>, CaptureError> {
        let start = std::time::Instant::now();

        let browser = Browser::new(self.launch_options()?)
            .map_err(|e| CaptureError::Launch(format!("{:#}", e)))?;
        let launch_ms = start.elapsed().as_millis();

        let tab = browser
            .new_tab()
            .map_err(|e| CaptureError::NewTab(format!("{:#}", e)))?;

        tab.navigate_to(url)
            .map_err(|e| CaptureError::Navigate(format!("{:#}", e)))?;
        tab.wait_until_navigated()
            .map_err(|e| CaptureError::WaitNavigation(format!("{:#}", e)))?;
        let load_ms = start.elapsed().as_millis() - launch_ms;

        let png = tab
            .capture_screenshot(
                CaptureScreenshotFormatOption::Png,
                Some(PNG_QUALITY),
                None,
                false,
            )
            .map_err(|e| CaptureError::Screenshot(format!("{:#}", e)))?;

        log::info!(
            "[CAPTURE] launch={}ms load={}ms total={}ms",
            launch_ms,
            load_ms,
            start.elapsed().as_millis()
        );

        Ok(png)
    }
}
