//! Runtime configuration — loaded once at startup.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the working directory. Anything missing or malformed falls back to
//! the default and logs a warning; configuration never aborts startup.

use std::path::PathBuf;
use std::time::Duration;

pub const ENV_CHROME_PATH: &str = "WEBSITE_CAPTURE_CHROME_PATH";
pub const ENV_VIEWPORT: &str = "WEBSITE_CAPTURE_VIEWPORT";
pub const ENV_SANDBOX: &str = "WEBSITE_CAPTURE_SANDBOX";
pub const ENV_IDLE_TIMEOUT: &str = "WEBSITE_CAPTURE_IDLE_TIMEOUT_SECS";

const DEFAULT_VIEWPORT: (u32, u32) = (1280, 800);
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 30;

/// Browser executables looked up on `PATH` when no explicit path is configured.
const BROWSER_CANDIDATES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
    "microsoft-edge",
    "chrome",
];

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Browser executable. `None` lets headless_chrome run its own detection.
    pub chrome_path: Option<PathBuf>,
    pub viewport: (u32, u32),
    pub sandbox: bool,
    pub idle_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            viewport: DEFAULT_VIEWPORT,
            sandbox: true,
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Load `.env` (if present) and read configuration from the environment.
    pub fn load() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            log::info!("[CONFIG] Loaded environment from {}", path.display());
        }
        let config = Self::from_lookup(|key| std::env::var(key).ok());
        log::info!(
            "[CONFIG] viewport={}x{} sandbox={} browser={}",
            config.viewport.0,
            config.viewport.1,
            config.sandbox,
            config
                .chrome_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "auto".to_string())
        );
        config
    }

    /// Build a config from an arbitrary key lookup. Used by `load()` and tests.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let chrome_path = lookup(ENV_CHROME_PATH)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(detect_browser);

        let viewport = match lookup(ENV_VIEWPORT) {
            Some(raw) => parse_viewport(&raw).unwrap_or_else(|| {
                log::warn!("[CONFIG] Ignoring invalid {}={:?}", ENV_VIEWPORT, raw);
                defaults.viewport
            }),
            None => defaults.viewport,
        };

        let sandbox = read_bool(&lookup, ENV_SANDBOX, defaults.sandbox);

        let idle_timeout = match lookup(ENV_IDLE_TIMEOUT) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    log::warn!("[CONFIG] Ignoring invalid {}={:?}", ENV_IDLE_TIMEOUT, raw);
                    defaults.idle_timeout
                }
            },
            None => defaults.idle_timeout,
        };

        Self {
            chrome_path,
            viewport,
            sandbox,
            idle_timeout,
        }
    }
}

/// Parse `WIDTHxHEIGHT` (e.g. `1920x1080`). Zero dimensions are rejected.
pub fn parse_viewport(raw: &str) -> Option<(u32, u32)> {
    let (w, h) = raw.trim().split_once(['x', 'X'])?;
    let w: u32 = w.trim().parse().ok()?;
    let h: u32 = h.trim().parse().ok()?;
    (w > 0 && h > 0).then_some((w, h))
}

/// Parse common boolean spellings. Returns `None` for anything else.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn read_bool<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => parse_bool(&raw).unwrap_or_else(|| {
            log::warn!("[CONFIG] Ignoring invalid {}={:?}", key, raw);
            default
        }),
        None => default,
    }
}

fn detect_browser() -> Option<PathBuf> {
    BROWSER_CANDIDATES
        .iter()
        .find_map(|name| which::which(name).ok())
}

/// Default directory for saved screenshots: Pictures, then home, then cwd.
pub fn default_output_dir() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
