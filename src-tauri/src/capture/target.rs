//! URL normalization — pure, no I/O.

use super::CaptureError;
use regex::Regex;
use std::sync::LazyLock;

static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-zA-Z][a-zA-Z0-9+.\-]*):").unwrap());

const ALLOWED_SCHEMES: &[&str] = &["http", "https", "file"];

/// Trim the user's input and make it navigable.
///
/// Bare hosts (`example.com/path`) get `https://`. Schemes other than
/// http, https and file are rejected so the browser never runs
/// `javascript:` or `chrome:` URLs on our behalf.
pub fn normalize_url(input: &str) -> Result<String, CaptureError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CaptureError::EmptyUrl);
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(CaptureError::InvalidUrl(trimmed.to_string()));
    }

    // `localhost:3000` parses as scheme "localhost" — only treat the prefix
    // as a scheme when it is followed by `//` or is a known one.
    match SCHEME.captures(trimmed) {
        Some(caps) if trimmed[caps[0].len()..].starts_with("//") || is_known(&caps[1]) => {
            let scheme = caps[1].to_ascii_lowercase();
            if !ALLOWED_SCHEMES.contains(&scheme.as_str()) {
                return Err(CaptureError::InvalidUrl(trimmed.to_string()));
            }
            // "https:" or "https://" with nothing after it
            let rest = &trimmed[caps[0].len()..];
            if rest.strip_prefix("//").unwrap_or(rest).is_empty() {
                return Err(CaptureError::InvalidUrl(trimmed.to_string()));
            }
            Ok(trimmed.to_string())
        }
        _ => Ok(format!("https://{}", trimmed)),
    }
}

fn is_known(scheme: &str) -> bool {
    matches!(
        scheme.to_ascii_lowercase().as_str(),
        "javascript" | "data" | "about" | "chrome" | "mailto" | "file" | "http" | "https"
    )
}
