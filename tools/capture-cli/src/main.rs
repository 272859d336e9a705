//! Website capture from the command line.
//!
//! Uses the desktop app's browser pipeline and configuration.
//!
//! Usage:
//!   capture-cli <url>                     Save to the Pictures directory
//!   capture-cli <url> --out shot.png      Save to a specific file
//!   capture-cli <url> --copy              Also copy the image to the clipboard
//!
//! On Linux the clipboard is owned by the process; without a clipboard
//! manager running, `--copy` contents vanish when capture-cli exits.

use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use website_capture_lib::capture::{normalize_url, ChromeCapturer, PageCapturer};
use website_capture_lib::clipboard::{ArboardClipboard, ImageClipboard};
use website_capture_lib::config::{default_output_dir, AppConfig};
use website_capture_lib::payload;

#[derive(Debug, PartialEq)]
struct Args {
    url: String,
    out: Option<PathBuf>,
    copy: bool,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Usage:");
            eprintln!("  capture-cli <url> [--out <file.png>] [--copy]");
            std::process::exit(1);
        }
    };

    if let Err(message) = run(args) {
        eprintln!("{}", message);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), String> {
    let url = normalize_url(&args.url).map_err(|e| e.to_string())?;
    let capturer = ChromeCapturer::new(AppConfig::load());

    let start = Instant::now();
    let png = capturer.capture_png(&url).map_err(|e| e.to_string())?;
    log::info!("Captured {} in {}ms", url, start.elapsed().as_millis());

    let out = args.out.unwrap_or_else(default_output_path);
    std::fs::write(&out, &png).map_err(|e| format!("Failed to write {}: {}", out.display(), e))?;
    println!("{}", out.display());

    if args.copy {
        let rgba = payload::decode_rgba(&png).map_err(|e| e.to_string())?;
        let (width, height) = rgba.dimensions();
        ArboardClipboard::new()
            .write_rgba(width, height, rgba.into_raw())
            .map_err(|e| e.to_string())?;
        eprintln!("Copied {}x{} screenshot to clipboard.", width, height);
    }

    Ok(())
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut url = None;
    let mut out = None;
    let mut copy = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--copy" => copy = true,
            "--out" | "-o" => {
                let path = iter.next().ok_or("--out requires a file path")?;
                out = Some(PathBuf::from(path));
            }
            flag if flag.starts_with('-') => return Err(format!("Unknown option: {}", flag)),
            value => {
                if url.replace(value.to_string()).is_some() {
                    return Err("Only one URL may be given".to_string());
                }
            }
        }
    }

    Ok(Args {
        url: url.ok_or("Missing URL")?,
        out,
        copy,
    })
}

fn default_output_path() -> PathBuf {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    default_output_dir().join(format!("website-capture-{}.png", secs))
}
