//! Image payload codec — functional core.
//!
//! The capture command hands the front-end a `data:` URL; the clipboard
//! wants raw RGBA pixels. This module converts between the two and has no
//! infrastructure dependencies.

use base64::{engine::general_purpose::STANDARD, Engine};
use image::RgbaImage;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Wrap PNG bytes in a `data:image/png;base64,` URL for an `<img src>`.
pub fn encode_data_url(png: &[u8]) -> String {
    format!("{}{}", PNG_DATA_URL_PREFIX, STANDARD.encode(png))
}

/// Decode a `data:<mime>;base64,<data>` URL, or bare base64, into bytes.
pub fn decode_data_url(payload: &str) -> Result<Vec<u8>, PayloadError> {
    let payload = payload.trim();
    if payload.is_empty() {
        return Err(PayloadError::Empty);
    }

    let encoded = match payload.strip_prefix("data:") {
        Some(rest) => {
            let (header, data) = rest.split_once(',').ok_or(PayloadError::MalformedDataUrl)?;
            if !header.ends_with(";base64") {
                return Err(PayloadError::NotBase64(header.to_string()));
            }
            data
        }
        None => payload,
    };

    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| PayloadError::Base64(e.to_string()))?;
    if bytes.is_empty() {
        return Err(PayloadError::Empty);
    }
    Ok(bytes)
}

/// Decode encoded image bytes (PNG, JPEG, ...) into RGBA pixels.
pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaImage, PayloadError> {
    let image =
        image::load_from_memory(bytes).map_err(|e| PayloadError::ImageDecode(e.to_string()))?;
    Ok(image.to_rgba8())
}

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("Image payload is empty")]
    Empty,

    #[error("Malformed data URL")]
    MalformedDataUrl,

    #[error("Data URL is not base64-encoded ({0})")]
    NotBase64(String),

    #[error("Invalid base64: {0}")]
    Base64(String),

    #[error("Image decoding failed: {0}")]
    ImageDecode(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgba};
    use std::io::Cursor;

    fn tiny_png() -> Vec<u8> {
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn data_url_has_png_prefix() {
        let url = encode_data_url(&[0x89, 0x50, 0x4E, 0x47]);
        assert_eq!(url, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn decodes_data_url_and_bare_base64() {
        let png = tiny_png();
        assert_eq!(decode_data_url(&encode_data_url(&png)).unwrap(), png);
        assert_eq!(decode_data_url(&STANDARD.encode(&png)).unwrap(), png);
    }

    #[test]
    fn accepts_other_image_mime_types() {
        assert_eq!(decode_data_url("data:image/jpeg;base64,AQID").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn rejects_malformed_payloads() {
        assert!(matches!(decode_data_url(""), Err(PayloadError::Empty)));
        assert!(matches!(decode_data_url("data:image/png"), Err(PayloadError::MalformedDataUrl)));
        assert!(matches!(
            decode_data_url("data:text/plain,hello"),
            Err(PayloadError::NotBase64(_))
        ));
        assert!(matches!(decode_data_url("not base64!"), Err(PayloadError::Base64(_))));
        assert!(matches!(decode_data_url("data:image/png;base64,"), Err(PayloadError::Empty)));
    }

    #[test]
    fn decodes_png_to_rgba_pixels() {
        let rgba = decode_rgba(&tiny_png()).unwrap();
        assert_eq!(rgba.dimensions(), (3, 2));
        assert_eq!(rgba.as_raw().len(), 3 * 2 * 4);
        assert_eq!(rgba.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn non_image_bytes_fail_to_decode() {
        assert!(matches!(decode_rgba(b"hello"), Err(PayloadError::ImageDecode(_))));
    }
}
