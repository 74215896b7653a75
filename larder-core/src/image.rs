//! Inline image handling.
//!
//! Recipe images arrive as `data:image/<type>;base64,<payload>` strings. The
//! payload is decoded, size-checked and sniffed from its magic bytes; the
//! declared type in the URI is not trusted.

use std::io::Cursor;

use base64::Engine;
use image::{ImageFormat, ImageReader};

use crate::error::ImageError;

/// Allowed image formats for recipe images.
pub const ALLOWED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// Maximum decoded image size (10MB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// A decoded and validated image ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub data: Vec<u8>,
    /// Detected content type (e.g., "image/png").
    pub content_type: String,
}

/// Validate image data: check format is allowed and detect content type.
pub fn validate_image(data: &[u8]) -> Result<String, ImageError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ImageError::Unreadable(e.to_string()))?;

    let format = reader
        .format()
        .ok_or_else(|| ImageError::Unreadable("could not detect image format".to_string()))?;

    if !ALLOWED_FORMATS.contains(&format) {
        return Err(ImageError::UnsupportedFormat(format!("{:?}", format)));
    }

    Ok(format.to_mime_type().to_string())
}

/// Decode a base64 data URI into validated image bytes.
pub fn decode_data_uri(uri: &str) -> Result<DecodedImage, ImageError> {
    let rest = uri.trim().strip_prefix("data:image/").ok_or(ImageError::NotDataUri)?;
    let (_declared, payload) = rest.split_once(";base64,").ok_or(ImageError::NotDataUri)?;

    // base64 expands 3 bytes into 4 chars; reject before decoding
    let approx_size = payload.len() / 4 * 3;
    if approx_size > MAX_FILE_SIZE + 3 {
        return Err(ImageError::TooLarge {
            size: approx_size,
            max: MAX_FILE_SIZE,
        });
    }

    let data = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| ImageError::InvalidBase64(e.to_string()))?;

    if data.len() > MAX_FILE_SIZE {
        return Err(ImageError::TooLarge {
            size: data.len(),
            max: MAX_FILE_SIZE,
        });
    }

    let content_type = validate_image(&data)?;

    Ok(DecodedImage { data, content_type })
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG
    const PNG_1X1: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    #[test]
    fn test_decode_png_data_uri() {
        let uri = format!("data:image/png;base64,{}", PNG_1X1);
        let decoded = decode_data_uri(&uri).unwrap();
        assert_eq!(decoded.content_type, "image/png");
        assert!(decoded.data.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn test_declared_type_is_not_trusted() {
        let uri = format!("data:image/jpeg;base64,{}", PNG_1X1);
        let decoded = decode_data_uri(&uri).unwrap();
        assert_eq!(decoded.content_type, "image/png");
    }

    #[test]
    fn test_rejects_plain_base64() {
        assert_eq!(decode_data_uri(PNG_1X1), Err(ImageError::NotDataUri));
    }

    #[test]
    fn test_rejects_non_image_uri() {
        let uri = format!("data:text/plain;base64,{}", PNG_1X1);
        assert_eq!(decode_data_uri(&uri), Err(ImageError::NotDataUri));
    }

    #[test]
    fn test_rejects_bad_base64() {
        let err = decode_data_uri("data:image/png;base64,@@@not-base64@@@").unwrap_err();
        assert!(matches!(err, ImageError::InvalidBase64(_)));
    }

    #[test]
    fn test_rejects_non_image_bytes() {
        let payload = base64::engine::general_purpose::STANDARD.encode(b"just some text");
        let uri = format!("data:image/png;base64,{}", payload);
        assert!(decode_data_uri(&uri).is_err());
    }
}
