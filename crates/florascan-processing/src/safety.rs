//! Post-save image safety check
//!
//! The extension check is cheap early rejection only; a `.jpg` can hide any
//! payload. This module sniffs the real format from file content and then
//! performs a full structural decode. A file that is not one of the four
//! permitted image formats, or that fails to decode, is unsafe and must be
//! deleted by the caller.
//!
//! Decoding is CPU-bound; callers run this under `tokio::task::spawn_blocking`.

use image::{ImageFormat, ImageReader};
use std::io::Cursor;

#[derive(Debug, thiserror::Error)]
pub enum SafetyError {
    #[error("Could not determine image format from content")]
    UnknownFormat,

    #[error("Content type {0} is not an allowed image format")]
    UnsupportedFormat(String),

    #[error("Image failed to decode: {0}")]
    DecodeFailed(String),
}

/// Result of a successful safety check.
#[derive(Debug, Clone)]
pub struct SniffedImage {
    /// Trusted MIME type derived from content, not extension.
    pub mime_type: &'static str,
    pub width: u32,
    pub height: u32,
}

fn mime_for_format(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::Png => Some("image/png"),
        ImageFormat::Gif => Some("image/gif"),
        ImageFormat::WebP => Some("image/webp"),
        _ => None,
    }
}

/// Sniff the true format of `data` and verify it decodes structurally.
pub fn verify_image(data: &[u8]) -> Result<SniffedImage, SafetyError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| SafetyError::DecodeFailed(e.to_string()))?;

    let format = reader.format().ok_or(SafetyError::UnknownFormat)?;
    let mime_type = mime_for_format(format)
        .ok_or_else(|| SafetyError::UnsupportedFormat(format!("{:?}", format)))?;

    let decoded = reader
        .decode()
        .map_err(|e| SafetyError::DecodeFailed(e.to_string()))?;

    tracing::debug!(
        mime_type,
        width = decoded.width(),
        height = decoded.height(),
        "Image passed safety check"
    );

    Ok(SniffedImage {
        mime_type,
        width: decoded.width(),
        height: decoded.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn create_test_image(format: ImageFormat) -> Vec<u8> {
        let img = RgbaImage::from_pixel(4, 4, Rgba([0, 128, 0, 255]));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), format).unwrap();
        buffer
    }

    #[test]
    fn valid_png_passes() {
        let data = create_test_image(ImageFormat::Png);
        let sniffed = verify_image(&data).unwrap();
        assert_eq!(sniffed.mime_type, "image/png");
        assert_eq!((sniffed.width, sniffed.height), (4, 4));
    }

    #[test]
    fn valid_jpeg_passes() {
        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([0, 128, 0]));
        let mut data = Vec::new();
        img.write_to(&mut Cursor::new(&mut data), ImageFormat::Jpeg)
            .unwrap();
        let sniffed = verify_image(&data).unwrap();
        assert_eq!(sniffed.mime_type, "image/jpeg");
    }

    #[test]
    fn disguised_executable_fails() {
        // An ELF header renamed to .jpg: format sniffing must reject it.
        let data = b"\x7fELF\x02\x01\x01\x00not-an-image".to_vec();
        assert!(matches!(
            verify_image(&data),
            Err(SafetyError::UnknownFormat)
        ));
    }

    #[test]
    fn html_payload_fails() {
        let data = b"<html><script>alert(1)</script></html>".to_vec();
        assert!(verify_image(&data).is_err());
    }

    #[test]
    fn corrupt_png_fails_decode() {
        let mut data = create_test_image(ImageFormat::Png);
        // Keep the signature intact but destroy the chunk data.
        let len = data.len();
        for byte in data[16..len].iter_mut() {
            *byte = 0xAA;
        }
        assert!(matches!(
            verify_image(&data),
            Err(SafetyError::DecodeFailed(_))
        ));
    }
}
