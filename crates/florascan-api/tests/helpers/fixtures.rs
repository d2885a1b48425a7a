//! Test fixtures: decodable image blobs and disguised non-images.

#![allow(dead_code)]

use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

/// A small valid PNG. `seed` varies the pixel data so different seeds hash
/// to different content.
pub fn create_test_png(seed: u8) -> Vec<u8> {
    let img = RgbImage::from_pixel(8, 8, Rgb([seed, 139, 34]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).expect("encode png");
    buf.into_inner()
}

/// A small valid JPEG.
pub fn create_test_jpeg(seed: u8) -> Vec<u8> {
    let img = RgbImage::from_pixel(8, 8, Rgb([seed, 80, 120]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Jpeg).expect("encode jpeg");
    buf.into_inner()
}

/// ELF header bytes: a binary renamed to an image extension.
pub fn create_disguised_executable() -> Vec<u8> {
    let mut data = vec![0x7F, b'E', b'L', b'F', 0x02, 0x01, 0x01, 0x00];
    data.extend_from_slice(&[0u8; 56]);
    data
}
