//! Tests for PNG encoding.
//!
//! Every encoded file is decoded again with the `image` crate, which checks
//! the chunk layout, CRCs and zlib stream in one go.

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use renderer::png::{encode, encode_rgb, encode_rgba, write_rgba, PngColor};
use test_utils::{checkerboard, gradient, uniform_disk, GRAY};

// ============================================================================
// Helper functions
// ============================================================================

fn decode_rgba(bytes: &[u8]) -> RgbaImage {
    image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .expect("decoder rejected our PNG")
        .to_rgba8()
}

// ============================================================================
// Encoding tests
// ============================================================================

#[test]
fn test_encode_starts_with_signature() {
    let bytes = encode_rgba(&RgbaImage::from_pixel(2, 2, GRAY)).unwrap();
    assert_eq!(&bytes[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    assert_eq!(&bytes[12..16], b"IHDR");
    assert_eq!(&bytes[bytes.len() - 8..bytes.len() - 4], b"IEND");
}

#[test]
fn test_rgba_decodes_to_same_pixels() {
    for image in [gradient(37, 23), checkerboard(64, 64, 5), uniform_disk(50, GRAY)] {
        let bytes = encode_rgba(&image).unwrap();
        assert_eq!(decode_rgba(&bytes), image);
    }
}

#[test]
fn test_rgb_decodes_to_same_pixels() {
    let image = RgbImage::from_fn(19, 7, |x, y| Rgb([(x * 13) as u8, (y * 31) as u8, 200]));
    let bytes = encode_rgb(&image).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert_eq!(decoded, image);
}

#[test]
fn test_transparency_survives() {
    let mut image = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]));
    image.put_pixel(1, 2, Rgba([10, 20, 30, 128]));
    let decoded = decode_rgba(&encode_rgba(&image).unwrap());
    assert_eq!(decoded.get_pixel(1, 2), &Rgba([10, 20, 30, 128]));
    assert_eq!(decoded.get_pixel(0, 0)[3], 0);
}

#[test]
fn test_smooth_content_compresses() {
    let image = gradient(256, 256);
    let bytes = encode_rgba(&image).unwrap();
    assert!(bytes.len() < 256 * 256 * 4 / 4, "gradient encoded to {} bytes", bytes.len());
}

// ============================================================================
// Error handling tests
// ============================================================================

#[test]
fn test_rejects_wrong_length() {
    assert!(encode(&[0u8; 10], 2, 2, PngColor::Rgba).is_err());
    assert!(encode(&[0u8; 12], 2, 2, PngColor::Rgb).is_ok());
}

#[test]
fn test_rejects_empty_image() {
    assert!(encode(&[], 0, 5, PngColor::Rgba).is_err());
}

#[test]
fn test_write_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.png");
    let image = gradient(16, 16);
    write_rgba(&path, &image).unwrap();
    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded, image);
}
