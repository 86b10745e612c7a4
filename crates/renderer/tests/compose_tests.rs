//! Tests for cropping, rotation, overlay, resizing and flattening.

use gore_common::{Color, InterpolationMethod};
use image::{Rgba, RgbaImage};
use renderer::compose::{
    crop, downscale, flatten, flatten_to_rgb, opaque_pixel_count, overlay_at, overlay_centered,
    resize_exact, rotate_ccw, transparent_canvas,
};
use test_utils::{gradient, uniform_disk, GRAY};

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

// ============================================================================
// Crop and overlay
// ============================================================================

#[test]
fn test_crop_copies_region() {
    let source = gradient(20, 10);
    let strip = crop(&source, 5, 2, 4, 3).unwrap();
    assert_eq!(strip.dimensions(), (4, 3));
    assert_eq!(strip.get_pixel(0, 0), source.get_pixel(5, 2));
    assert_eq!(strip.get_pixel(3, 2), source.get_pixel(8, 4));
}

#[test]
fn test_overlay_respects_alpha() {
    let mut base = RgbaImage::from_pixel(4, 4, RED);
    let mut top = transparent_canvas(2, 2);
    top.put_pixel(0, 0, GRAY);
    overlay_at(&mut base, &top, 1, 1);
    assert_eq!(base.get_pixel(1, 1), &GRAY);
    // transparent parts of the top image leave the base alone
    assert_eq!(base.get_pixel(2, 2), &RED);
}

#[test]
fn test_overlay_clips_negative_offsets() {
    let mut base = transparent_canvas(4, 4);
    let top = RgbaImage::from_pixel(4, 4, RED);
    overlay_at(&mut base, &top, -2, -2);
    assert_eq!(base.get_pixel(1, 1), &RED);
    assert_eq!(base.get_pixel(2, 2)[3], 0);
}

#[test]
fn test_overlay_centered() {
    let mut base = transparent_canvas(10, 10);
    let top = RgbaImage::from_pixel(4, 2, RED);
    overlay_centered(&mut base, &top);
    assert_eq!(base.get_pixel(3, 4), &RED);
    assert_eq!(base.get_pixel(6, 5), &RED);
    assert_eq!(base.get_pixel(2, 4)[3], 0);
    assert_eq!(opaque_pixel_count(&base), 8);
}

// ============================================================================
// Rotation
// ============================================================================

#[test]
fn test_rotate_full_turn_is_identity() {
    let source = gradient(9, 7);
    assert_eq!(rotate_ccw(&source, 360.0, InterpolationMethod::Bilinear), source);
    assert_eq!(rotate_ccw(&source, 0.0, InterpolationMethod::Bilinear), source);
}

#[test]
fn test_rotate_keeps_bounds_and_clears_corners() {
    let source = RgbaImage::from_pixel(40, 40, GRAY);
    let rotated = rotate_ccw(&source, 45.0, InterpolationMethod::Bilinear);
    assert_eq!(rotated.dimensions(), (40, 40));
    assert_eq!(rotated.get_pixel(0, 0)[3], 0);
    assert_eq!(rotated.get_pixel(20, 20), &GRAY);
}

#[test]
fn test_rotate_disk_is_invariant() {
    let disk = uniform_disk(64, GRAY);
    let rotated = rotate_ccw(&disk, 33.0, InterpolationMethod::Nearest);
    let before = opaque_pixel_count(&disk) as i64;
    let after = opaque_pixel_count(&rotated) as i64;
    assert!((before - after).abs() < before / 50, "{} vs {}", before, after);
}

#[test]
fn test_rotate_opposite_angles_cancel() {
    let mut source = transparent_canvas(31, 31);
    source.put_pixel(25, 15, RED);
    let there = rotate_ccw(&source, 60.0, InterpolationMethod::Nearest);
    let back = rotate_ccw(&there, -60.0, InterpolationMethod::Nearest);
    let (x, y, _) = back
        .enumerate_pixels()
        .find(|(_, _, p)| p[3] == 255)
        .expect("dot survives both rotations");
    assert!((x as i32 - 25).abs() <= 1 && (y as i32 - 15).abs() <= 1, "({}, {})", x, y);
}

// ============================================================================
// Resizing
// ============================================================================

#[test]
fn test_resize_exact() {
    let source = gradient(30, 20);
    assert_eq!(resize_exact(&source, 60, 20).unwrap().dimensions(), (60, 20));
    assert_eq!(resize_exact(&source, 30, 20).unwrap(), source);
    assert!(resize_exact(&source, 0, 20).is_err());
}

#[test]
fn test_downscale_rounds_and_never_vanishes() {
    let source = gradient(101, 51);
    assert_eq!(downscale(&source, 0.2).unwrap().dimensions(), (20, 10));
    assert_eq!(downscale(&source, 0.001).unwrap().dimensions(), (1, 1));
    assert_eq!(downscale(&source, 1.0).unwrap(), source);
    assert!(downscale(&source, 1.5).is_err());
}

// ============================================================================
// Flattening
// ============================================================================

#[test]
fn test_flatten_fills_transparent_with_color() {
    let disk = uniform_disk(16, GRAY);
    let flat = flatten(&disk, Color::WHITE);
    assert_eq!(opaque_pixel_count(&flat), 16 * 16);
    assert_eq!(flat.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
    assert_eq!(flat.get_pixel(8, 8), &GRAY);
}

#[test]
fn test_flatten_to_rgb_drops_alpha() {
    let disk = uniform_disk(16, GRAY);
    let rgb = flatten_to_rgb(&disk, Color::BLACK);
    assert_eq!(rgb.get_pixel(0, 0).0, [0, 0, 0]);
    assert_eq!(rgb.get_pixel(8, 8).0, [128, 128, 128]);
}
