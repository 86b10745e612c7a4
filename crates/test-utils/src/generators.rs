//! Synthetic image generators.
//!
//! These generators create predictable, verifiable test images that can be
//! used across the test suite without shipping binary fixtures.

use image::{Rgba, RgbaImage};

/// Opaque mid-gray used by the standard scenarios.
pub const GRAY: Rgba<u8> = Rgba([128, 128, 128, 255]);

/// Creates a square image holding an opaque disk of one color.
///
/// The disk is inscribed in the square; pixels whose centers lie outside it
/// are fully transparent.
///
/// # Example
///
/// ```
/// use test_utils::{uniform_disk, GRAY};
///
/// let disk = uniform_disk(64, GRAY);
/// assert_eq!(disk.get_pixel(32, 32), &GRAY);
/// assert_eq!(disk.get_pixel(0, 0)[3], 0);
/// ```
pub fn uniform_disk(size: u32, color: Rgba<u8>) -> RgbaImage {
    let center = size as f64 / 2.0;
    let radius_sq = center * center;
    RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f64 + 0.5 - center;
        let dy = y as f64 + 0.5 - center;
        if dx * dx + dy * dy <= radius_sq {
            color
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// Creates an image filled with one color.
pub fn uniform_image(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(width, height, color)
}

/// Creates an opaque black/white checkerboard with `cell`-pixel squares.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> RgbaImage {
    let cell = cell.max(1);
    RgbaImage::from_fn(width, height, |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([0, 0, 0, 255])
        }
    })
}

/// Creates an opaque gradient where red tracks the column and green the row.
///
/// Smooth content like this survives bilinear resampling with small errors,
/// which makes it the right input for round-trip comparisons.
pub fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let r = (x as f64 / width.max(2).saturating_sub(1) as f64 * 255.0).round() as u8;
        let g = (y as f64 / height.max(2).saturating_sub(1) as f64 * 255.0).round() as u8;
        Rgba([r, g, 128, 255])
    })
}

/// Creates an opaque image of horizontal bands, one per color, top to bottom.
///
/// On an equirectangular canvas each band is a latitude zone.
pub fn latitude_bands(width: u32, height: u32, colors: &[Rgba<u8>]) -> RgbaImage {
    if colors.is_empty() {
        return RgbaImage::new(width, height);
    }
    let n = colors.len() as u32;
    RgbaImage::from_fn(width, height, |_, y| {
        let band = ((y * n) / height.max(1)).min(n - 1);
        colors[band as usize]
    })
}

/// Mean absolute per-channel difference between two same-sized images,
/// ignoring pixels that are transparent in either.
pub fn mean_abs_diff(a: &RgbaImage, b: &RgbaImage) -> f64 {
    assert_eq!(a.dimensions(), b.dimensions(), "image sizes differ");
    let mut total = 0u64;
    let mut count = 0u64;
    for (pa, pb) in a.pixels().zip(b.pixels()) {
        if pa[3] == 0 || pb[3] == 0 {
            continue;
        }
        for c in 0..3 {
            total += (pa[c] as i32 - pb[c] as i32).unsigned_abs() as u64;
        }
        count += 3;
    }
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

/// Count pixels with non-zero alpha.
pub fn count_opaque(image: &RgbaImage) -> usize {
    image.pixels().filter(|p| p[3] != 0).count()
}
