//! Raster operations used to assemble rosettes.
//!
//! Thin wrappers over `image::imageops` and `imageproc` with the conventions
//! the pipeline needs: transparent is `Rgba([0, 0, 0, 0])`, angles are
//! degrees counter-clockwise as seen on screen, and compositing is
//! source-over using the top image's own alpha.

use gore_common::{Color, GoreError, GoreResult, InterpolationMethod};
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use rayon::prelude::*;

pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// A fully transparent `width × height` canvas.
pub fn transparent_canvas(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, TRANSPARENT)
}

/// Copy out the `width × height` region starting at `(x, y)`.
///
/// The region must lie inside the image.
pub fn crop(image: &RgbaImage, x: u32, y: u32, width: u32, height: u32) -> GoreResult<RgbaImage> {
    let fits_x = x.checked_add(width).map_or(false, |end| end <= image.width());
    let fits_y = y.checked_add(height).map_or(false, |end| end <= image.height());
    if !fits_x || !fits_y {
        return Err(GoreError::shape_mismatch(
            (image.width() as usize, image.height() as usize),
            (x.saturating_add(width) as usize, y.saturating_add(height) as usize),
        ));
    }
    Ok(imageops::crop_imm(image, x, y, width, height).to_image())
}

/// Composite `top` over `base` with its top-left corner at `(x, y)`.
///
/// Parts of `top` that fall outside `base` are dropped.
pub fn overlay_at(base: &mut RgbaImage, top: &RgbaImage, x: i64, y: i64) {
    imageops::overlay(base, top, x, y);
}

/// Composite `top` centered on `base`.
pub fn overlay_centered(base: &mut RgbaImage, top: &RgbaImage) {
    let x = (base.width() as i64 - top.width() as i64) / 2;
    let y = (base.height() as i64 - top.height() as i64) / 2;
    overlay_at(base, top, x, y);
}

/// Rotate counter-clockwise by `degrees` about the image center.
///
/// The output keeps the input's bounds; corners uncovered by the rotation
/// become transparent and content rotated past the bounds is cut.
pub fn rotate_ccw(image: &RgbaImage, degrees: f64, method: InterpolationMethod) -> RgbaImage {
    if degrees.rem_euclid(360.0) == 0.0 {
        return image.clone();
    }
    let interpolation = match method {
        InterpolationMethod::Nearest => Interpolation::Nearest,
        InterpolationMethod::Bilinear => Interpolation::Bilinear,
    };
    // imageproc rotates clockwise for positive angles
    let theta = -(degrees.to_radians() as f32);
    rotate_about_center(image, theta, interpolation, TRANSPARENT)
}

/// Resize to exactly `width × height` with Catmull-Rom filtering.
pub fn resize_exact(image: &RgbaImage, width: u32, height: u32) -> GoreResult<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(GoreError::EmptyImage { width, height });
    }
    if image.dimensions() == (width, height) {
        return Ok(image.clone());
    }
    Ok(imageops::resize(image, width, height, FilterType::CatmullRom))
}

/// Downscale by `fraction` in (0, 1] with Lanczos filtering. Never returns
/// an image smaller than 1×1.
pub fn downscale(image: &RgbaImage, fraction: f64) -> GoreResult<RgbaImage> {
    if !(fraction > 0.0 && fraction <= 1.0) {
        return Err(GoreError::invalid_config(
            "quality",
            format!("must be in (0, 1], got {}", fraction),
        ));
    }
    if fraction == 1.0 {
        return Ok(image.clone());
    }
    let width = ((image.width() as f64 * fraction).round() as u32).max(1);
    let height = ((image.height() as f64 * fraction).round() as u32).max(1);
    Ok(imageops::resize(image, width, height, FilterType::Lanczos3))
}

/// Composite every pixel over an opaque `color`, leaving a fully opaque image.
pub fn flatten(image: &RgbaImage, color: Color) -> RgbaImage {
    let mut output = image.clone();
    let [br, bg, bb] = color.to_rgb();
    output.par_chunks_mut(4).for_each(|px| {
        let a = px[3] as u32;
        let inv = 255 - a;
        px[0] = ((px[0] as u32 * a + br as u32 * inv + 127) / 255) as u8;
        px[1] = ((px[1] as u32 * a + bg as u32 * inv + 127) / 255) as u8;
        px[2] = ((px[2] as u32 * a + bb as u32 * inv + 127) / 255) as u8;
        px[3] = 255;
    });
    output
}

/// Flatten onto `color` and drop the alpha channel.
pub fn flatten_to_rgb(image: &RgbaImage, color: Color) -> RgbImage {
    let flat = flatten(image, color);
    RgbImage::from_fn(flat.width(), flat.height(), |x, y| {
        let p = flat.get_pixel(x, y);
        Rgb([p[0], p[1], p[2]])
    })
}

/// Number of pixels with non-zero alpha.
pub fn opaque_pixel_count(image: &RgbaImage) -> usize {
    image.par_chunks(4).filter(|px| px[3] != 0).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_out_of_bounds() {
        let img = transparent_canvas(10, 10);
        assert!(crop(&img, 5, 0, 6, 10).is_err());
        assert_eq!(crop(&img, 5, 0, 5, 10).unwrap().dimensions(), (5, 10));
    }

    #[test]
    fn test_flatten_half_alpha() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 128]));
        let out = flatten(&img, Color::WHITE);
        let p = out.get_pixel(0, 0);
        assert_eq!(p[3], 255);
        assert!((p[0] as i32 - 127).abs() <= 1);
    }

    #[test]
    fn test_rotate_quarter_turn_direction() {
        // a dot right of center ends up above center after a ccw quarter turn
        let mut img = transparent_canvas(21, 21);
        img.put_pixel(18, 10, Rgba([255, 0, 0, 255]));
        let out = rotate_ccw(&img, 90.0, InterpolationMethod::Nearest);
        let (x, y, _) = out
            .enumerate_pixels()
            .find(|(_, _, p)| p[3] == 255)
            .expect("dot survives rotation");
        assert!((x as i32 - 10).abs() <= 1, "x = {}", x);
        assert!(y < 6, "y = {}", y);
    }

    #[test]
    fn test_downscale_rejects_zero() {
        let img = transparent_canvas(4, 4);
        assert!(downscale(&img, 0.0).is_err());
        assert_eq!(downscale(&img, 0.5).unwrap().dimensions(), (2, 2));
    }
}
