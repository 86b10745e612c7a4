//! Equator-stitched gore canvas.
//!
//! One pass of projection, wedge clipping and resampling over the whole
//! canvas. The result has the source's size and extent; every column holds
//! its own gore and everything outside the wedges is transparent.

use gore_common::{GoreError, GoreResult, InterpolationMethod, ProjectionKind};
use image::RgbaImage;
use projection::GoreGeometry;
use renderer::compose::TRANSPARENT;
use tracing::{debug, instrument};

/// Project and clip `image` into side-by-side gores described by `geometry`.
///
/// `image` must cover `geometry.extent`.
#[instrument(skip(image, geometry), fields(width = image.width(), height = image.height(), num_gores = geometry.num_gores))]
pub fn make_equatorial(
    image: &RgbaImage,
    geometry: &GoreGeometry,
    projection: ProjectionKind,
    method: InterpolationMethod,
) -> GoreResult<RgbaImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(GoreError::EmptyImage { width, height });
    }

    let map = geometry.coordinate_map(projection, width, height);
    debug!(
        gore_width_deg = geometry.gore_width.to_degrees(),
        alpha_limit = ?geometry.alpha_limit,
        cap_radius = ?geometry.cap_radius,
        valid = map.valid_count(),
        "Gore map built"
    );

    Ok(renderer::resample(image, &map, TRANSPARENT, method))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use projection::EquirectExtent;

    #[test]
    fn test_full_image_sinusoidal_equator_kept() {
        let img = RgbaImage::from_pixel(60, 31, Rgba([200, 100, 0, 255]));
        let geo = GoreGeometry::new(EquirectExtent::full_sphere(), 3).unwrap();
        let out =
            make_equatorial(&img, &geo, ProjectionKind::Sinusoidal, InterpolationMethod::Nearest)
                .unwrap();
        assert_eq!(out.dimensions(), (60, 31));
        for x in 0..60 {
            assert_eq!(out.get_pixel(x, 15)[3], 255, "equator column {} clipped", x);
        }
        // gore seams are empty near the poles
        assert_eq!(out.get_pixel(0, 0)[3], 0);
    }
}
