//! Polar cap covering the point where the gores converge.

use gore_common::{GoreError, GoreResult, InterpolationMethod, ProjectionKind};
use image::RgbaImage;
use projection::{EquirectExtent, GoreGeometry};
use renderer::compose;
use tracing::{info, instrument};

use crate::equatorial::make_equatorial;
use crate::swap::swap_from_pole;

/// Cap radius in pixels on a canvas whose height spans π radians.
#[inline]
pub fn cap_radius_pixels(phi_cap: f64, height: u32) -> f64 {
    phi_cap * height as f64 / std::f64::consts::PI
}

/// Build the cap from the pole-swapped image.
///
/// The image is swapped back to its natural frame, projected as a single
/// gore clipped to a planar radius of `phi_cap` on the canvas, then turned by
/// `-180°/num_gores` to line up with the rosette seams. The output has the
/// input's size with the disk at its center.
#[instrument(skip(swapped), fields(width = swapped.width(), height = swapped.height()))]
pub fn polecap(
    swapped: &RgbaImage,
    num_gores: usize,
    phi_cap: f64,
    projection: ProjectionKind,
    method: InterpolationMethod,
) -> GoreResult<RgbaImage> {
    let (width, height) = swapped.dimensions();
    if width == 0 || height == 0 {
        return Err(GoreError::EmptyImage { width, height });
    }
    if num_gores == 0 {
        return Err(GoreError::invalid_config("num_gores", "must be >= 1"));
    }
    if !(phi_cap > 0.0) {
        return Ok(compose::transparent_canvas(width, height));
    }

    info!(
        phi_cap_deg = phi_cap.to_degrees(),
        radius_px = cap_radius_pixels(phi_cap, height),
        %projection,
        "Generating polar cap"
    );

    let natural = swap_from_pole(swapped, method)?;
    let geometry =
        GoreGeometry::new(EquirectExtent::full_sphere_centered(), 1)?.with_cap_radius(phi_cap);
    let cap = make_equatorial(&natural, &geometry, projection, method)?;

    Ok(compose::rotate_ccw(&cap, -180.0 / num_gores as f64, method))
}
