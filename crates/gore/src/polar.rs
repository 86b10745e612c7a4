//! Rosette assembly.
//!
//! The equator-stitched canvas is cut into one strip per gore. Each strip
//! is hung from the top center of a square working canvas, turned
//! counter-clockwise by its gore's angle and composited so its top row, the
//! converging pole, lands on the center of a `2H × 2H` output.

use std::f64::consts::{FRAC_PI_2, TAU};

use gore_common::{GoreError, GoreResult, InterpolationMethod, ProjectionKind};
use image::RgbaImage;
use projection::{EquirectExtent, GoreGeometry};
use renderer::compose;
use tracing::{debug, info, instrument};

use crate::control::{Outcome, PipelineControl};
use crate::equatorial::make_equatorial;

/// Working canvas side for strips of height `height`.
pub fn working_canvas_size(height: u32) -> u32 {
    (height as f64 * 1.5).floor() as u32
}

/// Top-left corner of gore `index`'s rotated working canvas on the rosette.
pub fn placement(index: usize, num_gores: usize, height: u32) -> (i64, i64) {
    let side = working_canvas_size(height) as f64;
    let omega = index as f64 * TAU / num_gores as f64;
    let shift = side - height as f64;
    let x = (side / 2.0 * (1.0 + omega.sin())).floor() - shift;
    let y = (side / 2.0 * (1.0 + omega.cos())).floor() - shift;
    (x as i64, y as i64)
}

/// Assemble a rosette from a full-sphere image.
///
/// `extent.phi_min` is forced to `-π/2`. Cancellation is polled before every
/// gore.
#[instrument(skip(image, extent, control), fields(width = image.width(), height = image.height()))]
pub fn make_polar(
    image: &RgbaImage,
    extent: &EquirectExtent,
    num_gores: usize,
    projection: ProjectionKind,
    alpha_limit: f64,
    method: InterpolationMethod,
    control: &PipelineControl<'_>,
) -> GoreResult<Outcome<RgbaImage>> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(GoreError::EmptyImage { width, height });
    }
    if num_gores == 0 {
        return Err(GoreError::invalid_config("num_gores", "must be >= 1"));
    }
    if (width as usize) < num_gores {
        return Err(GoreError::invalid_config(
            "num_gores",
            format!("{} gores do not fit in {} columns", num_gores, width),
        ));
    }

    let extent = extent.with_phi_min(-FRAC_PI_2)?;
    let geometry = GoreGeometry::new(extent, num_gores)?.with_alpha_limit(alpha_limit);
    let strip_width = geometry.strip_width(width) as u32;

    info!(num_gores, %projection, strip_width, "Assembling rosette");
    let stitched = make_equatorial(image, &geometry, projection, method)?;

    let side = working_canvas_size(height);
    let paste_x = (side as i64 - strip_width as i64) / 2;
    let mut rosette = compose::transparent_canvas(height * 2, height * 2);

    for index in 0..num_gores {
        if control.is_cancelled() {
            return Ok(Outcome::Cancelled);
        }

        let strip = compose::crop(&stitched, index as u32 * strip_width, 0, strip_width, height)?;
        let mut canvas = compose::transparent_canvas(side, side);
        compose::overlay_at(&mut canvas, &strip, paste_x, 0);

        let angle = index as f64 * 360.0 / num_gores as f64;
        let rotated = compose::rotate_ccw(&canvas, angle, method);
        let (x, y) = placement(index, num_gores, height);
        debug!(index, angle, x, y, "Placing gore");
        compose::overlay_at(&mut rosette, &rotated, x, y);
    }

    Ok(Outcome::Completed(rosette))
}
