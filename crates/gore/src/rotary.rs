//! End-to-end rosette pipeline.

use std::time::Instant;

use gore_common::{GoreError, GoreResult, PipelineParameters};
use image::RgbaImage;
use projection::{EquirectExtent, LensModel};
use renderer::compose;
use tracing::{debug, info, instrument};

use crate::control::{Outcome, PipelineControl, RotaryOutcome, Stage};
use crate::equi::equi;
use crate::polar::make_polar;
use crate::polecap::polecap;
use crate::preprocess::preprocess;
use crate::swap::swap_to_pole;

/// Turn a disk image centered on the optical axis into a gore rosette with
/// a polar cap.
///
/// Parameters are validated and the lens model is built before any stage
/// runs. The token in `control` is polled before each heavy stage and
/// between gores; a cancelled run returns [`Outcome::Cancelled`] and no
/// image.
#[instrument(skip_all, fields(width = image.width(), height = image.height(), num_gores = params.num_gores))]
pub fn make_rotary(
    image: &RgbaImage,
    params: &PipelineParameters,
    control: &PipelineControl<'_>,
) -> GoreResult<RotaryOutcome> {
    let start = Instant::now();

    params.validate()?;
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(GoreError::EmptyImage { width, height });
    }
    let lens = LensModel::new(params.focal_length, params.eye_radius, params.alpha_max)?;

    let prepared = preprocess(image, params)?;

    if !control.begin(Stage::LensProjecting) {
        return Ok(Outcome::Cancelled);
    }
    let projected = equi(&prepared, &lens, params.interpolation)?;
    drop(prepared);

    if !control.begin(Stage::PoleSwapping) {
        return Ok(Outcome::Cancelled);
    }
    let mut swapped = swap_to_pole(&projected.image, &projected.extent, params.interpolation)?;
    drop(projected);

    let sphere_height = swapped.height();
    let sphere_width = sphere_height.saturating_mul(2);
    if swapped.width() != sphere_width {
        debug!(
            from_width = swapped.width(),
            to_width = sphere_width,
            "Resizing swapped image"
        );
        swapped = compose::resize_exact(&swapped, sphere_width, sphere_height)?;
    }

    if !control.begin(Stage::GoreAssembling) {
        return Ok(Outcome::Cancelled);
    }
    let mut rosette = match make_polar(
        &swapped,
        &EquirectExtent::full_sphere(),
        params.num_gores,
        params.projection,
        params.alpha_limit,
        params.interpolation,
        control,
    )? {
        Outcome::Completed(rosette) => rosette,
        Outcome::Cancelled => return Ok(Outcome::Cancelled),
    };

    if !control.begin(Stage::CapGenerating) {
        return Ok(Outcome::Cancelled);
    }
    let cap = polecap(
        &swapped,
        params.num_gores,
        params.phi_no_cut,
        params.cap_projection,
        params.interpolation,
    )?;

    compose::overlay_centered(&mut rosette, &cap);

    info!(
        width = rosette.width(),
        height = rosette.height(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Rosette complete"
    );
    Ok(Outcome::Completed(rosette))
}
