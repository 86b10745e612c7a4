//! Input preparation: downscale, pre-rotation, background flattening.

use gore_common::{GoreError, GoreResult, PipelineParameters};
use image::RgbaImage;
use renderer::compose;
use tracing::{debug, instrument};

/// Apply the optional preprocessing steps in order: downscale by
/// `quality`, rotate by `rotation_deg` within the original bounds, flatten
/// onto `background`.
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn preprocess(image: &RgbaImage, params: &PipelineParameters) -> GoreResult<RgbaImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(GoreError::EmptyImage { width, height });
    }

    let mut prepared = compose::downscale(image, params.quality)?;
    debug!(
        quality = params.quality,
        width = prepared.width(),
        height = prepared.height(),
        "Downscaled input"
    );

    if params.rotation_deg != 0.0 {
        prepared = compose::rotate_ccw(&prepared, params.rotation_deg, params.interpolation);
        debug!(rotation_deg = params.rotation_deg, "Rotated input");
    }

    if let Some(color) = params.background {
        prepared = compose::flatten(&prepared, color);
        debug!(background = %color, "Flattened input");
    }

    Ok(prepared)
}
