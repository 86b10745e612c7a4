//! Disk image to equirectangular image.

use gore_common::{GoreError, GoreResult, InterpolationMethod};
use image::RgbaImage;
use projection::{EquirectExtent, LensModel};
use renderer::compose::TRANSPARENT;
use tracing::{debug, info, instrument};

/// Lens-projected image and the angular window it actually covers.
#[derive(Debug, Clone)]
pub struct EquiImage {
    pub image: RgbaImage,
    pub extent: EquirectExtent,
}

impl EquiImage {
    /// Effective longitude half-extent.
    pub fn lam_max(&self) -> f64 {
        self.extent.lam_max
    }

    /// Effective latitude half-extent.
    pub fn phi_max(&self) -> f64 {
        self.extent.phi_max
    }
}

/// Un-distort a disk image centered on the optical axis.
///
/// The output has the input's pixel size and spans
/// `±(alpha_max − 1°)` in both latitude and longitude; downstream stages
/// must use the returned extent, not the nominal field of view.
#[instrument(skip(image, lens), fields(width = image.width(), height = image.height()))]
pub fn equi(image: &RgbaImage, lens: &LensModel, method: InterpolationMethod) -> GoreResult<EquiImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(GoreError::EmptyImage { width, height });
    }

    info!(
        width,
        height,
        alpha_max_deg = lens.alpha_max.to_degrees(),
        "Projecting lens image to equirectangular"
    );

    let (map, extent) = lens.coordinate_map(width, height)?;
    debug!(
        phi_max_deg = extent.phi_max.to_degrees(),
        lam_max_deg = extent.lam_max.to_degrees(),
        "Effective lens extent"
    );

    let projected = renderer::resample(image, &map, TRANSPARENT, method);
    Ok(EquiImage {
        image: projected,
        extent,
    })
}
