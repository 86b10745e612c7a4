//! Pole-swap between the optical frame and the gore frame.

use gore_common::{GoreError, GoreResult, InterpolationMethod};
use image::{Rgba, RgbaImage};
use projection::{EquirectExtent, PoleSwap, SwapDirection};
use renderer::compose::TRANSPARENT;
use tracing::{debug, info, instrument};

/// Rotate `image` (covering `src_extent`) into a `dst_width × dst_height`
/// image covering `dst_extent`.
///
/// Pixels whose source angle lies outside `src_extent` get `background`.
#[allow(clippy::too_many_arguments)]
#[instrument(skip(image, src_extent, dst_extent, background), fields(src_width = image.width(), src_height = image.height()))]
pub fn swap(
    image: &RgbaImage,
    src_extent: &EquirectExtent,
    direction: SwapDirection,
    dst_extent: &EquirectExtent,
    dst_width: u32,
    dst_height: u32,
    background: Rgba<u8>,
    method: InterpolationMethod,
) -> GoreResult<RgbaImage> {
    let (src_width, src_height) = image.dimensions();
    if src_width == 0 || src_height == 0 {
        return Err(GoreError::EmptyImage {
            width: src_width,
            height: src_height,
        });
    }
    if dst_width == 0 || dst_height == 0 {
        return Err(GoreError::EmptyImage {
            width: dst_width,
            height: dst_height,
        });
    }

    let sampler = PoleSwap::new(direction);
    let map = sampler.coordinate_map(src_extent, src_width, src_height, dst_extent, dst_width, dst_height);
    debug!(
        ?direction,
        dst_width,
        dst_height,
        valid = map.valid_count(),
        "Pole-swap map built"
    );

    Ok(renderer::resample(image, &map, background, method))
}

/// Forward swap onto the full sphere: `H × 2H`, longitudes `[0, 2π)`, with
/// the optical axis on the top row's pole.
pub fn swap_to_pole(
    image: &RgbaImage,
    extent: &EquirectExtent,
    method: InterpolationMethod,
) -> GoreResult<RgbaImage> {
    let height = image.height();
    info!(height, "Swapping optical axis to the pole");
    swap(
        image,
        extent,
        SwapDirection::Forward,
        &EquirectExtent::full_sphere(),
        height.saturating_mul(2),
        height,
        TRANSPARENT,
        method,
    )
}

/// Inverse swap of a full-sphere image back to the natural frame, same size,
/// longitudes `[-π, π)`.
pub fn swap_from_pole(image: &RgbaImage, method: InterpolationMethod) -> GoreResult<RgbaImage> {
    let (width, height) = image.dimensions();
    swap(
        image,
        &EquirectExtent::full_sphere(),
        SwapDirection::Inverse,
        &EquirectExtent::full_sphere_centered(),
        width,
        height,
        TRANSPARENT,
        method,
    )
}
