//! 90° frame rotation that moves a pole onto the equator.
//!
//! The forward rotation sends the source optical axis `(0, 0)` to the
//! destination pole `phi = -π/2`. Written on unit vectors, a destination
//! direction `d` samples the source direction `R·d` with
//!
//! ```text
//!     | 0 0 -1 |
//! R = | 0 1  0 |
//!     | 1 0  0 |
//! ```
//!
//! which gives `phi_src = asin(cos λ cos φ)` and
//! `lam_src = atan2(sin λ cos φ, -sin φ)`. `R·R` is not the identity, so the
//! inverse direction samples through `Rᵀ` instead.

use nalgebra::{Matrix3, Vector3};

use crate::angle::clamped_asin;
use crate::coord_map::CoordinateMap;
use crate::extent::EquirectExtent;

/// Which way to rotate the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwapDirection {
    /// Optical axis to the pole.
    #[default]
    Forward,
    /// Pole back to the optical axis.
    Inverse,
}

impl SwapDirection {
    fn matrix(self) -> Matrix3<f64> {
        let forward = Matrix3::new(
            0.0, 0.0, -1.0, //
            0.0, 1.0, 0.0, //
            1.0, 0.0, 0.0,
        );
        match self {
            SwapDirection::Forward => forward,
            SwapDirection::Inverse => forward.transpose(),
        }
    }
}

/// Pole-swap sampler for one direction.
#[derive(Debug, Clone)]
pub struct PoleSwap {
    direction: SwapDirection,
    rotation: Matrix3<f64>,
}

impl PoleSwap {
    pub fn new(direction: SwapDirection) -> Self {
        Self {
            direction,
            rotation: direction.matrix(),
        }
    }

    pub fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Source `(phi, lam)` sampled by destination `(phi, lam)`.
    #[inline]
    pub fn source_angles(&self, phi_dst: f64, lam_dst: f64) -> (f64, f64) {
        let s = self.rotation * unit_vector(phi_dst, lam_dst);
        (clamped_asin(s.z), s.y.atan2(s.x))
    }

    /// Source lookup for a `dst_width × dst_height` image covering `dst_extent`,
    /// sampling a `src_width × src_height` image covering `src_extent`.
    ///
    /// Destination pixels whose source angle falls outside `src_extent` are
    /// invalid.
    pub fn coordinate_map(
        &self,
        src_extent: &EquirectExtent,
        src_width: u32,
        src_height: u32,
        dst_extent: &EquirectExtent,
        dst_width: u32,
        dst_height: u32,
    ) -> CoordinateMap {
        CoordinateMap::from_fn(dst_width, dst_height, |col, row| {
            let lam = dst_extent.column_to_lam(col as f64, dst_width);
            let phi = dst_extent.row_to_phi(row as f64, dst_height);
            let (phi_src, lam_src) = self.source_angles(phi, lam);
            let lam_src = crate::angle::wrap_longitude(lam_src, src_extent.lam_min);
            src_extent.locate(phi_src, lam_src, src_width, src_height)
        })
    }
}

#[inline]
fn unit_vector(phi: f64, lam: f64) -> Vector3<f64> {
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_lam, cos_lam) = lam.sin_cos();
    Vector3::new(cos_phi * cos_lam, cos_phi * sin_lam, sin_phi)
}
