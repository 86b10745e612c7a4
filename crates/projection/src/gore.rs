//! Gore wedge geometry and clipping.
//!
//! A canvas of `num_gores` equal meridian wedges spans the longitude window
//! of its extent. Every destination column belongs to exactly one gore; a
//! sample survives only if its source longitude falls in the half-open
//! window `[lam0 - w/2, lam0 + w/2)` of that gore, so neighbouring gores can
//! never both claim it.

use std::f64::consts::FRAC_PI_2;

use gore_common::{GoreError, GoreResult, ProjectionKind};

use crate::coord_map::CoordinateMap;
use crate::extent::EquirectExtent;
use crate::kernel;

/// Read-only parameters of one gore projection pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoreGeometry {
    pub extent: EquirectExtent,
    pub num_gores: usize,
    pub gore_width: f64,
    /// Largest distance from the converging pole `phi = -π/2` kept, radians.
    pub alpha_limit: Option<f64>,
    /// Largest planar distance from the gore center kept, in canvas radians.
    pub cap_radius: Option<f64>,
}

impl GoreGeometry {
    pub fn new(extent: EquirectExtent, num_gores: usize) -> GoreResult<Self> {
        if num_gores == 0 {
            return Err(GoreError::invalid_config("num_gores", "must be >= 1"));
        }
        Ok(Self {
            extent,
            num_gores,
            gore_width: extent.lam_span() / num_gores as f64,
            alpha_limit: None,
            cap_radius: None,
        })
    }

    /// Clip samples farther than `alpha_limit` from the converging pole.
    pub fn with_alpha_limit(mut self, alpha_limit: f64) -> Self {
        self.alpha_limit = Some(alpha_limit);
        self
    }

    /// Clip canvas points farther than `radius` from the gore center.
    pub fn with_cap_radius(mut self, radius: f64) -> Self {
        self.cap_radius = Some(radius);
        self
    }

    /// Columns per gore strip. The rosette cuts strips at the same width, so
    /// leftover columns on the right belong to the last gore.
    #[inline]
    pub fn strip_width(&self, width: u32) -> usize {
        (width as usize / self.num_gores).max(1)
    }

    /// Gore owning column `col` of a `width`-wide canvas.
    #[inline]
    pub fn owning_gore(&self, col: u32, width: u32) -> usize {
        (col as usize / self.strip_width(width)).min(self.num_gores - 1)
    }

    /// Central meridian of gore `g`.
    #[inline]
    pub fn meridian(&self, gore: usize) -> f64 {
        self.extent.lam_min + self.gore_width * (gore as f64 + 0.5)
    }

    /// Half-open wedge test around meridian `lam0`.
    #[inline]
    pub fn in_wedge(&self, lam0: f64, lam_src: f64) -> bool {
        let half = self.gore_width / 2.0;
        lam_src.is_finite() && lam_src >= lam0 - half && lam_src < lam0 + half
    }

    /// Distance-from-pole limit on a source latitude.
    #[inline]
    pub fn within_alpha_limit(&self, phi_src: f64) -> bool {
        if !phi_src.is_finite() {
            return false;
        }
        match self.alpha_limit {
            Some(limit) => phi_src + FRAC_PI_2 <= limit,
            None => true,
        }
    }

    /// Cap-radius limit on a canvas point, measured in the plane.
    #[inline]
    pub fn within_cap(&self, phi_dst: f64, lam_dst: f64, lam0: f64) -> bool {
        match self.cap_radius {
            Some(radius) => kernel::planar_radius(phi_dst, lam_dst, lam0) <= radius,
            None => true,
        }
    }

    /// Source angles kept for canvas pixel `(col, row)`, or `None` if clipped.
    pub fn clip(&self, kind: ProjectionKind, col: u32, row: u32, width: u32, height: u32) -> Option<(f64, f64)> {
        let lam0 = self.meridian(self.owning_gore(col, width));
        let lam_dst = self.extent.column_to_lam(col as f64, width);
        let phi_dst = self.extent.row_to_phi(row as f64, height);
        if !self.within_cap(phi_dst, lam_dst, lam0) {
            return None;
        }

        let (phi_src, lam_src) = kernel::inverse(kind, phi_dst, lam_dst, lam0)?;
        if !self.in_wedge(lam0, lam_src) || !self.within_alpha_limit(phi_src) {
            return None;
        }
        Some((phi_src, lam_src))
    }

    /// Source lookup for a gored canvas of the source's own size and extent.
    pub fn coordinate_map(&self, kind: ProjectionKind, width: u32, height: u32) -> CoordinateMap {
        CoordinateMap::from_fn(width, height, |col, row| {
            let (phi, lam) = self.clip(kind, col, row, width, height)?;
            self.extent.locate(phi, lam, width, height)
        })
    }
}
