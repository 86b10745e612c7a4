//! Angular extent of an equirectangular image and its pixel convention.
//!
//! Column `c` of a `W`-wide image samples longitude
//! `lam_min + (c + 0.5)·Δλ/W`; row `r` of an `H`-high image samples latitude
//! `phi_min + (r + 0.5)·Δφ/H`. Row 0 is `phi_min`, so row index grows with
//! latitude.

use std::f64::consts::{FRAC_PI_2, PI};

use gore_common::{GoreError, GoreResult};

/// Latitude/longitude window covered by an equirectangular image, radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquirectExtent {
    pub phi_min: f64,
    pub phi_max: f64,
    pub lam_min: f64,
    pub lam_max: f64,
}

impl EquirectExtent {
    /// Create an extent, rejecting empty or non-finite windows.
    pub fn new(phi_min: f64, phi_max: f64, lam_min: f64, lam_max: f64) -> GoreResult<Self> {
        let finite = [phi_min, phi_max, lam_min, lam_max]
            .iter()
            .all(|v| v.is_finite());
        if !finite || phi_min >= phi_max || lam_min >= lam_max {
            return Err(GoreError::degenerate(format!(
                "empty extent phi [{}, {}], lam [{}, {}]",
                phi_min, phi_max, lam_min, lam_max
            )));
        }
        Ok(Self {
            phi_min,
            phi_max,
            lam_min,
            lam_max,
        })
    }

    /// `phi, lam ∈ [-phi_extent, phi_extent] × [-lam_extent, lam_extent]`.
    pub fn symmetric(phi_extent: f64, lam_extent: f64) -> GoreResult<Self> {
        Self::new(-phi_extent, phi_extent, -lam_extent, lam_extent)
    }

    /// The whole sphere with longitudes in `[0, 2π)`.
    pub fn full_sphere() -> Self {
        Self {
            phi_min: -FRAC_PI_2,
            phi_max: FRAC_PI_2,
            lam_min: 0.0,
            lam_max: 2.0 * PI,
        }
    }

    /// The whole sphere with longitudes in `[-π, π)`.
    pub fn full_sphere_centered() -> Self {
        Self {
            phi_min: -FRAC_PI_2,
            phi_max: FRAC_PI_2,
            lam_min: -PI,
            lam_max: PI,
        }
    }

    /// Same extent with a different lower latitude bound.
    pub fn with_phi_min(self, phi_min: f64) -> GoreResult<Self> {
        Self::new(phi_min, self.phi_max, self.lam_min, self.lam_max)
    }

    #[inline]
    pub fn phi_span(&self) -> f64 {
        self.phi_max - self.phi_min
    }

    #[inline]
    pub fn lam_span(&self) -> f64 {
        self.lam_max - self.lam_min
    }

    /// True when the longitude window wraps all the way around.
    pub fn is_full_circle(&self) -> bool {
        (self.lam_span() - 2.0 * PI).abs() < 1e-9
    }

    /// Longitude sampled by column `col` of a `width`-wide image.
    #[inline]
    pub fn column_to_lam(&self, col: f64, width: u32) -> f64 {
        self.lam_min + (col + 0.5) * self.lam_span() / width as f64
    }

    /// Latitude sampled by row `row` of a `height`-high image.
    #[inline]
    pub fn row_to_phi(&self, row: f64, height: u32) -> f64 {
        self.phi_min + (row + 0.5) * self.phi_span() / height as f64
    }

    /// Fractional column for a longitude (inverse of [`Self::column_to_lam`]).
    #[inline]
    pub fn lam_to_column(&self, lam: f64, width: u32) -> f64 {
        (lam - self.lam_min) / self.lam_span() * width as f64 - 0.5
    }

    /// Fractional row for a latitude (inverse of [`Self::row_to_phi`]).
    #[inline]
    pub fn phi_to_row(&self, phi: f64, height: u32) -> f64 {
        (phi - self.phi_min) / self.phi_span() * height as f64 - 0.5
    }

    /// Fractional pixel position of `(phi, lam)` in a `width × height` image.
    ///
    /// Returns `None` when the angle lies outside the extent or is not finite.
    /// Angles inside the extent but within half a pixel of its border are
    /// clamped onto the outermost pixel centers so no seam appears at the
    /// edges. Full-circle extents wrap the longitude first.
    pub fn locate(&self, phi: f64, lam: f64, width: u32, height: u32) -> Option<(f64, f64)> {
        if !phi.is_finite() || !lam.is_finite() {
            return None;
        }
        let lam = if self.is_full_circle() {
            crate::angle::wrap_longitude(lam, self.lam_min)
        } else {
            lam
        };
        if phi < self.phi_min || phi > self.phi_max || lam < self.lam_min || lam > self.lam_max {
            return None;
        }
        let x = self
            .lam_to_column(lam, width)
            .clamp(0.0, (width.max(1) - 1) as f64);
        let y = self
            .phi_to_row(phi, height)
            .clamp(0.0, (height.max(1) - 1) as f64);
        Some((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_extent() {
        assert!(EquirectExtent::new(0.5, 0.5, 0.0, 1.0).is_err());
        assert!(EquirectExtent::new(0.0, 1.0, 1.0, -1.0).is_err());
        assert!(EquirectExtent::new(f64::NAN, 1.0, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_pixel_centers_roundtrip() {
        let ext = EquirectExtent::full_sphere();
        let lam = ext.column_to_lam(10.0, 360);
        assert!((ext.lam_to_column(lam, 360) - 10.0).abs() < 1e-9);
        let phi = ext.row_to_phi(0.0, 180);
        assert!((phi - (-FRAC_PI_2 + 0.5 * PI / 180.0)).abs() < 1e-12);
        assert!((ext.phi_to_row(phi, 180)).abs() < 1e-9);
    }

    #[test]
    fn test_locate_wraps_full_circle() {
        let ext = EquirectExtent::full_sphere();
        let (x, _) = ext.locate(0.0, -0.001, 360, 180).unwrap();
        assert!((x - 359.0).abs() < 1.0);
    }

    #[test]
    fn test_locate_outside_partial_extent() {
        let ext = EquirectExtent::symmetric(0.5, 0.5).unwrap();
        assert!(ext.locate(0.6, 0.0, 100, 100).is_none());
        assert!(ext.locate(0.0, -0.51, 100, 100).is_none());
        assert!(ext.locate(f64::NAN, 0.0, 100, 100).is_none());
        let (x, y) = ext.locate(0.5, -0.5, 100, 100).unwrap();
        assert_eq!((x, y), (0.0, 99.0));
    }
}
