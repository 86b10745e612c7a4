//! Spherical lens model for disk-shaped source images.
//!
//! A point at angle `θ` from the optical axis on a sphere of radius `r`,
//! photographed with focal length `d`, lands at radial image-plane distance
//!
//! ```text
//! L(θ) = d·r·sin θ / (d + r·(cos θ − 1))
//! ```
//!
//! applied independently along the latitude and longitude axes. Only
//! `alpha_max − 1°` is sampled, and distances are normalized by `L` of that
//! reduced angle, so the sampled cone spans the whole disk.

use gore_common::{GoreError, GoreResult};

use crate::angle::deg_to_rad;
use crate::coord_map::CoordinateMap;
use crate::extent::EquirectExtent;

/// Margin subtracted from `alpha_max` before sampling.
pub const EDGE_MARGIN_DEG: f64 = 1.0;

/// Smallest accepted normalization distance.
const MIN_NORM: f64 = 1e-9;

/// Two-parameter lens model plus the half field of view it was built for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LensModel {
    /// Focal length `d`.
    pub focal_length: f64,
    /// Eye radius `r`.
    pub eye_radius: f64,
    /// Nominal half field of view, radians.
    pub alpha_max: f64,
    norm: f64,
}

impl LensModel {
    /// Build the model, failing fast on every degenerate configuration.
    pub fn new(focal_length: f64, eye_radius: f64, alpha_max: f64) -> GoreResult<Self> {
        if !(focal_length.is_finite() && focal_length > 0.0) {
            return Err(GoreError::degenerate(format!(
                "focal length must be > 0, got {}",
                focal_length
            )));
        }
        if !(eye_radius.is_finite() && eye_radius > 0.0) {
            return Err(GoreError::degenerate(format!(
                "eye radius must be > 0, got {}",
                eye_radius
            )));
        }
        if !alpha_max.is_finite() || alpha_max <= deg_to_rad(EDGE_MARGIN_DEG) {
            return Err(GoreError::degenerate(format!(
                "alpha_max must exceed {} degree, got {} rad",
                EDGE_MARGIN_DEG, alpha_max
            )));
        }
        if alpha_max >= std::f64::consts::PI {
            return Err(GoreError::degenerate(format!(
                "alpha_max must be < pi, got {}",
                alpha_max
            )));
        }

        // cos is decreasing on [0, pi), so the denominator is smallest at alpha_max
        let min_denominator = focal_length + eye_radius * (alpha_max.cos() - 1.0);
        if min_denominator <= 0.0 {
            return Err(GoreError::degenerate(format!(
                "lens denominator d + r(cos a - 1) reaches {} within [0, {}]",
                min_denominator, alpha_max
            )));
        }

        let effective = alpha_max - deg_to_rad(EDGE_MARGIN_DEG);
        let norm = radial_distance(focal_length, eye_radius, effective);
        if !(norm.is_finite() && norm > MIN_NORM) {
            return Err(GoreError::degenerate(format!(
                "normalization distance L(alpha_max - 1 deg) = {} is not bounded away from 0",
                norm
            )));
        }

        Ok(Self {
            focal_length,
            eye_radius,
            alpha_max,
            norm,
        })
    }

    /// Half-angle actually sampled: `alpha_max − 1°`.
    #[inline]
    pub fn effective_half_angle(&self) -> f64 {
        self.alpha_max - deg_to_rad(EDGE_MARGIN_DEG)
    }

    /// Extent of the equirectangular image produced by this lens.
    pub fn output_extent(&self) -> GoreResult<EquirectExtent> {
        let half = self.effective_half_angle();
        EquirectExtent::symmetric(half, half)
    }

    /// Image-plane distance of angle `theta`, normalized so the effective
    /// half-angle maps to 1.
    #[inline]
    pub fn normalized_distance(&self, theta: f64) -> f64 {
        radial_distance(self.focal_length, self.eye_radius, theta) / self.norm
    }

    /// Fractional source pixel of `(phi, lam)` in a `width × height` disk image.
    #[inline]
    pub fn source_pixel(&self, phi: f64, lam: f64, width: u32, height: u32) -> (f64, f64) {
        let half_w = width as f64 / 2.0;
        let half_h = height as f64 / 2.0;
        let x = half_w + self.normalized_distance(lam) * half_w - 0.5;
        let y = half_h + self.normalized_distance(phi) * half_h - 0.5;
        (x, y)
    }

    /// Source lookup for an equirectangular image of the same size as the disk.
    pub fn coordinate_map(&self, width: u32, height: u32) -> GoreResult<(CoordinateMap, EquirectExtent)> {
        let extent = self.output_extent()?;
        let max_x = width.saturating_sub(1) as f64;
        let max_y = height.saturating_sub(1) as f64;

        let map = CoordinateMap::from_fn(width, height, |col, row| {
            let lam = extent.column_to_lam(col as f64, width);
            let phi = extent.row_to_phi(row as f64, height);
            let (x, y) = self.source_pixel(phi, lam, width, height);
            Some((x.clamp(0.0, max_x), y.clamp(0.0, max_y)))
        });

        Ok((map, extent))
    }
}

/// `L(θ) = d·r·sin θ / (d + r·(cos θ − 1))`.
#[inline]
pub fn radial_distance(focal_length: f64, eye_radius: f64, theta: f64) -> f64 {
    focal_length * eye_radius * theta.sin() / (focal_length + eye_radius * (theta.cos() - 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_3, PI};

    #[test]
    fn test_rejects_zero_alpha() {
        let err = LensModel::new(24.0, 12.0, 0.0).unwrap_err();
        assert!(matches!(err, GoreError::DegenerateProjection(_)));
        assert!(LensModel::new(24.0, 12.0, deg_to_rad(1.0)).is_err());
        assert!(LensModel::new(24.0, 12.0, PI).is_err());
    }

    #[test]
    fn test_rejects_denominator_crossing_zero() {
        // 10 + 12(cos a - 1) reaches 0 near 80 degrees
        assert!(LensModel::new(10.0, 12.0, deg_to_rad(120.0)).is_err());
        assert!(LensModel::new(10.0, 12.0, deg_to_rad(60.0)).is_ok());
    }

    #[test]
    fn test_edge_maps_to_border() {
        let lens = LensModel::new(24.0, 12.0, FRAC_PI_3).unwrap();
        assert!((lens.normalized_distance(lens.effective_half_angle()) - 1.0).abs() < 1e-12);
        assert!(lens.normalized_distance(FRAC_PI_3) > 1.0);
        assert_eq!(lens.normalized_distance(0.0), 0.0);
    }

    #[test]
    fn test_effective_edge_is_source_border() {
        let lens = LensModel::new(24.0, 12.0, FRAC_PI_3).unwrap();
        let edge = lens.effective_half_angle();
        let (x, y) = lens.source_pixel(edge, edge, 512, 512);
        assert!((x - 511.5).abs() < 1e-9 && (y - 511.5).abs() < 1e-9);
        let (x, _) = lens.source_pixel(0.0, -edge, 512, 512);
        assert!((x + 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_distance_is_odd() {
        let lens = LensModel::new(24.0, 12.0, FRAC_PI_3).unwrap();
        let a = lens.normalized_distance(0.4);
        let b = lens.normalized_distance(-0.4);
        assert!((a + b).abs() < 1e-12);
    }

    #[test]
    fn test_center_maps_to_center() {
        let lens = LensModel::new(24.0, 12.0, FRAC_PI_3).unwrap();
        let (x, y) = lens.source_pixel(0.0, 0.0, 512, 512);
        assert_eq!((x, y), (255.5, 255.5));
    }

    #[test]
    fn test_map_stays_inside_source() {
        let lens = LensModel::new(24.0, 12.0, FRAC_PI_3).unwrap();
        let (map, extent) = lens.coordinate_map(64, 64).unwrap();
        assert_eq!(map.valid_count(), 64 * 64);
        assert!((extent.phi_max - (FRAC_PI_3 - deg_to_rad(1.0))).abs() < 1e-12);
        // edge columns sample half a pixel inside the disk border
        let (x0, _) = map.get(0, 0).unwrap();
        let (x1, _) = map.get(63, 0).unwrap();
        assert!((x0 - 0.098).abs() < 1e-3, "x0 = {}", x0);
        assert!((x1 - 62.902).abs() < 1e-3, "x1 = {}", x1);
    }
}
