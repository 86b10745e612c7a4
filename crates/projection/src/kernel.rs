//! Inverse gore projections.
//!
//! Each formula maps a destination point `(phi_dst, lam_dst)` on the gore
//! canvas back to the source sphere, relative to the gore's central meridian
//! `lam0`. Pulling from the source this way fills every destination pixel
//! exactly once.
//!
//! The forward formulas are kept alongside for the round-trip tests and for
//! callers that need to place a sphere point on a gore.

use gore_common::ProjectionKind;

use crate::angle::{clamped_acos, clamped_asin};

/// Below this planar radius a point is treated as the projection center.
const CENTER_EPS: f64 = 1e-12;

/// Source `(phi, lam)` for destination `(phi_dst, lam_dst)`.
///
/// Orthographic points beyond the unit disk fold radially onto its rim,
/// keeping their azimuth. Equidistant points beyond radius π give `None`.
/// Sinusoidal at the poles yields a non-finite longitude, which the clipper
/// rejects.
pub fn inverse(kind: ProjectionKind, phi_dst: f64, lam_dst: f64, lam0: f64) -> Option<(f64, f64)> {
    let x = lam_dst - lam0;
    let y = phi_dst;
    match kind {
        ProjectionKind::Sinusoidal => Some((y, lam0 + x / y.cos())),
        ProjectionKind::Cassini => {
            let phi = clamped_asin(y.sin() * x.cos());
            let lam = lam0 + x.tan().atan2(y.cos());
            Some((phi, lam))
        }
        ProjectionKind::Orthographic => {
            let raw = x.hypot(y);
            let (x, y, rho) = if raw > 1.0 { (x / raw, y / raw, 1.0) } else { (x, y, raw) };
            azimuthal_inverse(x, y, rho, clamped_asin(rho), lam0)
        }
        ProjectionKind::AzimuthalEquidistant => {
            let rho = x.hypot(y);
            if rho > std::f64::consts::PI {
                return None;
            }
            azimuthal_inverse(x, y, rho, rho, lam0)
        }
    }
}

#[inline]
fn azimuthal_inverse(x: f64, y: f64, rho: f64, c: f64, lam0: f64) -> Option<(f64, f64)> {
    if rho < CENTER_EPS {
        return Some((0.0, lam0));
    }
    let (sin_c, cos_c) = c.sin_cos();
    let phi = clamped_asin(y * sin_c / rho);
    let lam = lam0 + (x * sin_c).atan2(rho * cos_c);
    Some((phi, lam))
}

/// Destination `(phi_dst, lam_dst)` of source `(phi, lam)`.
///
/// Returns `None` where the forward projection is undefined: the far
/// hemisphere for orthographic, the antipode for equidistant.
pub fn forward(kind: ProjectionKind, phi: f64, lam: f64, lam0: f64) -> Option<(f64, f64)> {
    let dlam = lam - lam0;
    let (sin_phi, cos_phi) = phi.sin_cos();
    match kind {
        ProjectionKind::Sinusoidal => Some((phi, lam0 + dlam * cos_phi)),
        ProjectionKind::Cassini => {
            let x = clamped_asin(cos_phi * dlam.sin());
            let y = phi.tan().atan2(dlam.cos());
            Some((y, lam0 + x))
        }
        ProjectionKind::Orthographic => {
            if cos_phi * dlam.cos() < 0.0 {
                return None;
            }
            Some((sin_phi, lam0 + cos_phi * dlam.sin()))
        }
        ProjectionKind::AzimuthalEquidistant => {
            let c = clamped_acos(cos_phi * dlam.cos());
            if c < CENTER_EPS {
                return Some((0.0, lam0));
            }
            let k = c / c.sin();
            if !k.is_finite() {
                return None;
            }
            Some((k * sin_phi, lam0 + k * cos_phi * dlam.sin()))
        }
    }
}

/// Planar distance of a destination point from the gore center, in the
/// projection's own units (radians on the canvas).
#[inline]
pub fn planar_radius(phi_dst: f64, lam_dst: f64, lam0: f64) -> f64 {
    (lam_dst - lam0).hypot(phi_dst)
}
