//! Angle helpers shared by every projection.
//!
//! Spherical rounding routinely pushes `asin`/`acos` arguments a few ULPs
//! past ±1, so every inverse trig call in the workspace goes through the
//! clamped variants here.

use num_traits::{Float, FloatConst};

/// Degrees to radians.
#[inline]
pub fn deg_to_rad<T: Float>(deg: T) -> T {
    deg.to_radians()
}

/// Radians to degrees.
#[inline]
pub fn rad_to_deg<T: Float>(rad: T) -> T {
    rad.to_degrees()
}

/// `asin` with its argument clamped into `[-1, 1]`. NaN passes through.
#[inline]
pub fn clamped_asin<T: Float>(x: T) -> T {
    clamp_unit(x).asin()
}

/// `acos` with its argument clamped into `[-1, 1]`. NaN passes through.
#[inline]
pub fn clamped_acos<T: Float>(x: T) -> T {
    clamp_unit(x).acos()
}

#[inline]
fn clamp_unit<T: Float>(x: T) -> T {
    if x > T::one() {
        T::one()
    } else if x < -T::one() {
        -T::one()
    } else {
        x
    }
}

/// Wrap a longitude into `[lam_min, lam_min + 2π)`.
#[inline]
pub fn wrap_longitude<T: Float + FloatConst>(lam: T, lam_min: T) -> T {
    let two_pi = T::PI() + T::PI();
    let offset = lam - lam_min;
    let wrapped = lam_min + offset - (offset / two_pi).floor() * two_pi;
    // tiny negative offsets can round up to exactly 2π
    if wrapped >= lam_min + two_pi || wrapped < lam_min {
        lam_min
    } else {
        wrapped
    }
}

/// Great-circle distance between two points on the unit sphere, radians.
#[inline]
pub fn angular_distance(phi1: f64, lam1: f64, phi2: f64, lam2: f64) -> f64 {
    let cos_c = phi1.sin() * phi2.sin() + phi1.cos() * phi2.cos() * (lam1 - lam2).cos();
    clamped_acos(cos_c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_degree_conversion() {
        assert!((deg_to_rad(180.0_f64) - PI).abs() < 1e-15);
        assert!((rad_to_deg(FRAC_PI_2) - 90.0).abs() < 1e-12);
        assert!((deg_to_rad(90.0_f32) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_clamped_asin_overshoot() {
        assert_eq!(clamped_asin(1.0 + 1e-12), FRAC_PI_2);
        assert_eq!(clamped_asin(-1.0 - 1e-12), -FRAC_PI_2);
        assert!(clamped_asin(f64::NAN).is_nan());
    }

    #[test]
    fn test_clamped_acos_overshoot() {
        assert_eq!(clamped_acos(1.0 + 4.0 * f64::EPSILON), 0.0);
        assert_eq!(clamped_acos(-1.5), PI);
    }

    #[test]
    fn test_wrap_longitude() {
        assert!((wrap_longitude(-0.5, 0.0) - (2.0 * PI - 0.5)).abs() < 1e-12);
        assert!((wrap_longitude(3.0 * PI, -PI) - (-PI)).abs() < 1e-12);
        assert_eq!(wrap_longitude(0.25, 0.0), 0.25);
        let w = wrap_longitude(-1e-18, 0.0);
        assert!((0.0..2.0 * PI).contains(&w));
    }

    #[test]
    fn test_angular_distance() {
        assert!((angular_distance(0.0, 0.0, FRAC_PI_2, 1.0) - FRAC_PI_2).abs() < 1e-12);
        assert!((angular_distance(0.0, -PI, 0.0, PI)).abs() < 1e-12);
    }
}
