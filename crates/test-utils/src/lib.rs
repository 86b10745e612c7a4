//! Shared test utilities for the gore-net workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic image generators (disks, equirectangular patterns)
//! - Parameter fixtures for the standard scenarios
//! - Approximate-equality assertions
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{uniform_disk, fixtures};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Macro for approximate equality of `(phi, lam)` pairs.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_angles_approx_eq;
///
/// assert_angles_approx_eq!((0.5001, 1.0001), (0.5, 1.0), 0.001);
/// ```
#[macro_export]
macro_rules! assert_angles_approx_eq {
    (($phi1:expr, $lam1:expr), ($phi2:expr, $lam2:expr), $epsilon:expr) => {{
        $crate::assert_approx_eq!($phi1, $phi2, $epsilon);
        $crate::assert_approx_eq!($lam1, $lam2, $epsilon);
    }};
}
