//! Tests for gore wedge ownership and the per-gore projections.

use std::f64::consts::PI;

use gore_common::ProjectionKind;
use projection::{kernel, EquirectExtent, GoreGeometry};
use test_utils::{all_projections, assert_angles_approx_eq};

// ============================================================================
// Wedge exclusivity
// ============================================================================

#[test]
fn test_every_column_has_one_owner() {
    for n in 3..=12 {
        let geo = GoreGeometry::new(EquirectExtent::full_sphere(), n).unwrap();
        let width = 360;
        let mut counts = vec![0usize; n];
        for col in 0..width {
            counts[geo.owning_gore(col, width)] += 1;
        }
        assert!(counts.iter().all(|&c| c > 0), "n={} counts={:?}", n, counts);
        assert_eq!(counts.iter().sum::<usize>(), width as usize);
    }
}

#[test]
fn test_owners_match_rosette_strips() {
    // the rosette crops gore g from columns [g * W / n, (g + 1) * W / n)
    let geo = GoreGeometry::new(EquirectExtent::full_sphere(), 6).unwrap();
    let width = 1024;
    let strip = (width / 6) as u32;
    for g in 0..6 {
        for col in g as u32 * strip..(g as u32 + 1) * strip {
            assert_eq!(geo.owning_gore(col, width), g, "column {}", col);
        }
    }
    for col in 6 * strip..width {
        assert_eq!(geo.owning_gore(col, width), 5, "column {}", col);
    }
}

#[test]
fn test_equator_sample_kept_by_exactly_one_gore() {
    let extent = EquirectExtent::full_sphere();
    let width = 360;
    for kind in [
        ProjectionKind::Sinusoidal,
        ProjectionKind::Cassini,
        ProjectionKind::AzimuthalEquidistant,
    ] {
        for n in 3..=8 {
            let geo = GoreGeometry::new(extent, n).unwrap();
            for col in 0..width {
                let lam_dst = extent.column_to_lam(col as f64, width);
                let keepers = (0..n)
                    .filter(|&g| {
                        let lam0 = geo.meridian(g);
                        kernel::inverse(kind, 0.0, lam_dst, lam0)
                            .map_or(false, |(_, lam)| geo.in_wedge(lam0, lam))
                    })
                    .count();
                assert_eq!(keepers, 1, "{} n={} column {}", kind, n, col);
            }
        }
    }
}

#[test]
fn test_clipped_canvas_stays_inside_owner_wedge() {
    let (w, h) = (240, 120);
    for (label, kind) in all_projections() {
        let geo = GoreGeometry::new(EquirectExtent::full_sphere(), 6).unwrap();
        for row in (0..h).step_by(7) {
            for col in (0..w).step_by(5) {
                if let Some((_, lam)) = geo.clip(kind, col, row, w, h) {
                    let lam0 = geo.meridian(geo.owning_gore(col, w));
                    assert!((lam - lam0).abs() <= geo.gore_width / 2.0, "{} ({}, {})", label, col, row);
                }
            }
        }
    }
}

#[test]
fn test_alpha_limit_clears_far_rows() {
    let geo = GoreGeometry::new(EquirectExtent::full_sphere(), 6)
        .unwrap()
        .with_alpha_limit(PI / 2.0);
    let (w, h) = (120, 60);
    let map = geo.coordinate_map(ProjectionKind::Sinusoidal, w, h);
    // rows past the equator are farther than 90° from the top pole
    for row in 31..h {
        for col in 0..w {
            assert!(map.get(col, row).is_none(), "({}, {}) kept", col, row);
        }
    }
    assert!(map.get(10, 20).is_some());
}

// ============================================================================
// Projection round trips
// ============================================================================

#[test]
fn test_inverse_then_forward_round_trips() {
    let lam0 = 1.0;
    for (label, kind) in all_projections() {
        for &(phi, dx) in &[(0.0, 0.2), (0.4, -0.3), (-0.7, 0.1), (0.2, 0.45)] {
            let (phi_src, lam_src) = kernel::inverse(kind, phi, lam0 + dx, lam0)
                .unwrap_or_else(|| panic!("{} undefined at ({}, {})", label, phi, dx));
            let (phi_back, lam_back) = kernel::forward(kind, phi_src, lam_src, lam0).unwrap();
            assert_angles_approx_eq!((phi_back, lam_back), (phi, lam0 + dx), 1e-9);
        }
    }
}
