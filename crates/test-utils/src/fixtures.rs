//! Common test fixtures for gore-net tests.
//!
//! Parameter sets for the scenarios the pipeline is expected to handle.

use std::f64::consts::{FRAC_PI_3, PI};

use gore_common::{InterpolationMethod, PipelineParameters, ProjectionKind};

/// Six Sinusoidal gores over a 60° half-angle disk, no cap, nothing clipped.
///
/// Quality is 1.0 so the output size follows the input size exactly.
pub fn six_gore_sinusoidal() -> PipelineParameters {
    PipelineParameters {
        alpha_max: FRAC_PI_3,
        num_gores: 6,
        phi_no_cut: 0.0,
        alpha_limit: PI,
        projection: ProjectionKind::Sinusoidal,
        quality: 1.0,
        ..Default::default()
    }
}

/// Same as [`six_gore_sinusoidal`] with a 30° orthographic cap.
pub fn six_gore_with_cap() -> PipelineParameters {
    PipelineParameters {
        phi_no_cut: 30f64.to_radians(),
        ..six_gore_sinusoidal()
    }
}

/// Cheap parameters for tests that only care about control flow.
pub fn fast_parameters() -> PipelineParameters {
    PipelineParameters {
        num_gores: 4,
        quality: 1.0,
        interpolation: InterpolationMethod::Nearest,
        ..six_gore_sinusoidal()
    }
}

/// Every projection paired with a label, for table-driven tests.
pub fn all_projections() -> Vec<(&'static str, ProjectionKind)> {
    ProjectionKind::ALL.iter().map(|k| (k.as_str(), *k)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_validate() {
        for params in [six_gore_sinusoidal(), six_gore_with_cap(), fast_parameters()] {
            assert!(params.validate().is_ok(), "{:?}", params);
        }
    }

    #[test]
    fn test_all_projections_labels() {
        let labels: Vec<_> = all_projections().into_iter().map(|(l, _)| l).collect();
        assert!(labels.contains(&"cassini"));
        assert_eq!(labels.len(), 4);
    }
}
