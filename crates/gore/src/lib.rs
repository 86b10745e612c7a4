//! Gore rosette pipeline.
//!
//! Takes a disk-shaped image of the inside of a sphere (a fundus
//! photograph, say) and lays it out as a flower of gores around the pole,
//! with a round cap over the point where the gores meet.
//!
//! Stages, in order:
//!
//! 1. [`preprocess`]: downscale, pre-rotate, flatten
//! 2. [`equi`]: lens disk to equirectangular
//! 3. [`swap_to_pole`]: move the optical axis to the pole
//! 4. [`make_polar`]: project, clip and arrange the gores
//! 5. [`polecap`]: cap over the converging pole
//!
//! [`make_rotary`] runs all of them with cancellation and progress.

pub mod control;
pub mod equatorial;
pub mod equi;
pub mod polar;
pub mod polecap;
pub mod preprocess;
pub mod rotary;
pub mod swap;

pub use control::{CancellationToken, Outcome, PipelineControl, ProgressFn, RotaryOutcome, Stage};
pub use equatorial::make_equatorial;
pub use equi::{equi, EquiImage};
pub use polar::make_polar;
pub use polecap::polecap;
pub use preprocess::preprocess;
pub use rotary::make_rotary;
pub use swap::{swap, swap_from_pole, swap_to_pole};

pub use gore_common::{GoreError, GoreResult, InterpolationMethod, PipelineParameters, ProjectionKind};
