//! Common types shared by every gore-net crate.
//!
//! - [`GoreError`] / [`GoreResult`]: the single error type of the pipeline
//! - [`PipelineParameters`]: the immutable configuration of one run
//! - [`ProjectionKind`]: the closed set of gore projections
//! - [`Color`]: opaque background color used for flattening

pub mod color;
pub mod config;
pub mod error;
pub mod projection_kind;

pub use color::Color;
pub use config::{InterpolationMethod, ParametersFile, PipelineParameters};
pub use error::{GoreError, GoreResult};
pub use projection_kind::ProjectionKind;
