//! Raster side of the gore pipeline.
//!
//! - [`resample`]: turns a `CoordinateMap` into pixels
//! - [`compose`]: crop, rotate, overlay, resize and flatten
//! - [`png`]: truecolor PNG writer

pub mod compose;
pub mod png;
pub mod resample;

pub use resample::{resample, resample_into};
