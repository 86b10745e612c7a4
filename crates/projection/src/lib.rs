//! Spherical geometry for gore nets.
//!
//! Everything here is pure math producing [`CoordinateMap`]s: per-pixel
//! source lookups that the renderer's resampler turns into images.
//!
//! - [`angle`]: clamped inverse trig and longitude wrapping
//! - [`extent`]: equirectangular pixel convention
//! - [`lens`]: disk image to sphere
//! - [`pole_swap`]: 90° frame rotation
//! - [`kernel`]: per-gore inverse projections
//! - [`gore`]: wedge ownership and clipping

pub mod angle;
pub mod coord_map;
pub mod extent;
pub mod gore;
pub mod kernel;
pub mod lens;
pub mod pole_swap;

pub use coord_map::CoordinateMap;
pub use extent::EquirectExtent;
pub use gore::GoreGeometry;
pub use lens::LensModel;
pub use pole_swap::{PoleSwap, SwapDirection};
