//! Pipeline configuration.
//!
//! Angles inside [`PipelineParameters`] are radians. The YAML file format and
//! the `GORE_*` environment variables take degrees, which is what people
//! actually type.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{GoreError, GoreResult};
use crate::projection_kind::ProjectionKind;

/// Sampling method used by the resampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMethod {
    /// Nearest neighbor (exact source values).
    Nearest,
    /// Bilinear interpolation of the four neighbors.
    #[default]
    Bilinear,
}

impl FromStr for InterpolationMethod {
    type Err = GoreError;

    /// Parse from string (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "bilinear" => Ok(Self::Bilinear),
            _ => Err(GoreError::invalid_config(
                "interpolation",
                format!("unknown method '{}', expected nearest or bilinear", s),
            )),
        }
    }
}

impl std::fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nearest => write!(f, "nearest"),
            Self::Bilinear => write!(f, "bilinear"),
        }
    }
}

/// Immutable configuration of one `make_rotary` invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParameters {
    /// Lens focal length `d` (same unit as `eye_radius`).
    pub focal_length: f64,

    /// Model eye radius `r`.
    pub eye_radius: f64,

    /// Half field of view of the source disk, radians.
    pub alpha_max: f64,

    /// Number of gores in the rosette.
    pub num_gores: usize,

    /// Angular radius of the uncut polar cap, radians.
    pub phi_no_cut: f64,

    /// Largest angular distance from the converging pole kept in the gores, radians.
    pub alpha_limit: f64,

    /// Projection of each gore.
    pub projection: ProjectionKind,

    /// Projection of the polar cap.
    pub cap_projection: ProjectionKind,

    /// Pre-rotation of the source image, degrees counter-clockwise.
    pub rotation_deg: f64,

    /// Downscale fraction applied before projecting, in (0, 1].
    pub quality: f64,

    /// Flatten transparency onto this color before projecting.
    pub background: Option<Color>,

    pub interpolation: InterpolationMethod,
}

impl Default for PipelineParameters {
    fn default() -> Self {
        Self {
            focal_length: 24.0,
            eye_radius: 12.0,
            alpha_max: 32f64.to_radians(),
            num_gores: 6,
            phi_no_cut: 10f64.to_radians(),
            alpha_limit: 100f64.to_radians(),
            projection: ProjectionKind::Cassini,
            cap_projection: ProjectionKind::Orthographic,
            rotation_deg: 0.0,
            quality: 0.2,
            background: None,
            interpolation: InterpolationMethod::Bilinear,
        }
    }
}

impl PipelineParameters {
    /// Defaults overridden by `GORE_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `GORE_*` environment variables on top of `self`.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides read through `lookup`. Values that fail to parse are ignored.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let number = |key: &str| lookup(key).and_then(|v| v.trim().parse::<f64>().ok());

        if let Some(v) = number("GORE_FOCAL_LENGTH") {
            self.focal_length = v;
        }
        if let Some(v) = number("GORE_EYE_RADIUS") {
            self.eye_radius = v;
        }
        if let Some(v) = number("GORE_ALPHA_MAX_DEG") {
            self.alpha_max = v.to_radians();
        }
        if let Some(v) = lookup("GORE_NUM_GORES").and_then(|v| v.trim().parse().ok()) {
            self.num_gores = v;
        }
        if let Some(v) = number("GORE_PHI_NO_CUT_DEG") {
            self.phi_no_cut = v.to_radians();
        }
        if let Some(v) = number("GORE_ALPHA_LIMIT_DEG") {
            self.alpha_limit = v.to_radians();
        }
        if let Some(v) = lookup("GORE_PROJECTION").and_then(|v| v.parse().ok()) {
            self.projection = v;
        }
        if let Some(v) = lookup("GORE_CAP_PROJECTION").and_then(|v| v.parse().ok()) {
            self.cap_projection = v;
        }
        if let Some(v) = number("GORE_ROTATION_DEG") {
            self.rotation_deg = v;
        }
        if let Some(v) = number("GORE_QUALITY") {
            self.quality = v;
        }
        if let Some(v) = lookup("GORE_BACKGROUND") {
            if v.trim().eq_ignore_ascii_case("none") {
                self.background = None;
            } else if let Ok(color) = v.parse() {
                self.background = Some(color);
            }
        }
        if let Some(v) = lookup("GORE_INTERPOLATION").and_then(|v| v.parse().ok()) {
            self.interpolation = v;
        }

        self
    }

    /// Defaults overridden by a YAML document (angles in degrees).
    pub fn from_yaml_str(yaml: &str) -> GoreResult<Self> {
        let file: ParametersFile = serde_yaml::from_str(yaml)?;
        Ok(file.apply(Self::default()))
    }

    /// Defaults overridden by a YAML file (angles in degrees).
    pub fn from_yaml_file(path: impl AsRef<Path>) -> GoreResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| GoreError::ConfigFile(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml_str(&contents)
    }

    /// Check every parameter range. Lens-specific degeneracy is checked by the lens model.
    pub fn validate(&self) -> GoreResult<()> {
        if !(self.focal_length.is_finite() && self.focal_length > 0.0) {
            return Err(GoreError::invalid_config("focal_length", "must be > 0"));
        }
        if !(self.eye_radius.is_finite() && self.eye_radius > 0.0) {
            return Err(GoreError::invalid_config("eye_radius", "must be > 0"));
        }
        if !(self.alpha_max > 0.0 && self.alpha_max < std::f64::consts::PI) {
            return Err(GoreError::invalid_config(
                "alpha_max",
                format!("must be in (0, pi), got {}", self.alpha_max),
            ));
        }
        if self.num_gores == 0 {
            return Err(GoreError::invalid_config("num_gores", "must be >= 1"));
        }
        if !(self.alpha_limit > 0.0 && self.alpha_limit <= std::f64::consts::PI) {
            return Err(GoreError::invalid_config(
                "alpha_limit",
                format!("must be in (0, pi], got {}", self.alpha_limit),
            ));
        }
        if !(self.phi_no_cut >= 0.0 && self.phi_no_cut <= self.alpha_limit) {
            return Err(GoreError::invalid_config(
                "phi_no_cut",
                format!(
                    "must be in [0, alpha_limit = {}], got {}",
                    self.alpha_limit, self.phi_no_cut
                ),
            ));
        }
        if !self.rotation_deg.is_finite() {
            return Err(GoreError::invalid_config("rotation_deg", "must be finite"));
        }
        if !(self.quality > 0.0 && self.quality <= 1.0) {
            return Err(GoreError::invalid_config(
                "quality",
                format!("must be in (0, 1], got {}", self.quality),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// YAML file format
// ============================================================================

/// On-disk form of [`PipelineParameters`]. Every field is optional and angles
/// are degrees.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParametersFile {
    pub focal_length: Option<f64>,
    pub eye_radius: Option<f64>,
    pub alpha_max_deg: Option<f64>,
    pub num_gores: Option<usize>,
    pub phi_no_cut_deg: Option<f64>,
    pub alpha_limit_deg: Option<f64>,
    pub projection: Option<ProjectionKind>,
    pub cap_projection: Option<ProjectionKind>,
    pub rotation_deg: Option<f64>,
    pub quality: Option<f64>,
    pub background: Option<Color>,
    pub interpolation: Option<InterpolationMethod>,
}

impl ParametersFile {
    /// Overlay the fields present in the file onto `base`.
    pub fn apply(self, mut base: PipelineParameters) -> PipelineParameters {
        if let Some(v) = self.focal_length {
            base.focal_length = v;
        }
        if let Some(v) = self.eye_radius {
            base.eye_radius = v;
        }
        if let Some(v) = self.alpha_max_deg {
            base.alpha_max = v.to_radians();
        }
        if let Some(v) = self.num_gores {
            base.num_gores = v;
        }
        if let Some(v) = self.phi_no_cut_deg {
            base.phi_no_cut = v.to_radians();
        }
        if let Some(v) = self.alpha_limit_deg {
            base.alpha_limit = v.to_radians();
        }
        if let Some(v) = self.projection {
            base.projection = v;
        }
        if let Some(v) = self.cap_projection {
            base.cap_projection = v;
        }
        if let Some(v) = self.rotation_deg {
            base.rotation_deg = v;
        }
        if let Some(v) = self.quality {
            base.quality = v;
        }
        if self.background.is_some() {
            base.background = self.background;
        }
        if let Some(v) = self.interpolation {
            base.interpolation = v;
        }
        base
    }
}
