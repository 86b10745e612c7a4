//! The closed set of projections a gore can be drawn in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GoreError;

/// Projection used to flatten each gore.
///
/// `Sinusoidal`, `Cassini` and `Orthographic` are the pipeline's core set.
/// `AzimuthalEquidistant` is kept for the polar cap, where it preserves
/// distance from the pole exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionKind {
    Sinusoidal,
    #[default]
    Cassini,
    Orthographic,
    AzimuthalEquidistant,
}

impl ProjectionKind {
    /// All projections, in declaration order.
    pub const ALL: [ProjectionKind; 4] = [
        ProjectionKind::Sinusoidal,
        ProjectionKind::Cassini,
        ProjectionKind::Orthographic,
        ProjectionKind::AzimuthalEquidistant,
    ];

    /// Get the projection name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sinusoidal => "sinusoidal",
            Self::Cassini => "cassini",
            Self::Orthographic => "orthographic",
            Self::AzimuthalEquidistant => "azimuthal_equidistant",
        }
    }
}

impl FromStr for ProjectionKind {
    type Err = GoreError;

    /// Parse from string (case-insensitive, `-`/space accepted for `_`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "sinusoidal" => Ok(Self::Sinusoidal),
            "cassini" => Ok(Self::Cassini),
            "orthographic" => Ok(Self::Orthographic),
            "azimuthal_equidistant" | "equidistant" => Ok(Self::AzimuthalEquidistant),
            _ => Err(GoreError::UnsupportedProjection(s.to_string())),
        }
    }
}

impl fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
