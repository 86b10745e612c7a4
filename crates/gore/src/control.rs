//! Cooperative cancellation and progress reporting.
//!
//! The pipeline polls a [`CancellationToken`] at stage boundaries and
//! between gores. Progress is pushed synchronously to an optional observer;
//! there is no global state, so independent runs never see each other.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use image::RgbaImage;
use tracing::warn;

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Takes effect at the next checkpoint.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Heavy pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    LensProjecting,
    PoleSwapping,
    GoreAssembling,
    CapGenerating,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::LensProjecting,
        Stage::PoleSwapping,
        Stage::GoreAssembling,
        Stage::CapGenerating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::LensProjecting => "lens_projecting",
            Stage::PoleSwapping => "pole_swapping",
            Stage::GoreAssembling => "gore_assembling",
            Stage::CapGenerating => "cap_generating",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of a computation that may be cancelled.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Completed(T),
    Cancelled,
}

impl<T> Outcome<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }

    /// The completed value, if any.
    pub fn completed(self) -> Option<T> {
        match self {
            Outcome::Completed(value) => Some(value),
            Outcome::Cancelled => None,
        }
    }
}

/// Outcome of `make_rotary`.
pub type RotaryOutcome = Outcome<RgbaImage>;

/// Progress observer signature.
pub type ProgressFn<'a> = &'a (dyn Fn(Stage) + Sync);

/// Cancellation token and progress observer for one run.
#[derive(Clone, Copy, Default)]
pub struct PipelineControl<'a> {
    token: Option<&'a CancellationToken>,
    progress: Option<ProgressFn<'a>>,
}

impl<'a> PipelineControl<'a> {
    /// No cancellation, no progress.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_cancellation(mut self, token: &'a CancellationToken) -> Self {
        self.token = Some(token);
        self
    }

    pub fn with_progress(mut self, progress: ProgressFn<'a>) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.map_or(false, CancellationToken::is_cancelled)
    }

    /// Checkpoint before `stage`: false if cancelled, otherwise reports the
    /// stage and returns true.
    pub fn begin(&self, stage: Stage) -> bool {
        if self.is_cancelled() {
            warn!(stage = %stage, "Cancellation observed, stopping pipeline");
            return false;
        }
        if let Some(progress) = self.progress {
            progress(stage);
        }
        true
    }
}

impl fmt::Debug for PipelineControl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineControl")
            .field("cancelled", &self.is_cancelled())
            .field("has_progress", &self.progress.is_some())
            .finish()
    }
}
