//! Failure taxonomy for the engine.
//!
//! Everything here is a caller contract violation; there is no retry path.
//! Degenerate geometry (a shape that clips to nothing) is deliberately not an
//! error - the solver and scorer treat it as a no-op candidate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Bitmaps must share dimensions to be compared
    #[error("bitmap size mismatch: expected {expected_width}x{expected_height}, got {actual_width}x{actual_height}")]
    SizeMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    /// A pixel payload whose length disagrees with its stated dimensions
    #[error("pixel buffer holds {actual} pixels, which does not match {width}x{height}")]
    BadPixelCount { width: u32, height: u32, actual: usize },

    /// A step was requested with nothing to sample from
    #[error("step configuration needs at least one shape kind")]
    EmptyShapeTypes,

    /// A step was requested with zero candidates per step
    #[error("step configuration needs at least one candidate shape per step")]
    ZeroCandidates,

    /// A wire shape-kind id outside the 0-6 factory mapping
    #[error("unknown shape kind id {0}")]
    UnknownShapeKind(u8),

    /// A step was requested before any target image was set
    #[error("no target image has been set")]
    NoTargetImage,
}
