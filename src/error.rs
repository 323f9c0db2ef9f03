use crate::types::Encoding;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single leveling call. The buffer is left untouched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LevelError {
    /// Encoding tag outside gray8/gray16/gray32/rgb
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// Buffer size disagrees with the slice dimensions
    #[error("Invalid {encoding} buffer: expected {expected} samples, got {actual}")]
    LengthMismatch {
        encoding: Encoding,
        expected: usize,
        actual: usize,
    },

    /// All samples of a channel share one value
    #[error("Flat {channel} channel: every sample is {value}")]
    DegenerateRange { channel: &'static str, value: f64 },
}

/// Error type for one input file, tagged with the stage that failed
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Input could not be read or decoded into a stack
    #[error("{0:#}")]
    LoadFailed(anyhow::Error),

    /// Stack loaded but one or more slices failed to level
    #[error("{failed} of {total} slice(s) failed to level")]
    LevelFailed { failed: usize, total: usize },

    /// Leveled stack could not be written
    #[error("Failed to write {}: {error:#}", path.display())]
    SaveFailed { path: PathBuf, error: anyhow::Error },
}
