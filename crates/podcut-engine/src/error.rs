//! Engine error types.

use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Windowing parameters that would loop forever or produce degenerate
    /// windows. Fatal: the caller must not proceed.
    #[error(
        "invalid windowing: overlap ({overlap_secs}s) must be shorter than the window ({window_secs}s)"
    )]
    InvalidWindowing {
        window_secs: f64,
        overlap_secs: f64,
    },

    /// Reconciliation left nothing (or almost nothing) to keep. Fatal: abort
    /// instead of writing an empty output file.
    #[error("cut would remove everything: {removed_secs:.1}s of {total_secs:.1}s flagged for removal")]
    DestructiveResult {
        removed_secs: f64,
        total_secs: f64,
    },
}
