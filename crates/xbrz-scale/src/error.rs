//! Error types for xbrz-scale

use thiserror::Error;

/// Errors that can occur during scaling
#[derive(Debug, Error)]
pub enum ScaleError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] xbrz_core::Error),

    /// Scale factor outside the supported range
    #[error("invalid scale factor: {0} (supported range: 2-6)")]
    InvalidScaleFactor(u32),

    /// Target buffer length does not match the requested slice
    #[error("target buffer holds {actual} pixels, expected {expected}")]
    TargetSize { expected: usize, actual: usize },
}

/// Result type for scaling operations
pub type ScaleResult<T> = Result<T, ScaleError>;
