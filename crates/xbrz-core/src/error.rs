//! Error types for xbrz-core
//!
//! Provides a unified error type for raster-container operations. The
//! scaling engine wraps this in its own error type.

use thiserror::Error;

/// xbrz-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Buffer length does not match the image dimensions
    #[error("buffer holds {actual} pixels, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Result type alias for xbrz-core operations
pub type Result<T> = std::result::Result<T, Error>;
