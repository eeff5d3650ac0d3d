//! xBRZ - edge-aware image upscaling for Rust
//!
//! A Rust port of the xBRZ "scale by rules" high-quality image upscaling
//! filter by Zenju: integer magnification (2x-6x) that reconstructs smooth
//! diagonal contours while keeping deliberate hard edges sharp. Designed
//! for pixel art and emulated display buffers, where naive interpolation
//! blurs exactly the edges that matter.
//!
//! # Overview
//!
//! - Rule-based scaling with per-pixel contour classification
//! - Tunable perceptual color metric (luminance weight, equality tolerance)
//! - Alpha channel support
//! - Slice-based processing for caller-side multithreading
//! - Reference nearest-neighbor and bilinear resamplers
//!
//! # Example
//!
//! ```
//! use xbrz::{Image, scale};
//!
//! let src = Image::from_vec(2, 2, vec![0xFF000000; 4]).unwrap();
//! let out = scale::scale_defaults(4, &src, scale::ColorFormat::Argb).unwrap();
//! assert_eq!(out.width(), 8);
//! assert_eq!(out.height(), 8);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use xbrz_core::*;

// Re-export the engine as a module to keep operation names scoped
pub use xbrz_scale as scale;
