//! xbrz-scale - edge-aware rule-based image upscaling
//!
//! A port of the xBRZ "scale by rules" filter by Zenju. The engine maps a
//! source raster to an integer-scaled raster (factors 2 through 6),
//! reconstructing smooth diagonal contours while keeping deliberate hard
//! edges sharp - the kind of magnification naive interpolation destroys on
//! pixel art and emulated display buffers.
//!
//! Per source pixel the engine:
//!
//! 1. samples a 4x4 neighborhood with edge replication at the borders
//!    ([`neighborhood`]),
//! 2. classifies the local contour from perceptual color-similarity
//!    judgments into per-corner blend strengths ([`pattern`], [`metric`]),
//! 3. writes the factor x factor output cell through fixed per-factor
//!    weight tables ([`matrix`]).
//!
//! One classification path written for a single corner orientation serves
//! all four corners through rotated coordinate views.
//!
//! Parallelism is the caller's job: disjoint row slices of the same image
//! can be scaled concurrently via [`scale_slice`], each writing its own
//! target chunk. See the slice driver in [`engine`] for the halo contract.
//!
//! # Example
//!
//! ```
//! use xbrz_core::Image;
//! use xbrz_scale::{ColorFormat, scale_defaults};
//!
//! let src = Image::from_vec(2, 2, vec![0xFF0000FF; 4]).unwrap();
//! let out = scale_defaults(3, &src, ColorFormat::Argb).unwrap();
//! assert_eq!(out.width(), 6);
//! assert_eq!(out.height(), 6);
//! ```

pub mod config;
pub mod convert;
pub mod engine;
mod error;
pub mod matrix;
pub mod metric;
pub mod neighborhood;
pub mod pattern;
pub mod reference;

pub use config::{ColorFormat, SCALE_FACTOR_MAX, SCALE_FACTOR_MIN, ScalerCfg};
pub use convert::{argb_to_rgba, rgba_to_argb};
pub use engine::{scale, scale_defaults, scale_slice};
pub use error::{ScaleError, ScaleResult};
pub use metric::equal_color_test;
pub use reference::{bilinear_scale, nearest_neighbor_scale};
