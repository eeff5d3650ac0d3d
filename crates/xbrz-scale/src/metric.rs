//! Perceptual color metric
//!
//! Distance between two packed colors in YCbCr space (ITU-R BT.2020
//! coefficients), with the luminance term scaled by the configurable
//! `luminance_weight`. Channel differences are quantized to even values and
//! the result is narrowed to f32 before use; the cached table is a pure
//! memoization of that same function, so the buffered and unbuffered paths
//! agree bit for bit.
//!
//! The division by 255 usual for YCbCr is skipped to keep the value range
//! comparable to plain per-channel distances (tolerances are calibrated
//! against that range).

use crate::config::ColorFormat;
use std::sync::OnceLock;
use xbrz_core::color::{alpha, blue, green, red};

const K_B: f64 = 0.0593; // ITU-R BT.2020 conversion
const K_R: f64 = 0.2627; //

/// YCbCr distance of a channel-difference vector.
fn dist_ycbcr(r_diff: i32, g_diff: i32, b_diff: i32, luma_weight: f64) -> f64 {
    // YCbCr conversion is a matrix multiplication: take advantage of
    // linearity by operating on the channel differences directly.
    let k_g = 1.0 - K_B - K_R;
    let scale_b = 0.5 / (1.0 - K_B);
    let scale_r = 0.5 / (1.0 - K_R);

    let y = K_R * r_diff as f64 + k_g * g_diff as f64 + K_B * b_diff as f64;
    let c_b = scale_b * (b_diff as f64 - y);
    let c_r = scale_r * (r_diff as f64 - y);

    let yw = luma_weight * y;
    (yw * yw + c_b * c_b + c_r * c_r).sqrt()
}

/// Quantize a channel difference to the nearest even value toward zero.
///
/// Maps 0 to 0 (keeps the metric reflexive) and -d to -quantize(d) (keeps
/// it symmetric), while halving the index space of the cached table.
#[inline]
fn quantize(diff: i32) -> i32 {
    diff / 2 * 2
}

/// Three-channel distance, computed inline.
#[inline]
fn dist_rgb_inline(pix1: u32, pix2: u32, luma_weight: f64) -> f64 {
    let r_diff = quantize(red(pix1) as i32 - red(pix2) as i32);
    let g_diff = quantize(green(pix1) as i32 - green(pix2) as i32);
    let b_diff = quantize(blue(pix1) as i32 - blue(pix2) as i32);
    dist_ycbcr(r_diff, g_diff, b_diff, luma_weight) as f32 as f64
}

/// Cached distances for every quantized difference vector, one byte per
/// channel. Built once per process, read-only afterwards; ~64 MiB.
static DIST_TABLE: OnceLock<Vec<f32>> = OnceLock::new();

fn dist_table() -> &'static [f32] {
    DIST_TABLE.get_or_init(|| {
        let mut tab = Vec::with_capacity(1 << 24);
        for i in 0..1u32 << 24 {
            let r_diff = (((i >> 16) & 0xff) as i32 - 127) * 2;
            let g_diff = (((i >> 8) & 0xff) as i32 - 127) * 2;
            let b_diff = ((i & 0xff) as i32 - 127) * 2;
            tab.push(dist_ycbcr(r_diff, g_diff, b_diff, 1.0) as f32);
        }
        tab
    })
}

/// Three-channel distance, served from the cached table.
///
/// Only valid for the default luminance weight the table was built with.
#[inline]
fn dist_rgb_buffered(pix1: u32, pix2: u32) -> f64 {
    let r_diff = red(pix1) as i32 - red(pix2) as i32;
    let g_diff = green(pix1) as i32 - green(pix2) as i32;
    let b_diff = blue(pix1) as i32 - blue(pix2) as i32;

    let index = (((r_diff / 2 + 127) as usize) << 16)
        | (((g_diff / 2 + 127) as usize) << 8)
        | (b_diff / 2 + 127) as usize;
    dist_table()[index] as f64
}

/// Color-distance judge for one scaling call.
///
/// Holds the format and luminance weight; all comparisons during a call go
/// through [`ColorMetric::dist`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColorMetric {
    format: ColorFormat,
    luminance_weight: f64,
    use_table: bool,
}

impl ColorMetric {
    pub(crate) fn new(format: ColorFormat, luminance_weight: f64) -> Self {
        // The table is built for the default weight; other weights compute
        // inline on every format, which keeps the paths interchangeable.
        let use_table = format.buffered() && luminance_weight == 1.0;
        ColorMetric {
            format,
            luminance_weight,
            use_table,
        }
    }

    #[inline]
    fn base_dist(&self, pix1: u32, pix2: u32) -> f64 {
        if self.use_table {
            dist_rgb_buffered(pix1, pix2)
        } else {
            dist_rgb_inline(pix1, pix2, self.luminance_weight)
        }
    }

    /// Perceptual distance between two packed colors.
    ///
    /// For alpha-carrying formats the chroma/luma distance is weighted by
    /// the smaller alpha and the alpha gap is added: two colors are only as
    /// distinguishable as the more transparent one allows, and differing
    /// coverage is itself a difference.
    #[inline]
    pub(crate) fn dist(&self, pix1: u32, pix2: u32) -> f64 {
        let d = self.base_dist(pix1, pix2);
        if !self.format.has_alpha() {
            return d;
        }
        let a1 = alpha(pix1) as f64;
        let a2 = alpha(pix2) as f64;
        if a1 < a2 {
            a1 / 255.0 * d + (a2 - a1)
        } else {
            a2 / 255.0 * d + (a1 - a2)
        }
    }
}

/// Test whether two colors count as "equal" for edge detection.
///
/// Standalone exposure of the engine's color metric for parameter tuning
/// and diagnostics: returns true iff the weighted distance between the two
/// colors is at most `tolerance`. Reflexive for any tolerance >= 0 and
/// symmetric in its color arguments.
///
/// # See also
///
/// C++ xBRZ: `xbrz_equalColorTest()` in `xbrz.h`
pub fn equal_color_test(
    col1: u32,
    col2: u32,
    format: ColorFormat,
    luminance_weight: f64,
    tolerance: f64,
) -> bool {
    ColorMetric::new(format, luminance_weight).dist(col1, col2) <= tolerance
}
