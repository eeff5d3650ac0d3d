//! Scaler configuration
//!
//! Tuning parameters for the color metric and pattern classifier, plus the
//! color-format selector. All values are plain data, constructed once per
//! call and never mutated by the engine.

/// Smallest supported scale factor.
pub const SCALE_FACTOR_MIN: u32 = 2;

/// Largest supported scale factor.
pub const SCALE_FACTOR_MAX: u32 = 6;

/// Color format of the source and target pixels.
///
/// Selects the alpha handling of the color metric and gradient, and whether
/// the perceptual distance is served from the process-wide cached table or
/// computed inline. The cached and inline paths produce bit-identical
/// output; they differ only in one-time setup cost versus per-call compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFormat {
    /// Three channels, upper 8 bits unused
    Rgb,
    /// Four channels including alpha; distances served from the cached table
    Argb,
    /// Like `Argb`, but skips the one-time distance-table construction at
    /// the expense of slightly slower scaling - useful for one-shot calls
    ArgbUnbuffered,
}

impl ColorFormat {
    /// Whether this format carries an alpha channel.
    #[inline]
    pub fn has_alpha(self) -> bool {
        matches!(self, ColorFormat::Argb | ColorFormat::ArgbUnbuffered)
    }

    /// Whether distance lookups may use the cached table.
    #[inline]
    pub(crate) fn buffered(self) -> bool {
        matches!(self, ColorFormat::Rgb | ColorFormat::Argb)
    }
}

/// Tuning parameters for the scaler.
///
/// The defaults are the calibrated values of the original rule set; most
/// callers will use `ScalerCfg::default()`.
#[derive(Debug, Clone)]
pub struct ScalerCfg {
    /// Channel weighting of the color metric; larger values penalize
    /// luminance differences more than chroma differences.
    pub luminance_weight: f64,
    /// Maximum weighted color distance still considered "equal".
    pub equal_color_tolerance: f64,
    /// Weight of the center pixel pair when comparing the two diagonal
    /// contour hypotheses of a 2x2 quad.
    pub center_direction_bias: f64,
    /// Ratio by which one contour direction must beat the other before a
    /// weak blend is upgraded to a strong (dominant) blend.
    pub dominant_direction_threshold: f64,
    /// Ratio deciding whether a detected line runs shallow and/or steep
    /// through the output cell.
    pub steep_direction_threshold: f64,
}

impl Default for ScalerCfg {
    fn default() -> Self {
        Self {
            luminance_weight: 1.0,
            equal_color_tolerance: 30.0,
            center_direction_bias: 4.0,
            dominant_direction_threshold: 3.6,
            steep_direction_threshold: 2.2,
        }
    }
}
