//! Pattern classification
//!
//! Turns neighbor-similarity judgments into discrete per-corner blend
//! strengths. Each 2x2 quad of source pixels shares one corner point; the
//! classifier decides, for each of the four pixels, how strongly that pixel
//! should blend across the corner: not at all (hard edge), weakly, or
//! strongly (confident diagonal contour).
//!
//! The result for a pixel is packed into one byte ([`BlendInfo`], four
//! corners at two bits each) so the slice driver can carry corner decisions
//! between adjacent pixels and rows and classify every quad exactly once.

use crate::config::ScalerCfg;
use crate::metric::ColorMetric;
use crate::neighborhood::{Kernel4x4, Rotation};

/// Blend strength for one corner of a pixel's output cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum BlendType {
    /// No blend - preserve a hard edge
    #[default]
    None = 0,
    /// Partial diagonal blend - smooths a shallow or aliased edge
    Normal = 1,
    /// Full diagonal blend - a confidently detected diagonal contour
    Dominant = 2,
}

impl BlendType {
    #[inline]
    fn from_bits(v: u8) -> BlendType {
        match v & 0x3 {
            0 => BlendType::None,
            1 => BlendType::Normal,
            _ => BlendType::Dominant,
        }
    }
}

/// Blend strengths of a quad's four pixels at their shared corner.
///
/// Field names follow the window layout: `f`, `g`, `j`, `k` are the 2x2
/// quad at the window center, and the strength applies to each pixel's
/// corner facing the quad center (f: bottom-right, g: bottom-left,
/// j: top-right, k: top-left).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlendResult {
    pub f: BlendType,
    pub g: BlendType,
    pub j: BlendType,
    pub k: BlendType,
}

/// The four corner strengths of one pixel, packed two bits per corner.
///
/// Bit layout (low to high): top-left, top-right, bottom-right,
/// bottom-left - one quarter turn per two-bit step, so rotating the pixel
/// rotates the byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlendInfo(u8);

impl BlendInfo {
    pub const NONE: BlendInfo = BlendInfo(0);

    /// Whether any corner blends at all.
    #[inline]
    pub fn any(self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub fn top_l(self) -> BlendType {
        BlendType::from_bits(self.0)
    }

    #[inline]
    pub fn top_r(self) -> BlendType {
        BlendType::from_bits(self.0 >> 2)
    }

    #[inline]
    pub fn bottom_r(self) -> BlendType {
        BlendType::from_bits(self.0 >> 4)
    }

    #[inline]
    pub fn bottom_l(self) -> BlendType {
        BlendType::from_bits(self.0 >> 6)
    }

    #[inline]
    pub fn add_top_l(&mut self, bt: BlendType) {
        self.0 |= bt as u8;
    }

    #[inline]
    pub fn add_top_r(&mut self, bt: BlendType) {
        self.0 |= (bt as u8) << 2;
    }

    #[inline]
    pub fn add_bottom_r(&mut self, bt: BlendType) {
        self.0 |= (bt as u8) << 4;
    }

    #[inline]
    pub fn add_bottom_l(&mut self, bt: BlendType) {
        self.0 |= (bt as u8) << 6;
    }

    /// View the corner byte under a rotation: the canonical bottom-right
    /// accessor then reads the corner that rotation is processing.
    #[inline]
    pub fn rotate(self, rot: Rotation) -> BlendInfo {
        let shift = 2 * rot.quads();
        BlendInfo(self.0.rotate_left(shift))
    }
}

/// Classify the corner shared by the quad f, g, j, k at the window center.
///
/// If either diagonal pixel pair is exactly equal, the area is flat or the
/// edge is axis-aligned and nothing blends. Otherwise the two contour
/// hypotheses (a contour along j-g versus along f-k) are scored by summed
/// color distances over the surrounding ring, the center pair weighted by
/// `center_direction_bias`. The winning direction blends the two pixels cut
/// off by the contour - but only those not exactly equal to their quad
/// neighbors, and upgraded to a dominant blend when the losing score
/// exceeds the winner by `dominant_direction_threshold`. A tie between the
/// hypotheses blends nothing.
pub(crate) fn preprocess_corners(
    ker: &Kernel4x4,
    cfg: &ScalerCfg,
    metric: &ColorMetric,
) -> BlendResult {
    let mut result = BlendResult::default();

    if (ker.f == ker.g && ker.j == ker.k) || (ker.f == ker.j && ker.g == ker.k) {
        return result;
    }

    let dist = |c1: u32, c2: u32| metric.dist(c1, c2);

    let jg = dist(ker.i, ker.f)
        + dist(ker.f, ker.c)
        + dist(ker.n, ker.k)
        + dist(ker.k, ker.h)
        + cfg.center_direction_bias * dist(ker.j, ker.g);
    let fk = dist(ker.e, ker.j)
        + dist(ker.j, ker.o)
        + dist(ker.b, ker.g)
        + dist(ker.g, ker.l)
        + cfg.center_direction_bias * dist(ker.f, ker.k);

    if jg < fk {
        let dominant = cfg.dominant_direction_threshold * jg < fk;
        let strength = if dominant {
            BlendType::Dominant
        } else {
            BlendType::Normal
        };
        if ker.f != ker.g && ker.f != ker.j {
            result.f = strength;
        }
        if ker.k != ker.j && ker.k != ker.g {
            result.k = strength;
        }
    } else if fk < jg {
        let dominant = cfg.dominant_direction_threshold * fk < jg;
        let strength = if dominant {
            BlendType::Dominant
        } else {
            BlendType::Normal
        };
        if ker.j != ker.f && ker.j != ker.k {
            result.j = strength;
        }
        if ker.g != ker.f && ker.g != ker.k {
            result.g = strength;
        }
    }

    result
}
