//! Scale-kernel weight tables
//!
//! The output cell of one source pixel is a factor x factor block. Once a
//! corner has been classified, the block is refined by blending the contour
//! color into a fixed set of sub-pixels - which sub-pixels, and how much,
//! is pure data: one table per line shape and factor, written for the
//! canonical bottom-right corner and rotated into place at apply time.
//!
//! The factor-2 tables are the base case; the larger factors extend the
//! same decisions with finer steps along the detected contour, so which
//! edges blend never depends on the factor, only how smoothly.

use crate::neighborhood::Rotation;
use xbrz_core::color::{alpha, blue, green, pack_argb, pack_rgb, red};

/// One weighted write into the output cell: blend the contour color into
/// sub-pixel (row, col) at weight num/den. Entries with num == den
/// overwrite the sub-pixel with the contour color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendEntry {
    pub row: u8,
    pub col: u8,
    pub num: u8,
    pub den: u8,
}

const fn e(row: u8, col: u8, num: u8, den: u8) -> BlendEntry {
    BlendEntry { row, col, num, den }
}

/// The weight tables of one scale factor, one per line shape.
#[derive(Debug)]
pub struct ScaleMatrix {
    pub scale: u32,
    /// Line running flatter than 45 degrees through the corner
    pub shallow: &'static [BlendEntry],
    /// Line running steeper than 45 degrees (transpose of `shallow`)
    pub steep: &'static [BlendEntry],
    /// Both at once - a 90 degree wedge
    pub steep_and_shallow: &'static [BlendEntry],
    /// Plain 45 degree diagonal
    pub diagonal: &'static [BlendEntry],
    /// No line - round off the isolated corner
    pub corner: &'static [BlendEntry],
}

static MATRIX_2X: ScaleMatrix = ScaleMatrix {
    scale: 2,
    shallow: &[e(1, 0, 1, 4), e(1, 1, 3, 4)],
    steep: &[e(0, 1, 1, 4), e(1, 1, 3, 4)],
    steep_and_shallow: &[e(1, 0, 1, 4), e(0, 1, 1, 4), e(1, 1, 5, 6)],
    diagonal: &[e(1, 1, 1, 2)],
    // 21/100 ~ 1 - pi/4: the area a quarter-circle leaves uncovered
    corner: &[e(1, 1, 21, 100)],
};

static MATRIX_3X: ScaleMatrix = ScaleMatrix {
    scale: 3,
    shallow: &[
        e(2, 0, 1, 4),
        e(1, 2, 1, 4),
        e(2, 1, 3, 4),
        e(2, 2, 1, 1),
    ],
    steep: &[
        e(0, 2, 1, 4),
        e(2, 1, 1, 4),
        e(1, 2, 3, 4),
        e(2, 2, 1, 1),
    ],
    steep_and_shallow: &[
        e(2, 0, 1, 4),
        e(0, 2, 1, 4),
        e(2, 1, 3, 4),
        e(1, 2, 3, 4),
        e(2, 2, 1, 1),
    ],
    // Odd scale: keep the off-diagonal weights small to avoid conflicts
    // with the adjacent rotations sharing these sub-pixels.
    diagonal: &[e(1, 2, 1, 8), e(2, 1, 1, 8), e(2, 2, 7, 8)],
    corner: &[e(2, 2, 45, 100)],
};

static MATRIX_4X: ScaleMatrix = ScaleMatrix {
    scale: 4,
    shallow: &[
        e(3, 0, 1, 4),
        e(2, 2, 1, 4),
        e(3, 1, 3, 4),
        e(2, 3, 3, 4),
        e(3, 2, 1, 1),
        e(3, 3, 1, 1),
    ],
    steep: &[
        e(0, 3, 1, 4),
        e(2, 2, 1, 4),
        e(1, 3, 3, 4),
        e(3, 2, 3, 4),
        e(2, 3, 1, 1),
        e(3, 3, 1, 1),
    ],
    steep_and_shallow: &[
        e(3, 1, 3, 4),
        e(1, 3, 3, 4),
        e(3, 0, 1, 4),
        e(0, 3, 1, 4),
        e(2, 2, 1, 3),
        e(3, 3, 1, 1),
        e(3, 2, 1, 1),
        e(2, 3, 1, 1),
    ],
    diagonal: &[e(3, 2, 1, 2), e(2, 3, 1, 2), e(3, 3, 1, 1)],
    corner: &[e(3, 3, 68, 100), e(3, 2, 9, 100), e(2, 3, 9, 100)],
};

static MATRIX_5X: ScaleMatrix = ScaleMatrix {
    scale: 5,
    shallow: &[
        e(4, 0, 1, 4),
        e(3, 2, 1, 4),
        e(2, 4, 1, 4),
        e(4, 1, 3, 4),
        e(3, 3, 3, 4),
        e(4, 2, 1, 1),
        e(4, 3, 1, 1),
        e(4, 4, 1, 1),
        e(3, 4, 1, 1),
    ],
    steep: &[
        e(0, 4, 1, 4),
        e(2, 3, 1, 4),
        e(4, 2, 1, 4),
        e(1, 4, 3, 4),
        e(3, 3, 3, 4),
        e(2, 4, 1, 1),
        e(3, 4, 1, 1),
        e(4, 4, 1, 1),
        e(4, 3, 1, 1),
    ],
    steep_and_shallow: &[
        e(0, 4, 1, 4),
        e(2, 3, 1, 4),
        e(1, 4, 3, 4),
        e(4, 0, 1, 4),
        e(3, 2, 1, 4),
        e(4, 1, 3, 4),
        e(3, 3, 2, 3),
        e(2, 4, 1, 1),
        e(3, 4, 1, 1),
        e(4, 4, 1, 1),
        e(4, 2, 1, 1),
        e(4, 3, 1, 1),
    ],
    diagonal: &[
        e(4, 2, 1, 8),
        e(3, 3, 1, 8),
        e(2, 4, 1, 8),
        e(4, 3, 7, 8),
        e(3, 4, 7, 8),
        e(4, 4, 1, 1),
    ],
    corner: &[e(4, 4, 86, 100), e(4, 3, 23, 100), e(3, 4, 23, 100)],
};

static MATRIX_6X: ScaleMatrix = ScaleMatrix {
    scale: 6,
    shallow: &[
        e(5, 0, 1, 4),
        e(4, 2, 1, 4),
        e(3, 4, 1, 4),
        e(5, 1, 3, 4),
        e(4, 3, 3, 4),
        e(3, 5, 3, 4),
        e(5, 2, 1, 1),
        e(5, 3, 1, 1),
        e(5, 4, 1, 1),
        e(5, 5, 1, 1),
        e(4, 4, 1, 1),
        e(4, 5, 1, 1),
    ],
    steep: &[
        e(0, 5, 1, 4),
        e(2, 4, 1, 4),
        e(4, 3, 1, 4),
        e(1, 5, 3, 4),
        e(3, 4, 3, 4),
        e(5, 3, 3, 4),
        e(2, 5, 1, 1),
        e(3, 5, 1, 1),
        e(4, 5, 1, 1),
        e(5, 5, 1, 1),
        e(4, 4, 1, 1),
        e(5, 4, 1, 1),
    ],
    steep_and_shallow: &[
        e(0, 5, 1, 4),
        e(2, 4, 1, 4),
        e(1, 5, 3, 4),
        e(3, 4, 3, 4),
        e(5, 0, 1, 4),
        e(4, 2, 1, 4),
        e(5, 1, 3, 4),
        e(4, 3, 3, 4),
        e(2, 5, 1, 1),
        e(3, 5, 1, 1),
        e(4, 5, 1, 1),
        e(5, 5, 1, 1),
        e(4, 4, 1, 1),
        e(5, 4, 1, 1),
        e(5, 2, 1, 1),
        e(5, 3, 1, 1),
    ],
    diagonal: &[
        e(5, 3, 1, 2),
        e(4, 4, 1, 2),
        e(3, 5, 1, 2),
        e(4, 5, 1, 1),
        e(5, 5, 1, 1),
        e(5, 4, 1, 1),
    ],
    corner: &[
        e(5, 5, 97, 100),
        e(4, 5, 42, 100),
        e(5, 4, 42, 100),
        e(5, 3, 6, 100),
        e(3, 5, 6, 100),
    ],
};

impl ScaleMatrix {
    /// Look up the weight tables for a scale factor in [2, 6].
    pub fn for_factor(factor: u32) -> Option<&'static ScaleMatrix> {
        match factor {
            2 => Some(&MATRIX_2X),
            3 => Some(&MATRIX_3X),
            4 => Some(&MATRIX_4X),
            5 => Some(&MATRIX_5X),
            6 => Some(&MATRIX_6X),
            _ => None,
        }
    }
}

/// Interpolate `front` over `back` at weight num/den, three channels.
#[inline]
pub(crate) fn gradient_rgb(front: u32, back: u32, num: u32, den: u32) -> u32 {
    let calc = |f: u8, b: u8| ((f as u32 * num + b as u32 * (den - num)) / den) as u8;
    pack_rgb(
        calc(red(front), red(back)),
        calc(green(front), green(back)),
        calc(blue(front), blue(back)),
    )
}

/// Find an intermediate color between two alpha-carrying colors.
///
/// This is not alpha compositing: the two colors' channels are weighted by
/// their own alpha so fully transparent pixels contribute no chroma, and
/// the output alpha is the interpolated coverage.
#[inline]
pub(crate) fn gradient_argb(front: u32, back: u32, num: u32, den: u32) -> u32 {
    let weight_front = alpha(front) as u32 * num;
    let weight_back = alpha(back) as u32 * (den - num);
    let weight_sum = weight_front + weight_back;
    if weight_sum == 0 {
        return 0;
    }
    let calc =
        |f: u8, b: u8| ((f as u32 * weight_front + b as u32 * weight_back) / weight_sum) as u8;
    pack_argb(
        (weight_sum / den) as u8,
        calc(red(front), red(back)),
        calc(green(front), green(back)),
        calc(blue(front), blue(back)),
    )
}

/// Mutable view of one factor x factor block of the target buffer.
pub(crate) struct OutputCell<'a> {
    buf: &'a mut [u32],
    offset: usize,
    stride: usize,
    scale: usize,
}

impl<'a> OutputCell<'a> {
    #[inline]
    pub(crate) fn new(buf: &'a mut [u32], offset: usize, stride: usize, scale: usize) -> Self {
        OutputCell {
            buf,
            offset,
            stride,
            scale,
        }
    }

    /// Fill the whole cell with one color.
    pub(crate) fn fill(&mut self, color: u32) {
        for r in 0..self.scale {
            let start = self.offset + r * self.stride;
            self.buf[start..start + self.scale].fill(color);
        }
    }

    /// Apply a weight table under the given corner rotation.
    pub(crate) fn apply(
        &mut self,
        rot: Rotation,
        entries: &[BlendEntry],
        color: u32,
        has_alpha: bool,
    ) {
        for entry in entries {
            let (r, c) = rot.map(entry.row as usize, entry.col as usize, self.scale);
            let idx = self.offset + r * self.stride + c;
            self.buf[idx] = if entry.num == entry.den {
                color
            } else if has_alpha {
                gradient_argb(color, self.buf[idx], entry.num as u32, entry.den as u32)
            } else {
                gradient_rgb(color, self.buf[idx], entry.num as u32, entry.den as u32)
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrices() -> impl Iterator<Item = &'static ScaleMatrix> {
        (2..=6).map(|f| ScaleMatrix::for_factor(f).unwrap())
    }

    fn tables(m: &'static ScaleMatrix) -> [&'static [BlendEntry]; 5] {
        [
            m.shallow,
            m.steep,
            m.steep_and_shallow,
            m.diagonal,
            m.corner,
        ]
    }

    #[test]
    fn test_factor_lookup() {
        for f in 2..=6 {
            assert_eq!(ScaleMatrix::for_factor(f).unwrap().scale, f);
        }
        assert!(ScaleMatrix::for_factor(1).is_none());
        assert!(ScaleMatrix::for_factor(7).is_none());
    }

    #[test]
    fn test_entries_well_formed() {
        for m in matrices() {
            let n = m.scale as u8;
            for table in tables(m) {
                assert!(!table.is_empty());
                for entry in table {
                    assert!(entry.row < n && entry.col < n);
                    assert!(entry.num > 0 && entry.num <= entry.den);
                }
            }
        }
    }

    #[test]
    fn test_blends_stay_in_corner_half() {
        // All writes sit on or below the cell's anti-diagonal: a corner
        // decision never touches the half of the cell owned by the
        // opposite corner.
        for m in matrices() {
            let n = m.scale;
            for table in tables(m) {
                for entry in table {
                    assert!(entry.row as u32 + entry.col as u32 >= n - 1);
                }
            }
        }
    }

    #[test]
    fn test_shallow_steep_are_transposes() {
        // Mirror symmetry of the scaler rests on shallow and steep being
        // exact transposes, and the remaining shapes being transpose
        // symmetric.
        let transpose = |t: &[BlendEntry]| {
            let mut v: Vec<BlendEntry> = t.iter().map(|e| super::e(e.col, e.row, e.num, e.den)).collect();
            v.sort_by_key(|e| (e.row, e.col, e.num, e.den));
            v
        };
        let sorted = |t: &[BlendEntry]| {
            let mut v = t.to_vec();
            v.sort_by_key(|e| (e.row, e.col, e.num, e.den));
            v
        };
        for m in matrices() {
            assert_eq!(transpose(m.shallow), sorted(m.steep), "factor {}", m.scale);
            assert_eq!(
                transpose(m.steep_and_shallow),
                sorted(m.steep_and_shallow),
                "factor {}",
                m.scale
            );
            assert_eq!(transpose(m.diagonal), sorted(m.diagonal), "factor {}", m.scale);
            assert_eq!(transpose(m.corner), sorted(m.corner), "factor {}", m.scale);
        }
    }

    #[test]
    fn test_gradient_rgb_midpoint() {
        let black = pack_rgb(0, 0, 0);
        let white = pack_rgb(255, 255, 255);
        let mid = gradient_rgb(white, black, 1, 2);
        assert_eq!(mid, pack_rgb(127, 127, 127));
        // Zero-weight front contribution dominates toward back
        let quarter = gradient_rgb(white, black, 1, 4);
        assert_eq!(quarter, pack_rgb(63, 63, 63));
    }

    #[test]
    fn test_gradient_argb_weights_by_alpha() {
        let opaque_red = pack_argb(255, 255, 0, 0);
        let clear_blue = pack_argb(0, 0, 0, 255);
        // The transparent color contributes coverage but no chroma.
        let out = gradient_argb(clear_blue, opaque_red, 1, 2);
        assert_eq!(red(out), 255);
        assert_eq!(blue(out), 0);
        assert_eq!(alpha(out), 127);
    }

    #[test]
    fn test_gradient_argb_both_transparent() {
        let a = pack_argb(0, 10, 20, 30);
        let b = pack_argb(0, 40, 50, 60);
        assert_eq!(gradient_argb(a, b, 1, 2), 0);
    }

    #[test]
    fn test_output_cell_fill_and_apply() {
        // 2x2 target, one cell covering it all.
        let mut buf = vec![0u32; 4];
        let mut cell = OutputCell::new(&mut buf, 0, 2, 2);
        let back = pack_rgb(0, 0, 0);
        let front = pack_rgb(200, 100, 40);
        cell.fill(back);
        cell.apply(Rotation::R0, &[e(1, 1, 1, 1)], front, false);
        assert_eq!(buf, vec![back, back, back, front]);
    }

    #[test]
    fn test_output_cell_rotated_apply() {
        let front = pack_rgb(200, 100, 40);
        for (rot, expect_idx) in [
            (Rotation::R0, 3usize),  // bottom-right
            (Rotation::R90, 1),      // top-right
            (Rotation::R180, 0),     // top-left
            (Rotation::R270, 2),     // bottom-left
        ] {
            let mut buf = vec![0u32; 4];
            let mut cell = OutputCell::new(&mut buf, 0, 2, 2);
            cell.apply(rot, &[e(1, 1, 1, 1)], front, false);
            for (i, &px) in buf.iter().enumerate() {
                assert_eq!(px, if i == expect_idx { front } else { 0 }, "{rot:?}");
            }
        }
    }
}
