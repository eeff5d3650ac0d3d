//! Reference resamplers
//!
//! Standard nearest-neighbor and bilinear scalers, independent of the
//! rule-based engine. Useful as comparison baselines and as fallbacks where
//! an arbitrary (non-integer) target size is needed.
//!
//! # See also
//!
//! C++ xBRZ: `xbrz_nearestNeighborScale()` / `xbrz_bilinearScale()` in `xbrz.h`

use crate::error::ScaleResult;
use xbrz_core::color::{extract_argb, pack_argb};
use xbrz_core::Image;

/// Scale to an arbitrary target size by nearest-neighbor sampling.
///
/// # Errors
///
/// Returns a core error for zero target dimensions.
pub fn nearest_neighbor_scale(src: &Image, trg_width: u32, trg_height: u32) -> ScaleResult<Image> {
    let target = Image::new(trg_width, trg_height)?;
    let mut target_mut = target.try_into_mut().unwrap();

    for y in 0..trg_height {
        let sy = (y as u64 * src.height() as u64 / trg_height as u64) as u32;
        let src_row = src.row(sy);
        let trg_row = target_mut.row_mut(y);
        for (x, out) in trg_row.iter_mut().enumerate() {
            let sx = x as u64 * src.width() as u64 / trg_width as u64;
            *out = src_row[sx as usize];
        }
    }

    Ok(target_mut.into())
}

/// Scale to an arbitrary target size by bilinear interpolation.
///
/// Sample positions are center-aligned; border samples clamp to the edge.
/// All four channels are interpolated (the unused top byte of three-channel
/// images stays zero).
///
/// # Errors
///
/// Returns a core error for zero target dimensions.
pub fn bilinear_scale(src: &Image, trg_width: u32, trg_height: u32) -> ScaleResult<Image> {
    let target = Image::new(trg_width, trg_height)?;
    let mut target_mut = target.try_into_mut().unwrap();

    let sw = src.width();
    let sh = src.height();

    for y in 0..trg_height {
        let fy = ((y as f32 + 0.5) * sh as f32 / trg_height as f32 - 0.5).max(0.0);
        let y0 = fy as u32;
        let y1 = (y0 + 1).min(sh - 1);
        let wy = fy - y0 as f32;

        let row0 = src.row(y0);
        let row1 = src.row(y1);
        let trg_row = target_mut.row_mut(y);

        for (x, out) in trg_row.iter_mut().enumerate() {
            let fx = ((x as f32 + 0.5) * sw as f32 / trg_width as f32 - 0.5).max(0.0);
            let x0 = fx as usize;
            let x1 = (x0 + 1).min(sw as usize - 1);
            let wx = fx - x0 as f32;

            let (a00, r00, g00, b00) = extract_argb(row0[x0]);
            let (a01, r01, g01, b01) = extract_argb(row0[x1]);
            let (a10, r10, g10, b10) = extract_argb(row1[x0]);
            let (a11, r11, g11, b11) = extract_argb(row1[x1]);

            let lerp2 = |c00: u8, c01: u8, c10: u8, c11: u8| -> u8 {
                let top = c00 as f32 + (c01 as f32 - c00 as f32) * wx;
                let bottom = c10 as f32 + (c11 as f32 - c10 as f32) * wx;
                (top + (bottom - top) * wy + 0.5) as u8
            };

            *out = pack_argb(
                lerp2(a00, a01, a10, a11),
                lerp2(r00, r01, r10, r11),
                lerp2(g00, g01, g10, g11),
                lerp2(b00, b01, b10, b11),
            );
        }
    }

    Ok(target_mut.into())
}
