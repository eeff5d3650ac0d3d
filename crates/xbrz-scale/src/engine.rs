//! Slice driver
//!
//! Walks a row range of the source image and produces the corresponding
//! scaled output rows: per pixel, sample the neighborhood, classify the
//! corner pattern, fill the output cell and apply the corner blends through
//! the per-factor weight tables.
//!
//! Corner decisions are shared between the four pixels of each 2x2 quad, so
//! the driver carries a one-row buffer of partial [`BlendInfo`] bytes: each
//! quad is classified exactly once, when its top-left pixel is visited, and
//! the other three pixels receive their corner bits through the buffer. The
//! first row of a slice seeds the buffer by classifying the quad row above
//! it, which is the whole cost of slice independence (prefer slices of at
//! least 8-16 rows over single-row calls).

use crate::config::{ColorFormat, ScalerCfg};
use crate::error::{ScaleError, ScaleResult};
use crate::matrix::{OutputCell, ScaleMatrix};
use crate::metric::ColorMetric;
use crate::neighborhood::{Kernel3x3, Kernel4x4, Rotation};
use crate::pattern::{BlendInfo, BlendType, preprocess_corners};
use xbrz_core::Image;

/// Scale a whole image by an integer factor in [2, 6].
///
/// Allocates and returns the (factor * width) x (factor * height) result.
///
/// # Errors
///
/// Returns [`ScaleError::InvalidScaleFactor`] if `factor` is outside
/// [2, 6].
pub fn scale(
    factor: u32,
    src: &Image,
    format: ColorFormat,
    cfg: &ScalerCfg,
) -> ScaleResult<Image> {
    if ScaleMatrix::for_factor(factor).is_none() {
        return Err(ScaleError::InvalidScaleFactor(factor));
    }
    let target = Image::new(src.width() * factor, src.height() * factor)?;
    let mut target_mut = target.try_into_mut().unwrap();
    scale_slice(
        factor,
        src,
        target_mut.data_mut(),
        format,
        cfg,
        0,
        src.height(),
    )?;
    Ok(target_mut.into())
}

/// Scale a whole image with the default configuration.
///
/// # See also
///
/// C++ xBRZ: `xbrz_scale_defaults()` in `xbrz.h`
pub fn scale_defaults(factor: u32, src: &Image, format: ColorFormat) -> ScaleResult<Image> {
    scale(factor, src, format, &ScalerCfg::default())
}

/// Scale the source rows [y_first, y_last) into a target chunk.
///
/// `trg` receives the output rows for exactly this slice: its first row
/// corresponds to source row `y_first`, and it must hold
/// `factor * width * factor * (y_last - y_first)` pixels (after the row
/// range is clamped into the image). Out-of-range row bounds are clamped,
/// not rejected; an empty range is a no-op.
///
/// # Thread safety
///
/// A slice reads source rows `y_first - 2 ..= y_last + 1` (clamped) and
/// writes nothing outside its own `trg`. Slices with pairwise disjoint row
/// ranges over the same source may therefore run fully in parallel, each
/// with its own disjoint chunk of the final buffer (`split_at_mut` /
/// `chunks_mut`), and the stitched result is pixel-identical to a single
/// full-range call. Scaling a cropped source that lacks those two context
/// rows above and below replicates edge pixels instead of reading true
/// neighbors and will show seams at the slice boundary.
///
/// # Errors
///
/// Returns [`ScaleError::InvalidScaleFactor`] for a factor outside [2, 6]
/// and [`ScaleError::TargetSize`] if `trg` has the wrong length.
pub fn scale_slice(
    factor: u32,
    src: &Image,
    trg: &mut [u32],
    format: ColorFormat,
    cfg: &ScalerCfg,
    y_first: u32,
    y_last: u32,
) -> ScaleResult<()> {
    let Some(matrix) = ScaleMatrix::for_factor(factor) else {
        return Err(ScaleError::InvalidScaleFactor(factor));
    };

    let y_first = y_first.min(src.height());
    let y_last = y_last.min(src.height());
    let rows = y_last.saturating_sub(y_first) as usize;

    let trg_width = src.width() as usize * factor as usize;
    let expected = trg_width * factor as usize * rows;
    if trg.len() != expected {
        return Err(ScaleError::TargetSize {
            expected,
            actual: trg.len(),
        });
    }
    if rows == 0 {
        return Ok(());
    }

    scale_rows(matrix, src, trg, format, cfg, y_first, y_last);
    Ok(())
}

fn scale_rows(
    matrix: &ScaleMatrix,
    src: &Image,
    trg: &mut [u32],
    format: ColorFormat,
    cfg: &ScalerCfg,
    y_first: u32,
    y_last: u32,
) {
    let scale = matrix.scale as usize;
    let w = src.width() as usize;
    let trg_width = w * scale;
    let has_alpha = format.has_alpha();
    let metric = ColorMetric::new(format, cfg.luminance_weight);

    // Corner decisions for the row being entered; seeded from the quad row
    // above the slice so the first row blends exactly as it would in a
    // full-image pass.
    let mut preproc = vec![BlendInfo::NONE; w];
    {
        let y = y_first as i32 - 1;
        for x in 0..w {
            let ker = Kernel4x4::read(src, x as i32, y);
            let res = preprocess_corners(&ker, cfg, &metric);
            preproc[x].add_top_r(res.j);
            if x + 1 < w {
                preproc[x + 1].add_top_l(res.k);
            }
        }
    }

    for y in y_first..y_last {
        let out_row = (y - y_first) as usize * scale * trg_width;
        // Partial corner byte of the pixel below the current one
        let mut blend_below = BlendInfo::NONE;

        for x in 0..w {
            let ker4 = Kernel4x4::read(src, x as i32, y as i32);
            let res = preprocess_corners(&ker4, cfg, &metric);

            // All four corners of (x, y) are known at this point.
            let mut blend = preproc[x];
            blend.add_bottom_r(res.f);

            blend_below.add_top_r(res.j);
            preproc[x] = blend_below;

            blend_below = BlendInfo::NONE;
            blend_below.add_top_l(res.k);

            if x + 1 < w {
                preproc[x + 1].add_bottom_l(res.g);
            }

            let mut cell = OutputCell::new(trg, out_row + x * scale, trg_width, scale);
            cell.fill(ker4.f);

            if blend.any() {
                let ker3 = Kernel3x3::of(&ker4);
                for rot in Rotation::ALL {
                    blend_corner(&mut cell, rot, &ker3, blend, &metric, cfg, matrix, has_alpha);
                }
            }
        }
    }
}

/// Blend one corner of a pixel's output cell.
///
/// Written for the canonical bottom-right corner; the rotation remaps both
/// the kernel reads and the output writes, so the same rules serve all four
/// corners.
#[allow(clippy::too_many_arguments)]
fn blend_corner(
    cell: &mut OutputCell,
    rot: Rotation,
    ker: &Kernel3x3,
    blend_info: BlendInfo,
    metric: &ColorMetric,
    cfg: &ScalerCfg,
    matrix: &ScaleMatrix,
    has_alpha: bool,
) {
    let blend = blend_info.rotate(rot);
    if blend.bottom_r() == BlendType::None {
        return;
    }

    let b = ker.at(rot, 0, 1);
    let c = ker.at(rot, 0, 2);
    let d = ker.at(rot, 1, 0);
    let e = ker.at(rot, 1, 1);
    let f = ker.at(rot, 1, 2);
    let g = ker.at(rot, 2, 0);
    let h = ker.at(rot, 2, 1);
    let i = ker.at(rot, 2, 2);

    let eq = |c1: u32, c2: u32| metric.dist(c1, c2) <= cfg.equal_color_tolerance;

    let do_line_blend = if blend.bottom_r() >= BlendType::Dominant {
        true
    } else if blend.top_r() != BlendType::None && !eq(e, g) {
        // An adjacent corner of this pixel also blends toward an unlike
        // color: keep insular pixels intact (90 degree corners may still
        // double-blend).
        false
    } else if blend.bottom_l() != BlendType::None && !eq(e, c) {
        false
    } else if eq(g, h) && eq(h, i) && eq(i, f) && eq(f, c) && !eq(e, i) {
        // An L-shape of one color around a dissimilar center: no line to
        // reconstruct, round the corner only.
        false
    } else {
        true
    };

    // The more similar of the two edge neighbors provides the contour color.
    let px = if metric.dist(e, f) <= metric.dist(e, h) {
        f
    } else {
        h
    };

    if do_line_blend {
        let fg = metric.dist(f, g);
        let hc = metric.dist(h, c);

        let have_shallow = cfg.steep_direction_threshold * fg <= hc && e != g && d != g;
        let have_steep = cfg.steep_direction_threshold * hc <= fg && e != c && b != c;

        let entries = match (have_shallow, have_steep) {
            (true, true) => matrix.steep_and_shallow,
            (true, false) => matrix.shallow,
            (false, true) => matrix.steep,
            (false, false) => matrix.diagonal,
        };
        cell.apply(rot, entries, px, has_alpha);
    } else {
        cell.apply(rot, matrix.corner, px, has_alpha);
    }
}
