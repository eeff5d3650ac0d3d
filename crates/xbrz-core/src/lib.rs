//! xBRZ core - basic data structures for image upscaling
//!
//! This crate provides the fundamental types used throughout the xBRZ
//! upscaler port:
//!
//! - [`Image`] / [`ImageMut`] - 32-bit raster containers (immutable / mutable)
//! - [`color`] - packed-pixel channel helpers
//! - [`Error`] / [`Result`] - the core error type
//!
//! # See also
//!
//! C++ xBRZ: `xbrz.h` (pixel layout and scaling API of the original library)

pub mod error;
pub mod image;

pub use error::{Error, Result};
pub use image::{Image, ImageMut};

/// Color channel helpers for 32-bit packed pixels.
///
/// # Pixel format
///
/// Pixels are stored as `0xAARRGGBB` (alpha in the MSB, blue in the LSB),
/// independent of memory byte order. Three-channel colors leave the upper
/// 8 bits unused (zero).
///
/// # See also
///
/// C++ xBRZ: `ColorFormat` comment in `xbrz.h` ("from high bits -> low bits")
pub mod color {
    /// Shift amounts for extracting color channels
    pub const ALPHA_SHIFT: u32 = 24;
    pub const RED_SHIFT: u32 = 16;
    pub const GREEN_SHIFT: u32 = 8;
    pub const BLUE_SHIFT: u32 = 0;

    /// Extract the alpha component from a 32-bit pixel.
    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        ((pixel >> ALPHA_SHIFT) & 0xff) as u8
    }

    /// Extract the red component from a 32-bit pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract the green component from a 32-bit pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract the blue component from a 32-bit pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Compose a three-channel pixel. The upper 8 bits are left zero.
    #[inline]
    pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
        ((r as u32) << RED_SHIFT) | ((g as u32) << GREEN_SHIFT) | ((b as u32) << BLUE_SHIFT)
    }

    /// Compose a four-channel pixel.
    #[inline]
    pub fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
        ((a as u32) << ALPHA_SHIFT)
            | ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
    }

    /// Extract (r, g, b) from a 32-bit pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

    /// Extract (a, r, g, b) from a 32-bit pixel.
    #[inline]
    pub fn extract_argb(pixel: u32) -> (u8, u8, u8, u8) {
        (alpha(pixel), red(pixel), green(pixel), blue(pixel))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_pack_extract_rgb() {
            let px = pack_rgb(10, 20, 30);
            assert_eq!(px, 0x000A141E);
            assert_eq!(extract_rgb(px), (10, 20, 30));
            assert_eq!(alpha(px), 0);
        }

        #[test]
        fn test_pack_extract_argb() {
            let px = pack_argb(0x80, 0xAA, 0xBB, 0xCC);
            assert_eq!(px, 0x80AABBCC);
            assert_eq!(extract_argb(px), (0x80, 0xAA, 0xBB, 0xCC));
        }

        #[test]
        fn test_roundtrip_random() {
            use rand::RngExt;
            let mut rng = rand::rng();
            for _ in 0..1000 {
                let px: u32 = rng.random();
                let (a, r, g, b) = extract_argb(px);
                assert_eq!(pack_argb(a, r, g, b), px);
            }
        }
    }
}
