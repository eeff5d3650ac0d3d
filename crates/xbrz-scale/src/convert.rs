//! Channel-order conversion
//!
//! In-place conversion between the two 4-channel layouts: the engine's
//! native `0xAARRGGBB` words and the `0xRRGGBBAA` order used by byte-wise
//! RGBA consumers. The two directions are mutual inverses.
//!
//! # See also
//!
//! C++ xBRZ: `xbrz_argb_to_rgba()` / `xbrz_rgba_to_argb()` in `xbrz.h`

/// Rotate each pixel from `0xAARRGGBB` to `0xRRGGBBAA`, in place.
pub fn argb_to_rgba(buf: &mut [u32]) {
    for px in buf.iter_mut() {
        *px = px.rotate_left(8);
    }
}

/// Rotate each pixel from `0xRRGGBBAA` to `0xAARRGGBB`, in place.
pub fn rgba_to_argb(buf: &mut [u32]) {
    for px in buf.iter_mut() {
        *px = px.rotate_right(8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngExt;

    #[test]
    fn test_known_values() {
        let mut buf = [0xAA112233u32, 0x80FF0040];
        let orig = buf;
        argb_to_rgba(&mut buf);
        assert_eq!(buf, [0x112233AA, 0xFF004080]);
        rgba_to_argb(&mut buf);
        assert_eq!(buf, orig);
    }

    #[test]
    fn test_round_trip_both_directions() {
        let mut rng = rand::rng();
        let orig: Vec<u32> = (0..256).map(|_| rng.random()).collect();

        let mut buf = orig.clone();
        argb_to_rgba(&mut buf);
        rgba_to_argb(&mut buf);
        assert_eq!(buf, orig);

        let mut buf = orig.clone();
        rgba_to_argb(&mut buf);
        argb_to_rgba(&mut buf);
        assert_eq!(buf, orig);
    }

    #[test]
    fn test_channels_move_as_units() {
        let mut buf = [0x11223344u32];
        argb_to_rgba(&mut buf);
        assert_eq!(buf[0], 0x22334411);
    }
}
