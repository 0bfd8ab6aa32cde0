//! Wire layout of the single SPI transfer the panel accepts.
//!
//! ```text
//! byte 0        command (0x72)
//! bytes 1..769  pixels, row-major, R G B per pixel
//! ```

use crate::PIXEL_BYTES;

/// Command byte that prefixes every frame.
pub const COMMAND_BYTE: u8 = 0x72;

/// Total transfer length: command byte plus pixel data.
pub const FRAME_LEN: usize = 1 + PIXEL_BYTES;

/// Byte offset of pixel `(x, y)` inside the raw pixel data.
pub const fn pixel_offset(x: usize, y: usize) -> usize {
    (y * crate::WIDTH + x) * crate::BYTES_PER_PIXEL
}

/// Write a complete frame for `pixels` into `out`.
pub fn encode_into(pixels: &[u8; PIXEL_BYTES], out: &mut [u8; FRAME_LEN]) {
    out[0] = COMMAND_BYTE;
    out[1..].copy_from_slice(pixels);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn frame_len_is_769() {
        assert_eq!(FRAME_LEN, 769);
    }

    #[rstest]
    #[case(0, 0, 0)]
    #[case(1, 0, 3)]
    #[case(0, 1, 48)]
    #[case(15, 15, 765)]
    fn test_pixel_offset(#[case] x: usize, #[case] y: usize, #[case] expected: usize) {
        assert_eq!(pixel_offset(x, y), expected);
    }

    #[test]
    fn encode_overwrites_stale_buffer() {
        let mut pixels = [0u8; PIXEL_BYTES];
        pixels[PIXEL_BYTES - 1] = 9;
        let mut out = [0xAA; FRAME_LEN];

        encode_into(&pixels, &mut out);

        assert_eq!(out[0], COMMAND_BYTE);
        assert!(out[1..FRAME_LEN - 1].iter().all(|&b| b == 0));
        assert_eq!(out[FRAME_LEN - 1], 9);
    }
}
