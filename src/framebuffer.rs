//! In-memory copy of the panel's pixels.
//!
//! Writes are checked against the panel geometry and the 8-bit channel
//! range. Anything out of range is reported as a [`PreconditionViolation`]
//! rather than clamped, since it can only come from a bug in the caller.

use crate::error::PreconditionViolation;
use crate::protocol::{self, FRAME_LEN};
use crate::{Color, HEIGHT, PIXEL_BYTES, WIDTH};

const CHANNEL_LIMIT: u32 = 0x100;

fn check_param(param: &'static str, value: u64, limit: u64) -> Result<(), PreconditionViolation> {
    if value >= limit {
        return Err(PreconditionViolation {
            param,
            value,
            limit,
        });
    }
    Ok(())
}

fn check_channels(r: u32, g: u32, b: u32) -> Result<(), PreconditionViolation> {
    check_param("r", r.into(), CHANNEL_LIMIT.into())?;
    check_param("g", g.into(), CHANNEL_LIMIT.into())?;
    check_param("b", b.into(), CHANNEL_LIMIT.into())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    pixels: [u8; PIXEL_BYTES],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    /// A dark framebuffer.
    pub fn new() -> Self {
        Self {
            pixels: [0; PIXEL_BYTES],
        }
    }

    /// Set the pixel at column `x`, row `y`.
    ///
    /// Channels are taken as `u32` so that an out-of-range intensity from
    /// animation arithmetic is caught here instead of silently truncated.
    pub fn set_pixel(
        &mut self,
        x: usize,
        y: usize,
        r: u32,
        g: u32,
        b: u32,
    ) -> Result<(), PreconditionViolation> {
        check_param("x", x as u64, WIDTH as u64)?;
        check_param("y", y as u64, HEIGHT as u64)?;
        check_channels(r, g, b)?;

        let base = protocol::pixel_offset(x, y);
        self.pixels[base] = r as u8;
        self.pixels[base + 1] = g as u8;
        self.pixels[base + 2] = b as u8;
        Ok(())
    }

    pub fn set(&mut self, x: usize, y: usize, color: Color) -> Result<(), PreconditionViolation> {
        self.set_pixel(x, y, color.r.into(), color.g.into(), color.b.into())
    }

    /// Set every pixel to the same color.
    ///
    /// Goes through [`set_pixel`](Self::set_pixel) for each cell so every
    /// write sees the same checks.
    pub fn fill(&mut self, r: u32, g: u32, b: u32) -> Result<(), PreconditionViolation> {
        check_channels(r, g, b)?;

        for x in 0..WIDTH {
            for y in 0..HEIGHT {
                self.set_pixel(x, y, r, g, b)?;
            }
        }
        Ok(())
    }

    /// Turn every pixel off, with the same checks as any other fill.
    pub fn clear(&mut self) -> Result<(), PreconditionViolation> {
        self.fill(0, 0, 0)
    }

    /// Read back a pixel, or `None` when `(x, y)` is off the panel.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }
        let base = protocol::pixel_offset(x, y);
        Some(Color::new(
            self.pixels[base],
            self.pixels[base + 1],
            self.pixels[base + 2],
        ))
    }

    /// The protocol frame for the current contents.
    pub fn serialize(&self) -> Vec<u8> {
        let mut frame = [0u8; FRAME_LEN];
        self.serialize_into(&mut frame);
        frame.to_vec()
    }

    /// Same bytes as [`serialize`](Self::serialize), written into a reused buffer.
    pub fn serialize_into(&self, out: &mut [u8; FRAME_LEN]) {
        protocol::encode_into(&self.pixels, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::COMMAND_BYTE;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, 1, 2, 3)]
    #[case(15, 0, 255, 0, 0)]
    #[case(0, 15, 0, 255, 0)]
    #[case(15, 15, 0, 0, 255)]
    #[case(7, 9, 255, 255, 255)]
    fn set_pixel_reads_back_and_leaves_others(
        #[case] x: usize,
        #[case] y: usize,
        #[case] r: u8,
        #[case] g: u8,
        #[case] b: u8,
    ) {
        let mut fb = Framebuffer::new();
        fb.set_pixel(x, y, r.into(), g.into(), b.into()).unwrap();

        for cy in 0..HEIGHT {
            for cx in 0..WIDTH {
                let expected = if (cx, cy) == (x, y) {
                    Color::new(r, g, b)
                } else {
                    Color::BLACK
                };
                assert_eq!(fb.pixel(cx, cy), Some(expected), "pixel ({cx}, {cy})");
            }
        }
    }

    #[rstest]
    #[case(16, 0, 0, 0, 0, "x")]
    #[case(0, 16, 0, 0, 0, "y")]
    #[case(100, 100, 0, 0, 0, "x")]
    #[case(0, 0, 256, 0, 0, "r")]
    #[case(0, 0, 0, 300, 0, "g")]
    #[case(0, 0, 0, 0, u32::MAX, "b")]
    fn set_pixel_rejects_out_of_range(
        #[case] x: usize,
        #[case] y: usize,
        #[case] r: u32,
        #[case] g: u32,
        #[case] b: u32,
        #[case] param: &str,
    ) {
        let mut fb = Framebuffer::new();
        let err = fb.set_pixel(x, y, r, g, b).unwrap_err();
        assert_eq!(err.param, param);
        assert_eq!(fb, Framebuffer::new(), "rejected write must not touch the grid");
    }

    #[test]
    fn set_pixel_does_not_wrap_on_the_edge() {
        let mut fb = Framebuffer::new();
        let err = fb.set_pixel(WIDTH, 0, 1, 1, 1).unwrap_err();
        assert_eq!(err.limit, WIDTH as u64);
        assert_eq!(fb.pixel(0, 1), Some(Color::BLACK));
    }

    #[test]
    fn fill_rejects_bad_channel_without_writing() {
        let mut fb = Framebuffer::new();
        let err = fb.fill(10, 256, 10).unwrap_err();
        assert_eq!(err.param, "g");
        assert_eq!(fb, Framebuffer::new());
    }

    #[test]
    fn serialize_dark_frame() {
        let frame = Framebuffer::new().serialize();
        assert_eq!(frame.len(), 769);
        assert_eq!(frame[0], COMMAND_BYTE);
        assert!(frame[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn serialize_filled_frame() {
        let mut fb = Framebuffer::new();
        fb.fill(10, 20, 30).unwrap();

        let frame = fb.serialize();
        assert_eq!(frame.len(), 769);
        for chunk in frame[1..].chunks(3) {
            assert_eq!(chunk, &[10, 20, 30]);
        }
    }

    #[test]
    fn serialize_is_row_major() {
        let mut fb = Framebuffer::new();
        fb.set(1, 0, Color::new(1, 2, 3)).unwrap();
        fb.set(0, 1, Color::new(4, 5, 6)).unwrap();

        let frame = fb.serialize();
        assert_eq!(&frame[1 + 3..1 + 6], &[1, 2, 3]);
        assert_eq!(&frame[1 + 48..1 + 51], &[4, 5, 6]);
    }

    #[test]
    fn serialize_into_matches_serialize() {
        let mut fb = Framebuffer::new();
        fb.set(3, 4, Color::new(9, 8, 7)).unwrap();

        let mut buf = [0u8; FRAME_LEN];
        fb.serialize_into(&mut buf);
        assert_eq!(buf.to_vec(), fb.serialize());
    }

    #[test]
    fn clear_goes_dark() {
        let mut fb = Framebuffer::new();
        fb.fill(255, 255, 255).unwrap();
        fb.clear().unwrap();
        assert_eq!(fb, Framebuffer::new());
        assert!(fb.serialize()[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn pixel_off_panel_is_none() {
        assert_eq!(Framebuffer::new().pixel(WIDTH, 0), None);
    }
}
