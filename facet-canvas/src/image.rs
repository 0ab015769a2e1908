//! Pre-decoded bitmap assets
//!
//! Art and icons arrive as raw pixel data declared at build time. An asset
//! carries its own dimensions; blits never take a caller-supplied size.

use embedded_graphics::pixelcolor::{
    raw::RawU16,
    Rgb565, RgbColor,
};

use crate::format::PixelFormat;
use crate::style::BACKGROUND;

/// A pre-decoded bitmap.
///
/// `data` is the bare pixel region (no palette header for 1-bit assets),
/// row length `format.stride(width)`.
#[derive(Debug, Clone, Copy)]
pub struct ImageAsset<'a> {
    format: PixelFormat,
    width: u32,
    height: u32,
    data: &'a [u8],
}

impl<'a> ImageAsset<'a> {
    /// Declare an asset over raw pixel data.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or `data` does not match
    /// `stride(width) * height` bytes. Both are build-time declaration
    /// errors, caught by the first draw in testing.
    pub const fn new(format: PixelFormat, width: u32, height: u32, data: &'a [u8]) -> Self {
        assert!(width > 0 && height > 0, "asset with zero dimension");
        assert!(
            data.len() == format.stride(width as usize) * height as usize,
            "asset data does not match declared dimensions"
        );
        Self {
            format,
            width,
            height,
            data,
        }
    }

    /// Pixel format of the asset data.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Declared width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Declared height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample the color at an asset-local coordinate.
    ///
    /// 1-bit assets resolve set bits to `recolor` (white when absent) and
    /// clear bits to the canvas background.
    pub(crate) fn color_at(&self, x: usize, y: usize, recolor: Option<Rgb565>) -> Rgb565 {
        let stride = self.format.stride(self.width as usize);
        match self.format {
            PixelFormat::Rgb565 => {
                let offset = y * stride + x * 2;
                let raw = u16::from_le_bytes([self.data[offset], self.data[offset + 1]]);
                Rgb565::from(RawU16::new(raw))
            }
            PixelFormat::Argb8888 => {
                let offset = y * stride + x * 4;
                let [b, g, r] = [self.data[offset], self.data[offset + 1], self.data[offset + 2]];
                Rgb565::new(r >> 3, g >> 2, b >> 3)
            }
            PixelFormat::Indexed1 => {
                let byte = self.data[y * stride + x / 8];
                if byte & (0x80 >> (x % 8)) != 0 {
                    recolor.unwrap_or(Rgb565::WHITE)
                } else {
                    BACKGROUND
                }
            }
        }
    }
}
