//! Square canvas buffer
//!
//! One status canvas is a fixed 68x68 pixel block. Storage is caller-owned
//! and validated against the active [`PixelFormat`] at construction; the
//! buffer is fully overwritten by the background fill at the start of each
//! render pass and never read before it.
//!
//! The canvas implements [`DrawTarget`] over [`Rgb565`] regardless of the
//! underlying format; 1-bit buffers quantize colors to on/off by luminance.

use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::{
        raw::{RawData, RawU16},
        Rgb565, RgbColor,
    },
    prelude::{OriginDimensions, Size},
    draw_target::DrawTarget,
    Pixel,
};

use crate::format::{PixelFormat, PALETTE_BYTES};

/// Canvas edge length in pixels.
///
/// Every canvas in the system is this size; the physical panel composes
/// several of them side by side.
pub const CANVAS_SIZE: usize = 68;

/// Storage bytes needed for the largest supported format.
///
/// Sizing scratch arenas and static storage to this constant makes them
/// valid for any runtime-selected format.
pub const MAX_CANVAS_BYTES: usize =
    PixelFormat::Argb8888.buffer_size(CANVAS_SIZE, CANVAS_SIZE);

/// Default palette header for 1-bit buffers: background, then foreground,
/// each stored as B, G, R, A.
const DEFAULT_PALETTE: [u8; PALETTE_BYTES] = [
    0x00, 0x00, 0x00, 0xFF, // index 0: black
    0xFF, 0xFF, 0xFF, 0xFF, // index 1: white
];

/// A square pixel buffer for one render pass.
///
/// Borrows caller-owned storage whose length must match the format's
/// required size exactly; a mismatch is a construction-time contract
/// violation, not a runtime condition.
pub struct Canvas<'b> {
    format: PixelFormat,
    data: &'b mut [u8],
    dirty: bool,
}

impl<'b> Canvas<'b> {
    /// Wrap caller-owned storage as a canvas.
    ///
    /// # Panics
    ///
    /// Panics if `storage.len()` differs from
    /// `format.buffer_size(CANVAS_SIZE, CANVAS_SIZE)`.
    pub fn new(format: PixelFormat, storage: &'b mut [u8]) -> Self {
        assert_eq!(
            storage.len(),
            format.buffer_size(CANVAS_SIZE, CANVAS_SIZE),
            "canvas storage does not match format"
        );
        if format == PixelFormat::Indexed1 {
            storage[..PALETTE_BYTES].copy_from_slice(&DEFAULT_PALETTE);
        }
        Self {
            format,
            data: storage,
            dirty: false,
        }
    }

    /// Active pixel format.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Bytes per pixel row.
    pub fn stride(&self) -> usize {
        self.format.stride(CANVAS_SIZE)
    }

    /// Full backing bytes, header included.
    pub fn data(&self) -> &[u8] {
        self.data
    }

    /// Pixel region bytes, header excluded.
    pub fn pixel_data(&self) -> &[u8] {
        &self.data[self.format.header_bytes()..]
    }

    /// Mutable pixel region bytes, header excluded.
    pub fn pixel_data_mut(&mut self) -> &mut [u8] {
        let header = self.format.header_bytes();
        &mut self.data[header..]
    }

    /// Check whether the canvas changed since the last [`mark_clean`].
    ///
    /// [`mark_clean`]: Canvas::mark_clean
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the canvas as consumed (after handoff to the display).
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Mark the canvas as changed.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Overwrite every pixel with a single color.
    ///
    /// Only addressable pixels are touched; row padding bits of the 1-bit
    /// format stay clear so popcounts reflect visible pixels.
    pub fn fill(&mut self, color: Rgb565) {
        let stride = self.stride();
        match self.format {
            PixelFormat::Rgb565 => {
                let [lo, hi] = raw_565(color).to_le_bytes();
                for px in self.pixel_data_mut().chunks_exact_mut(2) {
                    px[0] = lo;
                    px[1] = hi;
                }
            }
            PixelFormat::Argb8888 => {
                let bytes = bgra_8888(color);
                for px in self.pixel_data_mut().chunks_exact_mut(4) {
                    px.copy_from_slice(&bytes);
                }
            }
            PixelFormat::Indexed1 => {
                let on = color_to_bit(color);
                let full_bytes = CANVAS_SIZE / 8;
                let tail_bits = CANVAS_SIZE % 8;
                let tail_mask = if tail_bits == 0 {
                    0
                } else {
                    0xFFu8 << (8 - tail_bits)
                };
                for row in self.pixel_data_mut().chunks_exact_mut(stride) {
                    row[..full_bytes].fill(if on { 0xFF } else { 0x00 });
                    for tail in &mut row[full_bytes..] {
                        *tail = if on { tail_mask } else { 0x00 };
                    }
                }
            }
        }
    }

    /// Read one bit of a 1-bit canvas.
    ///
    /// Caller contract: the canvas is `Indexed1` and `(x, y)` is in bounds.
    pub fn get_bit(&self, x: usize, y: usize) -> bool {
        debug_assert_eq!(self.format, PixelFormat::Indexed1);
        debug_assert!(x < CANVAS_SIZE && y < CANVAS_SIZE);
        let stride = self.stride();
        let byte = self.pixel_data()[y * stride + x / 8];
        byte & (0x80 >> (x % 8)) != 0
    }

    /// Write one bit of a 1-bit canvas.
    ///
    /// Caller contract: the canvas is `Indexed1` and `(x, y)` is in bounds.
    pub fn set_bit(&mut self, x: usize, y: usize, on: bool) {
        debug_assert_eq!(self.format, PixelFormat::Indexed1);
        debug_assert!(x < CANVAS_SIZE && y < CANVAS_SIZE);
        let stride = self.stride();
        let byte = &mut self.pixel_data_mut()[y * stride + x / 8];
        let mask = 0x80 >> (x % 8);
        if on {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }

    /// Write one pixel, dispatching on the format tag.
    ///
    /// Caller contract: `(x, y)` is in bounds.
    pub(crate) fn set_pixel(&mut self, x: usize, y: usize, color: Rgb565) {
        let stride = self.stride();
        match self.format {
            PixelFormat::Rgb565 => {
                let offset = y * stride + x * 2;
                self.pixel_data_mut()[offset..offset + 2]
                    .copy_from_slice(&raw_565(color).to_le_bytes());
            }
            PixelFormat::Argb8888 => {
                let offset = y * stride + x * 4;
                self.pixel_data_mut()[offset..offset + 4]
                    .copy_from_slice(&bgra_8888(color));
            }
            PixelFormat::Indexed1 => {
                self.set_bit(x, y, color_to_bit(color));
            }
        }
    }
}

impl OriginDimensions for Canvas<'_> {
    fn size(&self) -> Size {
        Size::new(CANVAS_SIZE as u32, CANVAS_SIZE as u32)
    }
}

impl DrawTarget for Canvas<'_> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0
                || point.x >= CANVAS_SIZE as i32
                || point.y < 0
                || point.y >= CANVAS_SIZE as i32
            {
                continue;
            }
            self.set_pixel(point.x as usize, point.y as usize, color);
        }
        Ok(())
    }
}

/// Raw little-endian RGB565 value of a color.
fn raw_565(color: Rgb565) -> u16 {
    RawU16::from(color).into_inner()
}

/// B, G, R, A bytes of a color expanded to 8 bits per channel.
fn bgra_8888(color: Rgb565) -> [u8; 4] {
    let (r, g, b) = expand_888(color);
    [b, g, r, 0xFF]
}

/// Expand 5/6/5 channels to 8 bits each.
fn expand_888(color: Rgb565) -> (u8, u8, u8) {
    let r = (color.r() << 3) | (color.r() >> 2);
    let g = (color.g() << 2) | (color.g() >> 4);
    let b = (color.b() << 3) | (color.b() >> 2);
    (r, g, b)
}

/// Quantize a color to a 1-bit pixel by BT.601 luminance.
fn color_to_bit(color: Rgb565) -> bool {
    let (r, g, b) = expand_888(color);
    let luma = (u32::from(r) * 77 + u32::from(g) * 150 + u32::from(b) * 29) >> 8;
    luma >= 128
}
