//! Pixel format adapter
//!
//! The canvas buffer layout varies with the active display pipeline. Three
//! formats are supported; everything that depends on byte layout (stride,
//! total size, header overhead) is answered here so the rest of the crate
//! can stay format-agnostic.

/// Byte length of the palette header preceding 1-bit pixel data.
///
/// Two 4-byte entries: index 0 is the background color, index 1 the
/// foreground. The header is constant metadata; rotation copies it verbatim.
pub const PALETTE_BYTES: usize = 8;

/// Supported pixel representations for a canvas buffer.
///
/// A closed set by design: strategy selection elsewhere (notably in the
/// rotation engine) is a single dispatch on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelFormat {
    /// Native 16-bit color, 2 bytes per pixel, little-endian.
    ///
    /// The default when no display is available to query.
    #[default]
    Rgb565,
    /// 32-bit color, 4 bytes per pixel, stored as B, G, R, A.
    Argb8888,
    /// 1 bit per pixel, packed 8 per byte MSB-first, with a palette header.
    Indexed1,
}

impl PixelFormat {
    /// Bits occupied by one pixel.
    pub const fn bits_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb565 => 16,
            PixelFormat::Argb8888 => 32,
            PixelFormat::Indexed1 => 1,
        }
    }

    /// Fixed header bytes preceding the pixel region.
    pub const fn header_bytes(self) -> usize {
        match self {
            PixelFormat::Indexed1 => PALETTE_BYTES,
            _ => 0,
        }
    }

    /// Bytes per row for the given width, rounded up to whole bytes for
    /// sub-byte formats.
    pub const fn stride(self, width: usize) -> usize {
        (width * self.bits_per_pixel() + 7) / 8
    }

    /// Total buffer bytes for the given dimensions, header included.
    pub const fn buffer_size(self, width: usize, height: usize) -> usize {
        self.header_bytes() + self.stride(width) * height
    }
}
