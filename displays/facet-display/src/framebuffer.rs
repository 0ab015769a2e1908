//! Packed panel framebuffer
//!
//! The panel is 160x68, 1 bit per pixel. Rotated 68x68 status canvases are
//! composed side by side into this buffer before each flush; the canvas
//! width is not byte-aligned, so composition is per-bit.

use facet_canvas::{Canvas, PixelFormat, CANVAS_SIZE};

/// Panel width in pixels.
pub const PANEL_WIDTH: usize = 160;

/// Panel height in pixels.
pub const PANEL_HEIGHT: usize = 68;

/// Bytes per panel line.
pub const LINE_BYTES: usize = PANEL_WIDTH / 8;

/// One full panel frame, packed 8 pixels per byte MSB-first.
#[derive(Clone)]
pub struct PanelFrame {
    lines: [[u8; LINE_BYTES]; PANEL_HEIGHT],
}

impl PanelFrame {
    /// Create an all-clear frame.
    pub const fn new() -> Self {
        Self {
            lines: [[0; LINE_BYTES]; PANEL_HEIGHT],
        }
    }

    /// Clear every pixel.
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.fill(0);
        }
    }

    /// Packed bytes of one line.
    pub fn line(&self, y: usize) -> &[u8; LINE_BYTES] {
        &self.lines[y]
    }

    /// Read one pixel.
    pub fn get_pixel(&self, x: usize, y: usize) -> bool {
        self.lines[y][x / 8] & (0x80 >> (x % 8)) != 0
    }

    /// Write one pixel.
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        let byte = &mut self.lines[y][x / 8];
        let mask = 0x80 >> (x % 8);
        if on {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }

    /// Place a rotated 1-bit canvas at a column offset.
    ///
    /// Caller contract: the canvas is `Indexed1` and the footprint fits the
    /// panel.
    pub fn blit(&mut self, canvas: &Canvas<'_>, x_offset: usize) {
        debug_assert_eq!(canvas.format(), PixelFormat::Indexed1);
        debug_assert!(x_offset + CANVAS_SIZE <= PANEL_WIDTH);

        for y in 0..CANVAS_SIZE {
            for x in 0..CANVAS_SIZE {
                self.set_pixel(x_offset + x, y, canvas.get_bit(x, y));
            }
        }
    }
}

impl Default for PanelFrame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

    const INDEXED_BYTES: usize = PixelFormat::Indexed1.buffer_size(CANVAS_SIZE, CANVAS_SIZE);

    #[test]
    fn test_pixel_packing_is_msb_first() {
        let mut frame = PanelFrame::new();
        frame.set_pixel(0, 0, true);
        frame.set_pixel(9, 1, true);
        assert_eq!(frame.line(0)[0], 0x80);
        assert_eq!(frame.line(1)[1], 0x40);
    }

    #[test]
    fn test_blit_places_canvas_at_offset() {
        let mut storage = [0u8; INDEXED_BYTES];
        let mut canvas = Canvas::new(PixelFormat::Indexed1, &mut storage);
        canvas.fill(Rgb565::BLACK);
        canvas.set_bit(3, 4, true);

        let mut frame = PanelFrame::new();
        frame.blit(&canvas, 68);

        assert!(frame.get_pixel(71, 4));
        let set: u32 = frame
            .lines
            .iter()
            .flat_map(|l| l.iter())
            .map(|b| b.count_ones())
            .sum();
        assert_eq!(set, 1);
    }

    #[test]
    fn test_blit_overwrites_previous_content() {
        let mut storage = [0u8; INDEXED_BYTES];
        let mut canvas = Canvas::new(PixelFormat::Indexed1, &mut storage);
        canvas.fill(Rgb565::WHITE);

        let mut frame = PanelFrame::new();
        frame.blit(&canvas, 0);

        canvas.fill(Rgb565::BLACK);
        frame.blit(&canvas, 0);

        for y in 0..CANVAS_SIZE {
            for x in 0..CANVAS_SIZE {
                assert!(!frame.get_pixel(x, y));
            }
        }
    }
}
