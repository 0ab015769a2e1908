//! Rotation engine
//!
//! The panel is mounted a quarter turn from the drawing orientation, so a
//! fully painted canvas is rotated 90 degrees clockwise before handoff.
//! Strategy is a single dispatch on the pixel format tag:
//!
//! - full-color buffers are re-composited through the image blit path
//!   (snapshot to scratch, clear, rotated blit about the center);
//! - 1-bit buffers get an exact per-bit remap, since packed pixels cannot
//!   be blended.
//!
//! Both satisfy `source(x, y) -> destination(N - 1 - y, x)`; the bit remap
//! exactly, the resample path up to rounding.

use embedded_graphics::prelude::Point;

use crate::buffer::{Canvas, CANVAS_SIZE, MAX_CANVAS_BYTES};
use crate::draw;
use crate::format::PixelFormat;
use crate::image::ImageAsset;
use crate::style::{ImageStyle, Rotation, BACKGROUND};

/// Caller-owned working memory for rotation.
///
/// Sized for the largest supported format, so one arena serves any
/// runtime-selected canvas. Exclusive use by a single render pass at a
/// time is a precondition; the engine provides no locking.
pub struct RotationScratch {
    bytes: [u8; MAX_CANVAS_BYTES],
}

impl RotationScratch {
    /// Create a zeroed scratch arena.
    pub const fn new() -> Self {
        Self {
            bytes: [0; MAX_CANVAS_BYTES],
        }
    }
}

impl Default for RotationScratch {
    fn default() -> Self {
        Self::new()
    }
}

/// Rotate a fully painted canvas 90 degrees clockwise in place.
pub fn rotate_canvas(canvas: &mut Canvas<'_>, scratch: &mut RotationScratch) {
    match canvas.format() {
        PixelFormat::Indexed1 => rotate_bits(canvas, scratch),
        PixelFormat::Rgb565 | PixelFormat::Argb8888 => rotate_resample(canvas, scratch),
    }
}

/// Exact per-bit remap for 1-bit buffers.
///
/// Source bytes (palette header included) are copied to scratch, the
/// destination pixel region is cleared, and every source bit moves to
/// `(N - 1 - y, x)`. The header in the canvas is left untouched; it is
/// constant metadata.
fn rotate_bits(canvas: &mut Canvas<'_>, scratch: &mut RotationScratch) {
    let stride = canvas.stride();
    let header = canvas.format().header_bytes();
    let total = header + stride * CANVAS_SIZE;

    scratch.bytes[..total].copy_from_slice(canvas.data());
    let src = &scratch.bytes[header..total];

    canvas.pixel_data_mut().fill(0);
    for y in 0..CANVAS_SIZE {
        for x in 0..CANVAS_SIZE {
            if src[y * stride + x / 8] & (0x80 >> (x % 8)) != 0 {
                canvas.set_bit(CANVAS_SIZE - 1 - y, x, true);
            }
        }
    }
}

/// Resample rotation for full-color buffers.
///
/// Snapshots the pixel region to scratch, clears to the background, and
/// re-composites the snapshot as one rotated image blit about the buffer
/// center.
fn rotate_resample(canvas: &mut Canvas<'_>, scratch: &mut RotationScratch) {
    let len = canvas.stride() * CANVAS_SIZE;
    scratch.bytes[..len].copy_from_slice(canvas.pixel_data());

    let snapshot = ImageAsset::new(
        canvas.format(),
        CANVAS_SIZE as u32,
        CANVAS_SIZE as u32,
        &scratch.bytes[..len],
    );
    let style = ImageStyle {
        rotation: Rotation::Cw90,
        pivot: Some(Point::new(
            CANVAS_SIZE as i32 / 2,
            CANVAS_SIZE as i32 / 2,
        )),
        recolor: None,
    };

    draw::fill_background(canvas, BACKGROUND);
    draw::draw_image(canvas, 0, 0, &snapshot, Some(&style));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::PALETTE_BYTES;
    use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

    const N: usize = CANVAS_SIZE;
    const INDEXED_BYTES: usize = PixelFormat::Indexed1.buffer_size(N, N);

    fn popcount(canvas: &Canvas<'_>) -> u32 {
        canvas.pixel_data().iter().map(|b| b.count_ones()).sum()
    }

    #[test]
    fn test_single_bit_lands_at_permuted_position() {
        let mut storage = [0u8; INDEXED_BYTES];
        let mut canvas = Canvas::new(PixelFormat::Indexed1, &mut storage);
        canvas.fill(Rgb565::BLACK);
        canvas.set_bit(0, 0, true);

        let mut scratch = RotationScratch::new();
        rotate_canvas(&mut canvas, &mut scratch);

        assert!(canvas.get_bit(67, 0));
        assert_eq!(popcount(&canvas), 1);
    }

    #[test]
    fn test_checkerboard_permutation() {
        let mut storage = [0u8; INDEXED_BYTES];
        let mut canvas = Canvas::new(PixelFormat::Indexed1, &mut storage);
        canvas.fill(Rgb565::BLACK);
        for y in 0..N {
            for x in 0..N {
                canvas.set_bit(x, y, (x + y) % 2 == 0);
            }
        }

        let mut scratch = RotationScratch::new();
        rotate_canvas(&mut canvas, &mut scratch);

        for y in 0..N {
            for x in 0..N {
                assert_eq!(
                    canvas.get_bit(N - 1 - y, x),
                    (x + y) % 2 == 0,
                    "wrong bit for source ({x},{y})"
                );
            }
        }
    }

    #[test]
    fn test_rotation_preserves_popcount() {
        let mut storage = [0u8; INDEXED_BYTES];
        let mut canvas = Canvas::new(PixelFormat::Indexed1, &mut storage);
        canvas.fill(Rgb565::WHITE);
        assert_eq!(popcount(&canvas), (N * N) as u32);

        let mut scratch = RotationScratch::new();
        rotate_canvas(&mut canvas, &mut scratch);

        assert_eq!(popcount(&canvas), (N * N) as u32);
        for y in 0..N {
            for x in 0..N {
                assert!(canvas.get_bit(x, y));
            }
        }
    }

    #[test]
    fn test_all_clear_stays_clear() {
        let mut storage = [0u8; INDEXED_BYTES];
        let mut canvas = Canvas::new(PixelFormat::Indexed1, &mut storage);
        canvas.fill(Rgb565::BLACK);

        let mut scratch = RotationScratch::new();
        rotate_canvas(&mut canvas, &mut scratch);

        assert_eq!(popcount(&canvas), 0);
    }

    #[test]
    fn test_four_rotations_are_identity() {
        let mut storage = [0u8; INDEXED_BYTES];
        let mut canvas = Canvas::new(PixelFormat::Indexed1, &mut storage);
        canvas.fill(Rgb565::BLACK);
        for y in 0..N {
            for x in 0..N {
                canvas.set_bit(x, y, (x * 7 + y * 13) % 5 == 0);
            }
        }

        let mut original = [0u8; INDEXED_BYTES];
        original.copy_from_slice(canvas.data());

        let mut scratch = RotationScratch::new();
        for _ in 0..4 {
            rotate_canvas(&mut canvas, &mut scratch);
        }

        assert_eq!(canvas.data(), &original[..]);
    }

    #[test]
    fn test_header_copied_verbatim() {
        let mut storage = [0u8; INDEXED_BYTES];
        let mut canvas = Canvas::new(PixelFormat::Indexed1, &mut storage);
        canvas.fill(Rgb565::WHITE);

        let mut header = [0u8; PALETTE_BYTES];
        header.copy_from_slice(&canvas.data()[..PALETTE_BYTES]);

        let mut scratch = RotationScratch::new();
        rotate_canvas(&mut canvas, &mut scratch);

        assert_eq!(&canvas.data()[..PALETTE_BYTES], &header);
    }

    #[test]
    fn test_resample_path_moves_single_pixel() {
        let mut storage = [0u8; PixelFormat::Rgb565.buffer_size(N, N)];
        let mut canvas = Canvas::new(PixelFormat::Rgb565, &mut storage);
        canvas.fill(Rgb565::BLACK);
        draw::draw_rect(&mut canvas, 5, 7, 1, 1, &crate::style::RectStyle::new(Rgb565::WHITE));

        let mut scratch = RotationScratch::new();
        rotate_canvas(&mut canvas, &mut scratch);

        let stride = canvas.stride();
        let px = |canvas: &Canvas<'_>, x: usize, y: usize| {
            let offset = y * stride + x * 2;
            u16::from_le_bytes([canvas.pixel_data()[offset], canvas.pixel_data()[offset + 1]])
        };
        // (5, 7) -> (67 - 7, 5) = (60, 5)
        assert_eq!(px(&canvas, 60, 5), 0xFFFF);
        assert_eq!(px(&canvas, 5, 7), 0x0000);
    }

    mod properties {
        extern crate std;

        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Rotation is the exact permutation (x, y) -> (N-1-y, x) for
            /// every bit pattern.
            #[test]
            fn rotation_permutes_every_pattern(rows in proptest::collection::vec(any::<u8>(), N)) {
                let mut storage = [0u8; INDEXED_BYTES];
                let mut canvas = Canvas::new(PixelFormat::Indexed1, &mut storage);
                canvas.fill(Rgb565::BLACK);
                // Expand one random byte per row into a sparse pattern
                for (y, seed) in rows.iter().enumerate() {
                    for x in 0..N {
                        canvas.set_bit(x, y, (seed.wrapping_add(x as u8)) % 3 == 0);
                    }
                }

                let mut before = [0u8; INDEXED_BYTES];
                before.copy_from_slice(canvas.data());
                let reference = Canvas::new(PixelFormat::Indexed1, &mut before);

                let mut scratch = RotationScratch::new();
                rotate_canvas(&mut canvas, &mut scratch);

                for y in 0..N {
                    for x in 0..N {
                        prop_assert_eq!(canvas.get_bit(N - 1 - y, x), reference.get_bit(x, y));
                    }
                }
            }
        }
    }
}
