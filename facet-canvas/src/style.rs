//! Drawing descriptors
//!
//! Reusable style bundles, one per primitive kind. A descriptor carries
//! style only; position and size are supplied at draw time, so one
//! descriptor serves many placements. Descriptors are plain immutable
//! values once constructed.

use embedded_graphics::{
    mono_font::MonoFont,
    pixelcolor::{Rgb565, RgbColor},
    prelude::Point,
    text::Alignment,
};

/// Background color of every canvas; also the clear color used when the
/// rotation engine re-composites a full-color buffer.
pub const BACKGROUND: Rgb565 = Rgb565::BLACK;

/// Style for filled rectangles.
#[derive(Debug, Clone, Copy)]
pub struct RectStyle {
    /// Fill color.
    pub color: Rgb565,
}

impl RectStyle {
    /// Create a rectangle style with the given fill color.
    pub const fn new(color: Rgb565) -> Self {
        Self { color }
    }
}

/// Style for polylines.
#[derive(Debug, Clone, Copy)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Rgb565,
    /// Stroke width in pixels.
    pub width: u32,
}

impl LineStyle {
    /// Create a line style with the given stroke color and width.
    pub const fn new(color: Rgb565, width: u32) -> Self {
        Self { color, width }
    }
}

/// Style for text labels.
///
/// The text itself is passed at draw time; one label style is shared by
/// many distinct strings.
#[derive(Clone, Copy)]
pub struct LabelStyle {
    /// Text color.
    pub color: Rgb565,
    /// Font reference.
    pub font: &'static MonoFont<'static>,
    /// Horizontal alignment within the clip area.
    pub align: Alignment,
}

impl LabelStyle {
    /// Create a label style.
    pub const fn new(color: Rgb565, font: &'static MonoFont<'static>, align: Alignment) -> Self {
        Self { color, font, align }
    }
}

/// Quarter-turn rotations supported for image blits.
///
/// Arbitrary angles are out of scope; the canvas itself only ever needs a
/// single clockwise quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// No rotation.
    #[default]
    None,
    /// 90 degrees clockwise.
    Cw90,
    /// 180 degrees.
    Cw180,
    /// 270 degrees clockwise.
    Cw270,
}

/// Style for image blits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageStyle {
    /// Rotation applied to the blit.
    pub rotation: Rotation,
    /// Rotation pivot; `None` pivots about the asset center.
    ///
    /// Only the center pivot is honored for rotated blits.
    pub pivot: Option<Point>,
    /// Foreground color override for 1-bit assets.
    pub recolor: Option<Rgb565>,
}

impl ImageStyle {
    /// Style for a rotated blit about the asset center.
    pub const fn rotated(rotation: Rotation) -> Self {
        Self {
            rotation,
            pivot: None,
            recolor: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_style_default_is_plain_blit() {
        let style = ImageStyle::default();
        assert_eq!(style.rotation, Rotation::None);
        assert!(style.pivot.is_none());
        assert!(style.recolor.is_none());
    }
}
