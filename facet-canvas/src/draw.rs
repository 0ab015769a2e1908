//! Draw-primitive layer
//!
//! Format-agnostic paint operations against a canvas. Each operation opens
//! a drawing layer over the buffer and commits it on every exit path,
//! including degenerate no-op input, so primitives are atomic with respect
//! to the canvas and no session state leaks between calls. Commit marks
//! the canvas dirty for the display side.
//!
//! All operations assume validated input; a required style is passed by
//! reference and out-of-range coordinates are clipped, not reported.

use embedded_graphics::{
    draw_target::{DrawTarget, DrawTargetExt},
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::{OriginDimensions, Point, Size},
    primitives::{Line, Primitive, PrimitiveStyle, Rectangle},
    text::{Baseline, Text, TextStyleBuilder},
    Drawable, Pixel,
};
use libm::roundf;

use crate::buffer::Canvas;
use crate::image::ImageAsset;
use crate::style::{ImageStyle, LabelStyle, LineStyle, RectStyle, Rotation};

/// Fixed clip height for labels, tall enough for any realistic one- or
/// two-line label.
pub const LABEL_CLIP_HEIGHT: u32 = 100;

/// A floating-point coordinate pair for polylines.
///
/// Rounded to the nearest integer pixel before rasterization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointF {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl PointF {
    /// Create a point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One paint session over a canvas.
///
/// Committing (on drop) marks the canvas dirty; every primitive holds a
/// layer for exactly the duration of its own paint.
struct Layer<'c, 'b> {
    canvas: &'c mut Canvas<'b>,
}

impl<'c, 'b> Layer<'c, 'b> {
    fn open(canvas: &'c mut Canvas<'b>) -> Self {
        Self { canvas }
    }
}

impl Drop for Layer<'_, '_> {
    fn drop(&mut self) {
        self.canvas.mark_dirty();
    }
}

impl OriginDimensions for Layer<'_, '_> {
    fn size(&self) -> Size {
        self.canvas.size()
    }
}

impl DrawTarget for Layer<'_, '_> {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.canvas.draw_iter(pixels)
    }
}

/// Overwrite every pixel with a single color.
///
/// Always the first operation of a render pass; fully replaces prior
/// contents.
pub fn fill_background(canvas: &mut Canvas<'_>, color: Rgb565) {
    let layer = Layer::open(canvas);
    layer.canvas.fill(color);
}

/// Paint a filled rectangle covering `(x, y)` to `(x + w - 1, y + h - 1)`
/// inclusive.
pub fn draw_rect(canvas: &mut Canvas<'_>, x: i32, y: i32, w: u32, h: u32, style: &RectStyle) {
    let mut layer = Layer::open(canvas);
    let area = Rectangle::new(Point::new(x, y), Size::new(w, h));
    let _ = area
        .into_styled(PrimitiveStyle::with_fill(style.color))
        .draw(&mut layer);
}

/// Draw a polyline through `points`.
///
/// Fewer than two points is a defined no-op. Otherwise `points.len() - 1`
/// consecutive segments are drawn, all styled from the one descriptor.
pub fn draw_line(canvas: &mut Canvas<'_>, points: &[PointF], style: &LineStyle) {
    let mut layer = Layer::open(canvas);
    if points.len() < 2 {
        return;
    }

    let stroke = PrimitiveStyle::with_stroke(style.color, style.width);
    for pair in points.windows(2) {
        let _ = Line::new(round_to_pixel(pair[0]), round_to_pixel(pair[1]))
            .into_styled(stroke)
            .draw(&mut layer);
    }
}

/// Draw text clipped to a `max_w` wide area at `(x, y)`.
///
/// The text is supplied separately from the reusable style so one
/// descriptor serves many strings. Alignment anchors the text within the
/// clip area.
pub fn draw_label(
    canvas: &mut Canvas<'_>,
    x: i32,
    y: i32,
    max_w: u32,
    style: &LabelStyle,
    text: &str,
) {
    use embedded_graphics::text::Alignment;

    let mut layer = Layer::open(canvas);
    let area = Rectangle::new(Point::new(x, y), Size::new(max_w, LABEL_CLIP_HEIGHT));
    let mut clipped = layer.clipped(&area);

    let anchor_x = match style.align {
        Alignment::Left => x,
        Alignment::Center => x + max_w as i32 / 2,
        Alignment::Right => x + max_w as i32,
    };
    let character_style = MonoTextStyle::new(style.font, style.color);
    let text_style = TextStyleBuilder::new()
        .alignment(style.align)
        .baseline(Baseline::Top)
        .build();
    let _ = Text::with_text_style(text, Point::new(anchor_x, y), character_style, text_style)
        .draw(&mut clipped);
}

/// Blit a bitmap asset at `(x, y)`.
///
/// The destination footprint comes from the asset's declared dimensions.
/// `None` for the style means the default: no rotation, no recolor.
pub fn draw_image(
    canvas: &mut Canvas<'_>,
    x: i32,
    y: i32,
    asset: &ImageAsset<'_>,
    style: Option<&ImageStyle>,
) {
    let mut layer = Layer::open(canvas);
    let style = style.copied().unwrap_or_default();
    let asset = *asset;
    let w = asset.width() as i32;
    let h = asset.height() as i32;

    if let Some(pivot) = style.pivot {
        // Rotated blits only support the center pivot; anything else is a
        // caller contract violation.
        debug_assert!(
            style.rotation == Rotation::None || pivot == Point::new(w / 2, h / 2),
            "unsupported blit pivot"
        );
    }

    let origin = Point::new(x, y);
    let _ = layer.draw_iter((0..h).flat_map(move |sy| {
        (0..w).map(move |sx| {
            Pixel(
                blit_dest(origin, sx, sy, w, h, style.rotation),
                asset.color_at(sx as usize, sy as usize, style.recolor),
            )
        })
    }));
}

/// Destination of a source pixel for a quarter-turn blit anchored at
/// `origin`.
fn blit_dest(origin: Point, sx: i32, sy: i32, w: i32, h: i32, rotation: Rotation) -> Point {
    match rotation {
        Rotation::None => Point::new(origin.x + sx, origin.y + sy),
        Rotation::Cw90 => Point::new(origin.x + (h - 1 - sy), origin.y + sx),
        Rotation::Cw180 => Point::new(origin.x + (w - 1 - sx), origin.y + (h - 1 - sy)),
        Rotation::Cw270 => Point::new(origin.x + sy, origin.y + (w - 1 - sx)),
    }
}

/// Round a floating-point coordinate to the nearest integer pixel.
fn round_to_pixel(p: PointF) -> Point {
    Point::new(roundf(p.x) as i32, roundf(p.y) as i32)
}
