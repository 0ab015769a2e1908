//! Render pass orchestration
//!
//! One pass per display refresh tick: fill the background, let the content
//! layer issue primitive draws, rotate, hand the frame to the sink. The
//! pass owns the canvas for its duration; the caller serializes passes if
//! the host is multi-threaded.

use embedded_graphics::pixelcolor::Rgb565;

use crate::buffer::Canvas;
use crate::draw;
use crate::format::PixelFormat;
use crate::rotate::{rotate_canvas, RotationScratch};

/// Consumer of finished frames.
///
/// Implemented by display drivers. `pixel_format` is queried when building
/// the canvas so buffer layout matches what the sink accepts bit-for-bit;
/// `push_frame` stages a rotated frame for output.
pub trait FrameSink {
    /// Error type for frame handoff.
    type Error;

    /// Pixel format this sink accepts.
    fn pixel_format(&self) -> PixelFormat;

    /// Accept a finished, rotated frame.
    fn push_frame(&mut self, frame: &Canvas<'_>) -> Result<(), Self::Error>;
}

/// Phases of one render pass.
///
/// `Rotated` is terminal: [`RenderPass::finish`] consumes the pass when
/// reaching it, so a live pass only ever reports the first three phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PassState {
    /// Nothing painted yet.
    Idle,
    /// Background filled, no primitives drawn.
    Filled,
    /// At least one primitive drawn.
    Painting,
    /// Rotated and ready for handoff.
    Rotated,
}

/// One fill-paint-rotate sequence over a canvas.
///
/// Rotation happens exactly once, by consuming the pass; painting after
/// rotation is unrepresentable. Filling before painting is a checked
/// caller contract.
pub struct RenderPass<'p, 'b> {
    canvas: &'p mut Canvas<'b>,
    scratch: &'p mut RotationScratch,
    state: PassState,
}

impl<'p, 'b> RenderPass<'p, 'b> {
    /// Start a pass over a canvas and its scratch arena.
    pub fn begin(canvas: &'p mut Canvas<'b>, scratch: &'p mut RotationScratch) -> Self {
        Self {
            canvas,
            scratch,
            state: PassState::Idle,
        }
    }

    /// Current phase of the pass.
    pub fn state(&self) -> PassState {
        self.state
    }

    /// Fill the background; must be the first operation of the pass.
    pub fn fill(&mut self, color: Rgb565) {
        debug_assert_eq!(self.state, PassState::Idle, "fill after painting started");
        draw::fill_background(self.canvas, color);
        self.state = PassState::Filled;
    }

    /// Borrow the canvas for primitive draws.
    ///
    /// Caller contract: the background has been filled.
    pub fn canvas(&mut self) -> &mut Canvas<'b> {
        debug_assert!(
            matches!(self.state, PassState::Filled | PassState::Painting),
            "painting before fill"
        );
        self.state = PassState::Painting;
        self.canvas
    }

    /// Rotate and finish the pass, yielding the display-ready frame.
    pub fn finish(self) -> &'p mut Canvas<'b> {
        debug_assert!(
            matches!(self.state, PassState::Filled | PassState::Painting),
            "finish before fill"
        );
        rotate_canvas(self.canvas, self.scratch);
        self.canvas
    }
}

/// Drive one complete render pass against a sink.
///
/// Fills with `background`, lets `paint` issue primitive draws, rotates,
/// and pushes the frame.
pub fn run<S: FrameSink>(
    sink: &mut S,
    canvas: &mut Canvas<'_>,
    scratch: &mut RotationScratch,
    background: Rgb565,
    paint: impl FnOnce(&mut Canvas<'_>),
) -> Result<(), S::Error> {
    debug_assert_eq!(
        canvas.format(),
        sink.pixel_format(),
        "canvas format does not match sink"
    );

    let mut pass = RenderPass::begin(canvas, scratch);
    pass.fill(background);
    paint(pass.canvas());
    let frame = pass.finish();
    sink.push_frame(frame)?;
    frame.mark_clean();
    Ok(())
}
