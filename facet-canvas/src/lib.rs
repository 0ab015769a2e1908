//! Board-agnostic status canvas rendering
//!
//! This crate paints one 68x68 status canvas per display refresh tick and
//! prepares it for a physically rotated panel:
//!
//! - Pixel format adapter (native 16/32-bit color and packed 1-bit)
//! - Draw primitives with reusable style descriptors
//! - 90-degree rotation engine (exact bit remap or resampled blit)
//! - Render pass orchestration and the `FrameSink` handoff trait
//! - ASCII uppercase helper for label text
//!
//! Everything is pure in-memory computation on one execution context; no
//! blocking, no allocation. Display drivers implement [`FrameSink`] and
//! live in their own crates.

#![no_std]
#![deny(unsafe_code)]

pub mod buffer;
pub mod draw;
pub mod format;
pub mod image;
pub mod render;
pub mod rotate;
pub mod style;
pub mod text;

// Re-export key types
pub use buffer::{Canvas, CANVAS_SIZE, MAX_CANVAS_BYTES};
pub use draw::{draw_image, draw_label, draw_line, draw_rect, fill_background, PointF};
pub use format::PixelFormat;
pub use image::ImageAsset;
pub use render::{run, FrameSink, PassState, RenderPass};
pub use rotate::{rotate_canvas, RotationScratch};
pub use style::{ImageStyle, LabelStyle, LineStyle, RectStyle, Rotation, BACKGROUND};
pub use text::uppercased;
