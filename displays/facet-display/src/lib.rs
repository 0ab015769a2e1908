//! Display side of the Facet status screen
//!
//! This crate provides:
//! - `PanelFrame`, the packed 160x68 framebuffer the rotated status
//!   canvases are composed into
//! - `SharpMemoryLcd`, an SPI driver for the memory-in-pixel panel,
//!   implementing the `FrameSink` trait from `facet-canvas`
//! - `DisplayError` for driver failures
//!
//! Rendering stays board-agnostic in `facet-canvas`; only the byte layout
//! of the wire protocol and the panel geometry live here.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod framebuffer;
pub mod sharp;

// Re-export key types
pub use backend::DisplayError;
pub use framebuffer::{PanelFrame, LINE_BYTES, PANEL_HEIGHT, PANEL_WIDTH};
pub use sharp::SharpMemoryLcd;
