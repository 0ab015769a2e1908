//! Display-side errors
//!
//! The frame handoff trait itself ([`FrameSink`]) lives in `facet-canvas`;
//! this module only adds the error type drivers report through it.
//!
//! [`FrameSink`]: facet_canvas::FrameSink

/// Errors that can occur when talking to the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// SPI or chip-select failure while writing to the panel.
    Communication,
}
