//! Sharp memory-in-pixel LCD driver
//!
//! Driver for the 160x68 monochrome panel (LS011B7DH35 class) behind the
//! status canvases, over SPI. The panel is line-addressed: each write
//! sends a mode byte, then per line a 1-based address and 20 data bytes.
//! Addresses and data go out LSB-first on the wire, so bytes are
//! bit-reversed before transmission. Chip select is active high.
//!
//! The panel also requires periodic polarity inversion (VCOM); the driver
//! toggles the VCOM flag on every flush.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::spi::SpiBus;

use facet_canvas::{Canvas, FrameSink, PixelFormat};

use crate::backend::DisplayError;
use crate::framebuffer::{PanelFrame, LINE_BYTES, PANEL_HEIGHT, PANEL_WIDTH};

/// Mode bits, already mirrored for MSB-first transmission.
mod mode {
    /// Write one or more lines.
    pub const WRITE: u8 = 0x80;
    /// VCOM polarity flag, OR-ed into any command.
    pub const VCOM: u8 = 0x40;
    /// Clear the whole panel.
    pub const CLEAR: u8 = 0x20;
}

/// Sharp memory LCD driver.
pub struct SharpMemoryLcd<SPI, CS> {
    spi: SPI,
    cs: CS,
    frame: PanelFrame,
    vcom: bool,
    frame_offset: usize,
}

impl<SPI, CS> SharpMemoryLcd<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    /// Create a new driver over an SPI bus and chip-select pin.
    pub fn new(spi: SPI, cs: CS) -> Self {
        Self {
            spi,
            cs,
            frame: PanelFrame::new(),
            vcom: false,
            frame_offset: 0,
        }
    }

    /// Column offset where pushed frames land on the panel.
    ///
    /// Several status canvases share the 160-wide panel; the content layer
    /// moves the offset between passes to compose them.
    pub fn set_frame_offset(&mut self, x_offset: usize) {
        debug_assert!(x_offset + facet_canvas::CANVAS_SIZE <= PANEL_WIDTH);
        self.frame_offset = x_offset;
    }

    /// Staged panel contents.
    pub fn frame(&self) -> &PanelFrame {
        &self.frame
    }

    /// Clear the panel and the staged frame.
    pub async fn clear(&mut self) -> Result<(), DisplayError> {
        self.frame.clear();
        let command = [mode::CLEAR | self.vcom_bit(), 0x00];
        self.select()?;
        let result = self.spi.write(&command).await;
        self.deselect()?;
        result.map_err(|_| DisplayError::Communication)
    }

    /// Send the staged frame to the panel.
    pub async fn flush(&mut self) -> Result<(), DisplayError> {
        let command = [mode::WRITE | self.vcom_bit()];
        self.vcom = !self.vcom;

        self.select()?;
        let mut result = self.spi.write(&command).await;
        for y in 0..PANEL_HEIGHT {
            if result.is_err() {
                break;
            }
            let mut packet = [0u8; LINE_BYTES + 2];
            packet[0] = line_address(y);
            packet[1..LINE_BYTES + 1].copy_from_slice(self.frame.line(y));
            // Trailing byte of each line stays zero
            result = self.spi.write(&packet).await;
        }
        if result.is_ok() {
            // Final trailer after the last line
            result = self.spi.write(&[0x00]).await;
        }
        self.deselect()?;
        result.map_err(|_| DisplayError::Communication)
    }

    fn vcom_bit(&self) -> u8 {
        if self.vcom {
            mode::VCOM
        } else {
            0
        }
    }

    fn select(&mut self) -> Result<(), DisplayError> {
        self.cs.set_high().map_err(|_| DisplayError::Communication)
    }

    fn deselect(&mut self) -> Result<(), DisplayError> {
        self.cs.set_low().map_err(|_| DisplayError::Communication)
    }
}

impl<SPI, CS> FrameSink for SharpMemoryLcd<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    type Error = DisplayError;

    fn pixel_format(&self) -> PixelFormat {
        PixelFormat::Indexed1
    }

    fn push_frame(&mut self, frame: &Canvas<'_>) -> Result<(), DisplayError> {
        self.frame.blit(frame, self.frame_offset);
        Ok(())
    }
}

/// Wire address of a panel line: 1-based, bit-reversed for LSB-first
/// transmission.
fn line_address(y: usize) -> u8 {
    ((y + 1) as u8).reverse_bits()
}
