//! SSD1322 command definitions
//!
//! This module defines the command bytes used to control the SSD1322
//! grayscale OLED controller, plus the default initialization table.
//!
//! ## Command Structure
//!
//! Over SPI, the opcode is sent with the DC pin low and any arguments follow
//! with the DC pin high. Over I2C the same split is expressed in-band with a
//! control byte ([`I2C_CONTROL_COMMAND`] or [`I2C_CONTROL_DATA`]) in front of
//! each write.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ssd1322::{command, DisplayInterface, SpiInterface};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # let mut interface = SpiInterface::new(MockSpi, MockPin, MockPin);
//! // Program a one-column, one-row window and start a RAM write
//! let _ = interface.send_command_with_args(command::SET_ROW_ADDRESS, &[0, 0]);
//! let _ = interface.send_command_with_args(command::SET_COLUMN_ADDRESS, &[28, 28]);
//! let _ = interface.send_command(command::WRITE_RAM);
//! let _ = interface.send_data(&[0xFF, 0xFF]);
//! ```

// Addressing commands

/// Set column address command (0x15)
///
/// Requires 2 bytes: [start, end] in column units of 4 pixels,
/// including the panel column offset.
pub const SET_COLUMN_ADDRESS: u8 = 0x15;

/// Set row address command (0x75)
///
/// Requires 2 bytes: [start, end] in pixel rows.
pub const SET_ROW_ADDRESS: u8 = 0x75;

/// Write RAM command (0x5C)
///
/// Every data byte after this command fills the programmed window, row-major.
pub const WRITE_RAM: u8 = 0x5C;

// Display mode commands

/// Normal display mode (0xA6)
pub const NORMAL_DISPLAY: u8 = 0xA6;

/// Inverse display mode (0xA7)
///
/// Gray level 0 is shown as full brightness and vice versa.
pub const INVERT_DISPLAY: u8 = 0xA7;

/// Display off / sleep (0xAE)
pub const DISPLAY_OFF: u8 = 0xAE;

/// Display on (0xAF)
pub const DISPLAY_ON: u8 = 0xAF;

/// Set contrast current command (0xC1)
///
/// Requires 1 byte.
pub const SET_CONTRAST: u8 = 0xC1;

// Panel geometry

/// Column offset of the 256-pixel-wide panel inside the 480-pixel controller RAM
pub const DEFAULT_COLUMN_OFFSET: u8 = 28;

/// Pixels covered by one controller column address
pub const PIXELS_PER_COLUMN: u16 = 4;

/// Frame buffer bytes covered by one controller column address (4 pixels at 4 bpp)
pub const BYTES_PER_COLUMN: usize = 2;

/// Highest column address the controller accepts
pub const MAX_COLUMN_ADDRESS: u8 = 119;

/// Highest row address the controller accepts
pub const MAX_ROW_ADDRESS: u8 = 127;

// I2C framing

/// Default 7-bit I2C address
pub const DEFAULT_I2C_ADDRESS: u8 = 0x3D;

/// I2C control byte announcing command bytes
pub const I2C_CONTROL_COMMAND: u8 = 0x00;

/// I2C control byte announcing data bytes
pub const I2C_CONTROL_DATA: u8 = 0x40;

/// Default initialization table for 256x64 panels
///
/// Each record is `count, opcode, args...` where `count` includes the opcode.
#[rustfmt::skip]
pub const INIT_256X64: &[u8] = &[
    2, 0xFD, 0x12,              // unlock
    1, 0xAE,                    // display off
    2, 0xB3, 0x91,              // clock divide ratio / oscillator frequency
    2, 0xCA, 0x3F,              // multiplex ratio 1/64
    2, 0xA2, 0x00,              // display offset
    2, 0xA1, 0x00,              // display start line
    3, 0xA0, 0x06, 0x11,        // re-map / dual COM line mode
    2, 0xAB, 0x01,              // internal VDD regulator
    3, 0xB4, 0xA0, 0x05 | 0xFD, // display enhancement A
    2, 0xC1, 0x9F,              // contrast
    2, 0xC7, 0x0F,              // master contrast current
    1, 0xB9,                    // linear grayscale table
    2, 0xB1, 0xE2,              // phase 1 / phase 2 period
    3, 0xD1, 0x82 | 0x20, 0x20, // display enhancement B
    2, 0xBB, 0x1F,              // precharge voltage
    2, 0xB6, 0x08,              // second precharge period
    2, 0xBE, 0x07,              // VCOMH
    1, 0xA6,                    // normal display
    1, 0xA9,                    // exit partial display
];

/// One record of an initialization table
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InitCommand<'a> {
    /// Command opcode
    pub opcode: u8,
    /// Argument bytes, possibly empty
    pub args: &'a [u8],
}

/// Iterator over the records of an initialization table
///
/// Stops at the first malformed record; use [`validate_init_sequence`] to
/// detect one up front.
#[derive(Clone, Debug)]
pub struct InitCommands<'a> {
    table: &'a [u8],
}

impl<'a> InitCommands<'a> {
    /// Iterate over `table`
    pub fn new(table: &'a [u8]) -> Self {
        Self { table }
    }
}

impl<'a> Iterator for InitCommands<'a> {
    type Item = InitCommand<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (&count, rest) = self.table.split_first()?;
        let count = count as usize;
        if count == 0 || rest.len() < count {
            self.table = &[];
            return None;
        }
        let (record, tail) = rest.split_at(count);
        self.table = tail;
        Some(InitCommand {
            opcode: record[0],
            args: &record[1..],
        })
    }
}

/// Check that every record of `table` is complete
///
/// # Errors
///
/// Returns the byte offset of the first malformed record (a zero count, or a
/// count running past the end of the table).
pub fn validate_init_sequence(table: &[u8]) -> Result<(), usize> {
    let mut offset = 0;
    while offset < table.len() {
        let count = table[offset] as usize;
        if count == 0 || offset + 1 + count > table.len() {
            return Err(offset);
        }
        offset += 1 + count;
    }
    Ok(())
}
