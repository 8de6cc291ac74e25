//! SSD1322 Grayscale OLED Driver
//!
//! A driver for the SSD1322 controller driving 4-bit grayscale OLED panels up
//! to 480x128 pixels, over SPI or I2C.
//!
//! Drawing goes into a caller-owned [`FrameBuffer`] that tracks the bounding
//! box of everything touched since the last flush. [`Display::flush`] sends
//! only that region: it programs the controller's address window, then
//! streams the rows in chunks sized for the transport, yielding to the host
//! between chunks. On I2C the bus is raised to a burst clock for the flush and
//! put back to its idle clock afterwards.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Dirty-window partial flushes
//! - SPI and I2C transports with chunked, cooperative transfers
//! - Rotation support
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use ssd1322::{Builder, Dimensions, Display, FrameBuffer, Gray, SpiInterface};
//!
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
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let mut delay = MockDelay;
//! let interface = SpiInterface::new(spi, dc, rst);
//! let dims = match Dimensions::new(256, 64) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(interface, config);
//! let _ = display.reset(&mut delay);
//!
//! let mut frame = match FrameBuffer::new([0u8; 256 * 64 / 2], dims) {
//!     Ok(frame) => frame,
//!     Err(_) => return,
//! };
//! frame.set_pixel(10, 10, Gray::WHITE);
//!
//! // Only the 4x1 column unit around (10, 10) goes over the bus
//! let _ = display.flush(&mut frame, &mut || {});
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// 4-bit grayscale color type
pub mod color;
/// SSD1322 command definitions and init table
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Dirty region tracking
pub mod dirty;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Packed 4-bit frame buffer
pub mod framebuffer;
/// Hardware interface abstraction
pub mod interface;
/// Coordinate rotation utilities
pub mod rotation;
/// Bus speed switching around bulk transfers
pub mod speed;
/// Chunked pixel transfer
pub mod transfer;
/// Address window encoding
pub mod window;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use color::Gray;
pub use config::{Builder, Config, Dimensions, MAX_HEIGHT, MAX_WIDTH, Rotation};
pub use display::{Display, FlushStats};
pub use error::{BufferTooSmall, BuilderError, Error};
pub use framebuffer::FrameBuffer;
pub use interface::InterfaceError;
pub use interface::{BusClock, DisplayInterface, I2cInterface, SpiInterface};
pub use speed::BusSpeeds;
pub use transfer::Yield;
pub use window::AddressWindow;

#[cfg(feature = "graphics")]
pub use graphics::GraphicDisplay;
