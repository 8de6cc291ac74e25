//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and two transports
//! for talking to the SSD1322 controller:
//!
//! - [`SpiInterface`]: point-to-point SPI with a DC (data/command) pin and a
//!   reset pin. Fixed speed, no limit on the size of a single write.
//! - [`I2cInterface`]: addressed I2C bus. Data/command selection is sent
//!   in-band as a control byte, writes are limited by the host's transfer
//!   buffer, and the bus clock can be switched through a [`BusClock`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use ssd1322::{DisplayInterface, SpiInterface};
//! # use core::convert::Infallible;
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
//! // Create interface with SPI, DC and RST pins
//! let mut interface = SpiInterface::new(MockSpi, MockPin, MockPin);
//!
//! // Send command
//! let _ = interface.send_command(0xAF); // Display on
//!
//! // Send data
//! let _ = interface.send_data(&[0xFF, 0x00, 0xFF]);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::{I2c, Operation as I2cOperation};
use embedded_hal::spi::SpiDevice;

use crate::command::{DEFAULT_I2C_ADDRESS, I2C_CONTROL_COMMAND, I2C_CONTROL_DATA};

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for hardware interface to SSD1322 controller
///
/// This trait abstracts over the transports the controller can sit on,
/// allowing the [`Display`](crate::display::Display) to stream pixels the
/// same way over SPI and I2C.
///
/// ## Implementing
///
/// For most cases, use [`SpiInterface`] or [`I2cInterface`]. Custom
/// transports only need the command/data primitives and a reset; the
/// chunk-size and speed capabilities have defaults suited to a fixed-speed,
/// unbounded point-to-point link.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send a single command byte to the controller
    ///
    /// # Errors
    ///
    /// Returns an error if the bus transfer or GPIO fails.
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error>;

    /// Send a command byte followed by its arguments
    ///
    /// The SSD1322 reads command arguments as data, so the default sends
    /// `command` through [`send_command`](Self::send_command) and `args`
    /// through [`send_data`](Self::send_data).
    ///
    /// # Errors
    ///
    /// Returns an error if the bus transfer or GPIO fails.
    fn send_command_with_args(
        &mut self,
        command: u8,
        args: &[u8],
    ) -> InterfaceResult<(), Self::Error> {
        self.send_command(command)?;
        if !args.is_empty() {
            self.send_data(args)?;
        }
        Ok(())
    }

    /// Send data bytes to the controller
    ///
    /// Callers never pass more than [`max_chunk_size`](Self::max_chunk_size)
    /// bytes at once.
    ///
    /// # Errors
    ///
    /// Returns an error if the bus transfer or GPIO fails.
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Largest number of data bytes accepted by one [`send_data`](Self::send_data)
    fn max_chunk_size(&self) -> usize {
        usize::MAX
    }

    /// Switch the bus clock to `hz`
    ///
    /// Transports with a fixed clock ignore this.
    fn set_speed(&mut self, _hz: u32) {}

    /// Perform hardware reset
    ///
    /// # Arguments
    ///
    /// * `delay` - Delay implementation for timing
    fn reset<D: DelayNs>(&mut self, delay: &mut D);
}

/// Errors that can occur at the interface level
///
/// Generic over bus and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<BusErr, PinErr> {
    /// SPI or I2C communication error
    Bus(BusErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<BusErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<BusErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "Bus error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<BusErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<BusErr, PinErr> {}

/// SPI interface implementation for SSD1322
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 SPI and GPIO traits.
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`] (handles chip select)
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
pub struct SpiInterface<SPI, DC, RST> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: RST,
}

impl<SPI, DC, RST> SpiInterface<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a new SpiInterface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI device (must implement [`SpiDevice`])
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `rst` - Reset pin (output, active low)
    pub fn new(spi: SPI, dc: DC, rst: RST) -> Self {
        Self { spi, dc, rst }
    }

    /// Release the SPI device and pins
    pub fn release(self) -> (SPI, DC, RST) {
        (self.spi, self.dc, self.rst)
    }
}

impl<SPI, DC, RST, PinErr> DisplayInterface for SpiInterface<SPI, DC, RST>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(&[command]).map_err(InterfaceError::Bus)?;
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Bus)?;
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) {
        // Reset sequence: HIGH -> LOW 10ms -> HIGH, then let the charge pump settle
        let _ = self.rst.set_high();
        delay.delay_ms(10);
        let _ = self.rst.set_low();
        delay.delay_ms(10);
        let _ = self.rst.set_high();
        delay.delay_ms(10);
    }
}

/// Bus clock control for addressed transports
///
/// embedded-hal has no portable way to change an I2C clock, so the
/// [`I2cInterface`] delegates to this hook. Any `FnMut(u32)` works.
pub trait BusClock {
    /// Reconfigure the bus clock to `hz`
    fn set_frequency(&mut self, hz: u32);
}

impl<F: FnMut(u32)> BusClock for F {
    fn set_frequency(&mut self, hz: u32) {
        self(hz);
    }
}

/// Default host transfer buffer size for I2C writes
///
/// One byte of it is taken by the control byte.
pub const DEFAULT_I2C_BUFFER_SIZE: usize = 32;

/// I2C interface implementation for SSD1322
///
/// Every write starts with a control byte: [`I2C_CONTROL_COMMAND`] for
/// commands, [`I2C_CONTROL_DATA`] for data and command arguments.
///
/// ## Type Parameters
///
/// * `I2C` - I2C bus implementing [`I2c`]
/// * `CLK` - Clock hook implementing [`BusClock`]; a no-op by default
pub struct I2cInterface<I2C, CLK = fn(u32)> {
    /// I2C bus
    i2c: I2C,
    /// 7-bit device address
    address: u8,
    /// Host transfer buffer size, control byte included
    buffer_size: usize,
    /// Bus clock hook
    clock: CLK,
}

fn fixed_clock(_hz: u32) {}

impl<I2C: I2c> I2cInterface<I2C> {
    /// Create a new I2cInterface at the default address (0x3D) with a fixed clock
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_I2C_ADDRESS)
    }

    /// Create a new I2cInterface at `address` with a fixed clock
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            buffer_size: DEFAULT_I2C_BUFFER_SIZE,
            clock: fixed_clock,
        }
    }
}

impl<I2C: I2c, CLK: BusClock> I2cInterface<I2C, CLK> {
    /// Attach a bus clock hook used for burst/idle switching
    pub fn with_clock<C: BusClock>(self, clock: C) -> I2cInterface<I2C, C> {
        I2cInterface {
            i2c: self.i2c,
            address: self.address,
            buffer_size: self.buffer_size,
            clock,
        }
    }

    /// Set the host transfer buffer size, control byte included
    ///
    /// Values below 2 are raised to 2 so every write carries at least one
    /// data byte.
    pub fn set_buffer_size(&mut self, size: usize) -> &mut Self {
        self.buffer_size = size.max(2);
        self
    }

    /// Get the host transfer buffer size
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Get the device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the I2C bus and clock hook
    pub fn release(self) -> (I2C, CLK) {
        (self.i2c, self.clock)
    }

    fn write_framed(&mut self, control: u8, bytes: &[u8]) -> InterfaceResult<(), I2C::Error> {
        // Adjacent writes in one transaction go out without a repeated start
        self.i2c.transaction(
            self.address,
            &mut [I2cOperation::Write(&[control]), I2cOperation::Write(bytes)],
        )
    }
}

impl<I2C, CLK> DisplayInterface for I2cInterface<I2C, CLK>
where
    I2C: I2c,
    CLK: BusClock,
{
    type Error = InterfaceError<I2C::Error, core::convert::Infallible>;

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.write_framed(I2C_CONTROL_COMMAND, &[command])
            .map_err(InterfaceError::Bus)
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.write_framed(I2C_CONTROL_DATA, data)
            .map_err(InterfaceError::Bus)
    }

    fn max_chunk_size(&self) -> usize {
        self.buffer_size - 1
    }

    fn set_speed(&mut self, hz: u32) {
        self.clock.set_frequency(hz);
    }

    fn reset<D: DelayNs>(&mut self, _delay: &mut D) {
        // No reset line on this transport; the panel shares the host reset
    }
}
