//! Core display operations

use embedded_hal::delay::DelayNs;

use crate::command::{
    DISPLAY_OFF, DISPLAY_ON, INVERT_DISPLAY, InitCommands, NORMAL_DISPLAY, SET_COLUMN_ADDRESS,
    SET_CONTRAST, SET_ROW_ADDRESS, WRITE_RAM,
};
use crate::config::{Config, Dimensions, Rotation};
use crate::error::Error;
use crate::framebuffer::FrameBuffer;
use crate::interface::DisplayInterface;
use crate::speed::with_burst_speed;
use crate::transfer::{self, Yield};
use crate::window::AddressWindow;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Summary of a flush
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlushStats {
    /// Window that was sent, `None` if nothing was dirty
    pub window: Option<AddressWindow>,
    /// Data chunks written
    pub chunks: usize,
    /// Pixel bytes written
    pub bytes: usize,
}

/// Core display driver for SSD1322
///
/// This struct provides low-level operations for the SSD1322 controller.
/// Pixels live in a [`FrameBuffer`] owned by the caller and reach the panel
/// through [`flush`](Self::flush). For graphics support, use
/// `GraphicDisplay` (requires `graphics` feature).
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    pub fn new(interface: I, config: Config) -> Self {
        Self { interface, config }
    }

    /// Perform hardware reset and initialization
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.interface.reset(delay);
        self.init(delay)
    }

    /// Send the configured initialization table and switch the panel on
    ///
    /// Records go out in table order exactly as stored, followed by a 2 ms
    /// pause and display-on.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        let table = self.config.init_sequence;
        let mut sent = 0usize;
        for record in InitCommands::new(table) {
            self.interface
                .send_command_with_args(record.opcode, record.args)
                .map_err(Error::Interface)?;
            sent += 1;
        }
        delay.delay_ms(2);
        self.send_command(DISPLAY_ON)?;
        log::debug!("init sent {sent} commands, display on");
        Ok(())
    }

    /// Send the dirty region of `frame` to the panel
    ///
    /// Programs the controller window to cover the dirty rectangle (rounded
    /// out to whole column units), then streams every row of that window in
    /// chunks the transport accepts. The bus runs at burst speed for the
    /// duration and is put back to idle speed afterwards, on every path.
    ///
    /// `cooperate` runs once before anything else and once after each chunk.
    ///
    /// A clean frame sends nothing and returns `FlushStats::default()`. On
    /// success the dirty region is cleared; on any error it is kept so the
    /// next flush covers the same pixels again.
    ///
    /// # Errors
    ///
    /// - `Error::DimensionMismatch` if `frame` was built for another panel size
    /// - `Error::Interface` if programming the window fails
    /// - `Error::Transfer` if one or more data chunks fail
    pub fn flush<B, Y>(
        &mut self,
        frame: &mut FrameBuffer<B>,
        cooperate: &mut Y,
    ) -> core::result::Result<FlushStats, Error<I>>
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
        Y: Yield + ?Sized,
    {
        cooperate.yield_now();

        let Some(region) = frame.dirty().region() else {
            return Ok(FlushStats::default());
        };

        let dimensions = self.config.dimensions;
        if frame.dimensions() != dimensions {
            log::warn!(
                "frame is {}x{}, display is {}x{}",
                frame.dimensions().width,
                frame.dimensions().height,
                dimensions.width,
                dimensions.height
            );
            return Err(Error::DimensionMismatch {
                expected: dimensions,
                provided: frame.dimensions(),
            });
        }

        let window = AddressWindow::encode(region, dimensions, self.config.column_offset);
        let bytes_per_row = dimensions.bytes_per_row();
        log::debug!(
            "flush rows {}..={} columns {:?} ({} bytes)",
            window.row_start,
            window.row_end,
            window.column_args(),
            window.byte_len()
        );

        let buffer = frame.as_bytes();
        let report = with_burst_speed(&mut self.interface, self.config.bus_speeds, |interface| {
            if let Err(err) = program_window(interface, window) {
                log::warn!("window programming failed: {err:?}");
                return Err(Error::Interface(err));
            }
            Ok(transfer::stream(
                interface,
                buffer,
                window,
                bytes_per_row,
                cooperate,
            ))
        })?;

        if let Some(source) = report.first_error {
            return Err(Error::Transfer {
                failed_chunks: report.failed_chunks,
                source,
            });
        }

        frame.dirty_mut().reset();
        Ok(FlushStats {
            window: Some(window),
            chunks: report.chunks,
            bytes: report.bytes,
        })
    }

    /// Invert the panel output
    ///
    /// Only the controller's display mode changes; buffer contents and the
    /// dirty region are untouched.
    pub fn invert(&mut self, inverted: bool) -> DisplayResult<I> {
        self.send_command(if inverted {
            INVERT_DISPLAY
        } else {
            NORMAL_DISPLAY
        })
    }

    /// Switch the panel on or off
    pub fn set_display_on(&mut self, on: bool) -> DisplayResult<I> {
        self.send_command(if on { DISPLAY_ON } else { DISPLAY_OFF })
    }

    /// Set segment output current (contrast)
    pub fn set_contrast(&mut self, level: u8) -> DisplayResult<I> {
        self.interface
            .send_command_with_args(SET_CONTRAST, &[level])
            .map_err(Error::Interface)
    }

    /// Send a command to the display controller
    fn send_command(&mut self, cmd: u8) -> DisplayResult<I> {
        self.interface.send_command(cmd).map_err(Error::Interface)
    }

    /// Get display dimensions
    pub fn dimensions(&self) -> &Dimensions {
        &self.config.dimensions
    }

    /// Get display rotation
    ///
    /// The driver itself never rotates anything. Frames built with
    /// [`FrameBuffer::for_config`] draw with this rotation; frames built with
    /// [`FrameBuffer::new`] stay unrotated until told otherwise.
    pub fn rotation(&self) -> Rotation {
        self.config.rotation
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Access the hardware interface
    pub fn interface(&self) -> &I {
        &self.interface
    }

    /// Mutable access to the hardware interface
    pub fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }

    /// Release the hardware interface
    pub fn release(self) -> I {
        self.interface
    }
}

/// Row window, column window, then write-RAM
fn program_window<I: DisplayInterface>(
    interface: &mut I,
    window: AddressWindow,
) -> core::result::Result<(), I::Error> {
    interface.send_command_with_args(SET_ROW_ADDRESS, &window.row_args())?;
    interface.send_command_with_args(SET_COLUMN_ADDRESS, &window.column_args())?;
    interface.send_command(WRITE_RAM)
}
