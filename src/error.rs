//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`]),
//! frame buffer construction ([`BufferTooSmall`]) and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`BufferTooSmall`] - Frame buffer storage shorter than the panel needs
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//!
//! Out-of-bounds drawing is never an error: coordinates are clamped or
//! ignored.
//!
//! ## Example
//!
//! ```
//! use ssd1322::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Invalid dimensions
//! let result = Dimensions::new(500, 64); // Too wide
//! assert!(result.is_err());
//! ```

use crate::command::{MAX_COLUMN_ADDRESS, MAX_ROW_ADDRESS, PIXELS_PER_COLUMN};
use crate::config::Dimensions;
use crate::interface::DisplayInterface;

/// Maximum panel height supported by the SSD1322 (row addresses 0..=127)
pub const MAX_HEIGHT: u16 = MAX_ROW_ADDRESS as u16 + 1;

/// Maximum panel width supported by the SSD1322 (120 columns of 4 pixels)
pub const MAX_WIDTH: u16 = (MAX_COLUMN_ADDRESS as u16 + 1) * PIXELS_PER_COLUMN;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error while sending a command or its arguments
    ///
    /// Raised by init, window programming and the single-command operations.
    /// Wraps the underlying hardware error from the [`DisplayInterface`]
    /// implementation.
    Interface(I::Error),
    /// One or more pixel data chunks failed during a flush
    ///
    /// Every chunk was still attempted in order. The dirty region is kept, so
    /// the next flush sends the same window again.
    Transfer {
        /// Number of chunks the transport rejected
        failed_chunks: usize,
        /// Error reported for the first rejected chunk
        source: I::Error,
    },
    /// Frame buffer was built for a different panel than the display
    ///
    /// Nothing is sent and the dirty region is kept.
    DimensionMismatch {
        /// Dimensions the display is configured for
        expected: Dimensions,
        /// Dimensions of the frame buffer passed in
        provided: Dimensions,
    },
    /// Buffer is too small for the display
    ///
    /// The provided buffer must be at least `dimensions.buffer_size()` bytes.
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::Transfer { failed_chunks, .. } => {
                write!(f, "Pixel transfer failed for {failed_chunks} chunk(s)")
            }
            Self::DimensionMismatch { expected, provided } => write!(
                f,
                "Frame is {}x{} but display is {}x{}",
                provided.width, provided.height, expected.width, expected.height
            ),
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

impl<I: DisplayInterface> From<BufferTooSmall> for Error<I> {
    fn from(err: BufferTooSmall) -> Self {
        Self::BufferTooSmall {
            required: err.required,
            provided: err.provided,
        }
    }
}

/// Frame buffer storage is shorter than the panel requires
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BufferTooSmall {
    /// Required buffer size in bytes
    pub required: usize,
    /// Provided buffer size in bytes
    pub provided: usize,
}

impl core::fmt::Display for BufferTooSmall {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Buffer too small: required {} bytes, provided {}",
            self.required, self.provided
        )
    }
}

impl core::error::Error for BufferTooSmall {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is created.
#[derive(Debug)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Width requested
        width: u16,
        /// Height requested
        height: u16,
    },
    /// Panel columns plus offset run past the last column address
    ColumnOffsetOutOfRange {
        /// Configured column offset
        offset: u8,
        /// Column addresses the panel width needs
        columns: u16,
    },
    /// Initialization table has a malformed record
    InvalidInitSequence {
        /// Byte offset of the bad record
        offset: usize,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (max {MAX_WIDTH}x{MAX_HEIGHT}, width must be multiple of 4)"
            ),
            Self::ColumnOffsetOutOfRange { offset, columns } => write!(
                f,
                "Column offset {offset} with {columns} columns exceeds controller RAM"
            ),
            Self::InvalidInitSequence { offset } => {
                write!(f, "Malformed init sequence record at byte {offset}")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
