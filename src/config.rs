//! Display configuration types and builder

use crate::command::{
    DEFAULT_COLUMN_OFFSET, INIT_256X64, MAX_COLUMN_ADDRESS, PIXELS_PER_COLUMN,
    validate_init_sequence,
};
pub use crate::error::{BuilderError, MAX_HEIGHT, MAX_WIDTH};
pub use crate::speed::BusSpeeds;

/// Display dimensions in physical (unrotated) pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    /// Width in pixels (segment direction)
    pub width: u16,
    /// Height in pixels (common direction)
    pub height: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - width is zero, above [`MAX_WIDTH`], or not a multiple of 4
    /// - height is zero or above [`MAX_HEIGHT`]
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || width > MAX_WIDTH || width % PIXELS_PER_COLUMN != 0 {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        if height == 0 || height > MAX_HEIGHT {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Bytes in one buffer row (two pixels per byte)
    pub fn bytes_per_row(&self) -> usize {
        self.width as usize / 2
    }

    /// Calculate required buffer size in bytes
    pub fn buffer_size(&self) -> usize {
        self.bytes_per_row() * self.height as usize
    }

    /// Number of controller column addresses spanned by the width
    pub fn columns(&self) -> u16 {
        self.width / PIXELS_PER_COLUMN
    }
}

/// Display rotation relative to native orientation
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Rotation {
    /// No rotation
    #[default]
    Rotate0,
    /// Rotate 90 degrees clockwise
    Rotate90,
    /// Rotate 180 degrees
    Rotate180,
    /// Rotate 270 degrees clockwise
    Rotate270,
}

/// Display configuration
///
/// Use [`Builder`] to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Display dimensions
    pub dimensions: Dimensions,
    /// Display rotation
    pub rotation: Rotation,
    /// Column address of the panel's first pixel column
    pub column_offset: u8,
    /// Bus clock rates used around flushes
    pub bus_speeds: BusSpeeds,
    /// Initialization table sent by `init`
    pub init_sequence: &'static [u8],
}

impl Config {
    /// Get the rotated dimensions based on rotation setting
    pub fn rotated_dimensions(&self) -> Dimensions {
        match self.rotation {
            Rotation::Rotate0 | Rotation::Rotate180 => self.dimensions,
            Rotation::Rotate90 | Rotation::Rotate270 => Dimensions {
                width: self.dimensions.height,
                height: self.dimensions.width,
            },
        }
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust,no_run
/// use ssd1322::{BusSpeeds, Builder, Dimensions, Rotation};
///
/// let dims = match Dimensions::new(256, 64) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new()
///     .dimensions(dims)
///     .rotation(Rotation::Rotate180)
///     .bus_speeds(BusSpeeds::new(1_000_000, 100_000))
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
pub struct Builder {
    /// Display dimensions (required)
    dimensions: Option<Dimensions>,
    /// Display rotation
    rotation: Rotation,
    /// Column address of the panel's first pixel column
    column_offset: u8,
    /// Bus clock rates used around flushes
    bus_speeds: BusSpeeds,
    /// Initialization table
    init_sequence: &'static [u8],
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            rotation: Rotation::Rotate0,
            // 256-wide panels sit in the middle of the 480-pixel RAM
            column_offset: DEFAULT_COLUMN_OFFSET,
            bus_speeds: BusSpeeds::default(),
            init_sequence: INIT_256X64,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set display rotation
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the column address of the panel's first pixel column
    pub fn column_offset(mut self, offset: u8) -> Self {
        self.column_offset = offset;
        self
    }

    /// Set burst and idle bus clock rates
    ///
    /// Only transports with adjustable speed (I2C) act on these.
    pub fn bus_speeds(mut self, speeds: BusSpeeds) -> Self {
        self.bus_speeds = speeds;
        self
    }

    /// Replace the initialization table
    ///
    /// Records are `count, opcode, args...` with `count` including the opcode.
    pub fn init_sequence(mut self, table: &'static [u8]) -> Self {
        self.init_sequence = table;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// - `BuilderError::MissingDimensions` if dimensions were not set
    /// - `BuilderError::ColumnOffsetOutOfRange` if the panel does not fit in
    ///   controller RAM at the configured offset
    /// - `BuilderError::InvalidInitSequence` if the init table is malformed
    pub fn build(self) -> Result<Config, BuilderError> {
        let dimensions = self.dimensions.ok_or(BuilderError::MissingDimensions)?;
        let columns = dimensions.columns();
        if u16::from(self.column_offset) + columns > u16::from(MAX_COLUMN_ADDRESS) + 1 {
            return Err(BuilderError::ColumnOffsetOutOfRange {
                offset: self.column_offset,
                columns,
            });
        }
        validate_init_sequence(self.init_sequence)
            .map_err(|offset| BuilderError::InvalidInitSequence { offset })?;
        Ok(Config {
            dimensions,
            rotation: self.rotation,
            column_offset: self.column_offset,
            bus_speeds: self.bus_speeds,
            init_sequence: self.init_sequence,
        })
    }
}
