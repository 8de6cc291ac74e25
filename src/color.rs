//! Grayscale pixel values
//!
//! This module defines the [`Gray`] type for the 16 intensity levels the
//! SSD1322 displays.
//!
//! ## Pixel Representation
//!
//! The frame buffer packs two 4-bit pixels per byte:
//!
//! | Pixel x | Nibble        |
//! |---------|---------------|
//! | even    | high (`0xF0`) |
//! | odd     | low (`0x0F`)  |
//!
//! ## Example
//!
//! ```
//! use ssd1322::Gray;
//!
//! assert_eq!(Gray::BLACK.luma(), 0x0);
//! assert_eq!(Gray::WHITE.luma(), 0xF);
//!
//! // Byte value filling both pixels of a byte
//! assert_eq!(Gray::new(0x3).packed_byte(), 0x33);
//! ```

/// A 4-bit gray level, 0 (off) to 15 (full brightness)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Gray(u8);

impl Gray {
    /// Pixel off
    pub const BLACK: Self = Self(0x0);
    /// Pixel at full brightness
    pub const WHITE: Self = Self(0xF);

    /// Create a gray level; bits above the low nibble are discarded
    pub const fn new(level: u8) -> Self {
        Self(level & 0x0F)
    }

    /// Intensity, 0..=15
    pub const fn luma(self) -> u8 {
        self.0
    }

    /// Byte with both nibbles set to this level
    ///
    /// ```
    /// use ssd1322::Gray;
    ///
    /// assert_eq!(Gray::BLACK.packed_byte(), 0x00);
    /// assert_eq!(Gray::WHITE.packed_byte(), 0xFF);
    /// ```
    pub const fn packed_byte(self) -> u8 {
        (self.0 << 4) | self.0
    }
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::prelude::PixelColor for Gray {
    type Raw = embedded_graphics_core::pixelcolor::raw::RawU4;
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::Gray4> for Gray {
    fn from(color: embedded_graphics_core::pixelcolor::Gray4) -> Self {
        use embedded_graphics_core::pixelcolor::GrayColor;
        Self::new(color.luma())
    }
}

#[cfg(feature = "graphics")]
impl From<Gray> for embedded_graphics_core::pixelcolor::Gray4 {
    fn from(color: Gray) -> Self {
        Self::new(color.luma())
    }
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::BinaryColor> for Gray {
    fn from(color: embedded_graphics_core::pixelcolor::BinaryColor) -> Self {
        if color.is_on() { Self::WHITE } else { Self::BLACK }
    }
}
