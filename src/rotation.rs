//! Coordinate rotation utilities
//!
//! This module maps logical (drawing) coordinates to physical panel
//! coordinates. The frame buffer and the dirty region always work in physical
//! coordinates; rotation only changes where a drawn pixel lands.
//!
//! ## Rotation Modes
//!
//! - **Rotate0**: Native orientation
//! - **Rotate90**: 90° clockwise, width and height swapped
//! - **Rotate180**: 180° rotation, origin at bottom-right
//! - **Rotate270**: 270° clockwise (or 90° counter-clockwise)
//!
//! ## Example
//!
//! ```
//! use ssd1322::{rotation::apply_rotation, Rotation};
//!
//! // On a 256x64 panel turned upside down, the logical origin is the last pixel
//! assert_eq!(apply_rotation(0, 0, 256, 64, Rotation::Rotate180), (255, 63));
//! ```

use crate::config::Rotation;

/// Apply rotation transformation to get physical coordinates
///
/// # Arguments
///
/// * `x` - Logical X coordinate
/// * `y` - Logical Y coordinate
/// * `width` - Physical panel width in pixels
/// * `height` - Physical panel height in pixels
/// * `rotation` - Rotation mode
///
/// The caller must keep `(x, y)` inside the rotated bounds.
pub fn apply_rotation(x: u32, y: u32, width: u32, height: u32, rotation: Rotation) -> (u32, u32) {
    match rotation {
        Rotation::Rotate0 => (x, y),
        Rotation::Rotate90 => (width - 1 - y, x),
        Rotation::Rotate180 => (width - 1 - x, height - 1 - y),
        Rotation::Rotate270 => (y, height - 1 - x),
    }
}

/// Byte index and nibble mask of physical pixel `(x, y)`
///
/// Even columns sit in the high nibble, odd columns in the low nibble.
///
/// ```
/// use ssd1322::rotation::pixel_location;
///
/// assert_eq!(pixel_location(0, 0, 256), (0, 0xF0));
/// assert_eq!(pixel_location(3, 1, 256), (129, 0x0F));
/// ```
pub fn pixel_location(x: u32, y: u32, width: u32) -> (usize, u8) {
    let index = (y * (width / 2) + x / 2) as usize;
    let mask = if x % 2 == 0 { 0xF0 } else { 0x0F };
    (index, mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate0() {
        assert_eq!(apply_rotation(5, 7, 256, 64, Rotation::Rotate0), (5, 7));
    }

    #[test]
    fn test_rotate90() {
        // Logical size is 64x256; logical origin lands on the top-right corner
        assert_eq!(apply_rotation(0, 0, 256, 64, Rotation::Rotate90), (255, 0));
        assert_eq!(apply_rotation(63, 255, 256, 64, Rotation::Rotate90), (0, 63));
    }

    #[test]
    fn test_rotate180() {
        assert_eq!(apply_rotation(0, 0, 256, 64, Rotation::Rotate180), (255, 63));
        assert_eq!(apply_rotation(255, 63, 256, 64, Rotation::Rotate180), (0, 0));
    }

    #[test]
    fn test_rotate270() {
        assert_eq!(apply_rotation(0, 0, 256, 64, Rotation::Rotate270), (0, 63));
        assert_eq!(apply_rotation(63, 255, 256, 64, Rotation::Rotate270), (255, 0));
    }

    #[test]
    fn test_pixel_location_nibbles() {
        // 8 pixels wide, 4 bytes per row
        assert_eq!(pixel_location(0, 0, 8), (0, 0xF0));
        assert_eq!(pixel_location(1, 0, 8), (0, 0x0F));
        assert_eq!(pixel_location(6, 0, 8), (3, 0xF0));
        assert_eq!(pixel_location(7, 1, 8), (7, 0x0F));
    }
}
