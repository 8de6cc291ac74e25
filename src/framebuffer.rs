//! Packed 4-bit frame buffer
//!
//! [`FrameBuffer`] wraps caller-provided storage holding two pixels per byte
//! and owns the [`DirtyTracker`] for it. Every write goes through here, so
//! the tracker always covers what changed since the last flush.
//!
//! ## Example
//!
//! ```
//! use ssd1322::{Dimensions, FrameBuffer, Gray};
//!
//! let dims = match Dimensions::new(256, 64) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let mut frame = match FrameBuffer::new([0u8; 256 * 64 / 2], dims) {
//!     Ok(frame) => frame,
//!     Err(_) => return,
//! };
//!
//! frame.set_pixel(3, 1, Gray::WHITE);
//! assert_eq!(frame.pixel(3, 1), Some(Gray::WHITE));
//! assert_eq!(frame.as_bytes()[129], 0x0F);
//! assert!(!frame.dirty().is_empty());
//! ```

use crate::color::Gray;
use crate::config::{Config, Dimensions, Rotation};
use crate::dirty::DirtyTracker;
use crate::error::BufferTooSmall;
use crate::rotation::{apply_rotation, pixel_location};

/// Frame buffer with dirty tracking
///
/// ## Type Parameters
///
/// * `B` - Storage implementing `AsRef<[u8]>` and `AsMut<[u8]>`, at least
///   [`Dimensions::buffer_size`] bytes long
pub struct FrameBuffer<B> {
    /// Pixel storage
    buffer: B,
    /// Physical panel dimensions
    dimensions: Dimensions,
    /// Drawing rotation
    rotation: Rotation,
    /// Region touched since the last flush
    dirty: DirtyTracker,
}

impl<B> FrameBuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Wrap `buffer` as the frame buffer of a panel of `dimensions`
    ///
    /// The buffer contents are kept and nothing is marked dirty. Drawing is
    /// unrotated until [`set_rotation`](Self::set_rotation) is called.
    ///
    /// # Errors
    ///
    /// Returns [`BufferTooSmall`] if `buffer` is shorter than
    /// `dimensions.buffer_size()`.
    pub fn new(buffer: B, dimensions: Dimensions) -> Result<Self, BufferTooSmall> {
        let required = dimensions.buffer_size();
        let provided = buffer.as_ref().len();
        if provided < required {
            return Err(BufferTooSmall { required, provided });
        }
        Ok(Self {
            buffer,
            dimensions,
            rotation: Rotation::Rotate0,
            dirty: DirtyTracker::new(dimensions.width, dimensions.height),
        })
    }

    /// Wrap `buffer` as the frame buffer of the panel described by `config`
    ///
    /// Takes both the dimensions and the rotation from `config`, so drawing
    /// coordinates match what [`Display`](crate::Display) was configured with.
    /// [`new`](Self::new) always starts unrotated.
    ///
    /// # Errors
    ///
    /// Returns [`BufferTooSmall`] if `buffer` is shorter than
    /// `config.dimensions.buffer_size()`.
    pub fn for_config(buffer: B, config: &Config) -> Result<Self, BufferTooSmall> {
        let mut frame = Self::new(buffer, config.dimensions)?;
        frame.rotation = config.rotation;
        Ok(frame)
    }

    /// Physical panel dimensions
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Drawing rotation
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Change the drawing rotation
    ///
    /// Existing pixels stay where they are on the panel.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    /// Logical size `(width, height)` after rotation
    pub fn size(&self) -> (u32, u32) {
        let (w, h) = (
            u32::from(self.dimensions.width),
            u32::from(self.dimensions.height),
        );
        match self.rotation {
            Rotation::Rotate0 | Rotation::Rotate180 => (w, h),
            Rotation::Rotate90 | Rotation::Rotate270 => (h, w),
        }
    }

    /// Bytes per buffer row
    pub fn bytes_per_row(&self) -> usize {
        self.dimensions.bytes_per_row()
    }

    /// Set logical pixel `(x, y)`; pixels outside the panel are ignored
    pub fn set_pixel(&mut self, x: u32, y: u32, gray: Gray) {
        let Some((px, py)) = self.physical(x, y) else {
            return;
        };
        let (index, mask) = pixel_location(px, py, u32::from(self.dimensions.width));
        let byte = &mut self.buffer.as_mut()[index];
        *byte = (*byte & !mask) | (gray.packed_byte() & mask);
        self.dirty.mark_point(px as i32, py as i32);
    }

    /// Read logical pixel `(x, y)`, `None` outside the panel
    pub fn pixel(&self, x: u32, y: u32) -> Option<Gray> {
        let (px, py) = self.physical(x, y)?;
        let (index, mask) = pixel_location(px, py, u32::from(self.dimensions.width));
        let byte = self.buffer.as_ref()[index] & mask;
        Some(Gray::new(if mask == 0xF0 { byte >> 4 } else { byte }))
    }

    /// Fill the whole panel with `gray` and mark it dirty
    pub fn fill(&mut self, gray: Gray) {
        let size = self.dimensions.buffer_size();
        self.buffer.as_mut()[..size].fill(gray.packed_byte());
        self.dirty.mark_all();
    }

    /// Fill the whole panel with black and mark it dirty
    pub fn clear(&mut self) {
        self.fill(Gray::BLACK);
    }

    /// Pixel bytes, row-major, `buffer_size()` long
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer.as_ref()[..self.dimensions.buffer_size()]
    }

    /// Dirty region tracker
    pub fn dirty(&self) -> &DirtyTracker {
        &self.dirty
    }

    /// Dirty region tracker, for marking regions written outside [`set_pixel`](Self::set_pixel)
    pub fn dirty_mut(&mut self) -> &mut DirtyTracker {
        &mut self.dirty
    }

    /// Release the storage
    pub fn release(self) -> B {
        self.buffer
    }

    fn physical(&self, x: u32, y: u32) -> Option<(u32, u32)> {
        let (w, h) = self.size();
        if x >= w || y >= h {
            return None;
        }
        Some(apply_rotation(
            x,
            y,
            u32::from(self.dimensions.width),
            u32::from(self.dimensions.height),
            self.rotation,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Builder;
    use crate::dirty::DirtyRect;
    use alloc::vec;

    fn frame() -> FrameBuffer<alloc::vec::Vec<u8>> {
        let dims = Dimensions::new(256, 64).unwrap();
        FrameBuffer::new(vec![0u8; dims.buffer_size()], dims).unwrap()
    }

    #[test]
    fn test_new_rejects_short_buffer() {
        let dims = Dimensions::new(256, 64).unwrap();
        let result = FrameBuffer::new(vec![0u8; 100], dims);
        assert!(matches!(
            result,
            Err(BufferTooSmall {
                required: 8192,
                provided: 100
            })
        ));
    }

    #[test]
    fn test_new_accepts_longer_buffer() {
        let dims = Dimensions::new(256, 60).unwrap();
        // Sized the way the panel vendor sizes it: 4 * width * ceil(height / 8) bytes
        let frame = FrameBuffer::new(vec![0u8; 4 * 256 * 8], dims).unwrap();
        assert_eq!(frame.as_bytes().len(), 128 * 60);
        assert!(frame.dirty().is_empty());
    }

    #[test]
    fn test_set_pixel_packs_nibbles() {
        let mut frame = frame();
        frame.set_pixel(0, 0, Gray::new(0xA));
        frame.set_pixel(1, 0, Gray::new(0x5));
        assert_eq!(frame.as_bytes()[0], 0xA5);

        frame.set_pixel(0, 0, Gray::BLACK);
        assert_eq!(frame.as_bytes()[0], 0x05);
        assert_eq!(frame.pixel(0, 0), Some(Gray::BLACK));
        assert_eq!(frame.pixel(1, 0), Some(Gray::new(0x5)));
    }

    #[test]
    fn test_set_pixel_marks_dirty() {
        let mut frame = frame();
        frame.set_pixel(10, 20, Gray::WHITE);
        frame.set_pixel(30, 5, Gray::WHITE);
        assert_eq!(frame.dirty().region(), Some(DirtyRect::new(10, 5, 30, 20)));
    }

    #[test]
    fn test_out_of_bounds_pixel_is_ignored() {
        let mut frame = frame();
        frame.set_pixel(256, 0, Gray::WHITE);
        frame.set_pixel(0, 64, Gray::WHITE);
        assert!(frame.dirty().is_empty());
        assert!(frame.as_bytes().iter().all(|b| *b == 0));
        assert_eq!(frame.pixel(256, 0), None);
    }

    #[test]
    fn test_rotated_pixel_lands_on_physical_position() {
        let mut frame = frame();
        frame.set_rotation(Rotation::Rotate90);
        assert_eq!(frame.size(), (64, 256));

        frame.set_pixel(0, 0, Gray::WHITE);
        assert_eq!(frame.dirty().region(), Some(DirtyRect::new(255, 0, 255, 0)));
        assert_eq!(frame.as_bytes()[127], 0x0F);
        assert_eq!(frame.pixel(0, 0), Some(Gray::WHITE));

        // Out of bounds once rotated even though x < physical width
        frame.set_pixel(100, 0, Gray::WHITE);
        assert_eq!(frame.dirty().region(), Some(DirtyRect::new(255, 0, 255, 0)));
    }

    #[test]
    fn test_for_config_takes_rotation() {
        let config = Builder::new()
            .dimensions(Dimensions::new(256, 64).unwrap())
            .rotation(Rotation::Rotate90)
            .build()
            .unwrap();
        let mut frame = FrameBuffer::for_config(vec![0u8; 8192], &config).unwrap();
        assert_eq!(frame.rotation(), Rotation::Rotate90);
        assert_eq!(frame.size(), (64, 256));
        assert_eq!(frame.dimensions(), config.dimensions);

        frame.set_pixel(0, 0, Gray::WHITE);
        assert_eq!(frame.dirty().region(), Some(DirtyRect::new(255, 0, 255, 0)));

        let short = FrameBuffer::for_config(vec![0u8; 10], &config);
        assert!(matches!(short, Err(BufferTooSmall { required: 8192, .. })));
    }

    #[test]
    fn test_fill_marks_everything() {
        let mut frame = frame();
        frame.fill(Gray::new(0x3));
        assert!(frame.as_bytes().iter().all(|b| *b == 0x33));
        assert_eq!(frame.dirty().region(), Some(DirtyRect::new(0, 0, 255, 63)));

        frame.dirty_mut().reset();
        frame.clear();
        assert!(frame.as_bytes().iter().all(|b| *b == 0));
        assert!(!frame.dirty().is_empty());
    }
}
