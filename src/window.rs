//! Address window encoding
//!
//! Turns a pixel-space dirty rectangle into the column/row window the
//! controller understands. Rows map 1:1; one column address covers four
//! pixels (two buffer bytes), and the panel's column offset is added when the
//! window is programmed.

use crate::command::{BYTES_PER_COLUMN, MAX_COLUMN_ADDRESS, PIXELS_PER_COLUMN};
use crate::config::Dimensions;
use crate::dirty::DirtyRect;

/// Controller write window derived from a dirty rectangle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressWindow {
    /// First column unit, relative to the frame buffer
    pub col_start: u8,
    /// Last column unit (inclusive), relative to the frame buffer
    pub col_end: u8,
    /// First row
    pub row_start: u8,
    /// Last row (inclusive)
    pub row_end: u8,
    /// Column address of buffer column unit 0
    pub column_offset: u8,
}

impl AddressWindow {
    /// Encode the window covering `region`
    ///
    /// Coordinates are clamped to the panel first, so an out-of-range region
    /// still yields a valid window.
    ///
    /// ```
    /// use ssd1322::{AddressWindow, Dimensions, dirty::DirtyRect};
    ///
    /// let dims = match Dimensions::new(256, 64) {
    ///     Ok(dims) => dims,
    ///     Err(_) => return,
    /// };
    /// let window = AddressWindow::encode(DirtyRect::new(0, 0, 7, 0), dims, 28);
    /// assert_eq!(window.column_args(), [28, 29]);
    /// assert_eq!(window.row_args(), [0, 0]);
    /// ```
    pub fn encode(region: DirtyRect, dimensions: Dimensions, column_offset: u8) -> Self {
        let max_x = dimensions.width.saturating_sub(1);
        let max_y = dimensions.height.saturating_sub(1);
        Self {
            col_start: (region.x1.min(max_x) / PIXELS_PER_COLUMN) as u8,
            col_end: (region.x2.min(max_x) / PIXELS_PER_COLUMN) as u8,
            row_start: region.y1.min(max_y) as u8,
            row_end: region.y2.min(max_y) as u8,
            column_offset,
        }
    }

    /// Arguments for the set-column-address command, offset applied
    ///
    /// Addresses never exceed the controller's last column (119).
    pub fn column_args(&self) -> [u8; 2] {
        let address = |col: u8| {
            self.column_offset
                .saturating_add(col)
                .min(MAX_COLUMN_ADDRESS)
        };
        [address(self.col_start), address(self.col_end)]
    }

    /// Arguments for the set-row-address command
    pub fn row_args(&self) -> [u8; 2] {
        [self.row_start, self.row_end]
    }

    /// Number of rows in the window
    pub fn rows(&self) -> usize {
        (self.row_end - self.row_start) as usize + 1
    }

    /// Byte offset of the window's first column within a buffer row
    pub fn row_byte_offset(&self) -> usize {
        self.col_start as usize * BYTES_PER_COLUMN
    }

    /// Bytes sent per row
    pub fn row_byte_len(&self) -> usize {
        (self.col_end - self.col_start) as usize * BYTES_PER_COLUMN + BYTES_PER_COLUMN
    }

    /// Total bytes streamed for the window
    pub fn byte_len(&self) -> usize {
        self.rows() * self.row_byte_len()
    }
}
