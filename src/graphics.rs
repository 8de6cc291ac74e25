//! Graphics support via embedded-graphics
//!
//! This module provides the [`GraphicDisplay`] struct which pairs a
//! [`Display`] with its [`FrameBuffer`] and implements the
//! [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) trait from
//! the embedded-graphics ecosystem.
//!
//! Drawing only touches the frame buffer and grows its dirty region;
//! [`flush`](GraphicDisplay::flush) sends whatever changed.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     mono_font::{ascii::FONT_6X10, MonoTextStyle},
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//!     text::Text,
//! };
//! use ssd1322::{GraphicDisplay, Gray};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
//! # use ssd1322::{Builder, Dimensions, Display, SpiInterface};
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
//! # let interface = SpiInterface::new(MockSpi, MockPin, MockPin);
//! # let dims = match Dimensions::new(256, 64) {
//! #     Ok(dims) => dims,
//! #     Err(_) => return,
//! # };
//! # let config = match Builder::new().dimensions(dims).build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! # let mut display_driver = Display::new(interface, config);
//! # let _ = display_driver.reset(&mut MockDelay);
//! // Create graphic display with a frame buffer
//! let mut display = GraphicDisplay::new(display_driver, vec![0u8; dims.buffer_size()]);
//!
//! display.clear(Gray::BLACK);
//!
//! let _ = Rectangle::new(Point::new(10, 10), Size::new(50, 30))
//!     .into_styled(PrimitiveStyle::with_fill(Gray::new(0x8)))
//!     .draw(&mut display);
//!
//! let _ = Circle::new(Point::new(100, 10), 40)
//!     .into_styled(PrimitiveStyle::with_stroke(Gray::WHITE, 2))
//!     .draw(&mut display);
//!
//! let _ = Text::new(
//!     "Hello, OLED!",
//!     Point::new(160, 30),
//!     MonoTextStyle::new(&FONT_6X10, Gray::WHITE),
//! )
//! .draw(&mut display);
//!
//! // Send the changed region
//! let _ = display.flush(&mut || {});
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    prelude::Pixel,
};

use crate::color::Gray;
use crate::display::{Display, FlushStats};
use crate::error::Error;
use crate::framebuffer::FrameBuffer;
use crate::interface::DisplayInterface;
use crate::transfer::Yield;

/// Display with a graphics frame buffer
///
/// ## Type Parameters
///
/// * `I` - Interface type implementing [`DisplayInterface`]
/// * `B` - Buffer type implementing `AsRef<[u8]>` and `AsMut<[u8]>`
pub struct GraphicDisplay<I, B>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// The underlying display driver
    display: Display<I>,
    /// Pixels and their dirty region
    frame: FrameBuffer<B>,
}

type GraphicsResult<I> = core::result::Result<(), Error<I>>;
type GraphicsNewResult<I, T> = core::result::Result<T, Error<I>>;

impl<I, B> GraphicDisplay<I, B>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Create a new GraphicDisplay
    ///
    /// The frame buffer takes the display's dimensions and rotation.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is smaller than `dimensions.buffer_size()`, which is
    /// always computed from the **physical** (unrotated) dimensions.
    pub fn new(display: Display<I>, buffer: B) -> Self {
        let required = display.dimensions().buffer_size();
        let provided = buffer.as_ref().len();
        assert!(
            provided >= required,
            "buffer too small: required {} bytes, got {}",
            required,
            provided
        );
        match Self::try_new(display, buffer) {
            Ok(graphic) => graphic,
            Err(_) => unreachable!(),
        }
    }

    /// Try to create a new GraphicDisplay, returning an error if the buffer is too small
    ///
    /// This is the fallible version of [`new`](Self::new).
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferTooSmall` if `buffer` is smaller than
    /// `dimensions.buffer_size()`.
    pub fn try_new(display: Display<I>, buffer: B) -> GraphicsNewResult<I, Self> {
        let frame = FrameBuffer::for_config(buffer, display.config())?;
        Ok(Self { display, frame })
    }

    /// Fill the whole frame with `gray`
    ///
    /// The entire panel becomes dirty and goes out with the next flush.
    pub fn clear(&mut self, gray: Gray) {
        self.frame.fill(gray);
    }

    /// Send the dirty region to the panel
    ///
    /// See [`Display::flush`].
    pub fn flush<Y>(&mut self, cooperate: &mut Y) -> GraphicsNewResult<I, FlushStats>
    where
        Y: Yield + ?Sized,
    {
        self.display.flush(&mut self.frame, cooperate)
    }

    /// Invert the panel output without touching the frame
    pub fn invert(&mut self, inverted: bool) -> GraphicsResult<I> {
        self.display.invert(inverted)
    }

    /// Access the underlying Display
    pub fn display(&self) -> &Display<I> {
        &self.display
    }

    /// Access the underlying Display mutably
    ///
    /// This can be used to access low-level operations directly.
    pub fn display_mut(&mut self) -> &mut Display<I> {
        &mut self.display
    }

    /// Access the frame buffer
    pub fn frame(&self) -> &FrameBuffer<B> {
        &self.frame
    }

    /// Access the frame buffer mutably
    pub fn frame_mut(&mut self) -> &mut FrameBuffer<B> {
        &mut self.frame
    }

    /// Release the display and frame buffer
    pub fn release(self) -> (Display<I>, FrameBuffer<B>) {
        (self.display, self.frame)
    }
}

impl<I, B> DrawTarget for GraphicDisplay<I, B>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    type Color = Gray;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }
            self.frame.set_pixel(x as u32, y as u32, color);
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.frame.fill(color);
        Ok(())
    }
}

impl<I, B> OriginDimensions for GraphicDisplay<I, B>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn size(&self) -> Size {
        let (width, height) = self.frame.size();
        Size::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Builder, Dimensions, Rotation};
    use crate::dirty::DirtyRect;
    use alloc::vec;
    use alloc::vec::Vec;
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
    use embedded_hal::delay::DelayNs;

    #[derive(Debug, Default)]
    struct MockInterface {
        commands: Vec<u8>,
        data: Vec<Vec<u8>>,
    }

    impl DisplayInterface for MockInterface {
        type Error = core::convert::Infallible;

        fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
            self.commands.push(command);
            Ok(())
        }

        fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            self.data.push(data.to_vec());
            Ok(())
        }

        fn reset<D: DelayNs>(&mut self, _delay: &mut D) {}
    }

    fn test_display(rotation: Rotation) -> Display<MockInterface> {
        let config = Builder::new()
            .dimensions(Dimensions::new(256, 64).unwrap())
            .rotation(rotation)
            .build()
            .unwrap();
        Display::new(MockInterface::default(), config)
    }

    fn graphic(rotation: Rotation) -> GraphicDisplay<MockInterface, Vec<u8>> {
        let display = test_display(rotation);
        let required = display.dimensions().buffer_size();
        GraphicDisplay::new(display, vec![0u8; required])
    }

    #[test]
    fn test_size_follows_rotation() {
        assert_eq!(graphic(Rotation::Rotate0).size(), Size::new(256, 64));
        assert_eq!(graphic(Rotation::Rotate270).size(), Size::new(64, 256));
    }

    #[test]
    fn test_buffer_size_uses_physical_dimensions() {
        let display = test_display(Rotation::Rotate90);
        assert_eq!(display.dimensions().buffer_size(), 256 * 64 / 2);
        let result = GraphicDisplay::try_new(display, vec![0u8; 256 * 64 / 2]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_try_new_small_buffer_returns_error() {
        let display = test_display(Rotation::Rotate0);
        let required = display.dimensions().buffer_size();
        let result = GraphicDisplay::try_new(display, vec![0u8; required - 1]);
        assert!(matches!(
            result,
            Err(Error::BufferTooSmall {
                required: 8192,
                provided: 8191
            })
        ));
    }

    #[test]
    #[should_panic(expected = "buffer too small")]
    fn test_new_panics_on_small_buffer() {
        let display = test_display(Rotation::Rotate0);
        let _ = GraphicDisplay::new(display, vec![0u8; 16]);
    }

    #[test]
    fn test_filled_rectangle_marks_its_bounds() {
        let mut gd = graphic(Rotation::Rotate0);
        Rectangle::new(Point::new(10, 4), Size::new(8, 3))
            .into_styled(PrimitiveStyle::with_fill(Gray::new(0x7)))
            .draw(&mut gd)
            .unwrap();

        assert_eq!(
            gd.frame().dirty().region(),
            Some(DirtyRect::new(10, 4, 17, 6))
        );
        assert_eq!(gd.frame().pixel(10, 4), Some(Gray::new(0x7)));
        assert_eq!(gd.frame().pixel(17, 6), Some(Gray::new(0x7)));
        assert_eq!(gd.frame().pixel(18, 6), Some(Gray::BLACK));
    }

    #[test]
    fn test_off_screen_pixels_are_ignored() {
        let mut gd = graphic(Rotation::Rotate0);
        let pixels = [
            Pixel(Point::new(-1, 0), Gray::WHITE),
            Pixel(Point::new(0, -1), Gray::WHITE),
            Pixel(Point::new(256, 0), Gray::WHITE),
            Pixel(Point::new(0, 64), Gray::WHITE),
        ];
        gd.draw_iter(pixels).unwrap();
        assert!(gd.frame().dirty().is_empty());

        // A line running off the edge only dirties the visible part
        Line::new(Point::new(250, 10), Point::new(300, 10))
            .into_styled(PrimitiveStyle::with_stroke(Gray::WHITE, 1))
            .draw(&mut gd)
            .unwrap();
        assert_eq!(
            gd.frame().dirty().region(),
            Some(DirtyRect::new(250, 10, 255, 10))
        );
    }

    #[test]
    fn test_rotated_drawing_dirties_physical_region() {
        let mut gd = graphic(Rotation::Rotate180);
        gd.draw_iter([Pixel(Point::new(0, 0), Gray::WHITE)]).unwrap();
        assert_eq!(
            gd.frame().dirty().region(),
            Some(DirtyRect::new(255, 63, 255, 63))
        );
    }

    #[test]
    fn test_draw_then_flush_sends_window() {
        let mut gd = graphic(Rotation::Rotate0);
        gd.draw_iter([Pixel(Point::new(4, 2), Gray::WHITE)]).unwrap();

        let stats = gd.flush(&mut || {}).unwrap();
        assert_eq!(stats.bytes, 2);
        assert!(gd.frame().dirty().is_empty());

        let interface = gd.display().interface();
        assert_eq!(interface.commands, [0x75, 0x15, 0x5C]);
        assert_eq!(interface.data, [vec![2u8, 2], vec![29u8, 29], vec![0xF0u8, 0x00]]);

        // Nothing new drawn, nothing sent
        let stats = gd.flush(&mut || {}).unwrap();
        assert_eq!(stats, FlushStats::default());
        assert_eq!(gd.display().interface().commands.len(), 3);
    }

    #[test]
    fn test_clear_marks_whole_panel() {
        let mut gd = graphic(Rotation::Rotate90);
        gd.clear(Gray::WHITE);
        assert!(gd.frame().as_bytes().iter().all(|b| *b == 0xFF));
        assert_eq!(
            gd.frame().dirty().region(),
            Some(DirtyRect::new(0, 0, 255, 63))
        );

        let stats = gd.flush(&mut || {}).unwrap();
        assert_eq!(stats.bytes, 256 * 64 / 2);
    }

    #[test]
    fn test_invert_does_not_dirty() {
        let mut gd = graphic(Rotation::Rotate0);
        gd.invert(true).unwrap();
        assert!(gd.frame().dirty().is_empty());
        assert_eq!(gd.display().interface().commands, [0xA7]);
    }
}
