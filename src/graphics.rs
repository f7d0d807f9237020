//! Graphics support via embedded-graphics
//!
//! This module provides the [`GraphicDisplay`] struct which wraps [`Display`]
//! and implements the [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) trait from
//! the embedded-graphics ecosystem.
//!
//! Drawing only touches the shadow GDDRAM. Call [`GraphicDisplay::update`] to
//! send the changed page runs to the controller in one go.
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
//! use ssd1306_session::{Color, GraphicDisplay};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::i2c::{ErrorType, I2c, Operation, SevenBitAddress};
//! # use ssd1306_session::{Builder, Display, I2cAddress, I2cInterface};
//! # struct MockI2c;
//! # impl ErrorType for MockI2c { type Error = Infallible; }
//! # impl I2c<SevenBitAddress> for MockI2c {
//! #     fn transaction(
//! #         &mut self,
//! #         _address: u8,
//! #         _operations: &mut [Operation<'_>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! # let config = match Builder::new().build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! # let mut driver = Display::new(I2cInterface::new(MockI2c, I2cAddress::Primary), config);
//! # if driver.init(&mut delay).is_err() {
//! #     return;
//! # }
//! let mut display = GraphicDisplay::new(driver);
//!
//! let _ = display.clear(Color::Off);
//!
//! let _ = Rectangle::new(Point::new(2, 2), Size::new(60, 20))
//!     .into_styled(PrimitiveStyle::with_stroke(Color::On, 1))
//!     .draw(&mut display);
//!
//! let _ = Circle::new(Point::new(90, 20), 30)
//!     .into_styled(PrimitiveStyle::with_fill(Color::On))
//!     .draw(&mut display);
//!
//! let _ = Text::new(
//!     "Hello, OLED!",
//!     Point::new(4, 50),
//!     MonoTextStyle::new(&FONT_6X10, Color::On),
//! )
//! .draw(&mut display);
//!
//! // Send changed pages to the controller
//! let _ = display.update();
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    prelude::Pixel,
};

use crate::color::Color;
use crate::display::{Display, DisplayResult};
use crate::error::{HEIGHT, WIDTH};
use crate::interface::DisplayInterface;

/// Display with embedded-graphics support
///
/// ## Type Parameters
///
/// * `I` - Interface type implementing [`DisplayInterface`]
pub struct GraphicDisplay<I>
where
    I: DisplayInterface,
{
    /// The underlying display driver
    display: Display<I>,
}

impl<I> GraphicDisplay<I>
where
    I: DisplayInterface,
{
    /// Wrap a display driver
    ///
    /// The driver may be initialized before or after wrapping; drawing works
    /// either way, but [`update`](Self::update) needs an initialized session.
    pub fn new(display: Display<I>) -> Self {
        Self { display }
    }

    /// Send every changed page run to the controller
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`](crate::Error::NotInitialized) before
    /// init, or [`Error::Interface`](crate::Error::Interface) on transport failure.
    pub fn update(&mut self) -> DisplayResult<I> {
        self.display.update()
    }

    /// Borrow the underlying display
    pub fn display(&self) -> &Display<I> {
        &self.display
    }

    /// Mutably borrow the underlying display
    ///
    /// Useful for effects and register setters between frames.
    pub fn display_mut(&mut self) -> &mut Display<I> {
        &mut self.display
    }

    /// Unwrap the display driver
    pub fn into_inner(self) -> Display<I> {
        self.display
    }

    fn set_pixel(&mut self, x: u8, y: u8, color: Color) {
        self.display.gram.set_pixel(x, y, color.is_on());
    }
}

impl<I> DrawTarget for GraphicDisplay<I>
where
    I: DisplayInterface,
{
    type Color = Color;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            let (Ok(x), Ok(y)) = (u8::try_from(x), u8::try_from(y)) else {
                continue;
            };
            self.set_pixel(x, y, color);
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.display.gram.fill(color.byte());
        Ok(())
    }
}

impl<I> OriginDimensions for GraphicDisplay<I>
where
    I: DisplayInterface,
{
    fn size(&self) -> Size {
        Size::new(u32::from(WIDTH), u32::from(HEIGHT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{ready_display, test_display};
    use alloc::vec;
    use embedded_graphics::{
        pixelcolor::BinaryColor,
        prelude::*,
        primitives::{Line, PrimitiveStyle, Rectangle},
    };

    #[test]
    fn test_size_is_panel_size() {
        let display = GraphicDisplay::new(test_display());
        assert_eq!(display.size(), Size::new(128, 64));
    }

    #[test]
    fn test_drawing_stays_in_shadow_until_update() {
        let mut display = GraphicDisplay::new(ready_display());
        Line::new(Point::new(0, 9), Point::new(3, 9))
            .into_styled(PrimitiveStyle::with_stroke(Color::On, 1))
            .draw(&mut display)
            .unwrap();

        assert!(display.display().interface.transfers.is_empty());
        assert!(display.display().gram().pixel(3, 9));

        display.update().unwrap();
        let inner = display.into_inner();
        assert_eq!(inner.interface.commands, vec![vec![0xB1, 0x00, 0x10]]);
        assert_eq!(inner.interface.data, vec![vec![0x02; 4]]);
    }

    #[test]
    fn test_pixels_outside_panel_are_clipped() {
        let mut display = GraphicDisplay::new(ready_display());
        Rectangle::new(Point::new(-10, 60), Size::new(20, 10))
            .into_styled(PrimitiveStyle::with_fill(Color::On))
            .draw(&mut display)
            .unwrap();

        let gram = display.display().gram();
        assert!(gram.pixel(0, 63));
        assert!(gram.pixel(9, 60));
        assert!(!gram.pixel(10, 60));
        assert_eq!(gram.dirty_run(7), Some((0, 9)));
    }

    #[test]
    fn test_clear_fills_shadow() {
        let mut display = GraphicDisplay::new(ready_display());
        display.clear(Color::On).unwrap();
        assert!(display.display().gram().pixel(127, 63));
        display.update().unwrap();
        assert_eq!(display.display().interface.data.len(), 8);
    }

    #[test]
    fn test_binary_color_converts() {
        assert_eq!(Color::from(BinaryColor::On), Color::On);
        assert_eq!(Color::from(BinaryColor::Off), Color::Off);
    }

    #[test]
    fn test_update_requires_init() {
        let mut display = GraphicDisplay::new(test_display());
        display.display_mut().gram.set_pixel(0, 0, true);
        assert!(matches!(
            display.update(),
            Err(crate::Error::NotInitialized)
        ));
    }
}
