//! Framebuffer operations
//!
//! Drawing goes to the shadow GDDRAM first ([`Gram`](crate::gram::Gram)) and
//! is then written out, one address-window burst per dirty page run. Reads are
//! answered from the shadow, so [`Display::read_point`] works in every
//! addressing mode.
//!
//! The controller does not accept GDDRAM writes while a hardware scroll is
//! running. Call [`Display::deactivate_scroll`] before drawing over a
//! scrolling picture.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ssd1306_session::{Builder, Display, Font, I2cAddress, I2cInterface};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::i2c::{ErrorType, I2c, Operation, SevenBitAddress};
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
//! struct Blocks;
//!
//! impl Font for Blocks {
//!     fn width(&self) -> u8 { 2 }
//!     fn height(&self) -> u8 { 8 }
//!     fn glyph(&self, c: char) -> Option<&[u8]> {
//!         match c {
//!             '#' => Some(&[0xFF, 0xFF]),
//!             ' ' => Some(&[0x00, 0x00]),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! # let config = match Builder::new().build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! let interface = I2cInterface::new(MockI2c, I2cAddress::Primary);
//! let mut display = Display::new(interface, config);
//! if display.init(&mut delay).is_err() {
//!     return;
//! }
//!
//! let _ = display.fill_rect(-4, 0, 20, 15, true);
//! let _ = display.write_point(64, 32, true);
//! let _ = display.write_string(0, 24, "# #", true, &Blocks);
//! assert!(matches!(display.read_point(64, 32), Ok(true)));
//! ```

use log::error;

use crate::display::{Display, DisplayResult};
use crate::error::{Error, HEIGHT, MAX_COLUMN, Step, WIDTH};
use crate::gram::{Gram, row_mask};
use crate::interface::DisplayInterface;

/// Glyph source for [`Display::write_string`]
///
/// Glyphs are fixed-size and stored column by column. Each column takes
/// `ceil(height / 8)` bytes, least significant bit at the top, the same
/// packing GDDRAM uses.
pub trait Font {
    /// Glyph width in pixels, also the cursor advance
    fn width(&self) -> u8;

    /// Glyph height in pixels
    fn height(&self) -> u8;

    /// Packed glyph for `c`, or `None` if the font has no such character
    fn glyph(&self, c: char) -> Option<&[u8]>;
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    fn flush_or_fail(&mut self, step: Step) -> DisplayResult<I> {
        self.flush().map_err(|source| {
            error!("{step} failed");
            Error::Interface(source)
        })
    }

    /// Set or clear one pixel
    ///
    /// The shadow byte holding the pixel is updated and written through a
    /// single-byte address window. The other 7 pixels of that byte keep their
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PointOutOfBounds`] unless `x < 128` and `y < 64`.
    pub fn write_point(&mut self, x: u8, y: u8, on: bool) -> DisplayResult<I> {
        self.ensure_initialized()?;
        if !Gram::contains(x, y) {
            return Err(Error::PointOutOfBounds { x, y });
        }
        self.gram.set_pixel(x, y, on);
        self.flush_or_fail(Step::WritePoint)
    }

    /// Read one pixel from the shadow GDDRAM
    ///
    /// # Errors
    ///
    /// Returns [`Error::PointOutOfBounds`] unless `x < 128` and `y < 64`.
    pub fn read_point(&self, x: u8, y: u8) -> Result<bool, Error<I>> {
        self.ensure_initialized()?;
        if !Gram::contains(x, y) {
            return Err(Error::PointOutOfBounds { x, y });
        }
        Ok(self.gram.pixel(x, y))
    }

    /// Turn every pixel off
    pub fn clear(&mut self) -> DisplayResult<I> {
        self.ensure_initialized()?;
        self.gram.fill(0x00);
        self.flush_or_fail(Step::Clear)
    }

    /// Fill the rectangle `left..=right` x `top..=bottom`
    ///
    /// The rectangle is clipped to the panel first; a negative `left` starts
    /// at column 0. An empty intersection sends nothing and succeeds.
    pub fn fill_rect(
        &mut self,
        left: i16,
        top: u8,
        right: u8,
        bottom: u8,
        on: bool,
    ) -> DisplayResult<I> {
        self.ensure_initialized()?;
        let right = right.min(MAX_COLUMN);
        let bottom = bottom.min(HEIGHT - 1);
        let Ok(left) = u8::try_from(left.max(0)) else {
            // left beyond any column
            return Ok(());
        };
        if left > right || top > bottom {
            return Ok(());
        }

        let bits = if on { 0xFF } else { 0x00 };
        for page in top / 8..=bottom / 8 {
            let mask = row_mask(page, top, bottom);
            for column in left..=right {
                self.gram.apply(column, page, mask, bits);
            }
        }
        self.flush_or_fail(Step::FillRect)
    }

    /// Copy a page-packed image into the window `left..=right` x `top..=bottom`
    ///
    /// `image` holds `right - left + 1` bytes for every page from `top / 8` to
    /// `bottom / 8`, page after page. Bits for rows outside `top..=bottom` are
    /// ignored, so pixels sharing those pages keep their value.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRect`] if the window is reversed or off the panel
    /// - [`Error::BufferSizeMismatch`] if `image` has the wrong length
    pub fn draw_picture(
        &mut self,
        left: u8,
        top: u8,
        right: u8,
        bottom: u8,
        image: &[u8],
    ) -> DisplayResult<I> {
        self.ensure_initialized()?;
        if left > right || top > bottom || right >= WIDTH || bottom >= HEIGHT {
            return Err(Error::InvalidRect {
                left,
                top,
                right,
                bottom,
            });
        }
        let columns = usize::from(right - left) + 1;
        let pages = usize::from(bottom / 8 - top / 8) + 1;
        let expected = columns * pages;
        if image.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                provided: image.len(),
            });
        }

        for (page, row) in (top / 8..=bottom / 8).zip(image.chunks(columns)) {
            let mask = row_mask(page, top, bottom);
            for (column, &bits) in (left..=right).zip(row) {
                self.gram.apply(column, page, mask, bits);
            }
        }
        self.flush_or_fail(Step::DrawPicture)
    }

    /// Render `text` with `font`, origin at the top-left corner (x, y)
    ///
    /// Foreground pixels are set to `on`, background pixels to `!on`. There
    /// is no line wrapping.
    ///
    /// # Errors
    ///
    /// - [`Error::TextOutOfBounds`] if the text would cross the right or
    ///   bottom edge. Nothing is drawn.
    /// - [`Error::UnsupportedCharacter`] for the first character the font
    ///   lacks. Nothing is drawn.
    pub fn write_string<F: Font + ?Sized>(
        &mut self,
        x: u8,
        y: u8,
        text: &str,
        on: bool,
        font: &F,
    ) -> DisplayResult<I> {
        self.ensure_initialized()?;
        let glyph_width = usize::from(font.width());
        let glyph_height = usize::from(font.height());
        let width = text.chars().count() * glyph_width;
        if usize::from(x) + width > usize::from(WIDTH)
            || usize::from(y) + glyph_height > usize::from(HEIGHT)
        {
            return Err(Error::TextOutOfBounds {
                x,
                y,
                width,
                height: glyph_height,
            });
        }
        if let Some(missing) = text.chars().find(|&c| font.glyph(c).is_none()) {
            return Err(Error::UnsupportedCharacter(missing));
        }

        let column_bytes = glyph_height.div_ceil(8);
        let mut cursor = x;
        for c in text.chars() {
            let glyph = font.glyph(c).unwrap_or(&[]);
            for column in 0..font.width() {
                for row in 0..font.height() {
                    let index = usize::from(column) * column_bytes + usize::from(row / 8);
                    let byte = glyph.get(index).copied().unwrap_or(0);
                    let lit = byte & (1 << (row % 8)) != 0;
                    self.gram
                        .set_pixel(cursor + column, y + row, if lit { on } else { !on });
                }
            }
            cursor += font.width();
        }
        self.flush_or_fail(Step::WriteString)
    }

    /// Write all pending shadow changes to the controller
    ///
    /// Does nothing when the shadow is clean. Deactivate a running scroll
    /// first, the controller ignores GDDRAM writes while scrolling.
    pub fn update(&mut self) -> DisplayResult<I> {
        self.ensure_initialized()?;
        if !self.gram.is_dirty() {
            return Ok(());
        }
        self.flush_or_fail(Step::Update)
    }
}
