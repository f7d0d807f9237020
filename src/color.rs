//! Pixel color for the monochrome OLED panel
//!
//! Each GDDRAM bit drives one OLED pixel: 1 lights it, 0 leaves it dark.
//! Inverse display mode swaps the meaning on the panel side only; the bits
//! stored are unchanged.
//!
//! ## Example
//!
//! ```
//! use ssd1306_session::Color;
//!
//! assert!(Color::On.is_on());
//! assert_eq!(Color::from(false), Color::Off);
//! assert_eq!(Color::On.byte(), 0xFF);
//! ```

/// Pixel state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Color {
    /// Dark pixel
    #[default]
    Off,
    /// Lit pixel
    On,
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::prelude::PixelColor for Color {
    type Raw = embedded_graphics_core::pixelcolor::raw::RawU1;
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::BinaryColor> for Color {
    fn from(color: embedded_graphics_core::pixelcolor::BinaryColor) -> Self {
        Self::from(color.is_on())
    }
}

impl From<bool> for Color {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl Color {
    /// Whether the pixel is lit
    pub fn is_on(self) -> bool {
        self == Self::On
    }

    /// GDDRAM byte with all 8 pixels in this state
    pub fn byte(self) -> u8 {
        match self {
            Self::Off => 0x00,
            Self::On => 0xFF,
        }
    }
}
