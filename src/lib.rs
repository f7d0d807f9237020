//! SSD1306 OLED Display Driver
//!
//! A session driver for the SSD1306 128x64 monochrome OLED controller,
//! reachable over I2C or 4-wire SPI.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Validated configuration builder covering every controller register
//! - Shadow GDDRAM with dirty-run flushing
//! - Points, rectangles, pictures and font-driven strings
//! - Hardware scroll, fade/blink and zoom effects
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::i2c::{ErrorType, I2c, Operation, SevenBitAddress};
//! use ssd1306_session::{AddressingMode, Builder, Display, I2cAddress, I2cInterface};
//!
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
//! # let i2c = MockI2c;
//! # let mut delay = MockDelay;
//! let interface = I2cInterface::new(i2c, I2cAddress::Primary);
//! let config = match Builder::new()
//!     .contrast(0x7F)
//!     .addressing_mode(AddressingMode::Horizontal)
//!     .build()
//! {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(interface, config);
//! if display.init(&mut delay).is_err() {
//!     return;
//! }
//! let _ = display.fill_rect(0, 0, 127, 7, true);
//! let _ = display.deinit();
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;
#[cfg(test)]
extern crate std;

/// Pixel color for the monochrome panel
pub mod color;
/// SSD1306 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Session lifecycle and register setters
pub mod display;
/// Drawing primitives over the shadow GDDRAM
pub mod draw;
/// Scroll, fade/blink and zoom effects
pub mod effects;
/// Error types for the driver
pub mod error;
/// Shadow display RAM
pub mod gram;
/// Hardware interface abstraction
pub mod interface;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

#[cfg(test)]
mod mock;

pub use color::Color;
pub use command::{
    AddressingMode, ComPinConfig, DeselectLevel, FadeBlinkMode, ScanDirection, ScrollDirection,
    ScrollInterval, SegmentRemap,
};
pub use config::{Builder, Config};
pub use display::{Display, ScrollSetup, State};
pub use draw::Font;
pub use error::{
    BuilderError, Error, HEIGHT, MAX_COLUMN, MAX_PAGE, PAGES, Parameter, Step, WIDTH,
};
pub use gram::Gram;
pub use interface::InterfaceError;
pub use interface::{DisplayInterface, I2cAddress, I2cInterface, InterfaceKind, SpiInterface};

#[cfg(feature = "graphics")]
pub use graphics::GraphicDisplay;
