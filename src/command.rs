//! SSD1306 command definitions
//!
//! This module defines the command bytes and parameter encodings used to control
//! the SSD1306 OLED controller. Every command, including its parameter bytes, is
//! sent in command mode (I2C control byte `0x00`, or DC low on SPI). Only GDDRAM
//! pixel bytes are sent in data mode.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ssd1306_session::{command, DisplayInterface, I2cAddress, I2cInterface};
//! # use core::convert::Infallible;
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
//! let mut interface = I2cInterface::new(MockI2c, I2cAddress::Primary);
//!
//! // Contrast takes one parameter byte, sent as part of the command stream
//! let _ = interface.send_commands(&[command::SET_CONTRAST, 0x7F]);
//! let _ = interface.send_commands(&[command::DISPLAY_ON]);
//! ```

// Fundamental commands

/// Set contrast control (0x81), followed by one byte 0x00-0xFF
pub const SET_CONTRAST: u8 = 0x81;

/// Resume to RAM content display (0xA4)
pub const ENTIRE_DISPLAY_RESUME: u8 = 0xA4;

/// Entire display on, ignoring RAM content (0xA5)
pub const ENTIRE_DISPLAY_ON: u8 = 0xA5;

/// Normal display, RAM bit 1 = pixel on (0xA6)
pub const NORMAL_DISPLAY: u8 = 0xA6;

/// Inverse display, RAM bit 0 = pixel on (0xA7)
pub const INVERSE_DISPLAY: u8 = 0xA7;

/// Display off, sleep mode (0xAE)
pub const DISPLAY_OFF: u8 = 0xAE;

/// Display on, normal mode (0xAF)
pub const DISPLAY_ON: u8 = 0xAF;

// Scrolling commands

/// Continuous right horizontal scroll setup (0x26)
///
/// Requires 6 bytes: [0x00, start page, interval, end page, 0x00, 0xFF]
pub const RIGHT_HORIZONTAL_SCROLL: u8 = 0x26;

/// Continuous left horizontal scroll setup (0x27)
///
/// Same parameter layout as [`RIGHT_HORIZONTAL_SCROLL`].
pub const LEFT_HORIZONTAL_SCROLL: u8 = 0x27;

/// Continuous vertical and right horizontal scroll setup (0x29)
///
/// Requires 5 bytes: [0x00, start page, interval, end page, vertical offset]
pub const VERTICAL_RIGHT_HORIZONTAL_SCROLL: u8 = 0x29;

/// Continuous vertical and left horizontal scroll setup (0x2A)
///
/// Same parameter layout as [`VERTICAL_RIGHT_HORIZONTAL_SCROLL`].
pub const VERTICAL_LEFT_HORIZONTAL_SCROLL: u8 = 0x2A;

/// Deactivate scroll (0x2E)
///
/// RAM content must be rewritten after deactivating a running scroll.
pub const DEACTIVATE_SCROLL: u8 = 0x2E;

/// Activate scroll (0x2F)
///
/// Only valid after one of the scroll setup commands.
pub const ACTIVATE_SCROLL: u8 = 0x2F;

/// Set vertical scroll area (0xA3)
///
/// Requires 2 bytes: [rows in top fixed area, rows in scroll area]
pub const SET_VERTICAL_SCROLL_AREA: u8 = 0xA3;

// Addressing commands

/// Set lower column start address for page addressing mode (0x00-0x0F)
pub const LOW_COLUMN_START: u8 = 0x00;

/// Set higher column start address for page addressing mode (0x10-0x17)
pub const HIGH_COLUMN_START: u8 = 0x10;

/// Set memory addressing mode (0x20), followed by one mode byte
pub const SET_MEMORY_ADDRESSING_MODE: u8 = 0x20;

/// Set column address range (0x21)
///
/// Requires 2 bytes: [start column, end column]. Horizontal/vertical mode only.
pub const SET_COLUMN_ADDRESS: u8 = 0x21;

/// Set page address range (0x22)
///
/// Requires 2 bytes: [start page, end page]. Horizontal/vertical mode only.
pub const SET_PAGE_ADDRESS: u8 = 0x22;

/// Set page start address for page addressing mode (0xB0-0xB7)
pub const PAGE_START: u8 = 0xB0;

// Hardware configuration commands

/// Set display start line (0x40-0x7F)
pub const DISPLAY_START_LINE: u8 = 0x40;

/// Segment remap: column address 0 is mapped to SEG0 (0xA0)
pub const SEGMENT_REMAP_COLUMN_0: u8 = 0xA0;

/// Segment remap: column address 127 is mapped to SEG0 (0xA1)
pub const SEGMENT_REMAP_COLUMN_127: u8 = 0xA1;

/// Set multiplex ratio (0xA8), followed by one byte 15-63
pub const SET_MULTIPLEX_RATIO: u8 = 0xA8;

/// COM output scan direction from COM0 to COM[N-1] (0xC0)
pub const SCAN_DIRECTION_NORMAL: u8 = 0xC0;

/// COM output scan direction from COM[N-1] to COM0 (0xC8)
pub const SCAN_DIRECTION_REMAPPED: u8 = 0xC8;

/// Set display offset (0xD3), followed by one byte 0-63
pub const SET_DISPLAY_OFFSET: u8 = 0xD3;

/// Set COM pins hardware configuration (0xDA), followed by one byte
pub const SET_COM_PINS: u8 = 0xDA;

// Timing and driving scheme commands

/// Set display clock divide ratio and oscillator frequency (0xD5)
///
/// Requires 1 byte: frequency in bits 7:4, divide ratio - 1 in bits 3:0.
pub const SET_DISPLAY_CLOCK: u8 = 0xD5;

/// Set pre-charge period (0xD9)
///
/// Requires 1 byte: phase 2 in bits 7:4, phase 1 in bits 3:0.
pub const SET_PRECHARGE_PERIOD: u8 = 0xD9;

/// Set VCOMH deselect level (0xDB), followed by one byte
pub const SET_DESELECT_LEVEL: u8 = 0xDB;

// Charge pump and advanced graphics commands

/// Charge pump setting (0x8D)
///
/// Requires 1 byte: [`CHARGE_PUMP_ENABLE`] or [`CHARGE_PUMP_DISABLE`].
pub const CHARGE_PUMP: u8 = 0x8D;

/// Charge pump parameter: enable
pub const CHARGE_PUMP_ENABLE: u8 = 0x14;

/// Charge pump parameter: disable
pub const CHARGE_PUMP_DISABLE: u8 = 0x10;

/// Set fade out and blinking (0x23), followed by one byte
pub const SET_FADE_BLINK: u8 = 0x23;

/// Set zoom in (0xD6), followed by 0x00 (disable) or 0x01 (enable)
pub const SET_ZOOM_IN: u8 = 0xD6;

/// GDDRAM addressing modes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum AddressingMode {
    /// Column pointer wraps to the next page at the end of the column window
    Horizontal = 0x00,
    /// Page pointer wraps to the next column at the end of the page window
    Vertical = 0x01,
    /// Column pointer increments within one page and never changes page
    #[default]
    Page = 0x02,
}

/// Mapping of column addresses to segment drivers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SegmentRemap {
    /// Column 0 drives SEG0
    Column0,
    /// Column 127 drives SEG0 (horizontal mirror)
    #[default]
    Column127,
}

impl SegmentRemap {
    pub(crate) fn command(self) -> u8 {
        match self {
            Self::Column0 => SEGMENT_REMAP_COLUMN_0,
            Self::Column127 => SEGMENT_REMAP_COLUMN_127,
        }
    }
}

/// COM output scan direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanDirection {
    /// Scan from COM0 to COM[N-1]
    Com0Start,
    /// Scan from COM[N-1] to COM0 (vertical mirror)
    #[default]
    ComNStart,
}

impl ScanDirection {
    pub(crate) fn command(self) -> u8 {
        match self {
            Self::Com0Start => SCAN_DIRECTION_NORMAL,
            Self::ComNStart => SCAN_DIRECTION_REMAPPED,
        }
    }
}

/// COM pins hardware layout, dictated by how the module is wired
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ComPinConfig {
    /// Sequential COM pin configuration (typical for 128x32 modules)
    Sequential,
    /// Alternative COM pin configuration (typical for 128x64 modules)
    #[default]
    Alternative,
}

/// Encode the parameter byte of [`SET_COM_PINS`]
pub(crate) fn com_pins_byte(config: ComPinConfig, left_right_remap: bool) -> u8 {
    let alternative = match config {
        ComPinConfig::Sequential => 0,
        ComPinConfig::Alternative => 1,
    };
    0x02 | (alternative << 4) | ((left_right_remap as u8) << 5)
}

/// Encode the parameter byte of [`SET_DISPLAY_CLOCK`]
pub(crate) fn clock_byte(divide: u8, frequency: u8) -> u8 {
    ((frequency & 0x0F) << 4) | (divide & 0x0F)
}

/// Encode the parameter byte of [`SET_PRECHARGE_PERIOD`]
pub(crate) fn precharge_byte(phase1: u8, phase2: u8) -> u8 {
    ((phase2 & 0x0F) << 4) | (phase1 & 0x0F)
}

/// Normal or inverse display command
pub(crate) fn display_mode(inverted: bool) -> u8 {
    if inverted {
        INVERSE_DISPLAY
    } else {
        NORMAL_DISPLAY
    }
}

/// VCOMH deselect level
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum DeselectLevel {
    /// ~0.65 x VCC
    Vcc0_65 = 0x00,
    /// ~0.77 x VCC
    #[default]
    Vcc0_77 = 0x20,
    /// ~0.83 x VCC
    Vcc0_83 = 0x30,
}

/// Fade out / blinking effect mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum FadeBlinkMode {
    /// Effect disabled
    #[default]
    Off = 0x00,
    /// Contrast fades out once and stays dark
    Fade = 0x20,
    /// Contrast fades out and back in repeatedly
    Blink = 0x30,
}

/// Maximum fade/blink frame parameter (4-bit field)
pub const MAX_FADE_FRAMES: u8 = 0x0F;

/// Encode the parameter byte of [`SET_FADE_BLINK`]
pub(crate) fn fade_blink_byte(mode: FadeBlinkMode, frames: u8) -> u8 {
    mode as u8 | (frames & MAX_FADE_FRAMES)
}

/// Horizontal scroll direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Content moves to the left
    Left,
    /// Content moves to the right
    Right,
}

/// Time interval between scroll steps, in frames
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum ScrollInterval {
    /// 5 frames
    #[default]
    Frames5 = 0x00,
    /// 64 frames
    Frames64 = 0x01,
    /// 128 frames
    Frames128 = 0x02,
    /// 256 frames
    Frames256 = 0x03,
    /// 3 frames
    Frames3 = 0x04,
    /// 4 frames
    Frames4 = 0x05,
    /// 25 frames
    Frames25 = 0x06,
    /// 2 frames
    Frames2 = 0x07,
}

/// A command and its parameter bytes, held inline
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CommandFrame {
    bytes: [u8; Self::CAPACITY],
    len: usize,
}

impl CommandFrame {
    /// Longest command the controller accepts (horizontal scroll setup)
    pub(crate) const CAPACITY: usize = 7;

    /// Copy up to [`Self::CAPACITY`] bytes
    pub(crate) fn new(bytes: &[u8]) -> Self {
        let len = bytes.len().min(Self::CAPACITY);
        let mut frame = Self {
            bytes: [0; Self::CAPACITY],
            len,
        };
        frame.bytes[..len].copy_from_slice(&bytes[..len]);
        frame
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_com_pins_byte_encoding() {
        assert_eq!(com_pins_byte(ComPinConfig::Sequential, false), 0x02);
        assert_eq!(com_pins_byte(ComPinConfig::Alternative, false), 0x12);
        assert_eq!(com_pins_byte(ComPinConfig::Alternative, true), 0x32);
    }

    #[test]
    fn test_timing_bytes() {
        assert_eq!(clock_byte(0x00, 0x08), 0x80);
        assert_eq!(precharge_byte(0x01, 0x0F), 0xF1);
        assert_eq!(fade_blink_byte(FadeBlinkMode::Blink, 0x05), 0x35);
        assert_eq!(fade_blink_byte(FadeBlinkMode::Off, 0x00), 0x00);
        assert_eq!(display_mode(true), INVERSE_DISPLAY);
    }

    #[test]
    fn test_command_frame_keeps_parameter_bytes() {
        let frame = CommandFrame::new(&[SET_CONTRAST, 0xCF]);
        assert_eq!(frame.as_bytes(), &[0x81, 0xCF]);
    }

    #[test]
    fn test_scroll_interval_values() {
        assert_eq!(ScrollInterval::Frames5 as u8, 0x00);
        assert_eq!(ScrollInterval::Frames2 as u8, 0x07);
        assert_eq!(ScrollInterval::Frames25 as u8, 0x06);
    }

    #[test]
    fn test_remap_and_scan_commands() {
        assert_eq!(SegmentRemap::Column0.command(), 0xA0);
        assert_eq!(SegmentRemap::Column127.command(), 0xA1);
        assert_eq!(ScanDirection::Com0Start.command(), 0xC0);
        assert_eq!(ScanDirection::ComNStart.command(), 0xC8);
    }
}
