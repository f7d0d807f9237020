//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level bus/GPIO errors
//!
//! Runtime errors fall into three groups:
//!
//! - transport failures ([`Error::Interface`]), never retried by the driver
//! - contract violations (`Invalid*`, `*OutOfBounds`, ...), rejected before any
//!   byte is sent
//! - aborted multi-step sequences ([`Error::Aborted`]), after which the session has
//!   already been torn down
//!
//! ## Example
//!
//! ```
//! use ssd1306_session::{Builder, BuilderError, Parameter};
//!
//! // Multiplex ratio must be 15..=63
//! let result = Builder::new().multiplex_ratio(70).build();
//! assert!(matches!(
//!     result,
//!     Err(BuilderError::InvalidParameter { parameter: Parameter::MultiplexRatio, value: 70 })
//! ));
//! ```

use crate::interface::DisplayInterface;

/// Display width in pixels (number of GDDRAM columns)
pub const WIDTH: u8 = 128;

/// Display height in pixels
pub const HEIGHT: u8 = 64;

/// Number of GDDRAM pages (8-pixel-tall bands)
pub const PAGES: u8 = HEIGHT / 8;

/// Highest addressable column
pub const MAX_COLUMN: u8 = WIDTH - 1;

/// Highest addressable page
pub const MAX_PAGE: u8 = PAGES - 1;

/// A register parameter that failed validation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parameter {
    /// Column address (0-127)
    ColumnAddress,
    /// Page address (0-7)
    PageAddress,
    /// Lower nibble of the page-mode column start (0-15)
    LowColumnStart,
    /// Upper nibble of the page-mode column start (0-7)
    HighColumnStart,
    /// Display start line (0-63)
    StartLine,
    /// Multiplex ratio (15-63)
    MultiplexRatio,
    /// Display offset (0-63)
    DisplayOffset,
    /// Display clock divide ratio (0-15)
    ClockDivide,
    /// Oscillator frequency (0-15)
    OscillatorFrequency,
    /// Pre-charge phase 1 period (1-15)
    PrechargePhase1,
    /// Pre-charge phase 2 period (1-15)
    PrechargePhase2,
    /// Fade/blink frame parameter (0-15)
    FadeFrames,
    /// Scroll vertical offset rows (0-63)
    ScrollRows,
    /// Vertical scroll area rows (top fixed + scrolled <= 64)
    ScrollArea,
}

impl core::fmt::Display for Parameter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::ColumnAddress => "column address",
            Self::PageAddress => "page address",
            Self::LowColumnStart => "low column start address",
            Self::HighColumnStart => "high column start address",
            Self::StartLine => "display start line",
            Self::MultiplexRatio => "multiplex ratio",
            Self::DisplayOffset => "display offset",
            Self::ClockDivide => "clock divide ratio",
            Self::OscillatorFrequency => "oscillator frequency",
            Self::PrechargePhase1 => "pre-charge phase 1 period",
            Self::PrechargePhase2 => "pre-charge phase 2 period",
            Self::FadeFrames => "fade/blink frames",
            Self::ScrollRows => "scroll rows",
            Self::ScrollArea => "vertical scroll area",
        };
        f.write_str(name)
    }
}

/// A driver operation or one step of a multi-command sequence
///
/// Named in the error log whenever a transfer fails, and carried by
/// [`Error::Aborted`] to report where a sequence stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Hardware reset pulse
    Reset,
    /// Display off
    DisplayOff,
    /// Column address range
    ColumnAddressRange,
    /// Page address range
    PageAddressRange,
    /// Low column start address
    LowColumnStart,
    /// High column start address
    HighColumnStart,
    /// Display start line
    DisplayStartLine,
    /// Fade/blink mode
    FadeBlink,
    /// Deactivate scroll
    DeactivateScroll,
    /// Zoom in
    ZoomIn,
    /// Contrast
    Contrast,
    /// Segment remap
    SegmentRemap,
    /// COM scan direction
    ScanDirection,
    /// Normal/inverse display mode
    DisplayMode,
    /// Multiplex ratio
    MultiplexRatio,
    /// Display offset
    DisplayOffset,
    /// Display clock
    DisplayClock,
    /// Pre-charge period
    PrechargePeriod,
    /// COM pins hardware configuration
    ComPins,
    /// VCOMH deselect level
    DeselectLevel,
    /// Memory addressing mode
    MemoryAddressingMode,
    /// Charge pump
    ChargePump,
    /// Entire display on/off
    EntireDisplay,
    /// Clear GDDRAM
    Clear,
    /// Display on
    DisplayOn,
    /// Scroll setup command
    ConfigureScroll,
    /// Activate scroll
    ActivateScroll,
    /// Page start address (page addressing mode)
    PageStart,
    /// Vertical scroll area
    VerticalScrollArea,
    /// Write one pixel
    WritePoint,
    /// Fill a rectangle
    FillRect,
    /// Draw a picture
    DrawPicture,
    /// Write a string
    WriteString,
    /// Flush the shadow GDDRAM
    Update,
}

impl core::fmt::Display for Step {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Reset => "reset",
            Self::DisplayOff => "set display off",
            Self::ColumnAddressRange => "set column address range",
            Self::PageAddressRange => "set page address range",
            Self::LowColumnStart => "set low column start address",
            Self::HighColumnStart => "set high column start address",
            Self::DisplayStartLine => "set display start line",
            Self::FadeBlink => "set fade blinking mode",
            Self::DeactivateScroll => "deactivate scroll",
            Self::ZoomIn => "set zoom in",
            Self::Contrast => "set contrast",
            Self::SegmentRemap => "set segment remap",
            Self::ScanDirection => "set scan direction",
            Self::DisplayMode => "set display mode",
            Self::MultiplexRatio => "set multiplex ratio",
            Self::DisplayOffset => "set display offset",
            Self::DisplayClock => "set display clock",
            Self::PrechargePeriod => "set pre-charge period",
            Self::ComPins => "set com pins hardware configuration",
            Self::DeselectLevel => "set deselect level",
            Self::MemoryAddressingMode => "set memory addressing mode",
            Self::ChargePump => "set charge pump",
            Self::EntireDisplay => "set entire display",
            Self::Clear => "clear",
            Self::DisplayOn => "set display on",
            Self::ConfigureScroll => "configure scroll",
            Self::ActivateScroll => "activate scroll",
            Self::PageStart => "set page start address",
            Self::VerticalScrollArea => "set vertical scroll area",
            Self::WritePoint => "write point",
            Self::FillRect => "fill rect",
            Self::DrawPicture => "draw picture",
            Self::WriteString => "write string",
            Self::Update => "update",
        };
        f.write_str(name)
    }
}

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
/// This allows error handling code to match on the underlying hardware error.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (bus/GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
    /// The session has not been initialized (or was deinitialized)
    NotInitialized,
    /// A single register parameter is out of range
    InvalidParameter {
        /// Which parameter
        parameter: Parameter,
        /// Rejected value
        value: u8,
    },
    /// A start/end address pair is out of range or reversed
    InvalidRange {
        /// Which address space
        parameter: Parameter,
        /// Requested start
        start: u8,
        /// Requested end
        end: u8,
    },
    /// A pixel coordinate lies outside 0-127 x 0-63
    PointOutOfBounds {
        /// X coordinate
        x: u8,
        /// Y coordinate
        y: u8,
    },
    /// A drawing window is reversed or lies outside the display
    InvalidRect {
        /// Left column
        left: u8,
        /// Top row
        top: u8,
        /// Right column
        right: u8,
        /// Bottom row
        bottom: u8,
    },
    /// An image buffer does not match the packed size of its window
    BufferSizeMismatch {
        /// Required buffer size in bytes
        expected: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
    /// Rendered text would cross the right or bottom edge
    TextOutOfBounds {
        /// X coordinate of the text origin
        x: u8,
        /// Y coordinate of the text origin
        y: u8,
        /// Rendered width in pixels
        width: usize,
        /// Rendered height in pixels
        height: usize,
    },
    /// The font has no glyph for this character
    UnsupportedCharacter(char),
    /// A multi-step sequence failed and the session was torn down
    Aborted {
        /// Step that failed
        step: Step,
        /// Transport error reported by that step
        source: I::Error,
    },
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::NotInitialized => write!(f, "Display not initialized"),
            Self::InvalidParameter { parameter, value } => {
                write!(f, "Invalid {parameter}: {value}")
            }
            Self::InvalidRange {
                parameter,
                start,
                end,
            } => write!(f, "Invalid {parameter} range: {start}..={end}"),
            Self::PointOutOfBounds { x, y } => write!(f, "Point out of bounds: ({x}, {y})"),
            Self::InvalidRect {
                left,
                top,
                right,
                bottom,
            } => write!(
                f,
                "Invalid rectangle: left={left}, top={top}, right={right}, bottom={bottom}"
            ),
            Self::BufferSizeMismatch { expected, provided } => write!(
                f,
                "Buffer size mismatch: expected {expected} bytes, provided {provided}"
            ),
            Self::TextOutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "Text out of bounds: {width}x{height} pixels at ({x}, {y})"
            ),
            Self::UnsupportedCharacter(c) => write!(f, "Unsupported character: {c:?}"),
            Self::Aborted { step, .. } => write!(f, "Sequence aborted: {step} failed"),
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is created.
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// A register value is out of range
    InvalidParameter {
        /// Which parameter
        parameter: Parameter,
        /// Rejected value
        value: u8,
    },
    /// A default address window is out of range or reversed
    InvalidRange {
        /// Which address space
        parameter: Parameter,
        /// Requested start
        start: u8,
        /// Requested end
        end: u8,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidParameter { parameter, value } => {
                write!(f, "Invalid {parameter}: {value}")
            }
            Self::InvalidRange {
                parameter,
                start,
                end,
            } => write!(f, "Invalid {parameter} range: {start}..={end}"),
        }
    }
}

impl core::error::Error for BuilderError {}

/// A rejected argument, before it is attached to a builder or runtime error
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Violation {
    Parameter { parameter: Parameter, value: u8 },
    Range { parameter: Parameter, start: u8, end: u8 },
}

/// Check that `min <= value <= max`
pub(crate) fn check_parameter(
    parameter: Parameter,
    value: u8,
    min: u8,
    max: u8,
) -> Result<(), Violation> {
    if value < min || value > max {
        return Err(Violation::Parameter { parameter, value });
    }
    Ok(())
}

/// Check that `start <= end <= max`
pub(crate) fn check_range(
    parameter: Parameter,
    start: u8,
    end: u8,
    max: u8,
) -> Result<(), Violation> {
    if end < start || end > max {
        return Err(Violation::Range {
            parameter,
            start,
            end,
        });
    }
    Ok(())
}

impl From<Violation> for BuilderError {
    fn from(violation: Violation) -> Self {
        match violation {
            Violation::Parameter { parameter, value } => {
                Self::InvalidParameter { parameter, value }
            }
            Violation::Range {
                parameter,
                start,
                end,
            } => Self::InvalidRange {
                parameter,
                start,
                end,
            },
        }
    }
}

impl<I: DisplayInterface> From<Violation> for Error<I> {
    fn from(violation: Violation) -> Self {
        match violation {
            Violation::Parameter { parameter, value } => {
                Self::InvalidParameter { parameter, value }
            }
            Violation::Range {
                parameter,
                start,
                end,
            } => Self::InvalidRange {
                parameter,
                start,
                end,
            },
        }
    }
}
