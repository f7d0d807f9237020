//! Display configuration types and builder

use crate::command::{
    AddressingMode, ComPinConfig, DeselectLevel, FadeBlinkMode, MAX_FADE_FRAMES, ScanDirection,
    SegmentRemap,
};
pub use crate::error::{BuilderError, HEIGHT, MAX_COLUMN, MAX_PAGE, PAGES, WIDTH};
use crate::error::{Parameter, Violation, check_parameter, check_range};

/// Display configuration
///
/// This struct holds every register value programmed by
/// [`Display::init`](crate::display::Display::init), in sequence order.
/// Use [`Builder`] to create a Config.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Column address window (start, end), 0-127
    pub column_range: (u8, u8),
    /// Page address window (start, end), 0-7
    pub page_range: (u8, u8),
    /// Page-mode column start, low nibble (0-15)
    pub low_column_start: u8,
    /// Page-mode column start, high nibble (0-7)
    pub high_column_start: u8,
    /// Display start line (0-63)
    pub start_line: u8,
    /// Fade/blink mode applied at init
    pub fade_blink_mode: FadeBlinkMode,
    /// Fade/blink frame parameter (0-15)
    pub fade_frames: u8,
    /// Zoom in applied at init
    pub zoom_in: bool,
    /// Contrast (0-255)
    pub contrast: u8,
    /// Segment remap
    pub segment_remap: SegmentRemap,
    /// COM scan direction
    pub scan_direction: ScanDirection,
    /// Inverse display mode
    pub inverted: bool,
    /// Multiplex ratio (15-63, i.e. 16MUX-64MUX)
    pub multiplex_ratio: u8,
    /// Vertical display offset (0-63)
    pub display_offset: u8,
    /// Display clock divide ratio minus one (0-15)
    pub clock_divide: u8,
    /// Oscillator frequency setting (0-15)
    pub oscillator_frequency: u8,
    /// Pre-charge phase 1 period in DCLKs (1-15)
    pub precharge_phase1: u8,
    /// Pre-charge phase 2 period in DCLKs (1-15)
    pub precharge_phase2: u8,
    /// COM pins hardware layout
    pub com_pins: ComPinConfig,
    /// COM left/right remap
    pub com_left_right_remap: bool,
    /// VCOMH deselect level
    pub deselect_level: DeselectLevel,
    /// Memory addressing mode
    pub addressing_mode: AddressingMode,
}

impl Config {
    fn validate(&self) -> Result<(), Violation> {
        check_range(
            Parameter::ColumnAddress,
            self.column_range.0,
            self.column_range.1,
            MAX_COLUMN,
        )?;
        check_range(
            Parameter::PageAddress,
            self.page_range.0,
            self.page_range.1,
            MAX_PAGE,
        )?;
        check_parameter(Parameter::LowColumnStart, self.low_column_start, 0, 0x0F)?;
        check_parameter(Parameter::HighColumnStart, self.high_column_start, 0, 0x07)?;
        check_parameter(Parameter::StartLine, self.start_line, 0, HEIGHT - 1)?;
        check_parameter(Parameter::FadeFrames, self.fade_frames, 0, MAX_FADE_FRAMES)?;
        check_parameter(Parameter::MultiplexRatio, self.multiplex_ratio, 15, HEIGHT - 1)?;
        check_parameter(Parameter::DisplayOffset, self.display_offset, 0, HEIGHT - 1)?;
        check_parameter(Parameter::ClockDivide, self.clock_divide, 0, 0x0F)?;
        check_parameter(
            Parameter::OscillatorFrequency,
            self.oscillator_frequency,
            0,
            0x0F,
        )?;
        check_parameter(Parameter::PrechargePhase1, self.precharge_phase1, 1, 0x0F)?;
        check_parameter(Parameter::PrechargePhase2, self.precharge_phase2, 1, 0x0F)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            column_range: (0, MAX_COLUMN),
            page_range: (0, MAX_PAGE),
            low_column_start: 0x00,
            high_column_start: 0x00,
            start_line: 0,
            fade_blink_mode: FadeBlinkMode::Off,
            fade_frames: 0,
            zoom_in: false,
            // Reference value for 128x64 modules with internal charge pump
            contrast: 0xCF,
            segment_remap: SegmentRemap::Column127,
            scan_direction: ScanDirection::ComNStart,
            inverted: false,
            multiplex_ratio: 63,
            display_offset: 0,
            clock_divide: 0x00,
            oscillator_frequency: 0x08,
            precharge_phase1: 0x01,
            precharge_phase2: 0x0F,
            com_pins: ComPinConfig::Alternative,
            com_left_right_remap: false,
            deselect_level: DeselectLevel::Vcc0_77,
            addressing_mode: AddressingMode::Page,
        }
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust,no_run
/// use ssd1306_session::{Builder, ComPinConfig};
///
/// // 128x32 module
/// let config = match Builder::new()
///     .multiplex_ratio(31)
///     .com_pins(ComPinConfig::Sequential, false)
///     .contrast(0x8F)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column address window
    pub fn column_range(mut self, start: u8, end: u8) -> Self {
        self.config.column_range = (start, end);
        self
    }

    /// Set the page address window
    pub fn page_range(mut self, start: u8, end: u8) -> Self {
        self.config.page_range = (start, end);
        self
    }

    /// Set the page-mode column start address (low and high nibble)
    pub fn column_start(mut self, low: u8, high: u8) -> Self {
        self.config.low_column_start = low;
        self.config.high_column_start = high;
        self
    }

    /// Set display start line
    pub fn start_line(mut self, line: u8) -> Self {
        self.config.start_line = line;
        self
    }

    /// Set the fade/blink mode applied at init
    pub fn fade_blink(mut self, mode: FadeBlinkMode, frames: u8) -> Self {
        self.config.fade_blink_mode = mode;
        self.config.fade_frames = frames;
        self
    }

    /// Set zoom in applied at init
    pub fn zoom_in(mut self, enable: bool) -> Self {
        self.config.zoom_in = enable;
        self
    }

    /// Set contrast
    pub fn contrast(mut self, value: u8) -> Self {
        self.config.contrast = value;
        self
    }

    /// Set segment remap
    pub fn segment_remap(mut self, remap: SegmentRemap) -> Self {
        self.config.segment_remap = remap;
        self
    }

    /// Set COM scan direction
    pub fn scan_direction(mut self, direction: ScanDirection) -> Self {
        self.config.scan_direction = direction;
        self
    }

    /// Set inverse display mode
    pub fn inverted(mut self, inverted: bool) -> Self {
        self.config.inverted = inverted;
        self
    }

    /// Set multiplex ratio (15-63)
    pub fn multiplex_ratio(mut self, ratio: u8) -> Self {
        self.config.multiplex_ratio = ratio;
        self
    }

    /// Set vertical display offset
    pub fn display_offset(mut self, offset: u8) -> Self {
        self.config.display_offset = offset;
        self
    }

    /// Set display clock divide ratio and oscillator frequency
    pub fn display_clock(mut self, divide: u8, frequency: u8) -> Self {
        self.config.clock_divide = divide;
        self.config.oscillator_frequency = frequency;
        self
    }

    /// Set pre-charge phase periods
    pub fn precharge_period(mut self, phase1: u8, phase2: u8) -> Self {
        self.config.precharge_phase1 = phase1;
        self.config.precharge_phase2 = phase2;
        self
    }

    /// Set COM pins hardware configuration
    pub fn com_pins(mut self, config: ComPinConfig, left_right_remap: bool) -> Self {
        self.config.com_pins = config;
        self.config.com_left_right_remap = left_right_remap;
        self
    }

    /// Set VCOMH deselect level
    pub fn deselect_level(mut self, level: DeselectLevel) -> Self {
        self.config.deselect_level = level;
        self
    }

    /// Set memory addressing mode
    pub fn addressing_mode(mut self, mode: AddressingMode) -> Self {
        self.config.addressing_mode = mode;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError` naming the first out-of-range value.
    pub fn build(self) -> Result<Config, BuilderError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Builder::new().build().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.addressing_mode, AddressingMode::Page);
        assert_eq!(config.column_range, (0, 127));
        assert_eq!(config.page_range, (0, 7));
    }

    #[test]
    fn test_reversed_column_range_rejected() {
        let result = Builder::new().column_range(20, 10).build();
        assert_eq!(
            result,
            Err(BuilderError::InvalidRange {
                parameter: Parameter::ColumnAddress,
                start: 20,
                end: 10
            })
        );
    }

    #[test]
    fn test_page_range_beyond_seven_rejected() {
        let result = Builder::new().page_range(0, 8).build();
        assert!(matches!(result, Err(BuilderError::InvalidRange { .. })));
    }

    #[test]
    fn test_fade_frames_above_fifteen_rejected() {
        let result = Builder::new().fade_blink(FadeBlinkMode::Blink, 16).build();
        assert_eq!(
            result,
            Err(BuilderError::InvalidParameter {
                parameter: Parameter::FadeFrames,
                value: 16
            })
        );
    }

    #[test]
    fn test_precharge_phase_zero_rejected() {
        let result = Builder::new().precharge_period(0, 15).build();
        assert!(matches!(
            result,
            Err(BuilderError::InvalidParameter {
                parameter: Parameter::PrechargePhase1,
                ..
            })
        ));
    }

    #[test]
    fn test_builder_overrides() {
        let config = Builder::new()
            .contrast(0x10)
            .inverted(true)
            .multiplex_ratio(31)
            .com_pins(ComPinConfig::Sequential, true)
            .build()
            .unwrap();
        assert_eq!(config.contrast, 0x10);
        assert!(config.inverted);
        assert_eq!(config.multiplex_ratio, 31);
        assert_eq!(config.com_pins, ComPinConfig::Sequential);
        assert!(config.com_left_right_remap);
    }
}
