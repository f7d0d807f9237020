//! Controller session
//!
//! [`Display`] owns the transport, the shadow GDDRAM and a model of every
//! register the driver has programmed. All operations go through `&mut self`,
//! so a session has exactly one owner.
//!
//! ## Lifecycle
//!
//! ```text
//! new() ──> init() ──> drawing / effects / setters ──> deinit() ──> release()
//!             ^                                           |
//!             └───────────────────────────────────────────┘
//! ```
//!
//! Every operation other than `init`, `deinit` and the accessors fails with
//! [`Error::NotInitialized`] until `init` succeeds.

use embedded_hal::delay::DelayNs;
use log::{debug, error, warn};

use crate::command::{
    AddressingMode, CHARGE_PUMP, CHARGE_PUMP_DISABLE, CHARGE_PUMP_ENABLE, ComPinConfig,
    CommandFrame, DEACTIVATE_SCROLL, DISPLAY_OFF, DISPLAY_ON, DISPLAY_START_LINE,
    DeselectLevel, ENTIRE_DISPLAY_ON, ENTIRE_DISPLAY_RESUME, FadeBlinkMode, HIGH_COLUMN_START,
    LEFT_HORIZONTAL_SCROLL, LOW_COLUMN_START, MAX_FADE_FRAMES, PAGE_START,
    RIGHT_HORIZONTAL_SCROLL, SET_COLUMN_ADDRESS, SET_COM_PINS, SET_CONTRAST, SET_DESELECT_LEVEL,
    SET_DISPLAY_CLOCK, SET_DISPLAY_OFFSET, SET_FADE_BLINK, SET_MEMORY_ADDRESSING_MODE,
    SET_MULTIPLEX_RATIO, SET_PAGE_ADDRESS, SET_PRECHARGE_PERIOD, SET_VERTICAL_SCROLL_AREA,
    SET_ZOOM_IN, ScanDirection, ScrollDirection, ScrollInterval, SegmentRemap,
    VERTICAL_LEFT_HORIZONTAL_SCROLL, VERTICAL_RIGHT_HORIZONTAL_SCROLL, clock_byte,
    com_pins_byte, display_mode, fade_blink_byte, precharge_byte,
};
use crate::config::Config;
use crate::error::{
    Error, HEIGHT, MAX_COLUMN, MAX_PAGE, PAGES, Parameter, Step, check_parameter, check_range,
};
use crate::gram::Gram;
use crate::interface::{DisplayInterface, InterfaceKind};

pub(crate) type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Parameters of the last configured scroll
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollSetup {
    /// Horizontal direction
    pub direction: ScrollDirection,
    /// First page of the scrolled band
    pub start_page: u8,
    /// Last page of the scrolled band
    pub end_page: u8,
    /// Vertical offset in rows per step, `None` for a purely horizontal scroll
    pub vertical_offset: Option<u8>,
    /// Time between steps
    pub interval: ScrollInterval,
}

impl ScrollSetup {
    pub(crate) fn frame(&self) -> CommandFrame {
        let interval = self.interval as u8;
        match self.vertical_offset {
            Some(rows) => {
                let opcode = match self.direction {
                    ScrollDirection::Left => VERTICAL_LEFT_HORIZONTAL_SCROLL,
                    ScrollDirection::Right => VERTICAL_RIGHT_HORIZONTAL_SCROLL,
                };
                CommandFrame::new(&[
                    opcode,
                    0x00,
                    self.start_page,
                    interval,
                    self.end_page,
                    rows,
                ])
            }
            None => {
                let opcode = match self.direction {
                    ScrollDirection::Left => LEFT_HORIZONTAL_SCROLL,
                    ScrollDirection::Right => RIGHT_HORIZONTAL_SCROLL,
                };
                CommandFrame::new(&[
                    opcode,
                    0x00,
                    self.start_page,
                    interval,
                    self.end_page,
                    0x00,
                    0xFF,
                ])
            }
        }
    }
}

/// Register state the driver believes the controller holds
///
/// Updated only after the corresponding command was accepted by the transport.
#[derive(Clone, Debug, PartialEq)]
pub struct State {
    /// Session is bound and programmed
    pub initialized: bool,
    /// Panel on (0xAF) or asleep (0xAE)
    pub display_on: bool,
    /// Memory addressing mode
    pub addressing_mode: AddressingMode,
    /// Column address window
    pub column_range: (u8, u8),
    /// Page address window
    pub page_range: (u8, u8),
    /// Page-mode column start, low nibble
    pub low_column_start: u8,
    /// Page-mode column start, high nibble
    pub high_column_start: u8,
    /// Page-mode page start
    pub page_start: u8,
    /// Display start line
    pub start_line: u8,
    /// Contrast
    pub contrast: u8,
    /// Inverse display mode
    pub inverted: bool,
    /// Entire display forced on
    pub entire_display_on: bool,
    /// Segment remap
    pub segment_remap: SegmentRemap,
    /// COM scan direction
    pub scan_direction: ScanDirection,
    /// Multiplex ratio
    pub multiplex_ratio: u8,
    /// Display offset
    pub display_offset: u8,
    /// Clock (divide ratio, oscillator frequency)
    pub clock: (u8, u8),
    /// Pre-charge (phase 1, phase 2)
    pub precharge: (u8, u8),
    /// COM pins layout and left/right remap
    pub com_pins: (ComPinConfig, bool),
    /// VCOMH deselect level
    pub deselect_level: DeselectLevel,
    /// Charge pump enabled
    pub charge_pump: bool,
    /// A scroll is running
    pub scroll_active: bool,
    /// Last configured scroll
    pub scroll: Option<ScrollSetup>,
    /// Vertical scroll area (top fixed rows, scrolled rows)
    pub vertical_scroll_area: (u8, u8),
    /// Fade/blink mode and frame parameter
    pub fade_blink: (FadeBlinkMode, u8),
    /// Zoom in enabled
    pub zoom_in: bool,
}

impl State {
    /// State programmed by a successful init with `config`, before `initialized` is set
    fn from_config(config: &Config) -> Self {
        Self {
            initialized: false,
            display_on: false,
            addressing_mode: config.addressing_mode,
            column_range: config.column_range,
            page_range: config.page_range,
            low_column_start: config.low_column_start,
            high_column_start: config.high_column_start,
            page_start: 0,
            start_line: config.start_line,
            contrast: config.contrast,
            inverted: config.inverted,
            entire_display_on: false,
            segment_remap: config.segment_remap,
            scan_direction: config.scan_direction,
            multiplex_ratio: config.multiplex_ratio,
            display_offset: config.display_offset,
            clock: (config.clock_divide, config.oscillator_frequency),
            precharge: (config.precharge_phase1, config.precharge_phase2),
            com_pins: (config.com_pins, config.com_left_right_remap),
            deselect_level: config.deselect_level,
            charge_pump: false,
            scroll_active: false,
            scroll: None,
            vertical_scroll_area: (0, HEIGHT),
            fade_blink: (config.fade_blink_mode, config.fade_frames),
            zoom_in: config.zoom_in,
        }
    }
}

/// Commands sent by [`Display::init`] ahead of clearing GDDRAM
fn init_sequence(config: &Config) -> [(Step, CommandFrame); 22] {
    [
        (Step::DisplayOff, CommandFrame::new(&[DISPLAY_OFF])),
        (
            Step::ColumnAddressRange,
            CommandFrame::new(&[
                SET_COLUMN_ADDRESS,
                config.column_range.0,
                config.column_range.1,
            ]),
        ),
        (
            Step::PageAddressRange,
            CommandFrame::new(&[SET_PAGE_ADDRESS, config.page_range.0, config.page_range.1]),
        ),
        (
            Step::LowColumnStart,
            CommandFrame::new(&[LOW_COLUMN_START | (config.low_column_start & 0x0F)]),
        ),
        (
            Step::HighColumnStart,
            CommandFrame::new(&[HIGH_COLUMN_START | (config.high_column_start & 0x07)]),
        ),
        (
            Step::DisplayStartLine,
            CommandFrame::new(&[DISPLAY_START_LINE | (config.start_line & 0x3F)]),
        ),
        (
            Step::FadeBlink,
            CommandFrame::new(&[
                SET_FADE_BLINK,
                fade_blink_byte(config.fade_blink_mode, config.fade_frames),
            ]),
        ),
        (
            Step::DeactivateScroll,
            CommandFrame::new(&[DEACTIVATE_SCROLL]),
        ),
        (
            Step::ZoomIn,
            CommandFrame::new(&[SET_ZOOM_IN, u8::from(config.zoom_in)]),
        ),
        (
            Step::Contrast,
            CommandFrame::new(&[SET_CONTRAST, config.contrast]),
        ),
        (
            Step::SegmentRemap,
            CommandFrame::new(&[config.segment_remap.command()]),
        ),
        (
            Step::ScanDirection,
            CommandFrame::new(&[config.scan_direction.command()]),
        ),
        (
            Step::DisplayMode,
            CommandFrame::new(&[display_mode(config.inverted)]),
        ),
        (
            Step::MultiplexRatio,
            CommandFrame::new(&[SET_MULTIPLEX_RATIO, config.multiplex_ratio]),
        ),
        (
            Step::DisplayOffset,
            CommandFrame::new(&[SET_DISPLAY_OFFSET, config.display_offset]),
        ),
        (
            Step::DisplayClock,
            CommandFrame::new(&[
                SET_DISPLAY_CLOCK,
                clock_byte(config.clock_divide, config.oscillator_frequency),
            ]),
        ),
        (
            Step::PrechargePeriod,
            CommandFrame::new(&[
                SET_PRECHARGE_PERIOD,
                precharge_byte(config.precharge_phase1, config.precharge_phase2),
            ]),
        ),
        (
            Step::ComPins,
            CommandFrame::new(&[
                SET_COM_PINS,
                com_pins_byte(config.com_pins, config.com_left_right_remap),
            ]),
        ),
        (
            Step::DeselectLevel,
            CommandFrame::new(&[SET_DESELECT_LEVEL, config.deselect_level as u8]),
        ),
        (
            Step::MemoryAddressingMode,
            CommandFrame::new(&[SET_MEMORY_ADDRESSING_MODE, config.addressing_mode as u8]),
        ),
        (
            Step::ChargePump,
            CommandFrame::new(&[CHARGE_PUMP, CHARGE_PUMP_ENABLE]),
        ),
        (
            Step::EntireDisplay,
            CommandFrame::new(&[ENTIRE_DISPLAY_RESUME]),
        ),
    ]
}

/// SSD1306 controller session
///
/// Generic over the transport, see [`DisplayInterface`]. Drawing operations
/// live in [`crate::draw`], scroll/fade/zoom effects in [`crate::effects`].
///
/// ## Example
///
/// ```rust,no_run
/// use ssd1306_session::{Builder, Display, I2cAddress, I2cInterface};
/// # use core::convert::Infallible;
/// # use embedded_hal::delay::DelayNs;
/// # use embedded_hal::i2c::{ErrorType, I2c, Operation, SevenBitAddress};
/// # struct MockI2c;
/// # impl ErrorType for MockI2c { type Error = Infallible; }
/// # impl I2c<SevenBitAddress> for MockI2c {
/// #     fn transaction(
/// #         &mut self,
/// #         _address: u8,
/// #         _operations: &mut [Operation<'_>],
/// #     ) -> Result<(), Self::Error> {
/// #         Ok(())
/// #     }
/// # }
/// # struct MockDelay;
/// # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
/// # let mut delay = MockDelay;
/// let interface = I2cInterface::new(MockI2c, I2cAddress::Primary);
/// let config = match Builder::new().contrast(0x7F).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
///
/// let mut display = Display::new(interface, config);
/// if display.init(&mut delay).is_err() {
///     return;
/// }
/// let _ = display.set_inverted(true);
/// let _ = display.deinit();
/// ```
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    pub(crate) interface: I,
    /// Values programmed by `init`
    pub(crate) config: Config,
    /// Modeled register state
    pub(crate) state: State,
    /// Shadow GDDRAM
    pub(crate) gram: Gram,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create an uninitialized session
    ///
    /// No bus traffic happens until [`init`](Self::init).
    pub fn new(interface: I, config: Config) -> Self {
        let state = State::from_config(&config);
        Self {
            interface,
            config,
            state,
            gram: Gram::new(),
        }
    }

    /// Bind the transport, reset the controller and program every register
    ///
    /// The shadow GDDRAM is cleared and written out before the panel is
    /// switched on. Calling `init` again re-runs the whole sequence, which
    /// restores fade/blink and zoom to their configured values.
    ///
    /// # Errors
    ///
    /// - [`Error::Interface`] if the transport could not be claimed. Nothing
    ///   is torn down in that case.
    /// - [`Error::Aborted`] naming the first step that failed. The session has
    ///   been deinitialized exactly once before this returns.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        debug!("initializing ssd1306 over {:?}", self.interface.kind());
        self.interface.init().map_err(Error::Interface)?;

        self.state = State::from_config(&self.config);
        if let Err(source) = self.interface.reset(delay) {
            return Err(self.abort(Step::Reset, source));
        }

        for (step, frame) in init_sequence(&self.config) {
            debug!("init step: {step}");
            self.run_step(step, frame.as_bytes())?;
        }

        self.gram.fill(0x00);
        if let Err(source) = self.flush() {
            return Err(self.abort(Step::Clear, source));
        }
        self.run_step(Step::DisplayOn, &[DISPLAY_ON])?;

        self.state.initialized = true;
        self.state.display_on = true;
        self.state.charge_pump = true;
        debug!("init sequence complete");
        Ok(())
    }

    /// Power the panel down and release the transport
    ///
    /// When initialized, the charge pump and the panel are switched off on a
    /// best-effort basis. The transport is always deinitialized afterwards.
    /// A failed `deinit` is not retried.
    ///
    /// # Errors
    ///
    /// Returns the first transport error encountered.
    pub fn deinit(&mut self) -> DisplayResult<I> {
        debug!("deinitializing ssd1306");
        if self.state.initialized {
            return self.teardown();
        }
        let result = self.interface.deinit().map_err(Error::Interface);
        self.mark_released();
        result
    }

    /// Send one step of a multi-command sequence, tearing down on failure
    pub(crate) fn run_step(&mut self, step: Step, commands: &[u8]) -> DisplayResult<I> {
        match self.interface.send_commands(commands) {
            Ok(()) => Ok(()),
            Err(source) => Err(self.abort(step, source)),
        }
    }

    fn abort(&mut self, step: Step, source: I::Error) -> Error<I> {
        error!("{step} failed");
        if let Err(err) = self.teardown() {
            warn!("teardown after {step} failed: {err}");
        }
        Error::Aborted { step, source }
    }

    fn teardown(&mut self) -> DisplayResult<I> {
        let mut first = self
            .interface
            .send_commands(&[CHARGE_PUMP, CHARGE_PUMP_DISABLE])
            .err();
        if let Err(err) = self.interface.send_commands(&[DISPLAY_OFF]) {
            first = first.or(Some(err));
        }
        if let Err(err) = self.interface.deinit() {
            first = first.or(Some(err));
        }
        self.mark_released();
        match first {
            Some(err) => Err(Error::Interface(err)),
            None => Ok(()),
        }
    }

    fn mark_released(&mut self) {
        self.state.initialized = false;
        self.state.display_on = false;
        self.state.charge_pump = false;
        self.state.scroll_active = false;
    }

    pub(crate) fn ensure_initialized(&self) -> DisplayResult<I> {
        if self.state.initialized {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }

    /// Send a command that is not part of a sequence
    ///
    /// A failure is logged under `step` and leaves the session as it was.
    pub(crate) fn send_commands(&mut self, step: Step, commands: &[u8]) -> DisplayResult<I> {
        self.interface.send_commands(commands).map_err(|source| {
            error!("{step} failed");
            Error::Interface(source)
        })
    }

    /// Write every dirty run of the shadow to the controller
    pub(crate) fn flush(&mut self) -> Result<(), I::Error> {
        for page in 0..PAGES {
            let Some((start, end)) = self.gram.dirty_run(page) else {
                continue;
            };
            self.select_window(page, start, end)?;
            let bytes = self
                .gram
                .page(page)
                .get(usize::from(start)..=usize::from(end))
                .unwrap_or(&[]);
            self.interface.send_data(bytes)?;
            self.gram.mark_clean(page);
        }
        Ok(())
    }

    /// Point the controller at columns `start..=end` of `page`
    fn select_window(&mut self, page: u8, start: u8, end: u8) -> Result<(), I::Error> {
        match self.state.addressing_mode {
            AddressingMode::Page => {
                let low = start & 0x0F;
                let high = start >> 4;
                self.interface.send_commands(&[
                    PAGE_START | page,
                    LOW_COLUMN_START | low,
                    HIGH_COLUMN_START | high,
                ])?;
                self.state.page_start = page;
                self.state.low_column_start = low;
                self.state.high_column_start = high;
            }
            AddressingMode::Horizontal | AddressingMode::Vertical => {
                self.interface.send_commands(&[
                    SET_COLUMN_ADDRESS,
                    start,
                    end,
                    SET_PAGE_ADDRESS,
                    page,
                    page,
                ])?;
                self.state.column_range = (start, end);
                self.state.page_range = (page, page);
            }
        }
        Ok(())
    }

    /// Switch the panel on or off
    pub fn set_display(&mut self, on: bool) -> DisplayResult<I> {
        self.ensure_initialized()?;
        let (step, command) = if on {
            (Step::DisplayOn, DISPLAY_ON)
        } else {
            (Step::DisplayOff, DISPLAY_OFF)
        };
        self.send_commands(step, &[command])?;
        self.state.display_on = on;
        Ok(())
    }

    /// Set the column address window (horizontal/vertical addressing)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `end < start` or `end > 127`.
    pub fn set_column_range(&mut self, start: u8, end: u8) -> DisplayResult<I> {
        self.ensure_initialized()?;
        check_range(Parameter::ColumnAddress, start, end, MAX_COLUMN)?;
        self.send_commands(Step::ColumnAddressRange, &[SET_COLUMN_ADDRESS, start, end])?;
        self.state.column_range = (start, end);
        Ok(())
    }

    /// Set the page address window (horizontal/vertical addressing)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `end < start` or `end > 7`.
    pub fn set_page_range(&mut self, start: u8, end: u8) -> DisplayResult<I> {
        self.ensure_initialized()?;
        check_range(Parameter::PageAddress, start, end, MAX_PAGE)?;
        self.send_commands(Step::PageAddressRange, &[SET_PAGE_ADDRESS, start, end])?;
        self.state.page_range = (start, end);
        Ok(())
    }

    /// Set the low nibble of the page-mode column start (0-15)
    pub fn set_low_column_start_address(&mut self, address: u8) -> DisplayResult<I> {
        self.ensure_initialized()?;
        check_parameter(Parameter::LowColumnStart, address, 0, 0x0F)?;
        self.send_commands(Step::LowColumnStart, &[LOW_COLUMN_START | address])?;
        self.state.low_column_start = address;
        Ok(())
    }

    /// Set the high nibble of the page-mode column start (0-7)
    pub fn set_high_column_start_address(&mut self, address: u8) -> DisplayResult<I> {
        self.ensure_initialized()?;
        check_parameter(Parameter::HighColumnStart, address, 0, 0x07)?;
        self.send_commands(Step::HighColumnStart, &[HIGH_COLUMN_START | address])?;
        self.state.high_column_start = address;
        Ok(())
    }

    /// Set the page-mode page start (0-7)
    pub fn set_page_start_address(&mut self, page: u8) -> DisplayResult<I> {
        self.ensure_initialized()?;
        check_parameter(Parameter::PageAddress, page, 0, MAX_PAGE)?;
        self.send_commands(Step::PageStart, &[PAGE_START | page])?;
        self.state.page_start = page;
        Ok(())
    }

    /// Set the RAM row shown on the first COM line (0-63)
    pub fn set_display_start_line(&mut self, line: u8) -> DisplayResult<I> {
        self.ensure_initialized()?;
        check_parameter(Parameter::StartLine, line, 0, HEIGHT - 1)?;
        self.send_commands(Step::DisplayStartLine, &[DISPLAY_START_LINE | line])?;
        self.state.start_line = line;
        Ok(())
    }

    /// Set contrast
    pub fn set_contrast(&mut self, contrast: u8) -> DisplayResult<I> {
        self.ensure_initialized()?;
        self.send_commands(Step::Contrast, &[SET_CONTRAST, contrast])?;
        self.state.contrast = contrast;
        Ok(())
    }

    /// Enable or disable zoom in (each row doubled)
    pub fn set_zoom_in(&mut self, enable: bool) -> DisplayResult<I> {
        self.ensure_initialized()?;
        self.send_commands(Step::ZoomIn, &[SET_ZOOM_IN, u8::from(enable)])?;
        self.state.zoom_in = enable;
        Ok(())
    }

    /// Set the fade/blink mode and frame parameter (0-15)
    ///
    /// Unlike [`enable_fade_blink`](Self::enable_fade_blink), a transport
    /// failure here leaves the session up.
    pub fn set_fade_blink(&mut self, mode: FadeBlinkMode, frames: u8) -> DisplayResult<I> {
        self.ensure_initialized()?;
        check_parameter(Parameter::FadeFrames, frames, 0, MAX_FADE_FRAMES)?;
        self.send_commands(
            Step::FadeBlink,
            &[SET_FADE_BLINK, fade_blink_byte(mode, frames)],
        )?;
        self.state.fade_blink = (mode, frames);
        Ok(())
    }

    /// Set segment remap
    pub fn set_segment_remap(&mut self, remap: SegmentRemap) -> DisplayResult<I> {
        self.ensure_initialized()?;
        self.send_commands(Step::SegmentRemap, &[remap.command()])?;
        self.state.segment_remap = remap;
        Ok(())
    }

    /// Set COM scan direction
    pub fn set_scan_direction(&mut self, direction: ScanDirection) -> DisplayResult<I> {
        self.ensure_initialized()?;
        self.send_commands(Step::ScanDirection, &[direction.command()])?;
        self.state.scan_direction = direction;
        Ok(())
    }

    /// Select inverse (true) or normal (false) display mode
    pub fn set_inverted(&mut self, inverted: bool) -> DisplayResult<I> {
        self.ensure_initialized()?;
        self.send_commands(Step::DisplayMode, &[display_mode(inverted)])?;
        self.state.inverted = inverted;
        Ok(())
    }

    /// Light every pixel regardless of GDDRAM (true) or follow GDDRAM (false)
    pub fn set_entire_display(&mut self, on: bool) -> DisplayResult<I> {
        self.ensure_initialized()?;
        let command = if on {
            ENTIRE_DISPLAY_ON
        } else {
            ENTIRE_DISPLAY_RESUME
        };
        self.send_commands(Step::EntireDisplay, &[command])?;
        self.state.entire_display_on = on;
        Ok(())
    }

    /// Set multiplex ratio (15-63)
    pub fn set_multiplex_ratio(&mut self, ratio: u8) -> DisplayResult<I> {
        self.ensure_initialized()?;
        check_parameter(Parameter::MultiplexRatio, ratio, 15, HEIGHT - 1)?;
        self.send_commands(Step::MultiplexRatio, &[SET_MULTIPLEX_RATIO, ratio])?;
        self.state.multiplex_ratio = ratio;
        Ok(())
    }

    /// Set vertical display offset (0-63)
    pub fn set_display_offset(&mut self, offset: u8) -> DisplayResult<I> {
        self.ensure_initialized()?;
        check_parameter(Parameter::DisplayOffset, offset, 0, HEIGHT - 1)?;
        self.send_commands(Step::DisplayOffset, &[SET_DISPLAY_OFFSET, offset])?;
        self.state.display_offset = offset;
        Ok(())
    }

    /// Set clock divide ratio (0-15) and oscillator frequency (0-15)
    pub fn set_display_clock(&mut self, divide: u8, frequency: u8) -> DisplayResult<I> {
        self.ensure_initialized()?;
        check_parameter(Parameter::ClockDivide, divide, 0, 0x0F)?;
        check_parameter(Parameter::OscillatorFrequency, frequency, 0, 0x0F)?;
        self.send_commands(
            Step::DisplayClock,
            &[SET_DISPLAY_CLOCK, clock_byte(divide, frequency)],
        )?;
        self.state.clock = (divide, frequency);
        Ok(())
    }

    /// Set pre-charge phase periods (1-15 DCLKs each)
    pub fn set_precharge_period(&mut self, phase1: u8, phase2: u8) -> DisplayResult<I> {
        self.ensure_initialized()?;
        check_parameter(Parameter::PrechargePhase1, phase1, 1, 0x0F)?;
        check_parameter(Parameter::PrechargePhase2, phase2, 1, 0x0F)?;
        self.send_commands(
            Step::PrechargePeriod,
            &[SET_PRECHARGE_PERIOD, precharge_byte(phase1, phase2)],
        )?;
        self.state.precharge = (phase1, phase2);
        Ok(())
    }

    /// Set COM pins hardware configuration
    pub fn set_com_pins(
        &mut self,
        config: ComPinConfig,
        left_right_remap: bool,
    ) -> DisplayResult<I> {
        self.ensure_initialized()?;
        self.send_commands(
            Step::ComPins,
            &[SET_COM_PINS, com_pins_byte(config, left_right_remap)],
        )?;
        self.state.com_pins = (config, left_right_remap);
        Ok(())
    }

    /// Set VCOMH deselect level
    pub fn set_deselect_level(&mut self, level: DeselectLevel) -> DisplayResult<I> {
        self.ensure_initialized()?;
        self.send_commands(Step::DeselectLevel, &[SET_DESELECT_LEVEL, level as u8])?;
        self.state.deselect_level = level;
        Ok(())
    }

    /// Set memory addressing mode
    ///
    /// Drawing adapts its address window commands to the new mode.
    pub fn set_memory_addressing_mode(&mut self, mode: AddressingMode) -> DisplayResult<I> {
        self.ensure_initialized()?;
        self.send_commands(
            Step::MemoryAddressingMode,
            &[SET_MEMORY_ADDRESSING_MODE, mode as u8],
        )?;
        self.state.addressing_mode = mode;
        Ok(())
    }

    /// Enable or disable the internal charge pump
    pub fn set_charge_pump(&mut self, enable: bool) -> DisplayResult<I> {
        self.ensure_initialized()?;
        let setting = if enable {
            CHARGE_PUMP_ENABLE
        } else {
            CHARGE_PUMP_DISABLE
        };
        self.send_commands(Step::ChargePump, &[CHARGE_PUMP, setting])?;
        self.state.charge_pump = enable;
        Ok(())
    }

    /// Set the vertical scroll area
    ///
    /// `fixed` rows at the top stay put, the next `rows` rows scroll. A
    /// running scroll is deactivated first and stays off until one of the
    /// scroll effects is enabled again.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRange`] if `fixed + rows` exceeds the multiplex
    ///   ratio + 1, or `rows` exceeds 64. Nothing is sent.
    /// - [`Error::Aborted`] if deactivating the running scroll failed. The
    ///   session has been torn down.
    /// - [`Error::Interface`] if the area command itself failed.
    pub fn set_vertical_scroll_area(&mut self, fixed: u8, rows: u8) -> DisplayResult<I> {
        self.ensure_initialized()?;
        let limit = u16::from(self.state.multiplex_ratio) + 1;
        if rows > HEIGHT || u16::from(fixed) + u16::from(rows) > limit {
            return Err(Error::InvalidRange {
                parameter: Parameter::ScrollArea,
                start: fixed,
                end: rows,
            });
        }
        if self.state.scroll_active {
            self.run_step(Step::DeactivateScroll, &[DEACTIVATE_SCROLL])?;
            self.state.scroll_active = false;
        }
        self.send_commands(
            Step::VerticalScrollArea,
            &[SET_VERTICAL_SCROLL_AREA, fixed, rows],
        )?;
        self.state.vertical_scroll_area = (fixed, rows);
        Ok(())
    }

    /// Modeled register state
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Whether `init` has completed and no `deinit` happened since
    pub fn is_initialized(&self) -> bool {
        self.state.initialized
    }

    /// Configuration programmed by `init`
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Bus type of the transport
    pub fn interface_kind(&self) -> InterfaceKind {
        self.interface.kind()
    }

    /// Shadow GDDRAM
    pub fn gram(&self) -> &Gram {
        &self.gram
    }

    /// Give the transport back
    ///
    /// Call [`deinit`](Self::deinit) first to power the panel down.
    pub fn release(self) -> I {
        self.interface
    }
}
