//! Scroll, fade/blink and zoom effects
//!
//! Scrolling follows the controller's activation protocol:
//!
//! ```text
//! Inactive ──deactivate──> Inactive ──configure──> Configured ──activate──> Active
//! ```
//!
//! Scroll parameters are only ever written while scrolling is deactivated,
//! even when a scroll is already running. If any step fails the session is
//! torn down with [`Display::deinit`] and
//! [`Error::Aborted`](crate::Error::Aborted) is returned, so a scroll is
//! never left half-configured.
//!
//! Fade/blink and zoom take effect with a single command. They are reset by
//! [`Display::init`] and must be applied again after re-initialization.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ssd1306_session::{
//!     Builder, Display, FadeBlinkMode, I2cAddress, I2cInterface, ScrollInterval,
//! };
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
//! # let config = match Builder::new().build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! let mut display = Display::new(I2cInterface::new(MockI2c, I2cAddress::Primary), config);
//! if display.init(&mut delay).is_err() {
//!     return;
//! }
//!
//! // Scroll the whole panel left, one row up every 2 frames
//! let _ = display.enable_left_horizontal_scroll(0, 7, 1, ScrollInterval::Frames2);
//! let _ = display.deactivate_scroll();
//!
//! let _ = display.enable_fade_blink(FadeBlinkMode::Blink, 4);
//! let _ = display.enable_zoom_in();
//! ```

use log::debug;

use crate::command::{
    ACTIVATE_SCROLL, DEACTIVATE_SCROLL, FadeBlinkMode, MAX_FADE_FRAMES, SET_FADE_BLINK,
    SET_ZOOM_IN, ScrollDirection, ScrollInterval, fade_blink_byte,
};
use crate::display::{Display, DisplayResult, ScrollSetup};
use crate::error::{HEIGHT, MAX_PAGE, Parameter, Step, check_parameter};
use crate::interface::DisplayInterface;

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Start a continuous vertical and left horizontal scroll
    ///
    /// Pages `start_page..=end_page` move left; the whole picture moves up by
    /// `rows` rows per step.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParameter`](crate::Error::InvalidParameter) if a page
    ///   exceeds 7 or `rows` exceeds 63. Nothing is sent.
    /// - [`Error::Aborted`](crate::Error::Aborted) if a transfer failed. The
    ///   session has been torn down.
    pub fn enable_left_horizontal_scroll(
        &mut self,
        start_page: u8,
        end_page: u8,
        rows: u8,
        interval: ScrollInterval,
    ) -> DisplayResult<I> {
        self.start_scroll(ScrollSetup {
            direction: ScrollDirection::Left,
            start_page,
            end_page,
            vertical_offset: Some(rows),
            interval,
        })
    }

    /// Start a continuous vertical and right horizontal scroll
    ///
    /// Same contract as
    /// [`enable_left_horizontal_scroll`](Self::enable_left_horizontal_scroll).
    pub fn enable_right_horizontal_scroll(
        &mut self,
        start_page: u8,
        end_page: u8,
        rows: u8,
        interval: ScrollInterval,
    ) -> DisplayResult<I> {
        self.start_scroll(ScrollSetup {
            direction: ScrollDirection::Right,
            start_page,
            end_page,
            vertical_offset: Some(rows),
            interval,
        })
    }

    /// Start a purely horizontal scroll of pages `start_page..=end_page`
    pub fn enable_horizontal_scroll(
        &mut self,
        direction: ScrollDirection,
        start_page: u8,
        end_page: u8,
        interval: ScrollInterval,
    ) -> DisplayResult<I> {
        self.start_scroll(ScrollSetup {
            direction,
            start_page,
            end_page,
            vertical_offset: None,
            interval,
        })
    }

    fn start_scroll(&mut self, setup: ScrollSetup) -> DisplayResult<I> {
        self.ensure_initialized()?;
        check_parameter(Parameter::PageAddress, setup.start_page, 0, MAX_PAGE)?;
        check_parameter(Parameter::PageAddress, setup.end_page, 0, MAX_PAGE)?;
        if let Some(rows) = setup.vertical_offset {
            check_parameter(Parameter::ScrollRows, rows, 0, HEIGHT - 1)?;
        }

        self.run_step(Step::DeactivateScroll, &[DEACTIVATE_SCROLL])?;
        self.state.scroll_active = false;

        self.run_step(Step::ConfigureScroll, setup.frame().as_bytes())?;
        self.state.scroll = Some(setup);

        self.run_step(Step::ActivateScroll, &[ACTIVATE_SCROLL])?;
        self.state.scroll_active = true;
        debug!(
            "scroll active: {:?} pages {}..={}",
            setup.direction, setup.start_page, setup.end_page
        );
        Ok(())
    }

    /// Stop scrolling
    ///
    /// Safe to call when no scroll is running. The controller may need
    /// GDDRAM rewritten afterwards, see [`update`](Self::update).
    pub fn deactivate_scroll(&mut self) -> DisplayResult<I> {
        self.ensure_initialized()?;
        self.run_step(Step::DeactivateScroll, &[DEACTIVATE_SCROLL])?;
        self.state.scroll_active = false;
        Ok(())
    }

    /// Start fading or blinking, or stop it with [`FadeBlinkMode::Off`]
    ///
    /// The contrast steps every `(frames + 1) * 8` frames.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParameter`](crate::Error::InvalidParameter) if
    ///   `frames` exceeds 15. Nothing is sent.
    /// - [`Error::Aborted`](crate::Error::Aborted) on transport failure. The
    ///   session has been torn down.
    pub fn enable_fade_blink(&mut self, mode: FadeBlinkMode, frames: u8) -> DisplayResult<I> {
        self.ensure_initialized()?;
        check_parameter(Parameter::FadeFrames, frames, 0, MAX_FADE_FRAMES)?;
        self.run_step(
            Step::FadeBlink,
            &[SET_FADE_BLINK, fade_blink_byte(mode, frames)],
        )?;
        self.state.fade_blink = (mode, frames);
        Ok(())
    }

    /// Double every row (zoom in)
    pub fn enable_zoom_in(&mut self) -> DisplayResult<I> {
        self.apply_zoom(true)
    }

    /// Return to one RAM row per COM line
    pub fn disable_zoom_in(&mut self) -> DisplayResult<I> {
        self.apply_zoom(false)
    }

    fn apply_zoom(&mut self, enable: bool) -> DisplayResult<I> {
        self.ensure_initialized()?;
        self.run_step(Step::ZoomIn, &[SET_ZOOM_IN, u8::from(enable)])?;
        self.state.zoom_in = enable;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::mock::{MockDelay, MockError, ready_display, test_display};
    use alloc::vec;

    #[test]
    fn test_scroll_sends_deactivate_configure_activate() {
        let mut display = ready_display();
        display
            .enable_left_horizontal_scroll(0, 7, 63, ScrollInterval::Frames2)
            .unwrap();
        assert_eq!(
            display.interface.commands,
            vec![vec![0x2E], vec![0x2A, 0x00, 0, 7, 7, 63], vec![0x2F]]
        );
        assert!(display.state().scroll_active);
    }

    #[test]
    fn test_scroll_while_active_still_deactivates_once() {
        let mut display = ready_display();
        display
            .enable_left_horizontal_scroll(0, 7, 63, ScrollInterval::Frames2)
            .unwrap();
        display.interface.clear_log();
        display
            .enable_right_horizontal_scroll(0, 7, 63, ScrollInterval::Frames2)
            .unwrap();

        let commands = &display.interface.commands;
        assert_eq!(commands.len(), 3);
        assert_eq!(commands.iter().filter(|c| c[0] == 0x2E).count(), 1);
        assert_eq!(commands.iter().filter(|c| c[0] == 0x2F).count(), 1);
        assert_eq!(commands[0], vec![0x2E]);
        assert_eq!(commands[1][0], 0x29);
        assert_eq!(commands[2], vec![0x2F]);

        let state = display.state();
        assert!(state.scroll_active);
        let setup = state.scroll.unwrap();
        assert_eq!(setup.direction, ScrollDirection::Right);
        assert_eq!(setup.vertical_offset, Some(63));
        assert_eq!(setup.interval, ScrollInterval::Frames2);
    }

    #[test]
    fn test_horizontal_scroll_frame() {
        let mut display = ready_display();
        display
            .enable_horizontal_scroll(ScrollDirection::Left, 2, 5, ScrollInterval::Frames25)
            .unwrap();
        assert_eq!(
            display.interface.commands[1],
            vec![0x27, 0x00, 2, 6, 5, 0x00, 0xFF]
        );
    }

    #[test]
    fn test_scroll_validation_sends_nothing() {
        let mut display = ready_display();
        assert!(matches!(
            display.enable_left_horizontal_scroll(0, 8, 0, ScrollInterval::Frames5),
            Err(Error::InvalidParameter {
                parameter: Parameter::PageAddress,
                value: 8
            })
        ));
        assert!(matches!(
            display.enable_right_horizontal_scroll(0, 7, 64, ScrollInterval::Frames5),
            Err(Error::InvalidParameter {
                parameter: Parameter::ScrollRows,
                value: 64
            })
        ));
        assert!(display.interface.commands.is_empty());
        assert!(display.is_initialized());
    }

    #[test]
    fn test_scroll_failure_tears_down() {
        for (failing, step) in [
            (0, Step::DeactivateScroll),
            (1, Step::ConfigureScroll),
            (2, Step::ActivateScroll),
        ] {
            let mut display = ready_display();
            display.interface.fail_after(failing);
            let result = display.enable_left_horizontal_scroll(0, 7, 1, ScrollInterval::Frames5);

            assert!(matches!(
                result,
                Err(Error::Aborted { step: s, source: MockError }) if s == step
            ));
            assert!(!display.is_initialized());
            assert!(!display.state().scroll_active);
            assert_eq!(display.interface.deinit_calls, 1);
            // no scroll command after the failing one, only power-down
            let commands = &display.interface.commands;
            assert_eq!(commands.len(), failing + 3);
            assert_eq!(commands[failing + 1], vec![0x8D, 0x10]);
            assert_eq!(commands[failing + 2], vec![0xAE]);
        }
    }

    #[test]
    fn test_deactivate_scroll_is_idempotent() {
        let mut display = ready_display();
        display.deactivate_scroll().unwrap();
        display.deactivate_scroll().unwrap();
        assert_eq!(display.interface.commands, vec![vec![0x2E], vec![0x2E]]);
        assert!(!display.state().scroll_active);
    }

    #[test]
    fn test_fade_blink() {
        let mut display = ready_display();
        display.enable_fade_blink(FadeBlinkMode::Fade, 15).unwrap();
        assert_eq!(display.interface.commands, vec![vec![0x23, 0x2F]]);
        assert_eq!(display.state().fade_blink, (FadeBlinkMode::Fade, 15));

        assert!(matches!(
            display.enable_fade_blink(FadeBlinkMode::Blink, 16),
            Err(Error::InvalidParameter {
                parameter: Parameter::FadeFrames,
                value: 16
            })
        ));
        assert_eq!(display.interface.commands.len(), 1);
    }

    #[test]
    fn test_fade_blink_failure_tears_down() {
        let mut display = ready_display();
        display.interface.fail_after(0);
        assert!(matches!(
            display.enable_fade_blink(FadeBlinkMode::Blink, 1),
            Err(Error::Aborted {
                step: Step::FadeBlink,
                ..
            })
        ));
        assert!(!display.is_initialized());
        assert_eq!(display.state().fade_blink, (FadeBlinkMode::Off, 0));
    }

    #[test]
    fn test_zoom_in_toggle() {
        let mut display = ready_display();
        display.enable_zoom_in().unwrap();
        assert!(display.state().zoom_in);
        display.disable_zoom_in().unwrap();
        assert!(!display.state().zoom_in);
        assert_eq!(
            display.interface.commands,
            vec![vec![0xD6, 0x01], vec![0xD6, 0x00]]
        );
    }

    #[test]
    fn test_effects_require_init() {
        let mut display = test_display();
        assert!(matches!(
            display.enable_zoom_in(),
            Err(Error::NotInitialized)
        ));
        assert!(matches!(
            display.deactivate_scroll(),
            Err(Error::NotInitialized)
        ));
        assert!(display.interface.commands.is_empty());
    }

    #[test]
    fn test_effects_reset_by_reinit() {
        let mut display = ready_display();
        display.enable_fade_blink(FadeBlinkMode::Blink, 2).unwrap();
        display.enable_zoom_in().unwrap();
        display.init(&mut MockDelay).unwrap();
        assert_eq!(display.state().fade_blink, (FadeBlinkMode::Off, 0));
        assert!(!display.state().zoom_in);
        assert!(!display.state().scroll_active);
    }
}
