//! Recording transport and helpers shared by the unit tests

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;
use embedded_hal::delay::DelayNs;
use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::config::{Builder, Config};
use crate::display::Display;
use crate::interface::{DisplayInterface, InterfaceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MockError;

/// One transfer seen by the transport, in call order
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Transfer {
    Commands(Vec<u8>),
    Data(Vec<u8>),
}

#[derive(Debug, Default)]
pub(crate) struct MockInterface {
    /// Every `send_commands` call, including the one made to fail
    pub(crate) commands: Vec<Vec<u8>>,
    pub(crate) data: Vec<Vec<u8>>,
    pub(crate) transfers: Vec<Transfer>,
    pub(crate) init_calls: usize,
    pub(crate) deinit_calls: usize,
    pub(crate) reset_calls: usize,
    /// Index of the `send_commands` call that reports an error
    pub(crate) fail_command_at: Option<usize>,
    pub(crate) fail_data: bool,
    pub(crate) fail_init: bool,
    pub(crate) fail_deinit: bool,
    pub(crate) fail_reset: bool,
}

impl MockInterface {
    pub(crate) fn clear_log(&mut self) {
        self.commands.clear();
        self.data.clear();
        self.transfers.clear();
    }

    /// Arm a failure on the n-th `send_commands` call from now
    pub(crate) fn fail_after(&mut self, calls: usize) {
        self.fail_command_at = Some(self.commands.len() + calls);
    }
}

impl DisplayInterface for MockInterface {
    type Error = MockError;

    fn kind(&self) -> InterfaceKind {
        InterfaceKind::I2c
    }

    fn init(&mut self) -> Result<(), Self::Error> {
        self.init_calls += 1;
        if self.fail_init {
            return Err(MockError);
        }
        Ok(())
    }

    fn deinit(&mut self) -> Result<(), Self::Error> {
        self.deinit_calls += 1;
        if self.fail_deinit {
            return Err(MockError);
        }
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
        self.reset_calls += 1;
        if self.fail_reset {
            return Err(MockError);
        }
        Ok(())
    }

    fn send_commands(&mut self, commands: &[u8]) -> Result<(), Self::Error> {
        let index = self.commands.len();
        self.commands.push(commands.to_vec());
        self.transfers.push(Transfer::Commands(commands.to_vec()));
        if self.fail_command_at == Some(index) {
            return Err(MockError);
        }
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.data.push(data.to_vec());
        self.transfers.push(Transfer::Data(data.to_vec()));
        if self.fail_data {
            return Err(MockError);
        }
        Ok(())
    }
}

pub(crate) struct MockDelay;

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

pub(crate) fn test_display_with(config: Config) -> Display<MockInterface> {
    Display::new(MockInterface::default(), config)
}

pub(crate) fn test_display() -> Display<MockInterface> {
    test_display_with(Builder::new().build().unwrap())
}

/// Initialized display with an empty transfer log
pub(crate) fn ready_display() -> Display<MockInterface> {
    ready_display_with(Builder::new().build().unwrap())
}

pub(crate) fn ready_display_with(config: Config) -> Display<MockInterface> {
    let mut display = test_display_with(config);
    display.init(&mut MockDelay).unwrap();
    display.interface.clear_log();
    display
}

std::thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Logger keeping the records of each test thread apart
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        let message = record.args().to_string();
        RECORDS.with(|records| records.borrow_mut().push((record.level(), message)));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Start capturing log records emitted by the current thread
pub(crate) fn capture_logs() {
    // another test may have installed the logger already
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Trace);
    RECORDS.with(|records| records.borrow_mut().clear());
}

/// Messages logged at `level` on this thread since [`capture_logs`]
pub(crate) fn logged(level: Level) -> Vec<String> {
    RECORDS.with(|records| {
        records
            .borrow()
            .iter()
            .filter(|(record_level, _)| *record_level == level)
            .map(|(_, message)| message.clone())
            .collect()
    })
}
