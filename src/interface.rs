//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and two adapters for
//! talking to the SSD1306 controller:
//!
//! - [`I2cInterface`]: I2C bus, 7-bit device address, control byte framing
//! - [`SpiInterface`]: 4-wire SPI with a data/command pin and a reset pin
//!
//! ## Hardware Requirements
//!
//! I2C modules only need SDA/SCL; the address is selected by the SA0 strap.
//! SPI modules additionally need:
//! - **DC**: Data/Command select (output, low = command)
//! - **RST**: Reset (output, active low)
//!
//! ## Example
//!
//! ```rust,no_run
//! use ssd1306_session::{DisplayInterface, SpiInterface};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! let mut interface = SpiInterface::new(MockSpi, MockPin, MockPin);
//!
//! let _ = interface.init();
//! let _ = interface.reset(&mut delay);
//! let _ = interface.send_commands(&[0xAF]); // Display on
//! let _ = interface.send_data(&[0xFF, 0x00, 0xFF]);
//! ```

use core::convert::Infallible;
use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiDevice;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// I2C control byte announcing a stream of command bytes
pub const I2C_CONTROL_COMMAND: u8 = 0x00;

/// I2C control byte announcing a stream of GDDRAM data bytes
pub const I2C_CONTROL_DATA: u8 = 0x40;

/// Maximum payload bytes sent per I2C write transaction
pub const I2C_CHUNK_SIZE: usize = 32;

/// Bus type behind a [`DisplayInterface`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterfaceKind {
    /// I2C bus
    I2c,
    /// 4-wire SPI bus
    Spi,
}

/// Trait for hardware interface to SSD1306 controller
///
/// This trait abstracts over different bus implementations, allowing the
/// [`Display`](crate::display::Display) to work with any transport that can
/// frame command and data bytes for the controller.
///
/// ## Implementing
///
/// For most cases, use [`I2cInterface`] or [`SpiInterface`]. Implement this
/// trait on your own type for other wiring (3-wire SPI, parallel bus, test
/// doubles).
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Which bus this interface drives
    fn kind(&self) -> InterfaceKind;

    /// Claim the bus-side resources (drive control pins to their idle level)
    ///
    /// # Errors
    ///
    /// Returns an error if a GPIO operation fails.
    fn init(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Release the bus-side resources
    ///
    /// Called on every teardown path, including after a failed init.
    ///
    /// # Errors
    ///
    /// Returns an error if a GPIO operation fails.
    fn deinit(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Pulse the reset line, if one is wired
    ///
    /// # Arguments
    ///
    /// * `delay` - Delay implementation for timing
    ///
    /// # Errors
    ///
    /// Returns an error if a GPIO operation fails.
    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error>;

    /// Send command bytes, including command parameters
    ///
    /// # Errors
    ///
    /// Returns an error if bus communication or GPIO fails.
    fn send_commands(&mut self, commands: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Send GDDRAM data bytes
    ///
    /// # Errors
    ///
    /// Returns an error if bus communication or GPIO fails.
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Generic over bus and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<BusErr, PinErr> {
    /// I2C or SPI communication error
    Bus(BusErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<BusErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<BusErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "Bus error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<BusErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<BusErr, PinErr> {}

/// 7-bit I2C address of the controller, selected by the SA0 pin
///
/// Datasheets often quote the 8-bit write addresses 0x78 and 0x7A instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum I2cAddress {
    /// SA0 low: 0x3C (8-bit write address 0x78)
    #[default]
    Primary = 0x3C,
    /// SA0 high: 0x3D (8-bit write address 0x7A)
    Secondary = 0x3D,
}

impl TryFrom<u8> for I2cAddress {
    type Error = u8;

    /// Accept either the 7-bit address or the 8-bit write address
    fn try_from(address: u8) -> Result<Self, Self::Error> {
        match address {
            0x3C | 0x78 => Ok(Self::Primary),
            0x3D | 0x7A => Ok(Self::Secondary),
            other => Err(other),
        }
    }
}

/// I2C interface implementation for SSD1306
///
/// Every transfer is prefixed by a control byte selecting command or data
/// mode. Long data transfers are split into [`I2C_CHUNK_SIZE`] byte writes.
#[derive(Debug)]
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: I2cAddress,
}

impl<I2C: I2c> I2cInterface<I2C> {
    /// Create a new I2C interface
    pub fn new(i2c: I2C, address: I2cAddress) -> Self {
        Self { i2c, address }
    }

    /// Get the configured device address
    pub fn address(&self) -> I2cAddress {
        self.address
    }

    /// Release the underlying bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write_framed(&mut self, control: u8, bytes: &[u8]) -> Result<(), I2C::Error> {
        let mut frame = [0u8; I2C_CHUNK_SIZE + 1];
        frame[0] = control;
        for chunk in bytes.chunks(I2C_CHUNK_SIZE) {
            frame[1..=chunk.len()].copy_from_slice(chunk);
            self.i2c
                .write(self.address as u8, &frame[..=chunk.len()])?;
        }
        Ok(())
    }
}

impl<I2C> DisplayInterface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = InterfaceError<I2C::Error, Infallible>;

    fn kind(&self) -> InterfaceKind {
        InterfaceKind::I2c
    }

    fn init(&mut self) -> InterfaceResult<(), Self::Error> {
        Ok(())
    }

    fn deinit(&mut self) -> InterfaceResult<(), Self::Error> {
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, _delay: &mut D) -> InterfaceResult<(), Self::Error> {
        // I2C modules tie RST to an RC network on the board
        Ok(())
    }

    fn send_commands(&mut self, commands: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.write_framed(I2C_CONTROL_COMMAND, commands)
            .map_err(InterfaceError::Bus)
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.write_framed(I2C_CONTROL_DATA, data)
            .map_err(InterfaceError::Bus)
    }
}

/// 4-wire SPI interface implementation for SSD1306
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
#[derive(Debug)]
pub struct SpiInterface<SPI, DC, RST> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: RST,
}

impl<SPI, DC, RST> SpiInterface<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a new SPI interface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI device (must implement [`SpiDevice`])
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `rst` - Reset pin (output, active low)
    pub fn new(spi: SPI, dc: DC, rst: RST) -> Self {
        Self { spi, dc, rst }
    }

    /// Release the underlying bus and pins
    pub fn release(self) -> (SPI, DC, RST) {
        (self.spi, self.dc, self.rst)
    }
}

impl<SPI, DC, RST, PinErr> DisplayInterface for SpiInterface<SPI, DC, RST>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn kind(&self) -> InterfaceKind {
        InterfaceKind::Spi
    }

    fn init(&mut self) -> InterfaceResult<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.rst.set_high().map_err(InterfaceError::Pin)
    }

    fn deinit(&mut self) -> InterfaceResult<(), Self::Error> {
        // Holding RST low keeps the controller in its lowest-power state
        self.rst.set_low().map_err(InterfaceError::Pin)
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        self.rst.set_low().map_err(InterfaceError::Pin)?;
        delay.delay_ms(10);
        self.rst.set_high().map_err(InterfaceError::Pin)?;
        delay.delay_ms(10);
        Ok(())
    }

    fn send_commands(&mut self, commands: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(commands).map_err(InterfaceError::Bus)
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Bus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use embedded_hal::i2c::{ErrorType as I2cErrorType, Operation as I2cOperation};
    use embedded_hal::spi::{ErrorType as SpiErrorType, Operation as SpiOperation};

    #[derive(Debug, Default)]
    struct MockI2c {
        writes: Vec<(u8, Vec<u8>)>,
    }

    impl I2cErrorType for MockI2c {
        type Error = Infallible;
    }

    impl I2c for MockI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [I2cOperation<'_>],
        ) -> Result<(), Self::Error> {
            for op in operations.iter() {
                if let I2cOperation::Write(bytes) = op {
                    self.writes.push((address, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    #[derive(Debug, PartialEq, Clone, Copy)]
    enum Event {
        DcLow,
        DcHigh,
        RstLow,
        RstHigh,
        Delay(u32),
        Write(usize),
    }

    #[derive(Debug, Default)]
    struct Log {
        events: Vec<Event>,
        bytes: Vec<Vec<u8>>,
    }

    // SPI, pins and delay record into one ordered log
    type Shared = alloc::rc::Rc<core::cell::RefCell<Log>>;

    struct MockSpi(Shared);
    struct MockPin {
        log: Shared,
        low: Event,
        high: Event,
    }
    struct MockDelay(Shared);

    impl SpiErrorType for MockSpi {
        type Error = Infallible;
    }

    impl SpiDevice for MockSpi {
        fn transaction(
            &mut self,
            operations: &mut [SpiOperation<'_, u8>],
        ) -> Result<(), Self::Error> {
            let mut log = self.0.borrow_mut();
            for op in operations.iter() {
                if let SpiOperation::Write(bytes) = op {
                    log.events.push(Event::Write(bytes.len()));
                    log.bytes.push(bytes.to_vec());
                }
            }
            Ok(())
        }
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().events.push(self.low);
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().events.push(self.high);
            Ok(())
        }
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}
        fn delay_ms(&mut self, ms: u32) {
            self.0.borrow_mut().events.push(Event::Delay(ms));
        }
    }

    fn spi_interface() -> (SpiInterface<MockSpi, MockPin, MockPin>, Shared) {
        let log: Shared = Default::default();
        let dc = MockPin {
            log: log.clone(),
            low: Event::DcLow,
            high: Event::DcHigh,
        };
        let rst = MockPin {
            log: log.clone(),
            low: Event::RstLow,
            high: Event::RstHigh,
        };
        (SpiInterface::new(MockSpi(log.clone()), dc, rst), log)
    }

    #[test]
    fn test_i2c_commands_use_command_control_byte() {
        let mut interface = I2cInterface::new(MockI2c::default(), I2cAddress::Primary);
        interface.send_commands(&[0x81, 0xCF]).unwrap();
        let i2c = interface.release();
        assert_eq!(i2c.writes, alloc::vec![(0x3C, alloc::vec![0x00, 0x81, 0xCF])]);
    }

    #[test]
    fn test_i2c_data_is_chunked() {
        let mut interface = I2cInterface::new(MockI2c::default(), I2cAddress::Secondary);
        let data = [0xAAu8; 70];
        interface.send_data(&data).unwrap();
        let i2c = interface.release();

        let lengths: Vec<usize> = i2c.writes.iter().map(|(_, bytes)| bytes.len()).collect();
        assert_eq!(lengths, alloc::vec![33, 33, 7]);
        assert!(i2c.writes.iter().all(|(addr, bytes)| *addr == 0x3D && bytes[0] == 0x40));
    }

    #[test]
    fn test_i2c_kind_and_address() {
        let interface = I2cInterface::new(MockI2c::default(), I2cAddress::default());
        assert_eq!(interface.kind(), InterfaceKind::I2c);
        assert_eq!(interface.address() as u8, 0x3C);
    }

    #[test]
    fn test_i2c_address_accepts_write_address_form() {
        assert_eq!(I2cAddress::try_from(0x78), Ok(I2cAddress::Primary));
        assert_eq!(I2cAddress::try_from(0x3D), Ok(I2cAddress::Secondary));
        assert_eq!(I2cAddress::try_from(0x7A), Ok(I2cAddress::Secondary));
        assert_eq!(I2cAddress::try_from(0x50), Err(0x50));
    }

    #[test]
    fn test_spi_command_and_data_select_dc_level() {
        let (mut interface, log) = spi_interface();
        interface.send_commands(&[0xAE]).unwrap();
        interface.send_data(&[1, 2, 3]).unwrap();

        let log = log.borrow();
        assert_eq!(
            log.events,
            alloc::vec![Event::DcLow, Event::Write(1), Event::DcHigh, Event::Write(3)]
        );
        assert_eq!(log.bytes, alloc::vec![alloc::vec![0xAE], alloc::vec![1, 2, 3]]);
    }

    #[test]
    fn test_spi_reset_pulses_rst_low_then_high() {
        let (mut interface, log) = spi_interface();
        let mut delay = MockDelay(log.clone());
        interface.reset(&mut delay).unwrap();

        assert_eq!(
            log.borrow().events,
            alloc::vec![
                Event::RstLow,
                Event::Delay(10),
                Event::RstHigh,
                Event::Delay(10)
            ]
        );
    }

    #[test]
    fn test_spi_deinit_holds_reset() {
        let (mut interface, log) = spi_interface();
        interface.init().unwrap();
        interface.deinit().unwrap();
        assert_eq!(
            log.borrow().events,
            alloc::vec![Event::DcLow, Event::RstHigh, Event::RstLow]
        );
        assert_eq!(interface.kind(), InterfaceKind::Spi);
    }
}
