//! GPIO port abstraction
//!
//! The core never touches registers. The firmware implements [`GpioPort`] on
//! top of `esp-hal`; tests use an in-memory fake.

use crate::pins::PinId;

/// Electrical level of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// The port was not configured with this pin
    UnknownPin(PinId),
}

/// Already configured pins, addressed by their GPIO number.
///
/// Direction and pull are set up once when the port is built; after that
/// reads and writes are single synchronous register accesses.
pub trait GpioPort {
    /// Drive an output pin to the given level.
    fn write(&self, pin: PinId, level: Level) -> Result<(), GpioError>;

    /// Sample the current level of an input pin.
    fn read(&self, pin: PinId) -> Result<Level, GpioError>;
}

impl<T: GpioPort + ?Sized> GpioPort for &T {
    fn write(&self, pin: PinId, level: Level) -> Result<(), GpioError> {
        (**self).write(pin, level)
    }

    fn read(&self, pin: PinId) -> Result<Level, GpioError> {
        (**self).read(pin)
    }
}
