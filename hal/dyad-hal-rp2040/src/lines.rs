//! Display lines on RP2040 GPIO
//!
//! [`PinBank`] is the chip's [`PinPool`]; [`RpLineProvider`] acquires the
//! whole display line table from it at once.

use dyad_drivers::{PinPool, PoolLines, PoolProvider};
use dyad_hal::{AcquireErrorKind, OutputPin};
use embassy_rp::gpio::Flex;

use crate::pins::{PinBank, PinError};

/// One GPIO pin driven as a push-pull output
///
/// The pad stays high-impedance until the first write, so it comes up at
/// the requested level instead of glitching through the reset value.
pub struct RpLine {
    flex: Flex<'static>,
    enabled: bool,
}

impl RpLine {
    fn new(flex: Flex<'static>) -> Self {
        Self {
            flex,
            enabled: false,
        }
    }

    fn enable(&mut self) {
        if !self.enabled {
            self.flex.set_as_output();
            self.enabled = true;
        }
    }
}

impl OutputPin for RpLine {
    fn set_high(&mut self) {
        self.flex.set_high();
        self.enable();
    }

    fn set_low(&mut self) {
        self.flex.set_low();
        self.enable();
    }

    fn is_set_high(&self) -> bool {
        self.flex.is_set_high()
    }
}

impl From<PinError> for AcquireErrorKind {
    fn from(err: PinError) -> Self {
        match err {
            PinError::InvalidPin => AcquireErrorKind::InvalidPin,
            PinError::AlreadyTaken | PinError::Reserved => AcquireErrorKind::Unavailable,
        }
    }
}

impl PinPool for PinBank {
    type Pin = RpLine;

    fn take(&mut self, pin: u8) -> Result<RpLine, AcquireErrorKind> {
        Ok(RpLine::new(PinBank::take(self, pin)?))
    }

    fn put_back(&mut self, pin: u8, line: RpLine) {
        self.return_pin(pin, line.flex);
    }

    fn is_available(&self, pin: u8) -> bool {
        PinBank::is_available(self, pin)
    }
}

/// Acquired display line set
pub type RpLines = PoolLines<PinBank>;

/// Line provider backed by the RP2040 pin bank
pub type RpLineProvider = PoolProvider<PinBank>;
