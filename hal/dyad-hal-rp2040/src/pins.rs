//! Dynamic pin allocation for config-driven line tables
//!
//! Pins are moved into a [`PinBank`] once at boot and handed out by number,
//! so the line table can come from the config file rather than code.

use embassy_rp::gpio::{AnyPin, Flex};
use embassy_rp::Peri;

/// Number of user GPIO pins on RP2040
pub const GPIO_COUNT: usize = 30;

/// Put pins into a new [`PinBank`] by number
///
/// Pins left out of the list (e.g. the UART pins) stay reserved.
///
/// Usage:
/// ```ignore
/// let bank = pin_bank!(p; 2 => PIN_2, 3 => PIN_3, 4 => PIN_4);
/// ```
#[macro_export]
macro_rules! pin_bank {
    ($p:expr; $($num:literal => $pin:ident),* $(,)?) => {{
        let mut bank = $crate::pins::PinBank::empty();
        $(
            bank.insert(
                $num,
                embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.$pin),
            );
        )*
        bank
    }};
}

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
    /// Pin never placed in the bank (reserved for another peripheral)
    Reserved,
}

enum Slot {
    Reserved,
    Free(Flex<'static>),
    Taken,
}

/// Holds GPIO pins and hands them out by number
pub struct PinBank {
    slots: [Slot; GPIO_COUNT],
}

impl PinBank {
    /// Create a bank with every pin reserved
    pub fn empty() -> Self {
        Self {
            slots: core::array::from_fn(|_| Slot::Reserved),
        }
    }

    /// Place a pin in the bank as an input (high-impedance)
    pub fn insert(&mut self, pin_num: u8, pin: Peri<'static, AnyPin>) {
        if let Some(slot) = self.slots.get_mut(usize::from(pin_num)) {
            let mut flex = Flex::new(pin);
            flex.set_as_input();
            *slot = Slot::Free(flex);
        }
    }

    /// Take a pin by number
    pub fn take(&mut self, pin_num: u8) -> Result<Flex<'static>, PinError> {
        let slot = self
            .slots
            .get_mut(usize::from(pin_num))
            .ok_or(PinError::InvalidPin)?;
        match core::mem::replace(slot, Slot::Taken) {
            Slot::Free(flex) => Ok(flex),
            Slot::Taken => Err(PinError::AlreadyTaken),
            Slot::Reserved => {
                *slot = Slot::Reserved;
                Err(PinError::Reserved)
            }
        }
    }

    /// Check if a pin is available
    pub fn is_available(&self, pin_num: u8) -> bool {
        matches!(self.slots.get(usize::from(pin_num)), Some(Slot::Free(_)))
    }

    /// Return a pin to the bank, switched back to high-impedance input
    pub fn return_pin(&mut self, pin_num: u8, mut pin: Flex<'static>) {
        if let Some(slot) = self.slots.get_mut(usize::from(pin_num)) {
            pin.set_as_input();
            *slot = Slot::Free(pin);
        }
    }
}

/// Parse a pin string from config
///
/// Supports formats:
/// - "gpio11" -> (11, false)
/// - "!gpio12" -> (12, true) (inverted/active-low)
pub fn parse_pin_string(s: &str) -> Option<(u8, bool)> {
    let s = s.trim();
    let (s, inverted) = match s.strip_prefix('!') {
        Some(rest) => (rest, true),
        None => (s, false),
    };

    let pin: u8 = s.strip_prefix("gpio")?.parse().ok()?;
    if usize::from(pin) >= GPIO_COUNT {
        return None;
    }

    Some((pin, inverted))
}
