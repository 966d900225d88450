//! Line provider over a pool of numbered pins
//!
//! A chip HAL only needs to hand out and take back single pins
//! ([`PinPool`]); [`PoolProvider`] builds the all-or-nothing table
//! acquisition on top.

use dyad_hal::{AcquireError, AcquireErrorKind, LineProvider, LineSpec, OutputPin, LINE_COUNT};

use crate::pin_lines::PinLines;

/// A chip's set of GPIO pins, addressed by number
pub trait PinPool {
    type Pin: OutputPin;

    /// Take a pin out of the pool
    fn take(&mut self, pin: u8) -> Result<Self::Pin, AcquireErrorKind>;

    /// Return a pin to the pool
    fn put_back(&mut self, pin: u8, line: Self::Pin);

    /// Check if a pin is in the pool
    fn is_available(&self, pin: u8) -> bool;
}

/// Display line set built from a [`PinPool`]
pub type PoolLines<T> = PinLines<<T as PinPool>::Pin, LINE_COUNT>;

/// [`LineProvider`] backed by a [`PinPool`]
pub struct PoolProvider<T> {
    pool: T,
}

impl<T: PinPool> PoolProvider<T> {
    pub fn new(pool: T) -> Self {
        Self { pool }
    }

    /// The underlying pin pool
    pub fn pool(&self) -> &T {
        &self.pool
    }

    fn put_back_all(&mut self, lines: PoolLines<T>) {
        for (spec, pin) in lines.into_pins() {
            self.pool.put_back(spec.pin, pin);
        }
    }
}

impl<T: PinPool> LineProvider for PoolProvider<T> {
    type Lines = PoolLines<T>;

    fn acquire(&mut self, specs: &[LineSpec]) -> Result<Self::Lines, AcquireError> {
        let mut lines = PinLines::new();

        for (index, spec) in specs.iter().enumerate() {
            let result = self.pool.take(spec.pin).and_then(|pin| {
                lines.push(pin, *spec).map_err(|pin| {
                    self.pool.put_back(spec.pin, pin);
                    AcquireErrorKind::TooManyLines
                })
            });

            if let Err(kind) = result {
                self.put_back_all(lines);
                return Err(AcquireError {
                    index,
                    pin: spec.pin,
                    kind,
                });
            }
        }

        Ok(lines)
    }

    fn release(&mut self, lines: Self::Lines) {
        self.put_back_all(lines);
    }
}
