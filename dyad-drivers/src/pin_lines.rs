//! Line set over GPIO output pins
//!
//! Each line pairs an output pin with its descriptor. Logical levels are
//! translated through the descriptor's inversion flag, so an active-low line
//! sees its pin driven low for logical HIGH.

use dyad_hal::{Level, LineDriver, LineSpec, OutputPin};
use heapless::Vec;

#[derive(Debug)]
struct Line<P> {
    pin: P,
    spec: LineSpec,
    /// Current logical level
    level: Level,
}

impl<P: OutputPin> Line<P> {
    fn drive(&mut self, level: Level) {
        self.level = level;
        self.pin.set_level(self.spec.pin_level(level));
    }
}

/// Ordered set of up to `N` output lines
#[derive(Debug)]
pub struct PinLines<P, const N: usize> {
    lines: Vec<Line<P>, N>,
}

impl<P: OutputPin, const N: usize> Default for PinLines<P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: OutputPin, const N: usize> PinLines<P, N> {
    /// Create an empty line set
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Append a line and drive it to its initial level
    ///
    /// Hands the pin back if the set is already full.
    pub fn push(&mut self, pin: P, spec: LineSpec) -> Result<(), P> {
        let mut line = Line {
            pin,
            spec,
            level: spec.initial,
        };
        line.drive(spec.initial);
        self.lines.push(line).map_err(|line| line.pin)
    }

    /// Descriptor of the line at `index`
    pub fn spec(&self, index: usize) -> Option<&LineSpec> {
        self.lines.get(index).map(|line| &line.spec)
    }

    /// Physical pin at `index`
    pub fn pin(&self, index: usize) -> Option<&P> {
        self.lines.get(index).map(|line| &line.pin)
    }

    /// Drive every line to its idle level
    pub fn drive_idle(&mut self) {
        for line in self.lines.iter_mut() {
            let idle = line.spec.idle;
            line.drive(idle);
        }
    }

    /// Drive every line idle and hand the pins back, in table order
    pub fn into_pins(mut self) -> Vec<(LineSpec, P), N> {
        self.drive_idle();
        let mut pins = Vec::new();
        for line in self.lines {
            // Same capacity as `self.lines`, cannot overflow
            let _ = pins.push((line.spec, line.pin));
        }
        pins
    }
}

impl<P: OutputPin, const N: usize> LineDriver for PinLines<P, N> {
    fn set_line(&mut self, index: usize, level: Level) {
        if let Some(line) = self.lines.get_mut(index) {
            line.drive(level);
        }
    }

    fn line_level(&self, index: usize) -> Option<Level> {
        self.lines.get(index).map(|line| line.level)
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dyad_core::config::LineTable;
    use dyad_core::render::DigitPosition;
    use dyad_core::{encode, DigitRenderer, BLANK};
    use dyad_hal::LINE_COUNT;

    /// Mock GPIO pin for testing
    #[derive(Debug)]
    struct MockPin {
        high: bool,
    }

    impl MockPin {
        fn new() -> Self {
            Self { high: false }
        }
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    fn full_set(table: &LineTable) -> PinLines<MockPin, LINE_COUNT> {
        let mut lines = PinLines::new();
        for spec in table.as_slice() {
            assert!(lines.push(MockPin::new(), *spec).is_ok());
        }
        lines
    }

    fn pin_group(lines: &PinLines<MockPin, LINE_COUNT>, position: DigitPosition) -> u8 {
        let offset = position.offset();
        let mut bits = 0u8;
        for b in 0..8 {
            if lines.pin(offset + b).map_or(false, |p| p.is_set_high()) {
                bits |= 1 << b;
            }
        }
        bits
    }

    #[test]
    fn test_push_drives_initial_level() {
        let lines = full_set(&LineTable::default());

        assert_eq!(lines.line_count(), LINE_COUNT);
        for index in 0..16 {
            assert!(lines.pin(index).unwrap().is_set_low());
        }
        assert!(lines.pin(16).unwrap().is_set_high());
        assert!(lines.pin(17).unwrap().is_set_high());
    }

    #[test]
    fn test_push_when_full_returns_pin() {
        let mut lines: PinLines<MockPin, 1> = PinLines::new();
        assert!(lines.push(MockPin::new(), LineSpec::segment(2)).is_ok());
        assert!(lines.push(MockPin::new(), LineSpec::segment(3)).is_err());
        assert_eq!(lines.line_count(), 1);
    }

    #[test]
    fn test_inverted_line() {
        let mut lines: PinLines<MockPin, 1> = PinLines::new();
        assert!(lines.push(MockPin::new(), LineSpec::segment(2).inverted()).is_ok());

        // initial logical LOW → pin high
        assert!(lines.pin(0).unwrap().is_set_high());

        lines.set_line(0, Level::High);
        assert_eq!(lines.line_level(0), Some(Level::High));
        assert!(lines.pin(0).unwrap().is_set_low());
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut lines = full_set(&LineTable::default());
        lines.set_line(LINE_COUNT, Level::High);
        assert_eq!(lines.line_level(LINE_COUNT), None);
    }

    #[test]
    fn test_renderer_drives_pins() {
        let mut renderer = DigitRenderer::new(full_set(&LineTable::default()));

        renderer.display(42);
        assert_eq!(pin_group(renderer.lines(), DigitPosition::Tens), encode(4).bits());
        assert_eq!(pin_group(renderer.lines(), DigitPosition::Units), encode(2).bits());

        renderer.display(5);
        assert_eq!(pin_group(renderer.lines(), DigitPosition::Tens), BLANK.bits());
        assert_eq!(pin_group(renderer.lines(), DigitPosition::Units), encode(5).bits());
    }

    #[test]
    fn test_into_pins_leaves_idle() {
        let mut renderer = DigitRenderer::new(full_set(&LineTable::default()));
        renderer.display(88);

        let pins = renderer.into_lines().into_pins();
        assert_eq!(pins.len(), LINE_COUNT);
        for (spec, pin) in &pins[..16] {
            assert_eq!(spec.idle, Level::High);
            assert!(pin.is_set_high());
        }
        for (_, pin) in &pins[16..] {
            assert!(pin.is_set_low());
        }
    }
}
