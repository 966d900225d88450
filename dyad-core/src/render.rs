//! Digit renderer
//!
//! Splits a number into tens and units, encodes each digit and fans the two
//! masks out over the sixteen segment lines. The switch lines are left at
//! whatever level acquisition put them in.

use dyad_hal::{Level, LineDriver, SEGMENTS_PER_DIGIT};

use crate::segment::{encode, SegmentMask, BLANK};

/// Largest displayable value; anything above saturates to this
pub const MAX_VALUE: u32 = 99;

/// Digit position on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitPosition {
    Tens,
    Units,
}

impl DigitPosition {
    /// Index of the first line in this position's line group
    pub const fn offset(self) -> usize {
        match self {
            DigitPosition::Tens => 0,
            DigitPosition::Units => SEGMENTS_PER_DIGIT,
        }
    }
}

/// Saturate a requested value to the displayable range
pub fn clamp_value(number: u32) -> u8 {
    // MAX_VALUE fits in u8
    number.min(MAX_VALUE) as u8
}

/// Segment masks for both digit groups of one displayed value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub tens: SegmentMask,
    pub units: SegmentMask,
}

impl Frame {
    /// Compute the masks for `number`
    ///
    /// Values above [`MAX_VALUE`] saturate. A zero tens digit is blanked
    /// (all lines HIGH) instead of showing a leading `0`.
    pub fn for_value(number: u32) -> Self {
        let value = clamp_value(number);
        let units = value % 10;
        let tens = value / 10;

        Self {
            tens: if tens > 0 { encode(tens) } else { BLANK },
            units: encode(units),
        }
    }

    /// Mask for one digit position
    pub fn mask(&self, position: DigitPosition) -> SegmentMask {
        match position {
            DigitPosition::Tens => self.tens,
            DigitPosition::Units => self.units,
        }
    }
}

/// Drive one line group from a mask
///
/// Bit `b` of `mask` goes to line `offset + b`, least significant bit first.
/// Always exactly eight writes.
pub fn fan_out<L: LineDriver + ?Sized>(lines: &mut L, offset: usize, mask: SegmentMask) {
    let mut bits = mask.bits();
    for index in offset..offset + SEGMENTS_PER_DIGIT {
        lines.set_line(index, Level::from_bit(bits & 1 == 1));
        bits >>= 1;
    }
}

/// Two-digit renderer owning an acquired line set
///
/// A renderer can only be built from lines that were already acquired, so a
/// failed acquisition leaves nothing to display on.
pub struct DigitRenderer<L> {
    lines: L,
}

impl<L: LineDriver> DigitRenderer<L> {
    /// Wrap an acquired line set
    pub fn new(lines: L) -> Self {
        Self { lines }
    }

    /// Show `number` (saturating at 99)
    pub fn display(&mut self, number: u32) {
        let frame = Frame::for_value(number);
        self.apply(&frame);
    }

    /// Write precomputed masks, units group first
    pub fn apply(&mut self, frame: &Frame) {
        fan_out(
            &mut self.lines,
            DigitPosition::Units.offset(),
            frame.units,
        );
        fan_out(&mut self.lines, DigitPosition::Tens.offset(), frame.tens);
    }

    /// Borrow the underlying line set
    pub fn lines(&self) -> &L {
        &self.lines
    }

    /// Give the line set back, e.g. for release at shutdown
    pub fn into_lines(self) -> L {
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dyad_hal::LINE_COUNT;
    use heapless::Vec;
    use proptest::prelude::*;

    /// Line set that remembers levels and the order of writes
    struct RecordingLines {
        levels: [Level; LINE_COUNT],
        writes: Vec<usize, 64>,
    }

    impl RecordingLines {
        fn new() -> Self {
            let mut levels = [Level::Low; LINE_COUNT];
            // switches start enabled, as after acquisition
            levels[16] = Level::High;
            levels[17] = Level::High;
            Self {
                levels,
                writes: Vec::new(),
            }
        }

        fn group(&self, position: DigitPosition) -> SegmentMask {
            let offset = position.offset();
            let mut bits = 0u8;
            for b in 0..SEGMENTS_PER_DIGIT {
                if self.levels[offset + b].is_high() {
                    bits |= 1 << b;
                }
            }
            SegmentMask(bits)
        }
    }

    impl LineDriver for RecordingLines {
        fn set_line(&mut self, index: usize, level: Level) {
            if let Some(slot) = self.levels.get_mut(index) {
                *slot = level;
                let _ = self.writes.push(index);
            }
        }

        fn line_level(&self, index: usize) -> Option<Level> {
            self.levels.get(index).copied()
        }

        fn line_count(&self) -> usize {
            LINE_COUNT
        }
    }

    fn rendered(number: u32) -> RecordingLines {
        let mut renderer = DigitRenderer::new(RecordingLines::new());
        renderer.display(number);
        renderer.into_lines()
    }

    #[test]
    fn test_display_zero_blanks_tens() {
        let lines = rendered(0);
        assert_eq!(lines.group(DigitPosition::Units), encode(0));
        assert_eq!(lines.group(DigitPosition::Tens), BLANK);
    }

    #[test]
    fn test_display_single_digit() {
        let lines = rendered(7);
        assert_eq!(lines.group(DigitPosition::Units), encode(7));
        assert_eq!(lines.group(DigitPosition::Tens), BLANK);
    }

    #[test]
    fn test_display_two_digits() {
        let lines = rendered(42);
        assert_eq!(lines.group(DigitPosition::Units), encode(2));
        assert_eq!(lines.group(DigitPosition::Tens), encode(4));

        let lines = rendered(99);
        assert_eq!(lines.group(DigitPosition::Units), encode(9));
        assert_eq!(lines.group(DigitPosition::Tens), encode(9));
    }

    #[test]
    fn test_display_saturates() {
        assert_eq!(rendered(150).levels, rendered(99).levels);
        assert_eq!(rendered(u32::MAX).levels, rendered(99).levels);
        assert_eq!(clamp_value(100), 99);
        assert_eq!(clamp_value(12), 12);
    }

    #[test]
    fn test_write_order_units_then_tens() {
        let lines = rendered(42);
        let expected: [usize; 16] = [8, 9, 10, 11, 12, 13, 14, 15, 0, 1, 2, 3, 4, 5, 6, 7];
        assert_eq!(lines.writes.as_slice(), &expected);
    }

    #[test]
    fn test_fan_out_lsb_first() {
        let mut lines = RecordingLines::new();
        fan_out(&mut lines, 8, SegmentMask(0b0000_0101));

        assert_eq!(lines.line_level(8), Some(Level::High));
        assert_eq!(lines.line_level(9), Some(Level::Low));
        assert_eq!(lines.line_level(10), Some(Level::High));
        for index in 11..16 {
            assert_eq!(lines.line_level(index), Some(Level::Low));
        }
        assert_eq!(lines.writes.len(), 8);
    }

    #[test]
    fn test_switch_lines_untouched() {
        let lines = rendered(88);
        assert!(lines.writes.iter().all(|&i| i < 16));
        assert_eq!(lines.line_level(16), Some(Level::High));
        assert_eq!(lines.line_level(17), Some(Level::High));
    }

    #[test]
    fn test_frame_mask_accessor() {
        let frame = Frame::for_value(31);
        assert_eq!(frame.mask(DigitPosition::Tens), encode(3));
        assert_eq!(frame.mask(DigitPosition::Units), encode(1));
    }

    proptest! {
        #[test]
        fn prop_in_range_values(n in 0u32..=99) {
            let lines = rendered(n);
            prop_assert_eq!(lines.group(DigitPosition::Units), encode((n % 10) as u8));
            let tens = (n / 10) as u8;
            let expected_tens = if tens > 0 { encode(tens) } else { BLANK };
            prop_assert_eq!(lines.group(DigitPosition::Tens), expected_tens);
            prop_assert_eq!(lines.writes.len(), 16);
        }

        #[test]
        fn prop_saturation(n in 100u32..) {
            prop_assert_eq!(rendered(n).levels, rendered(99).levels);
        }

        #[test]
        fn prop_idempotent(n in any::<u32>()) {
            let mut renderer = DigitRenderer::new(RecordingLines::new());
            renderer.display(n);
            let once = renderer.lines().levels;
            renderer.display(n);
            prop_assert_eq!(renderer.lines().levels, once);
        }

        #[test]
        fn prop_last_value_wins(a in any::<u32>(), b in any::<u32>()) {
            let mut renderer = DigitRenderer::new(RecordingLines::new());
            renderer.display(a);
            renderer.display(b);
            prop_assert_eq!(renderer.lines().levels, rendered(b).levels);
        }
    }
}
