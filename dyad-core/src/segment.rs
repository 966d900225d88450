//! Seven-segment encoder
//!
//! Segment layout (bit 7 is the decimal point):
//!
//! ```text
//!     a(0)
//!   f(5) b(1)
//!     g(6)
//!   e(4) c(2)
//!     d(3)   dp(7)
//! ```
//!
//! The display is common-anode, so a cleared bit lights its segment. The
//! table is wired to the board as-is and must not be recomputed.

/// Eight-line segment pattern for one digit position
///
/// Bit `i` drives line `i` of the digit's line group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentMask(pub u8);

/// Every line of a group driven HIGH: the digit is dark
pub const BLANK: SegmentMask = SegmentMask(0xFF);

const DIGIT_MASKS: [u8; 10] = [
    0b1100_0000, // 0
    0b1111_1001, // 1
    0b1010_0100, // 2
    0b1011_0000, // 3
    0b1001_1001, // 4
    0b1001_0010, // 5
    0b1000_0010, // 6
    0b1111_1000, // 7
    0b1000_0000, // 8
    0b1001_1000, // 9
];

impl SegmentMask {
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether line `bit` (0-7) of the group is driven HIGH
    pub const fn is_set(self, bit: usize) -> bool {
        bit < 8 && (self.0 >> bit) & 1 == 1
    }
}

/// Segment mask for a decimal digit
///
/// `digit` must be 0-9. Callers validate first; an out-of-range digit is a
/// bug and trips a debug assertion (release builds wrap it modulo 10).
pub fn encode(digit: u8) -> SegmentMask {
    debug_assert!(digit <= 9, "digit out of range");
    SegmentMask(DIGIT_MASKS[usize::from(digit % 10)])
}

/// Checked variant of [`encode`]
pub fn try_encode(digit: u8) -> Option<SegmentMask> {
    DIGIT_MASKS.get(usize::from(digit)).copied().map(SegmentMask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_table() {
        let expected: [u8; 10] = [192, 249, 164, 176, 153, 146, 130, 248, 128, 152];
        for (digit, &mask) in expected.iter().enumerate() {
            assert_eq!(encode(digit as u8), SegmentMask(mask), "digit {}", digit);
        }
    }

    #[test]
    fn test_try_encode_bounds() {
        assert_eq!(try_encode(0), Some(SegmentMask(192)));
        assert_eq!(try_encode(9), Some(SegmentMask(152)));
        assert_eq!(try_encode(10), None);
        assert_eq!(try_encode(255), None);
    }

    #[test]
    fn test_blank_is_distinct_from_every_digit() {
        for digit in 0..=9 {
            assert_ne!(encode(digit), BLANK);
        }
        assert_eq!(BLANK.bits(), 0xFF);
    }

    #[test]
    fn test_decimal_point_always_dark() {
        for digit in 0..=9 {
            assert!(encode(digit).is_set(7), "dp lit for {}", digit);
        }
    }

    #[test]
    fn test_is_set() {
        let eight = encode(8);
        assert!(eight.is_set(7));
        for bit in 0..7 {
            assert!(!eight.is_set(bit));
        }
        assert!(!BLANK.is_set(8));
    }
}
