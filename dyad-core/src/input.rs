//! Text display requests
//!
//! Clients may write a short number as text (`echo 42 > …` style). The text
//! is parsed like C's `strtol(s, NULL, 0)`:
//!
//! - leading whitespace is skipped, then an optional sign
//! - `0x`/`0X` selects hex, a leading `0` selects octal, otherwise decimal
//! - parsing stops at the first character that is not a digit in the base
//! - no digits at all parses as 0
//!
//! Negative results clamp to 0; the renderer caps the top end at 99.

/// Longest accepted request body (a trailing line terminator is not counted)
pub const MAX_TEXT_LEN: usize = 3;

/// Text request errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// More than [`MAX_TEXT_LEN`] characters
    TooLong,
}

/// Strip one trailing `\n`, `\r\n` or `\r`
fn strip_terminator(bytes: &[u8]) -> &[u8] {
    match bytes {
        [rest @ .., b'\r', b'\n'] => rest,
        [rest @ .., b'\n'] | [rest @ .., b'\r'] => rest,
        _ => bytes,
    }
}

fn digit_value(byte: u8) -> Option<u32> {
    match byte {
        b'0'..=b'9' => Some(u32::from(byte - b'0')),
        b'a'..=b'f' => Some(u32::from(byte - b'a') + 10),
        b'A'..=b'F' => Some(u32::from(byte - b'A') + 10),
        _ => None,
    }
}

/// `strtol` with base auto-detection; saturates instead of overflowing
pub fn parse_integer(bytes: &[u8]) -> i64 {
    let mut rest = bytes;
    while let [first, tail @ ..] = rest {
        if first.is_ascii_whitespace() {
            rest = tail;
        } else {
            break;
        }
    }

    let negative = match rest {
        [b'-', tail @ ..] => {
            rest = tail;
            true
        }
        [b'+', tail @ ..] => {
            rest = tail;
            false
        }
        _ => false,
    };

    let radix = match rest {
        [b'0', b'x' | b'X', next, ..] if next.is_ascii_hexdigit() => {
            rest = &rest[2..];
            16
        }
        [b'0', ..] => 8,
        _ => 10,
    };

    let mut value: i64 = 0;
    for &byte in rest {
        match digit_value(byte) {
            Some(d) if d < radix => {
                value = value
                    .saturating_mul(i64::from(radix))
                    .saturating_add(i64::from(d));
            }
            _ => break,
        }
    }

    if negative {
        -value
    } else {
        value
    }
}

/// Parse a text display request into a non-negative value
///
/// # Errors
///
/// [`InputError::TooLong`] if the body exceeds [`MAX_TEXT_LEN`] characters.
pub fn parse_request(bytes: &[u8]) -> Result<u32, InputError> {
    let body = strip_terminator(bytes);
    if body.len() > MAX_TEXT_LEN {
        return Err(InputError::TooLong);
    }
    Ok(clamp_request(parse_integer(body)))
}

/// Clamp a signed request to the non-negative range the renderer takes
pub fn clamp_request(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal() {
        assert_eq!(parse_request(b"42"), Ok(42));
        assert_eq!(parse_request(b"42\n"), Ok(42));
        assert_eq!(parse_request(b"7\r\n"), Ok(7));
        assert_eq!(parse_request(b"150"), Ok(150));
    }

    #[test]
    fn test_prefixed_bases() {
        assert_eq!(parse_request(b"0x1"), Ok(1));
        assert_eq!(parse_integer(b"0x1f"), 31);
        assert_eq!(parse_integer(b"0X1F"), 31);
        assert_eq!(parse_request(b"017"), Ok(15));
        assert_eq!(parse_request(b"09"), Ok(0)); // 9 is not octal
    }

    #[test]
    fn test_hex_prefix_without_digits() {
        // "0x" followed by nothing hex parses the leading 0 only
        assert_eq!(parse_integer(b"0xg"), 0);
        assert_eq!(parse_integer(b"0x"), 0);
    }

    #[test]
    fn test_sign_and_whitespace() {
        assert_eq!(parse_request(b"-5"), Ok(0));
        assert_eq!(parse_integer(b"-5"), -5);
        assert_eq!(parse_request(b"+8"), Ok(8));
        assert_eq!(parse_request(b" 9"), Ok(9));
    }

    #[test]
    fn test_no_digits_is_zero() {
        assert_eq!(parse_request(b""), Ok(0));
        assert_eq!(parse_request(b"\n"), Ok(0));
        assert_eq!(parse_request(b"abc"), Ok(0));
        assert_eq!(parse_request(b"4x"), Ok(4));
    }

    #[test]
    fn test_too_long() {
        assert_eq!(parse_request(b"1234"), Err(InputError::TooLong));
        assert_eq!(parse_request(b"100\n"), Ok(100));
        assert_eq!(parse_request(b"1000\n"), Err(InputError::TooLong));
    }

    #[test]
    fn test_saturating_parse() {
        assert_eq!(parse_integer(b"99999999999999999999999"), i64::MAX);
        assert_eq!(clamp_request(i64::MAX), u32::MAX);
        assert_eq!(clamp_request(-1), 0);
    }
}
