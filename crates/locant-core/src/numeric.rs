//! Hand-written numeric grammar: integers, unsigned integers, and reals.
//!
//! This is the one primitive this crate does not delegate to a library for
//! parsing (serialization does, via `itoa`/`ryu`): the exact grammar --
//! what separates `InvalidNumber` from `NumberOutOfRange`, whether a
//! leading `+` or a bare `.5` is accepted -- is the subject the rest of the
//! crate exists to get right, not an implementation detail to borrow.

use crate::error::{Error, ErrorKind, Result};

/// Parse a signed integer from `bytes`, which must be exactly the numeric
/// literal (no surrounding whitespace or trailing content).
///
/// Grammar: `-?[0-9]+`. A fractional part or exponent is rejected as
/// `InvalidNumber` -- callers that want truncating conversion should parse
/// as a real and convert explicitly. Overflow of the target width is
/// reported as `NumberOutOfRange`.
pub fn parse_int(bytes: &[u8], offset: usize) -> Result<i64> {
    let text = as_ascii(bytes, offset)?;
    if text.contains('.') || text.contains(['e', 'E']) {
        return Err(Error::new(
            ErrorKind::InvalidNumber,
            offset,
            "integer member has a fractional or exponent part",
        ));
    }
    validate_json_integer_grammar(text, offset)?;
    text.parse::<i64>().map_err(|_| {
        Error::new(
            ErrorKind::NumberOutOfRange,
            offset,
            format!("'{text}' does not fit in a signed 64-bit integer"),
        )
    })
}

/// As `parse_int`, for an unsigned target. A leading `-` is rejected as
/// `InvalidNumber`, not silently wrapped.
pub fn parse_unsigned(bytes: &[u8], offset: usize) -> Result<u64> {
    let text = as_ascii(bytes, offset)?;
    if let Some(rest) = text.strip_prefix('-') {
        if rest == "0" {
            return Ok(0);
        }
        return Err(Error::new(
            ErrorKind::InvalidNumber,
            offset,
            "unsigned member has a negative sign",
        ));
    }
    if text.contains('.') || text.contains(['e', 'E']) {
        return Err(Error::new(
            ErrorKind::InvalidNumber,
            offset,
            "unsigned member has a fractional or exponent part",
        ));
    }
    validate_json_integer_grammar(text, offset)?;
    text.parse::<u64>().map_err(|_| {
        Error::new(
            ErrorKind::NumberOutOfRange,
            offset,
            format!("'{text}' does not fit in an unsigned 64-bit integer"),
        )
    })
}

/// Parse a real number: `-?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?`, the
/// standard JSON number grammar minus leading `+` and leading-zero
/// suppression (both rejected below, matching the RFC 8259 grammar rather
/// than a permissive superset).
pub fn parse_real(bytes: &[u8], offset: usize) -> Result<f64> {
    let text = as_ascii(bytes, offset)?;
    validate_json_number_grammar(text, offset)?;
    text.parse::<f64>().map_err(|_| {
        Error::new(
            ErrorKind::InvalidNumber,
            offset,
            format!("'{text}' is not a valid number literal"),
        )
    })
}

fn as_ascii(bytes: &[u8], offset: usize) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|_| {
        Error::new(
            ErrorKind::InvalidNumber,
            offset,
            "number literal is not valid UTF-8",
        )
    })
}

/// The integer-only half of the JSON number grammar (`-?[0-9]+`, no leading
/// `+`, no leading zero unless the value is exactly `0`) -- stricter than
/// `str::parse`, which happily accepts both.
fn validate_json_integer_grammar(text: &str, offset: usize) -> Result<()> {
    let bad = || {
        Error::new(
            ErrorKind::InvalidNumber,
            offset,
            format!("'{text}' does not match the JSON integer grammar"),
        )
    };
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    if digits.len() > 1 && digits.as_bytes()[0] == b'0' {
        return Err(bad());
    }
    Ok(())
}

fn validate_json_number_grammar(text: &str, offset: usize) -> Result<()> {
    let bad = || {
        Error::new(
            ErrorKind::InvalidNumber,
            offset,
            format!("'{text}' does not match the JSON number grammar"),
        )
    };

    let mut chars = text.bytes().peekable();
    if chars.peek() == Some(&b'-') {
        chars.next();
    }

    let mut int_digits = 0;
    let first_int_digit = chars.peek().copied();
    while matches!(chars.peek(), Some(b'0'..=b'9')) {
        chars.next();
        int_digits += 1;
    }
    if int_digits == 0 {
        return Err(bad());
    }
    if int_digits > 1 && first_int_digit == Some(b'0') {
        return Err(bad());
    }

    if chars.peek() == Some(&b'.') {
        chars.next();
        let mut frac_digits = 0;
        while matches!(chars.peek(), Some(b'0'..=b'9')) {
            chars.next();
            frac_digits += 1;
        }
        if frac_digits == 0 {
            return Err(bad());
        }
    }

    if matches!(chars.peek(), Some(b'e' | b'E')) {
        chars.next();
        if matches!(chars.peek(), Some(b'+' | b'-')) {
            chars.next();
        }
        let mut exp_digits = 0;
        while matches!(chars.peek(), Some(b'0'..=b'9')) {
            chars.next();
            exp_digits += 1;
        }
        if exp_digits == 0 {
            return Err(bad());
        }
    }

    if chars.next().is_some() {
        return Err(bad());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_integer() {
        assert_eq!(parse_int(b"-42", 0).unwrap(), -42);
    }

    #[test]
    fn rejects_fractional_integer() {
        assert!(parse_int(b"4.5", 0).is_err());
    }

    #[test]
    fn unsigned_rejects_negative() {
        assert!(parse_unsigned(b"-1", 0).is_err());
    }

    #[test]
    fn unsigned_accepts_negative_zero() {
        assert_eq!(parse_unsigned(b"-0", 0).unwrap(), 0);
    }

    #[test]
    fn parses_real_with_exponent() {
        assert!((parse_real(b"-1.5e3", 0).unwrap() - (-1500.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_leading_zero() {
        assert!(parse_real(b"012", 0).is_err());
    }

    #[test]
    fn rejects_bare_decimal_point() {
        assert!(parse_real(b"1.", 0).is_err());
        assert!(parse_real(b".5", 0).is_err());
    }

    #[test]
    fn integer_overflow_is_out_of_range() {
        let err = parse_int(b"99999999999999999999", 0).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NumberOutOfRange);
    }

    #[test]
    fn rejects_leading_zero_integer() {
        let err = parse_int(b"01", 0).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidNumber);
    }

    #[test]
    fn rejects_leading_plus_integer() {
        let err = parse_int(b"+1", 0).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidNumber);
    }

    #[test]
    fn zero_integer_is_accepted() {
        assert_eq!(parse_int(b"0", 0).unwrap(), 0);
        assert_eq!(parse_unsigned(b"0", 0).unwrap(), 0);
    }
}
