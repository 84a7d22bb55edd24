//! The name scanner: parses a JSON member name (`"key":`) from the cursor.

use crate::error::{Error, ErrorKind, Result};
use crate::skip::skip_string_scalar;

/// The result of scanning one member name: its unescaped-or-raw content and
/// the number of bytes consumed from the start of the slice, including the
/// trailing `:` and any surrounding whitespace.
pub struct ScannedName<'a> {
    /// The name's content (without quotes).
    pub name: &'a [u8],
    /// Bytes consumed, from the opening `"` through the `:` and trailing
    /// whitespace.
    pub consumed: usize,
}

/// Parse a member name at `bytes[0] == '"'`.
///
/// By default the name is scanned without honoring escapes (real-world JSON
/// keys essentially never use them); when `allow_escaped_names` is set, the
/// same escape rule as `skip_string` applies. After the closing quote,
/// whitespace is skipped, a `:` is required and consumed, and trailing
/// whitespace is skipped again.
pub fn scan_member_name(bytes: &[u8], allow_escaped_names: bool) -> Result<ScannedName<'_>> {
    if bytes.first() != Some(&b'"') {
        return Err(Error::new(
            ErrorKind::InvalidClass,
            0,
            "expected a quoted member name",
        ));
    }

    let close = if allow_escaped_names {
        skip_string_scalar(bytes)? - 1 // index of closing quote
    } else {
        1 + memchr::memchr(b'"', &bytes[1..]).ok_or_else(|| {
            Error::new(
                ErrorKind::UnexpectedEndOfStream,
                bytes.len(),
                "unterminated member name",
            )
        })?
    };
    let name = &bytes[1..close];
    let mut pos = close + 1;
    pos += trim_left(&bytes[pos..]);
    if bytes.get(pos) != Some(&b':') {
        return Err(Error::new(
            ErrorKind::InvalidClass,
            pos,
            "expected ':' after member name",
        ));
    }
    pos += 1;
    pos += trim_left(&bytes[pos..]);
    Ok(ScannedName {
        name,
        consumed: pos,
    })
}

/// Count ASCII whitespace (`<= 0x20`) bytes at the start of `bytes`.
pub(crate) fn trim_left(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|&&b| b <= b' ').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_simple_name() {
        let scanned = scan_member_name(br#""lat": 55.55"#, false).unwrap();
        assert_eq!(scanned.name, b"lat");
        assert_eq!(&br#""lat": 55.55"#[scanned.consumed..], b"55.55");
    }

    #[test]
    fn rejects_missing_colon() {
        assert!(scan_member_name(br#""lat" 55.55"#, false).is_err());
    }

    #[test]
    fn escaped_names_require_the_flag() {
        let scanned = scan_member_name(br#""a\"b":1"#, true).unwrap();
        assert_eq!(scanned.name, br#"a\"b"#);
    }
}
