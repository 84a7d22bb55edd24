//! The value tag and the `JsonValue` trait: per-tag construction from a
//! borrowed slice.
//!
//! Each tag corresponds to one of the dispatch arms the class parser and
//! array iterator use to decide how to interpret a located value slice. A
//! derived struct gets its own non-blanket `impl JsonValue for T` from
//! `#[derive(JsonSchema)]` (tagged `Class`) rather than a generic
//! `impl<T: JsonSchema> JsonValue for T` -- the blanket form would conflict
//! with the `Vec<T>`/`Option<T>` impls below the moment a derived type
//! appeared inside a `Vec` or `Option` member.

use smallvec::SmallVec;

use crate::error::{Error, ErrorKind, Result};
use crate::numeric::{parse_int, parse_real, parse_unsigned};
use crate::policy::ParseOptions;
use crate::slice::ValueSlice;
use crate::timestamp::{parse_timestamp, Timestamp};

/// The closed set of ways a schema member's JSON representation can be
/// interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// A JSON number, parsed as a Rust integer or float.
    Number,
    /// `true` or `false`.
    Bool,
    /// A quoted JSON string.
    String,
    /// A string or bare-integer timestamp (see `timestamp::parse_timestamp`).
    Date,
    /// A nested JSON object, parsed by a derived `JsonSchema` type.
    Class,
    /// A JSON array, parsed element-by-element.
    Array,
    /// The literal `null`.
    Null,
    /// A user-supplied `JsonValue` implementation outside the built-in set.
    Custom,
}

/// Constructs a Rust value from a located, borrowed JSON value slice.
///
/// `from_slice` receives the *raw* slice exactly as the skipper or name
/// scanner found it -- quotes still on for strings, brackets still on for
/// arrays and objects -- so implementors decide for themselves how much of
/// it to trust. `ValueSlice::missing()` is passed when a nullable member
/// was absent from the object; every built-in impl except `Option<T>`
/// treats that input as `MissingMember` if `required()` returns `true` (the
/// class parser checks `required()` before calling `from_slice` at all, so
/// this is a last-resort guard).
pub trait JsonValue: Sized {
    /// The tag the class parser and array iterator dispatch on.
    const TAG: Tag;

    /// `false` for `Option<T>`; `true` for every other built-in impl,
    /// meaning the class parser raises `MissingMember` rather than ever
    /// calling `from_slice` on a missing slice.
    const REQUIRED: bool = true;

    /// Build `Self` from a located value slice.
    fn from_slice(slice: ValueSlice<'_>, options: ParseOptions) -> Result<Self>;
}

macro_rules! impl_signed {
    ($($t:ty),+) => {
        $(
            impl JsonValue for $t {
                const TAG: Tag = Tag::Number;
                fn from_slice(slice: ValueSlice<'_>, _options: ParseOptions) -> Result<Self> {
                    let v = parse_int(slice.bytes(), slice.offset)?;
                    <$t>::try_from(v).map_err(|_| {
                        Error::new(
                            ErrorKind::NumberOutOfRange,
                            slice.offset,
                            format!("{v} does not fit in {}", stringify!($t)),
                        )
                    })
                }
            }
        )+
    };
}

macro_rules! impl_unsigned {
    ($($t:ty),+) => {
        $(
            impl JsonValue for $t {
                const TAG: Tag = Tag::Number;
                fn from_slice(slice: ValueSlice<'_>, _options: ParseOptions) -> Result<Self> {
                    let v = parse_unsigned(slice.bytes(), slice.offset)?;
                    <$t>::try_from(v).map_err(|_| {
                        Error::new(
                            ErrorKind::NumberOutOfRange,
                            slice.offset,
                            format!("{v} does not fit in {}", stringify!($t)),
                        )
                    })
                }
            }
        )+
    };
}

impl_signed!(i8, i16, i32, i64, isize);
impl_unsigned!(u8, u16, u32, u64, usize);

impl JsonValue for f64 {
    const TAG: Tag = Tag::Number;
    fn from_slice(slice: ValueSlice<'_>, _options: ParseOptions) -> Result<Self> {
        parse_real(slice.bytes(), slice.offset)
    }
}

impl JsonValue for f32 {
    const TAG: Tag = Tag::Number;
    fn from_slice(slice: ValueSlice<'_>, options: ParseOptions) -> Result<Self> {
        f64::from_slice(slice, options).map(|v| v as f32)
    }
}

impl JsonValue for bool {
    const TAG: Tag = Tag::Bool;
    fn from_slice(slice: ValueSlice<'_>, _options: ParseOptions) -> Result<Self> {
        match slice.bytes() {
            b"true" => Ok(true),
            b"false" => Ok(false),
            _ => Err(Error::new(
                ErrorKind::InvalidBoolean,
                slice.offset,
                "expected 'true' or 'false'",
            )),
        }
    }
}

impl JsonValue for String {
    const TAG: Tag = Tag::String;
    fn from_slice(slice: ValueSlice<'_>, _options: ParseOptions) -> Result<Self> {
        let inner = strip_quotes(slice)?;
        if slice.has_escape() {
            Ok(unescape(inner))
        } else {
            Ok(inner.to_owned())
        }
    }
}

impl JsonValue for Timestamp {
    const TAG: Tag = Tag::Date;
    fn from_slice(slice: ValueSlice<'_>, _options: ParseOptions) -> Result<Self> {
        if slice.bytes().first() == Some(&b'"') {
            let inner = strip_quotes(slice)?;
            parse_timestamp(inner, slice.offset)
        } else {
            let text = slice.as_str()?;
            parse_timestamp(text, slice.offset)
        }
    }
}

impl<T: JsonValue> JsonValue for Option<T> {
    const TAG: Tag = T::TAG;
    const REQUIRED: bool = false;

    fn from_slice(slice: ValueSlice<'_>, options: ParseOptions) -> Result<Self> {
        if slice.is_empty() || slice.is_null_literal() {
            return Ok(None);
        }
        T::from_slice(slice, options).map(Some)
    }
}

impl<T: JsonValue> JsonValue for Vec<T> {
    const TAG: Tag = Tag::Array;

    fn from_slice(slice: ValueSlice<'_>, options: ParseOptions) -> Result<Self> {
        crate::array::parse_array(slice, options)
    }
}

/// A borrowed, in-place value that `from_slice` can use without an
/// intermediate `Vec` allocation -- used by the array iterator itself, not
/// by derived member types.
pub(crate) type InlineElements<'a> = SmallVec<[ValueSlice<'a>; 8]>;

fn strip_quotes(slice: ValueSlice<'_>) -> Result<&str> {
    let bytes = slice.bytes();
    if bytes.len() < 2 || bytes.first() != Some(&b'"') || bytes.last() != Some(&b'"') {
        return Err(Error::new(
            ErrorKind::InvalidString,
            slice.offset,
            "expected a quoted string",
        ));
    }
    std::str::from_utf8(&bytes[1..bytes.len() - 1]).map_err(|_| {
        Error::new(
            ErrorKind::InvalidString,
            slice.offset,
            "string content is not valid UTF-8",
        )
    })
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                if let Ok(code) = u32::from_str_radix(&hex, 16) {
                    if let Some(ch) = char::from_u32(code) {
                        out.push(ch);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(bytes: &'static [u8]) -> ValueSlice<'static> {
        ValueSlice::new(bytes, 0)
    }

    #[test]
    fn parses_signed_and_unsigned() {
        assert_eq!(i32::from_slice(slice(b"-7"), ParseOptions::new()).unwrap(), -7);
        assert_eq!(u32::from_slice(slice(b"7"), ParseOptions::new()).unwrap(), 7);
    }

    #[test]
    fn parses_bool() {
        assert!(bool::from_slice(slice(b"true"), ParseOptions::new()).unwrap());
        assert!(!bool::from_slice(slice(b"false"), ParseOptions::new()).unwrap());
        assert!(bool::from_slice(slice(b"TRUE"), ParseOptions::new()).is_err());
    }

    #[test]
    fn parses_and_unescapes_string() {
        let s = String::from_slice(slice(br#""he said \"hi\"""#), ParseOptions::new()).unwrap();
        assert_eq!(s, "he said \"hi\"");
    }

    #[test]
    fn option_treats_missing_as_none() {
        let v = Option::<i32>::from_slice(ValueSlice::missing(), ParseOptions::new()).unwrap();
        assert_eq!(v, None);
    }

    #[test]
    fn option_treats_null_as_none() {
        let v = Option::<i32>::from_slice(slice(b"null"), ParseOptions::new()).unwrap();
        assert_eq!(v, None);
    }

    #[test]
    fn option_parses_present_value() {
        let v = Option::<i32>::from_slice(slice(b"5"), ParseOptions::new()).unwrap();
        assert_eq!(v, Some(5));
    }
}
