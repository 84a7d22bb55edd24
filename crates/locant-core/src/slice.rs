//! Borrowed value slices: the result of locating or skipping a JSON value.

/// A borrowed half-open byte range into the original input, plus a hint
/// about whether it contains any backslash escape.
///
/// For strings, `bytes` is the content *between* the quotes. For every
/// other tag it is the raw literal text (e.g. `-12.5`, `true`, `null`, the
/// full `{...}` or `[...]` span). Slices never outlive the input buffer they
/// were cut from; unescaping, if needed, is the value constructor's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueSlice<'a> {
    bytes: &'a [u8],
    has_escape: bool,
    /// Byte offset of `bytes[0]` within the original document, used for
    /// error reporting.
    pub offset: usize,
}

impl<'a> ValueSlice<'a> {
    /// Wrap a raw byte range, recording whether it contains a `\` byte.
    #[must_use]
    pub fn new(bytes: &'a [u8], offset: usize) -> Self {
        let has_escape = memchr::memchr(b'\\', bytes).is_some();
        Self {
            bytes,
            has_escape,
            offset,
        }
    }

    /// Wrap a raw byte range with a precomputed escape hint (the skipper
    /// already knows this without a second scan).
    #[must_use]
    pub const fn with_escape_hint(bytes: &'a [u8], has_escape: bool, offset: usize) -> Self {
        Self {
            bytes,
            has_escape,
            offset,
        }
    }

    /// The sentinel slice passed to a nullable member's constructor when the
    /// member was never located in the JSON object.
    #[must_use]
    pub const fn missing() -> Self {
        Self {
            bytes: &[],
            has_escape: false,
            offset: 0,
        }
    }

    /// The raw bytes of this slice.
    #[must_use]
    pub const fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// `true` if this slice is empty (either a genuinely empty JSON string
    /// or the "member not present" sentinel).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// `true` if a `\` byte was observed anywhere in this slice.
    #[must_use]
    pub const fn has_escape(&self) -> bool {
        self.has_escape
    }

    /// `true` if this slice is exactly the four-byte `null` literal.
    #[must_use]
    pub fn is_null_literal(&self) -> bool {
        self.bytes == b"null"
    }

    /// Interpret the slice as UTF-8 text, failing with `InvalidString` if it
    /// isn't.
    pub fn as_str(&self) -> crate::error::Result<&'a str> {
        std::str::from_utf8(self.bytes).map_err(|_| {
            crate::error::Error::new(
                crate::error::ErrorKind::InvalidString,
                self.offset,
                "value slice is not valid UTF-8",
            )
        })
    }
}
