//! Error types for the parsing and serialization core.

use std::fmt;

/// Result alias used throughout `locant-core`.
pub type Result<T> = std::result::Result<T, Error>;

/// The kind of failure that occurred while parsing or serializing a document.
///
/// Mirrors the closed set of error kinds a schema-driven JSON parser can
/// raise: every kind here is demonstrated by at least one minimal input in
/// the integration tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The input ended before a value or bracket could be closed.
    UnexpectedEndOfStream,
    /// A member name did not match any member of the active schema and the
    /// schema rejects unknown members.
    UnknownMember,
    /// A non-nullable schema member was never located in the JSON object.
    MissingMember,
    /// A parsed integer did not fit in the target numeric type.
    NumberOutOfRange,
    /// A number slice did not match the JSON number grammar.
    InvalidNumber,
    /// A string value's slice could not be interpreted by the constructor.
    InvalidString,
    /// A value slice was not exactly `true` or `false`.
    InvalidBoolean,
    /// A nullable value slice was neither a valid inner value nor `null`.
    InvalidNull,
    /// An array element was malformed (e.g. an empty element between commas).
    InvalidArray,
    /// A nested object was malformed.
    InvalidClass,
    /// A bracket nesting mismatch was detected while skipping a value.
    UnexpectedBracketing,
    /// A path expression could not be resolved against the document.
    InvalidPath,
    /// A document value's JSON type did not match the schema's expectation.
    TypeMismatch,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::UnexpectedEndOfStream => "unexpected end of stream",
            Self::UnknownMember => "unknown member",
            Self::MissingMember => "missing member",
            Self::NumberOutOfRange => "number out of range",
            Self::InvalidNumber => "invalid number",
            Self::InvalidString => "invalid string",
            Self::InvalidBoolean => "invalid boolean",
            Self::InvalidNull => "invalid null",
            Self::InvalidArray => "invalid array",
            Self::InvalidClass => "invalid class",
            Self::UnexpectedBracketing => "unexpected bracketing",
            Self::InvalidPath => "invalid path",
            Self::TypeMismatch => "type mismatch",
        };
        f.write_str(label)
    }
}

/// An error encountered while parsing or serializing a document.
///
/// Carries the offending byte offset within the original input so callers
/// can build a caret-style diagnostic; `locant` never returns a partially
/// constructed value alongside an error.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind} at offset {offset}: {reason}")]
pub struct Error {
    /// The category of failure.
    pub kind: ErrorKind,
    /// A human-readable explanation, specific to the offending input.
    pub reason: String,
    /// Byte offset within the original input where the error was detected.
    pub offset: usize,
}

impl Error {
    /// Build an error of the given kind at the given offset.
    pub fn new(kind: ErrorKind, offset: usize, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::debug!(?kind, offset, %reason, "parse error");
        Self {
            kind,
            reason,
            offset,
        }
    }
}
