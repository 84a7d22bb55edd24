// SPDX-License-Identifier: MIT OR Apache-2.0
//! Schema-driven, zero-copy JSON parsing core for `locant`.
//!
//! This crate provides the pieces a generated `JsonSchema` implementation
//! is built from:
//!
//! - [`error`] - the closed `ErrorKind` set and `Error`/`Result`
//! - [`policy`] - `ParseOptions`/`ExecMode`, threaded through every parse
//! - [`slice`] - `ValueSlice`, a borrowed range into the input document
//! - [`skip`] - the structural skipper (`Skipper` trait, scalar backend)
//! - [`name`] - the member-name scanner
//! - [`hash`] - murmur3-derived name hashing for the locations table
//! - [`state`] - `ParseState`, the document cursor
//! - [`locations`] - the per-parse Locations Table
//! - [`numeric`] - integer/real number grammar and parsing
//! - [`timestamp`] - `Date`-tagged value parsing and formatting
//! - [`value`] - `Tag` and the `JsonValue` construction trait
//! - [`schema`] - `JsonSchema`, implemented by `#[derive(JsonSchema)]`
//! - [`class`] - the class (object) parser
//! - [`array`] - the lazy array iterator and `Vec<T>` collector
//! - [`path`] - the dotted/indexed path navigator
//! - [`ser`] - the schema-driven serializer

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]
#![allow(clippy::module_name_repetitions)]

/// Array parsing: the lazy element iterator and `Vec<T>` collector.
pub mod array;
/// The class (JSON object) parser.
pub mod class;
/// The closed `ErrorKind` set and `Error`/`Result`.
pub mod error;
/// Murmur3-derived name hashing for the locations table.
pub mod hash;
/// The per-parse Locations Table.
pub mod locations;
/// The member-name scanner.
pub mod name;
/// Integer and real number grammar and parsing.
pub mod numeric;
/// The dotted/indexed path navigator.
pub mod path;
/// Parser policy flags (`ParseOptions`/`ExecMode`).
pub mod policy;
/// `JsonSchema`, implemented by `#[derive(JsonSchema)]`.
pub mod schema;
/// The schema-driven serializer.
pub mod ser;
/// The structural skipper.
pub mod skip;
/// Borrowed value slices.
pub mod slice;
/// `ParseState`, the document cursor.
pub mod state;
/// `Date`-tagged value parsing and formatting.
pub mod timestamp;
/// `Tag` and the `JsonValue` construction trait.
pub mod value;

pub use crate::class::parse_class;
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::locations::{ClassLocations, Location, LocationsTable};
pub use crate::path::navigate;
pub use crate::policy::{ExecMode, ParseOptions};
pub use crate::schema::{JsonSchema, MemberMeta};
pub use crate::ser::{to_string, Sink, WriteJson};
pub use crate::slice::ValueSlice;
pub use crate::state::{ByteSource, ParseState};
pub use crate::timestamp::Timestamp;
pub use crate::value::{JsonValue, Tag};

/// Parse a top-level JSON document into `T`.
///
/// Equivalent to wrapping `document` in a `ValueSlice` at offset `0` and
/// calling [`parse_class`] -- the entry point the facade crate's
/// `from_json` re-exports.
pub fn from_document<T: JsonSchema>(document: &[u8], options: ParseOptions) -> Result<T> {
    parse_class(ValueSlice::new(document, 0), options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_document_rejects_non_object_input() {
        let err = class::parse_class::<Dummy>(ValueSlice::new(b"[1,2]", 0), ParseOptions::new());
        assert!(err.is_err());
    }

    struct Dummy;
    impl JsonSchema for Dummy {
        const MEMBERS: &'static [MemberMeta] = &[];
        fn parse(_locations: &ClassLocations<'_>, _options: ParseOptions) -> Result<Self> {
            Ok(Self)
        }
        fn write(&self, _sink: &mut dyn Sink) -> std::fmt::Result {
            Ok(())
        }
    }
}
