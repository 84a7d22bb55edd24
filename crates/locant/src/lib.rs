// SPDX-License-Identifier: MIT OR Apache-2.0
//! # locant
//!
//! Schema-driven, zero-copy JSON parsing. Derive [`JsonSchema`] for a
//! struct, then parse and serialize directly against it -- no
//! intermediate DOM, no generic `Value` tree.
//!
//! ```ignore
//! use locant::JsonSchema;
//!
//! #[derive(JsonSchema)]
//! struct GeoPoint {
//!     lat: f64,
//!     lng: f64,
//! }
//!
//! let point: GeoPoint = locant::from_json(br#"{"lat":55.55,"lng":12.3}"#)?;
//! let text = locant::to_json(&point);
//! # Ok::<(), locant::Error>(())
//! ```
//!
//! ## Crates
//!
//! - [`locant-core`](https://docs.rs/locant-core) - `ParseState`, the
//!   skipper, the class parser, and the serializer
//! - [`locant-simd`](https://docs.rs/locant-simd) - the `memchr`-accelerated
//!   skipper backend, enabled by the `simd` feature
//! - [`locant-derive`](https://docs.rs/locant-derive) - the
//!   `#[derive(JsonSchema)]` proc macro

#![doc(html_root_url = "https://docs.rs/locant/0.1.0")]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

use std::sync::Once;

/// Re-export of `locant-core`'s error type and result alias.
pub use locant_core::{Error, ErrorKind, Result};
/// Re-export of `locant-core`'s parsing policy (`ParseOptions`/`ExecMode`).
pub use locant_core::{ExecMode, ParseOptions};
/// Re-export of `locant-core`'s public traits and value types.
pub use locant_core::{
    ClassLocations, JsonSchema, JsonValue, Location, LocationsTable, MemberMeta, Sink, Tag,
    Timestamp, ValueSlice, WriteJson,
};
/// Re-export of `locant-core`'s class parser entry point.
pub use locant_core::parse_class;
/// Re-export of the internal modules `#[derive(JsonSchema)]`'s expansion
/// refers to by absolute path (`::locant::class`, `::locant::hash`,
/// `::locant::ser`). Not part of the stable public surface otherwise.
pub use locant_core::{class, hash, ser};

/// Re-export of the `#[derive(JsonSchema)]` proc macro.
pub use locant_derive::JsonSchema;

static SIMD_INIT: Once = Once::new();

fn ensure_simd_registered() {
    #[cfg(feature = "simd")]
    SIMD_INIT.call_once(locant_simd::register);
    #[cfg(not(feature = "simd"))]
    SIMD_INIT.call_once(|| {});
}

/// Parse a top-level JSON document into `T`, with default [`ParseOptions`].
///
/// # Errors
///
/// Returns an error for any malformed input or schema mismatch; see
/// [`ErrorKind`] for the closed set of failure categories.
pub fn from_json<T: JsonSchema>(document: &[u8]) -> Result<T> {
    from_json_with(document, ParseOptions::default())
}

/// As [`from_json`], with caller-supplied [`ParseOptions`].
///
/// # Errors
///
/// See [`from_json`].
pub fn from_json_with<T: JsonSchema>(document: &[u8], options: ParseOptions) -> Result<T> {
    ensure_simd_registered();
    parse_class(ValueSlice::new(document, 0), options)
}

/// Parse the value at `path` within `document` into `T` (e.g.
/// `"features[0].geometry"`), with default [`ParseOptions`].
///
/// # Errors
///
/// Returns `ErrorKind::InvalidPath` if `path` cannot be resolved, plus
/// every error [`from_json`] can return for the resolved value.
pub fn from_json_at<T: JsonSchema>(document: &[u8], path: &str) -> Result<T> {
    from_json_at_with(document, path, ParseOptions::default())
}

/// As [`from_json_at`], with caller-supplied [`ParseOptions`].
///
/// # Errors
///
/// See [`from_json_at`].
pub fn from_json_at_with<T: JsonSchema>(
    document: &[u8],
    path: &str,
    options: ParseOptions,
) -> Result<T> {
    ensure_simd_registered();
    let root = ValueSlice::new(document, 0);
    let target = locant_core::navigate(root, path, options)?;
    parse_class(target, options)
}

/// Parse a top-level JSON array into `Vec<T>`, with default
/// [`ParseOptions`].
///
/// # Errors
///
/// See [`from_json`].
pub fn from_json_array<T: JsonValue>(document: &[u8]) -> Result<Vec<T>> {
    from_json_array_with(document, ParseOptions::default())
}

/// As [`from_json_array`], with caller-supplied [`ParseOptions`].
///
/// # Errors
///
/// See [`from_json_array`].
pub fn from_json_array_with<T: JsonValue>(
    document: &[u8],
    options: ParseOptions,
) -> Result<Vec<T>> {
    ensure_simd_registered();
    Vec::<T>::from_slice(ValueSlice::new(document, 0), options)
}

/// Lazily iterate a top-level JSON array's elements as `T`, parsing only as
/// far as the caller actually consumes -- the `json_array_range` entry
/// point, for a prefix of a large array (e.g. the first page of a tweet
/// timeline) without paying to parse the rest. Uses default [`ParseOptions`].
///
/// # Errors
///
/// Each item is independently `Result<T>`; an error on one element does
/// not prevent earlier elements from having already been yielded.
pub fn json_array_range<T: JsonValue>(
    document: &[u8],
) -> Result<locant_core::array::ArrayIter<'_, T>> {
    json_array_range_with(document, ParseOptions::default())
}

/// As [`json_array_range`], with caller-supplied [`ParseOptions`].
///
/// # Errors
///
/// See [`json_array_range`].
pub fn json_array_range_with<T: JsonValue>(
    document: &[u8],
    options: ParseOptions,
) -> Result<locant_core::array::ArrayIter<'_, T>> {
    ensure_simd_registered();
    locant_core::array::ArrayIter::new(ValueSlice::new(document, 0), options)
}

/// As [`json_array_range`], over the array found at `path` within
/// `document`. Uses default [`ParseOptions`].
///
/// # Errors
///
/// See [`json_array_range`] and [`from_json_at`].
pub fn json_array_range_at<'a, T: JsonValue>(
    document: &'a [u8],
    path: &str,
) -> Result<locant_core::array::ArrayIter<'a, T>> {
    json_array_range_at_with(document, path, ParseOptions::default())
}

/// As [`json_array_range_at`], with caller-supplied [`ParseOptions`].
///
/// # Errors
///
/// See [`json_array_range_at`].
pub fn json_array_range_at_with<'a, T: JsonValue>(
    document: &'a [u8],
    path: &str,
    options: ParseOptions,
) -> Result<locant_core::array::ArrayIter<'a, T>> {
    ensure_simd_registered();
    let root = ValueSlice::new(document, 0);
    let target = locant_core::navigate(root, path, options)?;
    locant_core::array::ArrayIter::new(target, options)
}

/// Serialize `value` to a JSON `String`.
#[must_use]
pub fn to_json<T: WriteJson>(value: &T) -> String {
    ser::to_string(value)
}

/// Serialize `value` into an existing `Sink` (e.g. a `String` or any other
/// `std::fmt::Write` implementor), without an intermediate allocation.
///
/// # Errors
///
/// Propagates whatever the sink's `std::fmt::Write` impl returns.
pub fn to_json_into<T: WriteJson>(value: &T, sink: &mut dyn Sink) -> std::fmt::Result {
    value.write_json(sink)
}
