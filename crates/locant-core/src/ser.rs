//! The schema-driven serializer: writes Rust values back out as JSON text.
//!
//! Numbers go through `itoa`/`ryu` rather than `write!`'s own formatting --
//! both are already in the dependency graph for the analogous reason the
//! teacher pulls them in (fast, allocation-free integer/float-to-text), and
//! `write!`'s float formatting doesn't round-trip every `f64` the way
//! `ryu` guarantees to.

use std::fmt::Write as _;

use crate::timestamp::{format_timestamp, Timestamp};

/// Where serialized JSON text is written.
///
/// A thin wrapper around `std::fmt::Write` so `ser` doesn't commit callers
/// to a `String` specifically -- any `fmt::Write` implementor (a
/// `String`, a formatter, a bytes-backed writer shim) works.
pub trait Sink: std::fmt::Write {}

impl<T: std::fmt::Write> Sink for T {}

/// Implemented for every Rust type that can appear as a schema member's
/// value on the write side.
///
/// Mirrors `JsonValue` on the read side: derived struct types get their own
/// non-blanket `impl WriteJson for T` from `#[derive(JsonSchema)]`, rather
/// than a blanket `impl<T: JsonSchema> WriteJson for T`, so the `Vec<T>`/
/// `Option<T>` impls below don't conflict with it.
pub trait WriteJson {
    /// Write `self`'s JSON representation to `sink`.
    fn write_json(&self, sink: &mut dyn Sink) -> std::fmt::Result;
}

macro_rules! impl_write_int {
    ($($t:ty),+) => {
        $(
            impl WriteJson for $t {
                fn write_json(&self, sink: &mut dyn Sink) -> std::fmt::Result {
                    let mut buf = itoa::Buffer::new();
                    sink.write_str(buf.format(*self))
                }
            }
        )+
    };
}

impl_write_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl WriteJson for f64 {
    fn write_json(&self, sink: &mut dyn Sink) -> std::fmt::Result {
        if self.is_finite() {
            let mut buf = ryu::Buffer::new();
            sink.write_str(buf.format(*self))
        } else {
            sink.write_str("null")
        }
    }
}

impl WriteJson for f32 {
    fn write_json(&self, sink: &mut dyn Sink) -> std::fmt::Result {
        f64::from(*self).write_json(sink)
    }
}

impl WriteJson for bool {
    fn write_json(&self, sink: &mut dyn Sink) -> std::fmt::Result {
        sink.write_str(if *self { "true" } else { "false" })
    }
}

impl WriteJson for String {
    fn write_json(&self, sink: &mut dyn Sink) -> std::fmt::Result {
        write_escaped_str(self, sink)
    }
}

impl WriteJson for str {
    fn write_json(&self, sink: &mut dyn Sink) -> std::fmt::Result {
        write_escaped_str(self, sink)
    }
}

impl WriteJson for Timestamp {
    fn write_json(&self, sink: &mut dyn Sink) -> std::fmt::Result {
        write_escaped_str(&format_timestamp(self), sink)
    }
}

impl<T: WriteJson> WriteJson for Option<T> {
    fn write_json(&self, sink: &mut dyn Sink) -> std::fmt::Result {
        match self {
            Some(value) => value.write_json(sink),
            None => sink.write_str("null"),
        }
    }
}

impl<T: WriteJson> WriteJson for Vec<T> {
    fn write_json(&self, sink: &mut dyn Sink) -> std::fmt::Result {
        sink.write_char('[')?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                sink.write_char(',')?;
            }
            item.write_json(sink)?;
        }
        sink.write_char(']')
    }
}

fn write_escaped_str(text: &str, sink: &mut dyn Sink) -> std::fmt::Result {
    sink.write_char('"')?;
    for c in text.chars() {
        match c {
            '"' => sink.write_str("\\\"")?,
            '\\' => sink.write_str("\\\\")?,
            '\n' => sink.write_str("\\n")?,
            '\t' => sink.write_str("\\t")?,
            '\r' => sink.write_str("\\r")?,
            c if (c as u32) < 0x20 => write!(sink, "\\u{:04x}", c as u32)?,
            c => sink.write_char(c)?,
        }
    }
    sink.write_char('"')
}

/// Serialize any `WriteJson` value to an owned `String`.
pub fn to_string<T: WriteJson>(value: &T) -> String {
    let mut out = String::new();
    value
        .write_json(&mut out)
        .expect("writing to a String never fails");
    out
}

/// Write a schema member, with its quoted name and a trailing comma if
/// `is_first` is `false` -- the shape `#[derive(JsonSchema)]` generates one
/// call to per member.
pub fn write_member(
    sink: &mut dyn Sink,
    name: &str,
    value: &dyn WriteJson,
    is_first: bool,
) -> std::fmt::Result {
    if !is_first {
        sink.write_char(',')?;
    }
    write_escaped_str(name, sink)?;
    sink.write_char(':')?;
    value.write_json(sink)
}

/// As [`write_member`], for a member attributed `#[locant(as_string)]`:
/// the value's text is wrapped in quotes, the write-side mirror of
/// [`crate::class::require_as_string`].
pub fn write_member_as_string(
    sink: &mut dyn Sink,
    name: &str,
    value: &dyn WriteJson,
    is_first: bool,
) -> std::fmt::Result {
    if !is_first {
        sink.write_char(',')?;
    }
    write_escaped_str(name, sink)?;
    sink.write_char(':')?;
    sink.write_char('"')?;
    value.write_json(sink)?;
    sink.write_char('"')
}
