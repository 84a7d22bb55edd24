// SPDX-License-Identifier: MIT OR Apache-2.0
//! A `Skipper` backend that leans on `memchr`'s vectorized routines
//! instead of `locant-core`'s byte-at-a-time scalar scan.
//!
//! `memchr::memchr2` finds the next quote-or-backslash in one pass over a
//! string body rather than testing each byte individually, which is where
//! the bulk of a real document's skip time goes (string-heavy payloads --
//! the tweet and GeoJSON properties shapes this crate was generalized
//! from are almost all string values). Selected at runtime through
//! `ParseOptions::with_exec_mode(ExecMode::Simd)`; falls back to the
//! scalar skipper wherever a caller has pinned `ExecMode::ScalarOnly`.

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

use locant_core::error::{Error, ErrorKind, Result};
use locant_core::skip::{register_simd_skipper, Skipper};

/// Register `MemchrSkipper` as the backend `ExecMode::Runtime` and
/// `ExecMode::Simd` resolve to. Idempotent; the facade crate calls this
/// once, guarded by `std::sync::Once`, when built with the `simd` feature.
pub fn register() {
    register_simd_skipper(|| Box::new(MemchrSkipper));
}

/// A `Skipper` that jumps between structurally significant bytes
/// (`"`, `\`, the bracket/comma set) via `memchr`'s 2- and 3-needle scans,
/// rather than inspecting every byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemchrSkipper;

impl Skipper for MemchrSkipper {
    fn skip_string(&self, bytes: &[u8]) -> Result<usize> {
        skip_string_memchr(bytes)
    }

    fn skip_object(&self, bytes: &[u8]) -> Result<(usize, usize)> {
        skip_bracketed_memchr(bytes, b'{', b'}', b'[', b']')
    }

    fn skip_array(&self, bytes: &[u8]) -> Result<(usize, usize)> {
        skip_bracketed_memchr(bytes, b'[', b']', b'{', b'}')
    }

    fn skip_other(&self, bytes: &[u8]) -> usize {
        let terminator = memchr::memchr3(b',', b'}', b']', bytes);
        let newline = memchr::memchr(b'\n', bytes);
        match (terminator, newline) {
            (Some(a), Some(b)) => a.min(b),
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => bytes.len(),
        }
    }
}

/// As `locant_core::skip::skip_string_scalar`, but advancing to the next
/// `"` or `\` via `memchr::memchr2` instead of testing every byte.
fn skip_string_memchr(bytes: &[u8]) -> Result<usize> {
    let mut i = 1;
    loop {
        let Some(found) = memchr::memchr2(b'"', b'\\', &bytes[i..]) else {
            return Err(Error::new(
                ErrorKind::UnexpectedEndOfStream,
                bytes.len(),
                "unterminated string",
            ));
        };
        i += found;
        match bytes[i] {
            b'"' => return Ok(i + 1),
            b'\\' => i += 2,
            _ => unreachable!("memchr2 only returns indices of '\"' or '\\'"),
        }
    }
}

/// As `locant_core::skip::skip_bracketed_scalar`, using `memchr` to jump
/// to the next byte of interest (either bracket kind, a comma at the
/// right depth, or a string boundary) instead of a per-byte match.
fn skip_bracketed_memchr(
    bytes: &[u8],
    prime_open: u8,
    prime_close: u8,
    sec_open: u8,
    sec_close: u8,
) -> Result<(usize, usize)> {
    let mut i = 0;
    let mut prime_depth: i64 = 1;
    let mut sec_depth: i64 = 0;
    let mut commas = 0usize;

    loop {
        let rest = &bytes[i..];
        // Two three-needle scans cover all six bytes of interest, plus a
        // dedicated scan for a bare `\` (outside a string, a two-byte
        // escape the scalar skipper also special-cases); each is a single
        // vectorized pass over the unread remainder, so a run of ordinary
        // content (string bodies aside) is skipped in one jump rather than
        // byte-by-byte.
        let primary = memchr::memchr3(b'"', prime_open, prime_close, rest);
        let secondary = memchr::memchr3(sec_open, sec_close, b',', rest);
        let escape = memchr::memchr(b'\\', rest);
        let Some(offset) = [primary, secondary, escape].into_iter().flatten().min() else {
            return Err(Error::new(
                ErrorKind::UnexpectedBracketing,
                bytes.len(),
                "input ended before the bracket nest closed",
            ));
        };
        i += offset;
        let b = bytes[i];
        match b {
            b'"' => {
                i += skip_string_memchr(&bytes[i..])?;
            }
            b'\\' => i += 2,
            _ if b == prime_open => {
                prime_depth += 1;
                i += 1;
            }
            _ if b == prime_close => {
                prime_depth -= 1;
                i += 1;
                if prime_depth == 0 {
                    return Ok((i, commas));
                }
            }
            _ if b == sec_open => {
                sec_depth += 1;
                i += 1;
            }
            _ if b == sec_close => {
                sec_depth -= 1;
                i += 1;
            }
            b',' if prime_depth == 1 && sec_depth == 0 => {
                commas += 1;
                i += 1;
            }
            _ => i += 1,
        }
    }
}
