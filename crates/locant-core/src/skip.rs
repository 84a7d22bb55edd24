//! The structural skipper: walks over a JSON value without parsing it.

use std::sync::OnceLock;

use crate::error::{Error, ErrorKind, Result};
use crate::policy::ExecMode;

/// Advances past a JSON value without decoding its contents.
///
/// A scalar implementation lives here (`ScalarSkipper`); `locant-simd`
/// provides a vectorized implementation of the same trait, selected at
/// runtime via `ExecMode`. Every method returns byte counts relative to the
/// start of the slice it was given, mirroring the teacher's `Skip` trait
/// (`skip_object`/`skip_array` operate on a slice positioned just past the
/// opening bracket).
pub trait Skipper {
    /// `bytes[0]` must be the opening `"` of a string. Returns the string's
    /// total length in bytes, including both quotes.
    fn skip_string(&self, bytes: &[u8]) -> Result<usize>;

    /// `bytes` must start immediately *after* an already-consumed opening
    /// `{`. Returns `(len, top_level_commas)`, where `len` is the number of
    /// bytes up to and including the matching `}`.
    fn skip_object(&self, bytes: &[u8]) -> Result<(usize, usize)>;

    /// As `skip_object`, for an already-consumed opening `[` / closing `]`.
    fn skip_array(&self, bytes: &[u8]) -> Result<(usize, usize)>;

    /// Advances to the first of `,`, `}`, `]`, `\n`, or the end of input,
    /// returning the length of the preceding (unparsed) literal. The cursor
    /// is left *on* the terminator, not past it.
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

    /// Dispatches on the first byte of `bytes` to the appropriate skip
    /// routine, returning the total length of the value (brackets
    /// included).
    fn skip_value(&self, bytes: &[u8]) -> Result<usize> {
        match bytes.first() {
            Some(b'"') => self.skip_string(bytes),
            Some(b'{') => {
                let (inner, _) = self.skip_object(&bytes[1..])?;
                Ok(1 + inner)
            }
            Some(b'[') => {
                let (inner, _) = self.skip_array(&bytes[1..])?;
                Ok(1 + inner)
            }
            Some(_) => Ok(self.skip_other(bytes)),
            None => Err(Error::new(
                ErrorKind::UnexpectedEndOfStream,
                0,
                "expected a value but found end of input",
            )),
        }
    }
}

/// Skip a JSON string starting at `bytes[0] == '"'`. Escape rule: any `\`
/// causes the following byte to be ignored for quote detection.
pub fn skip_string_scalar(bytes: &[u8]) -> Result<usize> {
    let mut i = 1;
    loop {
        match bytes.get(i) {
            None => {
                return Err(Error::new(
                    ErrorKind::UnexpectedEndOfStream,
                    bytes.len(),
                    "unterminated string",
                ));
            }
            Some(b'\\') => i += 2,
            Some(b'"') => return Ok(i + 1),
            Some(_) => i += 1,
        }
    }
}

/// Balanced skip over `bytes` (already past the opening primary bracket),
/// tracking a secondary bracket kind so `{...[...]...}` and
/// `[...{...}...]` both terminate at the correct matching close. Also
/// counts commas seen at depth 1 in the primary bracket with depth 0 in the
/// secondary one -- this gives arrays an exact top-level element count in a
/// single pass.
pub fn skip_bracketed_scalar(
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
        let Some(&b) = bytes.get(i) else {
            return Err(Error::new(
                ErrorKind::UnexpectedBracketing,
                bytes.len(),
                "input ended before the bracket nest closed",
            ));
        };
        match b {
            b'"' => {
                i += skip_string_scalar(&bytes[i..])?;
                continue;
            }
            b'\\' => i += 2,
            b',' if prime_depth == 1 && sec_depth == 0 => {
                commas += 1;
                i += 1;
            }
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
            _ => i += 1,
        }
    }
}

/// The portable, pure-scalar `Skipper` backend. Always available; used as
/// the fallback when `locant-simd` is not linked or the CPU lacks the
/// required features.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarSkipper;

impl Skipper for ScalarSkipper {
    fn skip_string(&self, bytes: &[u8]) -> Result<usize> {
        skip_string_scalar(bytes)
    }

    fn skip_object(&self, bytes: &[u8]) -> Result<(usize, usize)> {
        skip_bracketed_scalar(bytes, b'{', b'}', b'[', b']')
    }

    fn skip_array(&self, bytes: &[u8]) -> Result<(usize, usize)> {
        skip_bracketed_scalar(bytes, b'[', b']', b'{', b'}')
    }
}

type SkipperFactory = fn() -> Box<dyn Skipper + Send + Sync>;

static SIMD_SKIPPER: OnceLock<SkipperFactory> = OnceLock::new();

/// Register the SIMD-accelerated backend. Called once by `locant-simd`
/// (via the facade crate's feature-gated init) before any parse that asks
/// for `ExecMode::Runtime` or `ExecMode::Simd` can observe it -- this
/// crate never links `locant-simd` itself (that would invert the
/// dependency direction), so the backend has to be handed in rather than
/// looked up.
pub fn register_simd_skipper(factory: SkipperFactory) {
    let _ = SIMD_SKIPPER.set(factory);
}

/// Select the `Skipper` backend for `mode`.
///
/// `ScalarOnly` always returns the portable backend. `Runtime` uses the
/// registered SIMD backend if `locant-simd` has registered one, falling
/// back to scalar otherwise. `Simd` also falls back to scalar when none is
/// registered -- forcing a hard error here would make enabling the
/// `simd` feature a precondition for otherwise-identical code to keep
/// compiling, which is worse than a quiet, correct fallback.
#[must_use]
pub fn select_skipper(mode: ExecMode) -> Box<dyn Skipper + Send + Sync> {
    match mode {
        ExecMode::ScalarOnly => Box::new(ScalarSkipper),
        ExecMode::Runtime | ExecMode::Simd => SIMD_SKIPPER.get().map_or_else(
            || Box::new(ScalarSkipper) as Box<dyn Skipper + Send + Sync>,
            |factory| factory(),
        ),
    }
}
