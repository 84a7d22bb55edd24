//! `ParseState`: a byte-range cursor over the input, with bounds-checked and
//! unchecked modes, whitespace trimming, and bracketed-region skipping.

use crate::error::{Error, ErrorKind, Result};
use crate::policy::ParseOptions;
use crate::skip::{select_skipper, Skipper};

/// The byte-level input source a `ParseState` reads from.
///
/// The hard engineering in this crate is everything built *on top of* a
/// flat byte slice; the source of those bytes (a plain `&[u8]`, a
/// memory-mapped file, a pooled buffer) is an external collaborator. The
/// blanket `&[u8]` implementation below is the only one this crate needs;
/// other input adapters are free to implement the trait themselves as long
/// as they uphold the same contract -- `as_bytes()` must be stable for the
/// lifetime of the returned reference.
pub trait ByteSource {
    /// The bytes backing this source.
    fn as_bytes(&self) -> &[u8];
}

impl ByteSource for [u8] {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl ByteSource for str {
    fn as_bytes(&self) -> &[u8] {
        str::as_bytes(self)
    }
}

/// A cursor over a JSON document, with policy flags and enclosing-class
/// extents for error context and re-entrant sibling scans.
#[derive(Debug, Clone, Copy)]
pub struct ParseState<'a> {
    input: &'a [u8],
    pos: usize,
    /// Enclosing class/array extents, recorded when entering a nested
    /// value so error messages and re-scans can reference them.
    class_first: usize,
    class_last: usize,
    /// Cache slot used by array parsing to remember an already-computed
    /// element count.
    pub counter: usize,
    options: ParseOptions,
}

impl<'a> ParseState<'a> {
    /// Build a cursor over the whole of `input`, starting at offset 0.
    #[must_use]
    pub fn new(input: &'a [u8], options: ParseOptions) -> Self {
        Self {
            input,
            pos: 0,
            class_first: 0,
            class_last: input.len(),
            counter: 0,
            options,
        }
    }

    /// Build a cursor over a sub-range of `input`, preserving the parent's
    /// class extents (used when a member's location is replayed from the
    /// locations table).
    #[must_use]
    pub fn sub_range(&self, first: usize, last: usize) -> Self {
        Self {
            input: self.input,
            pos: first,
            class_first: self.class_first,
            class_last: self.class_last,
            counter: 0,
            options: self.options,
        }
    }

    /// The parser policy in effect for this cursor.
    #[must_use]
    pub const fn options(&self) -> ParseOptions {
        self.options
    }

    /// Current absolute offset into the original document.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.pos
    }

    /// The enclosing class/array's byte extent.
    #[must_use]
    pub const fn class_extent(&self) -> (usize, usize) {
        (self.class_first, self.class_last)
    }

    /// Record the current position as the start of a new enclosing class.
    pub fn enter_class(&mut self) {
        self.class_first = self.pos;
    }

    /// Record `last` as the end of the current enclosing class.
    pub fn set_class_last(&mut self, last: usize) {
        self.class_last = last;
    }

    /// `true` if the cursor has consumed the whole document.
    #[must_use]
    pub fn empty(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// `true` if at least one more byte remains.
    #[must_use]
    pub fn has_more(&self) -> bool {
        !self.empty()
    }

    /// The byte at the cursor, or `None` at end of input.
    #[must_use]
    pub fn front(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// The unread remainder of the document.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.pos.min(self.input.len())..]
    }

    /// The whole document this cursor was built over.
    #[must_use]
    pub const fn document(&self) -> &'a [u8] {
        self.input
    }

    /// Advance the cursor by `n` bytes.
    ///
    /// In checked mode, advancing past the end of input is an error; in
    /// unchecked mode the cursor is clamped (never produces an
    /// out-of-bounds slice -- see the module doc for the sentinel
    /// contract).
    pub fn remove_prefix(&mut self, n: usize) -> Result<()> {
        let new_pos = self.pos + n;
        if self.options.checked && new_pos > self.input.len() {
            return Err(Error::new(
                ErrorKind::UnexpectedEndOfStream,
                self.input.len(),
                "advanced past end of input",
            ));
        }
        self.pos = new_pos.min(self.input.len());
        Ok(())
    }

    /// Skip ASCII whitespace (any byte `<= 0x20`).
    pub fn trim_left(&mut self) {
        let skipped = self.remaining().iter().take_while(|&&b| b <= b' ').count();
        self.pos += skipped;
    }

    /// Advance the cursor to the first occurrence of `target`, or to the
    /// end of input if not found.
    pub fn move_to_next_of(&mut self, target: u8) {
        match memchr::memchr(target, self.remaining()) {
            Some(found) => self.pos += found,
            None => self.pos = self.input.len(),
        }
    }

    /// Advance the cursor to the first occurrence of any byte in `targets`.
    pub fn move_to_next_of_set(&mut self, targets: &[u8]) {
        match self.remaining().iter().position(|b| targets.contains(b)) {
            Some(found) => self.pos += found,
            None => self.pos = self.input.len(),
        }
    }

    /// `true` at a literal's terminator: end of input, `,`, `]`, or `}`.
    #[must_use]
    pub fn at_literal_end(&self) -> bool {
        matches!(self.front(), None | Some(b',' | b']' | b'}'))
    }

    /// `true` if the cursor is on an ASCII digit.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self.front(), Some(b'0'..=b'9'))
    }

    /// Skip a balanced `{...}` starting at the cursor (which must be on the
    /// opening `{`), returning the content slice (braces included) and the
    /// top-level member count.
    pub fn skip_class(&mut self) -> Result<(&'a [u8], usize)> {
        self.skip_bracketed(b'{', |s, skipper| skipper.skip_object(s))
    }

    /// Skip a balanced `[...]` starting at the cursor, returning the
    /// content slice (brackets included) and the top-level element count.
    pub fn skip_array(&mut self) -> Result<(&'a [u8], usize)> {
        self.skip_bracketed(b'[', |s, skipper| skipper.skip_array(s))
    }

    fn skip_bracketed(
        &mut self,
        open: u8,
        inner: impl Fn(&[u8], &dyn Skipper) -> Result<(usize, usize)>,
    ) -> Result<(&'a [u8], usize)> {
        let start = self.pos;
        if self.front() != Some(open) {
            return Err(Error::new(
                ErrorKind::UnexpectedBracketing,
                self.pos,
                "expected an opening bracket",
            ));
        }
        let skipper = self.skipper();
        let (len, count) = inner(&self.remaining()[1..], skipper.as_ref())?;
        let total = 1 + len;
        self.pos += total;
        Ok((&self.input[start..self.pos], count))
    }

    /// Skip any JSON value at the cursor (string, object, array, or
    /// primitive literal), returning its raw slice.
    pub fn skip_value(&mut self) -> Result<&'a [u8]> {
        let start = self.pos;
        let skipper = self.skipper();
        let len = skipper.as_ref().skip_value(self.remaining())?;
        self.pos += len;
        Ok(&self.input[start..self.pos])
    }

    /// Trim whitespace, consume one optional `,`, then trim whitespace
    /// again. Trailing commas are rejected in checked mode.
    pub fn clean_tail(&mut self) -> Result<()> {
        self.trim_left();
        if self.front() == Some(b',') {
            self.pos += 1;
            self.trim_left();
            if self.options.checked && matches!(self.front(), Some(b'}' | b']')) {
                return Err(Error::new(
                    ErrorKind::UnexpectedBracketing,
                    self.pos,
                    "trailing comma before closing bracket",
                ));
            }
        }
        Ok(())
    }

    fn skipper(&self) -> Box<dyn Skipper + Send + Sync> {
        select_skipper(self.options.exec_mode)
    }
}
