//! Array parsing: a lazy, single-pass element iterator plus the `Vec<T>`
//! collector built on top of it.

use crate::error::{Error, ErrorKind, Result};
use crate::policy::ParseOptions;
use crate::skip::{select_skipper, Skipper};
use crate::slice::ValueSlice;
use crate::value::JsonValue;

/// A single forward pass over a JSON array's elements, yielding each
/// element's parsed value without materializing the raw slices of
/// elements not yet visited.
///
/// Used directly by callers who only need a prefix of a large array (see
/// `json_array_range` in the facade crate), and internally by
/// `parse_array` to build a `Vec<T>`.
pub struct ArrayIter<'a, T> {
    rest: &'a [u8],
    base_offset: usize,
    options: ParseOptions,
    done: bool,
    _marker: std::marker::PhantomData<T>,
}

impl<'a, T: JsonValue> ArrayIter<'a, T> {
    /// Build an iterator over `slice`, which must be a full `[...]` value.
    pub fn new(slice: ValueSlice<'a>, options: ParseOptions) -> Result<Self> {
        let bytes = slice.bytes();
        if bytes.first() != Some(&b'[') || bytes.last() != Some(&b']') {
            return Err(Error::new(
                ErrorKind::InvalidArray,
                slice.offset,
                "expected an array starting with '['",
            ));
        }
        let mut rest = &bytes[1..bytes.len() - 1];
        let base_offset = slice.offset + 1;
        let leading = crate::name::trim_left(rest);
        rest = &rest[leading..];
        Ok(Self {
            rest,
            base_offset: base_offset + leading,
            options,
            done: rest.is_empty(),
            _marker: std::marker::PhantomData,
        })
    }
}

impl<'a, T: JsonValue> Iterator for ArrayIter<'a, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if self.rest.first() == Some(&b',') {
            return Some(Err(Error::new(
                ErrorKind::InvalidArray,
                self.base_offset,
                "empty array element between commas",
            )));
        }

        let skipper = select_skipper(self.options.exec_mode);
        let len = match skipper.skip_value(self.rest) {
            Ok(len) => len,
            Err(err) => {
                self.done = true;
                return Some(Err(err));
            }
        };
        let element_bytes = &self.rest[..len];
        let element_offset = self.base_offset;
        let slice = ValueSlice::new(element_bytes, element_offset);

        let result = if T::REQUIRED && slice.is_null_literal() {
            Err(Error::new(
                ErrorKind::InvalidNull,
                element_offset,
                "array element is null but the element type is not optional",
            ))
        } else {
            T::from_slice(slice, self.options)
        };

        self.rest = &self.rest[len..];
        self.base_offset += len;
        let trimmed = crate::name::trim_left(self.rest);
        self.rest = &self.rest[trimmed..];
        self.base_offset += trimmed;

        if self.rest.first() == Some(&b',') {
            self.rest = &self.rest[1..];
            self.base_offset += 1;
            let trimmed = crate::name::trim_left(self.rest);
            self.rest = &self.rest[trimmed..];
            self.base_offset += trimmed;
            if self.rest.is_empty() {
                self.done = true;
                return Some(Err(Error::new(
                    ErrorKind::InvalidArray,
                    self.base_offset,
                    "trailing comma before closing ']'",
                )));
            }
        } else {
            self.done = true;
        }

        Some(result)
    }
}

/// Parse every element of a `[...]` value slice into a `Vec<T>`.
pub fn parse_array<T: JsonValue>(slice: ValueSlice<'_>, options: ParseOptions) -> Result<Vec<T>> {
    ArrayIter::new(slice, options)?.collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(bytes: &'static [u8]) -> ValueSlice<'static> {
        ValueSlice::new(bytes, 0)
    }

    #[test]
    fn parses_flat_integer_array() {
        let v: Vec<i32> = parse_array(slice(b"[1,2,3]"), ParseOptions::new()).unwrap();
        assert_eq!(v, vec![1, 2, 3]);
    }

    #[test]
    fn parses_empty_array() {
        let v: Vec<i32> = parse_array(slice(b"[]"), ParseOptions::new()).unwrap();
        assert!(v.is_empty());
    }

    #[test]
    fn rejects_empty_element_between_commas() {
        let err = parse_array::<i32>(slice(b"[1,,2]"), ParseOptions::new()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArray);
    }

    #[test]
    fn rejects_null_element_for_non_nullable_type() {
        let err = parse_array::<i32>(slice(b"[1,null,2]"), ParseOptions::new()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidNull);
    }

    #[test]
    fn allows_null_element_for_optional_type() {
        let v: Vec<Option<i32>> =
            parse_array(slice(b"[1,null,2]"), ParseOptions::new()).unwrap();
        assert_eq!(v, vec![Some(1), None, Some(2)]);
    }

    #[test]
    fn lazy_iterator_stops_after_first_n_without_erroring_on_later_garbage() {
        let iter = ArrayIter::<i32>::new(slice(b"[1,2,not-a-number]"), ParseOptions::new()).unwrap();
        let first_two: Vec<i32> = iter.take(2).map(std::result::Result::unwrap).collect();
        assert_eq!(first_two, vec![1, 2]);
    }
}
