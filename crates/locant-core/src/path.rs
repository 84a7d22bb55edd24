//! The path navigator: resolves a dotted, array-indexed path expression
//! (`"features[0].geometry"`) against a document without building a DOM.

use crate::class::discover_locations;
use crate::error::{Error, ErrorKind, Result};
use crate::policy::ParseOptions;
use crate::skip::{select_skipper, Skipper};
use crate::slice::ValueSlice;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Member(&'a str),
    Index(usize),
}

fn parse_segments(path: &str) -> Result<Vec<Segment<'_>>> {
    let mut segments = Vec::new();
    for dotted in path.split('.') {
        if dotted.is_empty() {
            return Err(Error::new(ErrorKind::InvalidPath, 0, "empty path segment"));
        }
        let mut rest = dotted;
        if let Some(bracket) = rest.find('[') {
            let name = &rest[..bracket];
            if !name.is_empty() {
                segments.push(Segment::Member(name));
            }
            rest = &rest[bracket..];
            while let Some(stripped) = rest.strip_prefix('[') {
                let close = stripped.find(']').ok_or_else(|| {
                    Error::new(ErrorKind::InvalidPath, 0, "unterminated '[' in path")
                })?;
                let index_text = &stripped[..close];
                let index: usize = index_text.parse().map_err(|_| {
                    Error::new(
                        ErrorKind::InvalidPath,
                        0,
                        format!("'{index_text}' is not a valid array index"),
                    )
                })?;
                segments.push(Segment::Index(index));
                rest = &stripped[close + 1..];
            }
            if !rest.is_empty() {
                return Err(Error::new(
                    ErrorKind::InvalidPath,
                    0,
                    "unexpected trailing characters after ']'",
                ));
            }
        } else {
            segments.push(Segment::Member(rest));
        }
    }
    Ok(segments)
}

/// Resolve `path` (e.g. `"features[0].geometry.coordinates[1]"`) against
/// `root`, returning the final segment's raw value slice.
///
/// Each member lookup re-scans only the object it's currently inside (via
/// `class::discover_locations`), and each index lookup walks the target
/// array's elements one at a time -- neither builds a table for the whole
/// document, since a path expression only ever needs one branch of it.
pub fn navigate<'a>(
    root: ValueSlice<'a>,
    path: &str,
    options: ParseOptions,
) -> Result<ValueSlice<'a>> {
    let segments = parse_segments(path)?;
    let mut current = root;
    for segment in segments {
        current = match segment {
            Segment::Member(name) => step_into_member(current, name, options)?,
            Segment::Index(index) => step_into_index(current, index, options)?,
        };
    }
    Ok(current)
}

fn step_into_member<'a>(
    current: ValueSlice<'a>,
    name: &str,
    options: ParseOptions,
) -> Result<ValueSlice<'a>> {
    let bytes = current.bytes();
    if bytes.first() != Some(&b'{') {
        return Err(Error::new(
            ErrorKind::InvalidPath,
            current.offset,
            format!("cannot navigate into member '{name}' of a non-object value"),
        ));
    }
    let locations = discover_locations(bytes, current.offset, options)?;
    locations.find(name.as_bytes()).ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidPath,
            current.offset,
            format!("member '{name}' not found"),
        )
    })
}

fn step_into_index<'a>(
    current: ValueSlice<'a>,
    index: usize,
    options: ParseOptions,
) -> Result<ValueSlice<'a>> {
    let bytes = current.bytes();
    if bytes.first() != Some(&b'[') || bytes.last() != Some(&b']') {
        return Err(Error::new(
            ErrorKind::InvalidPath,
            current.offset,
            "cannot index into a non-array value",
        ));
    }
    let mut rest = &bytes[1..bytes.len() - 1];
    let mut offset = current.offset + 1;
    let leading = crate::name::trim_left(rest);
    rest = &rest[leading..];
    offset += leading;

    let skipper = select_skipper(options.exec_mode);
    let mut seen = 0usize;
    while !rest.is_empty() {
        let len = skipper.skip_value(rest)?;
        if seen == index {
            return Ok(ValueSlice::new(&rest[..len], offset));
        }
        rest = &rest[len..];
        offset += len;
        let trimmed = crate::name::trim_left(rest);
        rest = &rest[trimmed..];
        offset += trimmed;
        if rest.first() == Some(&b',') {
            rest = &rest[1..];
            offset += 1;
            let trimmed = crate::name::trim_left(rest);
            rest = &rest[trimmed..];
            offset += trimmed;
        }
        seen += 1;
    }
    Err(Error::new(
        ErrorKind::InvalidPath,
        current.offset,
        format!("array index {index} out of range ({seen} elements)"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigates_member_then_index() {
        let root = ValueSlice::new(br#"{"features":[{"geometry":{"type":"Point"}}]}"#, 0);
        let result = navigate(root, "features[0].geometry", ParseOptions::new()).unwrap();
        assert_eq!(result.bytes(), br#"{"type":"Point"}"#);
    }

    #[test]
    fn reports_missing_member() {
        let root = ValueSlice::new(br#"{"a":1}"#, 0);
        assert!(navigate(root, "b", ParseOptions::new()).is_err());
    }

    #[test]
    fn reports_out_of_range_index() {
        let root = ValueSlice::new(b"[1,2,3]", 0);
        assert!(navigate(root, "[5]", ParseOptions::new()).is_err());
    }

    #[test]
    fn navigates_plain_index_without_leading_member() {
        let root = ValueSlice::new(b"[10,20,30]", 0);
        let result = navigate(root, "[1]", ParseOptions::new()).unwrap();
        assert_eq!(result.bytes(), b"20");
    }
}
