//! The class parser: discovers a JSON object's members in one forward
//! pass, then hands the resulting `ClassLocations` to the derived
//! `JsonSchema::parse`.

use crate::error::{Error, ErrorKind, Result};
use crate::hash::name_hash;
use crate::locations::{ClassLocations, LocationsTable};
use crate::name::scan_member_name;
use crate::policy::ParseOptions;
use crate::schema::{JsonSchema, MemberMeta};
use crate::slice::ValueSlice;
use crate::state::ParseState;
use crate::value::JsonValue;

/// Parse a `{...}` value slice into `T`.
///
/// Used by `#[derive(JsonSchema)]`'s generated `JsonValue` impl (tagged
/// `Class`) for every nested object member, and by `from_json` at the top
/// level. A single forward scan locates every member directly at its
/// schema position (see [`discover_positions`]); `T::parse` then reads each
/// position once, in schema order, independent of the document's member
/// order.
#[tracing::instrument(level = "debug", skip_all, fields(offset = slice.offset))]
pub fn parse_class<T: JsonSchema>(slice: ValueSlice<'_>, options: ParseOptions) -> Result<T> {
    let bytes = slice.bytes();
    if bytes.first() != Some(&b'{') {
        return Err(Error::new(
            ErrorKind::InvalidClass,
            slice.offset,
            "expected an object starting with '{'",
        ));
    }
    let locations = discover_positions::<T>(bytes, slice.offset, options)?;
    T::parse(&locations, options)
}

/// One forward scan over an object's members (`bytes[0] == '{'`), resolving
/// each discovered name directly to its schema position in `T::MEMBERS` and
/// writing the value slice into that position -- spec.md §4.4/§4.5's
/// `find_name`/`find_class_member`, generalized so the single scan always
/// runs to the closing `}` rather than stopping as soon as the
/// currently-sought position is filled.
///
/// Stopping early (as the source's per-position `find_class_member<pos>`
/// loop does) would make an object-scan's outcome depend on *when* a
/// position was requested relative to where its last occurrence sits in the
/// document -- a duplicate key that reappears after the scan has already
/// moved on to a later field would never be visited, so "last occurrence
/// wins" (spec.md §8) would only hold for documents already close to schema
/// order. Running the single scan to completion keeps that property
/// universal while still visiting each JSON member exactly once and,
/// crucially, still making every `require`/`require_as_string` call an O(1)
/// array read afterward instead of the O(M) name-keyed lookup this replaces.
///
/// `expect`, a position cursor that only ever advances, implements the
/// actual optimization spec.md §4.4 names `start_pos` for: a document
/// already in schema order resolves every member with a single array
/// compare (`members[expect]`) rather than a full `MEMBERS` scan; only a
/// reordered or unknown member falls back to the linear search in
/// [`find_member_position`].
pub fn discover_positions<'a, T: JsonSchema>(
    bytes: &'a [u8],
    base_offset: usize,
    options: ParseOptions,
) -> Result<ClassLocations<'a>> {
    let members = T::MEMBERS;
    let mut table = ClassLocations::new(members.len(), base_offset);
    let mut state = ParseState::new(bytes, options);
    state.remove_prefix(1)?;
    state.trim_left();

    if state.front() == Some(b'}') {
        return Ok(table);
    }

    let mut expect = 0usize;

    loop {
        if state.empty() {
            return Err(Error::new(
                ErrorKind::UnexpectedEndOfStream,
                base_offset + bytes.len(),
                "object truncated before closing '}'",
            ));
        }
        let scanned = scan_member_name(state.remaining(), options.allow_escaped_names)?;
        let name = scanned.name;
        state.remove_prefix(scanned.consumed)?;

        let value_offset = base_offset + state.offset();
        let value_bytes = state.skip_value()?;

        match find_member_position(members, name_hash(name), name, expect) {
            Some(pos) => {
                table.set(pos, ValueSlice::new(value_bytes, value_offset));
                if pos == expect {
                    expect += 1;
                }
            }
            None if options.reject_unknown_members => {
                return Err(Error::new(
                    ErrorKind::UnknownMember,
                    value_offset,
                    format!("unknown member '{}'", String::from_utf8_lossy(name)),
                ));
            }
            None => {}
        }

        state.trim_left();
        match state.front() {
            Some(b',') => {
                state.remove_prefix(1)?;
                state.trim_left();
            }
            Some(b'}') => return Ok(table),
            _ => {
                return Err(Error::new(
                    ErrorKind::InvalidClass,
                    base_offset + state.offset(),
                    "expected ',' or '}' after member value",
                ));
            }
        }
    }
}

/// Resolve a discovered member name to its schema position: `members[expect]`
/// first (the `start_pos` fast path for a document already in schema
/// order), falling back to a full linear scan of `members` on a miss. The
/// fallback searches the *whole* schema, not just `[expect, N)`, so a
/// member appearing out of order still lands in its real position and a
/// later duplicate of an already-resolved member still overwrites it.
fn find_member_position(
    members: &'static [MemberMeta],
    hash: u32,
    name: &[u8],
    expect: usize,
) -> Option<usize> {
    if let Some(m) = members.get(expect) {
        if m.hash == hash && m.name.as_bytes() == name {
            return Some(expect);
        }
    }
    members
        .iter()
        .position(|m| m.hash == hash && m.name.as_bytes() == name)
}

/// One forward scan over an object's members (`bytes[0] == '{'`), recording
/// each member's name and raw value slice. Later occurrences of a repeated
/// key overwrite earlier ones (see `LocationsTable::insert`), matching
/// JSON's last-value-wins convention for duplicate object keys.
pub fn discover_locations<'a>(
    bytes: &'a [u8],
    base_offset: usize,
    options: ParseOptions,
) -> Result<LocationsTable<'a>> {
    let mut table = LocationsTable::new();
    let mut state = ParseState::new(bytes, options);
    state.remove_prefix(1)?;
    state.trim_left();

    if state.front() == Some(b'}') {
        return Ok(table);
    }

    loop {
        if state.empty() {
            return Err(Error::new(
                ErrorKind::UnexpectedEndOfStream,
                base_offset + bytes.len(),
                "object truncated before closing '}'",
            ));
        }
        let scanned = scan_member_name(state.remaining(), options.allow_escaped_names)?;
        let name = scanned.name;
        state.remove_prefix(scanned.consumed)?;

        let value_offset = base_offset + state.offset();
        let value_bytes = state.skip_value()?;
        table.insert(name, ValueSlice::new(value_bytes, value_offset));

        state.trim_left();
        match state.front() {
            Some(b',') => {
                state.remove_prefix(1)?;
                state.trim_left();
            }
            Some(b'}') => return Ok(table),
            _ => {
                return Err(Error::new(
                    ErrorKind::InvalidClass,
                    base_offset + state.offset(),
                    "expected ',' or '}' after member value",
                ));
            }
        }
    }
}

/// `true` for a slice holding exactly the two-byte quoted empty string
/// (`""`), the condition `#[locant(empty_is_null)]` checks for.
fn is_empty_string_literal(slice: ValueSlice<'_>) -> bool {
    slice.bytes() == b"\"\""
}

/// Resolve one member from a positioned locations table by its schema
/// position, an O(1) array read -- called once per field, in declaration
/// order, by the code `#[derive(JsonSchema)]` generates.
///
/// A non-nullable (`T::REQUIRED`) member with no recorded location is
/// `MissingMember` -- this is the null-on-non-nullable resolution: a
/// schema member whose type isn't `Option<_>` but whose JSON value is the
/// literal `null` is *not* treated as present-but-empty; it is rejected the
/// same as if the key were absent, since the constructor has no slot to
/// put a null into.
///
/// `empty_is_null` is `#[locant(empty_is_null)]`'s effect: a located value
/// that is exactly `""` is treated the same as an absent or `null` member,
/// routing it through the same null-constructor path as a genuinely missing
/// member rather than `T::from_slice`'s own handling of an empty string.
pub fn require<T: JsonValue>(
    locations: &ClassLocations<'_>,
    pos: usize,
    name: &str,
    options: ParseOptions,
    doc_offset: usize,
    empty_is_null: bool,
) -> Result<T> {
    let located = locations
        .get(pos)
        .filter(|slice| !(empty_is_null && is_empty_string_literal(*slice)));
    match located {
        Some(slice) if !(T::REQUIRED && slice.is_null_literal()) => T::from_slice(slice, options),
        Some(_) | None if T::REQUIRED => Err(Error::new(
            ErrorKind::MissingMember,
            doc_offset,
            format!("member '{name}' is required but was not present"),
        )),
        _ => T::from_slice(ValueSlice::missing(), options),
    }
}

/// As [`require`], for a member attributed `#[locant(as_string)]`: the JSON
/// value is a quoted string wrapping the literal (`"id_str": "12345"` for a
/// numeric field), so the surrounding quotes are stripped before handing
/// the inner bytes to `T::from_slice`. Supplements the base schema the
/// same way the tweet `id`/`id_str` pair does in the source corpus this
/// crate's schema model was generalized from.
pub fn require_as_string<T: JsonValue>(
    locations: &ClassLocations<'_>,
    pos: usize,
    name: &str,
    options: ParseOptions,
    doc_offset: usize,
    empty_is_null: bool,
) -> Result<T> {
    let located = locations
        .get(pos)
        .filter(|slice| !(empty_is_null && is_empty_string_literal(*slice)));
    match located {
        Some(slice) if !(T::REQUIRED && slice.is_null_literal()) => {
            T::from_slice(unwrap_quoted(slice), options)
        }
        Some(_) | None if T::REQUIRED => Err(Error::new(
            ErrorKind::MissingMember,
            doc_offset,
            format!("member '{name}' is required but was not present"),
        )),
        _ => T::from_slice(ValueSlice::missing(), options),
    }
}

fn unwrap_quoted(slice: ValueSlice<'_>) -> ValueSlice<'_> {
    let bytes = slice.bytes();
    if bytes.len() >= 2 && bytes.first() == Some(&b'"') && bytes.last() == Some(&b'"') {
        ValueSlice::with_escape_hint(&bytes[1..bytes.len() - 1], slice.has_escape(), slice.offset + 1)
    } else {
        slice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovers_flat_members_in_order() {
        let table = discover_locations(br#"{"a":1,"b":"two","c":[1,2]}"#, 0, ParseOptions::new())
            .unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.find(b"a").unwrap().bytes(), b"1");
        assert_eq!(table.find(b"b").unwrap().bytes(), br#""two""#);
        assert_eq!(table.find(b"c").unwrap().bytes(), b"[1,2]");
    }

    #[test]
    fn empty_object_has_no_members() {
        let table = discover_locations(b"{}", 0, ParseOptions::new()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn duplicate_key_keeps_last_value() {
        let table = discover_locations(br#"{"a":1,"a":2}"#, 0, ParseOptions::new()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.find(b"a").unwrap().bytes(), b"2");
    }

    #[test]
    fn rejects_truncated_object() {
        assert!(discover_locations(br#"{"a":1"#, 0, ParseOptions::new()).is_err());
    }

    /// A minimal hand-written schema for exercising `discover_positions` and
    /// position-based `require`/`require_as_string` without the derive macro
    /// (`locant-core` cannot depend on its own `locant-derive`).
    struct OneMember;

    impl JsonSchema for OneMember {
        const MEMBERS: &'static [MemberMeta] = &[MemberMeta {
            name: "a",
            hash: name_hash(b"a"),
        }];

        fn parse(_locations: &ClassLocations<'_>, _options: ParseOptions) -> Result<Self> {
            Ok(Self)
        }

        fn write(&self, _sink: &mut dyn crate::ser::Sink) -> std::fmt::Result {
            Ok(())
        }
    }

    struct IdStrMember;

    impl JsonSchema for IdStrMember {
        const MEMBERS: &'static [MemberMeta] = &[MemberMeta {
            name: "id_str",
            hash: name_hash(b"id_str"),
        }];

        fn parse(_locations: &ClassLocations<'_>, _options: ParseOptions) -> Result<Self> {
            Ok(Self)
        }

        fn write(&self, _sink: &mut dyn crate::ser::Sink) -> std::fmt::Result {
            Ok(())
        }
    }

    #[test]
    fn require_reports_missing_member() {
        let locations = discover_positions::<OneMember>(b"{}", 0, ParseOptions::new()).unwrap();
        let err = require::<i32>(&locations, 0, "a", ParseOptions::new(), 0, false).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingMember);
    }

    #[test]
    fn require_treats_null_on_required_member_as_missing() {
        let locations =
            discover_positions::<OneMember>(br#"{"a":null}"#, 0, ParseOptions::new()).unwrap();
        let err = require::<i32>(&locations, 0, "a", ParseOptions::new(), 0, false).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingMember);
    }

    #[test]
    fn require_as_string_strips_quotes_around_a_number() {
        let locations =
            discover_positions::<IdStrMember>(br#"{"id_str":"12345"}"#, 0, ParseOptions::new())
                .unwrap();
        let v = require_as_string::<u64>(&locations, 0, "id_str", ParseOptions::new(), 0, false)
            .unwrap();
        assert_eq!(v, 12345);
    }

    #[test]
    fn require_allows_null_on_optional_member() {
        let locations =
            discover_positions::<OneMember>(br#"{"a":null}"#, 0, ParseOptions::new()).unwrap();
        let v = require::<Option<i32>>(&locations, 0, "a", ParseOptions::new(), 0, false).unwrap();
        assert_eq!(v, None);
    }

    #[test]
    fn require_with_empty_is_null_routes_empty_string_to_the_null_constructor() {
        let locations =
            discover_positions::<OneMember>(br#"{"a":""}"#, 0, ParseOptions::new()).unwrap();
        let v = require::<Option<String>>(&locations, 0, "a", ParseOptions::new(), 0, true)
            .unwrap();
        assert_eq!(v, None);
    }

    #[test]
    fn require_without_empty_is_null_keeps_the_empty_string() {
        let locations =
            discover_positions::<OneMember>(br#"{"a":""}"#, 0, ParseOptions::new()).unwrap();
        let v = require::<Option<String>>(&locations, 0, "a", ParseOptions::new(), 0, false)
            .unwrap();
        assert_eq!(v, Some(String::new()));
    }

    #[test]
    fn discover_positions_resolves_out_of_order_members() {
        struct TwoMembers;
        impl JsonSchema for TwoMembers {
            const MEMBERS: &'static [MemberMeta] = &[
                MemberMeta {
                    name: "a",
                    hash: name_hash(b"a"),
                },
                MemberMeta {
                    name: "b",
                    hash: name_hash(b"b"),
                },
            ];
            fn parse(_locations: &ClassLocations<'_>, _options: ParseOptions) -> Result<Self> {
                Ok(Self)
            }
            fn write(&self, _sink: &mut dyn crate::ser::Sink) -> std::fmt::Result {
                Ok(())
            }
        }

        let locations =
            discover_positions::<TwoMembers>(br#"{"b":2,"a":1}"#, 0, ParseOptions::new()).unwrap();
        assert_eq!(locations.get(0).unwrap().bytes(), b"1");
        assert_eq!(locations.get(1).unwrap().bytes(), b"2");
    }

    #[test]
    fn discover_positions_keeps_last_occurrence_of_a_duplicate() {
        let locations =
            discover_positions::<OneMember>(br#"{"a":1,"a":2}"#, 0, ParseOptions::new()).unwrap();
        assert_eq!(locations.get(0).unwrap().bytes(), b"2");
    }
}
