// SPDX-License-Identifier: MIT OR Apache-2.0
//! Minimal witnesses for the `ErrorKind` variants not already exercised by
//! `scenarios.rs` or `properties.rs`: `InvalidString`, `InvalidBoolean`,
//! `InvalidClass`, `UnexpectedBracketing`, `InvalidPath`, and `TypeMismatch`.

use locant::{ErrorKind, JsonSchema};

#[derive(JsonSchema, Debug)]
struct Labeled {
    label: String,
}

#[test]
fn unquoted_string_member_is_invalid_string() {
    let err = locant::from_json::<Labeled>(br#"{"label":5}"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidString);
}

#[test]
fn non_literal_bool_member_is_invalid_boolean() {
    #[derive(JsonSchema, Debug)]
    struct Flag {
        active: bool,
    }
    let err = locant::from_json::<Flag>(br#"{"active":"yes"}"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidBoolean);
}

#[test]
fn top_level_array_for_a_class_schema_is_invalid_class() {
    let err = locant::from_json::<Labeled>(b"[1,2,3]").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidClass);
}

#[test]
fn unclosed_nested_bracket_is_unexpected_bracketing() {
    #[derive(JsonSchema, Debug)]
    struct Wrapper {
        values: Vec<i32>,
    }
    let err = locant::from_json::<Wrapper>(br#"{"values":[1,2"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedBracketing);
}

#[test]
fn unresolvable_path_segment_is_invalid_path() {
    let err = locant::from_json_at::<Labeled>(br#"{"label":"x"}"#, "missing.nested").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidPath);
}

#[test]
fn unrecognized_timestamp_shape_is_type_mismatch() {
    #[derive(JsonSchema, Debug)]
    struct Event {
        at: locant::Timestamp,
    }
    let err = locant::from_json::<Event>(br#"{"at":"not a timestamp"}"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::TypeMismatch);
}
