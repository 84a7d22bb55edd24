// SPDX-License-Identifier: MIT OR Apache-2.0
//! The universal properties from spec §8: round-trip, skipper idempotence,
//! order-independence, duplicate-last-wins, unknown-member tolerance, and
//! checked/unchecked non-crash, stated with `proptest` rather than fixed
//! examples wherever the property is genuinely about arbitrary input.

use locant::{ExecMode, JsonSchema, ParseOptions};
use proptest::prelude::*;

#[derive(JsonSchema, Debug, Clone, PartialEq)]
struct Sample {
    a: i64,
    b: f64,
    c: String,
    d: Option<i32>,
}

fn arb_sample() -> impl Strategy<Value = Sample> {
    (
        any::<i64>(),
        // Stay within f64's round-trippable-through-ryu range and avoid
        // NaN/infinity, which `to_json` deliberately maps to the single
        // literal "null" and so can never round-trip.
        -1.0e12_f64..1.0e12_f64,
        "[a-zA-Z0-9 ]{0,24}",
        proptest::option::of(any::<i32>()),
    )
        .prop_map(|(a, b, c, d)| Sample { a, b, c, d })
}

proptest! {
    #[test]
    fn round_trip_through_json(sample in arb_sample()) {
        let text = locant::to_json(&sample);
        let parsed: Sample = locant::from_json(text.as_bytes()).unwrap();
        prop_assert_eq!(sample, parsed);
    }

    #[test]
    fn skipper_is_idempotent_over_a_concatenation_of_values(values in proptest::collection::vec(any::<i32>(), 1..8)) {
        let joined = values
            .iter()
            .map(std::string::ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let array_text = format!("[{joined}]");
        let parsed: Vec<i32> = locant::from_json_array(array_text.as_bytes()).unwrap();
        prop_assert_eq!(parsed, values);
    }

    #[test]
    fn member_order_does_not_affect_the_parsed_value(a in any::<i64>(), b in -1.0e9_f64..1.0e9_f64) {
        let forward = format!(r#"{{"a":{a},"b":{b},"c":"x","d":null}}"#);
        let backward = format!(r#"{{"d":null,"c":"x","b":{b},"a":{a}}}"#);
        let forward: Sample = locant::from_json(forward.as_bytes()).unwrap();
        let backward: Sample = locant::from_json(backward.as_bytes()).unwrap();
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn duplicate_key_binds_to_the_last_occurrence(first in any::<i64>(), second in any::<i64>()) {
        let doc = format!(r#"{{"a":{first},"a":{second},"b":0.0,"c":"x","d":null}}"#);
        let sample: Sample = locant::from_json(doc.as_bytes()).unwrap();
        prop_assert_eq!(sample.a, second);
    }

    #[test]
    fn unrecognized_members_do_not_change_the_parsed_value(extra in "[a-z]{1,8}") {
        prop_assume!(extra != "a" && extra != "b" && extra != "c" && extra != "d");
        let base: Sample = locant::from_json(br#"{"a":1,"b":2.0,"c":"x","d":null}"#).unwrap();
        let doc = format!(r#"{{"a":1,"b":2.0,"c":"x","d":null,"{extra}":true}}"#);
        let with_extra: Sample = locant::from_json(doc.as_bytes()).unwrap();
        prop_assert_eq!(base, with_extra);
    }

    #[test]
    fn checked_and_unchecked_modes_agree_on_well_formed_input(sample in arb_sample()) {
        let text = locant::to_json(&sample);
        let checked: Sample = locant::from_json(text.as_bytes()).unwrap();
        let unchecked: Sample = locant::from_json_with(
            text.as_bytes(),
            ParseOptions::new().unchecked(),
        )
        .unwrap();
        prop_assert_eq!(checked, unchecked);
    }

    #[test]
    fn scalar_and_runtime_exec_modes_agree(sample in arb_sample()) {
        let text = locant::to_json(&sample);
        let scalar: Sample = locant::from_json_with(
            text.as_bytes(),
            ParseOptions::new().with_exec_mode(ExecMode::ScalarOnly),
        )
        .unwrap();
        let runtime: Sample = locant::from_json_with(
            text.as_bytes(),
            ParseOptions::new().with_exec_mode(ExecMode::Runtime),
        )
        .unwrap();
        prop_assert_eq!(scalar, runtime);
    }
}

#[test]
fn every_error_kind_has_at_least_one_minimal_witness() {
    use locant::ErrorKind;

    #[derive(JsonSchema, Debug)]
    struct Pair {
        a: i32,
        b: i32,
    }

    let cases: &[(&[u8], ErrorKind)] = &[
        (b"{\"a\":1", ErrorKind::UnexpectedEndOfStream),
        (b"{\"a\":1,\"b\":2,\"c\":3}", ErrorKind::UnknownMember),
        (b"{\"a\":1}", ErrorKind::MissingMember),
        (b"{\"a\":999999999999999999999,\"b\":1}", ErrorKind::NumberOutOfRange),
        (b"{\"a\":01,\"b\":1}", ErrorKind::InvalidNumber),
        (b"[1,,2]", ErrorKind::InvalidArray),
        (b"{\"a\":1,\"b\":null}", ErrorKind::MissingMember),
    ];

    for (doc, expected) in cases {
        let result = if *expected == ErrorKind::InvalidArray {
            locant::from_json_array::<i32>(doc).map(|_| ()).map_err(|e| e.kind)
        } else {
            let options = if *expected == ErrorKind::UnknownMember {
                ParseOptions::new().strict_members()
            } else {
                ParseOptions::new()
            };
            locant::from_json_with::<Pair>(doc, options)
                .map(|_| ())
                .map_err(|e| e.kind)
        };
        assert_eq!(result, Err(*expected), "doc = {:?}", String::from_utf8_lossy(doc));
    }
}
