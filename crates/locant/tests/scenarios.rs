// SPDX-License-Identifier: MIT OR Apache-2.0
//! The six concrete parsing scenarios this crate is specified against, one
//! test each, plus the unknown-member-tolerance and duplicate-last-wins
//! universal properties that don't need `proptest` to state directly.

use locant::{ErrorKind, JsonSchema, ParseOptions};

#[derive(JsonSchema, Debug, PartialEq)]
struct GeoPoint {
    lat: f64,
    lng: f64,
    name: Option<String>,
}

#[derive(JsonSchema, Debug, PartialEq)]
struct Tweet {
    #[locant(rename = "id_str", as_string)]
    id: u64,
    text: String,
}

#[derive(JsonSchema, Debug, PartialEq)]
struct Timeline {
    statuses: Vec<Tweet>,
}

#[test]
fn scenario_1_absent_optional_member_parses_as_none() {
    let point: GeoPoint = locant::from_json(br#"{"lat": 55.55, "lng": 12.34}"#).unwrap();
    assert_eq!(
        point,
        GeoPoint {
            lat: 55.55,
            lng: 12.34,
            name: None,
        }
    );
}

#[test]
fn scenario_2_quoted_number_without_as_string_is_invalid_number() {
    let err =
        locant::from_json::<GeoPoint>(br#"{"lat": "55.55", "lng": "12.34"}"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidNumber);
}

#[test]
fn scenario_3_missing_required_member_is_missing_member() {
    let err = locant::from_json::<GeoPoint>(br#"{"lng": 1.23}"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingMember);
}

#[test]
fn scenario_4_empty_array_element_is_invalid_array() {
    let err = locant::from_json_array::<i32>(b"[1,2,,3]").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidArray);
}

#[test]
fn scenario_5_null_element_for_non_nullable_type_is_invalid_null() {
    let err = locant::from_json_array::<i32>(b"[null]").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidNull);
}

#[test]
fn scenario_6_selective_array_range_finds_one_tweet_by_id() {
    let doc = br#"{"statuses":[{"id_str":"42","text":"hi"},{"id_str":"43","text":"yo"}]}"#;
    let mut iter = locant::json_array_range_at::<Tweet>(doc, "statuses").unwrap();
    let found = iter
        .find_map(|result| match result {
            Ok(tweet) if tweet.id == 43 => Some(tweet),
            _ => None,
        })
        .unwrap();
    assert_eq!(found.text, "yo");

    // Same document, parsed whole, agrees with the selective pass.
    let timeline: Timeline = locant::from_json(doc).unwrap();
    assert_eq!(timeline.statuses[1].id, 43);
    assert_eq!(timeline.statuses[1].text, "yo");
}

#[test]
fn duplicate_last_wins_for_repeated_member() {
    let point: GeoPoint = locant::from_json(br#"{"lat":1.0,"lng":0.0,"lat":2.0}"#).unwrap();
    assert_eq!(point.lat, 2.0);
}

#[test]
fn unknown_members_are_tolerated_in_default_mode() {
    let point: GeoPoint =
        locant::from_json(br#"{"lat":1.0,"lng":2.0,"extra":{"nested":true}}"#).unwrap();
    assert_eq!(point.lat, 1.0);
    assert_eq!(point.lng, 2.0);
}

#[test]
fn unknown_members_are_rejected_when_configured_strict() {
    let options = ParseOptions::new().strict_members();
    let err = locant::from_json_with::<GeoPoint>(br#"{"lat":1.0,"lng":2.0,"extra":1}"#, options)
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownMember);
}

#[test]
fn as_string_round_trips_symmetrically() {
    let tweet = Tweet {
        id: 43,
        text: "yo".to_string(),
    };
    let text = locant::to_json(&tweet);
    assert!(text.contains(r#""id_str":"43""#));
    let reparsed: Tweet = locant::from_json(text.as_bytes()).unwrap();
    assert_eq!(tweet, reparsed);
}

#[derive(JsonSchema, Debug, PartialEq)]
struct Note {
    #[locant(empty_is_null)]
    body: Option<String>,
}

#[test]
fn empty_is_null_treats_an_empty_string_as_absent() {
    let note: Note = locant::from_json(br#"{"body":""}"#).unwrap();
    assert_eq!(note, Note { body: None });
}

#[test]
fn empty_is_null_still_parses_a_non_empty_string() {
    let note: Note = locant::from_json(br#"{"body":"hello"}"#).unwrap();
    assert_eq!(
        note,
        Note {
            body: Some("hello".to_string())
        }
    );
}
