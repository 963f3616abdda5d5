use chrono::{Datelike, Timelike};
use serde_json::json;
use twitter_types::{created_at, parse_created_at, Attrs, Error};

#[test]
fn parses_rest_api_format() {
    let t = parse_created_at("Mon Jul 16 12:59:01 +0000 2007").unwrap();
    assert_eq!((t.year(), t.month(), t.day()), (2007, 7, 16));
    assert_eq!((t.hour(), t.minute(), t.second()), (12, 59, 1));
}

#[test]
fn normalizes_offsets_to_utc() {
    let t = parse_created_at("Mon Jul 16 12:59:01 +0200 2007").unwrap();
    assert_eq!(t.hour(), 10);
}

#[test]
fn parses_rfc2822() {
    let t = parse_created_at("Wed, 18 Jul 2012 19:18:09 +0000").unwrap();
    assert_eq!(t.year(), 2012);
}

#[test]
fn parses_rfc3339() {
    let t = parse_created_at("2012-07-18T19:18:09Z").unwrap();
    assert_eq!(t.month(), 7);
}

#[test]
fn rejects_garbage() {
    let err = parse_created_at("yesterday").unwrap_err();
    assert!(matches!(err, Error::InvalidTimestamp(ref s) if s == "yesterday"));
}

#[test]
fn created_at_reads_attrs() {
    let attrs = Attrs::from_value(json!({"created_at": "Mon Jul 16 12:59:01 +0000 2007"}), "attrs").unwrap();
    assert_eq!(created_at(&attrs).map(|t| t.year()), Some(2007));
}

#[test]
fn created_at_absent_or_invalid_is_none() {
    let empty = Attrs::new();
    assert!(created_at(&empty).is_none());
    let bad = Attrs::from_value(json!({"created_at": "nope"}), "attrs").unwrap();
    assert!(created_at(&bad).is_none());
}
