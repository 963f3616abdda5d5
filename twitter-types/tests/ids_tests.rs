use serde_json::json;
use std::collections::HashSet;
use twitter_types::Id;

#[test]
fn id_from_numeric_value() {
    assert_eq!(Id::from_value(&json!(7505382)), Some(Id::Num(7505382)));
}

#[test]
fn id_from_string_value() {
    assert_eq!(
        Id::from_value(&json!("247f43d441defc03")),
        Some(Id::Str("247f43d441defc03".into()))
    );
}

#[test]
fn id_rejects_other_values() {
    assert_eq!(Id::from_value(&json!(null)), None);
    assert_eq!(Id::from_value(&json!("")), None);
    assert_eq!(Id::from_value(&json!(-1)), None);
    assert_eq!(Id::from_value(&json!({"id": 1})), None);
}

#[test]
fn id_display() {
    assert_eq!(Id::from(42u64).to_string(), "42");
    assert_eq!(Id::from("abc").to_string(), "abc");
}

#[test]
fn id_as_u64() {
    assert_eq!(Id::from(42u64).as_u64(), Some(42));
    assert_eq!(Id::from("abc").as_u64(), None);
}

#[test]
fn id_hash_and_eq() {
    let mut set = HashSet::new();
    set.insert(Id::from(1u64));
    set.insert(Id::from(1u64));
    set.insert(Id::from("1"));
    assert_eq!(set.len(), 2);
}

#[test]
fn id_serde_untagged() {
    assert_eq!(serde_json::to_value(Id::from(5u64)).unwrap(), json!(5));
    let id: Id = serde_json::from_value(json!("abc")).unwrap();
    assert_eq!(id, Id::from("abc"));
}
