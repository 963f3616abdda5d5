//! Property-based tests for the attribute store.

use proptest::prelude::*;
use serde_json::{Map, Value};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use twitter_types::Attrs;

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::String),
    ]
}

fn mapping() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map("[a-z_]{1,6}", leaf(), 0..8)
        .prop_map(|m| m.into_iter().collect())
}

fn hash_of(a: &Attrs) -> u64 {
    let mut h = DefaultHasher::new();
    a.hash(&mut h);
    h.finish()
}

proptest! {
    /// Clones are equal and hash identically.
    #[test]
    fn clone_is_equal_and_hash_stable(map in mapping()) {
        let a = Attrs::from(map);
        let b = a.clone();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(hash_of(&a), hash_of(&b));
        prop_assert_eq!(a.canonical(), b.canonical());
    }

    /// Equal canonical forms imply equal mappings.
    #[test]
    fn canonical_matches_equality(x in mapping(), y in mapping()) {
        let a = Attrs::from(x);
        let b = Attrs::from(y);
        prop_assert_eq!(a == b, a.canonical() == b.canonical());
    }
}
