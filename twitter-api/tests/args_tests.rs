use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use twitter_api::args::flatten;
use twitter_api::batch::chunk_params;
use twitter_api::merge::{merge_users, with_user};
use twitter_api::{args, ApiError, Arg, Arguments, ClientConfig, Params};

fn params(value: serde_json::Value) -> Params {
    value.as_object().cloned().unwrap()
}

// ── Arguments ───────────────────────────────────────────────────

#[test]
fn trailing_options_are_split_off() {
    let mut arguments = Arguments::new(args!["sferik", "presidents", params(json!({"count": 5}))]);

    assert_eq!(arguments.len(), 2);
    assert_eq!(arguments.options(), &params(json!({"count": 5})));
    assert!(matches!(arguments.pop(), Some(Arg::Name(name)) if name == "presidents"));
    assert_eq!(arguments.take_options(), params(json!({"count": 5})));
    assert!(arguments.options().is_empty());
}

#[test]
fn options_are_only_taken_from_the_end() {
    let arguments = Arguments::new(args![params(json!({"count": 5})), "presidents"]);

    assert_eq!(arguments.len(), 2);
    assert!(arguments.options().is_empty());
}

#[test]
fn nested_collections_flatten_in_order() {
    let flat = flatten(args![1u64, vec![Arg::from("a"), Arg::from(vec![2u64, 3u64])], "b"]);

    let rendered: Vec<String> = flat
        .iter()
        .map(|arg| match arg {
            Arg::Id(id) => id.to_string(),
            Arg::Name(name) => name.clone(),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(rendered, vec!["1", "a", "2", "3", "b"]);
}

// ── Merging ─────────────────────────────────────────────────────

#[test]
fn merge_users_keeps_explicit_keys() {
    let base = params(json!({"screen_name": "explicit"}));

    let merged = merge_users(&base, &args![1u64, "ignored", 2u64]).unwrap();

    assert_eq!(merged, params(json!({"user_id": "1,2", "screen_name": "explicit"})));
}

#[test]
fn merge_users_rejects_lists_of_options() {
    let err = merge_users(&Params::new(), &args![params(json!({}))]).unwrap_err();

    assert!(matches!(err, ApiError::InvalidArguments(_)));
}

#[test]
fn with_user_copies_the_params() {
    let base = params(json!({"include_entities": true}));

    let merged = with_user(&base, Arg::from("sferik")).unwrap();

    assert_eq!(merged.get("screen_name"), Some(&json!("sferik")));
    assert_eq!(base.get("screen_name"), None);
}

// ── Configuration ───────────────────────────────────────────────

#[test]
fn config_defaults() {
    let config = ClientConfig::default();

    assert_eq!(config.max_users_per_request, 100);
    assert!(!config.identity_map);
}

#[test]
fn partial_config_fills_in_defaults() {
    let empty: ClientConfig = serde_json::from_value(json!({})).unwrap();
    assert_eq!(empty, ClientConfig::default());

    let config: ClientConfig = serde_json::from_value(json!({"identity_map": true})).unwrap();

    assert_eq!(
        config,
        ClientConfig {
            identity_map: true,
            ..ClientConfig::default()
        }
    );
}

// ── Chunking ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn chunks_cover_every_member_once(count in 1usize..400, chunk_size in 1usize..150) {
        let members: Vec<Arg> = (1..=count as u64).map(Arg::from).collect();

        let chunks = chunk_params(&Params::new(), &members, chunk_size).unwrap();

        prop_assert_eq!(chunks.len(), count.div_ceil(chunk_size));
        let mut seen = Vec::new();
        for chunk in &chunks {
            let ids = chunk["user_id"].as_str().unwrap();
            let ids: Vec<u64> = ids.split(',').map(|id| id.parse().unwrap()).collect();
            prop_assert!(ids.len() <= chunk_size);
            seen.extend(ids);
        }
        prop_assert_eq!(seen, (1..=count as u64).collect::<Vec<_>>());
    }
}
