use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use twitter_model::{
    Context, Entity, EntityCache, Error, IdentityKey, IdentityMap, Identified, Tweet, User,
};
use twitter_types::{Attrs, Id};

fn attrs(value: Value) -> Attrs {
    Attrs::from_value(value, "attrs").unwrap()
}

fn enabled() -> (Arc<IdentityMap>, Context) {
    let map = Arc::new(IdentityMap::new());
    let ctx = Context::new(map.clone());
    (map, ctx)
}

// ── fetch_or_construct ───────────────────────────────────────────

#[test]
fn same_id_returns_same_instance() {
    let (_, ctx) = enabled();
    let first: Arc<Tweet> = ctx
        .fetch_or_construct(attrs(json!({"id": 1, "text": "first"})))
        .unwrap();
    let second: Arc<Tweet> = ctx
        .fetch_or_construct(attrs(json!({"id": 1, "text": "second"})))
        .unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn existing_instance_wins_over_fresh_attrs() {
    let (_, ctx) = enabled();
    let _: Arc<Tweet> = ctx
        .fetch_or_construct(attrs(json!({"id": 1, "text": "first"})))
        .unwrap();
    let again: Arc<Tweet> = ctx
        .fetch_or_construct(attrs(json!({"id": 1, "text": "second"})))
        .unwrap();
    assert_eq!(again.text(), Some("first"));
}

#[test]
fn different_ids_are_different_instances() {
    let (map, ctx) = enabled();
    let a: Arc<User> = ctx.fetch_or_construct(attrs(json!({"id": 1}))).unwrap();
    let b: Arc<User> = ctx.fetch_or_construct(attrs(json!({"id": 2}))).unwrap();
    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(map.len(), 2);
}

#[test]
fn map_is_partitioned_by_type() {
    let (map, ctx) = enabled();
    let user: Arc<User> = ctx.fetch_or_construct(attrs(json!({"id": 1}))).unwrap();
    let tweet: Arc<Tweet> = ctx.fetch_or_construct(attrs(json!({"id": 1}))).unwrap();
    assert_eq!(user.id(), tweet.id());
    assert_eq!(map.len(), 2);
}

#[test]
fn disabled_map_constructs_fresh_instances() {
    let map = Arc::new(IdentityMap::disabled());
    let ctx = Context::new(map.clone());
    let a: Arc<User> = ctx.fetch_or_construct(attrs(json!({"id": 1}))).unwrap();
    let b: Arc<User> = ctx.fetch_or_construct(attrs(json!({"id": 1}))).unwrap();
    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(*a, *b);
    assert!(map.is_empty());
}

#[test]
fn uncached_context_never_deduplicates() {
    let ctx = Context::uncached();
    assert!(!ctx.is_caching());
    let a: Arc<User> = ctx.fetch_or_construct(attrs(json!({"id": 1}))).unwrap();
    let b: Arc<User> = ctx.fetch_or_construct(attrs(json!({"id": 1}))).unwrap();
    assert!(!Arc::ptr_eq(&a, &b));
}

#[test]
fn construction_errors_are_not_cached() {
    let (map, ctx) = enabled();
    let err = ctx
        .fetch_or_construct::<User>(attrs(json!({"name": "no id"})))
        .unwrap_err();
    assert!(matches!(err, Error::Construction { ref key } if key == "id"));
    assert!(map.is_empty());
}

#[test]
fn attribute_keyed_entities_deduplicate_on_whole_mapping() {
    let (_, ctx) = enabled();
    let a: Arc<twitter_model::Trend> = ctx
        .fetch_or_construct(attrs(json!({"name": "#rust", "query": "q"})))
        .unwrap();
    let b: Arc<twitter_model::Trend> = ctx
        .fetch_or_construct(attrs(json!({"name": "#rust", "query": "q"})))
        .unwrap();
    let c: Arc<twitter_model::Trend> = ctx
        .fetch_or_construct(attrs(json!({"name": "#rust", "query": "other"})))
        .unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(*a, *c);
}

#[test]
fn fetch_or_construct_value_maps_null_to_none() {
    let (_, ctx) = enabled();
    let none: Option<Arc<User>> = ctx.fetch_or_construct_value(&Value::Null).unwrap();
    assert!(none.is_none());
    let err = ctx
        .fetch_or_construct_value::<User>(&json!([1, 2]))
        .unwrap_err();
    assert!(matches!(err, Error::Construction { .. }));
}

// ── fetch / store ────────────────────────────────────────────────

#[test]
fn fetch_miss_while_enabled_is_an_error() {
    let (_, ctx) = enabled();
    let err = ctx.fetch_id::<User>(42u64).unwrap_err();
    match err {
        Error::IdentityMapMiss { kind, key } => {
            assert_eq!(kind, "User");
            assert_eq!(key, "42");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn fetch_while_disabled_reports_nothing() {
    let ctx = Context::new(Arc::new(IdentityMap::disabled()));
    assert!(ctx.fetch_id::<User>(42u64).unwrap().is_none());
}

#[test]
fn store_returns_the_same_instance() {
    let (map, ctx) = enabled();
    let user = Arc::new(ctx.construct::<User>(attrs(json!({"id": 7}))).unwrap());
    let stored = ctx.store(user.clone());
    assert!(Arc::ptr_eq(&user, &stored));
    assert_eq!(map.len(), 1);

    let fetched = ctx.fetch_id::<User>(7u64).unwrap().unwrap();
    assert!(Arc::ptr_eq(&user, &fetched));
}

#[test]
fn store_overwrites_existing_entry() {
    let (_, ctx) = enabled();
    let old = ctx.store(Arc::new(ctx.construct::<User>(attrs(json!({"id": 7, "name": "old"}))).unwrap()));
    let new = ctx.store(Arc::new(ctx.construct::<User>(attrs(json!({"id": 7, "name": "new"}))).unwrap()));
    let fetched = ctx.fetch_id::<User>(7u64).unwrap().unwrap();
    assert!(Arc::ptr_eq(&new, &fetched));
    assert!(!Arc::ptr_eq(&old, &fetched));
}

#[test]
fn store_is_a_passthrough_while_disabled() {
    let map = Arc::new(IdentityMap::disabled());
    let ctx = Context::new(map.clone());
    let user = Arc::new(ctx.construct::<User>(attrs(json!({"id": 7}))).unwrap());
    let stored = ctx.store(user.clone());
    assert!(Arc::ptr_eq(&user, &stored));
    assert!(map.is_empty());
}

#[test]
fn fetch_by_identity_key() {
    let (_, ctx) = enabled();
    let user: Arc<User> = ctx.fetch_or_construct(attrs(json!({"id": 9}))).unwrap();
    let key = user.identity_key().unwrap();
    assert_eq!(key, IdentityKey::Id(Id::Num(9)));
    let fetched = ctx.fetch::<User>(&key).unwrap().unwrap();
    assert!(Arc::ptr_eq(&user, &fetched));
}

// ── Toggling ─────────────────────────────────────────────────────

#[test]
fn disable_is_not_retroactive() {
    let (map, ctx) = enabled();
    let user: Arc<User> = ctx.fetch_or_construct(attrs(json!({"id": 3}))).unwrap();

    map.disable();
    assert!(ctx.fetch_id::<User>(3u64).unwrap().is_none());
    assert_eq!(map.len(), 1);

    map.enable();
    let fetched = ctx.fetch_id::<User>(3u64).unwrap().unwrap();
    assert!(Arc::ptr_eq(&user, &fetched));
}

#[test]
fn clear_drops_every_entry() {
    let (map, ctx) = enabled();
    let user: Arc<User> = ctx.fetch_or_construct(attrs(json!({"id": 3}))).unwrap();
    map.clear();
    assert!(map.is_empty());
    assert!(ctx.fetch_id::<User>(3u64).is_err());
    // Existing references stay valid.
    assert_eq!(user.id(), &Id::Num(3));
}

#[test]
fn global_map_starts_disabled() {
    let global = IdentityMap::global();
    assert!(!global.is_enabled());
    assert!(Arc::ptr_eq(&global, &IdentityMap::global()));
    assert!(!Context::default().is_caching());
}

// ── Lifetimes ────────────────────────────────────────────────────

#[test]
fn map_is_freed_once_its_contexts_are_dropped() {
    let (map, ctx) = enabled();
    let weak = Arc::downgrade(&map);
    let tweet: Arc<Tweet> = ctx
        .fetch_or_construct(attrs(json!({"id": 1, "user": {"id": 2}})))
        .unwrap();
    assert!(tweet.user().unwrap().is_some());
    assert_eq!(map.len(), 2);

    drop(map);
    drop(ctx);
    drop(tweet);
    assert!(weak.upgrade().is_none());
}

#[test]
fn entity_outliving_its_context_builds_children_uncached() {
    let (map, ctx) = enabled();
    let tweet: Arc<Tweet> = ctx
        .fetch_or_construct(attrs(json!({"id": 1, "user": {"id": 2}})))
        .unwrap();
    drop(ctx);
    drop(map);

    let user = tweet.user().unwrap().unwrap();
    assert_eq!(user.id(), &Id::Num(2));
}

// ── Concurrency ──────────────────────────────────────────────────

#[test]
fn concurrent_fetch_or_construct_converges_on_one_instance() {
    let (map, ctx) = enabled();
    let results: Vec<Arc<User>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let ctx = ctx.clone();
                scope.spawn(move || {
                    ctx.fetch_or_construct::<User>(attrs(json!({"id": 5, "n": i})))
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(map.len(), 1);
    let cached = ctx.fetch_id::<User>(5u64).unwrap().unwrap();
    for user in &results {
        assert!(Arc::ptr_eq(user, &cached));
    }
}
