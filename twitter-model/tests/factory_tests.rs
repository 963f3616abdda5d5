use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Value};
use std::sync::Arc;
use twitter_model::factory::{self, normalize};
use twitter_model::{Action, Context, Entity, Error, Geo, IdentityMap, Media};
use twitter_types::Attrs;

fn attrs(value: Value) -> Attrs {
    Attrs::from_value(value, "attrs").unwrap()
}

fn ctx() -> Context {
    Context::uncached()
}

// ── Normalization ────────────────────────────────────────────────

#[test]
fn normalize_merges_underscored_words() {
    assert_eq!(normalize("list_member_added"), "ListMemberAdded");
    assert_eq!(normalize("favorite"), "Favorite");
    assert_eq!(normalize("Point"), "Point");
}

#[test]
fn normalize_nests_path_segments() {
    assert_eq!(normalize("geo/point"), "Geo::Point");
    assert_eq!(normalize("media/photo"), "Media::Photo");
    assert_eq!(normalize("action/list_member_added"), "Action::ListMemberAdded");
}

// ── Action family ────────────────────────────────────────────────

#[test]
fn resolves_every_action_variant() {
    let cases = [
        ("favorite", "Action::Favorite"),
        ("follow", "Action::Follow"),
        ("list_member_added", "Action::ListMemberAdded"),
        ("mention", "Action::Mention"),
        ("reply", "Action::Reply"),
        ("retweet", "Action::Retweet"),
    ];
    for (discriminator, kind) in cases {
        let action: Action =
            factory::resolve(&ctx(), Some(attrs(json!({"action": discriminator})))).unwrap();
        let actual = match &action {
            Action::Favorite(_) => twitter_model::action::Favorite::KIND,
            Action::Follow(_) => twitter_model::action::Follow::KIND,
            Action::ListMemberAdded(_) => twitter_model::action::ListMemberAdded::KIND,
            Action::Mention(_) => twitter_model::action::Mention::KIND,
            Action::Reply(_) => twitter_model::action::Reply::KIND,
            Action::Retweet(_) => twitter_model::action::Retweet::KIND,
        };
        assert_eq!(actual, kind);
    }
}

#[test]
fn discriminator_is_removed_before_construction() {
    let action: Action = factory::resolve(
        &ctx(),
        Some(attrs(json!({"action": "list_member_added", "max_position": "1"}))),
    )
    .unwrap();
    let Action::ListMemberAdded(added) = action else {
        panic!("expected ListMemberAdded");
    };
    assert!(!added.attrs().contains("action"));
    assert_eq!(added.max_position(), Some(1));
}

#[test]
fn missing_discriminator_is_a_construction_error() {
    for input in [None, Some(Attrs::new()), Some(attrs(json!({"sources": []})))] {
        let err = factory::resolve::<Action>(&ctx(), input).unwrap_err();
        assert!(matches!(err, Error::Construction { ref key } if key == "action"));
    }
}

#[test]
fn null_discriminator_fails_like_a_missing_one() {
    let err = factory::resolve::<Geo>(&ctx(), Some(attrs(json!({"type": null})))).unwrap_err();
    assert_eq!(err.to_string(), "argument must have :type key");
}

#[test]
fn non_string_discriminator_fails() {
    let err = factory::resolve::<Geo>(&ctx(), Some(attrs(json!({"type": 3})))).unwrap_err();
    assert!(matches!(err, Error::Construction { .. }));
}

#[test]
fn unknown_variant_is_reported() {
    let err = factory::resolve::<Action>(&ctx(), Some(attrs(json!({"action": "block"}))))
        .unwrap_err();
    match err {
        Error::UnknownVariant { family, name } => {
            assert_eq!(family, "Action");
            assert_eq!(name, "Block");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn resolve_value_treats_non_objects_as_absent() {
    let err = factory::resolve_value::<Geo>(&ctx(), Some(&json!("Point"))).unwrap_err();
    assert!(matches!(err, Error::Construction { .. }));
    let err = factory::resolve_value::<Geo>(&ctx(), None).unwrap_err();
    assert!(matches!(err, Error::Construction { .. }));
}

#[test]
fn resolve_with_field_reads_another_key() {
    let geo: Geo =
        factory::resolve_with_field(&ctx(), "kind", Some(attrs(json!({"kind": "polygon"}))))
            .unwrap();
    assert!(geo.as_polygon().is_some());
}

// ── Geo family ───────────────────────────────────────────────────

#[test]
fn point_exposes_latitude_and_longitude() {
    let geo: Geo = factory::resolve(
        &ctx(),
        Some(attrs(json!({"type": "Point", "coordinates": [1.0, 2.0]}))),
    )
    .unwrap();
    let point = geo.as_point().unwrap();
    assert_eq!(point.latitude(), Some(1.0));
    assert_eq!(point.longitude(), Some(2.0));
    assert_eq!(point.lat_lng(), Some((1.0, 2.0)));
    assert!(!point.attrs().contains("type"));
}

#[test]
fn qualified_discriminator_resolves_within_family() {
    let geo: Geo = factory::resolve(
        &ctx(),
        Some(attrs(json!({"type": "geo/point", "coordinates": [3, 4]}))),
    )
    .unwrap();
    assert!(geo.as_point().is_some());
}

#[test]
fn polygon_keeps_its_rings() {
    let geo: Geo = factory::resolve(
        &ctx(),
        Some(attrs(json!({
            "type": "Polygon",
            "coordinates": [[[-122.4, 37.7], [-122.3, 37.7], [-122.3, 37.8]]]
        }))),
    )
    .unwrap();
    assert!(geo.as_point().is_none());
    assert_eq!(geo.coordinates().len(), 1);
}

#[test]
fn factory_goes_through_the_identity_map() {
    let ctx = Context::new(Arc::new(IdentityMap::new()));
    let payload = json!({"type": "Point", "coordinates": [1, 2]});
    let a: Geo = factory::resolve_value(&ctx, Some(&payload)).unwrap();
    let b: Geo = factory::resolve_value(&ctx, Some(&payload)).unwrap();
    assert!(Arc::ptr_eq(a.as_point().unwrap(), b.as_point().unwrap()));
}

// ── Media family ─────────────────────────────────────────────────

#[test]
fn photo_resolves_with_sizes() {
    let media: Media = factory::resolve(
        &ctx(),
        Some(attrs(json!({
            "type": "photo",
            "id": 1,
            "media_url": "http://example.com/1.jpg",
            "sizes": {"small": {"h": 226, "w": 340, "resize": "fit"}}
        }))),
    )
    .unwrap();
    let photo = media.as_photo().unwrap();
    assert_eq!(photo.media_url(), Some("http://example.com/1.jpg"));
    let sizes = photo.sizes().unwrap();
    assert_eq!(sizes["small"].h(), Some(226));
    assert_eq!(sizes["small"].resize(), Some("fit"));
}

#[test]
fn photo_without_id_fails() {
    let err = factory::resolve::<Media>(&ctx(), Some(attrs(json!({"type": "photo"}))))
        .unwrap_err();
    assert!(matches!(err, Error::Construction { ref key } if key == "id"));
}

// ── Properties ───────────────────────────────────────────────────

proptest! {
    /// Normalized names carry no separators and every word is capitalized.
    #[test]
    fn normalized_segments_are_pascal_case(words in prop::collection::vec("[a-z][a-z0-9]{0,6}", 1..5)) {
        let name = normalize(&words.join("_"));
        prop_assert!(!name.contains('_'));
        prop_assert!(name.chars().next().unwrap().is_ascii_uppercase());
        prop_assert_eq!(name.to_lowercase(), words.concat());
    }

    /// One nested name per path segment.
    #[test]
    fn path_segments_map_to_nested_names(segments in prop::collection::vec("[a-z]{1,6}", 1..4)) {
        let name = normalize(&segments.join("/"));
        prop_assert_eq!(name.split("::").count(), segments.len());
    }
}
