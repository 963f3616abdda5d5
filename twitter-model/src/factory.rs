//! Discriminator-driven construction for closed entity families.
//!
//! A payload such as `{"type": "Point", "coordinates": [..]}` names its own
//! concrete type. [`resolve`] pulls the discriminator out of the mapping,
//! normalizes it into a type name and dispatches to the family's registry.
//! The discriminator key is removed before the variant sees the mapping.

use crate::Context;
use serde_json::Value;
use twitter_types::{Attrs, Error, Result};

/// Builds one variant of a family from discriminator-free attributes.
pub type Constructor<F> = fn(&Context, Attrs) -> Result<F>;

/// A closed set of entity variants selected by a discriminator field.
pub trait Family: Sized + 'static {
    /// The family's type name; discriminators may be qualified with it
    /// (`geo/point`).
    const NAME: &'static str;

    /// The payload key holding the discriminator.
    const FIELD: &'static str;

    /// Normalized variant name to constructor.
    const VARIANTS: &'static [(&'static str, Constructor<Self>)];
}

/// Turns a raw discriminator into a type name.
///
/// Path segments become nested names and underscore-separated words are
/// merged, each word capitalized: `list_member_added` → `ListMemberAdded`,
/// `geo/point` → `Geo::Point`.
pub fn normalize(raw: &str) -> String {
    raw.split('/')
        .map(camelize)
        .collect::<Vec<_>>()
        .join("::")
}

fn camelize(segment: &str) -> String {
    segment
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// Constructs the variant named by the family's discriminator field.
///
/// Fails with a construction error when `attrs` is absent or lacks a string
/// discriminator, and with [`Error::UnknownVariant`] when the name is not in
/// the family's registry.
pub fn resolve<F: Family>(ctx: &Context, attrs: Option<Attrs>) -> Result<F> {
    resolve_with_field(ctx, F::FIELD, attrs)
}

/// [`resolve`] reading the discriminator from `field` instead of the
/// family's default.
pub fn resolve_with_field<F: Family>(ctx: &Context, field: &str, attrs: Option<Attrs>) -> Result<F> {
    let mut attrs = attrs.ok_or_else(|| Error::missing(field))?;
    match attrs.take(field) {
        Some(Value::String(name)) => dispatch(ctx, &name, attrs),
        _ => Err(Error::missing(field)),
    }
}

/// [`resolve`] over a raw JSON value. Anything but an object is treated as
/// absent.
pub fn resolve_value<F: Family>(ctx: &Context, value: Option<&Value>) -> Result<F> {
    let attrs = value.and_then(Value::as_object).cloned().map(Attrs::from);
    resolve(ctx, attrs)
}

/// Like [`resolve`], but a mapping without a discriminator takes the kind
/// of its parent context instead of failing.
pub fn resolve_or_inherit<F: Family>(ctx: &Context, mut attrs: Attrs, inherited: &str) -> Result<F> {
    match attrs.take(F::FIELD) {
        Some(Value::String(name)) => dispatch(ctx, &name, attrs),
        None | Some(Value::Null) => dispatch(ctx, inherited, attrs),
        Some(_) => Err(Error::missing(F::FIELD)),
    }
}

fn dispatch<F: Family>(ctx: &Context, raw: &str, attrs: Attrs) -> Result<F> {
    let name = normalize(raw);
    let local = name
        .strip_prefix(F::NAME)
        .and_then(|rest| rest.strip_prefix("::"))
        .unwrap_or(&name);
    let constructor = F::VARIANTS
        .iter()
        .find(|(variant, _)| *variant == local)
        .map(|(_, constructor)| *constructor)
        .ok_or_else(|| Error::UnknownVariant {
            family: F::NAME,
            name: name.clone(),
        })?;
    constructor(ctx, attrs)
}

/// Resolves every element of `value` (an array, a single object or nothing)
/// through the family's registry. `null` elements are skipped.
pub(crate) fn collect<F: Family>(ctx: &Context, value: Option<&Value>) -> Result<Vec<F>> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(|item| resolve_value(ctx, Some(item)))
            .collect(),
        Some(object @ Value::Object(_)) => Ok(vec![resolve_value(ctx, Some(object))?]),
        _ => Ok(Vec::new()),
    }
}
