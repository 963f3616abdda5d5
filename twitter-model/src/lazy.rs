//! Lazily constructed, memoized relations.
//!
//! A relation accessor reads a sub-key of its entity's attributes the first
//! time it is called, builds the child entities through the entity's
//! [`Context`], and keeps the result. Absent keys produce the empty form
//! (`None` or an empty `Vec`), never an error.

use crate::media::Size;
use crate::{Context, Entity};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};
use tracing::warn;
use twitter_types::{Attrs, Result};

/// A write-once slot for a derived value.
///
/// Concurrent first access may compute the value more than once; the first
/// value stored is the one every caller sees from then on.
#[derive(Debug, Clone, Default)]
pub struct Lazy<T>(OnceLock<T>);

impl<T> Lazy<T> {
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// The memoized value, if it has been computed.
    pub fn get(&self) -> Option<&T> {
        self.0.get()
    }

    pub fn get_or_init(&self, init: impl FnOnce() -> T) -> &T {
        self.0.get_or_init(init)
    }

    /// Computes and stores the value on first call. Errors are returned
    /// without being memoized.
    pub fn get_or_try_init(&self, init: impl FnOnce() -> Result<T>) -> Result<&T> {
        if let Some(value) = self.0.get() {
            return Ok(value);
        }
        let value = init()?;
        Ok(self.0.get_or_init(|| value))
    }

    /// Forgets the memoized value. Only explicit update operations call this.
    pub fn reset(&mut self) {
        self.0 = OnceLock::new();
    }
}

/// Builds every entity in `value`: an array of objects, a single object, or
/// nothing. `null` elements are skipped.
pub(crate) fn collect<T: Entity>(ctx: &Context, value: Option<&Value>) -> Result<Vec<Arc<T>>> {
    match value {
        Some(Value::Array(items)) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                if let Some(entity) = ctx.fetch_or_construct_value(item)? {
                    out.push(entity);
                }
            }
            Ok(out)
        }
        Some(object @ Value::Object(_)) => Ok(ctx.fetch_or_construct_value(object)?.into_iter().collect()),
        _ => Ok(Vec::new()),
    }
}

/// A collection relation stored at `key`.
pub(crate) fn many<T: Entity>(ctx: &Context, attrs: &Attrs, key: &str) -> Result<Vec<Arc<T>>> {
    collect(ctx, attrs.get(key))
}

/// A singular relation stored at `key`.
pub(crate) fn one<T: Entity>(ctx: &Context, attrs: &Attrs, key: &str) -> Result<Option<Arc<T>>> {
    match attrs.get(key) {
        Some(value) => ctx.fetch_or_construct_value(value),
        None => Ok(None),
    }
}

/// A `{name: size}` mapping stored at `key`, as photos and banners carry.
pub(crate) fn size_map(
    ctx: &Context,
    attrs: &Attrs,
    key: &str,
) -> Result<BTreeMap<String, Arc<Size>>> {
    let mut sizes = BTreeMap::new();
    if let Some(Value::Object(map)) = attrs.get(key) {
        for (name, value) in map {
            if let Some(size) = ctx.fetch_or_construct_value(value)? {
                sizes.insert(name.clone(), size);
            }
        }
    }
    Ok(sizes)
}

/// A relation nested under the `entities` mapping, which the API only sends
/// when the request asked for it.
///
/// Without `entities` this logs a warning and returns the empty form instead
/// of failing.
pub(crate) fn with_entities<T>(
    attrs: &Attrs,
    key: &str,
    owner: &str,
    build: impl FnOnce(Option<&Value>) -> Result<Vec<T>>,
) -> Result<Vec<T>> {
    match attrs.get("entities") {
        Some(entities) => build(entities.get(key)),
        None => {
            warn!(
                "To get {}, you must pass `include_entities=true` when requesting the {}.",
                key.replace('_', " "),
                owner
            );
            Ok(Vec::new())
        }
    }
}
