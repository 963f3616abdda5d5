//! The attribute store every entity is built on.
//!
//! An [`Attrs`] is the decoded JSON object a response entity was constructed
//! from. Accessors never write back into it; derived values are cached by the
//! owning entity, not here. Explicit `null` values read the same as absent
//! keys.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::hash::{Hash, Hasher};

/// A decoded JSON object backing one entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attrs(Map<String, Value>);

impl Attrs {
    /// Creates an empty attribute store.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wraps a decoded JSON object.
    ///
    /// Fails with a construction error when `value` is not an object, naming
    /// `key` as the mapping that was expected.
    pub fn from_value(value: Value, key: &str) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(Error::missing(key)),
        }
    }

    /// Returns the value at `key`, treating `null` as absent.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&Value> {
        self.0.get(key.as_ref()).filter(|v| !v.is_null())
    }

    /// Returns true when `key` holds a non-null value.
    pub fn contains(&self, key: impl AsRef<str>) -> bool {
        self.get(key).is_some()
    }

    pub fn get_str(&self, key: impl AsRef<str>) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_bool(&self, key: impl AsRef<str>) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn get_f64(&self, key: impl AsRef<str>) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_i64(&self, key: impl AsRef<str>) -> Option<i64> {
        match self.get(key)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => leading_integer(s),
            _ => None,
        }
    }

    /// Reads an unsigned count, accepting numeric strings the way the API
    /// sometimes sends them (`"42"`, `"100+"`).
    pub fn get_u64(&self, key: impl AsRef<str>) -> Option<u64> {
        self.get_i64(key).and_then(|n| u64::try_from(n).ok())
    }

    pub fn get_array(&self, key: impl AsRef<str>) -> Option<&Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }

    /// Returns a copy of the nested object at `key`, if it is one.
    pub fn get_attrs(&self, key: impl AsRef<str>) -> Option<Attrs> {
        self.get(key).and_then(Value::as_object).cloned().map(Self)
    }

    /// Removes `key` and returns its value, `null` included.
    pub fn take(&mut self, key: impl AsRef<str>) -> Option<Value> {
        self.0.remove(key.as_ref())
    }

    /// Merges `other`'s top-level keys into this store, overwriting.
    ///
    /// Only explicit update operations call this.
    pub fn update(&mut self, other: Attrs) {
        self.0.extend(other.0);
    }

    /// Builds the attributes for an entity nested at `key`, embedding this
    /// entity (minus `key`) under `back_key` so the child can point back at
    /// its parent.
    ///
    /// Returns `None` when `key` is absent or not an object.
    pub fn nested_without_self(&self, key: &str, back_key: &str) -> Option<Attrs> {
        let mut child = self.get_attrs(key)?;
        let mut parent = self.0.clone();
        parent.remove(key);
        child.0.insert(back_key.to_string(), Value::Object(parent));
        Some(child)
    }

    /// Returns a copy of the underlying mapping.
    ///
    /// Mutating the copy does not affect the entity.
    #[must_use]
    pub fn raw_export(&self) -> Map<String, Value> {
        self.0.clone()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// A stable textual form of the whole mapping, usable as a cache key.
    #[must_use]
    pub fn canonical(&self) -> String {
        // Map iteration is key-ordered, so equal mappings serialize equally.
        Value::Object(self.0.clone()).to_string()
    }
}

impl From<Map<String, Value>> for Attrs {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Attrs {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value, "attrs")
    }
}

impl Hash for Attrs {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.len().hash(state);
        for (key, value) in &self.0 {
            key.hash(state);
            hash_value(value, state);
        }
    }
}

/// Hashes a JSON value consistently with `Value`'s `PartialEq`.
pub fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    match value {
        Value::Null => 0u8.hash(state),
        Value::Bool(b) => {
            1u8.hash(state);
            b.hash(state);
        }
        Value::Number(n) => {
            2u8.hash(state);
            n.to_string().hash(state);
        }
        Value::String(s) => {
            3u8.hash(state);
            s.hash(state);
        }
        Value::Array(items) => {
            4u8.hash(state);
            items.len().hash(state);
            for item in items {
                hash_value(item, state);
            }
        }
        Value::Object(map) => {
            5u8.hash(state);
            map.len().hash(state);
            for (key, item) in map {
                key.hash(state);
                hash_value(item, state);
            }
        }
    }
}

fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(digits.len(), |(i, _)| i);
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}
