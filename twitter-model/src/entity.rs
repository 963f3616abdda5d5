//! The entity contract shared by every response object.
//!
//! An entity is built from an [`Attrs`] by an explicit decode step and keeps
//! that mapping for its whole lifetime. Entities with a natural id implement
//! [`Identified`] and compare by id; the rest compare by their full
//! attribute mapping unless the type names a narrower key.

use crate::Context;
use std::any::Any;
use std::fmt;
use twitter_types::{Attrs, Error, Id, Result};

/// The value an entity is deduplicated and compared by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    /// A natural id.
    Id(Id),
    /// The canonical form of the whole attribute mapping.
    Attrs(String),
}

impl IdentityKey {
    /// The `id` attribute, if present and well-formed.
    pub fn id(attrs: &Attrs) -> Option<Self> {
        attrs.get("id").and_then(Id::from_value).map(Self::Id)
    }

    /// The whole mapping. Empty mappings have no identity.
    pub fn attrs(attrs: &Attrs) -> Option<Self> {
        (!attrs.is_empty()).then(|| Self::Attrs(attrs.canonical()))
    }
}

impl From<Id> for IdentityKey {
    fn from(id: Id) -> Self {
        Self::Id(id)
    }
}

impl From<u64> for IdentityKey {
    fn from(id: u64) -> Self {
        Self::Id(Id::Num(id))
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Attrs(canonical) => f.write_str(canonical),
        }
    }
}

/// A typed response object constructed from a decoded JSON mapping.
pub trait Entity: Any + Send + Sync + Sized {
    /// Class tag. Partitions the identity map and names the type in logs.
    const KIND: &'static str;

    /// Decodes an entity from its attributes.
    fn from_attrs(ctx: &Context, attrs: Attrs) -> Result<Self>;

    /// The mapping this entity was constructed from.
    fn attrs(&self) -> &Attrs;

    /// The identity key a not-yet-constructed entity would have.
    ///
    /// Defaults to the whole mapping.
    fn key_of(attrs: &Attrs) -> Option<IdentityKey> {
        IdentityKey::attrs(attrs)
    }

    /// This entity's identity key.
    fn identity_key(&self) -> Option<IdentityKey> {
        Self::key_of(self.attrs())
    }
}

/// An entity with a natural id.
pub trait Identified: Entity {
    fn id(&self) -> &Id;
}

/// Reads the mandatory `id` of an identified entity.
pub(crate) fn require_id(attrs: &Attrs) -> Result<Id> {
    attrs
        .get("id")
        .and_then(Id::from_value)
        .ok_or_else(|| Error::missing("id"))
}

/// Full-mapping equality. Empty mappings never compare equal.
pub(crate) fn attrs_equal(a: &Attrs, b: &Attrs) -> bool {
    !b.is_empty() && a == b
}

/// True when every key is present on `b` and equal on both sides.
pub(crate) fn keys_equal(a: &Attrs, b: &Attrs, keys: &[&str]) -> bool {
    keys.iter()
        .all(|key| matches!(b.get(key), Some(v) if a.get(key) == Some(v)))
}

/// Implements id-based `PartialEq`, `Eq` and `Hash` for identified entities.
macro_rules! id_equality {
    ($($ty:ty),+ $(,)?) => {$(
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                $crate::entity::Identified::id(self) == $crate::entity::Identified::id(other)
            }
        }

        impl Eq for $ty {}

        impl std::hash::Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                std::hash::Hash::hash($crate::entity::Identified::id(self), state);
            }
        }
    )+};
}

/// Implements full-mapping `PartialEq` and `Hash`.
macro_rules! attrs_equality {
    ($($ty:ty),+ $(,)?) => {$(
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                use $crate::entity::Entity;
                $crate::entity::attrs_equal(self.attrs(), other.attrs())
            }
        }

        impl std::hash::Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                use $crate::entity::Entity;
                std::hash::Hash::hash(self.attrs(), state);
            }
        }
    )+};
}

/// Implements `PartialEq` and `Hash` keyed on specific attributes, falling
/// back to the full mapping when the keys are absent.
macro_rules! key_equality {
    ($ty:ty, $($key:literal),+ $(,)?) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                use $crate::entity::Entity;
                $crate::entity::keys_equal(self.attrs(), other.attrs(), &[$($key),+])
                    || $crate::entity::attrs_equal(self.attrs(), other.attrs())
            }
        }

        impl std::hash::Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                use $crate::entity::Entity;
                let attrs = self.attrs();
                if [$($key),+].iter().all(|key| attrs.contains(key)) {
                    std::hash::Hash::hash(&1u8, state);
                    $(
                        if let Some(value) = attrs.get($key) {
                            twitter_types::hash_value(value, state);
                        }
                    )+
                } else {
                    std::hash::Hash::hash(&0u8, state);
                    std::hash::Hash::hash(attrs, state);
                }
            }
        }
    };
}

pub(crate) use attrs_equality;
pub(crate) use id_equality;
pub(crate) use key_equality;
