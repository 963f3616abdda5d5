//! Typed construction on top of an [`EntityCache`].
//!
//! Every entity holds the [`Context`] it was built with, so lazily
//! constructed children go through the same cache as their parent. That
//! copy only holds the cache weakly: the cache owns its entities, and an
//! entity that outlives every owning context builds its children uncached.

use crate::entity::{Entity, IdentityKey};
use crate::identity_map::{CacheKey, EntityCache, IdentityMap, NullCache, SharedEntity};
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::debug;
use twitter_types::{Attrs, Error, Id, Result};

#[derive(Clone)]
enum CacheHandle {
    Owned(Arc<dyn EntityCache>),
    Entity(Weak<dyn EntityCache>),
}

/// Shared handle to the cache entities are deduplicated through.
#[derive(Clone)]
pub struct Context {
    cache: CacheHandle,
}

impl Context {
    pub fn new(cache: Arc<dyn EntityCache>) -> Self {
        Self {
            cache: CacheHandle::Owned(cache),
        }
    }

    /// A context over the process-wide [`IdentityMap::global`].
    pub fn global() -> Self {
        Self::new(IdentityMap::global())
    }

    /// A context that never deduplicates.
    pub fn uncached() -> Self {
        Self::new(Arc::new(NullCache))
    }

    /// The cache, or a [`NullCache`] once every owning context is gone.
    pub fn cache(&self) -> Arc<dyn EntityCache> {
        match &self.cache {
            CacheHandle::Owned(cache) => cache.clone(),
            CacheHandle::Entity(cache) => cache.upgrade().unwrap_or_else(|| Arc::new(NullCache)),
        }
    }

    pub fn is_caching(&self) -> bool {
        self.cache().is_enabled()
    }

    /// The copy handed to entities, which must not keep the cache alive.
    fn for_entity(&self) -> Self {
        let cache = match &self.cache {
            CacheHandle::Owned(cache) => Arc::downgrade(cache),
            CacheHandle::Entity(cache) => cache.clone(),
        };
        Self {
            cache: CacheHandle::Entity(cache),
        }
    }

    /// Constructs a fresh entity without touching the cache.
    pub fn construct<T: Entity>(&self, attrs: Attrs) -> Result<T> {
        T::from_attrs(&self.for_entity(), attrs)
    }

    /// Looks up a cached entity.
    ///
    /// Returns `Ok(None)` while caching is disabled, and an
    /// [`Error::IdentityMapMiss`] when enabled but nothing is stored under
    /// `key`.
    pub fn fetch<T: Entity>(&self, key: &IdentityKey) -> Result<Option<Arc<T>>> {
        let cache = self.cache();
        if !cache.is_enabled() {
            return Ok(None);
        }
        let cache_key = CacheKey::new(T::KIND, key.clone());
        match cache.get(&cache_key).and_then(downcast::<T>) {
            Some(entity) => Ok(Some(entity)),
            None => Err(Error::IdentityMapMiss {
                kind: T::KIND,
                key: key.to_string(),
            }),
        }
    }

    /// [`fetch`](Self::fetch) by natural id.
    pub fn fetch_id<T: Entity>(&self, id: impl Into<Id>) -> Result<Option<Arc<T>>> {
        self.fetch(&IdentityKey::Id(id.into()))
    }

    /// Caches `entity` under its identity key and hands it back.
    ///
    /// A passthrough while caching is disabled or when the entity has no
    /// identity.
    pub fn store<T: Entity>(&self, entity: Arc<T>) -> Arc<T> {
        let cache = self.cache();
        if cache.is_enabled() {
            if let Some(key) = entity.identity_key() {
                debug!(kind = T::KIND, %key, "storing entity in identity map");
                let shared: SharedEntity = entity.clone();
                cache.insert(CacheKey::new(T::KIND, key), shared);
            }
        }
        entity
    }

    /// Returns the cached instance for these attributes, or constructs,
    /// caches and returns a new one.
    ///
    /// On a hit the supplied attributes are ignored: the existing instance
    /// wins, so repeated fetches keep a stable object identity even when the
    /// payload has moved on.
    pub fn fetch_or_construct<T: Entity>(&self, attrs: Attrs) -> Result<Arc<T>> {
        let cache = self.cache();
        let key = if cache.is_enabled() {
            T::key_of(&attrs)
        } else {
            None
        };
        let Some(key) = key else {
            return Ok(Arc::new(self.construct(attrs)?));
        };

        let cache_key = CacheKey::new(T::KIND, key);
        if let Some(hit) = cache.get(&cache_key).and_then(downcast::<T>) {
            debug!(kind = T::KIND, key = %cache_key.key, "identity map hit");
            return Ok(hit);
        }

        let fresh: Arc<T> = Arc::new(self.construct(attrs)?);
        let shared: SharedEntity = fresh.clone();
        let winner = cache.get_or_insert(cache_key, shared);
        Ok(downcast::<T>(winner).unwrap_or(fresh))
    }

    /// [`fetch_or_construct`](Self::fetch_or_construct) over a raw JSON
    /// value. `null` yields `None`; anything but an object is a construction
    /// error.
    pub fn fetch_or_construct_value<T: Entity>(&self, value: &Value) -> Result<Option<Arc<T>>> {
        match value {
            Value::Null => Ok(None),
            Value::Object(map) => self.fetch_or_construct(Attrs::from(map.clone())).map(Some),
            _ => Err(Error::missing(T::KIND)),
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::global()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("caching", &self.is_caching())
            .finish()
    }
}

fn downcast<T: Entity>(entity: SharedEntity) -> Option<Arc<T>> {
    entity.downcast::<T>().ok()
}
