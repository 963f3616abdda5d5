//! The identity map: at most one live instance per (kind, identity key).
//!
//! [`IdentityMap`] is a mutex-guarded table that can be switched off without
//! losing its contents; [`NullCache`] is the always-off implementation for
//! callers that opt out entirely. Both sit behind [`EntityCache`], which the
//! typed layer in [`Context`](crate::Context) builds on.

use crate::entity::IdentityKey;
use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

/// A type-erased cached entity.
pub type SharedEntity = Arc<dyn Any + Send + Sync>;

/// Cache slot address: the entity's class tag plus its identity key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub kind: &'static str,
    pub key: IdentityKey,
}

impl CacheKey {
    pub fn new(kind: &'static str, key: IdentityKey) -> Self {
        Self { kind, key }
    }
}

/// Storage behind entity deduplication.
///
/// Implementations must be safe to share across threads; every operation
/// takes `&self`.
pub trait EntityCache: Send + Sync {
    /// Whether lookups and stores currently take effect.
    fn is_enabled(&self) -> bool;

    /// Returns the cached entity, or `None` on a miss or while disabled.
    fn get(&self, key: &CacheKey) -> Option<SharedEntity>;

    /// Inserts or overwrites an entry. No-op while disabled.
    fn insert(&self, key: CacheKey, entity: SharedEntity);

    /// Inserts `entity` unless an entry already exists, returning whichever
    /// instance ends up cached. While disabled, returns `entity` untouched.
    fn get_or_insert(&self, key: CacheKey, entity: SharedEntity) -> SharedEntity;

    /// Drops every entry.
    fn clear(&self);
}

/// A process-lifetime identity map.
///
/// Disabling is not an eviction: entries stored while enabled become
/// visible again after [`enable`](Self::enable). Use [`clear`](EntityCache::clear)
/// to drop them.
#[derive(Debug)]
pub struct IdentityMap {
    enabled: AtomicBool,
    entries: Mutex<HashMap<CacheKey, SharedEntity>>,
}

impl IdentityMap {
    /// Creates an enabled, empty map.
    pub fn new() -> Self {
        Self {
            enabled: AtomicBool::new(true),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a disabled, empty map.
    pub fn disabled() -> Self {
        let map = Self::new();
        map.disable();
        map
    }

    /// The process-wide map, created on first use.
    ///
    /// It starts disabled; call [`enable`](Self::enable) to opt in.
    pub fn global() -> Arc<IdentityMap> {
        static GLOBAL: OnceLock<Arc<IdentityMap>> = OnceLock::new();
        GLOBAL
            .get_or_init(|| Arc::new(IdentityMap::disabled()))
            .clone()
    }

    pub fn enable(&self) {
        self.enabled.store(true, Ordering::SeqCst);
    }

    pub fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
    }

    /// Number of entries, regardless of the enabled flag.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<CacheKey, SharedEntity>> {
        // Entries are whole Arcs, so a panic mid-operation leaves no torn state.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for IdentityMap {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityCache for IdentityMap {
    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn get(&self, key: &CacheKey) -> Option<SharedEntity> {
        if !self.is_enabled() {
            return None;
        }
        self.entries().get(key).cloned()
    }

    fn insert(&self, key: CacheKey, entity: SharedEntity) {
        if self.is_enabled() {
            self.entries().insert(key, entity);
        }
    }

    fn get_or_insert(&self, key: CacheKey, entity: SharedEntity) -> SharedEntity {
        if !self.is_enabled() {
            return entity;
        }
        self.entries().entry(key).or_insert(entity).clone()
    }

    fn clear(&self) {
        self.entries().clear();
    }
}

/// A cache that never caches.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCache;

impl EntityCache for NullCache {
    fn is_enabled(&self) -> bool {
        false
    }

    fn get(&self, _key: &CacheKey) -> Option<SharedEntity> {
        None
    }

    fn insert(&self, _key: CacheKey, _entity: SharedEntity) {}

    fn get_or_insert(&self, _key: CacheKey, entity: SharedEntity) -> SharedEntity {
        entity
    }

    fn clear(&self) {}
}
