//! Mutable component registry
//!
//! Holds the singleton instances of one graph. Reads are concurrent; the
//! shutdown path calls [`ComponentRegistry::clear`], after which the
//! registry stays cleared and every insert fails. Lookups through the
//! owning [`Injector`](super::Injector) fail fast from that point on.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use bootwire_domain::{Error, Key, Result};
use dashmap::DashMap;
use tracing::{debug, info};

use super::binding::Instance;

/// Shared store of resolved singleton instances
pub struct ComponentRegistry {
    entries: DashMap<Key, Instance>,
    cleared: AtomicBool,
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            cleared: AtomicBool::new(false),
        }
    }

    /// Cached instance for `key`, if one was stored
    pub fn get(&self, key: &Key) -> Option<Instance> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Store `instance` unless another thread stored one first; returns the stored instance
    pub fn insert_if_absent(&self, key: Key, instance: Instance) -> Result<Instance> {
        if self.is_cleared() {
            return Err(Error::registry_cleared(key.to_string()));
        }

        let stored = self.entries.entry(key.clone()).or_insert(instance).value().clone();

        // clear() may have run between the check and the insert
        if self.is_cleared() {
            self.entries.remove(&key);
            return Err(Error::registry_cleared(key.to_string()));
        }
        Ok(stored)
    }

    /// Whether an instance is cached for `key`
    pub fn contains(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of cached instances
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys of every cached instance
    pub fn keys(&self) -> Vec<Key> {
        self.entries.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Drop every cached instance and refuse further inserts.
    ///
    /// Idempotent: calling it again is a no-op. Returns the number of
    /// instances removed by this call.
    pub fn clear(&self) -> usize {
        let first = !self.cleared.swap(true, Ordering::SeqCst);
        let removed = self.entries.len();
        self.entries.clear();

        if first {
            info!(removed, "Component registry cleared");
        } else {
            debug!(removed, "Component registry already cleared");
        }
        removed
    }

    /// Whether [`clear`](Self::clear) has run
    pub fn is_cleared(&self) -> bool {
        self.cleared.load(Ordering::SeqCst)
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("entries", &self.entries.len())
            .field("cleared", &self.is_cleared())
            .finish()
    }
}
