//! Component scanners

use std::sync::Arc;

use bootwire_domain::{Result, ScanPolicy};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use tracing::{debug, trace};

use super::{COMPONENTS, ComponentEntry, NamespaceSpace};

/// Finds the components a [`ScanPolicy`] selects inside a namespace
pub trait NamespaceScanner: Send + Sync {
    /// Matching components, in a stable order
    fn scan(&self, space: &NamespaceSpace, policy: ScanPolicy) -> Result<Vec<&'static ComponentEntry>>;
}

static SHARED: Lazy<Arc<LinkedScanner>> = Lazy::new(|| Arc::new(LinkedScanner::new()));

/// Scanner over a static entry table, by default [`COMPONENTS`]
///
/// Results are sorted by `(namespace, name)`. `CACHE` results are memoised
/// per namespace root for the life of the scanner.
pub struct LinkedScanner {
    entries: &'static [ComponentEntry],
    cache: DashMap<NamespaceSpace, Vec<&'static ComponentEntry>>,
}

impl LinkedScanner {
    /// Scanner over every linked component
    pub fn new() -> Self {
        Self::with_entries(COMPONENTS.static_slice())
    }

    /// Scanner over an explicit entry table
    pub fn with_entries(entries: &'static [ComponentEntry]) -> Self {
        Self {
            entries,
            cache: DashMap::new(),
        }
    }

    /// Process-wide scanner; its `CACHE` memo is shared by every boot
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    /// Number of memoised namespace roots
    pub fn cached_roots(&self) -> usize {
        self.cache.len()
    }

    fn collect(&self, filter: impl Fn(&ComponentEntry) -> bool) -> Vec<&'static ComponentEntry> {
        let mut found: Vec<&'static ComponentEntry> = self.entries.iter().filter(|entry| filter(entry)).collect();
        found.sort_by(|a, b| (a.namespace, a.name).cmp(&(b.namespace, b.name)));
        found
    }
}

impl Default for LinkedScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LinkedScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkedScanner")
            .field("entries", &self.entries.len())
            .field("cached_roots", &self.cache.len())
            .finish()
    }
}

impl NamespaceScanner for LinkedScanner {
    fn scan(&self, space: &NamespaceSpace, policy: ScanPolicy) -> Result<Vec<&'static ComponentEntry>> {
        let global = policy == ScanPolicy::GlobalIndex;
        let selects = |entry: &ComponentEntry| {
            (entry.indexed || !policy.indexed_only()) && (global || space.contains(entry.namespace))
        };

        let found = match policy {
            ScanPolicy::Off => Vec::new(),
            ScanPolicy::Cache => {
                if let Some(hit) = self.cache.get(space) {
                    trace!(space = %space, "Scan cache hit");
                    return Ok(hit.value().clone());
                }
                let found = self.collect(&selects);
                self.cache
                    .entry(space.clone())
                    .or_insert(found)
                    .value()
                    .clone()
            }
            ScanPolicy::On | ScanPolicy::Index | ScanPolicy::GlobalIndex => self.collect(&selects),
        };

        debug!(space = %space, policy = %policy, components = found.len(), "Namespace scanned");
        Ok(found)
    }
}
