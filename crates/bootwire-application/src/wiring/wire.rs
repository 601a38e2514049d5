//! Composite wiring declaration
//!
//! [`WireModule`] owns an ordered list of contributions and merges their
//! bindings with one deterministic rule:
//!
//! 1. The earliest contribution binding a key wins.
//! 2. A binding marked `overriding()` replaces any unmarked binding, whatever
//!    its position.
//! 3. Two marked bindings for one key, or two unmarked bindings for one key
//!    inside the same contribution, are reported as `Ambiguous`.
//!
//! Discovered (scanned) contributions are appended after explicit ones, so
//! explicit declarations win unless a scanned component opts into overriding.

use std::collections::HashMap;
use std::fmt;

use bootwire_domain::{Diagnostic, Error, Key, Result};
use tracing::{debug, trace};

use super::binder::Binder;
use super::binding::Binding;
use super::module::Module;

/// Where a contribution came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Supplied by the caller
    Explicit,
    /// Produced by namespace scanning
    Discovered,
}

struct Contribution {
    module: Box<dyn Module>,
    origin: Origin,
}

/// Ordered, merging composite of modules
pub struct WireModule {
    contributions: Vec<Contribution>,
}

impl WireModule {
    /// Composite of explicit modules, in the given order
    pub fn new(modules: Vec<Box<dyn Module>>) -> Self {
        Self {
            contributions: modules
                .into_iter()
                .map(|module| Contribution {
                    module,
                    origin: Origin::Explicit,
                })
                .collect(),
        }
    }

    /// Append a discovered contribution after everything already present
    pub fn with_discovered(mut self, module: Box<dyn Module>) -> Self {
        self.contributions.push(Contribution {
            module,
            origin: Origin::Discovered,
        });
        self
    }

    /// `(name, origin)` of every contribution, in merge order
    pub fn contributions(&self) -> Vec<(String, Origin)> {
        self.contributions
            .iter()
            .map(|c| (c.module.name(), c.origin))
            .collect()
    }

    /// Number of contributions
    pub fn len(&self) -> usize {
        self.contributions.len()
    }

    /// True when there are no contributions
    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }

    /// Configure every contribution and merge the results
    pub fn merge(&self) -> Result<Binder> {
        let mut binders = Vec::with_capacity(self.contributions.len());
        for contribution in &self.contributions {
            let mut binder = Binder::new(contribution.module.name());
            contribution.module.configure(&mut binder)?;
            trace!(
                module = %binder.source(),
                origin = ?contribution.origin,
                bindings = binder.bindings().len(),
                "Configured contribution"
            );
            binders.push(binder);
        }
        merge_binders("WireModule", binders)
    }
}

impl Module for WireModule {
    fn name(&self) -> String {
        "WireModule".to_string()
    }

    fn configure(&self, binder: &mut Binder) -> Result<()> {
        let merged = self.merge()?;
        binder.extend(merged);
        Ok(())
    }
}

impl fmt::Debug for WireModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WireModule")
            .field("contributions", &self.contributions())
            .finish()
    }
}

/// Merge binders in position order under the precedence rule.
///
/// Each binder is one position; the result keeps first-seen key order.
pub(crate) fn merge_binders(source: &str, binders: Vec<Binder>) -> Result<Binder> {
    let mut winners: Vec<Binding> = Vec::new();
    let mut index: HashMap<Key, usize> = HashMap::new();
    let mut conflicts: Vec<(Key, Vec<String>)> = Vec::new();
    let mut merged = Binder::new(source);

    for binder in binders {
        let (bindings, requirements) = binder.into_parts();
        for requirement in requirements {
            merged.push_requirement(requirement);
        }

        // Unmarked keys this position has already bound, whether or not they won
        let mut local: HashMap<Key, String> = HashMap::new();

        for binding in bindings {
            if !binding.overrides() {
                if let Some(first) = local.get(binding.key()) {
                    record_conflict(&mut conflicts, binding.key(), first, binding.source());
                    continue;
                }
                local.insert(binding.key().clone(), binding.source().to_string());
            }

            let Some(&slot) = index.get(binding.key()) else {
                index.insert(binding.key().clone(), winners.len());
                winners.push(binding);
                continue;
            };

            let winner = &mut winners[slot];
            match (winner.overrides(), binding.overrides()) {
                (true, true) => {
                    record_conflict(&mut conflicts, binding.key(), winner.source(), binding.source());
                }
                (false, true) => {
                    debug!(
                        key = %binding.key(),
                        winner = %binding.source(),
                        replaced = %winner.source(),
                        "Override binding replaces earlier declaration"
                    );
                    *winner = binding;
                }
                (true, false) => {
                    trace!(
                        key = %binding.key(),
                        ignored = %binding.source(),
                        "Binding shadowed by override"
                    );
                }
                (false, false) => {
                    debug!(
                        key = %binding.key(),
                        winner = %winner.source(),
                        ignored = %binding.source(),
                        "Later binding ignored; earlier declaration wins"
                    );
                }
            }
        }
    }

    if !conflicts.is_empty() {
        let diagnostics = conflicts
            .into_iter()
            .map(|(key, sources)| Diagnostic::Ambiguous {
                key: key.to_string(),
                sources,
            })
            .collect::<Vec<_>>();
        return Err(Error::graph_resolution(diagnostics));
    }

    for binding in winners {
        merged.push(binding);
    }
    Ok(merged)
}

fn record_conflict(conflicts: &mut Vec<(Key, Vec<String>)>, key: &Key, first: &str, second: &str) {
    if let Some((_, sources)) = conflicts.iter_mut().find(|(k, _)| k == key) {
        sources.push(second.to_string());
        return;
    }
    conflicts.push((key.clone(), vec![first.to_string(), second.to_string()]));
}
