//! The scan-derived wiring declaration

use std::fmt;
use std::sync::Arc;

use bootwire_domain::{Diagnostic, Error, Result, ScanPolicy};
use tracing::debug;

use super::scanner::{LinkedScanner, NamespaceScanner};
use super::space::NamespaceSpace;
use crate::wiring::{Binder, Module};

/// Module contributing every component a scan selects
///
/// Scanning is deferred until [`configure`](Module::configure), so building
/// the module is free of side effects.
pub struct SpaceModule {
    space: NamespaceSpace,
    policy: ScanPolicy,
    scanner: Arc<dyn NamespaceScanner>,
}

impl SpaceModule {
    /// Scan `space` under `policy` with the shared [`LinkedScanner`]
    pub fn new(space: NamespaceSpace, policy: ScanPolicy) -> Self {
        Self {
            space,
            policy,
            scanner: LinkedScanner::shared(),
        }
    }

    /// Use another scanner
    pub fn with_scanner(mut self, scanner: Arc<dyn NamespaceScanner>) -> Self {
        self.scanner = scanner;
        self
    }

    /// Scanned namespace root
    pub fn space(&self) -> &NamespaceSpace {
        &self.space
    }

    /// Scan policy in effect
    pub fn policy(&self) -> ScanPolicy {
        self.policy
    }
}

impl Module for SpaceModule {
    fn name(&self) -> String {
        format!("SpaceModule({}, {})", self.policy, self.space)
    }

    fn configure(&self, binder: &mut Binder) -> Result<()> {
        if !self.policy.scans() {
            return Ok(());
        }

        let entries = self.scanner.scan(&self.space, self.policy)?;
        let mut diagnostics = Vec::new();
        for entry in entries {
            let mut component = Binder::new(entry.qualified_name());
            match (entry.contribute)(&mut component) {
                Ok(()) => binder.extend(component),
                Err(Error::GraphResolution { diagnostics: nested }) => {
                    diagnostics.extend(nested.iter().cloned());
                }
                Err(other) => diagnostics.push(Diagnostic::Provision {
                    key: entry.qualified_name(),
                    message: other.to_string(),
                }),
            }
        }

        if !diagnostics.is_empty() {
            return Err(Error::graph_resolution(diagnostics));
        }
        debug!(module = %self.name(), bindings = binder.bindings().len(), "Scanned components configured");
        Ok(())
    }
}

impl fmt::Debug for SpaceModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpaceModule")
            .field("space", &self.space)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
