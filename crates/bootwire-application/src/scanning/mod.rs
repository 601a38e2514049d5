//! Namespace Scanning
//!
//! Components announce themselves at compile time through the
//! [`COMPONENTS`] distributed slice. Each entry records the module path it
//! was declared in, so a [`NamespaceSpace`] root selects components the way
//! a package prefix would.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  1. Component declares: #[linkme::distributed_slice(COMPONENTS)]
//! │  2. LinkedScanner filters entries by space + ScanPolicy      │
//! │  3. SpaceModule configures every matching entry              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```ignore
//! #[linkme::distributed_slice(bootwire_application::COMPONENTS)]
//! static CLOCK: ComponentEntry = ComponentEntry {
//!     name: "clock",
//!     description: "System clock",
//!     namespace: module_path!(),
//!     indexed: true,
//!     contribute: |binder| {
//!         binder.bind::<dyn Clock>().to_singleton(|_| Ok(Arc::new(SystemClock)));
//!         Ok(())
//!     },
//! };
//! ```

pub mod scanner;
pub mod space;
pub mod space_module;

use std::fmt;

use bootwire_domain::Result;

use crate::wiring::Binder;

pub use scanner::{LinkedScanner, NamespaceScanner};
pub use space::NamespaceSpace;
pub use space_module::SpaceModule;

/// Registry entry for a linked component
pub struct ComponentEntry {
    /// Component name, unique within its namespace
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Declaring module path, normally `module_path!()`
    pub namespace: &'static str,
    /// Whether the component is part of the index (`INDEX`, `GLOBAL_INDEX`)
    pub indexed: bool,
    /// Records the component's bindings
    pub contribute: fn(&mut Binder) -> Result<()>,
}

impl ComponentEntry {
    /// `namespace::name`, used as the binding source
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.namespace, self.name)
    }
}

impl fmt::Debug for ComponentEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentEntry")
            .field("name", &self.name)
            .field("namespace", &self.namespace)
            .field("indexed", &self.indexed)
            .finish_non_exhaustive()
    }
}

/// Every component linked into the binary
#[linkme::distributed_slice]
pub static COMPONENTS: [ComponentEntry] = [..];

/// List all linked components
///
/// Returns `(qualified name, description)` pairs, sorted by name.
pub fn list_components() -> Vec<(String, &'static str)> {
    let mut components: Vec<_> = COMPONENTS
        .iter()
        .map(|entry| (entry.qualified_name(), entry.description))
        .collect();
    components.sort();
    components
}
