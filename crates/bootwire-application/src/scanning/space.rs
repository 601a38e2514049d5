//! Namespace roots

use std::fmt;

/// A namespace root to scan
///
/// Matching works on whole `::` segments: the root `app::web` contains
/// `app::web` and `app::web::api` but not `app::webhooks`. The empty root is
/// the global namespace and contains everything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NamespaceSpace {
    root: String,
}

impl NamespaceSpace {
    /// Space rooted at `root`; surrounding `::` separators are ignored
    pub fn new(root: impl Into<String>) -> Self {
        let root = root.into();
        Self {
            root: root.trim_matches(':').to_string(),
        }
    }

    /// The global namespace
    pub fn global() -> Self {
        Self::default()
    }

    /// Root path; empty for the global namespace
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Whether this is the global namespace
    pub fn is_global(&self) -> bool {
        self.root.is_empty()
    }

    /// Whether `namespace` lies under this root
    pub fn contains(&self, namespace: &str) -> bool {
        if self.is_global() {
            return true;
        }
        match namespace.strip_prefix(self.root.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with("::"),
            None => false,
        }
    }
}

impl fmt::Display for NamespaceSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_global() {
            f.write_str("<global>")
        } else {
            f.write_str(&self.root)
        }
    }
}
