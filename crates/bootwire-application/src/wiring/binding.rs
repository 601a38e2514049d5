//! Bindings and their catalog entries
//!
//! A [`Binding`] is what a module declares: a [`Key`], a [`Scope`] and a
//! typed [`Provision`]. Once the precedence merge has picked one binding per
//! key, each provision is added to the dill catalog as a value of type
//! `Provision<T>`, so resolving `T` is a `get_one::<Provision<T>>()` lookup.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use bootwire_domain::{Key, Result};
use dill::CatalogBuilder;

use super::injector::Injector;

/// Type-erased singleton as held by the component registry.
///
/// The concrete value behind the `dyn Any` is always an `Arc<T>` for the
/// bound type `T`, which lets unsized targets such as `dyn Trait` travel
/// through the same storage.
pub type Instance = Arc<dyn Any + Send + Sync>;

pub(crate) type Factory<T> = Arc<dyn Fn(&Injector) -> Result<Arc<T>> + Send + Sync>;

/// How often a binding's factory runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Pre-built value handed out as-is
    Instance,
    /// Factory runs on every lookup
    Prototype,
    /// Factory runs on first lookup; result kept in the registry
    Singleton,
    /// Like `Singleton`, but constructed while the graph is built
    EagerSingleton,
}

impl Scope {
    /// Whether results are cached in the component registry
    pub const fn is_cached(self) -> bool {
        matches!(self, Self::Singleton | Self::EagerSingleton)
    }
}

/// Typed construction recipe for `T`, stored in the dill catalog
pub(crate) struct Provision<T: ?Sized> {
    scope: Scope,
    factory: Factory<T>,
}

impl<T: ?Sized> Clone for Provision<T> {
    fn clone(&self) -> Self {
        Self {
            scope: self.scope,
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<T: ?Sized + Send + Sync + 'static> Provision<T> {
    pub(crate) fn scope(&self) -> Scope {
        self.scope
    }

    pub(crate) fn run(&self, injector: &Injector) -> Result<Arc<T>> {
        (self.factory)(injector)
    }
}

/// The part of a provision that does not depend on `T`
trait CatalogEntry: Send + Sync {
    fn register(&self, catalog: &mut CatalogBuilder);

    fn instantiate(&self, injector: &Injector) -> Result<()>;
}

impl<T: ?Sized + Send + Sync + 'static> CatalogEntry for Provision<T> {
    fn register(&self, catalog: &mut CatalogBuilder) {
        catalog.add_value(self.clone());
    }

    fn instantiate(&self, injector: &Injector) -> Result<()> {
        injector.get::<T>().map(drop)
    }
}

/// A single key-to-provision contribution
#[derive(Clone)]
pub struct Binding {
    key: Key,
    scope: Scope,
    entry: Arc<dyn CatalogEntry>,
    overrides: bool,
    source: String,
}

impl Binding {
    pub(crate) fn new<T: ?Sized + Send + Sync + 'static>(
        scope: Scope,
        factory: Factory<T>,
        overrides: bool,
        source: String,
    ) -> Self {
        Self {
            key: Key::of::<T>(),
            scope,
            entry: Arc::new(Provision { scope, factory }),
            overrides,
            source,
        }
    }

    /// Key this binding satisfies
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Construction scope
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Whether this binding was explicitly marked as an override
    pub fn overrides(&self) -> bool {
        self.overrides
    }

    /// Module (or scanned component) that declared the binding
    pub fn source(&self) -> &str {
        &self.source
    }

    pub(crate) fn register(&self, catalog: &mut CatalogBuilder) {
        self.entry.register(catalog);
    }

    /// Resolve through `injector`, discarding the instance
    pub(crate) fn instantiate(&self, injector: &Injector) -> Result<()> {
        self.entry.instantiate(injector)
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("key", &self.key.to_string())
            .field("scope", &self.scope)
            .field("overrides", &self.overrides)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
