//! The resolved object graph
//!
//! Bindings that survive the precedence merge are registered in a
//! [`dill::Catalog`]; every lookup goes through `Catalog::get_one`. Singleton
//! results are kept in the graph's [`ComponentRegistry`] rather than in the
//! catalog, so shutdown can drop them all with one `clear()`.

use std::any::type_name;
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use bootwire_domain::{Diagnostic, Error, Key, Result};
use dill::{Catalog, CatalogBuilder};
use tracing::{info, trace};

use super::binder::Binder;
use super::binding::{Binding, Instance, Provision, Scope};
use super::registry::ComponentRegistry;
use super::wire::merge_binders;

thread_local! {
    static RESOLVING: RefCell<Vec<Key>> = const { RefCell::new(Vec::new()) };
}

/// Marks a key as under construction on this thread; pops it on drop
struct ResolutionGuard;

impl ResolutionGuard {
    fn enter(key: &Key) -> Result<Self> {
        RESOLVING.with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(start) = stack.iter().position(|k| k == key) {
                let mut path: Vec<String> = stack[start..].iter().map(Key::to_string).collect();
                path.push(key.to_string());
                return Err(Error::diagnostic(Diagnostic::Cyclic { path }));
            }
            stack.push(key.clone());
            Ok(Self)
        })
    }
}

impl Drop for ResolutionGuard {
    fn drop(&mut self) {
        RESOLVING.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

struct Inner {
    catalog: Catalog,
    bindings: Vec<Binding>,
    registry: Arc<ComponentRegistry>,
}

/// Queryable graph produced by a [`GraphResolver`](super::GraphResolver)
///
/// Cheap to clone; clones share the catalog and the component registry.
#[derive(Clone)]
pub struct Injector {
    inner: Arc<Inner>,
}

impl Injector {
    /// Merge `binders` in order, validate requirements, build the catalog,
    /// then construct eager singletons
    pub(crate) fn build(binders: Vec<Binder>, registry: Arc<ComponentRegistry>) -> Result<Self> {
        let (bindings, requirements) = merge_binders("Injector", binders)?.into_parts();

        let mut diagnostics: Vec<Diagnostic> = requirements
            .iter()
            .filter(|requirement| !bindings.iter().any(|b| b.key() == &requirement.key))
            .map(|requirement| Diagnostic::Missing {
                key: requirement.key.to_string(),
                required_by: Some(requirement.source.clone()),
            })
            .collect();
        if !diagnostics.is_empty() {
            return Err(Error::graph_resolution(diagnostics));
        }

        let mut catalog = CatalogBuilder::new();
        for binding in &bindings {
            binding.register(&mut catalog);
        }

        let injector = Self {
            inner: Arc::new(Inner {
                catalog: catalog.build(),
                bindings,
                registry,
            }),
        };

        let mut eager = 0;
        for binding in injector.inner.bindings.iter().filter(|b| b.scope() == Scope::EagerSingleton) {
            eager += 1;
            if let Err(err) = binding.instantiate(&injector) {
                collect_diagnostics(&mut diagnostics, binding.key(), err);
            }
        }
        if !diagnostics.is_empty() {
            return Err(Error::graph_resolution(diagnostics));
        }

        info!(bindings = injector.len(), eager, "Injector created");
        Ok(injector)
    }

    /// Instance bound for `T`
    ///
    /// Fails with `Error::RegistryCleared` once the registry has been cleared,
    /// whatever the binding's scope.
    pub fn get<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        let key = Key::of::<T>();
        if self.inner.registry.is_cleared() {
            return Err(Error::registry_cleared(key.to_string()));
        }

        let provision = self
            .inner
            .catalog
            .get_one::<Provision<T>>()
            .map_err(|err| {
                let diagnostic = if self.contains(&key) {
                    Diagnostic::Provision {
                        key: key.to_string(),
                        message: err.to_string(),
                    }
                } else {
                    Diagnostic::Missing {
                        key: key.to_string(),
                        required_by: None,
                    }
                };
                Error::diagnostic(diagnostic)
            })?;

        self.provide(&key, &provision)
    }

    /// Instance bound for `T`, or `None` when `T` is not bound
    pub fn try_get<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Option<Arc<T>>> {
        if !self.contains(&Key::of::<T>()) && !self.inner.registry.is_cleared() {
            return Ok(None);
        }
        self.get::<T>().map(Some)
    }

    /// Whether `key` is bound
    pub fn contains(&self, key: &Key) -> bool {
        self.binding(key).is_some()
    }

    /// Bound keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.inner.bindings.iter().map(Binding::key)
    }

    /// Binding for `key`, if bound
    pub fn binding(&self, key: &Key) -> Option<&Binding> {
        self.inner.bindings.iter().find(|binding| binding.key() == key)
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.inner.bindings.len()
    }

    /// True when nothing is bound
    pub fn is_empty(&self) -> bool {
        self.inner.bindings.is_empty()
    }

    /// Singleton store shared by this graph
    pub fn registry(&self) -> &Arc<ComponentRegistry> {
        &self.inner.registry
    }

    fn provide<T: ?Sized + Send + Sync + 'static>(&self, key: &Key, provision: &Provision<T>) -> Result<Arc<T>> {
        match provision.scope() {
            Scope::Instance => provision.run(self),
            Scope::Prototype => self.construct(key, provision),
            Scope::Singleton | Scope::EagerSingleton => {
                let registry = &self.inner.registry;
                if let Some(existing) = registry.get(key) {
                    return downcast::<T>(key, existing);
                }
                let created: Instance = Arc::new(self.construct(key, provision)?);
                let stored = registry.insert_if_absent(key.clone(), created)?;
                downcast::<T>(key, stored)
            }
        }
    }

    fn construct<T: ?Sized + Send + Sync + 'static>(&self, key: &Key, provision: &Provision<T>) -> Result<Arc<T>> {
        let _guard = ResolutionGuard::enter(key)?;
        trace!(key = %key, scope = ?provision.scope(), "Constructing instance");
        provision.run(self)
    }
}

impl fmt::Debug for Injector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injector")
            .field("bindings", &self.inner.bindings.len())
            .field("registry", &self.inner.registry)
            .finish_non_exhaustive()
    }
}

fn downcast<T: ?Sized + Send + Sync + 'static>(key: &Key, instance: Instance) -> Result<Arc<T>> {
    instance
        .downcast::<Arc<T>>()
        .map(|outer| Arc::clone(&*outer))
        .map_err(|_| {
            Error::diagnostic(Diagnostic::Provision {
                key: key.to_string(),
                message: format!("instance is not a {}", type_name::<T>()),
            })
        })
}

/// Flatten nested resolution diagnostics; anything else becomes a `Provision` entry
fn collect_diagnostics(diagnostics: &mut Vec<Diagnostic>, key: &Key, err: Error) {
    match err {
        Error::GraphResolution { diagnostics: nested } => {
            diagnostics.extend(nested.iter().cloned());
        }
        other => diagnostics.push(Diagnostic::Provision {
            key: key.to_string(),
            message: other.to_string(),
        }),
    }
}
