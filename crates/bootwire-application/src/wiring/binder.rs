//! Binding collector handed to [`Module::configure`]

use std::marker::PhantomData;
use std::sync::Arc;

use bootwire_domain::{Key, Result};

use super::binding::{Binding, Factory, Scope};
use super::injector::Injector;
use super::module::Module;

/// A key some module needs but does not bind itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Key that must be bound somewhere in the graph
    pub key: Key,
    /// Module that declared the requirement
    pub source: String,
}

/// Collects the bindings and requirements of one module
#[derive(Debug)]
pub struct Binder {
    source: String,
    bindings: Vec<Binding>,
    requirements: Vec<Requirement>,
}

impl Binder {
    /// Create an empty binder; `source` labels every binding it records
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            bindings: Vec::new(),
            requirements: Vec::new(),
        }
    }

    /// Label attached to bindings recorded by this binder
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Start a binding for `T`
    ///
    /// ```ignore
    /// binder.bind::<dyn Greeter>().to_singleton(|_| Ok(Arc::new(English)));
    /// ```
    pub fn bind<T: ?Sized + Send + Sync + 'static>(&mut self) -> BindingBuilder<'_, T> {
        BindingBuilder {
            binder: self,
            overrides: false,
            _type: PhantomData,
        }
    }

    /// Declare that the graph must contain a binding for `T`
    pub fn require<T: ?Sized + 'static>(&mut self) -> &mut Self {
        self.require_key(Key::of::<T>())
    }

    /// Declare that the graph must contain a binding for `key`
    pub fn require_key(&mut self, key: Key) -> &mut Self {
        self.requirements.push(Requirement {
            key,
            source: self.source.clone(),
        });
        self
    }

    /// Configure `module` and absorb its bindings, keeping the module's name as their source
    pub fn install(&mut self, module: &dyn Module) -> Result<()> {
        let mut child = Binder::new(module.name());
        module.configure(&mut child)?;
        self.extend(child);
        Ok(())
    }

    /// Bindings recorded so far, in declaration order
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Requirements recorded so far
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    pub(crate) fn push(&mut self, binding: Binding) {
        self.bindings.push(binding);
    }

    pub(crate) fn push_requirement(&mut self, requirement: Requirement) {
        self.requirements.push(requirement);
    }

    pub(crate) fn extend(&mut self, other: Binder) {
        self.bindings.extend(other.bindings);
        self.requirements.extend(other.requirements);
    }

    pub(crate) fn into_parts(self) -> (Vec<Binding>, Vec<Requirement>) {
        (self.bindings, self.requirements)
    }
}

/// Fluent builder returned by [`Binder::bind`]
///
/// Nothing is recorded until one of the `to_*` / `as_*` terminal methods runs.
pub struct BindingBuilder<'a, T: ?Sized> {
    binder: &'a mut Binder,
    overrides: bool,
    _type: PhantomData<fn() -> Arc<T>>,
}

impl<T: ?Sized + Send + Sync + 'static> BindingBuilder<'_, T> {
    /// Mark as an override: replaces a same-key binding from any position
    pub fn overriding(mut self) -> Self {
        self.overrides = true;
        self
    }

    /// Bind to a pre-built instance
    pub fn to_instance(self, instance: Arc<T>) {
        self.record(
            Scope::Instance,
            Arc::new(move |_: &Injector| -> Result<Arc<T>> { Ok(Arc::clone(&instance)) }),
        );
    }

    /// Build a new instance on every lookup
    pub fn to_provider<F>(self, provider: F)
    where
        F: Fn(&Injector) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        self.record(Scope::Prototype, Arc::new(provider));
    }

    /// Build once on first lookup
    pub fn to_singleton<F>(self, provider: F)
    where
        F: Fn(&Injector) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        self.record(Scope::Singleton, Arc::new(provider));
    }

    /// Build once while the graph is created
    pub fn as_eager_singleton<F>(self, provider: F)
    where
        F: Fn(&Injector) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        self.record(Scope::EagerSingleton, Arc::new(provider));
    }

    fn record(self, scope: Scope, factory: Factory<T>) {
        let source = self.binder.source.clone();
        self.binder
            .push(Binding::new(scope, factory, self.overrides, source));
    }
}

impl<T: Send + Sync + 'static> BindingBuilder<'_, T> {
    /// Bind to an owned value
    pub fn to_value(self, value: T) {
        self.to_instance(Arc::new(value));
    }
}
