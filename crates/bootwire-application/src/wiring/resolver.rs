//! Graph resolver port and default implementation

use std::sync::Arc;

use bootwire_domain::Result;
use tracing::debug;

use super::binder::Binder;
use super::injector::Injector;
use super::module::Module;
use super::registry::ComponentRegistry;

/// Turns an ordered list of wiring declarations into a queryable graph
///
/// Fails with `Error::GraphResolution` enumerating every missing, ambiguous
/// or cyclic binding it finds.
pub trait GraphResolver: Send + Sync {
    /// Resolve `modules` into a new, independent graph
    fn create_injector(&self, modules: &[&dyn Module]) -> Result<Injector>;
}

/// Resolver backed by a dill catalog
///
/// Every call creates a fresh [`ComponentRegistry`] and binds it into the
/// graph, so components needing the registry receive it by injection. Each
/// module is one merge position, in slice order; the merged bindings become
/// the catalog of the returned [`Injector`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultResolver;

impl GraphResolver for DefaultResolver {
    fn create_injector(&self, modules: &[&dyn Module]) -> Result<Injector> {
        let registry = Arc::new(ComponentRegistry::new());

        let mut root = Binder::new("DefaultResolver");
        root.bind::<ComponentRegistry>().to_instance(Arc::clone(&registry));

        let mut binders = Vec::with_capacity(modules.len() + 1);
        binders.push(root);
        for module in modules {
            debug!(module = %module.name(), "Installing module");
            let mut binder = Binder::new(module.name());
            module.configure(&mut binder)?;
            binders.push(binder);
        }

        Injector::build(binders, registry)
    }
}
