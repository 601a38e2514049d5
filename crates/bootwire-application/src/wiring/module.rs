//! Wiring declarations

use std::any::type_name;
use std::sync::Arc;

use bootwire_domain::Result;

use super::binder::Binder;

/// A named, composable unit contributing bindings to a graph
pub trait Module: Send + Sync {
    /// Name used as the source of this module's bindings in diagnostics
    fn name(&self) -> String {
        short_type_name(type_name::<Self>())
    }

    /// Record this module's bindings and requirements
    fn configure(&self, binder: &mut Binder) -> Result<()>;
}

impl<M: Module + ?Sized> Module for Box<M> {
    fn name(&self) -> String {
        (**self).name()
    }

    fn configure(&self, binder: &mut Binder) -> Result<()> {
        (**self).configure(binder)
    }
}

impl<M: Module + ?Sized> Module for Arc<M> {
    fn name(&self) -> String {
        (**self).name()
    }

    fn configure(&self, binder: &mut Binder) -> Result<()> {
        (**self).configure(binder)
    }
}

/// Module backed by a closure
pub struct FnModule<F> {
    name: String,
    configure: F,
}

impl<F> Module for FnModule<F>
where
    F: Fn(&mut Binder) -> Result<()> + Send + Sync,
{
    fn name(&self) -> String {
        self.name.clone()
    }

    fn configure(&self, binder: &mut Binder) -> Result<()> {
        (self.configure)(binder)
    }
}

/// Wrap a closure as a [`Module`]
///
/// ```ignore
/// let app = module_fn("app", |binder| {
///     binder.bind::<Config>().to_value(Config::default());
///     Ok(())
/// });
/// ```
pub fn module_fn<F>(name: impl Into<String>, configure: F) -> FnModule<F>
where
    F: Fn(&mut Binder) -> Result<()> + Send + Sync,
{
    FnModule {
        name: name.into(),
        configure,
    }
}

/// `a::b::Foo<c::Bar>` -> `Foo<c::Bar>`
fn short_type_name(full: &str) -> String {
    let (path, generics) = full.split_at(full.find('<').unwrap_or(full.len()));
    let base = path.rsplit("::").next().unwrap_or(path);
    format!("{base}{generics}")
}
