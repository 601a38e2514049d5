//! Wiring Model
//!
//! A [`Module`] contributes [`Binding`]s to a [`Binder`]. The composite
//! [`WireModule`] merges an ordered list of modules under a single
//! precedence rule, and a [`GraphResolver`] turns the result into an
//! [`Injector`] whose singletons live in a [`ComponentRegistry`].
//!
//! ## Precedence
//!
//! ```text
//! earlier module  ──► wins over ──► later module
//! .overriding()   ──► wins over ──► anything not marked
//! two overrides   ──► Ambiguous diagnostic
//! same key twice   ──► Ambiguous diagnostic
//!  in one module
//! ```

pub mod binder;
pub mod binding;
pub mod injector;
pub mod module;
pub mod registry;
pub mod resolver;
pub mod wire;

pub use binder::{Binder, BindingBuilder, Requirement};
pub use binding::{Binding, Instance, Scope};
pub use injector::Injector;
pub use module::{FnModule, Module, module_fn};
pub use registry::ComponentRegistry;
pub use resolver::{DefaultResolver, GraphResolver};
pub use wire::{Origin, WireModule};
