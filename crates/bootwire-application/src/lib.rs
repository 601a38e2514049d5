//! # Application Layer
//!
//! The wiring model and the default graph resolver.
//!
//! ## Module Categories
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`wiring`] | `Module`, `Binder`, composite `WireModule`, `Injector`, `ComponentRegistry` |
//! | [`scanning`] | Linked component discovery (`COMPONENTS` slice) and `SpaceModule` |
//!
//! ## Flow
//!
//! ```text
//! caller modules ─┐
//!                 ├─► WireModule ─► GraphResolver ─► Injector ─► lookups
//! SpaceModule ────┘   (merge)        (dill catalog,    │
//!  (COMPONENTS)                       eager build)     └─► ComponentRegistry
//! ```

pub mod scanning;
pub mod wiring;

pub use scanning::{
    COMPONENTS, ComponentEntry, LinkedScanner, NamespaceScanner, NamespaceSpace, SpaceModule,
    list_components,
};
pub use wiring::{
    Binder, Binding, BindingBuilder, ComponentRegistry, DefaultResolver, FnModule, GraphResolver,
    Injector, Instance, Module, Origin, Requirement, Scope, WireModule, module_fn,
};
