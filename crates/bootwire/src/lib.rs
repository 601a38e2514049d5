//! # bootwire
//!
//! A dependency-resolution bootstrap: given explicit wiring modules and the
//! components linked into the binary, it assembles a resolved object graph,
//! exposes typed lookups, and clears the graph's component registry when the
//! process shuts down.
//!
//! ## Example
//!
//! ```ignore
//! use bootwire::{Bootstrap, ConfigLoader, module_fn};
//!
//! let config = ConfigLoader::new().load()?;
//! let injector = Bootstrap::new(config.properties)
//!     .args(std::env::args().skip(1))
//!     .module(module_fn("app", |binder| {
//!         binder.bind::<dyn Clock>().to_singleton(|_| Ok(Arc::new(SystemClock)));
//!         Ok(())
//!     }))
//!     .boot()?;
//!
//! let clock = injector.get::<dyn Clock>()?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Error taxonomy, keys, scan policy, lifecycle port
//! - `application` - Wiring model, injector, component registry, scanning
//! - `infrastructure` - Configuration, logging, process shutdown, bootstrap
//! - [`cli`] - Command line of the `bootwire` binary

pub mod cli;

/// Domain layer - error taxonomy and value objects
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use bootwire_domain::*;
}

/// Application layer - wiring model and graph resolver
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use bootwire_application::*;
}

/// Infrastructure layer - config, logging, lifecycle and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use bootwire_infrastructure::*;
}

// Re-export commonly used types at the crate root
pub use domain::{Error, Key, Parameters, Properties, Result, ScanPolicy};

pub use application::{
    Binder, COMPONENTS, ComponentEntry, Injector, Module, NamespaceSpace, WireModule, module_fn,
};

pub use infrastructure::{
    Bootstrap, ConfigLoader, ProcessShutdown, RegistryShutdownHook, boot, boot_type, parameters,
    run, select_scanning, wire,
};
