//! Bootstrap
//!
//! Composition root: selects the scan policy, composes the caller's modules
//! with the scan module and resolves the result into an [`Injector`].
//!
//! ```text
//! Properties ─► select_scanning ─► wire(policy, [BootModule, caller...]) ─► GraphResolver ─► Injector
//! ```
//!
//! [`Injector`]: bootwire_application::Injector

pub mod bootstrap;

pub use bootstrap::{
    BootModule, Bootstrap, boot, boot_type, parameters, properties, run, select_scanning, wire,
    wire_space,
};
