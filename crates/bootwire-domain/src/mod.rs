//! # Domain Layer
//!
//! Core types shared by every bootwire layer. Nothing in here knows how a
//! graph is resolved or how the namespace is scanned; it only names the
//! concepts the bootstrap protocol talks about.
//!
//! ## Module Categories
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error taxonomy (`InvalidConfiguration`, `GraphResolution`, `RegistryCleared`) |
//! | [`value_objects`] | `ScanPolicy`, `Key`, `Parameters`, `Properties` |
//! | [`ports`] | Lifecycle port implemented by the infrastructure layer |
//! | [`constants`] | Well-known configuration keys |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Diagnostic, Diagnostics, Error, Result};
pub use value_objects::{Key, Parameters, Properties, ScanPolicy};
