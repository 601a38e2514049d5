//! Configuration
//!
//! Layered configuration built with figment. Sources merge in this order,
//! later winning:
//!
//! ```text
//! AppConfig::default() → TOML file → BOOTWIRE__* env → explicit properties
//! ```
//!
//! The whole merged tree is also flattened into dotted keys and exposed as
//! the immutable [`Properties`](bootwire_domain::Properties) map handed to
//! the bootstrap.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, LoggingConfig};
