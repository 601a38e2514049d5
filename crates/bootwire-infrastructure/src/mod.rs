//! # Infrastructure Layer
//!
//! Configuration, logging, process lifecycle and the bootstrap itself.
//!
//! ## Module Categories
//!
//! ### Configuration & Bootstrap
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Layered figment configuration (defaults, TOML, env, explicit) |
//! | [`di`] | `select_scanning`, `wire`, `Bootstrap`, `boot`, `boot_type`, `run` |
//! | [`constants`] | File names, env prefixes, hook names |
//!
//! ### Lifecycle & Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`infrastructure`] | `ProcessShutdown`, `ShutdownGuard`, `RegistryShutdownHook` |
//! | [`logging`] | Structured logging with tracing |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod infrastructure;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, ConfigLoader, LoggingConfig};
pub use di::{
    BootModule, Bootstrap, boot, boot_type, parameters, properties, run, select_scanning, wire,
    wire_space,
};
pub use error_ext::ErrorContext;
pub use infrastructure::{HookState, ProcessShutdown, RegistryShutdownHook, ShutdownGuard, wait_for_signal};
pub use logging::{init_logging, parse_log_level};
