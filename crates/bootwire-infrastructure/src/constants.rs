//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Constants of the bootstrap contract itself are defined in
//! `bootwire_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "bootwire.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "bootwire";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "BOOTWIRE";

/// Separator between nesting levels in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding a tracing filter directive
pub const LOG_FILTER_ENV: &str = "BOOTWIRE_LOG";

/// File stem used for rolling log files when none can be derived
pub const DEFAULT_LOG_FILE_STEM: &str = "bootwire";

// ============================================================================
// LIFECYCLE CONSTANTS
// ============================================================================

/// Name under which the registry shutdown hook registers its callback
pub const REGISTRY_HOOK_NAME: &str = "component-registry";
