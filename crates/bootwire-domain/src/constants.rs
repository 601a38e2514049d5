//! Domain constants
//!
//! Keys and names that are part of the bootstrap contract itself.
//! Infrastructure-only values (file names, env prefixes) live in
//! `bootwire_infrastructure::constants`.

/// Configuration key selecting the namespace scanning policy
pub const SCAN_POLICY_KEY: &str = "scanning";
