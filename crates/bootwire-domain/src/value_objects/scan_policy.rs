//! Namespace scanning policy

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::SCAN_POLICY_KEY;
use crate::error::Error;

/// Controls whether and how the linked namespace is inspected for components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanPolicy {
    /// Scan every component under the namespace root
    #[default]
    On,
    /// Do not scan; the scan contribution binds nothing
    Off,
    /// Like `On`, but the scan result is memoised per namespace root
    Cache,
    /// Only indexed components under the namespace root
    Index,
    /// Every indexed component, regardless of namespace root
    GlobalIndex,
}

impl ScanPolicy {
    /// Every policy, in declaration order
    pub const ALL: [ScanPolicy; 5] = [
        ScanPolicy::On,
        ScanPolicy::Off,
        ScanPolicy::Cache,
        ScanPolicy::Index,
        ScanPolicy::GlobalIndex,
    ];

    /// Canonical upper-case name
    pub const fn name(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
            Self::Cache => "CACHE",
            Self::Index => "INDEX",
            Self::GlobalIndex => "GLOBAL_INDEX",
        }
    }

    /// Whether this policy inspects the namespace at all
    pub const fn scans(self) -> bool {
        !matches!(self, Self::Off)
    }

    /// Whether only indexed components are considered
    pub const fn indexed_only(self) -> bool {
        matches!(self, Self::Index | Self::GlobalIndex)
    }
}

impl fmt::Display for ScanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive match against the canonical names.
///
/// Blank input is not special-cased here; callers that treat a blank value
/// as "use the default" must check before parsing.
impl FromStr for ScanPolicy {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|policy| policy.name().eq_ignore_ascii_case(value))
            .ok_or_else(|| Error::invalid_configuration(SCAN_POLICY_KEY, value))
    }
}
