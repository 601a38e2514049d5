//! Value Objects
//!
//! Immutable values exchanged between the bootstrap layers.

pub mod key;
pub mod parameters;
pub mod properties;
pub mod scan_policy;

pub use key::Key;
pub use parameters::Parameters;
pub use properties::Properties;
pub use scan_policy::ScanPolicy;
