//! Domain Port Interfaces
//!
//! Traits implemented by outer layers and consumed by the bootstrap.

pub mod lifecycle;

pub use lifecycle::{Registration, ShutdownCallback, ShutdownNotifier};
