//! Process-level infrastructure services

pub mod lifecycle;

pub use lifecycle::{HookState, ProcessShutdown, RegistryShutdownHook, ShutdownGuard, wait_for_signal};
