//! Process lifecycle port

use crate::error::Result;

/// One-shot callback run when the process shuts down
pub type ShutdownCallback = Box<dyn FnOnce() + Send + 'static>;

/// Handle to a callback held by a [`ShutdownNotifier`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Registration(u64);

impl Registration {
    /// Wrap a notifier-assigned id
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Notifier-assigned id
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Process shutdown-notification mechanism
///
/// Implementations run every registered callback at most once, on normal
/// process termination. Nothing is guaranteed on forced termination.
pub trait ShutdownNotifier: Send + Sync {
    /// Register a callback to run when shutdown begins
    ///
    /// Fails once shutdown is already in progress.
    fn register(&self, name: &str, callback: ShutdownCallback) -> Result<Registration>;

    /// Withdraw a callback that has not run yet
    ///
    /// Returns `false` when the callback already ran or was withdrawn.
    fn deregister(&self, registration: Registration) -> bool;

    /// Whether shutdown has begun
    fn is_shutting_down(&self) -> bool;
}
