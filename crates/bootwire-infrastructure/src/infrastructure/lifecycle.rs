//! Process Lifecycle Management
//!
//! [`ProcessShutdown`] is the process-wide shutdown-notification mechanism:
//! callbacks registered with it run at most once, when the process shuts
//! down normally. [`RegistryShutdownHook`] is the graph component that ties
//! a graph's [`ComponentRegistry`] to that mechanism.
//!
//! ## Architecture
//!
//! ```text
//!   main ──► ShutdownGuard ──(drop / Ctrl-C)──► ProcessShutdown::fire
//!                                                   │
//!                        ┌──────────────────────────┼──────────────┐
//!                        ▼                          ▼              ▼
//!              RegistryShutdownHook       RegistryShutdownHook    ...
//!                        │                          │
//!                        ▼                          ▼
//!              ComponentRegistry::clear   ComponentRegistry::clear
//! ```
//!
//! If the process is killed, nothing fires. That is accepted.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bootwire_application::ComponentRegistry;
use bootwire_domain::error::{Error, Result};
use bootwire_domain::ports::{Registration, ShutdownCallback, ShutdownNotifier};
use once_cell::sync::{Lazy, OnceCell};
use tracing::{debug, error, info, warn};

use crate::constants::REGISTRY_HOOK_NAME;

static PROCESS: Lazy<Arc<ProcessShutdown>> = Lazy::new(|| Arc::new(ProcessShutdown::new()));

struct Pending {
    registration: Registration,
    name: String,
    callback: ShutdownCallback,
}

/// Shutdown-notification mechanism with run-once callbacks
pub struct ProcessShutdown {
    callbacks: Mutex<Vec<Pending>>,
    next_id: AtomicU64,
    shutting_down: AtomicBool,
}

impl ProcessShutdown {
    /// Create a standalone notifier
    pub fn new() -> Self {
        Self {
            callbacks: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            shutting_down: AtomicBool::new(false),
        }
    }

    /// The process-wide notifier
    pub fn global() -> Arc<Self> {
        Arc::clone(&PROCESS)
    }

    /// Number of callbacks waiting to run
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    /// Begin shutdown: run every registered callback, most recent first.
    ///
    /// Only the first call runs anything; returns how many callbacks it ran.
    /// A panicking callback is logged and does not stop the others.
    pub fn fire(&self) -> usize {
        if self.shutting_down.swap(true, Ordering::SeqCst) {
            debug!("Shutdown already in progress");
            return 0;
        }

        let callbacks = std::mem::take(&mut *self.lock());
        info!(callbacks = callbacks.len(), "Shutdown signal received");

        let mut ran = 0;
        for Pending { name, callback, .. } in callbacks.into_iter().rev() {
            debug!(callback = %name, "Running shutdown callback");
            match catch_unwind(AssertUnwindSafe(callback)) {
                Ok(()) => ran += 1,
                Err(_) => error!(callback = %name, "Shutdown callback panicked"),
            }
        }
        ran
    }

    /// Guard that fires this notifier when dropped
    pub fn guard(self: &Arc<Self>) -> ShutdownGuard {
        ShutdownGuard {
            notifier: Arc::clone(self),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Pending>> {
        self.callbacks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ProcessShutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownNotifier for ProcessShutdown {
    fn register(&self, name: &str, callback: ShutdownCallback) -> Result<Registration> {
        let mut callbacks = self.lock();
        // Checked under the lock so fire() cannot drain in between
        if self.is_shutting_down() {
            warn!(callback = %name, "Shutdown callback registered after shutdown began");
            return Err(Error::lifecycle(format!(
                "cannot register '{name}': shutdown already in progress"
            )));
        }
        let registration = Registration::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        callbacks.push(Pending {
            registration,
            name: name.to_string(),
            callback,
        });
        debug!(callback = %name, pending = callbacks.len(), "Shutdown callback registered");
        Ok(registration)
    }

    fn deregister(&self, registration: Registration) -> bool {
        let mut callbacks = self.lock();
        let Some(position) = callbacks.iter().position(|p| p.registration == registration) else {
            return false;
        };
        let removed = callbacks.remove(position);
        debug!(callback = %removed.name, pending = callbacks.len(), "Shutdown callback withdrawn");
        true
    }

    fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for ProcessShutdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessShutdown")
            .field("pending", &self.pending())
            .field("is_shutting_down", &self.is_shutting_down())
            .finish()
    }
}

/// Fires its [`ProcessShutdown`] on drop
///
/// Hold one in `main` so normal exit, including an early `?` return, runs
/// the shutdown callbacks.
#[must_use = "dropping the guard fires shutdown immediately"]
#[derive(Debug)]
pub struct ShutdownGuard {
    notifier: Arc<ProcessShutdown>,
}

impl Drop for ShutdownGuard {
    fn drop(&mut self) {
        self.notifier.fire();
    }
}

/// Wait for Ctrl-C
pub async fn wait_for_signal() -> Result<()> {
    tokio::signal::ctrl_c().await?;
    info!("Interrupt received");
    Ok(())
}

// ============================================================================
// Registry Shutdown Hook
// ============================================================================

/// Lifecycle of a [`RegistryShutdownHook`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookState {
    /// Built but not yet registered
    Constructed,
    /// Registered with the shutdown notifier
    Registered,
    /// Callback ran; the registry is cleared
    Fired,
}

impl HookState {
    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Constructed,
            1 => Self::Registered,
            _ => Self::Fired,
        }
    }
}

/// Clears a graph's component registry when the process shuts down
///
/// Registration happens inside [`new`](Self::new), so a hook that exists is
/// always registered.
pub struct RegistryShutdownHook {
    registry: Arc<ComponentRegistry>,
    state: AtomicU8,
    registration: OnceCell<Registration>,
}

impl RegistryShutdownHook {
    /// Build the hook and register its one-shot callback with `notifier`
    pub fn new(registry: Arc<ComponentRegistry>, notifier: &dyn ShutdownNotifier) -> Result<Arc<Self>> {
        let hook = Arc::new(Self {
            registry,
            state: AtomicU8::new(HookState::Constructed as u8),
            registration: OnceCell::new(),
        });

        let target = Arc::clone(&hook);
        let registration = notifier.register(
            REGISTRY_HOOK_NAME,
            Box::new(move || {
                target.fire();
            }),
        )?;
        let _ = hook.registration.set(registration);

        // fire() may already have run if the notifier invoked the callback eagerly
        let _ = hook.state.compare_exchange(
            HookState::Constructed as u8,
            HookState::Registered as u8,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
        debug!("Registry shutdown hook registered");
        Ok(hook)
    }

    /// Clear the registry; only the first call has any effect
    ///
    /// Returns whether this call cleared it.
    pub fn fire(&self) -> bool {
        let previous = self.state.swap(HookState::Fired as u8, Ordering::SeqCst);
        if HookState::from_u8(previous) == HookState::Fired {
            debug!("Registry shutdown hook already fired");
            return false;
        }

        let removed = self.registry.clear();
        info!(removed, "Registry shutdown hook fired");
        true
    }

    /// Current lifecycle state
    pub fn state(&self) -> HookState {
        HookState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Registry this hook clears
    pub fn registry(&self) -> &Arc<ComponentRegistry> {
        &self.registry
    }

    /// Handle of the registered callback
    pub fn registration(&self) -> Option<Registration> {
        self.registration.get().copied()
    }

    /// Withdraw the callback from `notifier` without firing it
    ///
    /// Used when the graph that built this hook fails to resolve. Returns
    /// whether a pending callback was removed.
    pub fn withdraw(&self, notifier: &dyn ShutdownNotifier) -> bool {
        let withdrawn = self
            .registration()
            .is_some_and(|registration| notifier.deregister(registration));
        if withdrawn {
            debug!("Registry shutdown hook withdrawn");
        }
        withdrawn
    }
}

impl fmt::Debug for RegistryShutdownHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryShutdownHook")
            .field("state", &self.state())
            .field("registry", &self.registry)
            .finish()
    }
}
