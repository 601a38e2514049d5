//! Graph bootstrap entry points

use std::fmt;
use std::sync::Arc;

use bootwire_application::{
    Binder, ComponentRegistry, DefaultResolver, GraphResolver, Injector, LinkedScanner, Module,
    NamespaceScanner, NamespaceSpace, SpaceModule, WireModule,
};
use bootwire_domain::constants::SCAN_POLICY_KEY;
use bootwire_domain::error::Result;
use bootwire_domain::ports::ShutdownNotifier;
use bootwire_domain::{Parameters, Properties, ScanPolicy};
use once_cell::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::config::ConfigLoader;
use crate::infrastructure::lifecycle::{ProcessShutdown, RegistryShutdownHook};

/// Select the scan policy named by the `scanning` property
///
/// An absent or blank value selects [`ScanPolicy::On`]. Otherwise the value
/// must match a policy name ignoring ASCII case, or the call fails with
/// `Error::InvalidConfiguration`.
pub fn select_scanning(properties: &Properties) -> Result<ScanPolicy> {
    match properties.get(SCAN_POLICY_KEY) {
        None => Ok(ScanPolicy::default()),
        Some(value) if value.trim().is_empty() => Ok(ScanPolicy::default()),
        Some(value) => value.parse(),
    }
}

/// Compose `modules` with a scan of the global namespace, appended last
pub fn wire(policy: ScanPolicy, modules: Vec<Box<dyn Module>>) -> WireModule {
    wire_space(NamespaceSpace::global(), LinkedScanner::shared(), policy, modules)
}

/// Compose `modules` with a scan of `space` using `scanner`, appended last
pub fn wire_space(
    space: NamespaceSpace,
    scanner: Arc<dyn NamespaceScanner>,
    policy: ScanPolicy,
    modules: Vec<Box<dyn Module>>,
) -> WireModule {
    let scan = SpaceModule::new(space, policy).with_scanner(scanner);
    WireModule::new(modules).with_discovered(Box::new(scan))
}

/// Bindings every booted graph carries
///
/// - [`Properties`]
/// - [`Parameters`], a fresh copy per lookup
/// - `dyn ShutdownNotifier`
/// - [`RegistryShutdownHook`], as an eager singleton
pub struct BootModule {
    properties: Properties,
    args: Parameters,
    notifier: Arc<dyn ShutdownNotifier>,
    hook: Arc<OnceCell<Arc<RegistryShutdownHook>>>,
}

impl BootModule {
    /// Create the module
    pub fn new(properties: Properties, args: Vec<String>, notifier: Arc<dyn ShutdownNotifier>) -> Self {
        Self {
            properties,
            args: Parameters::from(args),
            notifier,
            hook: Arc::new(OnceCell::new()),
        }
    }

    /// Hook built by the graph this module configured, once constructed
    pub fn hook(&self) -> Option<&Arc<RegistryShutdownHook>> {
        self.hook.get()
    }
}

impl Module for BootModule {
    fn configure(&self, binder: &mut Binder) -> Result<()> {
        binder.bind::<Properties>().to_value(self.properties.clone());

        let args = self.args.clone();
        binder
            .bind::<Parameters>()
            .to_provider(move |_| Ok(Arc::new(args.clone())));

        binder
            .bind::<dyn ShutdownNotifier>()
            .to_instance(Arc::clone(&self.notifier));

        let slot = Arc::clone(&self.hook);
        binder.bind::<RegistryShutdownHook>().as_eager_singleton(move |injector| {
            let registry = injector.get::<ComponentRegistry>()?;
            let notifier = injector.get::<dyn ShutdownNotifier>()?;
            let hook = RegistryShutdownHook::new(registry, notifier.as_ref())?;
            let _ = slot.set(Arc::clone(&hook));
            Ok(hook)
        });
        Ok(())
    }
}

impl fmt::Debug for BootModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootModule")
            .field("properties", &self.properties.len())
            .field("args", &self.args)
            .field("hook", &self.hook.get().map(|hook| hook.state()))
            .finish_non_exhaustive()
    }
}

/// Builder for a full bootstrap
///
/// ```ignore
/// let injector = Bootstrap::new(config.properties)
///     .args(std::env::args().skip(1))
///     .module(AppModule)
///     .boot()?;
/// ```
pub struct Bootstrap {
    properties: Properties,
    args: Vec<String>,
    modules: Vec<Box<dyn Module>>,
    notifier: Arc<dyn ShutdownNotifier>,
    resolver: Arc<dyn GraphResolver>,
    space: NamespaceSpace,
    scanner: Arc<dyn NamespaceScanner>,
}

impl Bootstrap {
    /// Bootstrap over `properties` with the process notifier, the default
    /// resolver and a scan of the global namespace
    pub fn new(properties: Properties) -> Self {
        Self {
            properties,
            args: Vec::new(),
            modules: Vec::new(),
            notifier: ProcessShutdown::global(),
            resolver: Arc::new(DefaultResolver),
            space: NamespaceSpace::global(),
            scanner: LinkedScanner::shared(),
        }
    }

    /// Invocation arguments bound as [`Parameters`]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Append a caller module
    pub fn module(mut self, module: impl Module + 'static) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    /// Append several caller modules
    pub fn modules(mut self, modules: impl IntoIterator<Item = Box<dyn Module>>) -> Self {
        self.modules.extend(modules);
        self
    }

    /// Use another shutdown notifier
    pub fn notifier(mut self, notifier: Arc<dyn ShutdownNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Use another graph resolver
    pub fn resolver(mut self, resolver: Arc<dyn GraphResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Scan `space` instead of the global namespace
    pub fn space(mut self, space: NamespaceSpace) -> Self {
        self.space = space;
        self
    }

    /// Use another namespace scanner
    pub fn scanner(mut self, scanner: Arc<dyn NamespaceScanner>) -> Self {
        self.scanner = scanner;
        self
    }

    /// Resolve the graph
    ///
    /// A successful boot leaves one callback registered with the notifier.
    /// With the default notifier the caller must hold
    /// [`ProcessShutdown::guard`] for as long as the graph is in use, or the
    /// registry is never cleared. When resolution fails after the shutdown
    /// hook was built, its callback is withdrawn again.
    pub fn boot(self) -> Result<Injector> {
        let policy = select_scanning(&self.properties)?;
        debug!(policy = %policy, space = %self.space, "Scan policy selected");

        let notifier = Arc::clone(&self.notifier);
        let boot = Arc::new(BootModule::new(self.properties, self.args, self.notifier));
        let mut modules: Vec<Box<dyn Module>> = Vec::with_capacity(self.modules.len() + 1);
        modules.push(Box::new(Arc::clone(&boot)));
        modules.extend(self.modules);

        let composite = wire_space(self.space, self.scanner, policy, modules);
        let injector = match self.resolver.create_injector(&[&composite]) {
            Ok(injector) => injector,
            Err(err) => {
                if let Some(hook) = boot.hook() {
                    hook.withdraw(notifier.as_ref());
                    warn!("Resolution failed after the shutdown hook was registered; hook withdrawn");
                }
                return Err(err);
            }
        };

        info!(policy = %policy, bindings = injector.len(), "Bootstrap complete");
        Ok(injector)
    }
}

impl fmt::Debug for Bootstrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bootstrap")
            .field("properties", &self.properties.len())
            .field("args", &self.args)
            .field("modules", &self.modules.iter().map(|m| m.name()).collect::<Vec<_>>())
            .field("space", &self.space)
            .finish_non_exhaustive()
    }
}

/// Boot a graph from `properties` and invocation `args`
///
/// Registers with [`ProcessShutdown::global`]; hold its
/// [`guard`](ProcessShutdown::guard) while the returned graph is in use.
pub fn boot<I, S>(properties: Properties, args: I) -> Result<Injector>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Bootstrap::new(properties).args(args).boot()
}

/// Boot with process-ambient configuration and look up `T`
///
/// Like [`boot`], the caller must hold the global shutdown guard.
pub fn boot_type<T, I, S>(args: I) -> Result<Arc<T>>
where
    T: ?Sized + Send + Sync + 'static,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let config = ConfigLoader::new().load()?;
    boot(config.properties, args)?.get::<T>()
}

/// Process entry point: boot with process-ambient configuration, discard the graph
///
/// Holds the global shutdown guard for the whole call, so the graph's
/// registry is cleared before this returns.
pub fn run<I, S>(args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let shutdown = ProcessShutdown::global();
    let _guard = shutdown.guard();

    let config = ConfigLoader::new().load()?;
    boot(config.properties, args)?;
    Ok(())
}

/// Invocation arguments bound in `injector`; every call returns a fresh copy
pub fn parameters(injector: &Injector) -> Result<Arc<Parameters>> {
    injector.get::<Parameters>()
}

/// Configuration map bound in `injector`
pub fn properties(injector: &Injector) -> Result<Arc<Properties>> {
    injector.get::<Properties>()
}
