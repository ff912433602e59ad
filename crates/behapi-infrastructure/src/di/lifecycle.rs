//! Scenario lifecycle
//!
//! Before a scenario, the [`InitializerChain`] prepares its context; after
//! it, the [`ResetCoordinator`] resets every bag it holds. The cleaner is
//! fail-open: one bag failing never keeps the others from being reset.

use std::sync::{Arc, RwLock};

use behapi_domain::constants::{CLEANER_SERVICE, CONTEXT_INITIALIZER_TAG};
use behapi_domain::error::{Error, Result};
use behapi_domain::ports::{ContextInitializer, ResettableBag};
use behapi_domain::value_objects::ScenarioContext;
use tracing::{debug, warn};

use super::conditional::WiringPlan;
use super::instance::Instance;
use super::registry::ServiceRegistry;
use super::tags::TaggedCollector;

/// Outcome of one reset pass
#[derive(Debug, Default)]
pub struct ResetReport {
    /// Bags reset successfully, in registration order
    pub reset: Vec<String>,
    /// One error per bag that failed
    pub failures: Vec<Error>,
}

impl ResetReport {
    /// Number of bags the pass tried to reset
    pub fn attempted(&self) -> usize {
        self.reset.len() + self.failures.len()
    }

    /// Whether every bag was reset
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The cleaner: resets the bags registered with `reset = true`
///
/// Bags are held by identifier and looked up in the registry on every pass,
/// so a bag that cannot be built or is not a bag only fails its own reset.
#[derive(Default)]
pub struct ResetCoordinator {
    bags: RwLock<Vec<String>>,
}

impl ResetCoordinator {
    /// Create a cleaner holding no bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold the bag registered under `id`
    pub fn add_bag(&self, id: impl Into<String>) -> Result<()> {
        let id = id.into();
        debug!(bag = %id, "Bag added to cleaner");
        self.bags
            .write()
            .map_err(|_| Error::infrastructure("Cleaner lock poisoned"))?
            .push(id);
        Ok(())
    }

    /// Identifiers of the held bags, in the order they were added
    pub fn held_ids(&self) -> Vec<String> {
        self.bags.read().map(|bags| bags.clone()).unwrap_or_default()
    }

    /// Number of held bags
    pub fn len(&self) -> usize {
        self.bags.read().map(|bags| bags.len()).unwrap_or(0)
    }

    /// Whether no bag is held
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reset every held bag of `registry`, in order
    pub fn reset_all(&self, registry: &ServiceRegistry) -> ResetReport {
        let bags = match self.bags.read() {
            Ok(bags) => bags.clone(),
            Err(_) => {
                return ResetReport {
                    reset: Vec::new(),
                    failures: vec![Error::infrastructure("Cleaner lock poisoned")],
                };
            }
        };

        let mut report = ResetReport::default();
        for id in bags {
            let outcome = registry
                .get_as::<dyn ResettableBag>(&id)
                .and_then(|bag| bag.reset());
            match outcome {
                Ok(()) => report.reset.push(id),
                Err(e) => {
                    warn!(bag = %id, error = %e, "Failed to reset bag");
                    report.failures.push(Error::reset_failure(id, e.to_string()));
                }
            }
        }
        debug!(
            reset = report.reset.len(),
            failed = report.failures.len(),
            "Reset pass finished"
        );
        report
    }
}

impl std::fmt::Debug for ResetCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetCoordinator")
            .field("bags", &self.held_ids())
            .finish()
    }
}

/// Ordered context initializers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitializerChain {
    ids: Vec<String>,
}

impl InitializerChain {
    /// Chain of every service tagged as context initializer
    ///
    /// Order is registration order. A service tagged twice runs twice.
    pub fn collect(registry: &ServiceRegistry) -> Self {
        Self {
            ids: TaggedCollector::new(CONTEXT_INITIALIZER_TAG).collect_ids(registry),
        }
    }

    /// Initializer identifiers, in run order
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of initializers
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the chain is empty
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Run every initializer against `context`, stopping at the first error
    pub fn apply(&self, registry: &ServiceRegistry, context: &mut ScenarioContext) -> Result<()> {
        for id in &self.ids {
            let initializer = registry.get_as::<dyn ContextInitializer>(id)?;
            debug!(initializer = %id, scenario = context.title(), "Initializing context");
            initializer.initialize_context(context)?;
        }
        Ok(())
    }
}

/// The composed service graph handed to the runner
#[derive(Debug)]
pub struct ComposedServices {
    registry: ServiceRegistry,
    initializers: InitializerChain,
    plan: WiringPlan,
}

impl ComposedServices {
    pub(crate) fn new(
        registry: ServiceRegistry,
        initializers: InitializerChain,
        plan: WiringPlan,
    ) -> Self {
        Self {
            registry,
            initializers,
            plan,
        }
    }

    /// Underlying registry
    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Optional features that were wired
    pub fn wiring_plan(&self) -> WiringPlan {
        self.plan
    }

    /// Shared instance of `id`
    pub fn get(&self, id: &str) -> Result<Instance> {
        self.registry.get(id)
    }

    /// View `T` of the instance of `id`
    pub fn get_as<T>(&self, id: &str) -> Result<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.registry.get_as::<T>(id)
    }

    /// The initializer chain
    pub fn initializer_chain(&self) -> &InitializerChain {
        &self.initializers
    }

    /// Initializer identifiers, in run order
    pub fn initializer_ids(&self) -> &[String] {
        self.initializers.ids()
    }

    /// Run the initializer chain against a fresh scenario context
    pub fn prepare_context(&self, context: &mut ScenarioContext) -> Result<()> {
        self.initializers.apply(&self.registry, context)
    }

    /// The cleaner
    pub fn reset_coordinator(&self) -> Result<Arc<ResetCoordinator>> {
        self.registry.get_as::<ResetCoordinator>(CLEANER_SERVICE)
    }

    /// Reset every bag after a scenario
    ///
    /// Bag failures, including a bag that cannot be built, are reported, not
    /// raised; only failing to obtain the cleaner itself is an error.
    pub fn finish_scenario(&self) -> Result<ResetReport> {
        Ok(self.reset_coordinator()?.reset_all(&self.registry))
    }
}
