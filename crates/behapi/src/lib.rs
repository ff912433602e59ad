//! # behapi
//!
//! Service composition for BDD suites testing HTTP APIs.
//!
//! A validated configuration block becomes a graph of named, lazily built
//! services: an HTTP client recording its exchanges, a key-value client,
//! a debug reporter and (when compiled in) a template engine. Before each
//! scenario the context initializers attach those collaborators to the
//! scenario context; after it the cleaner resets every resettable bag.
//!
//! ## Example
//!
//! ```ignore
//! use behapi::infrastructure::config::ConfigLoader;
//! use behapi::infrastructure::di::{CapabilityFacts, compose};
//! use behapi::domain::value_objects::ScenarioContext;
//!
//! let config = ConfigLoader::new().load()?;
//! let services = compose(&config, &CapabilityFacts::detect())?;
//!
//! let mut context = ScenarioContext::new("users can sign in");
//! services.prepare_context(&mut context)?;
//! // ... run the steps ...
//! let report = services.finish_scenario()?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - errors, value objects and the ports collaborators implement
//! - `providers` - HTTP, key-value, templating and debug adapters
//! - `infrastructure` - configuration, logging and the service registry

use std::path::Path;

use behapi_domain::error::Result;
use behapi_infrastructure::config::ConfigLoader;
use behapi_infrastructure::di::{CapabilityFacts, ComposedServices, compose};
use tracing::info;

/// Domain layer - core types and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use behapi_domain::*;
}

/// Providers - concrete collaborators
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use behapi_providers::*;
}

/// Infrastructure layer - configuration, logging and composition
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use behapi_infrastructure::*;
}

pub use behapi_domain::error::Error;
pub use behapi_infrastructure::di::ResetReport;

/// What a successful `check` composed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSummary {
    /// Registered service identifiers, in registration order
    pub services: Vec<String>,
    /// Context initializers, in run order
    pub initializers: Vec<String>,
    /// Whether templating services were wired
    pub templating: bool,
}

impl CheckSummary {
    fn from_services(services: &ComposedServices) -> Self {
        Self {
            services: services.registry().ids().map(String::from).collect(),
            initializers: services.initializer_ids().to_vec(),
            templating: services.wiring_plan().templating(),
        }
    }
}

/// Load the configuration and compose the services without building any
///
/// `config` overrides the configuration file search.
pub fn check(config: Option<&Path>, templating: bool) -> Result<CheckSummary> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load()?;

    let facts = CapabilityFacts::detect().with_templating(templating);
    let services = compose(&config, &facts)?;
    info!(
        services = services.registry().len(),
        "Configuration is valid"
    );
    Ok(CheckSummary::from_services(&services))
}
