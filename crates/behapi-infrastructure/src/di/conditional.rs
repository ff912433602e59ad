//! Conditional wiring
//!
//! Optional services are registered only when the capability they need is
//! present. Facts are gathered once, before composition, and frozen into a
//! [`WiringPlan`]; nothing is detected afterwards.

use behapi_domain::constants::TEMPLATING_FEATURE;
use tracing::info;

/// Whether the templating services were compiled into this build
const TEMPLATING_COMPILED: bool = cfg!(feature = "templating");

/// Capabilities available to this process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CapabilityFacts {
    templating: bool,
}

impl CapabilityFacts {
    /// Capabilities compiled into this build
    pub fn detect() -> Self {
        Self {
            templating: TEMPLATING_COMPILED,
        }
    }

    /// No optional capability
    pub fn none() -> Self {
        Self::default()
    }

    /// Override templating availability
    ///
    /// Templating can be switched off, but never on when the engine is not
    /// compiled in.
    pub fn with_templating(mut self, available: bool) -> Self {
        self.templating = available && TEMPLATING_COMPILED;
        self
    }

    /// Whether the capability named `feature` is available
    pub fn is_available(&self, feature: &str) -> bool {
        match feature {
            TEMPLATING_FEATURE => self.templating,
            _ => false,
        }
    }
}

/// Decides whether an optional feature gets wired
pub struct ConditionalWiringPolicy;

impl ConditionalWiringPolicy {
    /// Unknown features are never enabled
    pub fn should_enable(feature: &str, facts: &CapabilityFacts) -> bool {
        facts.is_available(feature)
    }
}

/// Frozen decisions of one composition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WiringPlan {
    templating: bool,
}

impl WiringPlan {
    /// Decide every optional feature from `facts`
    pub fn from_facts(facts: &CapabilityFacts) -> Self {
        let templating = ConditionalWiringPolicy::should_enable(TEMPLATING_FEATURE, facts);
        info!(templating, "Wiring plan decided");
        Self { templating }
    }

    /// Whether templating services are wired
    pub fn templating(&self) -> bool {
        self.templating
    }
}
