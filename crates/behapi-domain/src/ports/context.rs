//! Scenario context preparation

use crate::error::Result;
use crate::value_objects::ScenarioContext;

/// Prepares a freshly created scenario context
///
/// The runner calls every initializer of the chain, in chain order, before
/// the scenario's first step. An initializer attaches whatever it owns onto
/// the context. Errors are fatal for the scenario being prepared.
pub trait ContextInitializer: Send + Sync {
    /// Attach or configure collaborators on `context`
    fn initialize_context(&self, context: &mut ScenarioContext) -> Result<()>;
}
