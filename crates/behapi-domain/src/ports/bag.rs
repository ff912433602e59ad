//! Stateful services cleared between scenarios

use crate::error::Result;

/// A service accumulating state during a scenario
///
/// Bags tagged `behapi.bag` with `reset = true` are reset once every
/// scenario finished, whatever its outcome.
pub trait ResettableBag: Send + Sync {
    /// Bring the bag back to its initial state
    fn reset(&self) -> Result<()>;
}
