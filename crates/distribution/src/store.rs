//! Distribution persistence port.

use bankstock_core::{DistributionId, DomainResult};

use crate::distribution::Distribution;

/// Storage for committed distributions.
///
/// Only the transaction engine writes through this port; rejected
/// distributions never reach it.
pub trait DistributionStore: Send + Sync {
    /// Persist a freshly committed distribution.
    fn insert(&self, distribution: Distribution) -> DomainResult<()>;

    /// Load a committed distribution. `None` for unknown ids.
    fn get(&self, id: DistributionId) -> Option<Distribution>;

    /// Overwrite a committed distribution after an update (whole record;
    /// updates are never partial).
    fn update(&self, distribution: Distribution) -> DomainResult<()>;
}
