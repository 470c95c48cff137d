//! In-memory distribution store adapter.

use std::collections::HashMap;
use std::sync::RwLock;

use bankstock_core::{DistributionId, DomainError, DomainResult, Entity};
use bankstock_distribution::{Distribution, DistributionStore};

/// In-memory store of committed distributions.
#[derive(Debug, Default)]
pub struct InMemoryDistributionStore {
    distributions: RwLock<HashMap<DistributionId, Distribution>>,
}

impl InMemoryDistributionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DistributionStore for InMemoryDistributionStore {
    fn insert(&self, distribution: Distribution) -> DomainResult<()> {
        let mut distributions = self
            .distributions
            .write()
            .map_err(|_| DomainError::conflict("distribution store lock poisoned"))?;
        if distributions.contains_key(distribution.id()) {
            return Err(DomainError::conflict(format!(
                "distribution {} already exists",
                distribution.id()
            )));
        }
        distributions.insert(*distribution.id(), distribution);
        Ok(())
    }

    fn get(&self, id: DistributionId) -> Option<Distribution> {
        self.distributions.read().ok()?.get(&id).cloned()
    }

    fn update(&self, distribution: Distribution) -> DomainResult<()> {
        let mut distributions = self
            .distributions
            .write()
            .map_err(|_| DomainError::conflict("distribution store lock poisoned"))?;
        if !distributions.contains_key(distribution.id()) {
            return Err(DomainError::not_found());
        }
        distributions.insert(*distribution.id(), distribution);
        Ok(())
    }
}
