//! In-memory storage location directory adapter.

use std::sync::RwLock;

use bankstock_core::{DomainError, DomainResult, Entity, OrganizationId, StorageLocationId};
use bankstock_inventory::{StorageLocation, StorageLocationDirectory};

/// In-memory registry of storage locations, preserving registration order so
/// aggregation (and alert composition downstream) is deterministic.
#[derive(Debug, Default)]
pub struct InMemoryStorageLocationDirectory {
    locations: RwLock<Vec<StorageLocation>>,
}

impl InMemoryStorageLocationDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, location: StorageLocation) -> DomainResult<()> {
        let mut locations = self
            .locations
            .write()
            .map_err(|_| DomainError::conflict("storage location directory lock poisoned"))?;
        if locations.iter().any(|l| l.id() == location.id()) {
            return Err(DomainError::conflict(format!(
                "storage location {} is already registered",
                location.id()
            )));
        }
        locations.push(location);
        Ok(())
    }
}

impl StorageLocationDirectory for InMemoryStorageLocationDirectory {
    fn storage_location(&self, id: StorageLocationId) -> Option<StorageLocation> {
        self.locations
            .read()
            .ok()?
            .iter()
            .find(|l| *l.id() == id)
            .cloned()
    }

    fn locations_for(&self, organization_id: OrganizationId) -> Vec<StorageLocationId> {
        match self.locations.read() {
            Ok(locations) => locations
                .iter()
                .filter(|l| l.organization_id() == organization_id)
                .map(|l| *l.id())
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}
