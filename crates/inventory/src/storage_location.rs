use serde::{Deserialize, Serialize};

use bankstock_core::{DomainError, DomainResult, Entity, OrganizationId, StorageLocationId};

/// A physical storage location owned by an organization.
///
/// Ledger rows hang off (storage location, item) pairs; the location itself is
/// just identity + ownership for the engine's purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageLocation {
    id: StorageLocationId,
    organization_id: OrganizationId,
    name: String,
}

impl StorageLocation {
    pub fn new(
        id: StorageLocationId,
        organization_id: OrganizationId,
        name: impl Into<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation(
                "storage location name cannot be empty",
            ));
        }
        Ok(Self {
            id,
            organization_id,
            name,
        })
    }

    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Entity for StorageLocation {
    type Id = StorageLocationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Read-only lookup of storage locations and organization ownership.
pub trait StorageLocationDirectory: Send + Sync {
    /// Fetch a location by id. `None` for unknown ids.
    fn storage_location(&self, id: StorageLocationId) -> Option<StorageLocation>;

    /// Every location owned by the organization, in registration order.
    fn locations_for(&self, organization_id: OrganizationId) -> Vec<StorageLocationId>;
}
