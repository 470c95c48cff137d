use serde::{Deserialize, Serialize};

use bankstock_core::{DomainError, DomainResult, Entity, ItemId, OrganizationId};

/// An inventory item with its organization-wide threshold configuration.
///
/// Items are read-only to the transaction engine; lifecycle management is an
/// external collaborator. `minimum_quantity` defaults to 0 (a zero minimum can
/// never be breached, since on-hand totals are non-negative);
/// `recommended_quantity` is explicitly optional — absent means "no
/// recommended check", never a sentinel zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    organization_id: OrganizationId,
    name: String,
    minimum_quantity: i64,
    recommended_quantity: Option<i64>,
}

impl Item {
    pub fn new(
        id: ItemId,
        organization_id: OrganizationId,
        name: impl Into<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }
        Ok(Self {
            id,
            organization_id,
            name,
            minimum_quantity: 0,
            recommended_quantity: None,
        })
    }

    pub fn with_minimum_quantity(mut self, minimum_quantity: i64) -> DomainResult<Self> {
        if minimum_quantity < 0 {
            return Err(DomainError::validation(
                "minimum_quantity cannot be negative",
            ));
        }
        self.minimum_quantity = minimum_quantity;
        Ok(self)
    }

    pub fn with_recommended_quantity(mut self, recommended_quantity: i64) -> DomainResult<Self> {
        if recommended_quantity < 0 {
            return Err(DomainError::validation(
                "recommended_quantity cannot be negative",
            ));
        }
        self.recommended_quantity = Some(recommended_quantity);
        Ok(self)
    }

    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn minimum_quantity(&self) -> i64 {
        self.minimum_quantity
    }

    pub fn recommended_quantity(&self) -> Option<i64> {
        self.recommended_quantity
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Read-only lookup of items, as seen by the transaction engine.
pub trait ItemCatalog: Send + Sync {
    /// Fetch an item by id. `None` for unknown ids.
    fn item(&self, id: ItemId) -> Option<Item>;
}
