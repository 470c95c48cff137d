//! In-memory item catalog adapter.

use std::collections::HashMap;
use std::sync::RwLock;

use bankstock_core::{DomainError, DomainResult, Entity, ItemId};
use bankstock_inventory::{Item, ItemCatalog};

/// In-memory item lookup.
///
/// Item CRUD is an external collaborator; this adapter only enforces the one
/// invariant the engine relies on for readable alerts — item names are unique
/// (case-insensitively) within an organization.
#[derive(Debug, Default)]
pub struct InMemoryItemCatalog {
    items: RwLock<HashMap<ItemId, Item>>,
}

impl InMemoryItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, item: Item) -> DomainResult<()> {
        let mut items = self
            .items
            .write()
            .map_err(|_| DomainError::conflict("item catalog lock poisoned"))?;

        let duplicate = items.values().any(|existing| {
            existing.id() != item.id()
                && existing.organization_id() == item.organization_id()
                && existing.name().to_lowercase() == item.name().to_lowercase()
        });
        if duplicate {
            return Err(DomainError::validation(format!(
                "item name '{}' is already taken",
                item.name()
            )));
        }

        items.insert(*item.id(), item);
        Ok(())
    }
}

impl ItemCatalog for InMemoryItemCatalog {
    fn item(&self, id: ItemId) -> Option<Item> {
        self.items.read().ok()?.get(&id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use bankstock_core::OrganizationId;

    use super::*;

    #[test]
    fn rejects_case_insensitive_duplicate_names_within_an_organization() {
        let catalog = InMemoryItemCatalog::new();
        let organization_id = OrganizationId::new();
        catalog
            .insert(Item::new(ItemId::new(), organization_id, "Diapers").unwrap())
            .unwrap();

        let err = catalog
            .insert(Item::new(ItemId::new(), organization_id, "DIAPERS").unwrap())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn same_name_is_fine_across_organizations() {
        let catalog = InMemoryItemCatalog::new();
        catalog
            .insert(Item::new(ItemId::new(), OrganizationId::new(), "Diapers").unwrap())
            .unwrap();
        catalog
            .insert(Item::new(ItemId::new(), OrganizationId::new(), "Diapers").unwrap())
            .unwrap();
    }
}
