//! In-memory partner directory adapter.

use std::collections::HashMap;
use std::sync::RwLock;

use bankstock_core::{DomainError, DomainResult, Entity, PartnerId};
use bankstock_partners::{Partner, PartnerDirectory};

/// In-memory partner preference store.
#[derive(Debug, Default)]
pub struct InMemoryPartnerDirectory {
    partners: RwLock<HashMap<PartnerId, Partner>>,
}

impl InMemoryPartnerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, partner: Partner) -> DomainResult<()> {
        let mut partners = self
            .partners
            .write()
            .map_err(|_| DomainError::conflict("partner directory lock poisoned"))?;
        partners.insert(*partner.id(), partner);
        Ok(())
    }
}

impl PartnerDirectory for InMemoryPartnerDirectory {
    fn partner(&self, id: PartnerId) -> Option<Partner> {
        self.partners.read().ok()?.get(&id).cloned()
    }
}
