use serde::{Deserialize, Serialize};

use bankstock_core::{DomainError, DomainResult, Entity, OrganizationId, PartnerId};

/// A partner agency receiving distributions from an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    id: PartnerId,
    organization_id: OrganizationId,
    name: String,
    send_reminders: bool,
}

impl Partner {
    pub fn new(
        id: PartnerId,
        organization_id: OrganizationId,
        name: impl Into<String>,
        send_reminders: bool,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("partner name cannot be empty"));
        }
        Ok(Self {
            id,
            organization_id,
            name,
            send_reminders,
        })
    }

    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the partner has opted in to reminder emails.
    pub fn send_reminders(&self) -> bool {
        self.send_reminders
    }
}

impl Entity for Partner {
    type Id = PartnerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Read-only lookup of partner preferences.
pub trait PartnerDirectory: Send + Sync {
    /// Fetch a partner by id. `None` for unknown ids.
    fn partner(&self, id: PartnerId) -> Option<Partner>;
}
