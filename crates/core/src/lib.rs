//! `bankstock-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! strongly-typed identifiers, the shared error model, and the `Entity` trait.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{DistributionId, ItemId, OrganizationId, PartnerId, StorageLocationId};
