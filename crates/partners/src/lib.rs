//! Partner agency domain module.
//!
//! The engine only needs partner identity and the reminder preference; the
//! partner lifecycle (invitation, approval, profiles) is an external
//! collaborator.

pub mod partner;

pub use partner::{Partner, PartnerDirectory};
