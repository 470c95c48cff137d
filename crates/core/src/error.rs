//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, missing references). Infrastructure concerns belong elsewhere.
///
/// Every variant is terminal for the attempted transaction and leaves no
/// partial ledger state behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A line item was submitted with a quantity below 1.
    #[error("Validation failed: Inventory {item_name}'s quantity needs to be at least 1")]
    InvalidQuantity { item_name: String },

    /// A deduction would drive a ledger counter negative.
    #[error(
        "insufficient inventory for {item_name}: requested {requested}, only {available} on hand"
    )]
    InsufficientQuantity {
        item_name: String,
        requested: i64,
        available: i64,
    },

    /// A value failed validation (e.g. malformed or out-of-range input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A referenced entity is missing, or belongs to another organization.
    #[error("not found")]
    NotFound,

    /// A conflict occurred (e.g. duplicate name, poisoned lock).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn invalid_quantity(item_name: impl Into<String>) -> Self {
        Self::InvalidQuantity {
            item_name: item_name.into(),
        }
    }

    pub fn insufficient_quantity(
        item_name: impl Into<String>,
        requested: i64,
        available: i64,
    ) -> Self {
        Self::InsufficientQuantity {
            item_name: item_name.into(),
            requested,
            available,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// Rejection text shown by the intake layer when a distribution cannot
    /// be saved.
    pub fn user_message(&self) -> String {
        format!("Sorry, we weren't able to save the distribution. \n {self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_quantity_user_message_names_the_item() {
        let err = DomainError::invalid_quantity("Item 1");
        assert_eq!(
            err.user_message(),
            "Sorry, we weren't able to save the distribution. \n \
             Validation failed: Inventory Item 1's quantity needs to be at least 1"
        );
    }

    #[test]
    fn insufficient_quantity_reports_requested_and_available() {
        let err = DomainError::insufficient_quantity("Pads", 18, 4);
        assert_eq!(
            err.to_string(),
            "insufficient inventory for Pads: requested 18, only 4 on hand"
        );
    }
}
