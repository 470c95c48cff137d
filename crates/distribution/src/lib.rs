//! Distribution domain module.
//!
//! A distribution is an issuance of line items from one storage location to a
//! partner agency. This crate holds the committed-distribution record, the
//! line-item rules (combining duplicates, removal semantics), and the diff
//! engine used for change notices. Orchestration against the ledger lives in
//! `bankstock-infra`.

pub mod diff;
pub mod distribution;
pub mod store;

pub use diff::{ItemChange, LineItemDiff};
pub use distribution::{combine_line_items, Distribution, DistributionStatus, LineItem};
pub use store::DistributionStore;
