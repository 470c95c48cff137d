//! Post-commit threshold alerting.
//!
//! After a distribution commits, every touched item's organization-wide
//! on-hand total is re-checked against its configured minimum/recommended
//! thresholds. Breaches never fail the commit — they only add alert strings
//! to the success result.

pub mod threshold;

pub use threshold::{ThresholdEvaluator, ThresholdReport};
