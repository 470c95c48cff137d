//! Line-item diff engine.
//!
//! Given the previously committed line-item set and the newly submitted one,
//! computes the minimal change set surfaced in a partner change notice:
//! removed lines and quantity changes. Lines that are unchanged, and lines
//! that are brand new (no prior entry), are not reported — only differences
//! relative to a pre-existing line matter to the partner.

use serde::{Deserialize, Serialize};

use bankstock_core::ItemId;

use crate::distribution::LineItem;

/// A pre-existing line whose quantity changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemChange {
    pub name: String,
    pub old_quantity: i64,
    pub new_quantity: i64,
}

/// The change-notice payload body: removed item names plus quantity changes,
/// both ordered as the items were encountered in the old set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemDiff {
    pub removed: Vec<String>,
    pub updated: Vec<ItemChange>,
}

impl LineItemDiff {
    /// Diff `old` against `new`, resolving display names through `name_of`.
    ///
    /// An item present in `old` with quantity > 0 that is absent from `new`
    /// (or present with quantity 0) is removed; an item present in both with
    /// different quantities is updated.
    pub fn between<F>(old: &[LineItem], new: &[LineItem], mut name_of: F) -> Self
    where
        F: FnMut(ItemId) -> String,
    {
        let mut diff = LineItemDiff::default();

        for old_line in old {
            if old_line.quantity <= 0 {
                continue;
            }
            let new_quantity = new
                .iter()
                .find(|l| l.item_id == old_line.item_id)
                .map(|l| l.quantity);
            match new_quantity {
                None | Some(0) => diff.removed.push(name_of(old_line.item_id)),
                Some(q) if q != old_line.quantity => diff.updated.push(ItemChange {
                    name: name_of(old_line.item_id),
                    old_quantity: old_line.quantity,
                    new_quantity: q,
                }),
                Some(_) => {}
            }
        }

        diff
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.updated.is_empty()
    }
}
