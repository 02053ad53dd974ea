//! The closing-task catalog.
//!
//! The branch closes against a fixed list of tasks. The catalog ships with
//! the server so the form and the report agree on one source of truth; each
//! browser session materializes its own mutable copy.

mod types;

pub use types::ChecklistItem;

/// Returns a fresh checklist: every task unchecked, no photos attached.
#[must_use]
pub fn default_checklist() -> Vec<ChecklistItem> {
    CATALOG
        .iter()
        .map(|&(text, require_image)| ChecklistItem::new(text, require_image))
        .collect()
}

/// Number of tasks not yet marked done.
#[must_use]
pub fn remaining(items: &[ChecklistItem]) -> usize {
    items.iter().filter(|item| !item.done).count()
}

/// Task text plus whether photo evidence is required.
const CATALOG: &[(&str, bool)] = &[
    ("Verify all cardboard is in the compactor", true),
    ("Return carts from the storeroom to the floor", false),
    ("Confirm the forklift is plugged in for charging", true),
    ("Close and lock the loading dock door", true),
    ("Switch off ovens and bakery equipment", true),
    ("Check refrigerator and freezer doors are sealed", true),
    ("Empty the registers and store the drawers in the safe", false),
    ("Turn off sales floor lighting", false),
    ("Take out the trash from all departments", true),
    ("Arm the alarm and lock the main entrance", false),
];
