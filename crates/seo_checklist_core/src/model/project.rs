//! Project domain model.
//!
//! # Responsibility
//! - Define the per-project check-state record.
//! - Recompute the cached completion percentage on every mutation.
//!
//! # Invariants
//! - `id` is stable and never reused for another project.
//! - `progress == round(100 * checked / catalog.total_items())`, where only
//!   ids known to the catalog are counted.
//! - An item id absent from `check_states` is unchecked.

use crate::catalog::item::Catalog;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Per-project mapping from item id to checked flag.
///
/// Ordered so that serialized snapshots are deterministic.
pub type CheckStates = BTreeMap<String, bool>;

/// Stable project identifier.
///
/// Freshly created ids are time-ordered UUIDv7 strings. Any non-empty string
/// is accepted when rehydrating persisted data.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProjectId(String);

impl ProjectId {
    /// Generates a new time-ordered id.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// User-created tracking instance over the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    /// Display name, stored exactly as entered.
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub check_states: CheckStates,
    /// Cached derived value in `0..=100`. Only `recompute_progress` writes it.
    pub progress: u8,
}

impl Project {
    /// Creates an empty project with a generated id.
    pub fn new(name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self::with_id(ProjectId::generate(), name, created_at)
    }

    /// Creates an empty project with a caller-provided id.
    pub fn with_id(id: ProjectId, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            created_at,
            check_states: CheckStates::new(),
            progress: 0,
        }
    }

    /// Returns whether `item_id` is checked; `false` for unknown keys.
    pub fn is_checked(&self, item_id: &str) -> bool {
        self.check_states.get(item_id).copied().unwrap_or(false)
    }

    /// Counts checked entries that still exist in `catalog`.
    pub fn checked_count(&self, catalog: &Catalog) -> usize {
        self.check_states
            .iter()
            .filter(|(item_id, checked)| **checked && catalog.contains_item(item_id))
            .count()
    }

    /// Flips one item and refreshes `progress`.
    ///
    /// Returns the new checked state of `item_id`.
    pub fn toggle(&mut self, item_id: &str, catalog: &Catalog) -> bool {
        let checked = !self.is_checked(item_id);
        self.check_states.insert(item_id.to_string(), checked);
        self.recompute_progress(catalog);
        checked
    }

    /// Overwrites `progress` from the current check-state.
    pub fn recompute_progress(&mut self, catalog: &Catalog) {
        self.progress = compute_progress(self.checked_count(catalog), catalog.total_items());
    }
}

/// Rounded completion percentage, halves rounding up.
///
/// Returns 0 for an empty catalog. `checked` above `total` is clamped.
pub fn compute_progress(checked: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let checked = checked.min(total);
    let percent = (200 * checked + total) / (2 * total);
    // Bounded by 100 because checked <= total.
    percent as u8
}
