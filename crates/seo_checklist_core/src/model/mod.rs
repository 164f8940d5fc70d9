//! Project domain model.
//!
//! # Responsibility
//! - Define the per-project tracking record and its check-state.
//! - Own the progress formula so no other layer derives it differently.
//!
//! # Invariants
//! - Every project is identified by a stable `ProjectId`.
//! - `progress` is always recomputable from `check_states` and the catalog.

pub mod project;
