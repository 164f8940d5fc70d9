//! Static checklist catalog.
//!
//! # Responsibility
//! - Hold the ordered sections and items every project is tracked against.
//! - Provide the fixed item count used as the progress denominator.
//!
//! # Invariants
//! - The catalog is read-only after construction.
//! - No two items share an id, across all sections.

pub mod item;
pub mod shipped;
