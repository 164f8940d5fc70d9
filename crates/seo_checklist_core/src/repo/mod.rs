//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable key-value slot contract.
//! - Isolate SQLite and JSON details from the project store.
//!
//! # Invariants
//! - Repository APIs return typed errors; swallowing them is a caller policy.

pub mod kv_repo;
pub mod project_codec;
pub mod project_repo;
