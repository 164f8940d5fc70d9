//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model mutations and persistence into use-case level APIs.
//! - Keep presentation layers decoupled from storage details.

pub mod project_store;
