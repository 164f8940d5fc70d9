//! Project sequence persistence over a single key-value slot.
//!
//! # Responsibility
//! - Load and save the full ordered project sequence as one slot value.
//!
//! # Invariants
//! - Every save writes the complete sequence, including an empty one.
//! - A missing slot loads as an empty sequence.

use crate::model::project::Project;
use crate::repo::kv_repo::{KvStore, RepoResult};
use crate::repo::project_codec::{decode_projects, encode_projects, DecodedProjects};

/// Slot key holding the serialized project sequence.
pub const PROJECTS_SLOT_KEY: &str = "seo-checklist-projects";

/// Persistence adapter binding a `KvStore` to the projects slot.
pub struct ProjectSlot<S: KvStore> {
    store: S,
    key: String,
}

impl<S: KvStore> ProjectSlot<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, PROJECTS_SLOT_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads and decodes the slot.
    ///
    /// # Errors
    /// - `RepoError::Db` when the slot cannot be read.
    /// - `RepoError::Codec` when the stored value is not a project array.
    pub fn load(&self) -> RepoResult<DecodedProjects> {
        match self.store.get(&self.key)? {
            Some(raw) => Ok(decode_projects(&raw)?),
            None => Ok(DecodedProjects::default()),
        }
    }

    /// Encodes and writes the full sequence.
    pub fn save(&self, projects: &[Project]) -> RepoResult<()> {
        let raw = encode_projects(projects)?;
        self.store.put(&self.key, &raw)
    }
}
