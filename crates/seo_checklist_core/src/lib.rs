//! Core domain logic for the SEO checklist tracker.
//! This crate is the single source of truth for project and progress invariants.

pub mod catalog;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use catalog::item::{Catalog, CatalogError, ChecklistItem, ChecklistSection};
pub use catalog::shipped::shipped_catalog;
pub use config::{AppConfig, ConfigError, ConfigOverrides};
pub use logging::{init_logging, LoggingError};
pub use model::project::{compute_progress, CheckStates, Project, ProjectId};
pub use repo::kv_repo::{KvStore, RepoError, RepoResult, SqliteKvStore};
pub use repo::project_codec::{decode_projects, encode_projects, CodecError, DecodedProjects};
pub use repo::project_repo::{ProjectSlot, PROJECTS_SLOT_KEY};
pub use service::project_store::{ProjectStore, StoreEvent, StoreSnapshot};
pub use view::{ImportanceTier, ViewState};

