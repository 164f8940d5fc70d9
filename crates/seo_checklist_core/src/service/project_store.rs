//! Project store use-case service.
//!
//! # Responsibility
//! - Own the ordered project sequence and the active selection.
//! - Apply check-state mutations and keep cached progress consistent.
//! - Persist the full sequence after every mutation, best-effort.
//!
//! # Invariants
//! - `active_project_id`, when set, always names a project in `projects`.
//! - Insertion order of `projects` is never rearranged.
//! - Invalid input and missing references are silent no-ops.
//! - Persistence failures are logged and never change in-memory state.

use crate::catalog::item::Catalog;
use crate::model::project::{Project, ProjectId};
use crate::repo::kv_repo::KvStore;
use crate::repo::project_repo::ProjectSlot;
use chrono::Utc;
use log::{debug, error, info, warn};

/// Notification emitted after a successful store mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    ProjectCreated {
        project_id: ProjectId,
    },
    ProjectDeleted {
        project_id: ProjectId,
    },
    /// Unchecked -> checked transition; drives the celebration effect.
    ItemChecked {
        project_id: ProjectId,
        item_id: String,
    },
    ItemUnchecked {
        project_id: ProjectId,
        item_id: String,
    },
}

/// Borrowed view handed to the presentation layer.
#[derive(Debug, Clone, Copy)]
pub struct StoreSnapshot<'a> {
    pub projects: &'a [Project],
    pub active: Option<&'a Project>,
}

type Listener = Box<dyn FnMut(&StoreEvent)>;

/// Single source of truth for projects and their check-states.
pub struct ProjectStore<'c, S: KvStore> {
    catalog: &'c Catalog,
    slot: ProjectSlot<S>,
    projects: Vec<Project>,
    active_project_id: Option<ProjectId>,
    listeners: Vec<Listener>,
}

impl<'c, S: KvStore> ProjectStore<'c, S> {
    /// Loads persisted projects and builds the store.
    ///
    /// An absent or unreadable slot yields an empty store. When at least one
    /// project loads, the first one in sequence order becomes active. Cached
    /// progress is recomputed against `catalog`.
    pub fn open(catalog: &'c Catalog, slot: ProjectSlot<S>) -> Self {
        let projects = match slot.load() {
            Ok(decoded) => {
                if decoded.dropped > 0 {
                    warn!(
                        "event=store_load module=store status=partial slot={} dropped={}",
                        slot.key(),
                        decoded.dropped
                    );
                }
                decoded.projects
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=fallback slot={} error={}",
                    slot.key(),
                    err
                );
                Vec::new()
            }
        };

        let mut store = Self {
            catalog,
            slot,
            active_project_id: projects.first().map(|project| project.id.clone()),
            projects,
            listeners: Vec::new(),
        };
        store.recompute_all_progress();

        info!(
            "event=store_load module=store status=ok project_count={} catalog_items={}",
            store.projects.len(),
            catalog.total_items()
        );
        store
    }

    /// Registers a listener invoked synchronously after each mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Projects in insertion order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| &project.id == id)
    }

    pub fn active_project_id(&self) -> Option<&ProjectId> {
        self.active_project_id.as_ref()
    }

    pub fn active_project(&self) -> Option<&Project> {
        self.active_project_id
            .as_ref()
            .and_then(|id| self.project(id))
    }

    pub fn snapshot(&self) -> StoreSnapshot<'_> {
        StoreSnapshot {
            projects: &self.projects,
            active: self.active_project(),
        }
    }

    /// Creates, appends and activates a project.
    ///
    /// Returns `None` without side effects when `name` is blank after
    /// trimming. The name is otherwise stored as given.
    pub fn create_project(&mut self, name: &str) -> Option<Project> {
        if name.trim().is_empty() {
            debug!("event=project_create module=store status=rejected reason=empty_name");
            return None;
        }

        let project = Project::new(name, Utc::now());
        self.active_project_id = Some(project.id.clone());
        self.projects.push(project.clone());
        info!(
            "event=project_create module=store status=ok project_id={} project_count={}",
            project.id,
            self.projects.len()
        );

        self.persist();
        self.emit(StoreEvent::ProjectCreated {
            project_id: project.id.clone(),
        });
        Some(project)
    }

    /// Removes a project; unknown ids are ignored.
    ///
    /// Deleting the active project activates the first remaining project, or
    /// clears the selection when none remain.
    pub fn delete_project(&mut self, id: &ProjectId) {
        let Some(position) = self.projects.iter().position(|project| &project.id == id) else {
            debug!(
                "event=project_delete module=store status=skipped reason=not_found project_id={id}"
            );
            return;
        };

        let removed = self.projects.remove(position);
        if self.active_project_id.as_ref() == Some(&removed.id) {
            self.active_project_id = self.projects.first().map(|project| project.id.clone());
        }
        info!(
            "event=project_delete module=store status=ok project_id={} project_count={}",
            removed.id,
            self.projects.len()
        );

        self.persist();
        self.emit(StoreEvent::ProjectDeleted {
            project_id: removed.id,
        });
    }

    /// Activates `id` when it exists; otherwise keeps the current selection.
    pub fn select_project(&mut self, id: &ProjectId) {
        if self.project(id).is_none() {
            debug!(
                "event=project_select module=store status=skipped reason=not_found project_id={id}"
            );
            return;
        }
        self.active_project_id = Some(id.clone());
    }

    /// Flips `item_id` within `project_id` and returns the updated project.
    ///
    /// Returns `None` when the project does not exist. Item ids unknown to
    /// the catalog are stored but never counted towards progress.
    pub fn toggle_check(&mut self, project_id: &ProjectId, item_id: &str) -> Option<Project> {
        let catalog = self.catalog;
        let Some(project) = self
            .projects
            .iter_mut()
            .find(|project| &project.id == project_id)
        else {
            debug!(
                "event=item_toggle module=store status=skipped reason=project_not_found project_id={project_id}"
            );
            return None;
        };

        let checked = project.toggle(item_id, catalog);
        let updated = project.clone();
        if !catalog.contains_item(item_id) {
            warn!(
                "event=item_toggle module=store status=stale_item project_id={} item_id={}",
                updated.id, item_id
            );
        }
        info!(
            "event=item_toggle module=store status=ok project_id={} item_id={} checked={} progress={}",
            updated.id, item_id, checked, updated.progress
        );

        self.persist();
        let event = if checked {
            StoreEvent::ItemChecked {
                project_id: updated.id.clone(),
                item_id: item_id.to_string(),
            }
        } else {
            StoreEvent::ItemUnchecked {
                project_id: updated.id.clone(),
                item_id: item_id.to_string(),
            }
        };
        self.emit(event);
        Some(updated)
    }

    /// Toggles `item_id` in the active project, if any.
    pub fn toggle_active(&mut self, item_id: &str) -> Option<Project> {
        let project_id = self.active_project_id.clone()?;
        self.toggle_check(&project_id, item_id)
    }

    /// Overwrites every cached progress value from its check-state.
    pub fn recompute_all_progress(&mut self) {
        for project in &mut self.projects {
            project.recompute_progress(self.catalog);
        }
    }

    fn persist(&self) {
        match self.slot.save(&self.projects) {
            Ok(()) => debug!(
                "event=store_save module=store status=ok slot={} project_count={}",
                self.slot.key(),
                self.projects.len()
            ),
            Err(err) => error!(
                "event=store_save module=store status=error slot={} error={}",
                self.slot.key(),
                err
            ),
        }
    }

    fn emit(&mut self, event: StoreEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}
