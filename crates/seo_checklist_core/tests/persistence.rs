use rusqlite::Connection;
use seo_checklist_core::db::{open_db, open_db_in_memory, DbError};
use seo_checklist_core::{
    decode_projects, encode_projects, shipped_catalog, KvStore, Project, ProjectSlot,
    ProjectStore, RepoError, RepoResult, SqliteKvStore, PROJECTS_SLOT_KEY,
};
use std::cell::Cell;

fn open_store(conn: &Connection) -> ProjectStore<'static, SqliteKvStore<'_>> {
    ProjectStore::open(shipped_catalog(), ProjectSlot::new(SqliteKvStore::new(conn)))
}

fn raw_slot(conn: &Connection) -> Option<String> {
    SqliteKvStore::new(conn).get(PROJECTS_SLOT_KEY).unwrap()
}

/// Slot store whose every call fails, counting write attempts.
#[derive(Default)]
struct BrokenStore {
    writes: Cell<usize>,
}

fn broken() -> RepoError {
    RepoError::Db(DbError::Sqlite(rusqlite::Error::InvalidQuery))
}

impl KvStore for BrokenStore {
    fn get(&self, _key: &str) -> RepoResult<Option<String>> {
        Err(broken())
    }

    fn put(&self, _key: &str, _value: &str) -> RepoResult<()> {
        self.writes.set(self.writes.get() + 1);
        Err(broken())
    }

    fn remove(&self, _key: &str) -> RepoResult<()> {
        Err(broken())
    }
}

#[test]
fn empty_slot_opens_empty_store() {
    let conn = open_db_in_memory().unwrap();
    let store = open_store(&conn);

    assert!(store.projects().is_empty());
    assert!(store.active_project().is_none());
    assert_eq!(raw_slot(&conn), None);
}

#[test]
fn every_mutation_is_written_through() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    let project = store.create_project("Site A").unwrap();
    let after_create = decode_projects(&raw_slot(&conn).unwrap()).unwrap();
    assert_eq!(after_create.projects, vec![project.clone()]);

    let toggled = store.toggle_check(&project.id, "pai-1").unwrap();
    let after_toggle = decode_projects(&raw_slot(&conn).unwrap()).unwrap();
    assert_eq!(after_toggle.projects, vec![toggled]);

    store.delete_project(&project.id);
    assert_eq!(raw_slot(&conn).as_deref(), Some("[]"));
}

#[test]
fn reopen_restores_sequence_and_activates_first_project() {
    let conn = open_db_in_memory().unwrap();
    let (first, second) = {
        let mut store = open_store(&conn);
        let first = store.create_project("Site A").unwrap();
        let second = store.create_project("Site B").unwrap();
        store.toggle_check(&second.id, "pla-3").unwrap();
        assert_eq!(store.active_project_id(), Some(&second.id));
        (first, second)
    };

    let store = open_store(&conn);
    let ids: Vec<_> = store.projects().iter().map(|p| p.id.clone()).collect();
    assert_eq!(ids, [first.id.clone(), second.id.clone()]);
    assert_eq!(store.active_project_id(), Some(&first.id));

    let restored = store.project(&second.id).unwrap();
    assert!(restored.is_checked("pla-3"));
    assert_eq!(restored.progress, 2);
    assert_eq!(restored.created_at, second.created_at);
}

#[test]
fn file_backed_store_survives_connection_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("checklist.db");

    let project_id = {
        let conn = open_db(&path).unwrap();
        let mut store = open_store(&conn);
        let project = store.create_project("Site A").unwrap();
        store.toggle_check(&project.id, "pai-26").unwrap();
        project.id
    };

    let conn = open_db(&path).unwrap();
    let store = open_store(&conn);
    let project = store.active_project().unwrap();
    assert_eq!(project.id, project_id);
    assert!(project.is_checked("pai-26"));
}

#[test]
fn serialized_sequence_round_trips_field_for_field() {
    let catalog = shipped_catalog();
    let mut first = Project::new("Site A", chrono::Utc::now());
    first.toggle("pla-1", catalog);
    first.toggle("pai-9", catalog);
    first.toggle("pai-9", catalog);
    let second = Project::new("Site B", chrono::Utc::now());
    let original = vec![first, second];

    let decoded = decode_projects(&encode_projects(&original).unwrap()).unwrap();

    assert_eq!(decoded.dropped, 0);
    assert_eq!(decoded.projects, original);
}

#[test]
fn unparsable_slot_falls_back_to_empty_store() {
    let conn = open_db_in_memory().unwrap();
    SqliteKvStore::new(&conn)
        .put(PROJECTS_SLOT_KEY, "{not json")
        .unwrap();

    let mut store = open_store(&conn);
    assert!(store.projects().is_empty());
    assert!(store.active_project().is_none());

    store.create_project("Site A").unwrap();
    let decoded = decode_projects(&raw_slot(&conn).unwrap()).unwrap();
    assert_eq!(decoded.projects.len(), 1);
}

#[test]
fn legacy_records_load_and_progress_is_recomputed() {
    let conn = open_db_in_memory().unwrap();
    SqliteKvStore::new(&conn)
        .put(
            PROJECTS_SLOT_KEY,
            r#"[
                {"id":"1712345678901","name":"Old site","createdAt":"2024-04-05T19:34:38.901Z",
                 "checkStates":{"pla-1":true,"pla-2":false,"removed-9":true},"progress":77},
                {"id":"","name":"broken","createdAt":"2024-04-05T19:34:38.901Z","checkStates":{},"progress":0}
            ]"#,
        )
        .unwrap();

    let store = open_store(&conn);
    assert_eq!(store.projects().len(), 1);
    let project = store.active_project().unwrap();
    assert_eq!(project.id.as_str(), "1712345678901");
    assert_eq!(project.progress, 2);
    assert!(!project.is_checked("pla-2"));
}

#[test]
fn malformed_neighbour_does_not_wipe_saved_projects() {
    let conn = open_db_in_memory().unwrap();
    SqliteKvStore::new(&conn)
        .put(
            PROJECTS_SLOT_KEY,
            r#"[
                {"id":"1","name":"good","createdAt":"2024-04-05T19:34:38.901Z",
                 "checkStates":{"pla-1":true},"progress":2},
                {"id":"2","name":"bad date","createdAt":null,"checkStates":{},"progress":0}
            ]"#,
        )
        .unwrap();

    let mut store = open_store(&conn);
    assert_eq!(store.projects().len(), 1);
    assert_eq!(store.active_project().map(|p| p.name.as_str()), Some("good"));

    store.create_project("new").unwrap();
    let decoded = decode_projects(&raw_slot(&conn).unwrap()).unwrap();
    let names: Vec<_> = decoded.projects.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["good", "new"]);
    assert!(decoded.projects[0].is_checked("pla-1"));
}

#[test]
fn persistence_failures_leave_memory_state_intact() {
    let backend = BrokenStore::default();
    let mut store = ProjectStore::open(shipped_catalog(), ProjectSlot::new(&backend));
    assert!(store.projects().is_empty());

    let project = store.create_project("Site A").unwrap();
    let updated = store.toggle_check(&project.id, "pla-1").unwrap();
    assert_eq!(updated.progress, 2);
    store.create_project("Site B").unwrap();
    store.delete_project(&project.id);

    assert_eq!(store.projects().len(), 1);
    assert_eq!(store.active_project().map(|p| p.name.as_str()), Some("Site B"));
    assert_eq!(backend.writes.get(), 4);
}
