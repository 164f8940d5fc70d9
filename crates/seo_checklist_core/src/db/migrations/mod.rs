//! Slot layout upgrades.
//!
//! `LAYOUT_STEPS[n]` upgrades layout `n` to `n + 1`, so the current layout is
//! the number of steps. A fresh file starts at layout 0.

use crate::db::{DbError, DbResult};
use rusqlite::{Connection, OptionalExtension};

const LAYOUT_STEPS: &[&str] = &[include_str!("0001_kv_slots.sql")];

/// Layout version written by this build.
pub const SCHEMA_VERSION: u32 = LAYOUT_STEPS.len() as u32;

/// Brings the connection to [`SCHEMA_VERSION`] in one transaction and checks
/// that the slot table is present afterwards.
///
/// Returns the layout version the file had before the call.
pub fn migrate(conn: &mut Connection) -> DbResult<u32> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if found > SCHEMA_VERSION {
        return Err(DbError::SchemaTooNew {
            found,
            supported: SCHEMA_VERSION,
        });
    }

    if found < SCHEMA_VERSION {
        let tx = conn.transaction()?;
        for step in &LAYOUT_STEPS[found as usize..] {
            tx.execute_batch(step)?;
        }
        tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
        tx.commit()?;
    }

    if !slot_table_exists(conn)? {
        return Err(DbError::SlotTableMissing {
            version: SCHEMA_VERSION,
        });
    }
    Ok(found)
}

fn slot_table_exists(conn: &Connection) -> DbResult<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_slots';",
            [],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}
