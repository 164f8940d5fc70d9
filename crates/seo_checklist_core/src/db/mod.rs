//! SQLite storage for the durable project slot.
//!
//! The whole database is one `kv_slots` table. Its layout version lives in
//! `PRAGMA user_version`, and a connection is only handed out once that
//! version is current and the table is present.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was written by a release with a newer slot layout.
    SchemaTooNew { found: u32, supported: u32 },
    /// `user_version` claims a current layout but `kv_slots` is absent.
    SlotTableMissing { version: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "checklist database uses slot layout v{found}; this build reads up to v{supported}"
            ),
            Self::SlotTableMissing { version } => write!(
                f,
                "checklist database is marked as slot layout v{version} but has no `kv_slots` table"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } | Self::SlotTableMissing { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
