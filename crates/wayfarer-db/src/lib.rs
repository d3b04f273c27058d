pub mod migrations;
pub mod packages;
pub mod payments;
pub mod reviews;
pub mod users;
pub mod wishlist;

use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;
use uuid::Uuid;

/// The document store behind the five logical collections (users, packages,
/// reviews, wishlist, payments). Handlers receive this through shared state,
/// never through a module-level global, so tests can substitute an in-memory
/// instance.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        migrations::run(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| anyhow::anyhow!("DB lock poisoned: {}", e))?;
        f(&conn)
    }
}

// -- Row conversion helpers --
// Identifiers and timestamps are stored as TEXT; these lift parse failures
// into rusqlite's conversion error so query_map closures stay uniform.

pub(crate) fn uuid_col(idx: usize, s: String) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(&s).map_err(|e| conversion_err(idx, e))
}

pub(crate) fn opt_uuid_col(idx: usize, s: Option<String>) -> rusqlite::Result<Option<Uuid>> {
    s.map(|s| uuid_col(idx, s)).transpose()
}

pub(crate) fn datetime_col(idx: usize, s: String) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_err(idx, e))
}

pub(crate) fn opt_datetime_col(
    idx: usize,
    s: Option<String>,
) -> rusqlite::Result<Option<DateTime<Utc>>> {
    s.map(|s| datetime_col(idx, s)).transpose()
}

fn conversion_err(
    idx: usize,
    e: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
}
