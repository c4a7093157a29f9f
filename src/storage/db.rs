use rusqlite::Connection;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::StorageError;

// load .env at call sites if present
fn load_dotenv() {
    let _ = dotenv::dotenv();
}

/// Return the path to the bookings DB. Honors CLASSBOOK_DB_PATH and
/// CLASSBOOK_DB_URL (sqlite:// or file:// schemes) env vars.
pub fn db_path() -> PathBuf {
    load_dotenv();
    if let Ok(p) = env::var("CLASSBOOK_DB_PATH") {
        PathBuf::from(p)
    } else if let Ok(url) = env::var("CLASSBOOK_DB_URL") {
        if let Some(path) = url.strip_prefix("sqlite://") {
            PathBuf::from(path)
        } else if let Some(path) = url.strip_prefix("file://") {
            PathBuf::from(path)
        } else {
            PathBuf::from("data/classbook.db")
        }
    } else {
        PathBuf::from("data/classbook.db")
    }
}

/// Open a connection at `path`, creating the parent directory and the schema
/// if needed. Handlers open short-lived connections per operation.
pub fn open_at(path: &Path) -> Result<Connection, StorageError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir).map_err(StorageError::Io)?;
        }
    }
    let conn = Connection::open(path).map_err(StorageError::Db)?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Create the bookings table and its indexes. Idempotent.
///
/// The UNIQUE(user_id, date_str) index is the atomicity point for the
/// one-booking-per-user-per-date invariant: concurrent inserts for the same
/// date resolve to exactly one winner, the rest surface as SlotTaken.
pub fn init_schema(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS bookings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            date_str TEXT NOT NULL,
            batch_number INTEGER NOT NULL,
            day_index INTEGER NOT NULL,
            topic TEXT NOT NULL,
            month INTEGER NOT NULL,
            year INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            UNIQUE (user_id, date_str)
        );
        CREATE INDEX IF NOT EXISTS idx_bookings_user_month
            ON bookings (user_id, year, month);",
    )
    .map_err(StorageError::Db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_init_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();
    }
}
