//! Connection opening and PRAGMA configuration.

use std::path::Path;

use rusqlite::Connection;

use mealbridge_core::{MealbridgeError, MealbridgeResult};

/// Open a connection to the given database file and configure it.
///
/// A failure here means the store itself is unreachable, so it maps to
/// `StorageUnavailable` rather than a query error.
pub fn open(path: &Path) -> MealbridgeResult<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| MealbridgeError::StorageUnavailable(format!("{}: {e}", path.display())))?;
        }
    }
    let conn = Connection::open(path)
        .map_err(|e| MealbridgeError::StorageUnavailable(format!("{}: {e}", path.display())))?;
    apply_pragmas(&conn, true)?;
    Ok(conn)
}

/// Open an in-memory database (for testing).
pub fn open_in_memory() -> MealbridgeResult<Connection> {
    let conn = Connection::open_in_memory()
        .map_err(|e| MealbridgeError::StorageUnavailable(e.to_string()))?;
    apply_pragmas(&conn, false)?;
    Ok(conn)
}

/// Apply safety and performance pragmas.
///
/// `foreign_keys` is load-bearing: referential integrity of listings and
/// claims is enforced by SQLite at write time. WAL only applies to
/// file-backed databases.
fn apply_pragmas(conn: &Connection, file_backed: bool) -> MealbridgeResult<()> {
    if file_backed {
        conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")
            .map_err(|e| MealbridgeError::StorageUnavailable(e.to_string()))?;
    }
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;
        PRAGMA busy_timeout = 5000;
        PRAGMA temp_store = MEMORY;
        ",
    )
    .map_err(|e| MealbridgeError::StorageUnavailable(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_keys_are_enforced() {
        let conn = open_in_memory().unwrap();
        let on: i64 = conn
            .pragma_query_value(None, "foreign_keys", |row| row.get(0))
            .unwrap();
        assert_eq!(on, 1);
    }

    #[test]
    fn file_backed_connection_uses_wal() {
        let dir = tempfile::tempdir().unwrap();
        let conn = open(&dir.path().join("test.db")).unwrap();
        let mode: String = conn
            .pragma_query_value(None, "journal_mode", |row| row.get(0))
            .unwrap();
        assert!(mode.eq_ignore_ascii_case("wal"));
    }
}
