//! The storage handle owning one SQLite connection.
//!
//! Callers construct a [`StorageEngine`] and pass it explicitly to the
//! loader and aggregator; lifecycle is scoped to the handle, with no
//! module-level engine state.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, Transaction};

use mealbridge_core::MealbridgeResult;

use crate::queries::{claim_ops, listing_ops, provider_ops, receiver_ops};
use crate::{connection, schema, to_storage_err};

/// Row counts per entity table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageCounts {
    pub providers: usize,
    pub receivers: usize,
    pub food_listings: usize,
    pub claims: usize,
}

/// Owns the connection to a Mealbridge database.
///
/// Opening guarantees the schema exists (idempotent), so a freshly opened
/// engine is always queryable.
pub struct StorageEngine {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl StorageEngine {
    /// Open (creating if necessary) the database at `path`.
    pub fn open(path: &Path) -> MealbridgeResult<Self> {
        let conn = connection::open(path)?;
        schema::init(&conn)?;
        Ok(Self {
            conn,
            db_path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> MealbridgeResult<Self> {
        let conn = connection::open_in_memory()?;
        schema::init(&conn)?;
        Ok(Self { conn, db_path: None })
    }

    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Read access to the underlying connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Begin a write transaction spanning the whole batch. Dropping the
    /// transaction without committing rolls back everything in it.
    pub fn transaction(&mut self) -> MealbridgeResult<Transaction<'_>> {
        self.conn.transaction().map_err(to_storage_err)
    }

    /// Current row counts across the four entity tables.
    pub fn counts(&self) -> MealbridgeResult<StorageCounts> {
        Ok(StorageCounts {
            providers: provider_ops::count_providers(&self.conn)?,
            receivers: receiver_ops::count_receivers(&self.conn)?,
            food_listings: listing_ops::count_listings(&self.conn)?,
            claims: claim_ops::count_claims(&self.conn)?,
        })
    }
}
