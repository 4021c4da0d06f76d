//! mealbridge-storage: SQLite persistence for the Mealbridge core.
//!
//! - [`connection`]: connection opening and PRAGMA configuration
//! - [`schema`]: idempotent table/index creation
//! - [`engine`]: the [`StorageEngine`] handle owning one connection
//! - [`queries`]: raw per-table upsert/lookup ops and the report battery

pub mod connection;
pub mod engine;
pub mod queries;
pub mod schema;

pub use engine::{StorageCounts, StorageEngine};
pub use queries::reports::Aggregator;

use mealbridge_core::MealbridgeError;

/// Map a rusqlite error into the shared taxonomy.
///
/// Constraint failures (uniqueness, foreign keys, CHECK) become
/// [`MealbridgeError::IntegrityViolation`]; everything else is a plain
/// query failure.
pub fn to_storage_err(e: rusqlite::Error) -> MealbridgeError {
    match &e {
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            MealbridgeError::IntegrityViolation(e.to_string())
        }
        _ => MealbridgeError::Query(e.to_string()),
    }
}
