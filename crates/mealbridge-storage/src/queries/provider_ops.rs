//! Raw SQL operations for the providers table. No business logic, just
//! persistence.

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use mealbridge_core::{MealbridgeResult, Provider};

use crate::to_storage_err;

/// Insert a provider, or overwrite the record with the same id.
///
/// The conflict-update form (not REPLACE) keeps dependent food listings
/// intact on re-ingestion.
pub fn upsert_provider(conn: &Connection, p: &Provider) -> MealbridgeResult<()> {
    debug!(provider_id = p.provider_id, "upserting provider");
    conn.execute(
        "INSERT INTO providers (provider_id, name, provider_type, address, city, contact)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(provider_id) DO UPDATE SET
             name = excluded.name,
             provider_type = excluded.provider_type,
             address = excluded.address,
             city = excluded.city,
             contact = excluded.contact",
        params![p.provider_id, p.name, p.provider_type, p.address, p.city, p.contact],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

/// Get a provider by id.
pub fn get_provider(conn: &Connection, provider_id: i64) -> MealbridgeResult<Option<Provider>> {
    conn.query_row(
        "SELECT provider_id, name, provider_type, address, city, contact
         FROM providers WHERE provider_id = ?1",
        params![provider_id],
        |row| {
            Ok(Provider {
                provider_id: row.get(0)?,
                name: row.get(1)?,
                provider_type: row.get(2)?,
                address: row.get(3)?,
                city: row.get(4)?,
                contact: row.get(5)?,
            })
        },
    )
    .optional()
    .map_err(to_storage_err)
}

pub fn count_providers(conn: &Connection) -> MealbridgeResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM providers", [], |row| row.get(0))
        .map_err(to_storage_err)?;
    Ok(count as usize)
}
