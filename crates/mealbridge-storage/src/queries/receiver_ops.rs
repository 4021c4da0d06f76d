//! Raw SQL operations for the receivers table.

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use mealbridge_core::{MealbridgeResult, Receiver};

use crate::to_storage_err;

/// Insert a receiver, or overwrite the record with the same id.
pub fn upsert_receiver(conn: &Connection, r: &Receiver) -> MealbridgeResult<()> {
    debug!(receiver_id = r.receiver_id, "upserting receiver");
    conn.execute(
        "INSERT INTO receivers (receiver_id, name, receiver_type, city, contact)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(receiver_id) DO UPDATE SET
             name = excluded.name,
             receiver_type = excluded.receiver_type,
             city = excluded.city,
             contact = excluded.contact",
        params![r.receiver_id, r.name, r.receiver_type, r.city, r.contact],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

/// Get a receiver by id.
pub fn get_receiver(conn: &Connection, receiver_id: i64) -> MealbridgeResult<Option<Receiver>> {
    conn.query_row(
        "SELECT receiver_id, name, receiver_type, city, contact
         FROM receivers WHERE receiver_id = ?1",
        params![receiver_id],
        |row| {
            Ok(Receiver {
                receiver_id: row.get(0)?,
                name: row.get(1)?,
                receiver_type: row.get(2)?,
                city: row.get(3)?,
                contact: row.get(4)?,
            })
        },
    )
    .optional()
    .map_err(to_storage_err)
}

pub fn count_receivers(conn: &Connection) -> MealbridgeResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM receivers", [], |row| row.get(0))
        .map_err(to_storage_err)?;
    Ok(count as usize)
}
