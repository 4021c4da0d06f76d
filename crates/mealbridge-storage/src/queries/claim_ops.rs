//! Raw SQL operations for the claims table.

use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use mealbridge_core::{Claim, ClaimStatus, MealbridgeResult};

use crate::to_storage_err;

/// Storage text form for claim timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Insert a claim, or overwrite the record with the same id.
pub fn upsert_claim(conn: &Connection, c: &Claim) -> MealbridgeResult<()> {
    debug!(claim_id = c.claim_id, "upserting claim");
    conn.execute(
        "INSERT INTO claims (claim_id, food_id, receiver_id, status, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(claim_id) DO UPDATE SET
             food_id = excluded.food_id,
             receiver_id = excluded.receiver_id,
             status = excluded.status,
             timestamp = excluded.timestamp",
        params![
            c.claim_id,
            c.food_id,
            c.receiver_id,
            c.status.as_str(),
            c.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        ],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

/// Get a claim by id.
pub fn get_claim(conn: &Connection, claim_id: i64) -> MealbridgeResult<Option<Claim>> {
    conn.query_row(
        "SELECT claim_id, food_id, receiver_id, status, timestamp
         FROM claims WHERE claim_id = ?1",
        params![claim_id],
        |row| {
            let status: String = row.get(3)?;
            let status = status.parse::<ClaimStatus>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e))
            })?;
            let ts: String = row.get(4)?;
            let timestamp = NaiveDateTime::parse_from_str(&ts, TIMESTAMP_FORMAT).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e))
            })?;
            Ok(Claim {
                claim_id: row.get(0)?,
                food_id: row.get(1)?,
                receiver_id: row.get(2)?,
                status,
                timestamp,
            })
        },
    )
    .optional()
    .map_err(to_storage_err)
}

pub fn count_claims(conn: &Connection) -> MealbridgeResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM claims", [], |row| row.get(0))
        .map_err(to_storage_err)?;
    Ok(count as usize)
}
