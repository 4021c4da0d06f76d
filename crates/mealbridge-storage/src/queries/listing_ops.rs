//! Raw SQL operations for the food_listings table.

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use mealbridge_core::{FoodListing, MealbridgeResult};

use crate::to_storage_err;

/// Storage text form for expiry dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Insert a food listing, or overwrite the record with the same id.
///
/// The conflict-update form (not REPLACE) keeps dependent claims intact
/// on re-ingestion.
pub fn upsert_listing(conn: &Connection, f: &FoodListing) -> MealbridgeResult<()> {
    debug!(food_id = f.food_id, "upserting food listing");
    let expiry = f.expiry_date.map(|d| d.format(DATE_FORMAT).to_string());
    conn.execute(
        "INSERT INTO food_listings
             (food_id, food_name, quantity, expiry_date, provider_id,
              provider_type, location, food_type, meal_type)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
         ON CONFLICT(food_id) DO UPDATE SET
             food_name = excluded.food_name,
             quantity = excluded.quantity,
             expiry_date = excluded.expiry_date,
             provider_id = excluded.provider_id,
             provider_type = excluded.provider_type,
             location = excluded.location,
             food_type = excluded.food_type,
             meal_type = excluded.meal_type",
        params![
            f.food_id,
            f.food_name,
            f.quantity,
            expiry,
            f.provider_id,
            f.provider_type,
            f.location,
            f.food_type,
            f.meal_type,
        ],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

/// Get a food listing by id.
pub fn get_listing(conn: &Connection, food_id: i64) -> MealbridgeResult<Option<FoodListing>> {
    conn.query_row(
        "SELECT food_id, food_name, quantity, expiry_date, provider_id,
                provider_type, location, food_type, meal_type
         FROM food_listings WHERE food_id = ?1",
        params![food_id],
        |row| {
            let expiry: Option<String> = row.get(3)?;
            let expiry_date = expiry
                .map(|s| {
                    NaiveDate::parse_from_str(&s, DATE_FORMAT).map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e))
                    })
                })
                .transpose()?;
            Ok(FoodListing {
                food_id: row.get(0)?,
                food_name: row.get(1)?,
                quantity: row.get(2)?,
                expiry_date,
                provider_id: row.get(4)?,
                provider_type: row.get(5)?,
                location: row.get(6)?,
                food_type: row.get(7)?,
                meal_type: row.get(8)?,
            })
        },
    )
    .optional()
    .map_err(to_storage_err)
}

pub fn count_listings(conn: &Connection) -> MealbridgeResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM food_listings", [], |row| row.get(0))
        .map_err(to_storage_err)?;
    Ok(count as usize)
}
