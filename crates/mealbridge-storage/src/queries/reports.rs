//! The aggregate report battery: thirteen read-only queries over the
//! stored schema, each returned as a named table.
//!
//! Inner joins intentionally drop unmatched parents (a receiver with no
//! claims never shows up in a joined report), and grouped aggregates emit
//! no zero-count rows.

use rusqlite::{params, Connection};

use mealbridge_core::{ClaimStatus, MealbridgeResult, Report, Table, Value};

use crate::engine::StorageEngine;
use crate::to_storage_err;

/// Runs the report battery against an engine handle.
///
/// All thirteen queries share the engine's session and run sequentially;
/// a failure in any one of them fails the whole run.
pub struct Aggregator<'a> {
    engine: &'a StorageEngine,
}

impl<'a> Aggregator<'a> {
    pub fn new(engine: &'a StorageEngine) -> Self {
        Self { engine }
    }

    /// Execute all thirteen reports, in their fixed order.
    pub fn run_reports(&self) -> MealbridgeResult<Vec<Report>> {
        let conn = self.engine.conn();
        let reports = vec![
            report("Providers per City", providers_per_city(conn)?),
            report("Receivers per City", receivers_per_city(conn)?),
            report("Top Provider Type", top_provider_type(conn)?),
            report("Top Receivers by Claims", top_receivers_by_claims(conn)?),
            report("Total Food Quantity", total_food_quantity(conn)?),
            report("Listings per City", listings_per_city(conn)?),
            report("Food Type Count", food_type_count(conn)?),
            report("Claims per Food Item", claims_per_food_item(conn)?),
            report(
                "Top Providers (Completed Claims)",
                top_providers_completed_claims(conn)?,
            ),
            report("Claim Status Breakdown", claim_status_breakdown(conn)?),
            report("Average Food per Receiver", average_food_per_receiver(conn)?),
            report("Most Claimed Meal Type", most_claimed_meal_type(conn)?),
            report(
                "Total Food Donated per Provider",
                total_donated_per_provider(conn)?,
            ),
        ];
        Ok(reports)
    }
}

fn report(name: &str, table: Table) -> Report {
    Report {
        name: name.to_string(),
        table,
    }
}

/// Run a `(TEXT, INTEGER)` grouping query into a two-column table.
fn grouped_int(conn: &Connection, sql: &str, columns: [&str; 2]) -> MealbridgeResult<Table> {
    let mut stmt = conn.prepare(sql).map_err(to_storage_err)?;
    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })
        .map_err(to_storage_err)?;

    let mut table = Table::new(&columns);
    for row in rows {
        let (key, value) = row.map_err(to_storage_err)?;
        table.push_row(vec![Value::Text(key), Value::Int(value)]);
    }
    Ok(table)
}

/// Count of providers grouped by city.
pub fn providers_per_city(conn: &Connection) -> MealbridgeResult<Table> {
    grouped_int(
        conn,
        "SELECT city, COUNT(*) FROM providers GROUP BY city",
        ["City", "Providers"],
    )
}

/// Count of receivers grouped by city.
pub fn receivers_per_city(conn: &Connection) -> MealbridgeResult<Table> {
    grouped_int(
        conn,
        "SELECT city, COUNT(*) FROM receivers GROUP BY city",
        ["City", "Receivers"],
    )
}

/// Total listed quantity grouped by the denormalized provider type.
pub fn top_provider_type(conn: &Connection) -> MealbridgeResult<Table> {
    grouped_int(
        conn,
        "SELECT provider_type, SUM(quantity) FROM food_listings GROUP BY provider_type",
        ["Provider_Type", "Total_Quantity"],
    )
}

/// Claims per receiver name. Inner join: zero-claim receivers excluded.
pub fn top_receivers_by_claims(conn: &Connection) -> MealbridgeResult<Table> {
    grouped_int(
        conn,
        "SELECT r.name, COUNT(c.claim_id)
         FROM receivers r
         JOIN claims c ON c.receiver_id = r.receiver_id
         GROUP BY r.name",
        ["Receiver_Name", "Claim_Count"],
    )
}

/// Sum of quantity over all listings, as a single-row table.
pub fn total_food_quantity(conn: &Connection) -> MealbridgeResult<Table> {
    let total: i64 = conn
        .query_row(
            "SELECT COALESCE(SUM(quantity), 0) FROM food_listings",
            [],
            |row| row.get(0),
        )
        .map_err(to_storage_err)?;

    let mut table = Table::new(&["Total_Quantity"]);
    table.push_row(vec![Value::Int(total)]);
    Ok(table)
}

/// Count of listings grouped by location.
pub fn listings_per_city(conn: &Connection) -> MealbridgeResult<Table> {
    grouped_int(
        conn,
        "SELECT location, COUNT(*) FROM food_listings GROUP BY location",
        ["City", "Listings"],
    )
}

/// Count of listings grouped by food type.
pub fn food_type_count(conn: &Connection) -> MealbridgeResult<Table> {
    grouped_int(
        conn,
        "SELECT food_type, COUNT(*) FROM food_listings GROUP BY food_type",
        ["Food_Type", "Count"],
    )
}

/// Claims per food name. Inner join: unclaimed foods excluded.
pub fn claims_per_food_item(conn: &Connection) -> MealbridgeResult<Table> {
    grouped_int(
        conn,
        "SELECT f.food_name, COUNT(c.claim_id)
         FROM food_listings f
         JOIN claims c ON c.food_id = f.food_id
         GROUP BY f.food_name",
        ["Food_Name", "Claim_Count"],
    )
}

/// Completed claims per provider name, through the double inner join
/// provider → listing → claim.
pub fn top_providers_completed_claims(conn: &Connection) -> MealbridgeResult<Table> {
    let mut stmt = conn
        .prepare(
            "SELECT p.name, COUNT(c.claim_id)
             FROM providers p
             JOIN food_listings f ON f.provider_id = p.provider_id
             JOIN claims c ON c.food_id = f.food_id
             WHERE c.status = ?1
             GROUP BY p.name",
        )
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map(params![ClaimStatus::Completed.as_str()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })
        .map_err(to_storage_err)?;

    let mut table = Table::new(&["Provider_Name", "Completed_Claims"]);
    for row in rows {
        let (name, count) = row.map_err(to_storage_err)?;
        table.push_row(vec![Value::Text(name), Value::Int(count)]);
    }
    Ok(table)
}

/// Claims per status, with a percentage column computed post-aggregation.
///
/// Empty claims means an empty table; the percentage division never runs
/// against a zero total.
pub fn claim_status_breakdown(conn: &Connection) -> MealbridgeResult<Table> {
    let mut stmt = conn
        .prepare("SELECT status, COUNT(*) FROM claims GROUP BY status")
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })
        .map_err(to_storage_err)?;

    let mut counts = Vec::new();
    for row in rows {
        counts.push(row.map_err(to_storage_err)?);
    }

    let mut table = Table::new(&["Status", "Count", "Percentage"]);
    let total: i64 = counts.iter().map(|(_, n)| n).sum();
    if total == 0 {
        return Ok(table);
    }
    for (status, count) in counts {
        let percentage = count as f64 / total as f64 * 100.0;
        table.push_row(vec![
            Value::Text(status),
            Value::Int(count),
            Value::Float(percentage),
        ]);
    }
    Ok(table)
}

/// Mean claimed-listing quantity per receiver name (double inner join).
pub fn average_food_per_receiver(conn: &Connection) -> MealbridgeResult<Table> {
    let mut stmt = conn
        .prepare(
            "SELECT r.name, AVG(f.quantity)
             FROM receivers r
             JOIN claims c ON c.receiver_id = r.receiver_id
             JOIN food_listings f ON f.food_id = c.food_id
             GROUP BY r.name",
        )
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
        })
        .map_err(to_storage_err)?;

    let mut table = Table::new(&["Receiver_Name", "Avg_Quantity"]);
    for row in rows {
        let (name, avg) = row.map_err(to_storage_err)?;
        table.push_row(vec![Value::Text(name), Value::Float(avg)]);
    }
    Ok(table)
}

/// Claims per meal type (inner join).
pub fn most_claimed_meal_type(conn: &Connection) -> MealbridgeResult<Table> {
    grouped_int(
        conn,
        "SELECT f.meal_type, COUNT(c.claim_id)
         FROM food_listings f
         JOIN claims c ON c.food_id = f.food_id
         GROUP BY f.meal_type",
        ["Meal_Type", "Claim_Count"],
    )
}

/// Total listed quantity per provider name (inner join).
pub fn total_donated_per_provider(conn: &Connection) -> MealbridgeResult<Table> {
    grouped_int(
        conn,
        "SELECT p.name, SUM(f.quantity)
         FROM providers p
         JOIN food_listings f ON f.provider_id = p.provider_id
         GROUP BY p.name",
        ["Provider_Name", "Total_Quantity"],
    )
}
