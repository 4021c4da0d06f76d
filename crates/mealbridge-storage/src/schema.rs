//! Idempotent schema creation: four entity tables plus the indexes the
//! report battery groups on.

use rusqlite::Connection;

use mealbridge_core::MealbridgeResult;

use crate::to_storage_err;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS providers (
    provider_id    INTEGER PRIMARY KEY,
    name           TEXT NOT NULL,
    provider_type  TEXT NOT NULL,
    address        TEXT NOT NULL,
    city           TEXT NOT NULL,
    contact        TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_providers_city ON providers(city);

CREATE TABLE IF NOT EXISTS receivers (
    receiver_id    INTEGER PRIMARY KEY,
    name           TEXT NOT NULL,
    receiver_type  TEXT NOT NULL,
    city           TEXT NOT NULL,
    contact        TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_receivers_city ON receivers(city);

CREATE TABLE IF NOT EXISTS food_listings (
    food_id        INTEGER PRIMARY KEY,
    food_name      TEXT NOT NULL,
    quantity       INTEGER NOT NULL CHECK (quantity >= 0),
    expiry_date    TEXT,
    provider_id    INTEGER NOT NULL REFERENCES providers(provider_id),
    provider_type  TEXT NOT NULL,
    location       TEXT NOT NULL,
    food_type      TEXT NOT NULL,
    meal_type      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_listings_provider ON food_listings(provider_id);
CREATE INDEX IF NOT EXISTS idx_listings_location ON food_listings(location);
CREATE INDEX IF NOT EXISTS idx_listings_food_type ON food_listings(food_type);
CREATE INDEX IF NOT EXISTS idx_listings_meal_type ON food_listings(meal_type);
CREATE INDEX IF NOT EXISTS idx_listings_provider_type ON food_listings(provider_type);

CREATE TABLE IF NOT EXISTS claims (
    claim_id       INTEGER PRIMARY KEY,
    food_id        INTEGER NOT NULL REFERENCES food_listings(food_id),
    receiver_id    INTEGER NOT NULL REFERENCES receivers(receiver_id),
    status         TEXT NOT NULL,
    timestamp      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_claims_food ON claims(food_id);
CREATE INDEX IF NOT EXISTS idx_claims_receiver ON claims(receiver_id);
CREATE INDEX IF NOT EXISTS idx_claims_status ON claims(status);
";

/// Create all tables and indexes if they don't exist. Safe to call on an
/// already-initialized database.
pub fn init(conn: &Connection) -> MealbridgeResult<()> {
    conn.execute_batch(SCHEMA).map_err(to_storage_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection;

    #[test]
    fn init_is_idempotent() {
        let conn = connection::open_in_memory().unwrap();
        init(&conn).unwrap();
        init(&conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
                 AND name IN ('providers', 'receivers', 'food_listings', 'claims')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 4);
    }

    #[test]
    fn quantity_check_rejects_negative_values() {
        let conn = connection::open_in_memory().unwrap();
        init(&conn).unwrap();
        conn.execute(
            "INSERT INTO providers VALUES (1, 'A', 'Restaurant', '1 Main St', 'NYC', 'a@x.com')",
            [],
        )
        .unwrap();

        let err = conn.execute(
            "INSERT INTO food_listings VALUES (1, 'Rice', -5, NULL, 1, 'Restaurant', 'NYC', 'Grains', 'Lunch')",
            [],
        );
        assert!(err.is_err());
    }
}
