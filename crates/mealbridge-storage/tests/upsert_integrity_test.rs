//! Upsert semantics and referential integrity at the storage layer.
//!
//! Covers: overwrite-not-duplicate, child preservation across re-upsert,
//! write-time foreign-key enforcement, and transaction rollback.

use chrono::NaiveDate;

use mealbridge_core::{Claim, ClaimStatus, FoodListing, MealbridgeError, Provider, Receiver};
use mealbridge_storage::queries::{claim_ops, listing_ops, provider_ops, receiver_ops};
use mealbridge_storage::StorageEngine;

fn provider(id: i64) -> Provider {
    Provider {
        provider_id: id,
        name: format!("Provider {id}"),
        provider_type: "Restaurant".into(),
        address: "1 Main St".into(),
        city: "NYC".into(),
        contact: "ops@example.com".into(),
    }
}

fn receiver(id: i64) -> Receiver {
    Receiver {
        receiver_id: id,
        name: format!("Receiver {id}"),
        receiver_type: "Shelter".into(),
        city: "NYC".into(),
        contact: "intake@example.org".into(),
    }
}

fn listing(id: i64, provider_id: i64) -> FoodListing {
    FoodListing {
        food_id: id,
        food_name: "Rice".into(),
        quantity: 10,
        expiry_date: None,
        provider_id,
        provider_type: "Restaurant".into(),
        location: "NYC".into(),
        food_type: "Grains".into(),
        meal_type: "Lunch".into(),
    }
}

fn claim(id: i64, food_id: i64, receiver_id: i64) -> Claim {
    Claim {
        claim_id: id,
        food_id,
        receiver_id,
        status: ClaimStatus::Pending,
        timestamp: NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
    }
}

#[test]
fn upsert_overwrites_instead_of_duplicating() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let conn = engine.conn();

    provider_ops::upsert_provider(conn, &provider(1)).unwrap();

    let mut renamed = provider(1);
    renamed.name = "Renamed Kitchen".into();
    renamed.city = "LA".into();
    provider_ops::upsert_provider(conn, &renamed).unwrap();

    assert_eq!(provider_ops::count_providers(conn).unwrap(), 1);
    let stored = provider_ops::get_provider(conn, 1).unwrap().unwrap();
    assert_eq!(stored.name, "Renamed Kitchen");
    assert_eq!(stored.city, "LA");
}

#[test]
fn listing_upsert_preserves_existing_claims() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let conn = engine.conn();

    provider_ops::upsert_provider(conn, &provider(1)).unwrap();
    receiver_ops::upsert_receiver(conn, &receiver(1)).unwrap();
    listing_ops::upsert_listing(conn, &listing(1, 1)).unwrap();
    claim_ops::upsert_claim(conn, &claim(1, 1, 1)).unwrap();

    let mut updated = listing(1, 1);
    updated.quantity = 99;
    listing_ops::upsert_listing(conn, &updated).unwrap();

    // The re-upsert must not delete-and-reinsert: the claim survives.
    assert_eq!(claim_ops::count_claims(conn).unwrap(), 1);
    let stored = listing_ops::get_listing(conn, 1).unwrap().unwrap();
    assert_eq!(stored.quantity, 99);
}

#[test]
fn listing_with_unknown_provider_is_an_integrity_violation() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let err = listing_ops::upsert_listing(engine.conn(), &listing(1, 404)).unwrap_err();
    assert!(matches!(err, MealbridgeError::IntegrityViolation(_)), "got {err}");
}

#[test]
fn claim_with_unknown_parents_is_an_integrity_violation() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let err = claim_ops::upsert_claim(engine.conn(), &claim(1, 404, 404)).unwrap_err();
    assert!(matches!(err, MealbridgeError::IntegrityViolation(_)), "got {err}");
}

#[test]
fn stored_children_always_resolve_their_parents() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let conn = engine.conn();

    provider_ops::upsert_provider(conn, &provider(1)).unwrap();
    receiver_ops::upsert_receiver(conn, &receiver(1)).unwrap();
    listing_ops::upsert_listing(conn, &listing(1, 1)).unwrap();
    claim_ops::upsert_claim(conn, &claim(1, 1, 1)).unwrap();

    let orphan_listings: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM food_listings f
             LEFT JOIN providers p ON p.provider_id = f.provider_id
             WHERE p.provider_id IS NULL",
            [],
            |row| row.get(0),
        )
        .unwrap();
    let orphan_claims: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM claims c
             LEFT JOIN food_listings f ON f.food_id = c.food_id
             LEFT JOIN receivers r ON r.receiver_id = c.receiver_id
             WHERE f.food_id IS NULL OR r.receiver_id IS NULL",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(orphan_listings, 0);
    assert_eq!(orphan_claims, 0);
}

#[test]
fn failed_batch_rolls_back_every_entity_group() {
    let mut engine = StorageEngine::open_in_memory().unwrap();

    let result = (|| {
        let tx = engine.transaction()?;
        provider_ops::upsert_provider(&tx, &provider(1))?;
        receiver_ops::upsert_receiver(&tx, &receiver(1))?;
        listing_ops::upsert_listing(&tx, &listing(1, 1))?;
        // References a food listing that was never written.
        claim_ops::upsert_claim(&tx, &claim(1, 404, 1))?;
        tx.commit().map_err(|e| MealbridgeError::Query(e.to_string()))
    })();

    assert!(result.is_err());
    let counts = engine.counts().unwrap();
    assert_eq!(counts.providers, 0);
    assert_eq!(counts.receivers, 0);
    assert_eq!(counts.food_listings, 0);
    assert_eq!(counts.claims, 0);
}

#[test]
fn claim_round_trips_status_and_timestamp() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let conn = engine.conn();

    provider_ops::upsert_provider(conn, &provider(1)).unwrap();
    receiver_ops::upsert_receiver(conn, &receiver(1)).unwrap();
    listing_ops::upsert_listing(conn, &listing(1, 1)).unwrap();

    let mut c = claim(7, 1, 1);
    c.status = ClaimStatus::Cancelled;
    claim_ops::upsert_claim(conn, &c).unwrap();

    let stored = claim_ops::get_claim(conn, 7).unwrap().unwrap();
    assert_eq!(stored, c);
}
