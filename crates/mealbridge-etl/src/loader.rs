//! The batch loader: four sources, one transaction.
//!
//! Parsing is tolerant (per-row skips, absent sources), writing is not:
//! all upserts run in dependency order inside a single transaction, and
//! any integrity failure rolls the entire batch back.

use std::path::Path;

use tracing::{info, warn};

use mealbridge_core::{LoadReport, MealbridgeResult, SourceKind, SourcePaths};
use mealbridge_storage::queries::{claim_ops, listing_ops, provider_ops, receiver_ops};
use mealbridge_storage::{to_storage_err, StorageEngine};

use crate::sources::{self, ClaimRow, ListingRow, ProviderRow, ReceiverRow, SourceRow};

/// Loads one batch of CSV sources into a storage engine.
pub struct Loader<'a> {
    engine: &'a mut StorageEngine,
}

impl<'a> Loader<'a> {
    pub fn new(engine: &'a mut StorageEngine) -> Self {
        Self { engine }
    }

    /// Load all four sources as one atomic batch.
    ///
    /// Row-level problems (unparsable fields, unknown status, negative
    /// quantity) and absent source files are recovered locally and
    /// recorded in the returned [`LoadReport`]. Integrity failures
    /// (duplicate keys that cannot upsert, unresolved foreign keys) abort
    /// the run: nothing from the batch is persisted and the violation is
    /// returned as the run's single error.
    pub fn load_all(&mut self, paths: &SourcePaths) -> MealbridgeResult<LoadReport> {
        let mut report = LoadReport::default();

        let providers =
            parse_source::<ProviderRow>(&paths.providers, SourceKind::Providers, &mut report);
        let receivers =
            parse_source::<ReceiverRow>(&paths.receivers, SourceKind::Receivers, &mut report);
        let listings =
            parse_source::<ListingRow>(&paths.food_listings, SourceKind::FoodListings, &mut report);
        let claims = parse_source::<ClaimRow>(&paths.claims, SourceKind::Claims, &mut report);

        // Parents before children, so every written child's foreign keys
        // already resolve inside the transaction.
        let outcome = (|| -> MealbridgeResult<()> {
            let tx = self.engine.transaction()?;
            for p in &providers {
                provider_ops::upsert_provider(&tx, p)?;
            }
            for r in &receivers {
                receiver_ops::upsert_receiver(&tx, r)?;
            }
            for f in &listings {
                listing_ops::upsert_listing(&tx, f)?;
            }
            for c in &claims {
                claim_ops::upsert_claim(&tx, c)?;
            }
            tx.commit().map_err(to_storage_err)
        })();

        if let Err(e) = outcome {
            warn!(
                providers = providers.len(),
                receivers = receivers.len(),
                food_listings = listings.len(),
                claims = claims.len(),
                error = %e,
                "batch rolled back; partial counts reflect records written before rollback"
            );
            return Err(e);
        }

        report.providers.loaded = providers.len();
        report.receivers.loaded = receivers.len();
        report.food_listings.loaded = listings.len();
        report.claims.loaded = claims.len();

        info!(
            loaded = report.total_loaded(),
            skipped = report.total_skipped(),
            "batch committed"
        );
        Ok(report)
    }
}

/// Parse one source file into records, recording skips and absence.
fn parse_source<T: SourceRow>(
    path: &Path,
    kind: SourceKind,
    report: &mut LoadReport,
) -> Vec<T::Record> {
    match sources::read_source::<T>(path) {
        Ok(parsed) => {
            for skip in &parsed.skipped {
                warn!(source = %kind, line = skip.line, reason = %skip.reason, "skipping row");
            }
            info!(
                source = %kind,
                rows = parsed.records.len(),
                skipped = parsed.skipped.len(),
                "parsed source"
            );
            let entry = report.source_mut(kind);
            entry.available = true;
            entry.skipped = parsed.skipped;
            parsed.records
        }
        Err(e) => {
            warn!(source = %kind, error = %e, "source unavailable, treated as empty");
            report.source_mut(kind).available = false;
            Vec::new()
        }
    }
}
