use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use mealbridge_core::{LoadReport, SourceKind};
use mealbridge_etl::Loader;
use mealbridge_storage::StorageEngine;

use super::resolve_config;

/// Run the batch loader over the four CSV sources.
#[derive(Debug, Args)]
pub struct LoadCommand {
    /// TOML config file naming the database and source paths
    #[arg(long)]
    config: Option<PathBuf>,

    /// Database path (overrides config)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Providers CSV (overrides config)
    #[arg(long)]
    providers: Option<PathBuf>,

    /// Receivers CSV (overrides config)
    #[arg(long)]
    receivers: Option<PathBuf>,

    /// Food listings CSV (overrides config)
    #[arg(long)]
    food_listings: Option<PathBuf>,

    /// Claims CSV (overrides config)
    #[arg(long)]
    claims: Option<PathBuf>,
}

impl LoadCommand {
    pub fn execute(self) -> Result<i32> {
        let mut config = resolve_config(self.config.as_ref(), self.db)?;
        if let Some(path) = self.providers {
            config.sources.providers = path;
        }
        if let Some(path) = self.receivers {
            config.sources.receivers = path;
        }
        if let Some(path) = self.food_listings {
            config.sources.food_listings = path;
        }
        if let Some(path) = self.claims {
            config.sources.claims = path;
        }

        let mut engine = StorageEngine::open(&config.database.path)?;
        match Loader::new(&mut engine).load_all(&config.sources) {
            Ok(report) => {
                print_report(&report);
                Ok(0)
            }
            Err(e) => {
                eprintln!("load failed, batch rolled back: {e}");
                Ok(1)
            }
        }
    }
}

fn print_report(report: &LoadReport) {
    for kind in [
        SourceKind::Providers,
        SourceKind::Receivers,
        SourceKind::FoodListings,
        SourceKind::Claims,
    ] {
        let source = report.source(kind);
        if !source.available {
            println!("{kind:>14}: absent (treated as empty)");
            continue;
        }
        println!(
            "{kind:>14}: {} loaded, {} skipped",
            source.loaded,
            source.skipped.len()
        );
        for skip in &source.skipped {
            println!("{:>14}  line {}: {}", "", skip.line, skip.reason);
        }
    }
    println!(
        "{:>14}: {} loaded, {} skipped",
        "total",
        report.total_loaded(),
        report.total_skipped()
    );
}
