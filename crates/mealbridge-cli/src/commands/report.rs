use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use mealbridge_core::Report;
use mealbridge_storage::{Aggregator, StorageEngine};

use super::resolve_config;

/// Run the thirteen aggregate reports.
#[derive(Debug, Args)]
pub struct ReportCommand {
    /// TOML config file naming the database path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Database path (overrides config)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Emit one JSON document instead of text tables
    #[arg(long)]
    json: bool,
}

impl ReportCommand {
    pub fn execute(self) -> Result<i32> {
        let config = resolve_config(self.config.as_ref(), self.db)?;
        let engine = StorageEngine::open(&config.database.path)?;
        let reports = Aggregator::new(&engine).run_reports()?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        } else {
            for report in &reports {
                print_table(report);
            }
        }
        Ok(0)
    }
}

fn print_table(report: &Report) {
    println!("== {} ==", report.name);
    let table = &report.table;
    if table.is_empty() {
        println!("(no rows)");
        println!();
        return;
    }

    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();
    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            cells
                .iter()
                .map(|row| row[i].len())
                .chain(std::iter::once(col.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = table
        .columns
        .iter()
        .zip(&widths)
        .map(|(col, &w)| format!("{col:<w$}"))
        .collect();
    let header = header.join("  ");
    println!("{header}");
    println!("{}", "-".repeat(header.len()));
    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:<w$}"))
            .collect();
        println!("{}", line.join("  "));
    }
    println!();
}
