//! Load reports and tabular aggregate results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the four input sources a report entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Providers,
    Receivers,
    FoodListings,
    Claims,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Providers => "providers",
            Self::Receivers => "receivers",
            Self::FoodListings => "food_listings",
            Self::Claims => "claims",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A row the loader skipped, with its 1-based line number in the source
/// file and the reason it could not be coerced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: String,
}

/// Outcome of loading one source file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceReport {
    /// Records upserted into storage.
    pub loaded: usize,
    /// Rows skipped with reasons; the rest of the batch proceeded.
    pub skipped: Vec<SkippedRow>,
    /// False when the file was missing/unreadable (source treated as empty).
    pub available: bool,
}

/// Outcome of one `load_all` invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadReport {
    pub providers: SourceReport,
    pub receivers: SourceReport,
    pub food_listings: SourceReport,
    pub claims: SourceReport,
}

impl LoadReport {
    pub fn source(&self, kind: SourceKind) -> &SourceReport {
        match kind {
            SourceKind::Providers => &self.providers,
            SourceKind::Receivers => &self.receivers,
            SourceKind::FoodListings => &self.food_listings,
            SourceKind::Claims => &self.claims,
        }
    }

    pub fn source_mut(&mut self, kind: SourceKind) -> &mut SourceReport {
        match kind {
            SourceKind::Providers => &mut self.providers,
            SourceKind::Receivers => &mut self.receivers,
            SourceKind::FoodListings => &mut self.food_listings,
            SourceKind::Claims => &mut self.claims,
        }
    }

    /// Total records upserted across all four sources.
    pub fn total_loaded(&self) -> usize {
        self.providers.loaded + self.receivers.loaded + self.food_listings.loaded + self.claims.loaded
    }

    /// Total rows skipped across all four sources.
    pub fn total_skipped(&self) -> usize {
        self.providers.skipped.len()
            + self.receivers.skipped.len()
            + self.food_listings.skipped.len()
            + self.claims.skipped.len()
    }
}

/// A scalar cell in a report table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Int(i64),
    Float(f64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x:.2}"),
        }
    }
}

/// A small tabular result: named columns, rows of scalar values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Value>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One named aggregate result handed to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub name: String,
    pub table: Table,
}
