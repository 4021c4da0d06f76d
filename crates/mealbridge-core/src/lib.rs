//! mealbridge-core: shared types for the Mealbridge analytics core.
//!
//! - Entities: plain records for providers, receivers, food listings, and claims
//! - Errors: the error taxonomy shared by storage, ETL, and the CLI
//! - Config: TOML-backed database/source configuration
//! - Report: load reports and tabular aggregate results

pub mod config;
pub mod entities;
pub mod errors;
pub mod report;

pub use config::{Config, DatabaseConfig, SourcePaths};
pub use entities::{Claim, ClaimStatus, FoodListing, Provider, Receiver};
pub use errors::{MealbridgeError, MealbridgeResult};
pub use report::{LoadReport, Report, SkippedRow, SourceKind, SourceReport, Table, Value};
