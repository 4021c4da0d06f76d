//! mealbridge-etl: CSV ingestion and the batch loader.
//!
//! - [`sources`]: header-addressed CSV rows and per-row coercion into
//!   entity records, with row-level error collection
//! - [`coerce`]: date/datetime parsing with the accepted format list
//! - [`loader`]: [`Loader`], one atomic upsert batch per invocation

pub mod coerce;
pub mod loader;
pub mod sources;

pub use loader::Loader;
