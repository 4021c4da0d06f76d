//! Error taxonomy shared across the workspace.

/// Convenience alias used throughout storage and ETL code.
pub type MealbridgeResult<T> = Result<T, MealbridgeError>;

/// Errors surfaced by the Mealbridge core.
///
/// `SourceUnavailable` and `RowCoercion` are recovered locally by the
/// loader (recorded in the [`crate::report::LoadReport`], never raised
/// across `load_all`); the remaining variants abort the current operation.
#[derive(Debug, thiserror::Error)]
pub enum MealbridgeError {
    #[error("source unavailable: {path}: {reason}")]
    SourceUnavailable { path: String, reason: String },

    #[error("row {line}: {reason}")]
    RowCoercion { line: u64, reason: String },

    #[error("integrity violation: {0}")]
    IntegrityViolation(String),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("config error: {0}")]
    Config(String),
}
