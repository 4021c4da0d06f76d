mod load;
mod report;

pub use load::LoadCommand;
pub use report::ReportCommand;

use std::path::PathBuf;

use anyhow::Result;

use mealbridge_core::Config;

/// Resolve configuration: TOML file if given, defaults otherwise, with a
/// `--db` override on top.
pub(crate) fn resolve_config(config_path: Option<&PathBuf>, db: Option<PathBuf>) -> Result<Config> {
    let mut config = match config_path {
        Some(path) => Config::from_toml_file(path)?,
        None => Config::default(),
    };
    if let Some(db) = db {
        config.database.path = db;
    }
    Ok(config)
}
