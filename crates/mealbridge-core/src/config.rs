//! TOML-backed configuration: database location and the four CSV sources.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{MealbridgeError, MealbridgeResult};

/// Top-level configuration, deserializable from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub sources: SourcePaths,
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("mealbridge.db"),
        }
    }
}

/// Locations of the four tabular input sources.
///
/// Defaults match the file names the upstream dataset ships with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcePaths {
    pub providers: PathBuf,
    pub receivers: PathBuf,
    pub food_listings: PathBuf,
    pub claims: PathBuf,
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self {
            providers: PathBuf::from("providers_data.csv"),
            receivers: PathBuf::from("receivers_data.csv"),
            food_listings: PathBuf::from("food_listings_data.csv"),
            claims: PathBuf::from("claims_data.csv"),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> MealbridgeResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| MealbridgeError::Config(format!("{}: {e}", path.display())))?;
        toml::from_str(&text)
            .map_err(|e| MealbridgeError::Config(format!("{}: {e}", path.display())))
    }
}
