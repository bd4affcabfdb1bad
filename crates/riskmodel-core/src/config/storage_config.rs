//! Estimate persistence configuration.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_STORAGE_BACKEND, DEFAULT_STORAGE_ROOT};
use crate::errors::ConfigError;

/// Storage medium for estimate tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// One CSV file per category under `<root>/<system>/`.
    Csv,
    /// One table per category in `<root>/riskmodel.db`.
    Sqlite,
}

impl StorageBackend {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(ConfigError::ValidationFailed {
                field: "storage.backend".to_string(),
                message: format!("unknown backend '{other}', expected 'csv' or 'sqlite'"),
            }),
        }
    }
}

/// Where and how estimate tables are persisted.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Root directory. Default: current directory.
    pub root: Option<String>,
    /// Backend name: "csv" or "sqlite". Default: "csv".
    pub backend: Option<String>,
}

impl StorageConfig {
    pub fn effective_root(&self) -> PathBuf {
        PathBuf::from(self.root.as_deref().unwrap_or(DEFAULT_STORAGE_ROOT))
    }

    pub fn effective_backend(&self) -> Result<StorageBackend, ConfigError> {
        self.backend
            .as_deref()
            .unwrap_or(DEFAULT_STORAGE_BACKEND)
            .parse()
    }
}
