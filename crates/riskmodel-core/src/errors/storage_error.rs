//! Estimate persistence errors.

use super::error_code::{self, RiskModelErrorCode};

/// Errors raised by `EstimateStore` implementations.
///
/// `Io` and `TableNotFound` are IO failures; the rest are schema failures
/// naming the offending table, category and risk.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error at {path}: {message}")]
    Io { path: String, message: String },

    #[error("Estimate table '{table}' not found at {location}")]
    TableNotFound { table: String, location: String },

    #[error("Risk '{risk}' missing from {category} table '{table}'")]
    MissingRow {
        table: String,
        category: String,
        risk: String,
    },

    #[error("Column '{column}' missing from table '{table}'")]
    MissingColumn { table: String, column: String },

    #[error("Risk '{risk}' appears more than once in table '{table}'")]
    DuplicateRow { table: String, risk: String },

    #[error("Invalid value '{value}' for risk '{risk}', column '{column}' in table '{table}'")]
    InvalidValue {
        table: String,
        risk: String,
        column: String,
        value: String,
    },

    #[error("Malformed table '{table}': {message}")]
    Malformed { table: String, message: String },

    #[error("SQLite error: {message}")]
    Sqlite { message: String },
}

impl StorageError {
    /// True for failures of the underlying medium rather than the schema.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::TableNotFound { .. })
    }
}

impl RiskModelErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } | Self::TableNotFound { .. } => error_code::IO_ERROR,
            Self::Sqlite { .. } => error_code::STORAGE_ERROR,
            _ => error_code::SCHEMA_ERROR,
        }
    }
}
