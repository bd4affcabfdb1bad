//! Aggregate error for end-to-end system runs.

use super::error_code::RiskModelErrorCode;
use super::{ConfigError, EstimateError, FitError, ModelError, StorageError, UtilityError};

/// Errors from a full load-then-analyze run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    #[error("Estimate error: {0}")]
    Estimate(#[from] EstimateError),

    #[error("Fit error: {0}")]
    Fit(#[from] FitError),

    #[error("Utility error: {0}")]
    Utility(#[from] UtilityError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl RiskModelErrorCode for SystemError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Estimate(e) => e.error_code(),
            Self::Fit(e) => e.error_code(),
            Self::Utility(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Model(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
