//! Utility curve errors.

use super::error_code::{self, RiskModelErrorCode};
use super::FitError;

/// Errors raised while building or re-fitting a utility curve.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UtilityError {
    #[error("Invalid severity scheme '{scheme}', field {field}: {message}")]
    InvalidScheme {
        scheme: String,
        field: String,
        message: String,
    },

    #[error("Logistic fit failed for '{scheme}': {source}")]
    Fit {
        scheme: String,
        #[source]
        source: FitError,
    },
}

impl RiskModelErrorCode for UtilityError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidScheme { .. } => error_code::INVALID_SCHEME,
            Self::Fit { source, .. } => source.error_code(),
        }
    }
}
