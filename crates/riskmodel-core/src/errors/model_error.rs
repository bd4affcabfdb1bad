//! Generative-model construction errors.

use super::error_code::{self, RiskModelErrorCode};
use super::{EstimateError, InferenceError};

/// Errors raised while assembling or sampling the system model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Risk '{risk}' ({category}): {source}")]
    Risk {
        risk: String,
        category: String,
        #[source]
        source: EstimateError,
    },

    #[error("Node '{name}' is already registered")]
    DuplicateNode { name: String },

    #[error("Unknown node id {id}")]
    UnknownNode { id: usize },

    #[error("Risk '{risk}' has {found} technical estimates, system defines {expected}")]
    DimensionMismatch {
        risk: String,
        expected: usize,
        found: usize,
    },

    #[error("Risk '{name}' is registered more than once")]
    DuplicateRisk { name: String },

    #[error("Impact category '{name}' is registered more than once")]
    DuplicateCategory { name: String },

    #[error("Inference error: {0}")]
    Inference(#[from] InferenceError),
}

impl RiskModelErrorCode for ModelError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Inference(e) => e.error_code(),
            _ => error_code::MODEL_CONSTRUCTION_ERROR,
        }
    }
}
