//! Inference engine errors.

use super::error_code::{self, RiskModelErrorCode};

/// Errors reported by an `InferenceEngine`. Propagated unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    #[error("Engine '{engine}' failed: {message}")]
    EngineFailure { engine: String, message: String },

    #[error("Engine rejected model: {message}")]
    InvalidModel { message: String },

    #[error("Sampling cancelled")]
    Cancelled,
}

impl RiskModelErrorCode for InferenceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Cancelled => error_code::CANCELLED,
            _ => error_code::INFERENCE_ERROR,
        }
    }
}
