//! Three-point estimate errors.

use super::error_code::{self, RiskModelErrorCode};

/// Errors raised while turning a three-point estimate into a distribution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimateError {
    #[error("Non-finite estimate: min={minimum}, most likely={most_likely}, max={maximum}")]
    NonFinite {
        minimum: f64,
        most_likely: f64,
        maximum: f64,
    },

    #[error(
        "Invalid estimate: requires min <= most likely <= max, got min={minimum}, \
         most likely={most_likely}, max={maximum}"
    )]
    InvalidEstimate {
        minimum: f64,
        most_likely: f64,
        maximum: f64,
    },

    #[error("Degenerate distribution ({reason}): min={minimum}, most likely={most_likely}, max={maximum}")]
    DegenerateDistribution {
        minimum: f64,
        most_likely: f64,
        maximum: f64,
        reason: &'static str,
    },

    #[error("Baseline likelihood for risk '{risk}' must be within [0, 1], got {likelihood}")]
    InvalidLikelihood { risk: String, likelihood: f64 },
}

impl RiskModelErrorCode for EstimateError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DegenerateDistribution { .. } => error_code::DEGENERATE_DISTRIBUTION,
            _ => error_code::INVALID_ESTIMATE,
        }
    }
}
