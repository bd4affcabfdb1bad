//! Curve-fitting errors.

use super::error_code::{self, RiskModelErrorCode};

/// Errors that can occur during nonlinear least-squares fitting.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    #[error("Insufficient data: {points} points, at least {required} required")]
    InsufficientData { points: usize, required: usize },

    #[error("Length mismatch: {xs} x values, {ys} y values")]
    LengthMismatch { xs: usize, ys: usize },

    #[error("Fit did not converge after {iterations} iterations (residual sum of squares {residual})")]
    DidNotConverge { iterations: u32, residual: f64 },
}

impl RiskModelErrorCode for FitError {
    fn error_code(&self) -> &'static str {
        error_code::FIT_ERROR
    }
}
