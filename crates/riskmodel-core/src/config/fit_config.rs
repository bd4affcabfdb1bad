//! Curve-fitting configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_FIT_FTOL, DEFAULT_FIT_GTOL, DEFAULT_FIT_MAX_ITERATIONS, DEFAULT_FIT_RESIDUAL_TOL,
    DEFAULT_FIT_XTOL,
};

/// Termination settings for the Levenberg–Marquardt routine.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct FitConfig {
    /// Iteration budget. Default: 500.
    pub max_iterations: Option<u32>,
    /// Relative cost-reduction tolerance. Default: 1e-10.
    pub ftol: Option<f64>,
    /// Relative step tolerance. Default: 1e-10.
    pub xtol: Option<f64>,
    /// Gradient tolerance. Default: 1e-10.
    pub gtol: Option<f64>,
    /// RMS residual tolerance, scaled by the data magnitude. Default: 1e-8.
    pub residual_tol: Option<f64>,
}

impl FitConfig {
    pub fn effective_max_iterations(&self) -> u32 {
        self.max_iterations.unwrap_or(DEFAULT_FIT_MAX_ITERATIONS)
    }

    pub fn effective_ftol(&self) -> f64 {
        self.ftol.unwrap_or(DEFAULT_FIT_FTOL)
    }

    pub fn effective_xtol(&self) -> f64 {
        self.xtol.unwrap_or(DEFAULT_FIT_XTOL)
    }

    pub fn effective_gtol(&self) -> f64 {
        self.gtol.unwrap_or(DEFAULT_FIT_GTOL)
    }

    pub fn effective_residual_tol(&self) -> f64 {
        self.residual_tol.unwrap_or(DEFAULT_FIT_RESIDUAL_TOL)
    }
}
