//! Solver settings and outcome reporting around
//! `levenberg_marquardt::LevenbergMarquardt`.

use levenberg_marquardt::{LevenbergMarquardt, MinimizationReport, TerminationReason};
use serde::{Deserialize, Serialize};

use riskmodel_core::config::FitConfig;
use riskmodel_core::errors::FitError;

/// Termination thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeastSquaresOptions {
    /// Budget in solver iterations; one iteration is `n + 1` evaluations
    /// for `n` parameters.
    pub max_iterations: u32,
    /// Relative cost reduction below which the fit ends.
    pub ftol: f64,
    /// Relative step size below which the fit ends.
    pub xtol: f64,
    /// Orthogonality between residuals and Jacobian columns.
    pub gtol: f64,
    /// RMS residual, relative to `max(1, max|y|)`, reported as an exact fit.
    pub residual_tol: f64,
}

impl Default for LeastSquaresOptions {
    fn default() -> Self {
        Self::from(&FitConfig::default())
    }
}

impl From<&FitConfig> for LeastSquaresOptions {
    fn from(config: &FitConfig) -> Self {
        Self {
            max_iterations: config.effective_max_iterations(),
            ftol: config.effective_ftol(),
            xtol: config.effective_xtol(),
            gtol: config.effective_gtol(),
            residual_tol: config.effective_residual_tol(),
        }
    }
}

impl LeastSquaresOptions {
    pub(crate) fn solver(&self) -> LevenbergMarquardt<f64> {
        LevenbergMarquardt::new()
            .with_ftol(self.ftol)
            .with_xtol(self.xtol)
            .with_gtol(self.gtol)
            .with_patience(self.max_iterations.max(1) as usize)
    }

    /// Turn a solver report into a `FitReport`, or `DidNotConverge` when the
    /// budget ran out or the solver gave up.
    pub(crate) fn conclude(
        &self,
        params: Vec<f64>,
        report: &MinimizationReport<f64>,
        ys: &[f64],
    ) -> Result<FitReport, FitError> {
        let residual = 2.0 * report.objective_function;
        let evaluations = u32::try_from(report.number_of_evaluations).unwrap_or(u32::MAX);
        let termination = match report.termination {
            TerminationReason::ResidualsZero => Termination::Residual,
            TerminationReason::Orthogonal => Termination::Gradient,
            TerminationReason::Converged { ftol: true, .. } => Termination::Cost,
            TerminationReason::Converged { .. } => Termination::Step,
            TerminationReason::LostPatience => {
                return Err(FitError::DidNotConverge {
                    iterations: self.max_iterations,
                    residual,
                })
            }
            _ => {
                return Err(FitError::DidNotConverge {
                    iterations: evaluations,
                    residual,
                })
            }
        };

        let scale = ys.iter().fold(1.0_f64, |acc, y| acc.max(y.abs()));
        let rms = (residual / ys.len().max(1) as f64).sqrt();
        let termination = if rms <= self.residual_tol * scale {
            Termination::Residual
        } else {
            termination
        };

        Ok(FitReport {
            params,
            residual,
            iterations: evaluations,
            termination,
        })
    }
}

/// Which criterion ended a successful fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Residuals are negligible relative to the data.
    Residual,
    /// The cost stopped decreasing.
    Cost,
    /// The step became negligible.
    Step,
    /// The residuals are orthogonal to the Jacobian.
    Gradient,
}

/// Outcome of a successful fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    pub params: Vec<f64>,
    /// Residual sum of squares at `params`.
    pub residual: f64,
    /// Residual evaluations used.
    pub iterations: u32,
    pub termination: Termination,
}
