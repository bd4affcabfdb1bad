//! Logistic severity function and its least-squares fit to a step table.

use levenberg_marquardt::{LeastSquaresProblem, TerminationReason};
use nalgebra::storage::Owned;
use nalgebra::{DVector, Dyn, OMatrix, Vector3, U3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use riskmodel_core::constants::MIN_FIT_POINTS;
use riskmodel_core::errors::FitError;

use crate::optimize::{FitReport, LeastSquaresOptions};

/// Parameters of `L / (1 + exp(-k (x - x0)))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogisticParams {
    /// Asymptote as x → +∞ (for `k > 0`).
    pub l: f64,
    /// Steepness.
    pub k: f64,
    /// Midpoint.
    pub x0: f64,
}

impl LogisticParams {
    pub fn new(l: f64, k: f64, x0: f64) -> Self {
        Self { l, k, x0 }
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        logistic(x, self.l, self.k, self.x0)
    }
}

pub fn logistic(x: f64, l: f64, k: f64, x0: f64) -> f64 {
    l / (1.0 + (-k * (x - x0)).exp())
}

/// Starting point for the fit:
/// `L = u[-1]`, `k = -sign(u[-1])·(u[-1] - u[0])/(b[-1] - b[0])`,
/// `x0 = mean(b)`, with `sign(0) = 1`.
///
/// A single breakpoint gives `k = 0`.
pub fn initial_guess(breakpoints: &[f64], utilities: &[f64]) -> LogisticParams {
    let (Some(&b_first), Some(&b_last)) = (breakpoints.first(), breakpoints.last()) else {
        return LogisticParams::new(0.0, 0.0, 0.0);
    };
    let (u_first, u_last) = match (utilities.first(), utilities.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => (0.0, 0.0),
    };

    let sign = if u_last < 0.0 { -1.0 } else { 1.0 };
    let span = b_last - b_first;
    let k = if span > 0.0 {
        -sign * (u_last - u_first) / span
    } else {
        0.0
    };
    let x0 = breakpoints.iter().sum::<f64>() / breakpoints.len() as f64;

    LogisticParams::new(u_last, k, x0)
}

/// Restart point when the first fit lands on a curve that runs against
/// the table: `k` positive, `L` on the side the table moves toward.
fn trend_guess(breakpoints: &[f64], utilities: &[f64]) -> LogisticParams {
    let guess = initial_guess(breakpoints, utilities);
    let (first, last) = endpoints(utilities);
    let trend = last - first;
    let l = if last != 0.0 && last.signum() == trend.signum() {
        last
    } else {
        trend
    };
    let (b_first, b_last) = endpoints(breakpoints);
    let span = b_last - b_first;
    let k = if span > 0.0 { 4.0 / span } else { 1.0 };
    LogisticParams::new(l, k, guess.x0)
}

fn endpoints(values: &[f64]) -> (f64, f64) {
    match (values.first(), values.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => (0.0, 0.0),
    }
}

/// Fit the logistic to `(breakpoints, utilities)`. Needs at least three
/// points.
///
/// The first attempt starts from `initial_guess`. A fit is accepted only
/// when it follows the table: for a rising or falling table `k > 0` and
/// `L` lies on the side the table moves toward, so the curve is monotone
/// in the table's direction and tends to `L`. It must also beat the best
/// constant. A rejected first fit is retried once from `trend_guess`;
/// a spent iteration budget is final. Failures are
/// `FitError::DidNotConverge`.
pub fn fit_logistic(
    breakpoints: &[f64],
    utilities: &[f64],
    options: &LeastSquaresOptions,
) -> Result<(LogisticParams, FitReport), FitError> {
    if breakpoints.len() != utilities.len() {
        return Err(FitError::LengthMismatch {
            xs: breakpoints.len(),
            ys: utilities.len(),
        });
    }
    if breakpoints.len() < MIN_FIT_POINTS {
        return Err(FitError::InsufficientData {
            points: breakpoints.len(),
            required: MIN_FIT_POINTS,
        });
    }

    match attempt(breakpoints, utilities, initial_guess(breakpoints, utilities), options) {
        Ok(fit) => Ok(fit),
        Err(Attempt::Exhausted(err)) => Err(err),
        Err(Attempt::Rejected(err)) => {
            debug!(error = %err, "logistic fit rejected, restarting along the table trend");
            attempt(breakpoints, utilities, trend_guess(breakpoints, utilities), options)
                .map_err(Attempt::into_error)
        }
    }
}

enum Attempt {
    /// The iteration budget ran out.
    Exhausted(FitError),
    /// The solver stopped on a curve that does not describe the table.
    Rejected(FitError),
}

impl Attempt {
    fn into_error(self) -> FitError {
        match self {
            Self::Exhausted(err) | Self::Rejected(err) => err,
        }
    }
}

fn attempt(
    breakpoints: &[f64],
    utilities: &[f64],
    guess: LogisticParams,
    options: &LeastSquaresOptions,
) -> Result<(LogisticParams, FitReport), Attempt> {
    let problem = LogisticProblem {
        xs: breakpoints,
        ys: utilities,
        params: Vector3::new(guess.l, guess.k, guess.x0),
    };
    let (problem, report) = options.solver().minimize(problem);
    let p = problem.params;
    let params = LogisticParams::new(p[0], p[1], p[2]);

    let fit = options
        .conclude(vec![p[0], p[1], p[2]], &report, utilities)
        .map_err(|err| match report.termination {
            TerminationReason::LostPatience => Attempt::Exhausted(err),
            _ => Attempt::Rejected(err),
        })?;
    check_shape(&params, &fit, utilities).map_err(Attempt::Rejected)?;
    Ok((params, fit))
}

fn check_shape(params: &LogisticParams, fit: &FitReport, utilities: &[f64]) -> Result<(), FitError> {
    let rejected = || FitError::DidNotConverge {
        iterations: fit.iterations,
        residual: fit.residual,
    };
    let (first, last) = endpoints(utilities);
    let trend = last - first;
    if trend != 0.0 && !(params.k > 0.0 && params.l != 0.0 && params.l.signum() == trend.signum()) {
        return Err(rejected());
    }

    let mean = utilities.iter().sum::<f64>() / utilities.len() as f64;
    let constant: f64 = utilities.iter().map(|u| (u - mean).powi(2)).sum();
    if constant > 0.0 && (fit.residual.is_nan() || fit.residual >= constant) {
        return Err(rejected());
    }
    Ok(())
}

/// Residuals `f(x_i) - y_i` with the analytic Jacobian.
struct LogisticProblem<'a> {
    xs: &'a [f64],
    ys: &'a [f64],
    params: Vector3<f64>,
}

impl LeastSquaresProblem<f64, Dyn, U3> for LogisticProblem<'_> {
    type ResidualStorage = Owned<f64, Dyn>;
    type JacobianStorage = Owned<f64, Dyn, U3>;
    type ParameterStorage = Owned<f64, U3>;

    fn set_params(&mut self, params: &Vector3<f64>) {
        self.params = *params;
    }

    fn params(&self) -> Vector3<f64> {
        self.params
    }

    fn residuals(&self) -> Option<DVector<f64>> {
        let (l, k, x0) = (self.params[0], self.params[1], self.params[2]);
        Some(DVector::from_iterator(
            self.xs.len(),
            self.xs
                .iter()
                .zip(self.ys)
                .map(|(&x, &y)| logistic(x, l, k, x0) - y),
        ))
    }

    fn jacobian(&self) -> Option<OMatrix<f64, Dyn, U3>> {
        let (l, k, x0) = (self.params[0], self.params[1], self.params[2]);
        let mut jacobian = OMatrix::<f64, Dyn, U3>::zeros(self.xs.len());
        for (i, &x) in self.xs.iter().enumerate() {
            let s = 1.0 / (1.0 + (-k * (x - x0)).exp());
            let slope = s * (1.0 - s);
            jacobian[(i, 0)] = s;
            jacobian[(i, 1)] = l * slope * (x - x0);
            jacobian[(i, 2)] = -l * k * slope;
        }
        Some(jacobian)
    }
}
