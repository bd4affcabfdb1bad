//! UtilityCurve: severity scheme plus its fitted logistic.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use riskmodel_core::config::{FitConfig, SeverityScheme};
use riskmodel_core::errors::{FitError, UtilityError};

use super::logistic::{fit_logistic, LogisticParams};
use super::mode::UtilityMode;
use crate::optimize::{FitReport, LeastSquaresOptions};

/// One row of a tabulated curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtilityPoint {
    pub impact: f64,
    pub discrete: f64,
    pub logistic: f64,
}

/// Maps an impact magnitude to a severity (utility) value.
///
/// Built from a validated `SeverityScheme`; the logistic parameters are
/// fitted at construction and again on every `fit()`.
#[derive(Debug, Clone)]
pub struct UtilityCurve {
    scheme: SeverityScheme,
    params: LogisticParams,
    options: LeastSquaresOptions,
    last_fit: FitReport,
}

impl UtilityCurve {
    /// Build and fit with the default fit settings.
    pub fn new(scheme: SeverityScheme) -> Result<Self, UtilityError> {
        Self::with_fit_config(scheme, &FitConfig::default())
    }

    /// Build and fit with explicit fit settings.
    pub fn with_fit_config(scheme: SeverityScheme, fit: &FitConfig) -> Result<Self, UtilityError> {
        scheme.validate()?;
        let options = LeastSquaresOptions::from(fit);
        let (params, report) = Self::run_fit(&scheme, &options)?;
        Ok(Self {
            scheme,
            params,
            options,
            last_fit: report,
        })
    }

    pub fn name(&self) -> &str {
        &self.scheme.name
    }

    pub fn units(&self) -> &str {
        &self.scheme.units
    }

    pub fn scheme(&self) -> &SeverityScheme {
        &self.scheme
    }

    pub fn breakpoints(&self) -> &[f64] {
        &self.scheme.breakpoints
    }

    pub fn utilities(&self) -> &[f64] {
        &self.scheme.utilities
    }

    pub fn level_names(&self) -> &[String] {
        &self.scheme.level_names
    }

    pub fn probability_levels(&self) -> &[f64] {
        &self.scheme.probability_levels
    }

    pub fn probability_names(&self) -> &[String] {
        &self.scheme.probability_names
    }

    /// Fitted logistic parameters.
    pub fn params(&self) -> LogisticParams {
        self.params
    }

    /// Report of the most recent successful fit.
    pub fn last_fit(&self) -> &FitReport {
        &self.last_fit
    }

    /// Severities for a batch of impacts.
    pub fn evaluate(&self, impacts: &[f64], mode: UtilityMode<'_>) -> Vec<f64> {
        impacts
            .iter()
            .map(|&x| self.evaluate_one(x, mode))
            .collect()
    }

    pub fn evaluate_one(&self, impact: f64, mode: UtilityMode<'_>) -> f64 {
        match mode {
            UtilityMode::Discrete => self.discrete_utility(impact),
            UtilityMode::Logistic(None) => self.logistic_utility(impact),
            UtilityMode::Logistic(Some(params)) => params.evaluate(impact),
            UtilityMode::Custom(f) => f(impact),
        }
    }

    /// Step-table severity. Impacts at or above a breakpoint take that
    /// level; impacts below the first breakpoint (and NaN) take the first.
    pub fn discrete_utility(&self, impact: f64) -> f64 {
        self.scheme.utilities[self.level_index(impact)]
    }

    pub fn logistic_utility(&self, impact: f64) -> f64 {
        self.params.evaluate(impact)
    }

    pub fn custom_utility(&self, impact: f64, f: &dyn Fn(f64) -> f64) -> f64 {
        self.evaluate_one(impact, UtilityMode::Custom(f))
    }

    /// Label of the discrete level `impact` falls in.
    pub fn level_name(&self, impact: f64) -> &str {
        &self.scheme.level_names[self.level_index(impact)]
    }

    /// Label of the probability level nearest to `probability`.
    /// `None` when the scheme has no probability scale.
    pub fn probability_name(&self, probability: f64) -> Option<&str> {
        self.scheme
            .probability_levels
            .iter()
            .zip(&self.scheme.probability_names)
            .min_by(|(a, _), (b, _)| {
                (*a - probability)
                    .abs()
                    .total_cmp(&(*b - probability).abs())
            })
            .map(|(_, name)| name.as_str())
    }

    /// Re-fit the logistic to the current table.
    ///
    /// On failure the previous parameters are kept.
    pub fn fit(&mut self) -> Result<FitReport, UtilityError> {
        let (params, report) = Self::run_fit(&self.scheme, &self.options)?;
        self.params = params;
        self.last_fit = report.clone();
        Ok(report)
    }

    /// Replace the severity table. The logistic is not re-fitted until
    /// `fit()` is called.
    pub fn set_levels(
        &mut self,
        breakpoints: Vec<f64>,
        utilities: Vec<f64>,
        level_names: Vec<String>,
    ) -> Result<(), UtilityError> {
        let candidate = self
            .scheme
            .clone()
            .with_levels(breakpoints, utilities, level_names);
        candidate.validate_levels()?;
        self.scheme = candidate;
        Ok(())
    }

    /// `points` evenly spaced rows over `[b[0], b[-1] + 0.1·|b[-1]|]`.
    pub fn tabulate(&self, points: usize) -> Vec<UtilityPoint> {
        let breakpoints = &self.scheme.breakpoints;
        let (Some(&start), Some(&last)) = (breakpoints.first(), breakpoints.last()) else {
            return Vec::new();
        };
        let end = last + 0.1 * last.abs();
        let points = points.max(2);
        let step = (end - start) / (points - 1) as f64;

        (0..points)
            .map(|i| {
                let impact = if i == points - 1 {
                    end
                } else {
                    start + step * i as f64
                };
                UtilityPoint {
                    impact,
                    discrete: self.discrete_utility(impact),
                    logistic: self.logistic_utility(impact),
                }
            })
            .collect()
    }

    fn level_index(&self, impact: f64) -> usize {
        self.scheme
            .breakpoints
            .iter()
            .take_while(|&&b| b <= impact)
            .count()
            .saturating_sub(1)
    }

    fn run_fit(
        scheme: &SeverityScheme,
        options: &LeastSquaresOptions,
    ) -> Result<(LogisticParams, FitReport), UtilityError> {
        let (params, report) = fit_logistic(&scheme.breakpoints, &scheme.utilities, options)
            .map_err(|source| {
                if let FitError::DidNotConverge {
                    iterations,
                    residual,
                } = &source
                {
                    warn!(
                        scheme = %scheme.name,
                        fit_iterations = iterations,
                        fit_residual = residual,
                        "logistic fit did not converge"
                    );
                }
                UtilityError::Fit {
                    scheme: scheme.name.clone(),
                    source,
                }
            })?;
        debug!(
            scheme = %scheme.name,
            fit_iterations = report.iterations,
            fit_residual = report.residual,
            "logistic fit converged"
        );
        info!(
            scheme = %scheme.name,
            l = params.l,
            k = params.k,
            x0 = params.x0,
            "utility curve fitted"
        );
        Ok((params, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_curve() -> UtilityCurve {
        UtilityCurve::new(SeverityScheme::named("Cost", "M EUR")).unwrap()
    }

    #[test]
    fn test_discrete_at_first_breakpoint() {
        let c = default_curve();
        assert_eq!(c.discrete_utility(0.0), 0.0);
    }

    #[test]
    fn test_discrete_at_and_above_last_breakpoint() {
        let c = default_curve();
        assert_eq!(c.discrete_utility(10.0), -7.0);
        assert_eq!(c.discrete_utility(1e6), -7.0);
    }

    #[test]
    fn test_discrete_between_breakpoints() {
        let c = default_curve();
        assert_eq!(c.discrete_utility(2.4), 0.0);
        assert_eq!(c.discrete_utility(2.6), -1.0);
        assert_eq!(c.discrete_utility(9.9), -5.0);
    }

    #[test]
    fn test_discrete_below_range_clamps_to_first_level() {
        let c = default_curve();
        assert_eq!(c.discrete_utility(-3.0), 0.0);
        assert_eq!(c.level_name(-3.0), "None");
    }

    #[test]
    fn test_discrete_nan_maps_to_first_level() {
        assert_eq!(default_curve().discrete_utility(f64::NAN), 0.0);
    }

    #[test]
    fn test_logistic_override() {
        let c = default_curve();
        let p = LogisticParams::new(2.0, 1.0, 0.0);
        assert!((c.evaluate_one(0.0, UtilityMode::Logistic(Some(p))) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_custom_mode() {
        let c = default_curve();
        let square = |x: f64| x * x;
        assert_eq!(c.evaluate(&[1.0, 3.0], UtilityMode::Custom(&square)), vec![1.0, 9.0]);
        assert_eq!(c.custom_utility(4.0, &square), 16.0);
    }

    #[test]
    fn test_default_fit_tracks_table() {
        let c = default_curve();
        for (&b, &u) in c.breakpoints().iter().zip(c.utilities()) {
            assert!((c.logistic_utility(b) - u).abs() < 0.5, "at {b}");
        }
        assert!(c.params().l < 0.0 && c.params().k > 0.0);
    }

    #[test]
    fn test_set_levels_then_fit() {
        let mut c = default_curve();
        let before = c.params();
        c.set_levels(
            vec![0.0, 6.0, 12.0],
            vec![-1.0, -3.0, -5.0],
            vec!["Low".into(), "Mid".into(), "High".into()],
        )
        .unwrap();
        assert_eq!(c.params(), before);
        let report = c.fit().unwrap();
        assert!(report.residual < 1e-8);
        assert!((c.logistic_utility(6.0) + 3.0).abs() < 1e-6);
        assert_eq!(c.level_name(7.0), "Mid");
    }

    #[test]
    fn test_set_levels_rejects_unsorted() {
        let mut c = default_curve();
        let err = c
            .set_levels(
                vec![0.0, 3.0, 1.0],
                vec![0.0, 1.0, 2.0],
                vec!["a".into(), "b".into(), "c".into()],
            )
            .unwrap_err();
        assert!(matches!(err, UtilityError::InvalidScheme { .. }));
        assert_eq!(c.breakpoints().len(), 5);
    }

    #[test]
    fn test_fit_failure_keeps_parameters() {
        let mut c = default_curve();
        let before = c.params();
        c.set_levels(vec![0.0, 1.0], vec![0.0, -1.0], vec!["a".into(), "b".into()])
            .unwrap();
        assert!(matches!(c.fit(), Err(UtilityError::Fit { .. })));
        assert_eq!(c.params(), before);
    }

    #[test]
    fn test_probability_name_nearest() {
        let c = default_curve();
        assert_eq!(c.probability_name(0.0), Some("Remote"));
        assert_eq!(c.probability_name(0.5), Some("Roughly Even Chance"));
        assert_eq!(c.probability_name(1.0), Some("Almost Certain"));
    }

    #[test]
    fn test_tabulate_spans_range() {
        let c = default_curve();
        let rows = c.tabulate(12);
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0].impact, 0.0);
        assert!((rows[11].impact - 11.0).abs() < 1e-12);
        assert_eq!(rows[11].discrete, -7.0);
    }
}
