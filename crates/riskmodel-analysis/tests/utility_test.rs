//! UtilityCurve behavior: fit scenarios, boundary values, and shape.

use riskmodel_analysis::utility::logistic::initial_guess;
use riskmodel_analysis::{LogisticParams, UtilityCurve, UtilityMode};
use riskmodel_core::config::{FitConfig, SeverityScheme};
use riskmodel_core::errors::{FitError, RiskModelErrorCode, UtilityError};

fn scheme(breakpoints: &[f64], utilities: &[f64]) -> SeverityScheme {
    let names = (0..breakpoints.len()).map(|i| format!("L{i}")).collect();
    SeverityScheme::named("Test", "units").with_levels(
        breakpoints.to_vec(),
        utilities.to_vec(),
        names,
    )
}

/// UTL-01: three-point table fit lands within 5% at both ends
#[test]
fn test_three_point_fit_scenario() {
    let curve = UtilityCurve::new(scheme(&[0.0, 5.0, 10.0], &[0.0, -3.0, -7.0])).unwrap();
    let at_zero = curve.logistic_utility(0.0);
    let at_ten = curve.logistic_utility(10.0);
    assert!(at_zero.abs() <= 0.05 * 7.0, "f(0) = {at_zero}");
    assert!((at_ten + 7.0).abs() <= 0.05 * 7.0, "f(10) = {at_ten}");
    assert!(curve.last_fit().residual < 1e-3);
}

/// UTL-02: discrete boundaries of the default scheme
#[test]
fn test_discrete_boundaries() {
    let curve = UtilityCurve::new(SeverityScheme::default()).unwrap();
    let b = curve.breakpoints().to_vec();
    let u = curve.utilities().to_vec();
    assert_eq!(curve.discrete_utility(b[0]), u[0]);
    assert_eq!(curve.discrete_utility(b[b.len() - 1]), u[u.len() - 1]);
    assert_eq!(curve.discrete_utility(b[b.len() - 1] * 100.0), u[u.len() - 1]);
    // below range clamps to the first level, never wraps to the last
    assert_eq!(curve.discrete_utility(b[0] - 1.0), u[0]);
}

/// UTL-03: fitted logistic of an increasing table is non-decreasing and
/// approaches L
#[test]
fn test_increasing_table_gives_monotone_logistic() {
    let curve = UtilityCurve::new(scheme(&[0.0, 1.0, 2.0, 3.0], &[0.0, 2.0, 8.0, 10.0])).unwrap();
    let table = curve.tabulate(200);
    for pair in table.windows(2) {
        assert!(pair[1].logistic >= pair[0].logistic);
        assert!(pair[1].discrete >= pair[0].discrete);
    }
    let l = curve.params().l;
    assert!((curve.logistic_utility(1e3) - l).abs() < 1e-9);
}

/// UTL-04: batch evaluation matches per-value evaluation in every mode
#[test]
fn test_batch_matches_single() {
    let curve = UtilityCurve::new(SeverityScheme::default()).unwrap();
    let impacts = [-1.0, 0.0, 3.3, 7.5, 12.0];
    let double = |x: f64| 2.0 * x;
    let override_params = LogisticParams::new(-10.0, 1.0, 5.0);
    for mode in [
        UtilityMode::Discrete,
        UtilityMode::Logistic(None),
        UtilityMode::Logistic(Some(override_params)),
        UtilityMode::Custom(&double),
    ] {
        let batch = curve.evaluate(&impacts, mode);
        for (x, y) in impacts.iter().zip(batch) {
            assert_eq!(curve.evaluate_one(*x, mode), y, "{} at {x}", mode.name());
        }
    }
}

/// UTL-05: invalid schemes are rejected at construction
#[test]
fn test_invalid_scheme_rejected() {
    let err = UtilityCurve::new(scheme(&[], &[])).unwrap_err();
    assert!(matches!(err, UtilityError::InvalidScheme { ref field, .. } if field == "breakpoints"));
    assert_eq!(err.error_code(), "INVALID_SCHEME");
}

/// UTL-06: fewer than three points cannot be fitted
#[test]
fn test_two_point_scheme_fails_fit() {
    let err = UtilityCurve::new(scheme(&[0.0, 1.0], &[0.0, -1.0])).unwrap_err();
    match err {
        UtilityError::Fit { source, .. } => assert_eq!(
            source,
            FitError::InsufficientData {
                points: 2,
                required: 3
            }
        ),
        other => panic!("unexpected error: {other}"),
    }
}

/// UTL-07: an exhausted iteration budget reports DidNotConverge
#[test]
fn test_iteration_budget() {
    let fit = FitConfig {
        max_iterations: Some(1),
        ..FitConfig::default()
    };
    let err = UtilityCurve::with_fit_config(scheme(&[0.0, 5.0, 10.0], &[0.0, -3.0, -7.0]), &fit)
        .unwrap_err();
    assert!(matches!(
        err,
        UtilityError::Fit {
            source: FitError::DidNotConverge { iterations: 1, .. },
            ..
        }
    ));
    assert_eq!(err.error_code(), "FIT_ERROR");
}

/// UTL-08: initial guess follows the documented formula
#[test]
fn test_initial_guess_formula() {
    let g = initial_guess(&[0.0, 5.0, 10.0], &[0.0, -3.0, -7.0]);
    assert_eq!(g.l, -7.0);
    assert!((g.k - (-0.7)).abs() < 1e-12);
    assert_eq!(g.x0, 5.0);
}

/// UTL-09: curves built from different schemes do not interfere
#[test]
fn test_independent_schemes() {
    let a = UtilityCurve::new(SeverityScheme::named("A", "months")).unwrap();
    let b = UtilityCurve::new(scheme(&[0.0, 6.0, 12.0], &[-1.0, -3.0, -5.0])).unwrap();
    assert_eq!(a.breakpoints().len(), 5);
    assert_eq!(b.breakpoints().len(), 3);
    assert_eq!(a.units(), "months");
    assert_ne!(a.params(), b.params());
}

/// UTL-10: a rising table of penalties has no logistic that follows it from
/// zero, so the fit fails instead of returning a falling curve
#[test]
fn test_rising_negative_table_fails_fit() {
    let err = UtilityCurve::new(scheme(
        &[7.49, 13.20, 19.28, 19.93],
        &[-6.40, -6.12, -2.14, -0.06],
    ))
    .unwrap_err();
    match err {
        UtilityError::Fit {
            source: FitError::DidNotConverge { residual, .. },
            ..
        } => assert!(residual.is_finite() && residual > 0.0),
        other => panic!("unexpected error: {other}"),
    }
}

/// UTL-11: an accepted fit always runs with the table toward its asymptote
#[test]
fn test_accepted_fit_follows_table_direction() {
    for (b, u) in [
        (vec![0.0, 2.5, 5.0, 7.5, 10.0], vec![0.0, -1.0, -3.0, -5.0, -7.0]),
        (vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 2.0, 8.0, 10.0]),
        (vec![0.0, 6.0, 12.0], vec![-1.0, -3.0, -5.0]),
    ] {
        let curve = UtilityCurve::new(scheme(&b, &u)).unwrap();
        let p = curve.params();
        let trend = u[u.len() - 1] - u[0];
        assert!(p.k > 0.0, "k = {}", p.k);
        assert_eq!(p.l.signum(), trend.signum());
    }
}
