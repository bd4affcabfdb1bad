use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use riskmodel_analysis::{LogisticParams, ModelBuilder, PertBeta, UtilityCurve, UtilityMode};
use riskmodel_core::config::{FitConfig, SeverityScheme};
use riskmodel_core::errors::{FitError, UtilityError};
use riskmodel_core::types::ThreePointEstimate;
use proptest::prelude::*;

fn arb_estimate() -> impl Strategy<Value = ThreePointEstimate> {
    (-1e3f64..1e3, 0.0f64..100.0, 0.01f64..100.0)
        .prop_map(|(a, left, right)| ThreePointEstimate::new(a, a + left, a + left + right))
}

/// Strictly ascending breakpoints paired with strictly rising utilities
/// that start just above `start`.
fn arb_table(start: f64) -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    prop::collection::vec((0.1f64..10.0, 0.05f64..5.0), 3..7)
        .prop_map(move |steps| build_table(start, steps))
}

fn build_table(start: f64, steps: Vec<(f64, f64)>) -> (Vec<f64>, Vec<f64>) {
    let mut b = Vec::with_capacity(steps.len());
    let mut u = Vec::with_capacity(steps.len());
    let (mut x, mut y) = (0.0, start);
    for (dx, dy) in steps {
        x += dx;
        y += dy;
        b.push(x);
        u.push(y);
    }
    (b, u)
}

fn table_curve(breakpoints: Vec<f64>, utilities: Vec<f64>) -> Result<UtilityCurve, UtilityError> {
    let names = (0..breakpoints.len()).map(|i| format!("L{i}")).collect();
    let scheme = SeverityScheme::named("P", "u").with_levels(breakpoints, utilities, names);
    let fit = FitConfig { max_iterations: Some(500), ..FitConfig::default() };
    UtilityCurve::with_fit_config(scheme, &fit)
}

fn is_typed_fit_failure(err: &UtilityError) -> bool {
    matches!(
        err,
        UtilityError::Fit { source: FitError::DidNotConverge { residual, .. }, .. }
            if residual.is_finite()
    )
}

// ── PERT shape ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn pert_shapes_positive_and_sum_to_six(estimate in arb_estimate()) {
        let pert = PertBeta::from_estimate(&estimate).unwrap();
        prop_assert!(pert.alpha() > 0.0);
        prop_assert!(pert.beta() > 0.0);
        prop_assert!((pert.alpha() + pert.beta() - 6.0).abs() < 1e-6);
    }

    #[test]
    fn pert_samples_stay_in_support(estimate in arb_estimate(), seed in any::<u64>()) {
        let pert = PertBeta::from_estimate(&estimate).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..64 {
            let x = pert.sample(&mut rng);
            prop_assert!(x >= estimate.minimum && x <= estimate.maximum);
        }
    }

    #[test]
    fn pert_quantiles_stay_in_support(estimate in arb_estimate(), p in 0.0f64..=1.0) {
        let pert = PertBeta::from_estimate(&estimate).unwrap();
        let x = pert.quantile(p);
        prop_assert!(x >= estimate.minimum && x <= estimate.maximum);
    }

    #[test]
    fn pert_mean_inside_support(estimate in arb_estimate()) {
        let pert = PertBeta::from_estimate(&estimate).unwrap();
        prop_assert!(pert.mean() >= estimate.minimum && pert.mean() <= estimate.maximum);
    }
}

// ── Utility shape ────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn discrete_utility_is_monotone_for_sorted_tables(
        (breakpoints, utilities) in arb_table(-10.0),
        points in prop::collection::vec(-5.0f64..80.0, 2..40),
    ) {
        let utilities_copy = utilities.clone();
        match table_curve(breakpoints, utilities) {
            Ok(curve) => {
                let mut points = points;
                points.sort_by(f64::total_cmp);
                let values = curve.evaluate(&points, UtilityMode::Discrete);
                for pair in values.windows(2) {
                    prop_assert!(pair[1] >= pair[0]);
                }
            }
            Err(err) => prop_assert!(is_typed_fit_failure(&err), "{err} for {utilities_copy:?}"),
        }
    }

    #[test]
    fn fitted_logistic_rises_with_table_toward_l(
        (breakpoints, utilities) in arb_table(-10.0),
    ) {
        match table_curve(breakpoints, utilities.clone()) {
            Ok(curve) => {
                let p = curve.params();
                prop_assert!(p.k > 0.0 && p.l > 0.0, "{p:?} for {utilities:?}");
                let slack = 1e-12 * p.l.abs();
                for pair in curve.tabulate(200).windows(2) {
                    prop_assert!(pair[1].logistic >= pair[0].logistic - slack);
                    prop_assert!(pair[1].discrete >= pair[0].discrete);
                }
                let far = curve.logistic_utility(p.x0 + 60.0 / p.k);
                prop_assert!((far - p.l).abs() <= 1e-9 * p.l.abs(), "f(far) = {far}, L = {}", p.l);
            }
            Err(err) => prop_assert!(is_typed_fit_failure(&err), "{err} for {utilities:?}"),
        }
    }

    #[test]
    fn logistic_override_is_monotone(
        l in 0.1f64..100.0,
        k in 0.01f64..10.0,
        x0 in -50.0f64..50.0,
        points in prop::collection::vec(-100.0f64..100.0, 2..40),
    ) {
        let curve = UtilityCurve::new(SeverityScheme::default()).unwrap();
        let mut points = points;
        points.sort_by(f64::total_cmp);
        let mode = UtilityMode::Logistic(Some(LogisticParams::new(l, k, x0)));
        let values = curve.evaluate(&points, mode);
        for pair in values.windows(2) {
            prop_assert!(pair[1] >= pair[0]);
        }
        for v in values {
            prop_assert!((0.0..=l).contains(&v));
        }
    }
}

/// Rising tables that start at zero are the common case: nearly all of them
/// must fit, and every failure must be a typed `DidNotConverge`.
#[test]
fn rising_tables_from_zero_mostly_fit() {
    let mut rng = StdRng::seed_from_u64(7);
    let cases = 200;
    let mut failures = 0;
    for _ in 0..cases {
        let len = rng.gen_range(3..7);
        let steps = (0..len)
            .map(|_| (rng.gen_range(0.1..10.0), rng.gen_range(0.05..5.0)))
            .collect();
        let (mut breakpoints, mut utilities) = build_table(0.0, steps);
        breakpoints.insert(0, 0.0);
        utilities.insert(0, 0.0);
        breakpoints.truncate(len);
        utilities.truncate(len);
        match table_curve(breakpoints, utilities) {
            Ok(curve) => assert!(curve.params().k > 0.0 && curve.params().l > 0.0),
            Err(err) => {
                assert!(is_typed_fit_failure(&err), "{err}");
                failures += 1;
            }
        }
    }
    assert!(failures * 5 <= cases, "{failures} of {cases} fits failed");
}

// ── Model graph ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn weighted_sum_is_dot_product(
        terms in prop::collection::vec((0.0f64..1.0, 0.0f64..1.0), 1..12),
    ) {
        let mut builder = ModelBuilder::new();
        let mut ids = Vec::new();
        for (i, _) in terms.iter().enumerate() {
            ids.push(builder.beta(format!("x{i}"), 2.0, 3.0).unwrap());
        }
        let weighted = terms.iter().zip(&ids).map(|((w, _), id)| (*w, *id)).collect();
        let total = builder.weighted_sum("total", weighted).unwrap();
        let graph = builder.build();

        let values = graph.evaluate(|id, _| terms[id.index()].1);
        let expected: f64 = terms.iter().map(|(w, x)| w * x).sum();
        prop_assert!((values[total.index()] - expected).abs() < 1e-9);
    }
}
