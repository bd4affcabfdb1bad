use criterion::{black_box, criterion_group, criterion_main, Criterion};

use riskmodel_analysis::utility::logistic::fit_logistic;
use riskmodel_analysis::optimize::LeastSquaresOptions;
use riskmodel_analysis::{DesignSystem, ForwardSampler, InferenceEngine, PertBeta, Risk, UtilityCurve};
use riskmodel_core::config::SeverityScheme;
use riskmodel_core::types::ThreePointEstimate;

/// System with `n` risks and two technical dimensions, all estimates set.
fn build_system(n: usize) -> DesignSystem {
    let risks = (0..n)
        .map(|i| {
            let f = i as f64;
            Risk::new(format!("r{i}"), (i % 10) as f64 / 10.0)
                .unwrap()
                .with_schedule(ThreePointEstimate::new(f, f + 1.0, f + 4.0))
                .with_cost(ThreePointEstimate::new(10.0 * f, 10.0 * f + 5.0, 10.0 * f + 30.0))
                .with_technical(vec![
                    ThreePointEstimate::new(0.0, 0.5, 2.0),
                    ThreePointEstimate::new(1.0, 1.5, 3.0),
                ])
        })
        .collect();
    let curve = |name: &str| UtilityCurve::new(SeverityScheme::named(name, "u")).unwrap();
    DesignSystem::new(
        "Bench",
        risks,
        curve("Schedule"),
        curve("Cost"),
        vec![curve("Weight"), curve("Power")],
    )
    .unwrap()
}

fn bench_logistic_fit(c: &mut Criterion) {
    let b = [0.0, 2.5, 5.0, 7.5, 10.0];
    let u = [0.0, -1.0, -3.0, -5.0, -7.0];
    let options = LeastSquaresOptions::default();
    c.bench_function("logistic_fit_default_table", |bench| {
        bench.iter(|| fit_logistic(black_box(&b), black_box(&u), &options).unwrap());
    });
}

fn bench_pert_construction(c: &mut Criterion) {
    let estimates: Vec<_> = (0..1000)
        .map(|i| {
            let f = i as f64;
            ThreePointEstimate::new(f, f + 1.0 + f * 0.01, f + 5.0)
        })
        .collect();
    c.bench_function("pert_from_estimate_1k", |bench| {
        bench.iter(|| {
            for e in &estimates {
                black_box(PertBeta::from_estimate(e).unwrap());
            }
        });
    });
}

fn bench_forward_sampling(c: &mut Criterion) {
    let system = build_system(50);
    let model = system.build_model().unwrap();
    let engine = ForwardSampler::new(1000, 4).with_seed(7);
    c.bench_function("forward_sample_50_risks_4x1000", |bench| {
        bench.iter(|| engine.sample(black_box(&model)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_logistic_fit,
    bench_pert_construction,
    bench_forward_sampling
);
criterion_main!(benches);
