//! Benchmarks for arrears_optimiser.

use std::sync::Arc;

use arrears_core::market_data::YieldCurve;
use arrears_models::calibration::{HullWhiteCalibrationConfig, HullWhiteCalibrator};
use arrears_optimiser::bootstrapping::{OisBootstrapper, OisQuote, PaymentFrequency};
use arrears_optimiser::calibration::HullWhiteCalibrationPipeline;
use arrears_optimiser::market_data;
use arrears_pricing::mc::SimulationConfig;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Annual OIS quotes from 1Y to `count` years.
fn generate_annual_quotes(count: u32) -> Vec<OisQuote> {
    (1..=count)
        .map(|year| {
            let rate = -0.005 + f64::from(year) * 0.0002;
            OisQuote::parse(&format!("{year}Y"), rate, PaymentFrequency::Annual).unwrap()
        })
        .collect()
}

fn benchmark_bootstrap(c: &mut Criterion) {
    let bootstrapper = OisBootstrapper::default();
    let quotes = market_data::eur_ois_quotes().unwrap();

    c.bench_function("bootstrap_eur_ois", |b| {
        b.iter(|| bootstrapper.bootstrap(black_box(&quotes)))
    });

    let mut group = c.benchmark_group("bootstrap_annual");
    for count in [10_u32, 30, 50] {
        let quotes = generate_annual_quotes(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &quotes, |b, quotes| {
            b.iter(|| bootstrapper.bootstrap(black_box(quotes)))
        });
    }
    group.finish();
}

fn benchmark_calibration(c: &mut Criterion) {
    let quotes = market_data::eur_ois_quotes().unwrap();
    let curve: Arc<dyn YieldCurve<f64>> =
        Arc::new(OisBootstrapper::default().bootstrap(&quotes).unwrap().curve);
    let grid = market_data::eur_swaption_grid().unwrap();
    let simulation = SimulationConfig::builder()
        .n_paths(2)
        .horizon(1.0)
        .build()
        .unwrap();
    let pipeline = HullWhiteCalibrationPipeline::new(
        HullWhiteCalibrationConfig::default(),
        simulation,
        market_data::reference_date(),
    );

    c.bench_function("calibration_items_eur_grid", |b| {
        b.iter(|| pipeline.calibration_items(black_box(&grid)))
    });

    let items = pipeline.calibration_items(&grid).unwrap();
    let calibrator = HullWhiteCalibrator::new(HullWhiteCalibrationConfig::default());

    let mut group = c.benchmark_group("hull_white_calibration");
    group.sample_size(10);
    group.bench_function("eur_grid", |b| {
        b.iter(|| calibrator.calibrate(black_box(&items), curve.as_ref()))
    });
    group.finish();
}

criterion_group!(benches, benchmark_bootstrap, benchmark_calibration);
criterion_main!(benches);
