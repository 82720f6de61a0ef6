//! Integration tests for arrears_optimiser.
//!
//! # Test Categories
//!
//! 1. **Bootstrap**: the EUR OIS snapshot is repriced by the stripped curve
//! 2. **Calibration**: the EUR swaption grid calibrates and simulates
//! 3. **Pipeline to harness**: calibrated and uncalibrated models feed the
//!    consistency ladder

use std::sync::Arc;

use approx::assert_relative_eq;
use arrears_core::market_data::YieldCurve;
use arrears_models::calibration::{CalibrationError, HullWhiteCalibrationConfig};
use arrears_optimiser::bootstrapping::{BootstrapResult, OisBootstrapper};
use arrears_optimiser::calibration::{CalibrationPipeline, HullWhiteCalibrationPipeline};
use arrears_optimiser::market_data;
use arrears_pricing::consistency::{ConsistencyHarness, LadderConfig, MarketVolTable};
use arrears_pricing::mc::SimulationConfig;

fn eur_curve() -> BootstrapResult {
    let quotes = market_data::eur_ois_quotes().unwrap();
    OisBootstrapper::default().bootstrap(&quotes).unwrap()
}

fn pipeline(horizon: f64) -> HullWhiteCalibrationPipeline {
    let simulation = SimulationConfig::builder()
        .n_paths(500)
        .horizon(horizon)
        .seed(3434)
        .build()
        .unwrap();
    let calibration = HullWhiteCalibrationConfig {
        num_threads: 2,
        ..Default::default()
    };
    HullWhiteCalibrationPipeline::new(calibration, simulation, market_data::reference_date())
}

// ============================================================================
// Bootstrap
// ============================================================================

#[test]
fn test_bootstrap_reprices_eur_quotes() {
    let result = eur_curve();

    assert_eq!(result.pillars.len(), 34);
    assert!(result.max_residual() < 1e-10);

    // Overnight pillar in closed form
    assert_relative_eq!(
        result.discount_factors[0],
        1.0 / (1.0 - 0.0055 / 365.0),
        max_relative = 1e-14
    );
}

#[test]
fn test_bootstrapped_curve_shape() {
    let curve = eur_curve().curve;

    // Zero rates stay negative out to 50Y and are least negative at the long end
    let short = curve.zero_rate(1.0).unwrap();
    let belly = curve.zero_rate(5.0).unwrap();
    let long = curve.zero_rate(50.0).unwrap();
    assert!(short < 0.0 && belly < 0.0 && long < 0.0);
    assert!(long > belly);

    // Beyond the last pillar the curve keeps its last forward
    let f1 = curve.forward_rate(55.0, 56.0).unwrap();
    let f2 = curve.forward_rate(60.0, 61.0).unwrap();
    assert_relative_eq!(f1, f2, max_relative = 1e-10);
}

// ============================================================================
// Calibration
// ============================================================================

#[test]
fn test_eur_grid_calibration() {
    let grid = market_data::eur_swaption_grid().unwrap();
    let curve: Arc<dyn YieldCurve<f64>> = Arc::new(eur_curve().curve);
    let pipeline = pipeline(2.0);

    // The one-month row expires within a quarter and is dropped
    let items = pipeline.calibration_items(&grid).unwrap();
    assert_eq!(items.len(), 16 * 14);
    assert_eq!(items[0].label(), "2M\t1Y");

    let model = pipeline.calibrate(&grid, curve).unwrap();
    let config = pipeline.calibration_config();
    let (a, sigma) = (model.parameters[0].1, model.parameters[1].1);
    assert!(a >= config.mean_reversion_bounds.0 && a <= config.mean_reversion_bounds.1);
    assert!(sigma >= config.volatility_bounds.0 && sigma <= config.volatility_bounds.1);

    // Two parameters cannot fit the whole surface, but the level is right
    assert!(model.report.is_acceptable(1e-2));
    assert!(model.report.rms_error < 2e-3);
    assert_eq!(model.provider.number_of_paths(), 500);
}

#[test]
fn test_calibration_failure_is_reported() {
    let grid = market_data::eur_swaption_grid().unwrap();
    let curve: Arc<dyn YieldCurve<f64>> = Arc::new(eur_curve().curve);
    let simulation = SimulationConfig::builder().n_paths(10).horizon(1.0).build().unwrap();
    let calibration = HullWhiteCalibrationConfig {
        max_iterations: 1,
        num_threads: 1,
        ..Default::default()
    };
    let pipeline =
        HullWhiteCalibrationPipeline::new(calibration, simulation, market_data::reference_date());

    match pipeline.calibrate(&grid, curve) {
        Err(CalibrationError::Failure(failure)) => {
            assert_eq!(failure.iterations, 1);
            assert!(failure.last_accuracy > 0.0);
        }
        other => panic!("expected a calibration failure, got {other:?}"),
    }
}

// ============================================================================
// Pipeline to harness
// ============================================================================

#[test]
fn test_calibrated_and_uncalibrated_ladders() {
    let grid = market_data::eur_swaption_grid().unwrap();
    let curve: Arc<dyn YieldCurve<f64>> = Arc::new(eur_curve().curve);
    let pipeline = pipeline(4.0);

    let calibrated = pipeline.calibrate(&grid, curve.clone()).unwrap();
    let uncalibrated = pipeline.uncalibrated(curve).unwrap();

    // Strike near the negative forwards so every caplet has time value
    let ladder = LadderConfig {
        strike: -0.005,
        ..Default::default()
    };
    let harness = ConsistencyHarness::new(ladder, MarketVolTable::builtin());
    let comparison = harness
        .run_pair(calibrated.provider.as_ref(), &uncalibrated)
        .unwrap();

    // Begin times 0.5, 1.0, ..., 3.5 on a four year horizon
    assert_eq!(comparison.calibrated.rows.len(), 6);
    assert_eq!(comparison.uncalibrated.rows.len(), 6);
    assert_eq!(comparison.calibrated.failure_count(), 0);
    assert_eq!(comparison.uncalibrated.failure_count(), 0);
    assert!(comparison.calibration_improves().is_some());
}
