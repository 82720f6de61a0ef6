//! End-to-end ladder runs on simulated Hull-White term structures.
//!
//! # Test Categories
//!
//! 1. **Reference scenario**: strike 0.004783, semi-annual periods, seed 3434,
//!    2000 paths on a 21 year horizon
//! 2. **Convergence**: model ratios against `sqrt(1 + τ / (3 T))`

use std::sync::Arc;

use approx::assert_relative_eq;
use arrears_core::market_data::FlatCurve;
use arrears_models::models::HullWhiteParams;
use arrears_pricing::consistency::{ConsistencyHarness, LadderConfig, MarketVolTable};
use arrears_pricing::mc::{HullWhiteSimulation, SimulationConfig};

/// Relative error allowed between the first-row mc and analytic ratios.
const REFERENCE_TOLERANCE: f64 = 0.02;

fn simulation(params: HullWhiteParams, rate: f64, n_paths: usize, horizon: f64, antithetic: bool) -> HullWhiteSimulation {
    let config = SimulationConfig::builder()
        .n_paths(n_paths)
        .time_step(0.125)
        .horizon(horizon)
        .seed(3434)
        .antithetic(antithetic)
        .build()
        .unwrap();
    HullWhiteSimulation::new(params, Arc::new(FlatCurve::new(rate)), config).unwrap()
}

// ============================================================================
// Reference scenario
// ============================================================================

#[test]
fn test_reference_scenario_first_row() {
    let model = simulation(HullWhiteParams::new(0.05, 0.005).unwrap(), 0.005, 2000, 21.0, false);
    let harness = ConsistencyHarness::new(LadderConfig::default(), MarketVolTable::builtin());
    let report = harness.run(&model).unwrap();

    assert_eq!(report.rows.len(), 23);
    let first = report.rows[0].record().expect("first ladder point computed");
    assert_eq!(first.begin_time, 0.5);
    assert_eq!(first.end_time, 1.0);
    assert_relative_eq!(first.analytic_ratio, 1.1547, epsilon = 1e-4);
    // Documented tolerance of the reference scenario
    assert!(
        first.rel_error.abs() < REFERENCE_TOLERANCE,
        "mc ratio {:.4} vs analytic {:.4}",
        first.mc_ratio,
        first.analytic_ratio
    );
    assert_eq!(first.market_vol, Some(0.00201));
}

#[test]
fn test_reference_scenario_is_reproducible() {
    let params = HullWhiteParams::new(0.05, 0.005).unwrap();
    let harness = ConsistencyHarness::new(LadderConfig::default(), MarketVolTable::builtin());
    let first = harness.run(&simulation(params, 0.005, 512, 4.0, false)).unwrap();
    let second = harness.run(&simulation(params, 0.005, 512, 4.0, false)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_rate_diagnostics_track_curve() {
    let model = simulation(HullWhiteParams::new(0.05, 0.005).unwrap(), 0.005, 2000, 21.0, true);
    let harness = ConsistencyHarness::new(LadderConfig::default(), MarketVolTable::empty());
    let rows = harness.rate_diagnostics(&model);

    assert_eq!(rows.len(), 21);
    assert!(rows
        .iter()
        .all(|r| r.average_backward_rate.is_some() && r.average_libor_rate.is_some()));

    // The first period fixes today, so the classical rate is the curve forward
    let forward = (0.0025_f64.exp() - 1.0) / 0.5;
    assert_relative_eq!(rows[0].average_libor_rate.unwrap(), forward, max_relative = 1e-10);
    assert!((rows[0].average_backward_rate.unwrap() - forward).abs() < 5e-4);
}

// ============================================================================
// Convergence
// ============================================================================

#[test]
fn test_ratio_converges_to_analytic_value() {
    let model = simulation(HullWhiteParams::ho_lee(0.006).unwrap(), 0.0, 4000, 10.0, true);
    let ladder = LadderConfig {
        strike: 0.0,
        ..Default::default()
    };
    let report = ConsistencyHarness::new(ladder, MarketVolTable::empty())
        .run(&model)
        .unwrap();

    assert_eq!(report.failure_count(), 0);
    for record in report.records().filter(|r| r.begin_time >= 1.0) {
        assert!(
            record.rel_error.abs() < 0.05,
            "T = {}: mc ratio {:.4} vs analytic {:.4}",
            record.begin_time,
            record.mc_ratio,
            record.analytic_ratio
        );
    }
}
