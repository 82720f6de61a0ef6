//! Pricing properties of the caplet valuators.
//!
//! # Test Categories
//!
//! 1. **Parity**: caplet minus floorlet equals the rebased forward payoff
//! 2. **Strike behaviour**: monotonicity and the far-strike limits
//! 3. **Unit conversion**: implied volatilities reprice the Monte Carlo price
//! 4. **Lookups**: rate conventions, rebasing and error propagation

mod common;

use std::sync::Arc;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use arrears_core::market_data::FlatCurve;
use arrears_core::types::{CalculationError, ConfigurationError, PricingError};
use arrears_models::analytical::{Bachelier, Black};
use arrears_models::instruments::{CapletSpec, ValueUnit};
use arrears_models::models::HullWhiteParams;
use arrears_pricing::mc::{HullWhiteSimulation, SimulationConfig, SimulationProvider};
use arrears_pricing::valuation::{
    BackwardCapletValuator, CapletValuator, ClassicalCapletValuator, RateConvention,
};
use common::StubProvider;
use proptest::prelude::*;

fn price(
    valuator: &dyn CapletValuator,
    caplet: &CapletSpec,
    model: &dyn SimulationProvider,
) -> f64 {
    valuator
        .value(0.0, &caplet.with_value_unit(ValueUnit::Value), model)
        .unwrap()
        .expectation()
}

fn hull_white(n_paths: usize) -> HullWhiteSimulation {
    let config = SimulationConfig::builder()
        .n_paths(n_paths)
        .time_step(0.25)
        .horizon(6.0)
        .seed(3434)
        .antithetic(true)
        .build()
        .unwrap();
    HullWhiteSimulation::new(
        HullWhiteParams::new(0.03, 0.006).unwrap(),
        Arc::new(FlatCurve::new(0.0)),
        config,
    )
    .unwrap()
}

// ============================================================================
// Parity
// ============================================================================

#[test]
fn test_parity_on_deterministic_paths() {
    let model = StubProvider::uniform(-0.01, 0.02, 301);
    let caplet = CapletSpec::caplet(3.0, 0.5, 0.004).unwrap();
    let valuator = BackwardCapletValuator::default();

    let cap = price(&valuator, &caplet, &model);
    let floor = price(&valuator, &caplet.as_floorlet(), &model);

    assert_relative_eq!(
        cap - floor,
        (model.mean_rate() - 0.004) * 0.5,
        max_relative = 1e-12
    );
}

#[test]
fn test_parity_on_simulated_paths() {
    let model = hull_white(4000);
    let caplet = CapletSpec::caplet(2.5, 0.5, 0.003).unwrap();

    for valuator in [
        &BackwardCapletValuator::default() as &dyn CapletValuator,
        &ClassicalCapletValuator::default(),
    ] {
        let cap = price(valuator, &caplet, &model);
        let floor = price(valuator, &caplet.as_floorlet(), &model);

        let rate = match valuator.convention() {
            RateConvention::Backward => model.backward_rate(3.0, 2.5, 3.0).unwrap(),
            RateConvention::Classical => model.libor_rate(2.5, 2.5, 3.0).unwrap(),
        };
        let deflated_rate = rate.div(&model.numeraire(3.0).unwrap()).unwrap();

        // Forward rebased like the payoff; the curve is flat at zero so the
        // deflator averages to one up to sampling error.
        assert_abs_diff_eq!(
            cap - floor,
            (deflated_rate.expectation() - 0.003) * 0.5,
            epsilon = 1e-6
        );
    }
}

// ============================================================================
// Strike behaviour
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_value_monotone_in_strike(
        low in -0.02_f64..0.02,
        gap in 0.0_f64..0.01,
    ) {
        let model = StubProvider::uniform(-0.01, 0.02, 101)
            .with_numeraire((0..101).map(|i| 1.0 + 0.001 * i as f64).collect());
        let valuator = BackwardCapletValuator::default();
        let caplet = CapletSpec::caplet(2.0, 0.5, low).unwrap();
        let higher = caplet.with_strike(low + gap);

        prop_assert!(price(&valuator, &caplet, &model) >= price(&valuator, &higher, &model));
        prop_assert!(
            price(&valuator, &caplet.as_floorlet(), &model)
                <= price(&valuator, &higher.as_floorlet(), &model)
        );
    }
}

#[test]
fn test_far_strike_limits() {
    let numeraire: Vec<f64> = (0..101).map(|i| 1.0 + 0.002 * i as f64).collect();
    let model = StubProvider::uniform(-0.01, 0.02, 101).with_numeraire(numeraire.clone());
    let valuator = BackwardCapletValuator::default();

    let out_of_the_money = CapletSpec::caplet(2.0, 0.5, 1.0).unwrap();
    assert_eq!(price(&valuator, &out_of_the_money, &model), 0.0);

    let strike = -1.0;
    let in_the_money = CapletSpec::caplet(2.0, 0.5, strike).unwrap();
    let n = numeraire.len() as f64;
    let deflated_rate: f64 = model
        .backward
        .iter()
        .zip(&numeraire)
        .map(|(r, num)| r / num)
        .sum::<f64>()
        / n;
    let deflator: f64 = numeraire.iter().map(|num| 1.0 / num).sum::<f64>() / n;
    assert_relative_eq!(
        price(&valuator, &in_the_money, &model),
        (deflated_rate - strike * deflator) * 0.5,
        max_relative = 1e-12
    );
}

#[test]
fn test_rebasing_to_evaluation_time() {
    let model = StubProvider::uniform(0.0, 0.02, 11).with_numeraire(vec![1.5; 11]);
    let caplet = CapletSpec::caplet(4.0, 0.5, 0.01)
        .unwrap()
        .with_value_unit(ValueUnit::Value);

    // The stub numeraire is the same at t₀ = 1 and at payment, so rebasing
    // cancels discounting entirely.
    let value = BackwardCapletValuator::default()
        .value(1.0, &caplet, &model)
        .unwrap();
    for (path, rate) in model.backward.iter().enumerate() {
        assert_abs_diff_eq!(value.value_at(path), caplet.payoff(*rate), epsilon = 1e-15);
    }
}

// ============================================================================
// Unit conversion
// ============================================================================

#[test]
fn test_normal_volatility_reprices_simulated_caplet() {
    let model = hull_white(2000);
    let caplet = CapletSpec::caplet(3.0, 0.5, 0.001).unwrap();
    let valuator = BackwardCapletValuator::default();

    let mc_price = price(&valuator, &caplet, &model);
    let vol = valuator.value(0.0, &caplet, &model).unwrap().expectation();

    let forward = model
        .backward_rate(3.5, 3.0, 3.5)
        .unwrap()
        .div(&model.numeraire(3.5).unwrap())
        .unwrap()
        .expectation();
    let repriced = 0.5 * Bachelier::new(forward, vol).unwrap().price_call(0.001, 3.0);
    assert_relative_eq!(repriced, mc_price, max_relative = 1e-6);
}

#[test]
fn test_floorlet_volatility_inverts_floorlet_price_as_call() {
    let model = StubProvider::uniform(-0.01, 0.02, 301);
    let floorlet = CapletSpec::caplet(3.0, 0.5, 0.004).unwrap().as_floorlet();
    let valuator = BackwardCapletValuator::default();

    let floor_price = price(&valuator, &floorlet, &model);
    let vol = valuator.value(0.0, &floorlet, &model).unwrap().expectation();
    assert!(vol > 0.0);

    // The call formula at the returned vol reproduces the floorlet price
    let repriced = 0.5
        * Bachelier::new(model.mean_rate(), vol)
            .unwrap()
            .price_call(0.004, 3.0);
    assert_relative_eq!(repriced, floor_price, max_relative = 1e-6);

    // ... so it differs from the caplet's vol at the same strike
    let cap_vol = valuator
        .value(0.0, &floorlet.as_caplet(), &model)
        .unwrap()
        .expectation();
    assert!((cap_vol - vol).abs() > 1e-4);
}

#[test]
fn test_lognormal_volatility_reprices() {
    let model = StubProvider::uniform(0.005, 0.03, 201);
    let caplet = CapletSpec::caplet(2.0, 0.5, 0.015)
        .unwrap()
        .with_value_unit(ValueUnit::LognormalVolatility);
    let valuator = ClassicalCapletValuator::default();

    let mc_price = price(&valuator, &caplet, &model);
    let vol = valuator.value(0.0, &caplet, &model).unwrap();
    assert!(vol.is_deterministic());

    let repriced = 0.5
        * Black::new(model.mean_rate(), vol.expectation())
            .unwrap()
            .price_call(0.015, 2.0);
    assert_relative_eq!(repriced, mc_price, max_relative = 1e-6);
}

#[test]
#[allow(deprecated)]
fn test_legacy_volatility_alias() {
    let model = StubProvider::uniform(0.005, 0.03, 201);
    let caplet = CapletSpec::caplet(2.0, 0.5, 0.015).unwrap();
    let valuator = BackwardCapletValuator::default();

    let legacy = valuator
        .value(0.0, &caplet.with_value_unit(ValueUnit::VOLATILITY), &model)
        .unwrap();
    let current = valuator
        .value(0.0, &caplet.with_value_unit(ValueUnit::LognormalVolatility), &model)
        .unwrap();
    assert_eq!(legacy, current);
}

#[test]
#[allow(deprecated)]
fn test_variance_units_rejected() {
    let model = StubProvider::uniform(0.005, 0.03, 11);
    let caplet = CapletSpec::caplet(2.0, 0.5, 0.015).unwrap();

    for unit in [
        ValueUnit::IntegratedLognormalVariance,
        ValueUnit::IntegratedNormalVariance,
        ValueUnit::INTEGRATED_VARIANCE,
    ] {
        let err = ClassicalCapletValuator::default()
            .value(0.0, &caplet.with_value_unit(unit), &model)
            .unwrap_err();
        assert!(err.is_configuration());
        assert!(matches!(
            err,
            PricingError::Configuration(ConfigurationError::UnsupportedValueUnit(_))
        ));
    }
}

// ============================================================================
// Lookups
// ============================================================================

#[test]
fn test_value_unit_returns_rebased_payoffs() {
    let model = StubProvider::uniform(0.01, 0.03, 2).with_numeraire(vec![1.25, 2.0]);
    let caplet = CapletSpec::caplet(1.0, 0.5, 0.02)
        .unwrap()
        .with_value_unit(ValueUnit::Value);
    let value = BackwardCapletValuator::default()
        .value(0.0, &caplet, &model)
        .unwrap();

    assert_eq!(value.value_at(0), 0.0);
    assert_relative_eq!(value.value_at(1), 0.01 * 0.5 / 2.0, max_relative = 1e-14);
}

#[test]
fn test_classical_reads_fixed_rate() {
    // Classical rates collapse onto the backward mean, which is the strike
    let model = StubProvider::uniform(0.01, 0.03, 2).with_classical_scale(0.0);
    let caplet = CapletSpec::caplet(1.0, 0.5, 0.02).unwrap();

    let backward = price(&BackwardCapletValuator::default(), &caplet, &model);
    let classical = price(&ClassicalCapletValuator::default(), &caplet, &model);

    assert_relative_eq!(backward, 0.5 * 0.01 * 0.5, max_relative = 1e-12);
    assert_abs_diff_eq!(classical, 0.0, epsilon = 1e-15);
}

#[test]
fn test_lookup_errors_propagate_unchanged() {
    let model = StubProvider::uniform(-0.01, 0.01, 11).with_horizon(10.0);
    let caplet = CapletSpec::caplet(9.75, 0.5, 0.0).unwrap();
    let err = ClassicalCapletValuator::default()
        .value(0.0, &caplet, &model)
        .unwrap_err();
    assert_eq!(
        err,
        PricingError::Calculation(CalculationError::TimeOutOfRange {
            time: 10.25,
            horizon: 10.0
        })
    );
}

#[test]
fn test_evaluation_after_maturity_fails() {
    let model = StubProvider::uniform(-0.01, 0.02, 101);
    let caplet = CapletSpec::caplet(1.0, 0.5, 0.0).unwrap();
    let err = BackwardCapletValuator::default()
        .value(1.5, &caplet, &model)
        .unwrap_err();
    assert!(matches!(
        err,
        PricingError::Calculation(CalculationError::ImpliedVolatility { .. })
    ));
}
