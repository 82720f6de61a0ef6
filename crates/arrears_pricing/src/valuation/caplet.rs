//! Caplet and floorlet valuation on a simulated term structure.
//!
//! Both valuators pay `max(±(R - K), 0) · dcf` at the end of the accrual
//! period and rebase the deflated payoff to the evaluation time:
//!
//! ```text
//! V(t₀) = payoff / N(Tₚ) · w(Tₚ) · N(t₀) / w(t₀)
//! ```
//!
//! They differ only in the rate `R`: the backward-looking compounded rate
//! observed at the payment date, or the classical forward-looking rate
//! fixed at the period start.
//!
//! Volatility units invert the Monte Carlo price through the call formula
//! for floorlets too. A floorlet's reported volatility is therefore the one
//! of a caplet with the floorlet's price, not the floorlet's own implied
//! volatility.

use std::fmt;
use std::sync::Arc;

use arrears_core::ensemble::PathEnsemble;
use arrears_core::types::{ConfigurationError, PricingError};
use arrears_models::analytical::{AnalyticInverter, ImpliedVolatilityInverter};
use arrears_models::instruments::{CapletSpec, ValueUnit};
use tracing::debug;

use crate::mc::SimulationProvider;

/// Which rate a caplet is written on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RateConvention {
    /// Compounded rate known at the end of the accrual period
    Backward,
    /// Simple rate fixed at the start of the accrual period
    Classical,
}

impl RateConvention {
    /// Short name used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            RateConvention::Backward => "backward",
            RateConvention::Classical => "classical",
        }
    }
}

impl fmt::Display for RateConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Values a caplet against a simulation.
pub trait CapletValuator: Send + Sync {
    /// Rate the valuator writes the caplet on.
    fn convention(&self) -> RateConvention;

    /// Value of `caplet` at `evaluation_time` in the caplet's value unit.
    ///
    /// For [`ValueUnit::Value`] the result holds one rebased payoff per
    /// path. For the volatility units it is a deterministic ensemble
    /// holding the implied volatility.
    ///
    /// # Errors
    ///
    /// - `PricingError::Configuration` for an unsupported value unit
    /// - `PricingError::Calculation` for failed simulation lookups or
    ///   implied volatility inversion, unchanged
    fn value(
        &self,
        evaluation_time: f64,
        caplet: &CapletSpec,
        model: &dyn SimulationProvider,
    ) -> Result<PathEnsemble, PricingError>;
}

/// Caplet on the backward-looking compounded rate `B(S, E)` observed at `E`.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use arrears_core::market_data::FlatCurve;
/// use arrears_models::instruments::{CapletSpec, ValueUnit};
/// use arrears_models::models::HullWhiteParams;
/// use arrears_pricing::mc::{HullWhiteSimulation, SimulationConfig};
/// use arrears_pricing::valuation::{BackwardCapletValuator, CapletValuator};
///
/// let config = SimulationConfig::builder()
///     .n_paths(1000)
///     .horizon(3.0)
///     .build()
///     .unwrap();
/// let params = HullWhiteParams::new(0.05, 0.006).unwrap();
/// let model = HullWhiteSimulation::new(params, Arc::new(FlatCurve::new(0.005)), config).unwrap();
///
/// let caplet = CapletSpec::caplet(2.0, 0.5, 0.005).unwrap();
/// let vol = BackwardCapletValuator::default()
///     .value(0.0, &caplet, &model)
///     .unwrap()
///     .expectation();
/// assert!(vol > 0.0);
///
/// let values = BackwardCapletValuator::default()
///     .value(0.0, &caplet.with_value_unit(ValueUnit::Value), &model)
///     .unwrap();
/// assert_eq!(values.n_paths(), Some(1000));
/// ```
#[derive(Clone)]
pub struct BackwardCapletValuator {
    inverter: Arc<dyn ImpliedVolatilityInverter>,
}

/// Caplet on the classical rate `L(S; S, E)` fixed at the period start.
#[derive(Clone)]
pub struct ClassicalCapletValuator {
    inverter: Arc<dyn ImpliedVolatilityInverter>,
}

macro_rules! impl_valuator {
    ($valuator:ident, $convention:expr) => {
        impl $valuator {
            /// Create a valuator converting prices with `inverter`.
            pub fn new(inverter: Arc<dyn ImpliedVolatilityInverter>) -> Self {
                Self { inverter }
            }
        }

        impl Default for $valuator {
            fn default() -> Self {
                Self::new(Arc::new(AnalyticInverter::default()))
            }
        }

        impl fmt::Debug for $valuator {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($valuator)).finish_non_exhaustive()
            }
        }

        impl CapletValuator for $valuator {
            fn convention(&self) -> RateConvention {
                $convention
            }

            fn value(
                &self,
                evaluation_time: f64,
                caplet: &CapletSpec,
                model: &dyn SimulationProvider,
            ) -> Result<PathEnsemble, PricingError> {
                value_caplet(
                    $convention,
                    self.inverter.as_ref(),
                    evaluation_time,
                    caplet,
                    model,
                )
            }
        }
    };
}

impl_valuator!(BackwardCapletValuator, RateConvention::Backward);
impl_valuator!(ClassicalCapletValuator, RateConvention::Classical);

fn value_caplet(
    convention: RateConvention,
    inverter: &dyn ImpliedVolatilityInverter,
    evaluation_time: f64,
    caplet: &CapletSpec,
    model: &dyn SimulationProvider,
) -> Result<PathEnsemble, PricingError> {
    let maturity = caplet.maturity();
    let payment_date = caplet.payment_date();

    let rate = match convention {
        RateConvention::Backward => model.backward_rate(payment_date, maturity, payment_date)?,
        RateConvention::Classical => model.libor_rate(maturity, maturity, payment_date)?,
    };

    let numeraire = model.numeraire(payment_date)?;
    let weights = model.monte_carlo_weights(payment_date)?;
    let numeraire_at_evaluation = model.numeraire(evaluation_time)?;
    let weights_at_evaluation = model.monte_carlo_weights(evaluation_time)?;

    // w(Tₚ)/N(Tₚ) · N(t₀)/w(t₀)
    let deflator = weights
        .div(&numeraire)?
        .mul(&numeraire_at_evaluation)?
        .div(&weights_at_evaluation)?;

    let payoff = rate.map(|r| caplet.payoff(r));
    let value = payoff.mul(&deflator)?;

    let unit = caplet.value_unit();
    if unit == ValueUnit::Value {
        return Ok(value);
    }

    // Rebased like the payoff; no P(t₀, Tₚ) factor is applied to the forward.
    let forward = rate.mul(&deflator)?.expectation();
    let option_maturity = maturity - evaluation_time;
    let price = value.expectation();
    let strike = caplet.strike();
    let annuity = caplet.daycount_fraction();

    let volatility = match unit {
        ValueUnit::LognormalVolatility => inverter.black_lognormal_implied_vol(
            forward,
            option_maturity,
            strike,
            annuity,
            price,
        )?,
        ValueUnit::NormalVolatility => inverter.bachelier_normal_implied_vol(
            forward,
            option_maturity,
            strike,
            annuity,
            price,
        )?,
        ValueUnit::Value
        | ValueUnit::IntegratedLognormalVariance
        | ValueUnit::IntegratedNormalVariance => {
            return Err(ConfigurationError::UnsupportedValueUnit(unit.name().to_string()).into());
        }
    };

    debug!(
        %convention,
        maturity,
        %unit,
        forward,
        price,
        volatility,
        "Caplet valued"
    );

    Ok(model.constant_as_ensemble(volatility))
}
