//! Monte Carlo simulation of the one-factor Hull-White model.
//!
//! The short rate is `r(t) = x(t) + α(t)` where `x` is an Ornstein-Uhlenbeck
//! process started at zero and `α` is fitted to the initial curve. The pair
//! `(x, ∫x)` is Gaussian, so each grid step is sampled from its exact joint
//! transition:
//!
//! ```text
//! x(t+Δ)        = x(t) e^{-aΔ}  + s_x Z₁
//! ∫_t^{t+Δ} x   = x(t) B(Δ)     + ρ s_I Z₁ + sqrt(1-ρ²) s_I Z₂
//! ```
//!
//! with `s_x² = Var x(Δ)`, `s_I² = Var ∫₀^Δ x`, `Cov = ½σ²B(Δ)²` and
//! `ρ = Cov / (s_x s_I)`. The numeraire is the bank account
//! `N(t) = exp(∫₀ᵗ x + ½ Var ∫₀ᵗ x) / P(0,t)`, which reprices the initial
//! curve in expectation.
//!
//! # Memory Layout
//!
//! Paths are stored in row-major order: `values[path_idx * (n_steps + 1) + step_idx]`
//! where `step_idx = 0` holds the initial zero state.

use std::fmt;
use std::sync::Arc;

use arrears_core::ensemble::PathEnsemble;
use arrears_core::market_data::YieldCurve;
use arrears_core::types::{CalculationError, ConfigurationError};
use arrears_models::models::HullWhiteParams;
use rayon::prelude::*;
use tracing::debug;

use super::config::{SimulationConfig, GRID_TOLERANCE};
use super::provider::SimulationProvider;
use crate::rng::PricerRng;

/// Paths generated from one random stream.
///
/// Fixed so that the simulated values do not depend on the thread count.
const PATHS_PER_CHUNK: usize = 256;

/// Per-step coefficients of the exact joint transition.
#[derive(Clone, Copy, Debug)]
struct ExactStep {
    decay: f64,
    bond_factor: f64,
    state_std: f64,
    integral_loading: f64,
    integral_residual: f64,
}

impl ExactStep {
    fn new(params: &HullWhiteParams, dt: f64) -> Self {
        let sigma = params.volatility();
        let bond_factor = params.bond_factor(dt);
        let state_std = params.state_variance(dt).sqrt();
        let integral_std = params.integrated_state_variance(dt).sqrt();
        let covariance = 0.5 * sigma * sigma * bond_factor * bond_factor;

        let rho = if state_std > 0.0 && integral_std > 0.0 {
            (covariance / (state_std * integral_std)).clamp(-1.0, 1.0)
        } else {
            0.0
        };

        Self {
            decay: params.state_decay(dt),
            bond_factor,
            state_std,
            integral_loading: rho * integral_std,
            integral_residual: (1.0 - rho * rho).max(0.0).sqrt() * integral_std,
        }
    }

    /// Fill one path from `2 · n_steps` standard normals.
    #[inline]
    fn evolve(&self, normals: &[f64], states: &mut [f64], integrals: &mut [f64]) {
        states[0] = 0.0;
        integrals[0] = 0.0;
        for (k, z) in normals.chunks_exact(2).enumerate() {
            let x = states[k];
            states[k + 1] = x * self.decay + self.state_std * z[0];
            integrals[k + 1] = integrals[k]
                + x * self.bond_factor
                + self.integral_loading * z[0]
                + self.integral_residual * z[1];
        }
    }
}

/// Simulated Hull-White term structure.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use arrears_core::market_data::FlatCurve;
/// use arrears_models::models::HullWhiteParams;
/// use arrears_pricing::mc::{HullWhiteSimulation, SimulationConfig, SimulationProvider};
///
/// let config = SimulationConfig::builder()
///     .n_paths(500)
///     .time_step(0.25)
///     .horizon(5.0)
///     .seed(7)
///     .build()
///     .unwrap();
/// let params = HullWhiteParams::new(0.05, 0.006).unwrap();
/// let simulation =
///     HullWhiteSimulation::new(params, Arc::new(FlatCurve::new(0.01)), config).unwrap();
///
/// let numeraire = simulation.numeraire(0.0).unwrap();
/// assert!((numeraire.expectation() - 1.0).abs() < 1e-15);
/// assert!(simulation.numeraire(5.5).is_err());
/// ```
pub struct HullWhiteSimulation {
    params: HullWhiteParams,
    curve: Arc<dyn YieldCurve<f64>>,
    config: SimulationConfig,
    states: Vec<f64>,
    integrals: Vec<f64>,
}

impl HullWhiteSimulation {
    /// Simulates all paths.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if `config` does not validate.
    pub fn new(
        params: HullWhiteParams,
        curve: Arc<dyn YieldCurve<f64>>,
        config: SimulationConfig,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;

        let n_steps = config.n_steps();
        let stride = n_steps + 1;
        let step = ExactStep::new(&params, config.time_step());
        let mut states = vec![0.0; config.n_paths() * stride];
        let mut integrals = vec![0.0; config.n_paths() * stride];

        states
            .par_chunks_mut(PATHS_PER_CHUNK * stride)
            .zip(integrals.par_chunks_mut(PATHS_PER_CHUNK * stride))
            .enumerate()
            .for_each(|(chunk, (state_block, integral_block))| {
                let mut rng = PricerRng::for_stream(config.seed(), chunk as u64);
                let mut normals = vec![0.0; 2 * n_steps];
                let paths = state_block
                    .chunks_mut(stride)
                    .zip(integral_block.chunks_mut(stride));
                for (path, (states, integrals)) in paths.enumerate() {
                    if config.antithetic() && path % 2 == 1 {
                        normals.iter_mut().for_each(|z| *z = -*z);
                    } else {
                        rng.fill_normal(&mut normals);
                    }
                    step.evolve(&normals, states, integrals);
                }
            });

        debug!(
            n_paths = config.n_paths(),
            n_steps,
            mean_reversion = params.mean_reversion(),
            volatility = params.volatility(),
            "Simulated Hull-White paths"
        );

        Ok(Self {
            params,
            curve,
            config,
            states,
            integrals,
        })
    }

    /// Model parameters.
    pub fn params(&self) -> &HullWhiteParams {
        &self.params
    }

    /// Simulation configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Index of `time` on the simulation grid.
    fn time_index(&self, time: f64) -> Result<usize, CalculationError> {
        let horizon = self.config.horizon();
        if !(time >= -GRID_TOLERANCE && time <= horizon + GRID_TOLERANCE) {
            return Err(CalculationError::TimeOutOfRange { time, horizon });
        }
        let dt = self.config.time_step();
        let index = (time / dt).round() as usize;
        let nearest = index as f64 * dt;
        if (nearest - time).abs() > GRID_TOLERANCE {
            return Err(CalculationError::TimeNotOnGrid { time, nearest });
        }
        Ok(index)
    }

    fn column(&self, values: &[f64], index: usize) -> Vec<f64> {
        let stride = self.config.n_steps() + 1;
        values.iter().skip(index).step_by(stride).copied().collect()
    }

    /// State `x(t)` on every path.
    ///
    /// # Errors
    ///
    /// Grid lookup errors as for [`SimulationProvider::numeraire`].
    pub fn state(&self, time: f64) -> Result<PathEnsemble, CalculationError> {
        let index = self.time_index(time)?;
        Ok(PathEnsemble::from_paths(self.column(&self.states, index)))
    }

    /// `∫₀ᵗ x(s) ds` on every path.
    ///
    /// # Errors
    ///
    /// Grid lookup errors as for [`SimulationProvider::numeraire`].
    pub fn integrated_state(&self, time: f64) -> Result<PathEnsemble, CalculationError> {
        let index = self.time_index(time)?;
        Ok(PathEnsemble::from_paths(self.column(&self.integrals, index)))
    }

    /// Zero-coupon bond `P(t, T)` on every path.
    ///
    /// # Errors
    ///
    /// Grid lookup errors for `time`, and `CalculationError::Numerical` if
    /// the maturity precedes `time` or the curve cannot be evaluated.
    pub fn bond_price(&self, time: f64, maturity: f64) -> Result<PathEnsemble, CalculationError> {
        if maturity < time - GRID_TOLERANCE {
            return Err(CalculationError::Numerical(format!(
                "bond maturity {maturity} precedes observation time {time}"
            )));
        }
        let index = self.time_index(time)?;
        let at_zero_state = self
            .params
            .bond_price(self.curve.as_ref(), time, maturity, 0.0)?;
        let b = self.params.bond_factor(maturity - time);
        let stride = self.config.n_steps() + 1;
        let prices = self
            .states
            .iter()
            .skip(index)
            .step_by(stride)
            .map(|x| at_zero_state * (-b * x).exp())
            .collect();
        Ok(PathEnsemble::from_paths(prices))
    }
}

impl fmt::Debug for HullWhiteSimulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HullWhiteSimulation")
            .field("params", &self.params)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn check_period(period_start: f64, period_end: f64) -> Result<f64, CalculationError> {
    let length = period_end - period_start;
    if !(length > 0.0) {
        return Err(CalculationError::Numerical(format!(
            "empty accrual period [{period_start}, {period_end}]"
        )));
    }
    Ok(length)
}

impl SimulationProvider for HullWhiteSimulation {
    fn time_horizon(&self) -> f64 {
        self.config.horizon()
    }

    fn number_of_paths(&self) -> usize {
        self.config.n_paths()
    }

    fn numeraire(&self, time: f64) -> Result<PathEnsemble, CalculationError> {
        let index = self.time_index(time)?;
        let time = index as f64 * self.config.time_step();
        let curve = self.curve.as_ref();
        let values = self
            .column(&self.integrals, index)
            .into_iter()
            .map(|integral| self.params.numeraire(curve, time, integral))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PathEnsemble::from_paths(values))
    }

    fn monte_carlo_weights(&self, time: f64) -> Result<PathEnsemble, CalculationError> {
        self.time_index(time)?;
        Ok(PathEnsemble::constant(1.0 / self.config.n_paths() as f64))
    }

    fn backward_rate(
        &self,
        observation_time: f64,
        period_start: f64,
        period_end: f64,
    ) -> Result<PathEnsemble, CalculationError> {
        let length = check_period(period_start, period_end)?;
        if observation_time < period_end - GRID_TOLERANCE {
            return Err(CalculationError::NotYetObservable {
                observation_time,
                period_end,
            });
        }
        let growth = self
            .numeraire(period_end)?
            .div(&self.numeraire(period_start)?)?;
        Ok(growth.sub_scalar(1.0).div_scalar(length))
    }

    /// Fixing times after `period_start` read the state at `period_start`.
    fn libor_rate(
        &self,
        fixing_time: f64,
        period_start: f64,
        period_end: f64,
    ) -> Result<PathEnsemble, CalculationError> {
        let length = check_period(period_start, period_end)?;
        let fixing_time = fixing_time.min(period_start);
        let start = self.bond_price(fixing_time, period_start)?;
        let end = self.bond_price(fixing_time, period_end)?;
        Ok(start.div(&end)?.sub_scalar(1.0).div_scalar(length))
    }

    fn discount_curve(&self) -> &dyn YieldCurve<f64> {
        self.curve.as_ref()
    }
}
