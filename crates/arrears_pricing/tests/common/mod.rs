//! Deterministic simulation stand-in shared by the integration tests.

#![allow(dead_code)]

use arrears_core::ensemble::PathEnsemble;
use arrears_core::market_data::{FlatCurve, YieldCurve};
use arrears_core::types::CalculationError;
use arrears_pricing::mc::SimulationProvider;

/// Fixed per-path rates and payment-date numeraires, whatever the query time.
///
/// `classical` rates are the backward rates rescaled around their mean by
/// `classical_scale`.
/// Queries past `horizon` fail with `TimeOutOfRange`.
pub struct StubProvider {
    pub backward: Vec<f64>,
    pub classical_scale: f64,
    pub numeraire: Vec<f64>,
    pub horizon: f64,
    curve: FlatCurve<f64>,
}

impl StubProvider {
    /// Equally spaced rates on `[low, high]` with a unit numeraire.
    pub fn uniform(low: f64, high: f64, n_paths: usize) -> Self {
        let step = (high - low) / (n_paths - 1) as f64;
        let backward = (0..n_paths).map(|i| low + step * i as f64).collect();
        Self {
            backward,
            classical_scale: 1.0,
            numeraire: vec![1.0; n_paths],
            horizon: 21.0,
            curve: FlatCurve::new(0.0),
        }
    }

    pub fn with_numeraire(mut self, numeraire: Vec<f64>) -> Self {
        self.numeraire = numeraire;
        self
    }

    pub fn with_horizon(mut self, horizon: f64) -> Self {
        self.horizon = horizon;
        self
    }

    /// Classical rates spread around the backward mean by `scale`.
    pub fn with_classical_scale(mut self, scale: f64) -> Self {
        self.classical_scale = scale;
        self
    }

    pub fn mean_rate(&self) -> f64 {
        self.backward.iter().sum::<f64>() / self.backward.len() as f64
    }

    fn check(&self, time: f64) -> Result<(), CalculationError> {
        if time > self.horizon {
            return Err(CalculationError::TimeOutOfRange {
                time,
                horizon: self.horizon,
            });
        }
        Ok(())
    }
}

impl SimulationProvider for StubProvider {
    fn time_horizon(&self) -> f64 {
        self.horizon
    }

    fn number_of_paths(&self) -> usize {
        self.backward.len()
    }

    fn numeraire(&self, time: f64) -> Result<PathEnsemble, CalculationError> {
        self.check(time)?;
        if time == 0.0 {
            Ok(PathEnsemble::constant(1.0))
        } else {
            Ok(PathEnsemble::from_paths(self.numeraire.clone()))
        }
    }

    fn monte_carlo_weights(&self, time: f64) -> Result<PathEnsemble, CalculationError> {
        self.check(time)?;
        Ok(PathEnsemble::constant(1.0 / self.backward.len() as f64))
    }

    fn backward_rate(
        &self,
        observation_time: f64,
        _period_start: f64,
        period_end: f64,
    ) -> Result<PathEnsemble, CalculationError> {
        self.check(period_end)?;
        if observation_time < period_end {
            return Err(CalculationError::NotYetObservable {
                observation_time,
                period_end,
            });
        }
        Ok(PathEnsemble::from_paths(self.backward.clone()))
    }

    fn libor_rate(
        &self,
        _fixing_time: f64,
        _period_start: f64,
        period_end: f64,
    ) -> Result<PathEnsemble, CalculationError> {
        self.check(period_end)?;
        let mean = self.mean_rate();
        let scale = self.classical_scale;
        Ok(PathEnsemble::from_paths(
            self.backward.iter().map(|r| mean + scale * (r - mean)).collect(),
        ))
    }

    fn discount_curve(&self) -> &dyn YieldCurve<f64> {
        &self.curve
    }
}
