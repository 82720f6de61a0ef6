//! Hull-White calibration to swaption normal volatilities.
//!
//! Mean reversion `a` and volatility `σ` are fitted by Levenberg-Marquardt
//! on the residuals `weight · (σ_N^model - σ_N^target)`, where the model
//! volatility is the frozen-weight approximation of
//! [`HullWhiteParams::swaption_normal_vol`]. Residuals are evaluated in
//! parallel on a thread pool sized by the configuration.

use arrears_core::market_data::YieldCurve;
use arrears_core::math::solvers::{LMConfig, LevenbergMarquardtSolver};
use arrears_core::types::ConfigurationError;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::error::{CalibrationError, CalibrationFailure};
use super::item::CalibrationItem;
use super::report::CalibrationReport;
use crate::models::HullWhiteParams;

/// Hull-White calibration settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct HullWhiteCalibrationConfig {
    /// Target root-mean-square residual.
    pub accuracy: f64,
    /// Maximum optimiser iterations.
    pub max_iterations: usize,
    /// Worker threads for residual evaluation.
    pub num_threads: usize,
    /// Relative finite-difference step for the Jacobian.
    pub parameter_step: f64,
    /// Starting point.
    pub initial_guess: HullWhiteParams,
    /// Admissible range for the mean reversion.
    pub mean_reversion_bounds: (f64, f64),
    /// Admissible range for the volatility.
    pub volatility_bounds: (f64, f64),
}

impl Default for HullWhiteCalibrationConfig {
    fn default() -> Self {
        Self {
            accuracy: 1e-12,
            max_iterations: 400,
            num_threads: 6,
            parameter_step: 1e-6,
            initial_guess: HullWhiteParams::from_parts(0.05, 0.005),
            mean_reversion_bounds: (0.0, 1.0),
            volatility_bounds: (1e-6, 0.05),
        }
    }
}

impl HullWhiteCalibrationConfig {
    /// Check that the settings describe a runnable calibration.
    ///
    /// # Errors
    ///
    /// `ConfigurationError::InvalidParameter` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.accuracy > 0.0) {
            return Err(ConfigurationError::invalid_parameter(
                "accuracy",
                self.accuracy,
                "must be positive",
            ));
        }
        if self.max_iterations == 0 {
            return Err(ConfigurationError::invalid_parameter(
                "max_iterations",
                0.0,
                "must be positive",
            ));
        }
        if self.num_threads == 0 {
            return Err(ConfigurationError::invalid_parameter(
                "num_threads",
                0.0,
                "must be positive",
            ));
        }
        if !(self.parameter_step > 0.0) {
            return Err(ConfigurationError::invalid_parameter(
                "parameter_step",
                self.parameter_step,
                "must be positive",
            ));
        }
        for (name, (lo, hi)) in [
            ("mean_reversion_bounds", self.mean_reversion_bounds),
            ("volatility_bounds", self.volatility_bounds),
        ] {
            if !(lo >= 0.0 && lo <= hi) {
                return Err(ConfigurationError::invalid_parameter(
                    name,
                    lo,
                    format!("lower bound must be non-negative and at most {hi}"),
                ));
            }
        }
        Ok(())
    }
}

/// Outcome of a successful calibration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HullWhiteCalibration {
    /// Calibrated parameters
    pub params: HullWhiteParams,
    /// Repricing of the calibration items
    pub report: CalibrationReport,
    /// Optimiser iterations
    pub iterations: usize,
    /// Final root-mean-square residual
    pub rmse: f64,
}

/// Calibrates Hull-White parameters to swaption normal volatilities.
///
/// # Example
///
/// ```
/// use arrears_core::market_data::FlatCurve;
/// use arrears_models::calibration::{CalibrationItem, HullWhiteCalibrator};
/// use arrears_models::instruments::SwaptionSpec;
/// use arrears_models::models::HullWhiteParams;
///
/// let curve = FlatCurve::new(0.002);
/// let truth = HullWhiteParams::new(0.03, 0.006).unwrap();
/// let items: Vec<_> = [(1.0, 5.0), (5.0, 5.0), (10.0, 10.0)]
///     .iter()
///     .map(|&(e, t)| {
///         let swaption = SwaptionSpec::new(e, t, 0.5).unwrap();
///         let vol = truth.swaption_normal_vol(&curve, &swaption).unwrap();
///         CalibrationItem::new(format!("{e}\t{t}"), swaption, vol)
///     })
///     .collect();
///
/// let result = HullWhiteCalibrator::default().calibrate(&items, &curve).unwrap();
/// assert!((result.params.volatility() - 0.006).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HullWhiteCalibrator {
    config: HullWhiteCalibrationConfig,
}

impl HullWhiteCalibrator {
    /// Create a calibrator.
    pub fn new(config: HullWhiteCalibrationConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &HullWhiteCalibrationConfig {
        &self.config
    }

    /// Model volatility of every item under `params`, `None` where it
    /// cannot be evaluated.
    pub fn model_volatilities(
        params: &HullWhiteParams,
        items: &[CalibrationItem],
        curve: &dyn YieldCurve<f64>,
    ) -> Vec<Option<f64>> {
        items
            .par_iter()
            .map(|item| params.swaption_normal_vol(curve, item.swaption()).ok())
            .collect()
    }

    /// Fit (a, σ) to the items.
    ///
    /// # Errors
    ///
    /// - `CalibrationError::Configuration` for invalid settings or no items
    /// - `CalibrationError::ThreadPool` if the worker pool cannot be built
    /// - `CalibrationError::Solver` if the initial residuals are not finite
    /// - `CalibrationError::Failure` if `accuracy` is not reached within
    ///   `max_iterations`
    pub fn calibrate(
        &self,
        items: &[CalibrationItem],
        curve: &dyn YieldCurve<f64>,
    ) -> Result<HullWhiteCalibration, CalibrationError> {
        self.config.validate()?;
        if items.is_empty() {
            return Err(ConfigurationError::invalid_parameter(
                "items",
                0.0,
                "at least one calibration item is required",
            )
            .into());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.num_threads)
            .build()
            .map_err(|e| CalibrationError::ThreadPool(e.to_string()))?;

        info!(
            items = items.len(),
            threads = self.config.num_threads,
            "Calibrating Hull-White parameters"
        );

        let residuals = |p: &[f64]| -> Vec<f64> {
            let params = match HullWhiteParams::new(p[0], p[1]) {
                Ok(params) => params,
                Err(_) => return vec![f64::NAN; items.len()],
            };
            items
                .par_iter()
                .map(|item| match params.swaption_normal_vol(curve, item.swaption()) {
                    Ok(vol) => item.weight() * (vol - item.target_volatility()),
                    Err(_) => f64::NAN,
                })
                .collect()
        };

        let lm_config = LMConfig::new(self.config.accuracy, self.config.max_iterations)
            .with_parameter_step(self.config.parameter_step);
        let solver = LevenbergMarquardtSolver::new(lm_config).with_bounds(vec![
            self.config.mean_reversion_bounds,
            self.config.volatility_bounds,
        ]);
        let initial = vec![
            self.config.initial_guess.mean_reversion(),
            self.config.initial_guess.volatility(),
        ];

        let result = pool.install(|| solver.solve(residuals, initial))?;

        if !result.converged {
            let failure = CalibrationFailure {
                last_accuracy: result.rmse(),
                iterations: result.iterations,
            };
            warn!(%failure, "Hull-White calibration failed");
            return Err(failure.into());
        }

        let params = HullWhiteParams::new(result.params[0], result.params[1])?;
        let model = pool.install(|| Self::model_volatilities(&params, items, curve));
        let report = CalibrationReport::from_values(
            items
                .iter()
                .zip(model)
                .map(|(item, value)| (item.label().to_string(), value, item.target_volatility()))
                .collect(),
        );

        debug!(
            mean_reversion = params.mean_reversion(),
            volatility = params.volatility(),
            iterations = result.iterations,
            rmse = result.rmse(),
            "Hull-White calibration finished"
        );

        Ok(HullWhiteCalibration {
            params,
            report,
            iterations: result.iterations,
            rmse: result.rmse(),
        })
    }
}
