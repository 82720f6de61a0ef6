//! Calibration pipelines producing simulation providers.

use std::fmt;
use std::sync::Arc;

use arrears_core::market_data::YieldCurve;
use arrears_core::types::ConfigurationError;
use arrears_models::calibration::{
    round_to_quarter, CalibrationError, CalibrationItem, CalibrationReport,
    HullWhiteCalibrationConfig, HullWhiteCalibrator,
};
use arrears_pricing::mc::{HullWhiteSimulation, SimulationConfig, SimulationProvider};
use chrono::NaiveDate;
use tracing::{debug, info, info_span};

use super::grid::SwaptionVolGrid;
use crate::bootstrapping::{act_365, roll_following, Tenor};

/// Accrual period of the underlying swaps.
pub const DEFAULT_SWAP_PERIOD_LENGTH: f64 = 0.5;

/// A calibrated model ready for valuation.
pub struct CalibratedModel {
    /// Simulation under the calibrated parameters
    pub provider: Box<dyn SimulationProvider>,
    /// Repricing of the calibration instruments
    pub report: CalibrationReport,
    /// Named model parameters
    pub parameters: Vec<(&'static str, f64)>,
    /// Optimiser iterations
    pub iterations: usize,
}

impl fmt::Debug for CalibratedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalibratedModel")
            .field("n_paths", &self.provider.number_of_paths())
            .field("horizon", &self.provider.time_horizon())
            .field("parameters", &self.parameters)
            .field("iterations", &self.iterations)
            .finish_non_exhaustive()
    }
}

/// Fits a term-structure model to swaption volatilities and builds its
/// simulation.
///
/// A pipeline either returns a fully calibrated model or fails; it never
/// retries.
pub trait CalibrationPipeline: Send + Sync {
    /// Calibrate to `grid` on the discount `curve`.
    ///
    /// # Errors
    ///
    /// - `CalibrationError::Failure` if the optimiser misses its accuracy
    /// - `CalibrationError::Configuration` for malformed quotes or settings
    fn calibrate(
        &self,
        grid: &SwaptionVolGrid,
        curve: Arc<dyn YieldCurve<f64>>,
    ) -> Result<CalibratedModel, CalibrationError>;
}

/// Hull-White calibration followed by Monte Carlo simulation.
///
/// Grid quotes become calibration items by rolling expiry and tenor off the
/// reference date (weekends to the following Monday), measuring both
/// ACT/365 and rounding to quarters. Expiries that round below a quarter
/// are skipped.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use arrears_core::market_data::FlatCurve;
/// use arrears_models::calibration::HullWhiteCalibrationConfig;
/// use arrears_optimiser::bootstrapping::{Tenor, TenorUnit};
/// use arrears_optimiser::calibration::{
///     CalibrationPipeline, HullWhiteCalibrationPipeline, SwaptionVolGrid,
/// };
/// use arrears_optimiser::market_data;
/// use arrears_pricing::mc::SimulationConfig;
///
/// let year = |n| Tenor::new(n, TenorUnit::Year);
/// let grid = SwaptionVolGrid::from_matrix(
///     &[year(1), year(5)],
///     &[year(5), year(10)],
///     &[vec![0.0034, 0.0046], vec![0.0050, 0.0056]],
/// )
/// .unwrap();
///
/// let simulation = SimulationConfig::builder().n_paths(200).horizon(2.0).build().unwrap();
/// let pipeline = HullWhiteCalibrationPipeline::new(
///     HullWhiteCalibrationConfig::default(),
///     simulation,
///     market_data::reference_date(),
/// );
/// let model = pipeline.calibrate(&grid, Arc::new(FlatCurve::new(-0.004))).unwrap();
/// assert_eq!(model.report.entries.len(), 4);
/// assert_eq!(model.provider.number_of_paths(), 200);
/// ```
#[derive(Debug, Clone)]
pub struct HullWhiteCalibrationPipeline {
    calibrator: HullWhiteCalibrator,
    simulation: SimulationConfig,
    reference_date: NaiveDate,
    period_length: f64,
}

impl HullWhiteCalibrationPipeline {
    /// Create a pipeline with semi-annual underlying swaps.
    pub fn new(
        calibration: HullWhiteCalibrationConfig,
        simulation: SimulationConfig,
        reference_date: NaiveDate,
    ) -> Self {
        Self {
            calibrator: HullWhiteCalibrator::new(calibration),
            simulation,
            reference_date,
            period_length: DEFAULT_SWAP_PERIOD_LENGTH,
        }
    }

    /// Same pipeline with a different swap accrual period.
    pub fn with_period_length(mut self, period_length: f64) -> Self {
        self.period_length = period_length;
        self
    }

    /// Calibration settings.
    pub fn calibration_config(&self) -> &HullWhiteCalibrationConfig {
        self.calibrator.config()
    }

    /// Simulation settings.
    pub fn simulation_config(&self) -> &SimulationConfig {
        &self.simulation
    }

    /// Date the grid tenors are rolled from.
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    fn roll(&self, date: NaiveDate, tenor: Tenor, name: &str) -> Result<NaiveDate, ConfigurationError> {
        tenor.add_to(date).map(roll_following).ok_or_else(|| {
            ConfigurationError::invalid_parameter(
                name,
                tenor.year_fraction(),
                "date arithmetic out of range",
            )
        })
    }

    /// Calibration items for the grid quotes, labelled `"<expiry>\t<tenor>"`.
    ///
    /// # Errors
    ///
    /// `ConfigurationError` if a quote does not describe a valid swaption.
    pub fn calibration_items(
        &self,
        grid: &SwaptionVolGrid,
    ) -> Result<Vec<CalibrationItem>, ConfigurationError> {
        let mut items = Vec::with_capacity(grid.len());
        for (expiry, tenor, vol) in grid.points() {
            let exercise_date = self.roll(self.reference_date, expiry, "expiry")?;
            let end_date = self.roll(exercise_date, tenor, "tenor")?;
            let exercise = act_365(self.reference_date, exercise_date);

            if round_to_quarter(exercise) < 0.25 {
                debug!(%expiry, %tenor, "Skipping swaption expiring within a quarter");
                continue;
            }
            items.push(CalibrationItem::from_quote(
                format!("{expiry}\t{tenor}"),
                exercise,
                act_365(exercise_date, end_date),
                self.period_length,
                vol,
            )?);
        }
        Ok(items)
    }

    /// Simulation under the calibrator's initial guess.
    ///
    /// # Errors
    ///
    /// `ConfigurationError` if the simulation settings are invalid.
    pub fn uncalibrated(
        &self,
        curve: Arc<dyn YieldCurve<f64>>,
    ) -> Result<HullWhiteSimulation, ConfigurationError> {
        HullWhiteSimulation::new(
            self.calibrator.config().initial_guess,
            curve,
            self.simulation.clone(),
        )
    }
}

impl CalibrationPipeline for HullWhiteCalibrationPipeline {
    fn calibrate(
        &self,
        grid: &SwaptionVolGrid,
        curve: Arc<dyn YieldCurve<f64>>,
    ) -> Result<CalibratedModel, CalibrationError> {
        let span = info_span!("calibration", quotes = grid.len());
        let _guard = span.enter();

        let items = self.calibration_items(grid)?;
        let result = self.calibrator.calibrate(&items, curve.as_ref())?;
        let provider = HullWhiteSimulation::new(result.params, curve, self.simulation.clone())?;

        info!(
            items = items.len(),
            mean_reversion = result.params.mean_reversion(),
            volatility = result.params.volatility(),
            mean_deviation = result.report.mean_deviation,
            "Calibrated model simulated"
        );

        Ok(CalibratedModel {
            provider: Box::new(provider),
            report: result.report,
            parameters: vec![
                ("mean_reversion", result.params.mean_reversion()),
                ("volatility", result.params.volatility()),
            ],
            iterations: result.iterations,
        })
    }
}
