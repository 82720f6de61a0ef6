//! Ladder run comparing backward, classical, analytic and market ratios.

use std::sync::Arc;

use arrears_core::types::{CalculationError, ConfigurationError, PricingError};
use arrears_models::analytical::ImpliedVolatilityInverter;
use arrears_models::instruments::CapletSpec;
use tracing::{debug, info, info_span, warn};

use super::diagnostics::{rate_diagnostics, RateDiagnosticRecord};
use super::ladder::LadderConfig;
use super::market::MarketVolTable;
use super::record::{ConsistencyComparison, ConsistencyRecord, ConsistencyReport, ConsistencyRow};
use crate::mc::SimulationProvider;
use crate::valuation::{BackwardCapletValuator, CapletValuator, ClassicalCapletValuator};

/// Values the ladder caplets under both rate conventions and derives the
/// model, analytic and market volatility ratios.
///
/// Every caplet is valued at time 0. A ladder point whose valuation fails,
/// or whose classical volatility is zero so that no ratio exists, is
/// reported as [`ConsistencyRow::Failed`] and the run continues.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use arrears_core::market_data::FlatCurve;
/// use arrears_models::models::HullWhiteParams;
/// use arrears_pricing::consistency::{ConsistencyHarness, LadderConfig, MarketVolTable};
/// use arrears_pricing::mc::{HullWhiteSimulation, SimulationConfig};
///
/// let config = SimulationConfig::builder().n_paths(1000).horizon(3.0).build().unwrap();
/// let model = HullWhiteSimulation::new(
///     HullWhiteParams::new(0.02, 0.006).unwrap(),
///     Arc::new(FlatCurve::new(0.005)),
///     config,
/// )
/// .unwrap();
///
/// let harness = ConsistencyHarness::new(LadderConfig::default(), MarketVolTable::builtin());
/// let report = harness.run(&model).unwrap();
/// assert_eq!(report.rows.len(), 5);
/// assert_eq!(report.failure_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct ConsistencyHarness {
    ladder: LadderConfig,
    market: MarketVolTable,
    backward: BackwardCapletValuator,
    classical: ClassicalCapletValuator,
}

impl ConsistencyHarness {
    /// Create a harness using the analytic volatility inverter.
    pub fn new(ladder: LadderConfig, market: MarketVolTable) -> Self {
        Self {
            ladder,
            market,
            backward: BackwardCapletValuator::default(),
            classical: ClassicalCapletValuator::default(),
        }
    }

    /// Same harness converting prices with `inverter`.
    pub fn with_inverter(mut self, inverter: Arc<dyn ImpliedVolatilityInverter>) -> Self {
        self.backward = BackwardCapletValuator::new(inverter.clone());
        self.classical = ClassicalCapletValuator::new(inverter);
        self
    }

    /// Ladder settings.
    pub fn ladder(&self) -> &LadderConfig {
        &self.ladder
    }

    /// Market quotes.
    pub fn market(&self) -> &MarketVolTable {
        &self.market
    }

    fn caplet_vol(
        &self,
        valuator: &dyn CapletValuator,
        caplet: &CapletSpec,
        model: &dyn SimulationProvider,
    ) -> Result<f64, PricingError> {
        Ok(valuator.value(0.0, caplet, model)?.expectation())
    }

    fn row(
        &self,
        index: usize,
        begin_time: f64,
        model: &dyn SimulationProvider,
    ) -> Result<ConsistencyRow, ConfigurationError> {
        let period = self.ladder.period_length;
        let end_time = begin_time + period;
        let caplet = CapletSpec::new(
            begin_time,
            period,
            self.ladder.strike,
            period,
            false,
            self.ladder.value_unit,
        )?;

        let record = self
            .caplet_vol(&self.backward, &caplet, model)
            .and_then(|backward| {
                self.caplet_vol(&self.classical, &caplet, model)
                    .map(|classical| (backward, classical))
            })
            .and_then(|(backward_vol, classical_vol)| {
                let record = ConsistencyRecord::new(
                    begin_time,
                    end_time,
                    backward_vol,
                    classical_vol,
                    self.ladder.analytic_ratio(begin_time),
                    self.market.quote(index),
                );
                if classical_vol > 0.0 && record.mc_ratio.is_finite() {
                    Ok(record)
                } else {
                    Err(CalculationError::Numerical(format!(
                        "no volatility ratio for backward {backward_vol} over classical {classical_vol}"
                    ))
                    .into())
                }
            });

        let row = match record {
            Ok(record) => {
                debug!(
                    begin_time,
                    backward_vol = record.backward_vol,
                    classical_vol = record.classical_vol,
                    mc_ratio = record.mc_ratio,
                    analytic_ratio = record.analytic_ratio,
                    "Ladder point computed"
                );
                ConsistencyRow::Computed(record)
            }
            Err(error) => {
                warn!(begin_time, %error, "Ladder point failed");
                ConsistencyRow::Failed {
                    begin_time,
                    end_time,
                    error,
                }
            }
        };
        Ok(row)
    }

    /// Run the ladder on one model.
    ///
    /// Row `i` of the ladder is compared with market quote `i`.
    ///
    /// # Errors
    ///
    /// `ConfigurationError` if the ladder does not validate. Valuation
    /// failures are recorded per row instead.
    pub fn run(
        &self,
        model: &dyn SimulationProvider,
    ) -> Result<ConsistencyReport, ConfigurationError> {
        self.ladder.validate()?;

        let horizon = model.time_horizon();
        let span = info_span!(
            "consistency_run",
            n_paths = model.number_of_paths(),
            horizon
        );
        let _guard = span.enter();

        let rows = self
            .ladder
            .begin_times(horizon)
            .into_iter()
            .enumerate()
            .map(|(index, begin_time)| self.row(index, begin_time, model))
            .collect::<Result<Vec<_>, _>>()?;

        let report = ConsistencyReport { rows };
        info!(
            rows = report.rows.len(),
            failures = report.failure_count(),
            mean_abs_rel_error = ?report.mean_abs_rel_error(),
            "Consistency run finished"
        );
        Ok(report)
    }

    /// Run the ladder on a calibrated and an uncalibrated model.
    ///
    /// # Errors
    ///
    /// As for [`ConsistencyHarness::run`].
    pub fn run_pair(
        &self,
        calibrated: &dyn SimulationProvider,
        uncalibrated: &dyn SimulationProvider,
    ) -> Result<ConsistencyComparison, ConfigurationError> {
        Ok(ConsistencyComparison {
            calibrated: self.run(calibrated)?,
            uncalibrated: self.run(uncalibrated)?,
        })
    }

    /// Average backward and classical rates over the ladder's accrual period.
    pub fn rate_diagnostics(&self, model: &dyn SimulationProvider) -> Vec<RateDiagnosticRecord> {
        rate_diagnostics(model, self.ladder.period_length)
    }
}
