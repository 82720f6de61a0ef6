//! Query interface of a term-structure Monte Carlo simulation.

use arrears_core::ensemble::PathEnsemble;
use arrears_core::market_data::YieldCurve;
use arrears_core::types::CalculationError;

/// A simulated term structure queried by the caplet valuators.
///
/// Every query returns one value per path (or a deterministic value
/// broadcast to all paths). Times are in years from the simulation start.
/// Implementations are read-only after construction, so a provider can be
/// shared between threads and queried concurrently.
pub trait SimulationProvider: Send + Sync {
    /// Last simulated time.
    fn time_horizon(&self) -> f64;

    /// Number of simulated paths.
    fn number_of_paths(&self) -> usize;

    /// Numeraire `N(t)` on every path.
    ///
    /// # Errors
    ///
    /// `CalculationError::TimeOutOfRange` or `TimeNotOnGrid` if `time` is
    /// not a simulated time.
    fn numeraire(&self, time: f64) -> Result<PathEnsemble, CalculationError>;

    /// Probability weight of every path at `time`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`SimulationProvider::numeraire`].
    fn monte_carlo_weights(&self, time: f64) -> Result<PathEnsemble, CalculationError>;

    /// Backward-looking compounded rate over `[period_start, period_end]`
    /// as seen at `observation_time`.
    ///
    /// # Errors
    ///
    /// `CalculationError::NotYetObservable` if `observation_time` precedes
    /// `period_end`, and the lookup errors of [`SimulationProvider::numeraire`].
    fn backward_rate(
        &self,
        observation_time: f64,
        period_start: f64,
        period_end: f64,
    ) -> Result<PathEnsemble, CalculationError>;

    /// Forward-looking simple rate over `[period_start, period_end]` fixed
    /// at `fixing_time`.
    ///
    /// # Errors
    ///
    /// The lookup errors of [`SimulationProvider::numeraire`].
    fn libor_rate(
        &self,
        fixing_time: f64,
        period_start: f64,
        period_end: f64,
    ) -> Result<PathEnsemble, CalculationError>;

    /// Wraps a scalar as an ensemble compatible with this provider.
    fn constant_as_ensemble(&self, value: f64) -> PathEnsemble {
        PathEnsemble::constant(value)
    }

    /// Initial discount curve the simulation is fitted to.
    fn discount_curve(&self) -> &dyn YieldCurve<f64>;
}
