//! Maturity ladder of the consistency check.

use arrears_core::types::ConfigurationError;
use arrears_models::instruments::ValueUnit;

/// Tolerance when comparing ladder times.
const LADDER_TOLERANCE: f64 = 1e-9;

/// Strike of the ladder caplets.
pub const DEFAULT_STRIKE: f64 = 0.004783;

/// Accrual period of the ladder caplets.
pub const DEFAULT_PERIOD_LENGTH: f64 = 0.5;

/// Caplets valued by the consistency harness.
///
/// Begin times start at `first_begin_time` and advance by `fine_step`
/// while below `switch_time`, then by `coarse_step`, for as long as they
/// stay below the simulation horizon.
///
/// # Examples
///
/// ```rust
/// use arrears_pricing::consistency::LadderConfig;
///
/// let ladder = LadderConfig::default().begin_times(6.0);
/// assert_eq!(ladder, vec![0.5, 1.0, 1.5, 2.0, 2.5, 3.5, 4.5, 5.5]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct LadderConfig {
    /// First caplet maturity.
    pub first_begin_time: f64,
    /// Spacing below `switch_time`.
    pub fine_step: f64,
    /// Maturity from which `coarse_step` applies.
    pub switch_time: f64,
    /// Spacing from `switch_time` on.
    pub coarse_step: f64,
    /// Accrual period, also the day count fraction.
    pub period_length: f64,
    /// Caplet strike.
    pub strike: f64,
    /// Volatility unit both valuators report in.
    pub value_unit: ValueUnit,
}

impl Default for LadderConfig {
    fn default() -> Self {
        Self {
            first_begin_time: 0.5,
            fine_step: 0.5,
            switch_time: 2.5,
            coarse_step: 1.0,
            period_length: DEFAULT_PERIOD_LENGTH,
            strike: DEFAULT_STRIKE,
            value_unit: ValueUnit::NormalVolatility,
        }
    }
}

impl LadderConfig {
    /// Validates the ladder.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError::InvalidParameter` for non-positive times or
    ///   steps, or a non-finite strike
    /// - `ConfigurationError::UnsupportedValueUnit` unless the unit is a
    ///   volatility
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (name, value) in [
            ("first_begin_time", self.first_begin_time),
            ("fine_step", self.fine_step),
            ("coarse_step", self.coarse_step),
            ("period_length", self.period_length),
        ] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigurationError::invalid_parameter(
                    name,
                    value,
                    "must be finite and positive",
                ));
            }
        }
        if !self.switch_time.is_finite() {
            return Err(ConfigurationError::invalid_parameter(
                "switch_time",
                self.switch_time,
                "must be finite",
            ));
        }
        if !self.strike.is_finite() {
            return Err(ConfigurationError::invalid_parameter(
                "strike",
                self.strike,
                "must be finite",
            ));
        }
        if !self.value_unit.is_volatility() {
            return Err(ConfigurationError::UnsupportedValueUnit(
                self.value_unit.name().to_string(),
            ));
        }
        Ok(())
    }

    /// Caplet maturities strictly below `horizon`.
    pub fn begin_times(&self, horizon: f64) -> Vec<f64> {
        let mut times = Vec::new();
        let mut begin = self.first_begin_time;
        while begin < horizon - LADDER_TOLERANCE {
            times.push(begin);
            begin += if begin < self.switch_time - LADDER_TOLERANCE {
                self.fine_step
            } else {
                self.coarse_step
            };
        }
        times
    }

    /// `sqrt(1 + τ / (3 T))`, the asymptotic ratio between backward and
    /// classical caplet volatilities for maturity `T` and accrual `τ`.
    #[inline]
    pub fn analytic_ratio(&self, begin_time: f64) -> f64 {
        (1.0 + self.period_length / (3.0 * begin_time)).sqrt()
    }
}
