//! Caplet and floorlet definitions.

use std::fmt;
use std::str::FromStr;

use arrears_core::types::ConfigurationError;

/// Unit in which a caplet valuation is reported.
///
/// `IntegratedLognormalVariance` and `IntegratedNormalVariance` are
/// recognised so that requests can name them, but valuators reject them
/// with [`ConfigurationError::UnsupportedValueUnit`].
///
/// # Examples
/// ```
/// use arrears_models::instruments::ValueUnit;
///
/// let unit: ValueUnit = "NORMAL_VOLATILITY".parse().unwrap();
/// assert_eq!(unit, ValueUnit::NormalVolatility);
/// assert_eq!(ValueUnit::default(), ValueUnit::NormalVolatility);
/// assert!("BASIS_POINTS".parse::<ValueUnit>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum ValueUnit {
    /// Per-path discounted payoff
    Value,
    /// Black implied volatility
    LognormalVolatility,
    /// Black variance times option maturity
    IntegratedLognormalVariance,
    /// Bachelier implied volatility
    #[default]
    NormalVolatility,
    /// Bachelier variance times option maturity
    IntegratedNormalVariance,
}

impl ValueUnit {
    /// Former name of [`ValueUnit::LognormalVolatility`].
    #[deprecated(note = "use ValueUnit::LognormalVolatility")]
    pub const VOLATILITY: ValueUnit = ValueUnit::LognormalVolatility;

    /// Former name of [`ValueUnit::IntegratedLognormalVariance`].
    #[deprecated(note = "use ValueUnit::IntegratedLognormalVariance")]
    pub const INTEGRATED_VARIANCE: ValueUnit = ValueUnit::IntegratedLognormalVariance;

    /// All units, in declaration order.
    pub const ALL: [ValueUnit; 5] = [
        ValueUnit::Value,
        ValueUnit::LognormalVolatility,
        ValueUnit::IntegratedLognormalVariance,
        ValueUnit::NormalVolatility,
        ValueUnit::IntegratedNormalVariance,
    ];

    /// Canonical name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            ValueUnit::Value => "VALUE",
            ValueUnit::LognormalVolatility => "LOGNORMAL_VOLATILITY",
            ValueUnit::IntegratedLognormalVariance => "INTEGRATED_LOGNORMAL_VARIANCE",
            ValueUnit::NormalVolatility => "NORMAL_VOLATILITY",
            ValueUnit::IntegratedNormalVariance => "INTEGRATED_NORMAL_VARIANCE",
        }
    }

    /// Returns true for the two volatility units.
    pub fn is_volatility(&self) -> bool {
        matches!(
            self,
            ValueUnit::LognormalVolatility | ValueUnit::NormalVolatility
        )
    }
}

impl fmt::Display for ValueUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ValueUnit {
    type Err = ConfigurationError;

    /// Parse a unit name, case-insensitively. Underscores are optional and
    /// the legacy names `VOLATILITY` and `INTEGRATED_VARIANCE` map to their
    /// lognormal counterparts.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        match key.as_str() {
            "VALUE" => Ok(ValueUnit::Value),
            "LOGNORMALVOLATILITY" | "VOLATILITYLOGNORMAL" | "VOLATILITY" => {
                Ok(ValueUnit::LognormalVolatility)
            }
            "INTEGRATEDLOGNORMALVARIANCE" | "INTEGRATEDVARIANCE" => {
                Ok(ValueUnit::IntegratedLognormalVariance)
            }
            "NORMALVOLATILITY" | "VOLATILITYNORMAL" => Ok(ValueUnit::NormalVolatility),
            "INTEGRATEDNORMALVARIANCE" => Ok(ValueUnit::IntegratedNormalVariance),
            _ => Err(ConfigurationError::UnsupportedValueUnit(s.to_string())),
        }
    }
}

/// A single-period cap (or floor) contract.
///
/// The accrual period is `[maturity, maturity + period_length]` and the
/// payoff `max(±(L - K), 0) · daycount_fraction` is paid at the end of it.
/// Which rate `L` is used depends on the valuator.
///
/// # Examples
/// ```
/// use arrears_models::instruments::{CapletSpec, ValueUnit};
///
/// let caplet = CapletSpec::caplet(2.0, 0.5, 0.004783).unwrap();
/// assert_eq!(caplet.payment_date(), 2.5);
/// assert_eq!(caplet.daycount_fraction(), 0.5);
/// assert_eq!(caplet.value_unit(), ValueUnit::NormalVolatility);
///
/// let floorlet = caplet.as_floorlet().with_value_unit(ValueUnit::Value);
/// assert!(floorlet.is_floorlet());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapletSpec {
    maturity: f64,
    period_length: f64,
    strike: f64,
    daycount_fraction: f64,
    is_floorlet: bool,
    value_unit: ValueUnit,
}

impl CapletSpec {
    /// Create a caplet or floorlet.
    ///
    /// # Errors
    ///
    /// `ConfigurationError::InvalidParameter` if the maturity is negative,
    /// the period length or day count fraction is not positive, or any
    /// input is not finite.
    pub fn new(
        maturity: f64,
        period_length: f64,
        strike: f64,
        daycount_fraction: f64,
        is_floorlet: bool,
        value_unit: ValueUnit,
    ) -> Result<Self, ConfigurationError> {
        if !(maturity >= 0.0) || !maturity.is_finite() {
            return Err(ConfigurationError::invalid_parameter(
                "maturity",
                maturity,
                "must be finite and non-negative",
            ));
        }
        if !(period_length > 0.0) || !period_length.is_finite() {
            return Err(ConfigurationError::invalid_parameter(
                "period_length",
                period_length,
                "must be finite and positive",
            ));
        }
        if !(daycount_fraction > 0.0) || !daycount_fraction.is_finite() {
            return Err(ConfigurationError::invalid_parameter(
                "daycount_fraction",
                daycount_fraction,
                "must be finite and positive",
            ));
        }
        if !strike.is_finite() {
            return Err(ConfigurationError::invalid_parameter(
                "strike",
                strike,
                "must be finite",
            ));
        }
        Ok(Self {
            maturity,
            period_length,
            strike,
            daycount_fraction,
            is_floorlet,
            value_unit,
        })
    }

    /// Caplet whose day count fraction equals its period length, quoted in
    /// the default unit.
    pub fn caplet(
        maturity: f64,
        period_length: f64,
        strike: f64,
    ) -> Result<Self, ConfigurationError> {
        Self::new(
            maturity,
            period_length,
            strike,
            period_length,
            false,
            ValueUnit::default(),
        )
    }

    /// Same contract, reported in `unit`.
    pub fn with_value_unit(mut self, unit: ValueUnit) -> Self {
        self.value_unit = unit;
        self
    }

    /// Same contract as a floorlet.
    pub fn as_floorlet(mut self) -> Self {
        self.is_floorlet = true;
        self
    }

    /// Same contract as a caplet.
    pub fn as_caplet(mut self) -> Self {
        self.is_floorlet = false;
        self
    }

    /// Same contract with a different strike.
    pub fn with_strike(mut self, strike: f64) -> Self {
        self.strike = strike;
        self
    }

    /// Start of the accrual period.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Length of the accrual period in years.
    #[inline]
    pub fn period_length(&self) -> f64 {
        self.period_length
    }

    /// End of the accrual period, where the payoff is paid.
    #[inline]
    pub fn payment_date(&self) -> f64 {
        self.maturity + self.period_length
    }

    /// Strike rate.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Accrual factor applied to the payoff.
    #[inline]
    pub fn daycount_fraction(&self) -> f64 {
        self.daycount_fraction
    }

    /// Returns true for a floorlet.
    #[inline]
    pub fn is_floorlet(&self) -> bool {
        self.is_floorlet
    }

    /// Unit in which the valuation is reported.
    #[inline]
    pub fn value_unit(&self) -> ValueUnit {
        self.value_unit
    }

    /// Undiscounted payoff for a realised rate.
    ///
    /// `max(rate - K, 0) · dcf` for a caplet, `max(K - rate, 0) · dcf` for a floorlet.
    #[inline]
    pub fn payoff(&self, rate: f64) -> f64 {
        let diff = rate - self.strike;
        let exercised = if self.is_floorlet {
            (-diff).max(0.0)
        } else {
            diff.max(0.0)
        };
        exercised * self.daycount_fraction
    }
}
