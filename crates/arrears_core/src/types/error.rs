//! Error types for valuation, simulation and numerical solvers.
//!
//! This module provides structured error handling:
//! - `ConfigurationError`: a request that cannot be served as configured
//! - `CalculationError`: a numerical or simulation query that cannot be satisfied
//! - `PricingError`: union of the two, returned by valuators
//! - `SolverError`: errors from root-finding and least-squares solvers

use thiserror::Error;

/// Errors raised when a request is malformed or unsupported.
///
/// These are never recoverable by retrying with the same inputs.
///
/// # Examples
/// ```
/// use arrears_core::types::ConfigurationError;
///
/// let err = ConfigurationError::UnsupportedValueUnit("INTEGRATED_NORMAL_VARIANCE".to_string());
/// assert_eq!(
///     format!("{}", err),
///     "Value unit INTEGRATED_NORMAL_VARIANCE unsupported."
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// The requested value unit has no valuation path.
    #[error("Value unit {0} unsupported.")]
    UnsupportedValueUnit(String),

    /// Two inputs that must have matching lengths do not.
    #[error("Length mismatch in {context}: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Where the mismatch was detected
        context: String,
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// A parameter lies outside its admissible domain.
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// Offending value
        value: f64,
        /// Constraint that was violated
        reason: String,
    },
}

impl ConfigurationError {
    /// Create a length mismatch error.
    pub fn length_mismatch(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::LengthMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(
        name: impl Into<String>,
        value: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value,
            reason: reason.into(),
        }
    }
}

/// Errors raised when a simulation or numerical query cannot be satisfied.
///
/// # Examples
/// ```
/// use arrears_core::types::CalculationError;
///
/// let err = CalculationError::TimeOutOfRange { time: 22.0, horizon: 21.0 };
/// assert!(format!("{}", err).contains("22"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    /// Requested time lies outside the simulated horizon.
    #[error("Time {time} outside simulated horizon [0, {horizon}]")]
    TimeOutOfRange {
        /// Requested time
        time: f64,
        /// Last simulated time
        horizon: f64,
    },

    /// Requested time does not coincide with a simulation time.
    #[error("Time {time} is not on the simulation grid (nearest {nearest})")]
    TimeNotOnGrid {
        /// Requested time
        time: f64,
        /// Closest grid time
        nearest: f64,
    },

    /// A backward-looking rate was requested before its accrual period ended.
    #[error("Rate for period ending {period_end} not observable at {observation_time}")]
    NotYetObservable {
        /// Observation time
        observation_time: f64,
        /// End of the accrual period
        period_end: f64,
    },

    /// Implied volatility inversion failed.
    #[error("{convention} implied volatility inversion failed: {reason}")]
    ImpliedVolatility {
        /// Pricing convention (`Black` or `Bachelier`)
        convention: String,
        /// Failure description
        reason: String,
    },

    /// Generic numerical failure.
    #[error("Numerical failure: {0}")]
    Numerical(String),
}

impl CalculationError {
    /// Create an implied volatility inversion error.
    pub fn implied_vol(convention: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ImpliedVolatility {
            convention: convention.into(),
            reason: reason.into(),
        }
    }
}

/// Error returned by the caplet valuators.
///
/// Wraps configuration and calculation errors transparently so that
/// provider and inverter failures surface unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Unsupported or malformed request.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Simulation or inversion failure.
    #[error(transparent)]
    Calculation(#[from] CalculationError),
}

impl PricingError {
    /// Returns true if the error stems from the configuration of the request.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Solver-specific errors.
///
/// # Examples
/// ```
/// use arrears_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl From<SolverError> for CalculationError {
    fn from(err: SolverError) -> Self {
        CalculationError::Numerical(err.to_string())
    }
}

impl From<ConfigurationError> for CalculationError {
    fn from(err: ConfigurationError) -> Self {
        CalculationError::Numerical(err.to_string())
    }
}

impl From<crate::market_data::MarketDataError> for CalculationError {
    fn from(err: crate::market_data::MarketDataError) -> Self {
        CalculationError::Numerical(format!("market data: {err}"))
    }
}
