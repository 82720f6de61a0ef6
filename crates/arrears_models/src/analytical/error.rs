//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: errors raised by the Black and Bachelier formulas

use arrears_core::types::CalculationError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// # Variants
/// - `InvalidVolatility`: negative or non-finite volatility
/// - `InvalidForward`: non-positive forward under lognormal dynamics
/// - `NumericalInstability`: computation encountered numerical issues
///
/// # Examples
/// ```
/// use arrears_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid volatility (negative or non-finite).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid forward (non-positive for Black).
    #[error("Invalid forward: F = {forward}")]
    InvalidForward {
        /// The invalid forward value
        forward: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Description of the numerical issue
        message: String,
    },
}

impl From<AnalyticalError> for CalculationError {
    fn from(err: AnalyticalError) -> Self {
        CalculationError::Numerical(err.to_string())
    }
}
