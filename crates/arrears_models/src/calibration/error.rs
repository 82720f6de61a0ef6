//! Calibration error types.

use arrears_core::market_data::MarketDataError;
use arrears_core::types::{ConfigurationError, SolverError};
use thiserror::Error;

/// The optimiser stopped without reaching the requested accuracy.
///
/// # Examples
/// ```
/// use arrears_models::calibration::CalibrationFailure;
///
/// let failure = CalibrationFailure { last_accuracy: 3.2e-4, iterations: 400 };
/// assert!(failure.to_string().contains("400 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Calibration did not converge after {iterations} iterations (last accuracy {last_accuracy:.6e})")]
pub struct CalibrationFailure {
    /// Root-mean-square residual at the last accepted iterate
    pub last_accuracy: f64,
    /// Iterations performed
    pub iterations: usize,
}

/// Calibration errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// Optimiser did not converge.
    #[error(transparent)]
    Failure(#[from] CalibrationFailure),

    /// Malformed calibration request.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Curve lookup failed while evaluating a model volatility.
    #[error("Market data error during calibration: {0}")]
    MarketData(#[from] MarketDataError),

    /// Optimiser could not start or hit a numerical problem.
    #[error("Solver error during calibration: {0}")]
    Solver(#[from] SolverError),

    /// Worker pool could not be created.
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_is_transparent() {
        let failure = CalibrationFailure {
            last_accuracy: 1e-3,
            iterations: 12,
        };
        let err: CalibrationError = failure.clone().into();
        assert_eq!(err.to_string(), failure.to_string());
    }

    #[test]
    fn test_configuration_conversion() {
        let err: CalibrationError = ConfigurationError::length_mismatch("grid", 4, 3).into();
        assert!(matches!(err, CalibrationError::Configuration(_)));
    }
}
