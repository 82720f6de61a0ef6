//! Bootstrap-specific error types.

use arrears_core::market_data::MarketDataError;
use arrears_core::types::SolverError;
use thiserror::Error;

/// Errors that can occur while stripping a discount curve from par quotes.
///
/// # Examples
///
/// ```
/// use arrears_optimiser::bootstrapping::BootstrapError;
///
/// let err = BootstrapError::invalid_tenor("3X");
/// assert!(err.to_string().contains("3X"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BootstrapError {
    /// Tenor code could not be parsed.
    #[error("Invalid tenor code '{0}' (expected <count><D|W|M|Y>)")]
    InvalidTenor(String),

    /// Two quotes resolve to the same pillar.
    #[error("Duplicate maturity detected: {maturity}")]
    DuplicateMaturity {
        /// The duplicated maturity in years
        maturity: f64,
    },

    /// No quotes were supplied.
    #[error("Insufficient instruments: need at least {required}, got {provided}")]
    InsufficientData {
        /// Minimum number of quotes required
        required: usize,
        /// Number of quotes provided
        provided: usize,
    },

    /// Quote rate is not finite.
    #[error("Invalid par rate {rate} for tenor {tenor}")]
    InvalidRate {
        /// Tenor code of the offending quote
        tenor: String,
        /// Offending rate
        rate: f64,
    },

    /// Root-finding failed at a pillar.
    #[error("Solver error at maturity {maturity}: {source}")]
    Solver {
        /// Pillar maturity in years
        maturity: f64,
        /// Underlying solver failure
        source: SolverError,
    },

    /// Stripped discount factors do not form a valid curve.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),
}

impl BootstrapError {
    /// Create an invalid tenor error.
    pub fn invalid_tenor(code: impl Into<String>) -> Self {
        Self::InvalidTenor(code.into())
    }

    /// Create a duplicate maturity error.
    pub fn duplicate_maturity(maturity: f64) -> Self {
        Self::DuplicateMaturity { maturity }
    }

    /// Create an insufficient data error.
    pub fn insufficient_data(required: usize, provided: usize) -> Self {
        Self::InsufficientData { required, provided }
    }

    /// Check if this is a tenor parsing failure.
    pub fn is_invalid_tenor(&self) -> bool {
        matches!(self, Self::InvalidTenor(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_maturity_display() {
        let err = BootstrapError::duplicate_maturity(1.0);
        assert!(err.to_string().contains("1"));
        assert!(!err.is_invalid_tenor());
    }

    #[test]
    fn test_solver_error_carries_maturity() {
        let err = BootstrapError::Solver {
            maturity: 30.0,
            source: SolverError::MaxIterationsExceeded { iterations: 100 },
        };
        let display = err.to_string();
        assert!(display.contains("30"));
        assert!(display.contains("100 iterations"));
    }

    #[test]
    fn test_market_data_conversion() {
        let err: BootstrapError = MarketDataError::InsufficientData { got: 0, need: 1 }.into();
        assert!(matches!(err, BootstrapError::MarketData(_)));
    }
}
