//! Market data error types.

use thiserror::Error;

/// Market data operation errors.
///
/// # Examples
///
/// ```
/// use arrears_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidMaturity { t: -1.0 };
/// assert!(format!("{}", err).contains("-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Invalid maturity (negative time, or an empty interval).
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The invalid maturity value
        t: f64,
    },

    /// Pillar times are not strictly increasing.
    #[error("Pillar times must be strictly increasing: {previous} followed by {next}")]
    NonIncreasingPillars {
        /// Earlier pillar
        previous: f64,
        /// Offending pillar
        next: f64,
    },

    /// Discount factor is not strictly positive and finite.
    #[error("Invalid discount factor {value} at t = {t}")]
    InvalidDiscountFactor {
        /// Pillar time
        t: f64,
        /// Offending discount factor
        value: f64,
    },

    /// Insufficient data for construction.
    #[error("Insufficient data: got {got}, need {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },
}
