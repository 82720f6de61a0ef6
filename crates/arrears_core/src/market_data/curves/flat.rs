//! Flat yield curve implementation.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Flat yield curve with a constant continuously compounded rate.
///
/// # Example
///
/// ```
/// use arrears_core::market_data::curves::{FlatCurve, YieldCurve};
///
/// let curve = FlatCurve::new(0.005_f64);
/// assert!((curve.zero_rate(3.0).unwrap() - 0.005).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatCurve<T: Float> {
    rate: T,
}

impl<T: Float> FlatCurve<T> {
    /// Construct a flat curve with the given rate.
    #[inline]
    pub fn new(rate: T) -> Self {
        Self { rate }
    }

    /// Return the constant rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }
}

impl<T: Float + Send + Sync> YieldCurve<T> for FlatCurve<T> {
    /// `D(t) = exp(-r t)`
    #[inline]
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        Ok((-self.rate * t).exp())
    }

    #[inline]
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        Ok(self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_discount_factor() {
        let curve = FlatCurve::new(0.05_f64);
        assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
        assert_relative_eq!(curve.discount_factor(2.0).unwrap(), (-0.1_f64).exp());
    }

    #[test]
    fn test_negative_rate_discount_above_one() {
        let curve = FlatCurve::new(-0.0055_f64);
        assert!(curve.discount_factor(10.0).unwrap() > 1.0);
    }

    #[test]
    fn test_negative_maturity_rejected() {
        let curve = FlatCurve::new(0.01_f64);
        assert!(matches!(
            curve.discount_factor(-1.0),
            Err(MarketDataError::InvalidMaturity { .. })
        ));
    }

    #[test]
    fn test_simple_forward_matches_compounding() {
        let curve = FlatCurve::new(0.005_f64);
        let fwd = curve.simple_forward_rate(0.5, 1.0).unwrap();
        assert_relative_eq!(fwd, ((0.005_f64 * 0.5).exp() - 1.0) / 0.5, epsilon = 1e-15);
    }
}
