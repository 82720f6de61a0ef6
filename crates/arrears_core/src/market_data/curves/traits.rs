//! Yield curve trait definition.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Yield curve for discount factor and rate calculations.
///
/// # Contract
///
/// - `discount_factor(t)` returns P(0, t)
/// - `zero_rate(t)` returns the continuously compounded zero rate
/// - `forward_rate(t1, t2)` returns the continuously compounded forward rate
/// - `simple_forward_rate(t1, t2)` returns the simply compounded forward rate
///   `(P(0,t1)/P(0,t2) - 1)/(t2 - t1)`, the initial value of a LIBOR-type rate
///
/// # Invariants
///
/// - P(0, 0) = 1
/// - P(0, t) > 0 for all t >= 0
///
/// Discount factors above one are allowed (negative rates).
///
/// # Example
///
/// ```
/// use arrears_core::market_data::curves::{FlatCurve, YieldCurve};
///
/// let curve = FlatCurve::new(0.05_f64);
/// let df = curve.discount_factor(1.0).unwrap();
/// assert!((df - 0.951229).abs() < 1e-5);
///
/// let fwd = curve.forward_rate(1.0, 2.0).unwrap();
/// assert!((fwd - 0.05).abs() < 1e-12);
/// ```
pub trait YieldCurve<T: Float>: Send + Sync {
    /// Return the discount factor for maturity `t`.
    ///
    /// # Errors
    ///
    /// * `MarketDataError::InvalidMaturity` - if `t < 0`
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError>;

    /// Return the continuously compounded zero rate for maturity `t > 0`.
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        let df = self.discount_factor(t)?;
        Ok(-df.ln() / t)
    }

    /// Return the continuously compounded forward rate between `t1` and `t2`.
    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        let dt = t2 - t1;
        if dt <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: dt.to_f64().unwrap_or(0.0),
            });
        }
        let df1 = self.discount_factor(t1)?;
        let df2 = self.discount_factor(t2)?;
        Ok(-(df2 / df1).ln() / dt)
    }

    /// Return the simply compounded forward rate between `t1` and `t2`.
    fn simple_forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        let dt = t2 - t1;
        if dt <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: dt.to_f64().unwrap_or(0.0),
            });
        }
        let df1 = self.discount_factor(t1)?;
        let df2 = self.discount_factor(t2)?;
        Ok((df1 / df2 - T::one()) / dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct LinearDiscount;

    impl YieldCurve<f64> for LinearDiscount {
        fn discount_factor(&self, t: f64) -> Result<f64, MarketDataError> {
            if t < 0.0 {
                return Err(MarketDataError::InvalidMaturity { t });
            }
            Ok(1.0 - 0.01 * t)
        }
    }

    #[test]
    fn test_default_zero_rate() {
        let curve = LinearDiscount;
        assert_relative_eq!(curve.zero_rate(2.0).unwrap(), -(0.98_f64).ln() / 2.0);
        assert!(curve.zero_rate(0.0).is_err());
    }

    #[test]
    fn test_default_simple_forward() {
        let curve = LinearDiscount;
        let fwd = curve.simple_forward_rate(1.0, 1.5).unwrap();
        assert_relative_eq!(fwd, (0.99 / 0.985 - 1.0) / 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_forward_rejects_empty_interval() {
        let curve = LinearDiscount;
        assert!(curve.forward_rate(1.0, 1.0).is_err());
        assert!(curve.simple_forward_rate(2.0, 1.0).is_err());
    }

    #[test]
    fn test_usable_as_trait_object() {
        let curve: Box<dyn YieldCurve<f64>> = Box::new(LinearDiscount);
        assert_relative_eq!(curve.discount_factor(1.0).unwrap(), 0.99);
    }
}
