//! Bachelier (normal) model for European options on a forward rate.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = (F - K)·N(d) + σ√T·φ(d)
//! **Put Price**: P = (K - F)·N(-d) + σ√T·φ(d)
//!
//! Where:
//! - d = (F - K) / (σ√T)
//! - N(·) is the standard normal CDF
//! - φ(·) is the standard normal PDF

use num_traits::Float;

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;

/// Bachelier (normal) model for European option pricing.
///
/// Supports negative forwards, which makes it the quoting convention for
/// rate options in low or negative rate environments. Prices are
/// undiscounted (per unit annuity).
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float`
///
/// # Examples
/// ```
/// use arrears_models::analytical::Bachelier;
///
/// let model = Bachelier::new(0.01_f64, 0.005).unwrap();
/// let call_price = model.price_call(0.01, 1.0);
/// let put_price = model.price_put(0.01, 1.0);
///
/// // Put-call parity: C - P = F - K
/// assert!((call_price - put_price).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Bachelier<T: Float> {
    /// Forward rate (F), may be negative
    forward: T,
    /// Normal volatility (σ), non-negative
    volatility: T,
}

impl<T: Float> Bachelier<T> {
    /// Creates a new Bachelier model.
    ///
    /// A zero volatility is accepted and prices at intrinsic value.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidVolatility` if volatility is negative or not finite
    ///
    /// # Examples
    /// ```
    /// use arrears_models::analytical::Bachelier;
    ///
    /// assert!(Bachelier::new(-0.005_f64, 0.01).is_ok());
    /// assert!(Bachelier::new(0.01_f64, -0.001).is_err());
    /// ```
    pub fn new(forward: T, volatility: T) -> Result<Self, AnalyticalError> {
        if volatility < T::zero() || !volatility.is_finite() {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            forward,
            volatility,
        })
    }

    /// Returns the forward.
    #[inline]
    pub fn forward(&self) -> T {
        self.forward
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Standard deviation of the forward at expiry, σ√T.
    #[inline]
    fn std_dev(&self, expiry: T) -> T {
        if expiry <= T::zero() {
            T::zero()
        } else {
            self.volatility * expiry.sqrt()
        }
    }

    /// d = (F - K) / (σ√T), saturated when σ√T vanishes.
    #[inline]
    fn d(&self, strike: T, std_dev: T) -> T {
        let epsilon = T::from(1e-300).unwrap_or_else(T::min_positive_value);
        if std_dev <= epsilon {
            let large = T::from(100.0).unwrap_or_else(T::max_value);
            return if self.forward > strike {
                large
            } else if self.forward < strike {
                -large
            } else {
                T::zero()
            };
        }
        (self.forward - strike) / std_dev
    }

    /// Undiscounted call price.
    ///
    /// C = (F - K)·N(d) + σ√T·φ(d)
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        let s = self.std_dev(expiry);
        let d = self.d(strike, s);
        (self.forward - strike) * norm_cdf(d) + s * norm_pdf(d)
    }

    /// Undiscounted put price.
    ///
    /// P = (K - F)·N(-d) + σ√T·φ(d)
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        let s = self.std_dev(expiry);
        let d = self.d(strike, s);
        (strike - self.forward) * norm_cdf(-d) + s * norm_pdf(d)
    }

    /// Sensitivity of the undiscounted price to σ, √T·φ(d). Same for calls and puts.
    pub fn vega(&self, strike: T, expiry: T) -> T {
        if expiry <= T::zero() {
            return T::zero();
        }
        let d = self.d(strike, self.std_dev(expiry));
        expiry.sqrt() * norm_pdf(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_atm_call_closed_form() {
        // C = σ√T / √(2π) at the money
        let model = Bachelier::new(0.004_f64, 0.006).unwrap();
        let expected = 0.006 * 2.0_f64.sqrt() / (2.0 * std::f64::consts::PI).sqrt();
        assert_relative_eq!(model.price_call(0.004, 2.0), expected, max_relative = 1e-7);
    }

    #[test]
    fn test_put_call_parity_negative_forward() {
        let model = Bachelier::new(-0.0055_f64, 0.004).unwrap();
        for &k in &[-0.01, -0.0055, 0.0, 0.004783] {
            let parity = model.price_call(k, 3.0) - model.price_put(k, 3.0);
            assert_relative_eq!(parity, -0.0055 - k, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_zero_volatility_is_intrinsic() {
        let model = Bachelier::new(0.01_f64, 0.0).unwrap();
        assert_relative_eq!(model.price_call(0.004, 1.0), 0.006, epsilon = 1e-15);
        assert_eq!(model.price_put(0.004, 1.0), 0.0);
        assert_eq!(model.price_call(0.01, 1.0), 0.0);
    }

    #[test]
    fn test_zero_expiry_is_intrinsic() {
        let model = Bachelier::new(0.01_f64, 0.01).unwrap();
        assert_relative_eq!(model.price_put(0.02, 0.0), 0.01, epsilon = 1e-15);
        assert_eq!(model.vega(0.02, 0.0), 0.0);
    }

    #[test]
    fn test_vega_matches_finite_difference() {
        let h = 1e-7;
        let up = Bachelier::new(0.003_f64, 0.005 + h).unwrap();
        let down = Bachelier::new(0.003_f64, 0.005 - h).unwrap();
        let fd = (up.price_call(0.0045, 1.5) - down.price_call(0.0045, 1.5)) / (2.0 * h);
        let model = Bachelier::new(0.003_f64, 0.005).unwrap();
        assert_relative_eq!(model.vega(0.0045, 1.5), fd, max_relative = 1e-5);
    }

    #[test]
    fn test_rejects_negative_volatility() {
        assert!(matches!(
            Bachelier::new(0.0_f64, -0.01),
            Err(AnalyticalError::InvalidVolatility { .. })
        ));
        assert!(Bachelier::new(0.0_f64, f64::NAN).is_err());
    }
}
