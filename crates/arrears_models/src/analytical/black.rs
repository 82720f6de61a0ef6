//! Black (lognormal) model for European options on a positive forward.
//!
//! **Call Price**: C = F·N(d1) - K·N(d2)
//! **Put Price**: P = K·N(-d2) - F·N(-d1)
//!
//! Where d1 = (ln(F/K) + σ²T/2) / (σ√T) and d2 = d1 - σ√T.

use num_traits::Float;

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;

/// Black model for European option pricing, undiscounted.
///
/// Non-positive strikes are always in the money: the call is worth
/// `F - K` and the put nothing.
///
/// # Examples
/// ```
/// use arrears_models::analytical::Black;
///
/// let model = Black::new(0.02_f64, 0.25).unwrap();
/// let c = model.price_call(0.02, 1.0);
/// let p = model.price_put(0.02, 1.0);
/// assert!((c - p).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Black<T: Float> {
    forward: T,
    volatility: T,
}

impl<T: Float> Black<T> {
    /// Creates a new Black model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidForward` if forward <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility is negative or not finite
    pub fn new(forward: T, volatility: T) -> Result<Self, AnalyticalError> {
        if !(forward > T::zero()) {
            return Err(AnalyticalError::InvalidForward {
                forward: forward.to_f64().unwrap_or(f64::NAN),
            });
        }
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

    /// (d1, d2), or `None` when the distribution has collapsed to the forward.
    fn d1_d2(&self, strike: T, expiry: T) -> Option<(T, T)> {
        if expiry <= T::zero() || strike <= T::zero() {
            return None;
        }
        let s = self.volatility * expiry.sqrt();
        if s <= T::from(1e-300).unwrap_or_else(T::min_positive_value) {
            return None;
        }
        let half = T::from(0.5).unwrap_or_else(T::zero);
        let d1 = ((self.forward / strike).ln() + half * s * s) / s;
        Some((d1, d1 - s))
    }

    /// Undiscounted call price.
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        match self.d1_d2(strike, expiry) {
            Some((d1, d2)) => self.forward * norm_cdf(d1) - strike * norm_cdf(d2),
            None => (self.forward - strike).max(T::zero()),
        }
    }

    /// Undiscounted put price.
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        match self.d1_d2(strike, expiry) {
            Some((d1, d2)) => strike * norm_cdf(-d2) - self.forward * norm_cdf(-d1),
            None => (strike - self.forward).max(T::zero()),
        }
    }

    /// Sensitivity of the undiscounted price to σ, F·√T·φ(d1).
    pub fn vega(&self, strike: T, expiry: T) -> T {
        match self.d1_d2(strike, expiry) {
            Some((d1, _)) => self.forward * expiry.sqrt() * norm_pdf(d1),
            None => T::zero(),
        }
    }
}
