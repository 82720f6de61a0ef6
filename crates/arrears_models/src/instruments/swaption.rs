//! European swaption on a regular fixed-for-floating swap.

use arrears_core::market_data::{MarketDataError, YieldCurve};
use arrears_core::types::ConfigurationError;

/// Payer swaption exercising into a swap with equally spaced periods.
///
/// The underlying swap starts at `expiry` and pays at
/// `expiry + i · period_length` for `i = 1..=n`, with
/// `n = round(tenor / period_length)`.
///
/// # Examples
/// ```
/// use arrears_models::instruments::SwaptionSpec;
///
/// let swaption = SwaptionSpec::new(1.0, 2.0, 0.5).unwrap();
/// assert_eq!(swaption.number_of_periods(), 4);
/// assert_eq!(swaption.payment_times(), vec![1.5, 2.0, 2.5, 3.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwaptionSpec {
    expiry: f64,
    tenor: f64,
    period_length: f64,
}

impl SwaptionSpec {
    /// Create a swaption.
    ///
    /// # Errors
    ///
    /// `ConfigurationError::InvalidParameter` if the expiry is not positive
    /// or the tenor does not contain at least one period.
    pub fn new(expiry: f64, tenor: f64, period_length: f64) -> Result<Self, ConfigurationError> {
        if !(expiry > 0.0) || !expiry.is_finite() {
            return Err(ConfigurationError::invalid_parameter(
                "expiry",
                expiry,
                "must be finite and positive",
            ));
        }
        if !(period_length > 0.0) || !period_length.is_finite() {
            return Err(ConfigurationError::invalid_parameter(
                "period_length",
                period_length,
                "must be finite and positive",
            ));
        }
        if !(tenor.is_finite() && (tenor / period_length).round() >= 1.0) {
            return Err(ConfigurationError::invalid_parameter(
                "tenor",
                tenor,
                "must span at least one period",
            ));
        }
        Ok(Self {
            expiry,
            tenor,
            period_length,
        })
    }

    /// Option expiry, also the swap start.
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Swap length in years.
    pub fn tenor(&self) -> f64 {
        self.tenor
    }

    /// Fixed-leg period length.
    pub fn period_length(&self) -> f64 {
        self.period_length
    }

    /// Number of fixed-leg periods.
    pub fn number_of_periods(&self) -> usize {
        (self.tenor / self.period_length).round() as usize
    }

    /// Fixed-leg payment times.
    pub fn payment_times(&self) -> Vec<f64> {
        (1..=self.number_of_periods())
            .map(|i| self.expiry + i as f64 * self.period_length)
            .collect()
    }

    /// Annuity `Σ τ·P(0, T_i)` and par swap rate `(P(0, T_0) - P(0, T_n)) / annuity`.
    pub fn annuity_and_swap_rate(
        &self,
        curve: &dyn YieldCurve<f64>,
    ) -> Result<(f64, f64), MarketDataError> {
        let start = curve.discount_factor(self.expiry)?;
        let mut annuity = 0.0;
        let mut last = start;
        for t in self.payment_times() {
            last = curve.discount_factor(t)?;
            annuity += self.period_length * last;
        }
        Ok((annuity, (start - last) / annuity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use arrears_core::market_data::FlatCurve;

    #[test]
    fn test_rounds_tenor_to_periods() {
        let swaption = SwaptionSpec::new(0.5, 1.01, 0.25).unwrap();
        assert_eq!(swaption.number_of_periods(), 4);
    }

    #[test]
    fn test_rejects_degenerate_swap() {
        assert!(SwaptionSpec::new(1.0, 0.1, 0.5).is_err());
        assert!(SwaptionSpec::new(0.0, 1.0, 0.5).is_err());
    }

    #[test]
    fn test_swap_rate_on_flat_curve() {
        // Simple compounding over each period of a flat continuous curve
        let r = 0.01_f64;
        let curve = FlatCurve::new(r);
        let swaption = SwaptionSpec::new(2.0, 5.0, 1.0).unwrap();
        let (annuity, rate) = swaption.annuity_and_swap_rate(&curve).unwrap();
        assert!(annuity > 0.0);
        assert_relative_eq!(rate, r.exp() - 1.0, epsilon = 1e-14);
    }
}
