//! Hull-White one-factor interest rate model.
//!
//! The short rate is split into a deterministic shift and a Gaussian state:
//! ```text
//! r(t) = x(t) + α(t)
//! dx(t) = -a · x(t) · dt + σ · dW(t),   x(0) = 0
//! ```
//! where α(t) is chosen so that the model reproduces the initial discount
//! curve P(0, t). With `a = 0` the model reduces to Ho-Lee.
//!
//! ## Closed forms
//!
//! - Bond factor: `B(τ) = (1 - e^{-aτ}) / a`
//! - State variance: `Var x(t) = σ² (1 - e^{-2at}) / (2a)`
//! - Integrated state variance: `V(t) = Var ∫₀ᵗ x(s) ds = σ²/a³ · h(at)`,
//!   `h(y) = y + 2(e^{-y} - 1) - (e^{-2y} - 1)/2`
//! - Bond price:
//!   `P(t, T) = P(0,T)/P(0,t) · exp(-B x - ½ B σ² B(t)² - ½ B² Var x(t))`
//!   with `B = B(T - t)`
//! - Bank account: `N(t) = exp(∫₀ᵗ x + ½ V(t)) / P(0, t)`

use arrears_core::market_data::{MarketDataError, YieldCurve};
use arrears_core::types::ConfigurationError;

use crate::instruments::SwaptionSpec;

/// Below this `a·t` the integrated variance uses its Taylor expansion.
const SERIES_THRESHOLD: f64 = 1e-2;

/// Hull-White model parameters.
///
/// # Example
///
/// ```
/// use arrears_models::models::HullWhiteParams;
///
/// let params = HullWhiteParams::new(0.03, 0.006).unwrap();
/// assert!(params.bond_factor(1.0) < 1.0);
///
/// // Ho-Lee limit
/// let ho_lee = HullWhiteParams::ho_lee(0.006).unwrap();
/// assert_eq!(ho_lee.bond_factor(2.0), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HullWhiteParams {
    /// Mean reversion speed (a >= 0)
    mean_reversion: f64,
    /// Short rate volatility (σ >= 0)
    volatility: f64,
}

impl HullWhiteParams {
    /// Create new Hull-White parameters.
    ///
    /// # Errors
    ///
    /// `ConfigurationError::InvalidParameter` if either parameter is
    /// negative or not finite.
    pub fn new(mean_reversion: f64, volatility: f64) -> Result<Self, ConfigurationError> {
        if !(mean_reversion >= 0.0) || !mean_reversion.is_finite() {
            return Err(ConfigurationError::invalid_parameter(
                "mean_reversion",
                mean_reversion,
                "must be finite and non-negative",
            ));
        }
        if !(volatility >= 0.0) || !volatility.is_finite() {
            return Err(ConfigurationError::invalid_parameter(
                "volatility",
                volatility,
                "must be finite and non-negative",
            ));
        }
        Ok(Self {
            mean_reversion,
            volatility,
        })
    }

    /// Construct without validation, for constants known to be admissible.
    pub(crate) const fn from_parts(mean_reversion: f64, volatility: f64) -> Self {
        Self {
            mean_reversion,
            volatility,
        }
    }

    /// Ho-Lee model: Hull-White without mean reversion.
    pub fn ho_lee(volatility: f64) -> Result<Self, ConfigurationError> {
        Self::new(0.0, volatility)
    }

    /// Mean reversion speed a.
    #[inline]
    pub fn mean_reversion(&self) -> f64 {
        self.mean_reversion
    }

    /// Short rate volatility σ.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// `B(τ) = (1 - e^{-aτ}) / a`, equal to τ when a = 0.
    #[inline]
    pub fn bond_factor(&self, tau: f64) -> f64 {
        let a = self.mean_reversion;
        if a == 0.0 {
            tau
        } else {
            -(-a * tau).exp_m1() / a
        }
    }

    /// Decay of the state over `dt`, `e^{-a·dt}`.
    #[inline]
    pub fn state_decay(&self, dt: f64) -> f64 {
        (-self.mean_reversion * dt).exp()
    }

    /// Variance of the state increment over `dt`, `σ² (1 - e^{-2a·dt}) / (2a)`.
    ///
    /// Also the unconditional variance of `x(t)` for `dt = t`.
    #[inline]
    pub fn state_variance(&self, dt: f64) -> f64 {
        let a = self.mean_reversion;
        let s2 = self.volatility * self.volatility;
        if a == 0.0 {
            s2 * dt
        } else {
            -s2 * (-2.0 * a * dt).exp_m1() / (2.0 * a)
        }
    }

    /// Variance of `∫₀ᵗ x(s) ds`.
    pub fn integrated_state_variance(&self, t: f64) -> f64 {
        let a = self.mean_reversion;
        let s2 = self.volatility * self.volatility;
        let y = a * t;
        if y < SERIES_THRESHOLD {
            // h(y)/a³ = t³ (1/3 - y/4 + 7y²/60 - y³/24 + O(y⁴))
            s2 * t * t * t * (1.0 / 3.0 - y / 4.0 + 7.0 * y * y / 60.0 - y * y * y / 24.0)
        } else {
            let h = y + 2.0 * (-y).exp_m1() - 0.5 * (-2.0 * y).exp_m1();
            s2 * h / (a * a * a)
        }
    }

    /// Deterministic part of `ln P(t, T)` beyond the curve ratio:
    /// `-½ B σ² B(t)² - ½ B² Var x(t)`.
    #[inline]
    pub fn bond_convexity(&self, t: f64, maturity: f64) -> f64 {
        let b = self.bond_factor(maturity - t);
        let b0 = self.bond_factor(t);
        let s2 = self.volatility * self.volatility;
        -0.5 * b * s2 * b0 * b0 - 0.5 * b * b * self.state_variance(t)
    }

    /// Zero-coupon bond price `P(t, T)` conditional on the state `x(t)`.
    ///
    /// # Errors
    ///
    /// Propagates curve errors for negative times.
    pub fn bond_price(
        &self,
        curve: &dyn YieldCurve<f64>,
        t: f64,
        maturity: f64,
        state: f64,
    ) -> Result<f64, MarketDataError> {
        let ratio = curve.discount_factor(maturity)? / curve.discount_factor(t)?;
        let b = self.bond_factor(maturity - t);
        Ok(ratio * (-b * state + self.bond_convexity(t, maturity)).exp())
    }

    /// Bank account numeraire `N(t)` given `∫₀ᵗ x(s) ds`.
    pub fn numeraire(
        &self,
        curve: &dyn YieldCurve<f64>,
        t: f64,
        integrated_state: f64,
    ) -> Result<f64, MarketDataError> {
        let df = curve.discount_factor(t)?;
        Ok((integrated_state + 0.5 * self.integrated_state_variance(t)).exp() / df)
    }

    /// Approximate Bachelier volatility of an at-the-money payer swaption.
    ///
    /// Freezes the weights of the swap rate's sensitivity to the state at
    /// their forward values:
    /// ```text
    /// σ_N ≈ sqrt(Var x(T₀)/T₀) · |B(Tₙ-T₀) Pₙ + S Σ τ B(Tᵢ-T₀) Pᵢ| / A
    /// ```
    /// with `Pᵢ = P(0,Tᵢ)/P(0,T₀)`, `A = Σ τ Pᵢ` and `S` the forward swap rate.
    ///
    /// # Example
    ///
    /// ```
    /// use arrears_core::market_data::FlatCurve;
    /// use arrears_models::instruments::SwaptionSpec;
    /// use arrears_models::models::HullWhiteParams;
    ///
    /// // A one-period swaption under Ho-Lee on a zero curve has vol σ
    /// let params = HullWhiteParams::ho_lee(0.006).unwrap();
    /// let swaption = SwaptionSpec::new(2.0, 0.5, 0.5).unwrap();
    /// let vol = params.swaption_normal_vol(&FlatCurve::new(0.0), &swaption).unwrap();
    /// assert!((vol - 0.006).abs() < 1e-12);
    /// ```
    pub fn swaption_normal_vol(
        &self,
        curve: &dyn YieldCurve<f64>,
        swaption: &SwaptionSpec,
    ) -> Result<f64, MarketDataError> {
        let expiry = swaption.expiry();
        let tau = swaption.period_length();
        let start = curve.discount_factor(expiry)?;

        let mut annuity = 0.0;
        let mut weighted = 0.0;
        let mut last = (1.0, 0.0);
        for t in swaption.payment_times() {
            let p = curve.discount_factor(t)? / start;
            let b = self.bond_factor(t - expiry);
            annuity += tau * p;
            weighted += tau * b * p;
            last = (p, b);
        }
        let (p_n, b_n) = last;
        let swap_rate = (1.0 - p_n) / annuity;
        let sensitivity = (b_n * p_n + swap_rate * weighted).abs() / annuity;

        Ok((self.state_variance(expiry) / expiry).sqrt() * sensitivity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use arrears_core::market_data::FlatCurve;

    #[test]
    fn test_rejects_negative_parameters() {
        assert!(HullWhiteParams::new(-0.01, 0.01).is_err());
        assert!(HullWhiteParams::new(0.01, -0.01).is_err());
        assert!(HullWhiteParams::new(f64::NAN, 0.01).is_err());
    }

    #[test]
    fn test_bond_factor_limits() {
        let params = HullWhiteParams::new(1e-9, 0.01).unwrap();
        assert_relative_eq!(params.bond_factor(5.0), 5.0, max_relative = 1e-8);
        let params = HullWhiteParams::new(0.5, 0.01).unwrap();
        assert_relative_eq!(params.bond_factor(4.0), (1.0 - (-2.0_f64).exp()) / 0.5);
    }

    #[test]
    fn test_integrated_variance_continuous_across_threshold() {
        let t = 1.0;
        let below = HullWhiteParams::new(SERIES_THRESHOLD * 0.999_999, 0.01).unwrap();
        let above = HullWhiteParams::new(SERIES_THRESHOLD * 1.000_001, 0.01).unwrap();
        assert_relative_eq!(
            below.integrated_state_variance(t),
            above.integrated_state_variance(t),
            max_relative = 1e-6
        );
    }

    #[test]
    fn test_integrated_variance_ho_lee() {
        let params = HullWhiteParams::ho_lee(0.006).unwrap();
        assert_relative_eq!(
            params.integrated_state_variance(3.0),
            0.006 * 0.006 * 27.0 / 3.0,
            epsilon = 1e-18
        );
    }

    #[test]
    fn test_integrated_variance_large_mean_reversion() {
        // V(t) → σ²/a² (t - 3/(2a)) for large at
        let params = HullWhiteParams::new(2.0, 0.01).unwrap();
        let t = 30.0;
        let expected = 1e-4 / 4.0 * (t - 0.75);
        assert_relative_eq!(params.integrated_state_variance(t), expected, max_relative = 1e-10);
    }

    #[test]
    fn test_bond_price_reprices_curve_at_zero_state() {
        let params = HullWhiteParams::new(0.05, 0.0).unwrap();
        let curve = FlatCurve::new(0.02);
        let p = params.bond_price(&curve, 1.0, 3.0, 0.0).unwrap();
        assert_relative_eq!(p, (-0.04_f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn test_bond_price_ho_lee_closed_form() {
        // exp(-τx - τσ²t²/2 - σ²tτ²/2) on a zero curve
        let sigma = 0.01;
        let params = HullWhiteParams::ho_lee(sigma).unwrap();
        let curve = FlatCurve::new(0.0);
        let (t, tau, x) = (2.0, 0.5, 0.003);
        let expected =
            (-tau * x - tau * sigma * sigma * t * t / 2.0 - sigma * sigma * t * tau * tau / 2.0)
                .exp();
        assert_relative_eq!(
            params.bond_price(&curve, t, t + tau, x).unwrap(),
            expected,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_numeraire_at_origin() {
        let params = HullWhiteParams::new(0.1, 0.01).unwrap();
        let curve = FlatCurve::new(0.01);
        assert_relative_eq!(params.numeraire(&curve, 0.0, 0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_swaption_vol_decreases_with_mean_reversion() {
        let curve = FlatCurve::new(0.005);
        let swaption = SwaptionSpec::new(5.0, 10.0, 0.5).unwrap();
        let low = HullWhiteParams::new(0.01, 0.006).unwrap();
        let high = HullWhiteParams::new(0.2, 0.006).unwrap();
        assert!(
            high.swaption_normal_vol(&curve, &swaption).unwrap()
                < low.swaption_normal_vol(&curve, &swaption).unwrap()
        );
    }

    #[test]
    fn test_swaption_vol_scales_with_sigma() {
        let curve = FlatCurve::new(-0.005);
        let swaption = SwaptionSpec::new(1.0, 5.0, 0.5).unwrap();
        let one = HullWhiteParams::new(0.03, 0.004).unwrap();
        let two = HullWhiteParams::new(0.03, 0.008).unwrap();
        assert_relative_eq!(
            2.0 * one.swaption_normal_vol(&curve, &swaption).unwrap(),
            two.swaption_normal_vol(&curve, &swaption).unwrap(),
            max_relative = 1e-12
        );
    }
}
