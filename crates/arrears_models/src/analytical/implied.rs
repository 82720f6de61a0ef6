//! Implied volatility inversion for Black and Bachelier call prices.
//!
//! Both conventions price a call on a forward `F` with strike `K`, expiry
//! `T` and annuity `A` (discount factor times accrual):
//!
//! - Black: `A · Black(F, σ).price_call(K, T)`
//! - Bachelier: `A · Bachelier(F, σ).price_call(K, T)`
//!
//! The inverse maps a discounted call price back to σ.

use arrears_core::math::solvers::{BrentSolver, SolverConfig};
use arrears_core::types::CalculationError;

use super::bachelier::Bachelier;
use super::black::Black;

const BLACK: &str = "Black";
const BACHELIER: &str = "Bachelier";

/// Maps a call price to the volatility that reproduces it.
///
/// Valuators take an inverter by reference so that tests can inject a
/// deterministic stand-in.
pub trait ImpliedVolatilityInverter: Send + Sync {
    /// Lognormal (Black) implied volatility of a call price.
    ///
    /// # Errors
    ///
    /// `CalculationError::ImpliedVolatility` if the inputs admit no
    /// lognormal volatility (non-positive forward or strike, price outside
    /// the no-arbitrage bounds, non-positive maturity).
    fn black_lognormal_implied_vol(
        &self,
        forward: f64,
        option_maturity: f64,
        strike: f64,
        annuity: f64,
        price: f64,
    ) -> Result<f64, CalculationError>;

    /// Normal (Bachelier) implied volatility of a call price.
    ///
    /// # Errors
    ///
    /// `CalculationError::ImpliedVolatility` if the price lies below
    /// intrinsic value or the maturity is not positive.
    fn bachelier_normal_implied_vol(
        &self,
        forward: f64,
        option_maturity: f64,
        strike: f64,
        annuity: f64,
        price: f64,
    ) -> Result<f64, CalculationError>;
}

/// Inverter bracketing the closed-form price and solving with Brent's method.
///
/// # Examples
/// ```
/// use arrears_models::analytical::{AnalyticInverter, Bachelier, ImpliedVolatilityInverter};
///
/// let price = 0.5 * Bachelier::new(0.004_f64, 0.0055).unwrap().price_call(0.0045, 2.0);
/// let vol = AnalyticInverter::default()
///     .bachelier_normal_implied_vol(0.004, 2.0, 0.0045, 0.5, price)
///     .unwrap();
/// assert!((vol - 0.0055).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct AnalyticInverter {
    solver: BrentSolver,
    max_bracket_expansions: usize,
}

impl Default for AnalyticInverter {
    fn default() -> Self {
        Self::new(SolverConfig::new(1e-15, 200))
    }
}

impl AnalyticInverter {
    /// Create an inverter with the given root-finding configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self {
            solver: BrentSolver::new(config),
            max_bracket_expansions: 64,
        }
    }

    /// Undiscounted target price and intrinsic value, or the reason there is none.
    fn normalise(
        convention: &str,
        forward: f64,
        option_maturity: f64,
        strike: f64,
        annuity: f64,
        price: f64,
    ) -> Result<(f64, f64), CalculationError> {
        if !(forward.is_finite() && strike.is_finite() && price.is_finite()) {
            return Err(CalculationError::implied_vol(
                convention,
                format!("non-finite input (forward {forward}, strike {strike}, price {price})"),
            ));
        }
        if !(option_maturity > 0.0) {
            return Err(CalculationError::implied_vol(
                convention,
                format!("option maturity {option_maturity} must be positive"),
            ));
        }
        if annuity == 0.0 || !annuity.is_finite() {
            return Err(CalculationError::implied_vol(
                convention,
                format!("annuity {annuity} must be finite and non-zero"),
            ));
        }

        let target = price / annuity;
        let intrinsic = (forward - strike).max(0.0);
        let slack = 1e-14 * (1.0 + forward.abs() + strike.abs());
        if target < intrinsic - slack {
            return Err(CalculationError::implied_vol(
                convention,
                format!("price {target} below intrinsic value {intrinsic}"),
            ));
        }
        Ok((target, intrinsic))
    }

    /// Expand `hi` until `f(hi) > 0`.
    fn bracket<F>(&self, convention: &str, f: &F, mut hi: f64) -> Result<f64, CalculationError>
    where
        F: Fn(f64) -> f64,
    {
        for _ in 0..self.max_bracket_expansions {
            if f(hi) > 0.0 {
                return Ok(hi);
            }
            hi *= 2.0;
        }
        Err(CalculationError::implied_vol(
            convention,
            format!("no volatility up to {hi} reaches the target price"),
        ))
    }
}

impl ImpliedVolatilityInverter for AnalyticInverter {
    fn black_lognormal_implied_vol(
        &self,
        forward: f64,
        option_maturity: f64,
        strike: f64,
        annuity: f64,
        price: f64,
    ) -> Result<f64, CalculationError> {
        if !(forward > 0.0 && strike > 0.0) {
            return Err(CalculationError::implied_vol(
                BLACK,
                format!("forward {forward} and strike {strike} must be positive"),
            ));
        }
        let (target, intrinsic) =
            Self::normalise(BLACK, forward, option_maturity, strike, annuity, price)?;
        if target >= forward {
            return Err(CalculationError::implied_vol(
                BLACK,
                format!("price {target} not below the forward {forward}"),
            ));
        }
        if target <= intrinsic {
            return Ok(0.0);
        }

        let objective = |sigma: f64| match Black::new(forward, sigma) {
            Ok(model) => model.price_call(strike, option_maturity) - target,
            Err(_) => f64::NAN,
        };
        let hi = self.bracket(BLACK, &objective, 1.0)?;
        self.solver
            .find_root(objective, 0.0, hi)
            .map_err(|e| CalculationError::implied_vol(BLACK, e.to_string()))
    }

    fn bachelier_normal_implied_vol(
        &self,
        forward: f64,
        option_maturity: f64,
        strike: f64,
        annuity: f64,
        price: f64,
    ) -> Result<f64, CalculationError> {
        let (target, intrinsic) =
            Self::normalise(BACHELIER, forward, option_maturity, strike, annuity, price)?;
        if target <= intrinsic {
            return Ok(0.0);
        }
        if forward == strike {
            return Ok(target * (2.0 * std::f64::consts::PI / option_maturity).sqrt());
        }

        let objective = |sigma: f64| match Bachelier::new(forward, sigma) {
            Ok(model) => model.price_call(strike, option_maturity) - target,
            Err(_) => f64::NAN,
        };
        let initial = 2.0 * (2.0 * target + (forward - strike).abs())
            * (2.0 * std::f64::consts::PI).sqrt()
            / option_maturity.sqrt();
        let hi = self.bracket(BACHELIER, &objective, initial)?;
        self.solver
            .find_root(objective, 0.0, hi)
            .map_err(|e| CalculationError::implied_vol(BACHELIER, e.to_string()))
    }
}
