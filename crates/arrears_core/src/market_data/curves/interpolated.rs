//! Pillar-based yield curve with log-linear discount factor interpolation.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Yield curve defined by discount factors at pillar times.
///
/// `ln P(0, t)` is linear between pillars, i.e. forwards are piecewise flat.
/// The origin `P(0, 0) = 1` is implicit. Beyond the last pillar the last
/// segment's forward rate is extended.
///
/// # Example
///
/// ```
/// use arrears_core::market_data::curves::{InterpolatedCurve, YieldCurve};
///
/// let curve = InterpolatedCurve::from_discount_factors(
///     &[1.0_f64, 2.0],
///     &[0.99, 0.97],
/// ).unwrap();
///
/// // Halfway between origin and the first pillar
/// let df = curve.discount_factor(0.5).unwrap();
/// assert!((df - 0.99_f64.sqrt()).abs() < 1e-14);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterpolatedCurve<T: Float> {
    /// Pillar times including the origin.
    times: Vec<T>,
    /// Log discount factors at each pillar, `ln P(0, times[i])`.
    log_dfs: Vec<T>,
}

impl<T: Float> InterpolatedCurve<T> {
    /// Build a curve from pillar times and discount factors.
    ///
    /// # Errors
    ///
    /// - `InsufficientData` if no pillar is given or lengths differ
    /// - `NonIncreasingPillars` if times are not strictly increasing and positive
    /// - `InvalidDiscountFactor` if a discount factor is not positive and finite
    pub fn from_discount_factors(times: &[T], dfs: &[T]) -> Result<Self, MarketDataError> {
        if times.is_empty() || times.len() != dfs.len() {
            return Err(MarketDataError::InsufficientData {
                got: times.len().min(dfs.len()),
                need: times.len().max(1),
            });
        }

        let mut pillar_times = Vec::with_capacity(times.len() + 1);
        let mut log_dfs = Vec::with_capacity(times.len() + 1);
        pillar_times.push(T::zero());
        log_dfs.push(T::zero());

        for (&t, &df) in times.iter().zip(dfs) {
            let previous = pillar_times[pillar_times.len() - 1];
            if t <= previous {
                return Err(MarketDataError::NonIncreasingPillars {
                    previous: previous.to_f64().unwrap_or(f64::NAN),
                    next: t.to_f64().unwrap_or(f64::NAN),
                });
            }
            if !(df > T::zero()) || !df.is_finite() {
                return Err(MarketDataError::InvalidDiscountFactor {
                    t: t.to_f64().unwrap_or(f64::NAN),
                    value: df.to_f64().unwrap_or(f64::NAN),
                });
            }
            pillar_times.push(t);
            log_dfs.push(df.ln());
        }

        Ok(Self {
            times: pillar_times,
            log_dfs,
        })
    }

    /// Pillar times, excluding the implicit origin.
    pub fn pillar_times(&self) -> &[T] {
        &self.times[1..]
    }

    /// Discount factors at the pillars, excluding the implicit origin.
    pub fn pillar_discount_factors(&self) -> Vec<T> {
        self.log_dfs[1..].iter().map(|l| l.exp()).collect()
    }

    /// Last pillar time.
    pub fn max_time(&self) -> T {
        self.times[self.times.len() - 1]
    }

    fn log_discount(&self, t: T) -> T {
        let n = self.times.len();
        // Index of the segment [times[i-1], times[i]] containing t
        let i = match self.times.iter().position(|&pillar| pillar >= t) {
            Some(0) => return T::zero(),
            Some(i) => i,
            None => n - 1,
        };
        let (t0, t1) = (self.times[i - 1], self.times[i]);
        let (l0, l1) = (self.log_dfs[i - 1], self.log_dfs[i]);
        l0 + (l1 - l0) * (t - t0) / (t1 - t0)
    }
}

impl<T: Float + Send + Sync> YieldCurve<T> for InterpolatedCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        Ok(self.log_discount(t).exp())
    }
}
