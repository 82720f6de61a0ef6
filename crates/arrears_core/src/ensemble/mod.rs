//! Monte-Carlo path ensembles.
//!
//! A [`PathEnsemble`] holds one value per simulated scenario, or a single
//! deterministic value that broadcasts against any path count. Ensembles are
//! immutable: every operation returns a new ensemble and the per-path storage
//! is shared behind an `Arc`, so cloning is cheap and instances can be read
//! from several threads at once.
//!
//! # Memory Layout
//!
//! ```text
//! Deterministic(v)            -> v broadcast to every path
//! Paths([v0, v1, ..., vn-1])  -> one value per path, shared storage
//! ```

mod ops;

use std::sync::Arc;

use crate::types::ConfigurationError;

/// Immutable vector of per-scenario values.
///
/// # Examples
///
/// ```
/// use arrears_core::ensemble::PathEnsemble;
///
/// let numeraire = PathEnsemble::from_paths(vec![1.01, 1.02]);
/// let payoff = PathEnsemble::from_paths(vec![0.0, 0.5]);
///
/// let discounted = payoff.div(&numeraire).unwrap();
/// assert!((discounted.value_at(1) - 0.5 / 1.02).abs() < 1e-15);
///
/// // Deterministic values broadcast
/// let scaled = discounted.mul(&PathEnsemble::constant(2.0)).unwrap();
/// assert_eq!(scaled.n_paths(), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PathEnsemble {
    /// The same value on every path.
    Deterministic(f64),
    /// One value per path.
    Paths(Arc<[f64]>),
}

impl PathEnsemble {
    /// Create a deterministic ensemble.
    #[inline]
    pub fn constant(value: f64) -> Self {
        Self::Deterministic(value)
    }

    /// Create an ensemble from per-path values.
    pub fn from_paths(values: Vec<f64>) -> Self {
        Self::Paths(values.into())
    }

    /// Number of paths, or `None` for a deterministic ensemble.
    #[inline]
    pub fn n_paths(&self) -> Option<usize> {
        match self {
            Self::Deterministic(_) => None,
            Self::Paths(values) => Some(values.len()),
        }
    }

    /// Returns true if the ensemble carries a single broadcast value.
    #[inline]
    pub fn is_deterministic(&self) -> bool {
        matches!(self, Self::Deterministic(_))
    }

    /// Value on the given path.
    ///
    /// Deterministic ensembles return their value for every index.
    ///
    /// # Panics
    ///
    /// Panics if `path` is out of bounds for a stochastic ensemble.
    #[inline]
    pub fn value_at(&self, path: usize) -> f64 {
        match self {
            Self::Deterministic(value) => *value,
            Self::Paths(values) => values[path],
        }
    }

    /// Per-path values, or `None` for a deterministic ensemble.
    pub fn as_slice(&self) -> Option<&[f64]> {
        match self {
            Self::Deterministic(_) => None,
            Self::Paths(values) => Some(values),
        }
    }

    /// Arithmetic mean over paths.
    pub fn expectation(&self) -> f64 {
        match self {
            Self::Deterministic(value) => *value,
            Self::Paths(values) => {
                if values.is_empty() {
                    return f64::NAN;
                }
                values.iter().sum::<f64>() / values.len() as f64
            }
        }
    }

    /// Population variance over paths. Zero for deterministic ensembles.
    pub fn variance(&self) -> f64 {
        match self {
            Self::Deterministic(_) => 0.0,
            Self::Paths(values) => {
                let mean = self.expectation();
                values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64
            }
        }
    }

    /// Monte-Carlo standard error of the mean.
    pub fn standard_error(&self) -> f64 {
        match self.n_paths() {
            None => 0.0,
            Some(n) => (self.variance() / n as f64).sqrt(),
        }
    }

    /// Apply `f` to every value.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        match self {
            Self::Deterministic(value) => Self::Deterministic(f(*value)),
            Self::Paths(values) => Self::Paths(values.iter().map(|&v| f(v)).collect()),
        }
    }

    /// Elementwise `max(value, floor)`.
    pub fn floor(&self, floor: f64) -> Self {
        self.map(|v| v.max(floor))
    }

    /// Elementwise `min(value, cap)`.
    pub fn cap(&self, cap: f64) -> Self {
        self.map(|v| v.min(cap))
    }

    /// Elementwise sum.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::LengthMismatch`] if both operands are
    /// stochastic with different path counts.
    pub fn add(&self, other: &Self) -> Result<Self, ConfigurationError> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Elementwise difference.
    ///
    /// # Errors
    ///
    /// See [`PathEnsemble::add`].
    pub fn sub(&self, other: &Self) -> Result<Self, ConfigurationError> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Elementwise product.
    ///
    /// # Errors
    ///
    /// See [`PathEnsemble::add`].
    pub fn mul(&self, other: &Self) -> Result<Self, ConfigurationError> {
        self.zip_with(other, |a, b| a * b)
    }

    /// Elementwise quotient.
    ///
    /// # Errors
    ///
    /// See [`PathEnsemble::add`].
    pub fn div(&self, other: &Self) -> Result<Self, ConfigurationError> {
        self.zip_with(other, |a, b| a / b)
    }

    /// Add a scalar to every value.
    pub fn add_scalar(&self, x: f64) -> Self {
        self.map(|v| v + x)
    }

    /// Subtract a scalar from every value.
    pub fn sub_scalar(&self, x: f64) -> Self {
        self.map(|v| v - x)
    }

    /// Multiply every value by a scalar.
    pub fn mul_scalar(&self, x: f64) -> Self {
        self.map(|v| v * x)
    }

    /// Divide every value by a scalar.
    pub fn div_scalar(&self, x: f64) -> Self {
        self.map(|v| v / x)
    }

    /// Combine two ensembles elementwise, broadcasting deterministic operands.
    pub fn zip_with<F>(&self, other: &Self, op: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(f64, f64) -> f64,
    {
        match (self, other) {
            (Self::Deterministic(a), Self::Deterministic(b)) => Ok(Self::Deterministic(op(*a, *b))),
            (Self::Deterministic(a), Self::Paths(bs)) => {
                Ok(Self::Paths(bs.iter().map(|&b| op(*a, b)).collect()))
            }
            (Self::Paths(as_), Self::Deterministic(b)) => {
                Ok(Self::Paths(as_.iter().map(|&a| op(a, *b)).collect()))
            }
            (Self::Paths(as_), Self::Paths(bs)) => {
                if as_.len() != bs.len() {
                    return Err(ConfigurationError::length_mismatch(
                        "path ensemble",
                        as_.len(),
                        bs.len(),
                    ));
                }
                Ok(Self::Paths(
                    as_.iter().zip(bs.iter()).map(|(&a, &b)| op(a, b)).collect(),
                ))
            }
        }
    }
}

impl From<f64> for PathEnsemble {
    fn from(value: f64) -> Self {
        Self::Deterministic(value)
    }
}

impl From<Vec<f64>> for PathEnsemble {
    fn from(values: Vec<f64>) -> Self {
        Self::from_paths(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_expectation_and_variance() {
        let e = PathEnsemble::from_paths(vec![1.0, 2.0, 3.0, 4.0]);
        assert_relative_eq!(e.expectation(), 2.5);
        assert_relative_eq!(e.variance(), 1.25);
        assert_relative_eq!(e.standard_error(), (1.25_f64 / 4.0).sqrt());
    }

    #[test]
    fn test_deterministic_broadcasts() {
        let paths = PathEnsemble::from_paths(vec![1.0, 2.0]);
        let two = PathEnsemble::constant(2.0);

        let left = two.div(&paths).unwrap();
        assert_eq!(left.as_slice(), Some(&[2.0, 1.0][..]));

        let right = paths.sub(&two).unwrap();
        assert_eq!(right.as_slice(), Some(&[-1.0, 0.0][..]));

        assert_eq!(two.mul(&two).unwrap(), PathEnsemble::constant(4.0));
    }

    #[test]
    fn test_length_mismatch_is_error() {
        let a = PathEnsemble::from_paths(vec![1.0, 2.0]);
        let b = PathEnsemble::from_paths(vec![1.0, 2.0, 3.0]);
        let err = a.add(&b).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::LengthMismatch {
                expected: 2,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_floor_and_cap() {
        let e = PathEnsemble::from_paths(vec![-1.0, 0.5, 2.0]);
        assert_eq!(e.floor(0.0).as_slice(), Some(&[0.0, 0.5, 2.0][..]));
        assert_eq!(e.cap(0.0).as_slice(), Some(&[-1.0, 0.0, 0.0][..]));
    }

    #[test]
    fn test_operations_do_not_mutate_source() {
        let e = PathEnsemble::from_paths(vec![1.0, 2.0]);
        let _ = e.mul_scalar(10.0);
        assert_eq!(e.as_slice(), Some(&[1.0, 2.0][..]));
    }

    #[test]
    fn test_empty_expectation_is_nan() {
        let e = PathEnsemble::from_paths(Vec::new());
        assert!(e.expectation().is_nan());
    }

    #[test]
    fn test_ensemble_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PathEnsemble>();
    }
}
