//! At-the-money swaption normal volatility quotes.

use arrears_core::types::ConfigurationError;

use crate::bootstrapping::Tenor;

/// Swaption volatility quotes as parallel arrays of expiry, tenor and
/// normal volatility.
///
/// # Examples
///
/// ```
/// use arrears_optimiser::bootstrapping::{Tenor, TenorUnit};
/// use arrears_optimiser::calibration::SwaptionVolGrid;
///
/// let year = |n| Tenor::new(n, TenorUnit::Year);
/// let grid = SwaptionVolGrid::from_matrix(
///     &[year(1), year(2)],
///     &[year(5), year(10)],
///     &[vec![0.0034, 0.0046], vec![0.0039, 0.0050]],
/// )
/// .unwrap();
/// assert_eq!(grid.len(), 4);
///
/// let err = SwaptionVolGrid::new(vec![year(1)], vec![year(5), year(10)], vec![0.0034]);
/// assert!(err.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwaptionVolGrid {
    expiries: Vec<Tenor>,
    tenors: Vec<Tenor>,
    volatilities: Vec<f64>,
}

impl SwaptionVolGrid {
    /// Create a grid from parallel arrays.
    ///
    /// # Errors
    ///
    /// `ConfigurationError::LengthMismatch` unless all three arrays have
    /// the same length.
    pub fn new(
        expiries: Vec<Tenor>,
        tenors: Vec<Tenor>,
        volatilities: Vec<f64>,
    ) -> Result<Self, ConfigurationError> {
        if tenors.len() != expiries.len() {
            return Err(ConfigurationError::length_mismatch(
                "swaption grid tenors",
                expiries.len(),
                tenors.len(),
            ));
        }
        if volatilities.len() != expiries.len() {
            return Err(ConfigurationError::length_mismatch(
                "swaption grid volatilities",
                expiries.len(),
                volatilities.len(),
            ));
        }
        Ok(Self {
            expiries,
            tenors,
            volatilities,
        })
    }

    /// Create a grid from a matrix with one row per expiry and one column
    /// per tenor.
    ///
    /// # Errors
    ///
    /// `ConfigurationError::LengthMismatch` if the row count or a row
    /// length does not match.
    pub fn from_matrix(
        expiries: &[Tenor],
        tenors: &[Tenor],
        matrix: &[Vec<f64>],
    ) -> Result<Self, ConfigurationError> {
        if matrix.len() != expiries.len() {
            return Err(ConfigurationError::length_mismatch(
                "swaption grid rows",
                expiries.len(),
                matrix.len(),
            ));
        }
        let size = expiries.len() * tenors.len();
        let mut grid = Self {
            expiries: Vec::with_capacity(size),
            tenors: Vec::with_capacity(size),
            volatilities: Vec::with_capacity(size),
        };
        for (expiry, row) in expiries.iter().zip(matrix) {
            if row.len() != tenors.len() {
                return Err(ConfigurationError::length_mismatch(
                    format!("swaption grid row {expiry}"),
                    tenors.len(),
                    row.len(),
                ));
            }
            for (tenor, &vol) in tenors.iter().zip(row) {
                grid.expiries.push(*expiry);
                grid.tenors.push(*tenor);
                grid.volatilities.push(vol);
            }
        }
        Ok(grid)
    }

    /// Number of quotes.
    pub fn len(&self) -> usize {
        self.volatilities.len()
    }

    /// Whether the grid has no quotes.
    pub fn is_empty(&self) -> bool {
        self.volatilities.is_empty()
    }

    /// Quotes as `(expiry, tenor, normal volatility)`.
    pub fn points(&self) -> impl Iterator<Item = (Tenor, Tenor, f64)> + '_ {
        self.expiries
            .iter()
            .zip(&self.tenors)
            .zip(&self.volatilities)
            .map(|((e, t), v)| (*e, *t, *v))
    }
}
