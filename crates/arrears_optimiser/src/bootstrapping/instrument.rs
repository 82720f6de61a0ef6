//! OIS par quotes used to strip the discount curve.

use super::error::BootstrapError;
use super::tenor::Tenor;

/// Fixed-leg payment frequency of an OIS quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaymentFrequency {
    /// One payment at maturity
    #[default]
    Tenor,
    /// Annual payments rolled back from maturity, short first period
    Annual,
}

/// Par rate of an overnight index swap.
///
/// # Examples
///
/// ```
/// use arrears_optimiser::bootstrapping::{OisQuote, PaymentFrequency};
///
/// let quote = OisQuote::parse("18M", -0.00608, PaymentFrequency::Annual).unwrap();
/// assert_eq!(quote.maturity(), 1.5);
/// assert_eq!(quote.payment_times(), vec![0.5, 1.5]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OisQuote {
    tenor: Tenor,
    rate: f64,
    frequency: PaymentFrequency,
}

impl OisQuote {
    /// Create a quote.
    ///
    /// # Errors
    ///
    /// `BootstrapError::InvalidRate` if `rate` is not finite.
    pub fn new(tenor: Tenor, rate: f64, frequency: PaymentFrequency) -> Result<Self, BootstrapError> {
        if !rate.is_finite() {
            return Err(BootstrapError::InvalidRate {
                tenor: tenor.to_string(),
                rate,
            });
        }
        Ok(Self {
            tenor,
            rate,
            frequency,
        })
    }

    /// Create a quote from a tenor code such as `"3M"`.
    ///
    /// # Errors
    ///
    /// `BootstrapError::InvalidTenor` for a malformed code, otherwise as
    /// [`OisQuote::new`].
    pub fn parse(code: &str, rate: f64, frequency: PaymentFrequency) -> Result<Self, BootstrapError> {
        Self::new(code.parse()?, rate, frequency)
    }

    /// Quoted tenor.
    pub fn tenor(&self) -> Tenor {
        self.tenor
    }

    /// Par rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Payment frequency.
    pub fn frequency(&self) -> PaymentFrequency {
        self.frequency
    }

    /// Maturity in years.
    pub fn maturity(&self) -> f64 {
        self.tenor.year_fraction()
    }

    /// Fixed-leg payment times in increasing order, ending at maturity.
    pub fn payment_times(&self) -> Vec<f64> {
        let maturity = self.maturity();
        match self.frequency {
            PaymentFrequency::Tenor => vec![maturity],
            PaymentFrequency::Annual => {
                let mut times = Vec::new();
                let mut t = maturity;
                // Stubs shorter than a day are merged into the next period
                while t > 1.0 / 365.0 - 1e-12 {
                    times.push(t);
                    t -= 1.0;
                }
                times.reverse();
                times
            }
        }
    }

    /// Par residual `rate · annuity - (1 - P(T))` for a discount function.
    pub fn par_residual<F>(&self, discount: F) -> f64
    where
        F: Fn(f64) -> f64,
    {
        let mut previous = 0.0;
        let mut annuity = 0.0;
        for t in self.payment_times() {
            annuity += (t - previous) * discount(t);
            previous = t;
        }
        self.rate * annuity - (1.0 - discount(self.maturity()))
    }
}
