//! Calibration targets.

use arrears_core::types::ConfigurationError;

use crate::instruments::SwaptionSpec;

/// An at-the-money swaption and the normal volatility it should reprice to.
///
/// # Examples
/// ```
/// use arrears_models::calibration::CalibrationItem;
///
/// let item = CalibrationItem::from_quote("1Y\t5Y", 1.02, 4.98, 0.5, 0.0049).unwrap();
/// assert_eq!(item.swaption().expiry(), 1.0);
/// assert_eq!(item.swaption().tenor(), 5.0);
/// assert_eq!(item.label(), "1Y\t5Y");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationItem {
    label: String,
    swaption: SwaptionSpec,
    target_volatility: f64,
    weight: f64,
}

/// Round to the nearest quarter year.
#[inline]
pub fn round_to_quarter(years: f64) -> f64 {
    (years / 0.25).round() * 0.25
}

impl CalibrationItem {
    /// Create an item with unit weight.
    pub fn new(label: impl Into<String>, swaption: SwaptionSpec, target_volatility: f64) -> Self {
        Self {
            label: label.into(),
            swaption,
            target_volatility,
            weight: 1.0,
        }
    }

    /// Create an item from a quote whose expiry and tenor are year
    /// fractions; both are rounded to the nearest quarter.
    ///
    /// # Errors
    ///
    /// `ConfigurationError::InvalidParameter` if the rounded expiry is
    /// below a quarter, the rounded tenor spans no period, or the target is
    /// not a positive finite volatility.
    pub fn from_quote(
        label: impl Into<String>,
        expiry: f64,
        tenor: f64,
        period_length: f64,
        target_volatility: f64,
    ) -> Result<Self, ConfigurationError> {
        if !(target_volatility > 0.0) || !target_volatility.is_finite() {
            return Err(ConfigurationError::invalid_parameter(
                "target_volatility",
                target_volatility,
                "must be finite and positive",
            ));
        }
        let expiry = round_to_quarter(expiry);
        if expiry < 0.25 {
            return Err(ConfigurationError::invalid_parameter(
                "expiry",
                expiry,
                "rounds below one quarter",
            ));
        }
        let swaption = SwaptionSpec::new(expiry, round_to_quarter(tenor), period_length)?;
        Ok(Self::new(label, swaption, target_volatility))
    }

    /// Same item with a different weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Display label, `"<expiry>\t<tenor>"` for grid quotes.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Target swaption.
    pub fn swaption(&self) -> &SwaptionSpec {
        &self.swaption
    }

    /// Target normal volatility.
    pub fn target_volatility(&self) -> f64 {
        self.target_volatility
    }

    /// Residual weight.
    pub fn weight(&self) -> f64 {
        self.weight
    }
}
