//! Closed-form option formulas and implied volatility inversion.
//!
//! This module provides:
//! - Bachelier model for normal dynamics (rates can be negative)
//! - Black model for lognormal dynamics on a positive forward
//! - [`ImpliedVolatilityInverter`]: price to volatility in either convention
//!
//! Prices are undiscounted unless an annuity is supplied; the inverters
//! take the annuity (discount factor times accrual) explicitly.

pub mod bachelier;
pub mod black;
pub mod distributions;
pub mod error;
pub mod implied;

pub use bachelier::Bachelier;
pub use black::Black;
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
pub use implied::{AnalyticInverter, ImpliedVolatilityInverter};
