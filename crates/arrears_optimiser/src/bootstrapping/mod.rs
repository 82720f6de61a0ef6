//! Discount curve bootstrapping from OIS par rates.
//!
//! ## Architecture
//!
//! - [`Tenor`]: market offset codes (`1D`, `3M`, `10Y`) and calendar helpers
//! - [`OisQuote`]: a par rate with its payment schedule
//! - [`OisBootstrapper`]: sequential stripping into an
//!   [`InterpolatedCurve`](arrears_core::market_data::InterpolatedCurve)

mod engine;
mod error;
mod instrument;
mod tenor;

pub use engine::{BootstrapResult, OisBootstrapper};
pub use error::BootstrapError;
pub use instrument::{OisQuote, PaymentFrequency};
pub use tenor::{act_365, roll_following, Tenor, TenorUnit};
