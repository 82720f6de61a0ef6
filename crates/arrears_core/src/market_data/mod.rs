//! Market data structures.
//!
//! All curve types are generic over `T: Float` so that the same code serves
//! plain `f64` valuation and any dual-number type a caller may plug in.
//!
//! # Components
//!
//! - [`curves`]: the [`YieldCurve`] trait, [`FlatCurve`] and the log-linear
//!   [`InterpolatedCurve`]
//! - [`error`]: [`MarketDataError`]
//!
//! # Example
//!
//! ```
//! use arrears_core::market_data::{FlatCurve, YieldCurve};
//!
//! let curve = FlatCurve::new(-0.005_f64);
//! let df = curve.discount_factor(2.0).unwrap();
//! assert!(df > 1.0);
//! ```

pub mod curves;
pub mod error;

pub use curves::{FlatCurve, InterpolatedCurve, YieldCurve};
pub use error::MarketDataError;
