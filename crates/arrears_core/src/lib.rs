//! # arrears_core: Foundation for Backward-Looking Rate Valuation
//!
//! ## Layer 1 (Foundation) Role
//!
//! arrears_core is the bottom layer of the workspace and provides:
//! - Monte-Carlo path ensembles with immutable elementwise algebra (`ensemble`)
//! - The error taxonomy shared by every layer (`types::error`)
//! - Root-finding and nonlinear least-squares solvers (`math::solvers`)
//! - Discount curves: flat and log-linear interpolated (`market_data::curves`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other arrears_* crates and only minimal
//! external dependencies:
//! - num-traits: generic floating-point arithmetic for curves
//! - thiserror: error derivation
//! - serde: serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use arrears_core::ensemble::PathEnsemble;
//! use arrears_core::market_data::curves::{FlatCurve, YieldCurve};
//!
//! let rates = PathEnsemble::from_paths(vec![0.01, 0.02, 0.03]);
//! let payoff = rates.sub_scalar(0.015).floor(0.0);
//! assert!((payoff.expectation() - 0.02 / 3.0).abs() < 1e-12);
//!
//! let curve = FlatCurve::new(0.01_f64);
//! let df = curve.discount_factor(1.0).unwrap();
//! assert!((df - (-0.01_f64).exp()).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): serialisation for solver errors and curve types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod ensemble;
pub mod market_data;
pub mod math;
pub mod types;
