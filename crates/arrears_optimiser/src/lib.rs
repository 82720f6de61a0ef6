//! # arrears_optimiser
//!
//! Curve bootstrapping and model calibration for arrears.
//!
//! This crate solves the inverse problems upstream of valuation: it strips a
//! discount curve from OIS par rates and fits a Hull-White model to
//! swaption volatilities, returning a ready-to-use
//! [`SimulationProvider`](arrears_pricing::mc::SimulationProvider).
//!
//! ## Architecture Position
//!
//! Layer 4. Depends on `arrears_core` (L1), `arrears_models` (L2) and
//! `arrears_pricing` (L3) for the simulation it hands back.
//!
//! ## Modules
//!
//! - `bootstrapping`: tenor codes, OIS quotes and the sequential stripper
//! - `calibration`: swaption grids and the calibration pipeline
//! - `market_data`: the built-in EUR snapshot
//!
//! ## Example
//!
//! ```rust
//! use arrears_core::market_data::YieldCurve;
//! use arrears_optimiser::bootstrapping::OisBootstrapper;
//! use arrears_optimiser::market_data;
//!
//! let quotes = market_data::eur_ois_quotes().unwrap();
//! let result = OisBootstrapper::default().bootstrap(&quotes).unwrap();
//!
//! // Negative short rates: discount factors above one
//! assert!(result.curve.discount_factor(5.0).unwrap() > 1.0);
//! ```

pub mod bootstrapping;
pub mod calibration;
pub mod market_data;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bootstrapping::*;
    pub use crate::calibration::*;
}
