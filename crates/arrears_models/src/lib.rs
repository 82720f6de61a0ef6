//! # arrears_models: Products, Analytics and Model Calibration
//!
//! ## Layer 2 (Models) Role
//!
//! arrears_models sits on top of [`arrears_core`] and provides:
//! - Product definitions: [`instruments::CapletSpec`], [`instruments::ValueUnit`],
//!   [`instruments::SwaptionSpec`]
//! - Closed-form Black and Bachelier formulas and their implied-volatility
//!   inverters ([`analytical::ImpliedVolatilityInverter`])
//! - Hull-White one-factor analytics: conditional bond prices and the
//!   normal swaption volatility approximation ([`models::HullWhiteParams`])
//! - Calibration of Hull-White parameters to a swaption volatility grid
//!   ([`calibration::HullWhiteCalibrator`])
//!
//! ## Architecture
//!
//! ```text
//! arrears_core (ensembles, errors, solvers, curves)
//!        │
//!        ▼
//! arrears_models ──► analytical   (Black, Bachelier, inverters)
//!                ──► instruments  (caplet, swaption)
//!                ──► models       (Hull-White)
//!                ──► calibration  (items, calibrator, report)
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): serialisation for product specs and calibration output

#![warn(missing_docs)]

pub mod analytical;
pub mod calibration;
pub mod instruments;
pub mod models;
