//! Core error types.
//!
//! This module provides:
//! - `error`: the error taxonomy shared by valuation, simulation and calibration
//!
//! # Re-exports
//!
//! [`ConfigurationError`], [`CalculationError`], [`PricingError`] and
//! [`SolverError`] are re-exported at module level.

pub mod error;

pub use error::{CalculationError, ConfigurationError, PricingError, SolverError};
