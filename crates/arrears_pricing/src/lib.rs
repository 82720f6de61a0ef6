//! # arrears_pricing: Simulation, Valuation and Consistency Checks
//!
//! ## Layer 3 (Engine) Role
//!
//! arrears_pricing turns model parameters into simulated term structures and
//! values caplets on them:
//! - Monte Carlo simulation behind the [`mc::SimulationProvider`] trait, with
//!   the Hull-White implementation [`mc::HullWhiteSimulation`]
//! - Caplet valuation on backward-looking and classical rates
//!   ([`valuation::BackwardCapletValuator`], [`valuation::ClassicalCapletValuator`])
//! - The consistency harness comparing both conventions with the analytic
//!   convexity ratio and market quotes ([`consistency::ConsistencyHarness`])
//!
//! ## Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use arrears_core::market_data::FlatCurve;
//! use arrears_models::instruments::CapletSpec;
//! use arrears_models::models::HullWhiteParams;
//! use arrears_pricing::mc::{HullWhiteSimulation, SimulationConfig};
//! use arrears_pricing::valuation::{
//!     BackwardCapletValuator, CapletValuator, ClassicalCapletValuator,
//! };
//!
//! let config = SimulationConfig::builder()
//!     .n_paths(2000)
//!     .horizon(2.0)
//!     .seed(3434)
//!     .build()
//!     .unwrap();
//! let model = HullWhiteSimulation::new(
//!     HullWhiteParams::new(0.05, 0.005).unwrap(),
//!     Arc::new(FlatCurve::new(0.005)),
//!     config,
//! )
//! .unwrap();
//!
//! let caplet = CapletSpec::caplet(1.0, 0.5, 0.004783).unwrap();
//! let backward = BackwardCapletValuator::default().value(0.0, &caplet, &model).unwrap();
//! let classical = ClassicalCapletValuator::default().value(0.0, &caplet, &model).unwrap();
//! let ratio = backward.expectation() / classical.expectation();
//! assert!(ratio > 1.0 && ratio < 1.3);
//! ```
//!
//! ## Concurrency
//!
//! Paths are generated in parallel with rayon at construction. Valuation
//! and the harness are single-threaded and only read the simulation, so
//! independent valuations may run concurrently against one provider.
//!
//! ## Feature Flags
//!
//! - `serde` (default): serialisation for configurations and records

#![warn(missing_docs)]

pub mod consistency;
pub mod mc;
pub mod rng;
pub mod valuation;
