//! Monte Carlo term-structure simulation.
//!
//! # Architecture
//!
//! ```text
//! SimulationProvider      (query trait used by the valuators)
//! └── HullWhiteSimulation
//!     ├── SimulationConfig  (paths, grid, seed, antithetic)
//!     ├── HullWhiteParams   (a, σ)
//!     └── PricerRng         (one stream per block of paths)
//! ```
//!
//! Simulation happens once, at construction. All queries afterwards read
//! immutable path storage and return fresh [`PathEnsemble`] values, so a
//! provider can be shared across threads behind an `Arc`.
//!
//! [`PathEnsemble`]: arrears_core::ensemble::PathEnsemble

mod config;
mod hull_white;
mod provider;

pub use config::{SimulationConfig, SimulationConfigBuilder, GRID_TOLERANCE, MAX_PATHS, MAX_STEPS};
pub use hull_white::HullWhiteSimulation;
pub use provider::SimulationProvider;
