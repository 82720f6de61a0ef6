//! Root-finding and optimisation solvers.
//!
//! ## Available Solvers
//!
//! - [`BrentSolver`]: bracketing root finder used for implied volatility
//!   inversion and curve bootstrapping
//! - [`LevenbergMarquardtSolver`]: nonlinear least squares used for model
//!   calibration, with optional box constraints
//!
//! ## Examples
//!
//! ```
//! use arrears_core::math::solvers::{BrentSolver, SolverConfig};
//!
//! let solver = BrentSolver::new(SolverConfig::default());
//! let root = solver.find_root(|x| x * x - 2.0, 0.0, 2.0).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```
//!
//! ```
//! use arrears_core::math::solvers::LevenbergMarquardtSolver;
//!
//! let residuals = |p: &[f64]| vec![p[0] - 2.0, p[1] - 3.0];
//! let result = LevenbergMarquardtSolver::with_defaults()
//!     .solve(residuals, vec![0.0, 0.0])
//!     .unwrap();
//! assert!(result.converged);
//! assert!((result.params[0] - 2.0).abs() < 1e-6);
//! ```

mod brent;
mod config;
mod levenberg_marquardt;

pub use brent::BrentSolver;
pub use config::SolverConfig;
pub use levenberg_marquardt::{LMConfig, LMResult, LevenbergMarquardtSolver};
