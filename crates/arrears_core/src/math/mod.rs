//! Numerical routines.
//!
//! - [`solvers`]: Brent root finding and Levenberg-Marquardt least squares

pub mod solvers;
