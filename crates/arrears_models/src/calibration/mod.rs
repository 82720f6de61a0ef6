//! Hull-White calibration to at-the-money swaption normal volatilities.
//!
//! - [`CalibrationItem`]: one swaption and its target volatility
//! - [`HullWhiteCalibrator`]: Levenberg-Marquardt fit of (a, σ), with
//!   residuals evaluated in parallel on a dedicated thread pool
//! - [`CalibrationReport`]: per-item model, target and deviation
//! - [`CalibrationError`]: failures, including [`CalibrationFailure`]
//!
//! # Architecture
//!
//! ```text
//! Vec<CalibrationItem> ──► HullWhiteCalibrator ──► HullWhiteCalibration
//!                              │                     ├─ params
//!                              ▼                     └─ CalibrationReport
//!                    LevenbergMarquardtSolver
//!                    (residuals on rayon pool)
//! ```

pub mod error;
pub mod hull_white;
pub mod item;
pub mod report;

pub use error::{CalibrationError, CalibrationFailure};
pub use hull_white::{HullWhiteCalibration, HullWhiteCalibrationConfig, HullWhiteCalibrator};
pub use item::{round_to_quarter, CalibrationItem};
pub use report::{CalibrationReport, CalibrationReportEntry};
