//! Average simulated rates per year of the horizon.

use arrears_core::ensemble::PathEnsemble;
use arrears_core::types::CalculationError;
use tracing::warn;

use crate::mc::SimulationProvider;

/// Average backward and classical rate for one accrual period.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RateDiagnosticRecord {
    /// Start of the accrual period
    pub begin_time: f64,
    /// End of the accrual period
    pub end_time: f64,
    /// `E[B(b, b+τ; b+τ)]`, `None` if the lookup failed
    pub average_backward_rate: Option<f64>,
    /// `E[L(b; b, b+τ)]`, `None` if the lookup failed
    pub average_libor_rate: Option<f64>,
}

fn average(
    rate: Result<PathEnsemble, CalculationError>,
    kind: &str,
    begin_time: f64,
) -> Option<f64> {
    match rate {
        Ok(rate) => Some(rate.expectation()),
        Err(error) => {
            warn!(%error, begin_time, kind, "Rate diagnostic failed");
            None
        }
    }
}

/// Average rates for periods starting at `0, 1, 2, …` below the horizon.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use arrears_core::market_data::FlatCurve;
/// use arrears_models::models::HullWhiteParams;
/// use arrears_pricing::consistency::rate_diagnostics;
/// use arrears_pricing::mc::{HullWhiteSimulation, SimulationConfig};
///
/// let config = SimulationConfig::builder().n_paths(8).horizon(3.0).build().unwrap();
/// let model = HullWhiteSimulation::new(
///     HullWhiteParams::ho_lee(0.0).unwrap(),
///     Arc::new(FlatCurve::new(0.01)),
///     config,
/// )
/// .unwrap();
///
/// let rows = rate_diagnostics(&model, 0.5);
/// assert_eq!(rows.len(), 3);
/// assert!(rows.iter().all(|r| r.average_libor_rate.is_some()));
/// ```
pub fn rate_diagnostics(
    model: &dyn SimulationProvider,
    period_length: f64,
) -> Vec<RateDiagnosticRecord> {
    let horizon = model.time_horizon();
    let mut rows = Vec::new();
    let mut begin_time = 0.0;
    while begin_time < horizon {
        let end_time = begin_time + period_length;
        rows.push(RateDiagnosticRecord {
            begin_time,
            end_time,
            average_backward_rate: average(
                model.backward_rate(end_time, begin_time, end_time),
                "backward",
                begin_time,
            ),
            average_libor_rate: average(
                model.libor_rate(begin_time, begin_time, end_time),
                "libor",
                begin_time,
            ),
        });
        begin_time += 1.0;
    }
    rows
}
