//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. The helpers here build
//! the market and calibration pipeline the commands share.

pub mod calibrate;
pub mod check;
pub mod ladder;
pub mod value;

use std::sync::Arc;

use anyhow::Context;
use arrears_core::market_data::YieldCurve;
use arrears_optimiser::bootstrapping::OisBootstrapper;
use arrears_optimiser::calibration::{CalibratedModel, CalibrationPipeline, HullWhiteCalibrationPipeline};
use arrears_optimiser::market_data;
use tracing::info;

use crate::config::ArrearsConfig;

/// Discount curve stripped from the built-in EUR OIS quotes.
pub(crate) fn eur_curve() -> anyhow::Result<Arc<dyn YieldCurve<f64>>> {
    let quotes = market_data::eur_ois_quotes().context("built-in OIS quotes")?;
    let result = OisBootstrapper::default()
        .bootstrap(&quotes)
        .context("OIS curve bootstrap failed")?;
    info!(
        pillars = result.pillars.len(),
        max_residual = result.max_residual(),
        "EUR OIS curve ready"
    );
    Ok(Arc::new(result.curve))
}

pub(crate) fn pipeline(config: &ArrearsConfig) -> anyhow::Result<HullWhiteCalibrationPipeline> {
    Ok(HullWhiteCalibrationPipeline::new(
        config.calibration.clone(),
        config.simulation.to_config()?,
        config.reference_date,
    ))
}

/// Calibrate the Hull-White model to the built-in EUR swaption grid.
pub(crate) fn calibrate_eur(
    pipeline: &HullWhiteCalibrationPipeline,
    curve: Arc<dyn YieldCurve<f64>>,
) -> anyhow::Result<CalibratedModel> {
    let grid = market_data::eur_swaption_grid().context("built-in swaption grid")?;
    pipeline
        .calibrate(&grid, curve)
        .context("Hull-White calibration failed")
}
