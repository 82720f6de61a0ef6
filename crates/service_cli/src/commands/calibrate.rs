//! Calibrate command implementation
//!
//! Bootstraps the EUR OIS curve, calibrates Hull-White to the EUR swaption
//! grid and prints the calibration report.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::commands::{calibrate_eur, eur_curve, pipeline};
use crate::config::ArrearsConfig;
use crate::report::{render, CalibrationRow, OutputFormat};

/// Run the calibrate command
pub fn run(config: &ArrearsConfig, format: OutputFormat, output: Option<&Path>) -> anyhow::Result<()> {
    info!("Starting calibration...");
    let curve = eur_curve()?;
    let pipeline = pipeline(config)?;
    let model = calibrate_eur(&pipeline, curve)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render(&mut out, format, &CalibrationRow::from_report(&model.report))?;

    if format == OutputFormat::Table {
        writeln!(out)?;
        for (name, value) in &model.parameters {
            writeln!(out, "{name:<16} {value:.6}")?;
        }
        writeln!(out, "{:<16} {}", "iterations", model.iterations)?;
        writeln!(out, "{:<16} {:.3e}", "mean_deviation", model.report.mean_deviation)?;
        writeln!(out, "{:<16} {:.3e}", "rms_error", model.report.rms_error)?;
        writeln!(out, "{:<16} {}", "acceptable", model.report.is_acceptable(1e-2))?;
    }

    if let Some(path) = output {
        let mut parameters = serde_json::Map::new();
        for (name, value) in &model.parameters {
            parameters.insert((*name).to_string(), serde_json::json!(value));
        }
        let document = serde_json::json!({
            "reference_date": config.reference_date,
            "parameters": parameters,
            "iterations": model.iterations,
            "mean_deviation": model.report.mean_deviation,
            "rms_error": model.report.rms_error,
        });
        std::fs::write(path, serde_json::to_string_pretty(&document)?)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("Calibrated parameters written to: {}", path.display());
    }

    info!("Calibration complete");
    Ok(())
}
