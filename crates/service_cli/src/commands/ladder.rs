//! Ladder command implementation
//!
//! Runs the consistency ladder on the calibrated and the uncalibrated
//! Hull-White simulation and prints both, optionally followed by the
//! average simulated rates.

use std::io::Write;

use arrears_pricing::consistency::{ConsistencyHarness, MarketVolTable};
use tracing::{info, warn};

use crate::commands::{calibrate_eur, eur_curve, pipeline};
use crate::config::ArrearsConfig;
use crate::report::{render, DiagnosticRow, LadderRow, OutputFormat};

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}%", 100.0 * v))
}

/// Run the ladder command
pub fn run(config: &ArrearsConfig, format: OutputFormat, diagnostics: bool) -> anyhow::Result<()> {
    info!("Starting consistency ladder...");
    let curve = eur_curve()?;
    let pipeline = pipeline(config)?;
    let calibrated = calibrate_eur(&pipeline, curve.clone())?;
    let uncalibrated = pipeline.uncalibrated(curve)?;

    let harness = ConsistencyHarness::new(config.ladder.clone(), MarketVolTable::builtin());
    let comparison = harness.run_pair(calibrated.provider.as_ref(), &uncalibrated)?;

    let failures = comparison.calibrated.failure_count() + comparison.uncalibrated.failure_count();
    if failures > 0 {
        warn!(failures, "Some ladder rows could not be valued");
    }

    let mut rows = LadderRow::from_report("calibrated", &comparison.calibrated);
    rows.extend(LadderRow::from_report("uncalibrated", &comparison.uncalibrated));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render(&mut out, format, &rows)?;

    if format == OutputFormat::Table {
        writeln!(out)?;
        writeln!(
            out,
            "mean |rel error|  calibrated {}  uncalibrated {}",
            percent(comparison.calibrated_error()),
            percent(comparison.uncalibrated_error())
        )?;
        if let Some(improves) = comparison.calibration_improves() {
            writeln!(out, "calibration improves the ladder: {improves}")?;
        }
    }

    if diagnostics {
        let records = harness.rate_diagnostics(calibrated.provider.as_ref());
        let rows: Vec<DiagnosticRow> = records.iter().map(DiagnosticRow::from).collect();
        if format == OutputFormat::Table {
            writeln!(out)?;
        }
        render(&mut out, format, &rows)?;
    }

    info!("Consistency ladder complete");
    Ok(())
}
