//! Check command implementation
//!
//! Validates the effective configuration and the built-in market data
//! without running a simulation.

use std::io::Write;

use anyhow::Context;
use arrears_optimiser::market_data;
use tracing::info;

use crate::commands::{eur_curve, pipeline};
use crate::config::ArrearsConfig;

/// Run the check command
pub fn run<W: Write>(config: &ArrearsConfig, out: &mut W) -> anyhow::Result<()> {
    config.validate().context("invalid configuration")?;
    let pipeline = pipeline(config)?;

    let curve = eur_curve()?;
    let grid = market_data::eur_swaption_grid().context("built-in swaption grid")?;
    let items = pipeline
        .calibration_items(&grid)
        .context("swaption grid does not convert to calibration instruments")?;
    let rows = config
        .ladder
        .begin_times(config.simulation.horizon)
        .len();

    writeln!(out, "{}", toml::to_string_pretty(config)?)?;
    writeln!(out, "discount factor at 10Y   {:.6}", curve.discount_factor(10.0)?)?;
    writeln!(out, "calibration instruments  {}", items.len())?;
    writeln!(out, "ladder rows              {rows}")?;
    writeln!(out, "configuration OK")?;

    info!("Configuration check passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration_passes() {
        let mut out = Vec::new();
        run(&ArrearsConfig::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("calibration instruments  224"));
        assert!(text.contains("ladder rows              23"));
        assert!(text.ends_with("configuration OK\n"));
    }

    #[test]
    fn test_invalid_configuration_fails() {
        let mut config = ArrearsConfig::default();
        config.calibration.max_iterations = 0;
        let mut out = Vec::new();
        let err = run(&config, &mut out).unwrap_err();
        assert!(err.to_string().contains("invalid configuration"));
        assert!(out.is_empty());
    }
}
