//! Value command implementation
//!
//! Values one caplet or floorlet at time zero on the calibrated (or
//! uncalibrated) Hull-White simulation.

use arrears_models::instruments::{CapletSpec, ValueUnit};
use arrears_pricing::mc::SimulationProvider;
use arrears_pricing::valuation::{
    BackwardCapletValuator, CapletValuator, ClassicalCapletValuator, RateConvention,
};
use clap::{Args, ValueEnum};
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use crate::commands::{calibrate_eur, eur_curve, pipeline};
use crate::config::ArrearsConfig;
use crate::error::CliError;
use crate::report::{rate, render, time, OutputFormat};

/// Rate the caplet is written on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ConventionArg {
    #[default]
    Backward,
    Classical,
}

impl From<ConventionArg> for RateConvention {
    fn from(arg: ConventionArg) -> Self {
        match arg {
            ConventionArg::Backward => RateConvention::Backward,
            ConventionArg::Classical => RateConvention::Classical,
        }
    }
}

/// Contract and model selection for the value command.
#[derive(Debug, Clone, Args)]
pub struct ValueArgs {
    /// Start of the accrual period in years
    #[arg(short, long)]
    pub maturity: f64,

    /// Strike (defaults to the ladder strike)
    #[arg(short, long, allow_negative_numbers = true)]
    pub strike: Option<f64>,

    /// Accrual period in years (defaults to the ladder period)
    #[arg(short, long)]
    pub period: Option<f64>,

    /// Value a floorlet instead of a caplet
    #[arg(long)]
    pub floorlet: bool,

    /// Value unit (VALUE, LOGNORMAL_VOLATILITY, NORMAL_VOLATILITY)
    #[arg(short, long, default_value = "NORMAL_VOLATILITY")]
    pub unit: String,

    /// Rate convention
    #[arg(long, value_enum, default_value_t = ConventionArg::Backward)]
    pub convention: ConventionArg,

    /// Use the initial guess instead of calibrating
    #[arg(long)]
    pub uncalibrated: bool,
}

impl ValueArgs {
    /// The contract described by the arguments.
    pub fn caplet(&self, config: &ArrearsConfig) -> Result<CapletSpec, CliError> {
        let unit: ValueUnit = self.unit.parse()?;
        let period = self.period.unwrap_or(config.ladder.period_length);
        let strike = self.strike.unwrap_or(config.ladder.strike);
        Ok(CapletSpec::new(
            self.maturity,
            period,
            strike,
            period,
            self.floorlet,
            unit,
        )?)
    }
}

fn standard_error(value: &Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |e| format!("{e:.2e}"))
}

fn precise(value: &f64) -> String {
    format!("{value:.8}")
}

/// Result of the value command.
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct ValueRow {
    pub convention: &'static str,
    pub kind: &'static str,
    #[tabled(display_with = "time")]
    pub maturity: f64,
    #[tabled(rename = "payment", display_with = "time")]
    pub payment_date: f64,
    #[tabled(display_with = "rate")]
    pub strike: f64,
    pub unit: &'static str,
    #[tabled(display_with = "precise")]
    pub value: f64,
    #[tabled(rename = "std_err", display_with = "standard_error")]
    pub standard_error: Option<f64>,
}

/// Run the value command
pub fn run(config: &ArrearsConfig, format: OutputFormat, args: &ValueArgs) -> anyhow::Result<()> {
    let caplet = args.caplet(config)?;
    info!(
        maturity = caplet.maturity(),
        strike = caplet.strike(),
        unit = %caplet.value_unit(),
        "Starting valuation..."
    );

    let curve = eur_curve()?;
    let pipeline = pipeline(config)?;
    let model: Box<dyn SimulationProvider> = if args.uncalibrated {
        Box::new(pipeline.uncalibrated(curve)?)
    } else {
        calibrate_eur(&pipeline, curve)?.provider
    };

    let convention = RateConvention::from(args.convention);
    let valuator: Box<dyn CapletValuator> = match convention {
        RateConvention::Backward => Box::new(BackwardCapletValuator::default()),
        RateConvention::Classical => Box::new(ClassicalCapletValuator::default()),
    };
    let values = valuator.value(0.0, &caplet, model.as_ref())?;

    let row = ValueRow {
        convention: convention.name(),
        kind: if caplet.is_floorlet() { "floorlet" } else { "caplet" },
        maturity: caplet.maturity(),
        payment_date: caplet.payment_date(),
        strike: caplet.strike(),
        unit: caplet.value_unit().name(),
        value: values.expectation(),
        standard_error: (!values.is_deterministic()).then(|| values.standard_error()),
    };
    render(&mut std::io::stdout().lock(), format, &[row])?;

    info!("Valuation complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(unit: &str) -> ValueArgs {
        ValueArgs {
            maturity: 2.0,
            strike: None,
            period: None,
            floorlet: true,
            unit: unit.to_string(),
            convention: ConventionArg::Backward,
            uncalibrated: true,
        }
    }

    #[test]
    fn test_caplet_defaults_from_ladder() {
        let config = ArrearsConfig::default();
        let caplet = args("value").caplet(&config).unwrap();
        assert_eq!(caplet.strike(), config.ladder.strike);
        assert_eq!(caplet.payment_date(), 2.5);
        assert_eq!(caplet.value_unit(), ValueUnit::Value);
        assert!(caplet.is_floorlet());
    }

    #[test]
    fn test_unknown_unit_is_rejected() {
        let err = args("basis_points").caplet(&ArrearsConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::Configuration(_)));
    }

    #[test]
    fn test_convention_mapping() {
        assert_eq!(RateConvention::from(ConventionArg::Classical), RateConvention::Classical);
        assert_eq!(RateConvention::from(ConventionArg::default()), RateConvention::Backward);
    }
}
