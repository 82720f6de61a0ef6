//! Report rendering for command output.
//!
//! Library crates return records; this module flattens them into rows and
//! writes them as an aligned table, CSV or JSON.

use std::io::Write;

use arrears_models::calibration::CalibrationReport;
use arrears_pricing::consistency::{ConsistencyReport, ConsistencyRow, RateDiagnosticRecord};
use clap::ValueEnum;
use serde::Serialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

/// Output format of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

pub(crate) fn time(value: &f64) -> String {
    format!("{value:.2}")
}

pub(crate) fn rate(value: &f64) -> String {
    format!("{value:.6}")
}

fn vol(value: &Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.6}"))
}

fn ratio(value: &Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.4}"))
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// One ladder point of one model.
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct LadderRow {
    pub model: &'static str,
    #[tabled(rename = "begin", display_with = "time")]
    pub begin_time: f64,
    #[tabled(rename = "end", display_with = "time")]
    pub end_time: f64,
    #[tabled(rename = "backward", display_with = "vol")]
    pub backward_vol: Option<f64>,
    #[tabled(rename = "classical", display_with = "vol")]
    pub classical_vol: Option<f64>,
    #[tabled(rename = "analytic", display_with = "ratio")]
    pub analytic_ratio: Option<f64>,
    #[tabled(rename = "mc", display_with = "ratio")]
    pub mc_ratio: Option<f64>,
    #[tabled(rename = "rel_err", display_with = "ratio")]
    pub rel_error: Option<f64>,
    #[tabled(rename = "market", display_with = "vol")]
    pub market_vol: Option<f64>,
    #[tabled(rename = "mkt_ratio", display_with = "ratio")]
    pub market_ratio: Option<f64>,
    #[tabled(rename = "mkt_err", display_with = "ratio")]
    pub market_error: Option<f64>,
    #[tabled(display_with = "text")]
    pub error: Option<String>,
}

impl LadderRow {
    /// Rows of a consistency report, tagged with `model`.
    pub fn from_report(model: &'static str, report: &ConsistencyReport) -> Vec<Self> {
        report
            .rows
            .iter()
            .map(|row| match row {
                ConsistencyRow::Computed(record) => Self {
                    model,
                    begin_time: record.begin_time,
                    end_time: record.end_time,
                    backward_vol: Some(record.backward_vol),
                    classical_vol: Some(record.classical_vol),
                    analytic_ratio: Some(record.analytic_ratio),
                    mc_ratio: Some(record.mc_ratio),
                    rel_error: Some(record.rel_error),
                    market_vol: record.market_vol,
                    market_ratio: record.market_ratio,
                    market_error: record.market_error,
                    error: None,
                },
                ConsistencyRow::Failed {
                    begin_time,
                    end_time,
                    error,
                } => Self {
                    model,
                    begin_time: *begin_time,
                    end_time: *end_time,
                    backward_vol: None,
                    classical_vol: None,
                    analytic_ratio: None,
                    mc_ratio: None,
                    rel_error: None,
                    market_vol: None,
                    market_ratio: None,
                    market_error: None,
                    error: Some(error.to_string()),
                },
            })
            .collect()
    }
}

/// Model against target volatility for one calibration instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct CalibrationRow {
    pub expiry: String,
    pub tenor: String,
    #[tabled(rename = "model", display_with = "vol")]
    pub model_vol: Option<f64>,
    #[tabled(rename = "target", display_with = "vol")]
    pub target_vol: Option<f64>,
    #[tabled(display_with = "vol")]
    pub deviation: Option<f64>,
}

impl CalibrationRow {
    /// Rows of a calibration report; failed instruments have no model value.
    pub fn from_report(report: &CalibrationReport) -> Vec<Self> {
        let split = |label: &str| match label.split_once('\t') {
            Some((expiry, tenor)) => (expiry.to_string(), tenor.to_string()),
            None => (label.to_string(), String::new()),
        };
        let computed = report.entries.iter().map(|entry| {
            let (expiry, tenor) = split(&entry.label);
            Self {
                expiry,
                tenor,
                model_vol: Some(entry.model),
                target_vol: Some(entry.target),
                deviation: Some(entry.deviation),
            }
        });
        let failed = report.failed.iter().map(|label| {
            let (expiry, tenor) = split(label);
            Self {
                expiry,
                tenor,
                model_vol: None,
                target_vol: None,
                deviation: None,
            }
        });
        computed.chain(failed).collect()
    }
}

/// Average simulated rates for one accrual period.
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct DiagnosticRow {
    #[tabled(rename = "begin", display_with = "time")]
    pub begin_time: f64,
    #[tabled(rename = "end", display_with = "time")]
    pub end_time: f64,
    #[tabled(rename = "backward", display_with = "vol")]
    pub average_backward_rate: Option<f64>,
    #[tabled(rename = "libor", display_with = "vol")]
    pub average_libor_rate: Option<f64>,
}

impl From<&RateDiagnosticRecord> for DiagnosticRow {
    fn from(record: &RateDiagnosticRecord) -> Self {
        Self {
            begin_time: record.begin_time,
            end_time: record.end_time,
            average_backward_rate: record.average_backward_rate,
            average_libor_rate: record.average_libor_rate,
        }
    }
}

/// Write `rows` to `out` in `format`.
pub fn render<R, W>(out: &mut W, format: OutputFormat, rows: &[R]) -> anyhow::Result<()>
where
    R: Serialize + Tabled,
    W: Write,
{
    match format {
        OutputFormat::Table => {
            if rows.is_empty() {
                writeln!(out, "No results.")?;
                return Ok(());
            }
            let table = Table::new(rows)
                .with(Style::rounded())
                .with(Modify::new(Columns::first()).with(Alignment::left()))
                .to_string();
            writeln!(out, "{table}")?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, rows)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
