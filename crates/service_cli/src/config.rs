//! CLI configuration management
//!
//! Settings are read from a TOML file, then overridden from `ARREARS_*`
//! environment variables, then validated. Every section is optional; a
//! missing key takes its default.
//!
//! ```toml
//! log_level = "info"
//! reference_date = "2020-07-31"
//!
//! [simulation]
//! n_paths = 2000
//! time_step = 0.125
//! horizon = 21.0
//! seed = 3434
//!
//! [calibration]
//! max_iterations = 400
//! num_threads = 6
//!
//! [ladder]
//! strike = 0.004783
//! value_unit = "NORMAL_VOLATILITY"
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use arrears_models::calibration::HullWhiteCalibrationConfig;
use arrears_optimiser::market_data;
use arrears_pricing::consistency::LadderConfig;
use arrears_pricing::mc::SimulationConfig;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// Environment variable overriding the simulation seed.
pub const ENV_SEED: &str = "ARREARS_SEED";
/// Environment variable overriding the number of paths.
pub const ENV_PATHS: &str = "ARREARS_PATHS";
/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "ARREARS_LOG_LEVEL";

/// Log levels accepted in the config file and environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive for `EnvFilter`.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(CliError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

/// Monte Carlo settings as written in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub n_paths: usize,
    pub time_step: f64,
    pub horizon: f64,
    pub seed: u64,
    pub antithetic: bool,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            n_paths: 2000,
            time_step: 0.125,
            horizon: 21.0,
            seed: 3434,
            antithetic: false,
        }
    }
}

impl SimulationSettings {
    /// Validated simulation configuration.
    pub fn to_config(&self) -> Result<SimulationConfig> {
        Ok(SimulationConfig::builder()
            .n_paths(self.n_paths)
            .time_step(self.time_step)
            .horizon(self.horizon)
            .seed(self.seed)
            .antithetic(self.antithetic)
            .build()?)
    }
}

/// Top-level configuration of the `arrears` binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrearsConfig {
    /// Default verbosity when `RUST_LOG` is unset
    pub log_level: LogLevel,
    /// Date the swaption grid tenors are rolled from
    pub reference_date: NaiveDate,
    pub simulation: SimulationSettings,
    pub calibration: HullWhiteCalibrationConfig,
    pub ladder: LadderConfig,
}

impl Default for ArrearsConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            reference_date: market_data::reference_date(),
            simulation: SimulationSettings::default(),
            calibration: HullWhiteCalibrationConfig::default(),
            ladder: LadderConfig::default(),
        }
    }
}

impl ArrearsConfig {
    /// Parse a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::ConfigFile(e.to_string()))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load `path` if given, otherwise `default_path` when it exists, otherwise defaults.
    pub fn load_or_default(path: Option<&Path>, default_path: &Path) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if default_path.exists() => Self::load(default_path),
            None => Ok(Self::default()),
        }
    }

    /// Apply `ARREARS_*` overrides from the process environment.
    pub fn with_env_override(self) -> Result<Self> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from `lookup`, keyed by environment variable name.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup(ENV_SEED) {
            self.simulation.seed = parse_env(ENV_SEED, &seed)?;
        }
        if let Some(paths) = lookup(ENV_PATHS) {
            self.simulation.n_paths = parse_env(ENV_PATHS, &paths)?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level.parse()?;
        }
        Ok(self)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.simulation.to_config()?;
        self.calibration.validate()?;
        self.ladder.validate()?;
        if self.ladder.first_begin_time >= self.simulation.horizon {
            return Err(CliError::InvalidArgument(format!(
                "ladder starts at {} but the simulation ends at {}",
                self.ladder.first_begin_time, self.simulation.horizon
            )));
        }
        Ok(())
    }
}

fn parse_env<T>(name: &'static str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| CliError::InvalidEnv {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
