//! Monte Carlo simulation configuration.

use arrears_core::types::ConfigurationError;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of time steps allowed per path.
pub const MAX_STEPS: usize = 100_000;

/// Tolerance for matching query times to the simulation grid.
pub const GRID_TOLERANCE: f64 = 1e-8;

/// Monte Carlo simulation configuration.
///
/// The simulation grid is `0, Δ, 2Δ, …, horizon` with `Δ = time_step`;
/// the horizon must be an integer multiple of the step.
///
/// # Examples
///
/// ```rust
/// use arrears_pricing::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .n_paths(2000)
///     .time_step(0.125)
///     .horizon(21.0)
///     .seed(3434)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_steps(), 168);
/// assert_eq!(config.n_paths(), 2000);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig {
    n_paths: usize,
    time_step: f64,
    horizon: f64,
    seed: u64,
    antithetic: bool,
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Grid spacing in years.
    #[inline]
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Last simulated time.
    #[inline]
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// Base seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Whether paths are generated in antithetic pairs.
    #[inline]
    pub fn antithetic(&self) -> bool {
        self.antithetic
    }

    /// Number of time steps, `horizon / time_step`.
    #[inline]
    pub fn n_steps(&self) -> usize {
        (self.horizon / self.time_step).round() as usize
    }

    /// Same configuration with another seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidParameter` if:
    /// - `n_paths` is 0 or greater than 10,000,000, or odd with antithetic sampling
    /// - `time_step` or `horizon` is not positive
    /// - `horizon` is not a multiple of `time_step`, or needs more than 100,000 steps
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(ConfigurationError::invalid_parameter(
                "n_paths",
                self.n_paths as f64,
                format!("must be in range [1, {MAX_PATHS}]"),
            ));
        }
        if self.antithetic && self.n_paths % 2 != 0 {
            return Err(ConfigurationError::invalid_parameter(
                "n_paths",
                self.n_paths as f64,
                "must be even with antithetic sampling",
            ));
        }
        if !(self.time_step > 0.0) || !self.time_step.is_finite() {
            return Err(ConfigurationError::invalid_parameter(
                "time_step",
                self.time_step,
                "must be finite and positive",
            ));
        }
        if !(self.horizon > 0.0) || !self.horizon.is_finite() {
            return Err(ConfigurationError::invalid_parameter(
                "horizon",
                self.horizon,
                "must be finite and positive",
            ));
        }
        let steps = self.horizon / self.time_step;
        if (steps - steps.round()).abs() * self.time_step > GRID_TOLERANCE {
            return Err(ConfigurationError::invalid_parameter(
                "horizon",
                self.horizon,
                format!("must be a multiple of the time step {}", self.time_step),
            ));
        }
        if steps.round() as usize > MAX_STEPS {
            return Err(ConfigurationError::invalid_parameter(
                "time_step",
                self.time_step,
                format!("more than {MAX_STEPS} steps to the horizon"),
            ));
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
///
/// Unset fields default to 2000 paths, a 0.125 step, a 21 year horizon,
/// seed 3434 and plain (non-antithetic) sampling.
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    n_paths: Option<usize>,
    time_step: Option<f64>,
    horizon: Option<f64>,
    seed: Option<u64>,
    antithetic: bool,
}

impl SimulationConfigBuilder {
    /// Sets the number of simulation paths.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the grid spacing.
    #[inline]
    pub fn time_step(mut self, time_step: f64) -> Self {
        self.time_step = Some(time_step);
        self
    }

    /// Sets the last simulated time.
    #[inline]
    pub fn horizon(mut self, horizon: f64) -> Self {
        self.horizon = Some(horizon);
        self
    }

    /// Sets the seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables antithetic sampling.
    #[inline]
    pub fn antithetic(mut self, antithetic: bool) -> Self {
        self.antithetic = antithetic;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// See [`SimulationConfig::validate`].
    pub fn build(self) -> Result<SimulationConfig, ConfigurationError> {
        let config = SimulationConfig {
            n_paths: self.n_paths.unwrap_or(2000),
            time_step: self.time_step.unwrap_or(0.125),
            horizon: self.horizon.unwrap_or(21.0),
            seed: self.seed.unwrap_or(3434),
            antithetic: self.antithetic,
        };
        config.validate()?;
        Ok(config)
    }
}
