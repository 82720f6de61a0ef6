//! Sequential OIS bootstrapping engine.
//!
//! Quotes are stripped in maturity order. Each quote fixes the discount
//! factor at its maturity; payment dates before that pillar are read from
//! the partial curve, log-linear in the discount factor between pillars
//! with `P(0, 0) = 1` at the origin. Single-period quotes are solved in
//! closed form, annual quotes with Brent on the pillar discount factor.

use arrears_core::market_data::InterpolatedCurve;
use arrears_core::math::solvers::{BrentSolver, SolverConfig};
use tracing::{debug, info};

use super::error::BootstrapError;
use super::instrument::{OisQuote, PaymentFrequency};

/// Bracket for the pillar discount factor.
const DF_BRACKET: (f64, f64) = (1e-4, 4.0);

/// Pillars closer than this are duplicates.
const PILLAR_TOLERANCE: f64 = 1e-10;

/// Result of a bootstrap.
#[derive(Debug, Clone)]
pub struct BootstrapResult {
    /// The stripped curve
    pub curve: InterpolatedCurve<f64>,
    /// Pillar maturities in years
    pub pillars: Vec<f64>,
    /// Discount factors at each pillar
    pub discount_factors: Vec<f64>,
    /// Par residual of each quote on the final curve
    pub residuals: Vec<f64>,
}

impl BootstrapResult {
    /// Largest absolute par residual.
    pub fn max_residual(&self) -> f64 {
        self.residuals.iter().fold(0.0, |acc, r| acc.max(r.abs()))
    }
}

/// Strips a discount curve from OIS par quotes.
///
/// # Examples
///
/// ```
/// use arrears_core::market_data::YieldCurve;
/// use arrears_optimiser::bootstrapping::{OisBootstrapper, OisQuote, PaymentFrequency};
///
/// let quotes = vec![
///     OisQuote::parse("6M", 0.010, PaymentFrequency::Tenor).unwrap(),
///     OisQuote::parse("2Y", 0.012, PaymentFrequency::Annual).unwrap(),
///     OisQuote::parse("5Y", 0.015, PaymentFrequency::Annual).unwrap(),
/// ];
/// let result = OisBootstrapper::default().bootstrap(&quotes).unwrap();
///
/// assert_eq!(result.pillars, vec![0.5, 2.0, 5.0]);
/// assert!((result.curve.discount_factor(0.5).unwrap() - 1.0 / 1.005).abs() < 1e-14);
/// assert!(result.max_residual() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OisBootstrapper {
    solver: BrentSolver,
}

impl OisBootstrapper {
    /// Create a bootstrapper with the given root-finder settings.
    pub fn new(config: SolverConfig) -> Self {
        Self {
            solver: BrentSolver::new(config),
        }
    }

    /// Bootstrap a curve from `quotes`, in any order.
    ///
    /// # Errors
    ///
    /// - `InsufficientData` if `quotes` is empty
    /// - `DuplicateMaturity` if two quotes share a maturity
    /// - `Solver` if no discount factor reprices an annual quote
    /// - `MarketData` if the stripped factors do not form a curve
    pub fn bootstrap(&self, quotes: &[OisQuote]) -> Result<BootstrapResult, BootstrapError> {
        if quotes.is_empty() {
            return Err(BootstrapError::insufficient_data(1, 0));
        }

        let mut sorted: Vec<&OisQuote> = quotes.iter().collect();
        sorted.sort_by(|a, b| a.maturity().total_cmp(&b.maturity()));

        let mut pillars: Vec<f64> = Vec::with_capacity(sorted.len());
        let mut discount_factors: Vec<f64> = Vec::with_capacity(sorted.len());

        for quote in &sorted {
            let maturity = quote.maturity();
            if pillars
                .last()
                .is_some_and(|&last| (maturity - last).abs() < PILLAR_TOLERANCE)
            {
                return Err(BootstrapError::duplicate_maturity(maturity));
            }

            let df = match quote.frequency() {
                PaymentFrequency::Tenor => 1.0 / (1.0 + quote.rate() * maturity),
                PaymentFrequency::Annual => {
                    let residual = |candidate: f64| {
                        quote.par_residual(|t| {
                            partial_discount(&pillars, &discount_factors, (maturity, candidate), t)
                        })
                    };
                    self.solver
                        .find_root(residual, DF_BRACKET.0, DF_BRACKET.1)
                        .map_err(|source| BootstrapError::Solver { maturity, source })?
                }
            };

            debug!(tenor = %quote.tenor(), maturity, df, "Pillar stripped");
            pillars.push(maturity);
            discount_factors.push(df);
        }

        let curve = InterpolatedCurve::from_discount_factors(&pillars, &discount_factors)?;
        let residuals: Vec<f64> = sorted
            .iter()
            .map(|quote| {
                quote.par_residual(|t| {
                    partial_discount(&pillars, &discount_factors, (f64::INFINITY, 1.0), t)
                })
            })
            .collect();

        let result = BootstrapResult {
            curve,
            pillars,
            discount_factors,
            residuals,
        };
        info!(
            pillars = result.pillars.len(),
            max_residual = result.max_residual(),
            "OIS curve bootstrapped"
        );
        Ok(result)
    }
}

/// Log-linear discount factor on the stripped pillars plus a trial pillar.
///
/// `t` never exceeds the trial pillar while stripping; afterwards the trial
/// pillar is pushed to infinity and the last segment's forward is extended.
fn partial_discount(pillars: &[f64], dfs: &[f64], trial: (f64, f64), t: f64) -> f64 {
    if t <= 0.0 {
        return 1.0;
    }
    let mut previous = (0.0, 0.0);
    let nodes = pillars
        .iter()
        .zip(dfs)
        .map(|(&time, &df)| (time, df.ln()))
        .chain(trial.0.is_finite().then(|| (trial.0, trial.1.ln())));
    for (time, log_df) in nodes {
        if t <= time {
            let w = (t - previous.0) / (time - previous.0);
            return (previous.1 + w * (log_df - previous.1)).exp();
        }
        previous = (time, log_df);
    }

    // Extrapolate the last segment's forward rate
    let n = pillars.len();
    if n >= 2 {
        let (t0, t1) = (pillars[n - 2], pillars[n - 1]);
        let slope = (dfs[n - 1].ln() - dfs[n - 2].ln()) / (t1 - t0);
        (previous.1 + slope * (t - previous.0)).exp()
    } else {
        (previous.1 / previous.0 * t).exp()
    }
}
