//! Levenberg-Marquardt nonlinear least-squares solver.
//!
//! # Algorithm
//!
//! Each iteration solves the damped normal equations with Marquardt's
//! diagonal scaling:
//!
//! ```text
//! (JᵀJ + λ·diag(JᵀJ)) δ = -Jᵀr
//! p_{n+1} = clamp(p_n + δ, lower, upper)
//! ```
//!
//! The Jacobian is approximated by forward differences. Scaling by the
//! diagonal makes the step invariant to the magnitude of each parameter,
//! which matters when calibrating quantities such as a mean reversion of
//! order 1e-2 next to a volatility of order 1e-3.

use crate::types::SolverError;

/// Configuration for the Levenberg-Marquardt solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LMConfig {
    /// Convergence tolerance on the root-mean-square residual.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// Initial damping factor.
    pub initial_lambda: f64,
    /// Factor to increase lambda on a rejected step.
    pub lambda_up: f64,
    /// Factor to decrease lambda on an accepted step.
    pub lambda_down: f64,
    /// Maximum damping factor; exceeding it ends the iteration.
    pub max_lambda: f64,
    /// Relative parameter change below which the solver stops.
    pub param_tolerance: f64,
    /// Relative finite-difference step for the Jacobian.
    pub parameter_step: f64,
}

impl Default for LMConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-12,
            max_iterations: 400,
            initial_lambda: 1e-3,
            lambda_up: 10.0,
            lambda_down: 0.1,
            max_lambda: 1e12,
            param_tolerance: 1e-12,
            parameter_step: 1e-6,
        }
    }
}

impl LMConfig {
    /// Create a configuration with the given accuracy and iteration limit.
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
            ..Default::default()
        }
    }

    /// Set the relative finite-difference step.
    pub fn with_parameter_step(mut self, step: f64) -> Self {
        self.parameter_step = step;
        self
    }
}

/// Result of a Levenberg-Marquardt run.
#[derive(Debug, Clone, PartialEq)]
pub struct LMResult {
    /// Final parameters.
    pub params: Vec<f64>,
    /// Final residual vector.
    pub residuals: Vec<f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether a convergence criterion was met.
    pub converged: bool,
}

impl LMResult {
    /// Sum of squared residuals.
    pub fn residual_ss(&self) -> f64 {
        sum_of_squares(&self.residuals)
    }

    /// Root-mean-square residual.
    pub fn rmse(&self) -> f64 {
        if self.residuals.is_empty() {
            return 0.0;
        }
        (self.residual_ss() / self.residuals.len() as f64).sqrt()
    }
}

/// Levenberg-Marquardt nonlinear least-squares solver.
///
/// Minimises `‖r(p)‖²` over the parameter vector `p`, optionally within
/// per-parameter bounds.
///
/// # Example
///
/// ```
/// use arrears_core::math::solvers::{LevenbergMarquardtSolver, LMConfig};
///
/// let xs: [f64; 4] = [0.0, 1.0, 2.0, 3.0];
/// let ys: Vec<f64> = xs.iter().map(|x| 2.0 * (-0.5 * x).exp()).collect();
///
/// let residuals = |p: &[f64]| -> Vec<f64> {
///     xs.iter().zip(&ys).map(|(x, y)| p[0] * (-p[1] * x).exp() - y).collect()
/// };
///
/// let solver = LevenbergMarquardtSolver::new(LMConfig::default());
/// let result = solver.solve(residuals, vec![1.0, 1.0]).unwrap();
/// assert!(result.converged);
/// assert!((result.params[1] - 0.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct LevenbergMarquardtSolver {
    config: LMConfig,
    bounds: Option<Vec<(f64, f64)>>,
}

impl LevenbergMarquardtSolver {
    /// Create a new solver with the given configuration.
    pub fn new(config: LMConfig) -> Self {
        Self {
            config,
            bounds: None,
        }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(LMConfig::default())
    }

    /// Constrain each parameter to `[lower, upper]`.
    pub fn with_bounds(mut self, bounds: Vec<(f64, f64)>) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &LMConfig {
        &self.config
    }

    /// Solve the least-squares problem starting from `initial_params`.
    ///
    /// A run that exhausts `max_iterations` is returned with
    /// `converged = false`; callers decide whether that is a failure.
    ///
    /// # Errors
    ///
    /// * `SolverError::NumericalInstability` - empty parameter or residual
    ///   vector, mismatched bounds, or non-finite initial residuals
    pub fn solve<F>(&self, residuals: F, initial_params: Vec<f64>) -> Result<LMResult, SolverError>
    where
        F: Fn(&[f64]) -> Vec<f64>,
    {
        let n_params = initial_params.len();
        if n_params == 0 {
            return Err(SolverError::NumericalInstability(
                "Empty parameter vector".to_string(),
            ));
        }
        if let Some(bounds) = &self.bounds {
            if bounds.len() != n_params {
                return Err(SolverError::NumericalInstability(format!(
                    "{} bounds for {} parameters",
                    bounds.len(),
                    n_params
                )));
            }
        }

        let mut params = self.project(initial_params);
        let mut r = residuals(&params);
        if r.is_empty() {
            return Err(SolverError::NumericalInstability(
                "Empty residual vector".to_string(),
            ));
        }
        let mut ss = sum_of_squares(&r);
        if !ss.is_finite() {
            return Err(SolverError::NumericalInstability(
                "Non-finite initial residuals".to_string(),
            ));
        }

        let n_obs = r.len() as f64;
        let mut lambda = self.config.initial_lambda;
        let mut jacobian = self.jacobian(&residuals, &params, &r);

        for iteration in 0..self.config.max_iterations {
            if (ss / n_obs).sqrt() < self.config.tolerance {
                return Ok(LMResult {
                    params,
                    residuals: r,
                    iterations: iteration,
                    converged: true,
                });
            }

            let delta = match solve_damped(&jacobian, &r, lambda) {
                Some(d) => d,
                None => {
                    lambda *= self.config.lambda_up;
                    if lambda > self.config.max_lambda {
                        break;
                    }
                    continue;
                }
            };

            let trial = self.project(params.iter().zip(&delta).map(|(p, d)| p + d).collect());
            let step: f64 = trial
                .iter()
                .zip(&params)
                .map(|(t, p)| (t - p) * (t - p))
                .sum::<f64>()
                .sqrt();
            let scale = params.iter().map(|p| p * p).sum::<f64>().sqrt().max(1e-12);
            if step / scale < self.config.param_tolerance {
                return Ok(LMResult {
                    params,
                    residuals: r,
                    iterations: iteration,
                    converged: true,
                });
            }

            let trial_r = residuals(&trial);
            let trial_ss = sum_of_squares(&trial_r);

            if trial_ss < ss {
                params = trial;
                r = trial_r;
                ss = trial_ss;
                lambda *= self.config.lambda_down;
                jacobian = self.jacobian(&residuals, &params, &r);
            } else {
                lambda *= self.config.lambda_up;
                if lambda > self.config.max_lambda {
                    // No descent direction left at this point
                    return Ok(LMResult {
                        params,
                        residuals: r,
                        iterations: iteration + 1,
                        converged: true,
                    });
                }
            }
        }

        Ok(LMResult {
            params,
            residuals: r,
            iterations: self.config.max_iterations,
            converged: false,
        })
    }

    fn project(&self, mut params: Vec<f64>) -> Vec<f64> {
        if let Some(bounds) = &self.bounds {
            for (p, (lo, hi)) in params.iter_mut().zip(bounds) {
                *p = p.clamp(*lo, *hi);
            }
        }
        params
    }

    /// Forward-difference Jacobian, `jacobian[i][j] = ∂r_i/∂p_j`.
    fn jacobian<F>(&self, residuals: &F, params: &[f64], r0: &[f64]) -> Vec<Vec<f64>>
    where
        F: Fn(&[f64]) -> Vec<f64>,
    {
        let n_params = params.len();
        let mut jacobian = vec![vec![0.0; n_params]; r0.len()];

        for j in 0..n_params {
            let mut h = self.config.parameter_step * params[j].abs().max(1e-4);
            if let Some(bounds) = &self.bounds {
                if params[j] + h > bounds[j].1 {
                    h = -h;
                }
            }

            let mut bumped = params.to_vec();
            bumped[j] += h;
            let r_bumped = residuals(&bumped);

            for (row, (rb, r)) in jacobian.iter_mut().zip(r_bumped.iter().zip(r0)) {
                row[j] = (rb - r) / h;
            }
        }

        jacobian
    }
}

/// Solve `(JᵀJ + λ·diag(JᵀJ)) δ = -Jᵀr`.
fn solve_damped(jacobian: &[Vec<f64>], residuals: &[f64], lambda: f64) -> Option<Vec<f64>> {
    let n = jacobian.first()?.len();

    let mut jtj = vec![vec![0.0; n]; n];
    let mut jtr = vec![0.0; n];
    for (row, r) in jacobian.iter().zip(residuals) {
        for i in 0..n {
            jtr[i] -= row[i] * r;
            for j in 0..n {
                jtj[i][j] += row[i] * row[j];
            }
        }
    }

    for (i, row) in jtj.iter_mut().enumerate() {
        let diag = row[i];
        row[i] = diag + lambda * diag.max(1e-300);
    }

    solve_cholesky(&jtj, &jtr)
}

#[inline]
fn sum_of_squares(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum()
}

/// Solve `Ax = b` for symmetric positive definite `A`.
fn solve_cholesky(a: &[Vec<f64>], b: &[f64]) -> Option<Vec<f64>> {
    let n = b.len();
    let mut l = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in 0..=i {
            let sum: f64 = a[i][j] - (0..j).map(|k| l[i][k] * l[j][k]).sum::<f64>();
            if i == j {
                if sum <= 0.0 || !sum.is_finite() {
                    return None;
                }
                l[i][j] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    let mut y = vec![0.0; n];
    for i in 0..n {
        y[i] = (b[i] - (0..i).map(|k| l[i][k] * y[k]).sum::<f64>()) / l[i][i];
    }

    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        x[i] = (y[i] - (i + 1..n).map(|k| l[k][i] * x[k]).sum::<f64>()) / l[i][i];
    }

    Some(x)
}
