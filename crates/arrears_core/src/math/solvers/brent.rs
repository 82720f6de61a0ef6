//! Brent's method root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;

/// Brent's method root finder.
///
/// Combines bisection, secant steps and inverse quadratic interpolation.
/// Converges for any continuous function given a valid bracket, without
/// requiring derivatives.
///
/// # Example
///
/// ```
/// use arrears_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
///
/// // Solve x³ - x - 2 = 0 in bracket [1, 2]
/// let f = |x: f64| x * x * x - x - 2.0;
/// let root = solver.find_root(f, 1.0, 2.0).unwrap();
/// assert!(f(root).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver {
    config: SolverConfig,
}

impl Default for BrentSolver {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl BrentSolver {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Find a root of `f` in the bracket `[a, b]`.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root located to within `tolerance`
    /// * `Err(SolverError::NoBracket)` - `f(a)` and `f(b)` have the same sign
    /// * `Err(SolverError::NumericalInstability)` - `f` returned a non-finite value
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge
    pub fn find_root<F>(&self, f: F, a: f64, b: f64) -> Result<f64, SolverError>
    where
        F: Fn(f64) -> f64,
    {
        let mut a = a;
        let mut b = b;
        let mut fa = f(a);
        let mut fb = f(b);

        if !fa.is_finite() || !fb.is_finite() {
            return Err(SolverError::NumericalInstability(format!(
                "non-finite function value at bracket [{}, {}]",
                a, b
            )));
        }
        if fa == 0.0 {
            return Ok(a);
        }
        if fb == 0.0 {
            return Ok(b);
        }
        if fa * fb > 0.0 {
            return Err(SolverError::NoBracket { a, b });
        }

        let mut c = b;
        let mut fc = fb;
        let mut d = 0.0;
        let mut e = 0.0;

        for _ in 0..self.config.max_iterations {
            if (fb > 0.0 && fc > 0.0) || (fb < 0.0 && fc < 0.0) {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * self.config.tolerance;
            let xm = 0.5 * (c - b);
            if xm.abs() <= tol || fb == 0.0 {
                return Ok(b);
            }

            if e.abs() >= tol && fa.abs() > fb.abs() {
                let s = fb / fa;
                let (mut p, mut q) = if a == c {
                    (2.0 * xm * s, 1.0 - s)
                } else {
                    let q0 = fa / fc;
                    let r = fb / fc;
                    (
                        s * (2.0 * xm * q0 * (q0 - r) - (b - a) * (r - 1.0)),
                        (q0 - 1.0) * (r - 1.0) * (s - 1.0),
                    )
                };
                if p > 0.0 {
                    q = -q;
                }
                p = p.abs();
                let min1 = 3.0 * xm * q - (tol * q).abs();
                let min2 = (e * q).abs();
                if 2.0 * p < min1.min(min2) {
                    e = d;
                    d = p / q;
                } else {
                    d = xm;
                    e = d;
                }
            } else {
                d = xm;
                e = d;
            }

            a = b;
            fa = fb;
            b += if d.abs() > tol { d } else { tol.copysign(xm) };
            fb = f(b);
            if !fb.is_finite() {
                return Err(SolverError::NumericalInstability(format!(
                    "non-finite function value at x = {}",
                    b
                )));
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_find_sqrt_2() {
        let solver = BrentSolver::with_defaults();
        let root = solver.find_root(|x| x * x - 2.0, 0.0, 2.0).unwrap();
        assert_relative_eq!(root, std::f64::consts::SQRT_2, epsilon = 1e-11);
    }

    #[test]
    fn test_reversed_bracket() {
        let solver = BrentSolver::with_defaults();
        let root = solver.find_root(|x| x.cos() - x, 1.0, 0.0).unwrap();
        assert_relative_eq!(root.cos(), root, epsilon = 1e-11);
    }

    #[test]
    fn test_root_at_endpoint() {
        let solver = BrentSolver::with_defaults();
        assert_eq!(solver.find_root(|x| x - 1.0, 1.0, 3.0).unwrap(), 1.0);
    }

    #[test]
    fn test_no_bracket() {
        let solver = BrentSolver::with_defaults();
        let err = solver.find_root(|x| x * x + 1.0, -1.0, 1.0).unwrap_err();
        assert!(matches!(err, SolverError::NoBracket { .. }));
    }

    #[test]
    fn test_flat_tail_function() {
        // Option-price-like function: very flat on the left of the root
        let solver = BrentSolver::new(SolverConfig::new(1e-14, 200));
        let f = |x: f64| (x * 50.0).exp() - 1.0e5;
        let root = solver.find_root(f, 0.0, 1.0).unwrap();
        assert_relative_eq!(root, 1.0e5_f64.ln() / 50.0, epsilon = 1e-12);
    }

    #[test]
    fn test_max_iterations() {
        let solver = BrentSolver::new(SolverConfig::new(1e-300, 2));
        let err = solver.find_root(|x| x.powi(3) - 0.3, 0.0, 1.0).unwrap_err();
        assert!(matches!(
            err,
            SolverError::MaxIterationsExceeded { iterations: 2 }
        ));
    }
}
