//! Operator overloads for [`PathEnsemble`].
//!
//! Ensemble-ensemble operators panic on a path-count mismatch; use the
//! fallible named methods where the operands come from different sources.

use std::ops::{Add, Div, Mul, Neg, Sub};

use super::PathEnsemble;

macro_rules! impl_ensemble_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<&PathEnsemble> for &PathEnsemble {
            type Output = PathEnsemble;

            /// # Panics
            ///
            /// Panics if both operands are stochastic with different path counts.
            fn $method(self, rhs: &PathEnsemble) -> PathEnsemble {
                match self.zip_with(rhs, |a, b| a $op b) {
                    Ok(result) => result,
                    Err(err) => panic!("{}", err),
                }
            }
        }

        impl $trait<PathEnsemble> for PathEnsemble {
            type Output = PathEnsemble;

            fn $method(self, rhs: PathEnsemble) -> PathEnsemble {
                &self $op &rhs
            }
        }

        impl $trait<f64> for &PathEnsemble {
            type Output = PathEnsemble;

            fn $method(self, rhs: f64) -> PathEnsemble {
                self.map(|a| a $op rhs)
            }
        }

        impl $trait<f64> for PathEnsemble {
            type Output = PathEnsemble;

            fn $method(self, rhs: f64) -> PathEnsemble {
                &self $op rhs
            }
        }
    };
}

impl_ensemble_op!(Add, add, +);
impl_ensemble_op!(Sub, sub, -);
impl_ensemble_op!(Mul, mul, *);
impl_ensemble_op!(Div, div, /);

impl Neg for &PathEnsemble {
    type Output = PathEnsemble;

    fn neg(self) -> PathEnsemble {
        self.map(|a| -a)
    }
}

impl Neg for PathEnsemble {
    type Output = PathEnsemble;

    fn neg(self) -> PathEnsemble {
        -&self
    }
}
