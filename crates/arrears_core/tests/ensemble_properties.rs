//! Property tests for path ensemble algebra.

use arrears_core::ensemble::PathEnsemble;
use proptest::prelude::*;

fn paths(n: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e3..1.0e3_f64, n)
}

proptest! {
    #[test]
    fn expectation_is_linear(values in paths(64), a in -10.0..10.0_f64, b in -10.0..10.0_f64) {
        let e = PathEnsemble::from_paths(values);
        let lhs = e.mul_scalar(a).add_scalar(b).expectation();
        let rhs = a * e.expectation() + b;
        prop_assert!((lhs - rhs).abs() <= 1e-9 * (1.0 + rhs.abs()));
    }

    #[test]
    fn floor_minus_cap_recovers_value(values in paths(32), k in -500.0..500.0_f64) {
        // max(x - k, 0) + min(x - k, 0) = x - k on every path
        let e = PathEnsemble::from_paths(values);
        let shifted = e.sub_scalar(k);
        let recombined = shifted.floor(0.0).add(&shifted.cap(0.0)).unwrap();
        for i in 0..32 {
            prop_assert!((recombined.value_at(i) - shifted.value_at(i)).abs() < 1e-12);
        }
    }

    #[test]
    fn deterministic_broadcast_matches_scalar_ops(values in paths(16), c in 0.1..10.0_f64) {
        let e = PathEnsemble::from_paths(values);
        let constant = PathEnsemble::constant(c);
        prop_assert_eq!(e.div(&constant).unwrap(), e.div_scalar(c));
        prop_assert_eq!(e.mul(&constant).unwrap(), e.mul_scalar(c));
    }

    #[test]
    fn variance_is_non_negative(values in paths(50)) {
        let e = PathEnsemble::from_paths(values);
        prop_assert!(e.variance() >= 0.0);
        prop_assert!(e.standard_error() >= 0.0);
    }
}
