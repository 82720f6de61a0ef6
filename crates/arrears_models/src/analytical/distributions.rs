//! Standard normal distribution functions.
//!
//! - `norm_cdf`: cumulative distribution function
//! - `norm_pdf`: probability density function
//!
//! Both are generic over `T: Float`.

use num_traits::Float;

const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Complementary error function.
///
/// Chebyshev fit with fractional error below 1.2e-7 for all x, including
/// the far tails where the Abramowitz-Stegun rational form loses relative
/// accuracy. Out-of-the-money option prices depend on those tails.
#[inline]
fn erfc<T: Float>(x: T) -> T {
    let c = |v: f64| T::from(v).unwrap_or_else(T::zero);
    let z = x.abs();
    let t = T::one() / (T::one() + c(0.5) * z);

    let poly = c(-1.265_512_23)
        + t * (c(1.000_023_68)
            + t * (c(0.374_091_96)
                + t * (c(0.096_784_18)
                    + t * (c(-0.186_288_06)
                        + t * (c(0.278_868_07)
                            + t * (c(-1.135_203_98)
                                + t * (c(1.488_515_87)
                                    + t * (c(-0.822_152_23) + t * c(0.170_872_77)))))))));

    let ans = t * (-z * z + poly).exp();
    if x >= T::zero() {
        ans
    } else {
        c(2.0) - ans
    }
}

/// Standard normal cumulative distribution function.
///
/// `N(x) = erfc(-x / sqrt(2)) / 2`
///
/// # Examples
/// ```
/// use arrears_models::analytical::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-9);
/// assert!((norm_cdf(1.959_963_985_f64) - 0.975).abs() < 1e-7);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let half = T::from(0.5).unwrap_or_else(T::zero);
    let sqrt_2 = T::from(SQRT_2).unwrap_or_else(T::one);
    half * erfc(-x / sqrt_2)
}

/// Standard normal probability density function.
///
/// # Examples
/// ```
/// use arrears_models::analytical::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.398_942_280_401_432_7).abs() < 1e-15);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let k = T::from(FRAC_1_SQRT_2PI).unwrap_or_else(T::zero);
    let half = T::from(0.5).unwrap_or_else(T::zero);
    k * (-half * x * x).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cdf_reference_values() {
        assert_relative_eq!(norm_cdf(0.0_f64), 0.5, epsilon = 1e-8);
        assert_relative_eq!(norm_cdf(1.0_f64), 0.841_344_746_068_543, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-1.0_f64), 0.158_655_253_931_457, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(2.5_f64), 0.993_790_334_674_224, epsilon = 1e-7);
    }

    #[test]
    fn test_cdf_tail_relative_accuracy() {
        // N(-6) = 9.865876450377e-10
        assert_relative_eq!(norm_cdf(-6.0_f64), 9.865_876_450_377e-10, max_relative = 2e-7);
    }

    #[test]
    fn test_cdf_symmetry() {
        for &x in &[0.1_f64, 0.7, 1.3, 2.9, 4.2] {
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_cdf_monotone() {
        let mut previous = 0.0_f64;
        for i in -800..=800 {
            let value = norm_cdf(i as f64 / 100.0);
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn test_pdf_symmetry() {
        assert_relative_eq!(norm_pdf(1.5_f64), norm_pdf(-1.5_f64));
    }
}
