//! Standard normal distribution functions.

use num_traits::Float;

/// Standard normal cumulative distribution function.
///
/// Uses the Abramowitz and Stegun rational approximation of erfc
/// (formula 7.1.26), accurate to about 1.5e-7, ample for the analytical
/// reference formulas that consume it.
///
/// # Examples
/// ```
/// use optionum_core::math::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-12);
/// assert!((norm_cdf(1.96_f64) - 0.975).abs() < 1e-3);
/// ```
pub fn norm_cdf<T: Float>(x: T) -> T {
    let zero = T::zero();
    let one = T::one();
    let half = T::from(0.5).unwrap();
    let sqrt_2 = T::from(std::f64::consts::SQRT_2).unwrap();

    if x.abs() > T::from(8.0).unwrap() {
        return if x > zero { one } else { zero };
    }

    // Abramowitz-Stegun 7.1.26 constants
    let a1 = T::from(0.254829592).unwrap();
    let a2 = T::from(-0.284496736).unwrap();
    let a3 = T::from(1.421413741).unwrap();
    let a4 = T::from(-1.453152027).unwrap();
    let a5 = T::from(1.061405429).unwrap();
    let p = T::from(0.3275911).unwrap();

    let arg = -x / sqrt_2;
    let abs_arg = arg.abs();
    let t = one / (one + p * abs_arg);
    let poly = a1 + t * (a2 + t * (a3 + t * (a4 + t * a5)));
    let erfc_abs = t * poly * (-abs_arg * abs_arg).exp();
    let erfc = if arg < zero {
        T::from(2.0).unwrap() - erfc_abs
    } else {
        erfc_abs
    };

    half * erfc
}

/// Standard normal probability density function.
pub fn norm_pdf<T: Float>(x: T) -> T {
    let inv_sqrt_2pi = T::from(1.0 / (2.0 * std::f64::consts::PI).sqrt()).unwrap();
    inv_sqrt_2pi * (-x * x * T::from(0.5).unwrap()).exp()
}
