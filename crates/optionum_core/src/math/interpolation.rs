//! Piecewise-linear interpolation over a sorted axis.

use crate::types::PricingError;

/// Linearly interpolates `ys` over the sorted axis `xs` at `x`.
///
/// Values outside the axis are clamped to the first/last ordinate, matching
/// the convention used when reading a PDE grid column at a spot that falls
/// outside [0, S_max].
///
/// # Errors
/// `PricingError::InvalidParameter` if the arrays differ in length or hold
/// fewer than two points.
///
/// # Examples
/// ```
/// use optionum_core::math::interp_linear;
///
/// let xs = [0.0, 1.0, 2.0];
/// let ys = [0.0, 10.0, 40.0];
/// assert_eq!(interp_linear(&xs, &ys, 1.5).unwrap(), 25.0);
/// assert_eq!(interp_linear(&xs, &ys, -3.0).unwrap(), 0.0);
/// ```
pub fn interp_linear(xs: &[f64], ys: &[f64], x: f64) -> Result<f64, PricingError> {
    if xs.len() != ys.len() {
        return Err(PricingError::InvalidParameter {
            name: "interpolation axis length",
            value: xs.len() as f64,
        });
    }
    if xs.len() < 2 {
        return Err(PricingError::InvalidParameter {
            name: "interpolation points",
            value: xs.len() as f64,
        });
    }
    debug_assert!(xs.windows(2).all(|w| w[0] <= w[1]), "axis must be sorted");

    if x <= xs[0] {
        return Ok(ys[0]);
    }
    if x >= xs[xs.len() - 1] {
        return Ok(ys[ys.len() - 1]);
    }

    // First knot strictly above x; partition_point keeps this O(log n).
    let hi = xs.partition_point(|&knot| knot <= x);
    let lo = hi - 1;
    let weight = (x - xs[lo]) / (xs[hi] - xs[lo]);
    Ok(ys[lo] + weight * (ys[hi] - ys[lo]))
}
