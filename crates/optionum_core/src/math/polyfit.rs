//! Polynomial least-squares fitting.
//!
//! The Longstaff-Schwartz continuation-value estimate regresses realised
//! discounted cash flows on the current state variable with a low-degree
//! polynomial. The fit is kept here as a standalone utility (normal
//! equations assembled from the Vandermonde moments, solved by Gaussian
//! elimination with partial pivoting) so it can be tested in isolation.

use crate::types::PricingError;

/// Fits a least-squares polynomial of the given degree.
///
/// Returns the coefficients in ascending order: `c[0] + c[1]·x + … +
/// c[degree]·x^degree`, the minimiser of Σ (p(xᵢ) − yᵢ)².
///
/// # Errors
/// `PricingError::InvalidParameter` if the sample arrays differ in length,
/// if there are no more samples than the degree, or if the normal-equation
/// system is singular (all abscissae identical, for example). Callers that
/// treat a degenerate regression as an absorbable condition simply skip on
/// error.
///
/// # Examples
/// ```
/// use optionum_core::math::{polyfit, polyval};
///
/// let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
/// let ys: Vec<f64> = xs.iter().map(|x| 1.0 - 2.0 * x + 0.5 * x * x).collect();
/// let coeffs = polyfit(&xs, &ys, 2).unwrap();
/// assert!((polyval(&coeffs, 2.5) - (1.0 - 5.0 + 0.5 * 6.25)).abs() < 1e-9);
/// ```
pub fn polyfit(xs: &[f64], ys: &[f64], degree: usize) -> Result<Vec<f64>, PricingError> {
    if xs.len() != ys.len() {
        return Err(PricingError::InvalidParameter {
            name: "sample length mismatch",
            value: xs.len() as f64,
        });
    }
    let n_coeffs = degree + 1;
    if xs.len() < n_coeffs {
        return Err(PricingError::InvalidParameter {
            name: "sample count",
            value: xs.len() as f64,
        });
    }

    // Normal equations G c = b with G[i][j] = Σ x^(i+j), b[i] = Σ y·x^i.
    let mut moments = vec![0.0; 2 * degree + 1];
    let mut b = vec![0.0; n_coeffs];
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let mut power = 1.0;
        for (i, moment) in moments.iter_mut().enumerate() {
            *moment += power;
            if i < n_coeffs {
                b[i] += y * power;
            }
            power *= x;
        }
    }

    let mut g: Vec<Vec<f64>> = (0..n_coeffs)
        .map(|i| (0..n_coeffs).map(|j| moments[i + j]).collect())
        .collect();

    gauss_solve(&mut g, &mut b)?;
    Ok(b)
}

/// Evaluates a polynomial with ascending coefficients at `x` (Horner).
#[inline]
pub fn polyval(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// In-place Gaussian elimination with partial pivoting; the solution
/// replaces `b`.
fn gauss_solve(a: &mut [Vec<f64>], b: &mut [f64]) -> Result<(), PricingError> {
    let n = b.len();

    for col in 0..n {
        // Partial pivot
        let mut pivot_row = col;
        for row in col + 1..n {
            if a[row][col].abs() > a[pivot_row][col].abs() {
                pivot_row = row;
            }
        }
        if a[pivot_row][col].abs() < f64::EPSILON {
            return Err(PricingError::InvalidParameter {
                name: "regression matrix pivot",
                value: a[pivot_row][col],
            });
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    for col in (0..n).rev() {
        let mut acc = b[col];
        for k in col + 1..n {
            acc -= a[col][k] * b[k];
        }
        b[col] = acc / a[col][col];
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_exact_line() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [1.0, 3.0, 5.0];
        let coeffs = polyfit(&xs, &ys, 1).unwrap();
        assert_relative_eq!(coeffs[0], 1.0, epsilon = 1e-10);
        assert_relative_eq!(coeffs[1], 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_overdetermined_least_squares() {
        // Symmetric residuals around y = 2: best constant fit is the mean.
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [1.0, 3.0, 1.0, 3.0];
        let coeffs = polyfit(&xs, &ys, 0).unwrap();
        assert_relative_eq!(coeffs[0], 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_degree_three_matches_lsm_usage() {
        let xs: Vec<f64> = (0..20).map(|i| 40.0 + i as f64).collect();
        let ys: Vec<f64> = xs
            .iter()
            .map(|x| 2.0 + 0.3 * x - 0.01 * x * x + 1e-4 * x * x * x)
            .collect();
        let coeffs = polyfit(&xs, &ys, 3).unwrap();
        for &x in &xs {
            let expected = 2.0 + 0.3 * x - 0.01 * x * x + 1e-4 * x * x * x;
            assert_relative_eq!(polyval(&coeffs, x), expected, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_too_few_samples_rejected() {
        let result = polyfit(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], 3);
        assert!(matches!(
            result,
            Err(PricingError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        assert!(polyfit(&[1.0, 2.0], &[1.0], 1).is_err());
    }

    #[test]
    fn test_degenerate_abscissae_rejected() {
        // All samples at the same x: the quadratic fit is under-determined.
        let result = polyfit(&[2.0, 2.0, 2.0, 2.0], &[1.0, 2.0, 3.0, 4.0], 2);
        assert!(result.is_err());
    }

    #[test]
    fn test_polyval_horner() {
        // 1 + 2x + 3x^2 at x = 2 -> 17
        assert_relative_eq!(polyval(&[1.0, 2.0, 3.0], 2.0), 17.0);
        assert_relative_eq!(polyval(&[5.0], 123.0), 5.0);
    }

    proptest! {
        // A cubic sampled without noise must be reproduced by a cubic fit.
        #[test]
        fn prop_cubic_recovered(
            c0 in -5.0f64..5.0,
            c1 in -2.0f64..2.0,
            c2 in -1.0f64..1.0,
            c3 in -0.5f64..0.5,
        ) {
            let xs: Vec<f64> = (0..12).map(|i| i as f64 * 0.5).collect();
            let ys: Vec<f64> = xs
                .iter()
                .map(|&x| c0 + c1 * x + c2 * x * x + c3 * x * x * x)
                .collect();
            let coeffs = polyfit(&xs, &ys, 3).unwrap();
            for &x in &xs {
                let expected = c0 + c1 * x + c2 * x * x + c3 * x * x * x;
                prop_assert!((polyval(&coeffs, x) - expected).abs() < 1e-7);
            }
        }
    }
}
