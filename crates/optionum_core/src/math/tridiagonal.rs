//! Tridiagonal operator and direct solver.
//!
//! Local-in-space PDE discretisations couple each interior grid point only
//! to its immediate neighbours, so the resulting operator is tridiagonal.
//! [`TridiagonalOperator`] applies such an operator to a vector (explicit
//! time stepping); [`ThomasSolver`] solves tridiagonal systems (implicit
//! time stepping) with a factorisation computed once and reusable across
//! repeated right-hand sides.

use crate::types::PricingError;

/// Dense-free tridiagonal operator of dimension `n`.
///
/// Bands are stored as three vectors: `sub` (length n−1, row i+1 coupling
/// to column i), `diag` (length n), `sup` (length n−1, row i coupling to
/// column i+1).
///
/// # Examples
/// ```
/// use optionum_core::math::TridiagonalOperator;
///
/// // Identity of dimension 3
/// let op = TridiagonalOperator::new(vec![0.0, 0.0], vec![1.0; 3], vec![0.0, 0.0]).unwrap();
/// assert_eq!(op.apply(&[1.0, 2.0, 3.0]), vec![1.0, 2.0, 3.0]);
/// ```
#[derive(Debug, Clone)]
pub struct TridiagonalOperator {
    sub: Vec<f64>,
    diag: Vec<f64>,
    sup: Vec<f64>,
}

impl TridiagonalOperator {
    /// Creates an operator from its three bands.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` if `diag` is empty or the off-band
    /// lengths are not exactly one less than the diagonal.
    pub fn new(sub: Vec<f64>, diag: Vec<f64>, sup: Vec<f64>) -> Result<Self, PricingError> {
        let n = diag.len();
        if n == 0 {
            return Err(PricingError::InvalidParameter {
                name: "tridiagonal dimension",
                value: 0.0,
            });
        }
        if sub.len() != n - 1 || sup.len() != n - 1 {
            return Err(PricingError::InvalidParameter {
                name: "tridiagonal band length",
                value: sub.len().max(sup.len()) as f64,
            });
        }
        Ok(Self { sub, diag, sup })
    }

    /// Dimension of the operator.
    #[inline]
    pub fn dim(&self) -> usize {
        self.diag.len()
    }

    /// Matrix-vector product.
    ///
    /// # Panics
    /// Debug-asserts that `v.len()` equals the operator dimension; the
    /// engines construct both from the same grid so the lengths agree by
    /// construction.
    pub fn apply(&self, v: &[f64]) -> Vec<f64> {
        let n = self.dim();
        debug_assert_eq!(v.len(), n);

        let mut out = vec![0.0; n];
        for i in 0..n {
            let mut acc = self.diag[i] * v[i];
            if i > 0 {
                acc += self.sub[i - 1] * v[i - 1];
            }
            if i + 1 < n {
                acc += self.sup[i] * v[i + 1];
            }
            out[i] = acc;
        }
        out
    }
}

/// Prefactored Thomas (tridiagonal Gaussian elimination) solver.
///
/// The forward-elimination multipliers depend only on the matrix, so for a
/// time-homogeneous operator they are computed once and reused for every
/// time step's solve. Each [`solve`](ThomasSolver::solve) is then O(n).
///
/// # Examples
/// ```
/// use optionum_core::math::{ThomasSolver, TridiagonalOperator};
///
/// let op = TridiagonalOperator::new(vec![-1.0, -1.0], vec![4.0; 3], vec![-1.0, -1.0]).unwrap();
/// let solver = ThomasSolver::factorise(&op).unwrap();
/// let x = solver.solve(&[1.0, 2.0, 3.0]);
/// let back = op.apply(&x);
/// assert!((back[1] - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct ThomasSolver {
    sub: Vec<f64>,
    /// Normalised super-diagonal after forward elimination.
    sup_prime: Vec<f64>,
    /// Reciprocals of the eliminated pivots.
    inv_pivot: Vec<f64>,
}

impl ThomasSolver {
    /// Factorises the operator for repeated solves.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` if a pivot vanishes (singular or
    /// numerically degenerate system).
    pub fn factorise(op: &TridiagonalOperator) -> Result<Self, PricingError> {
        let n = op.dim();
        let mut sup_prime = vec![0.0; n.saturating_sub(1)];
        let mut inv_pivot = vec![0.0; n];

        let mut pivot = op.diag[0];
        for i in 0..n {
            if i > 0 {
                pivot = op.diag[i] - op.sub[i - 1] * sup_prime[i - 1];
            }
            if pivot == 0.0 || !pivot.is_finite() {
                return Err(PricingError::InvalidParameter {
                    name: "tridiagonal pivot",
                    value: pivot,
                });
            }
            inv_pivot[i] = 1.0 / pivot;
            if i + 1 < n {
                sup_prime[i] = op.sup[i] * inv_pivot[i];
            }
        }

        Ok(Self {
            sub: op.sub.clone(),
            sup_prime,
            inv_pivot,
        })
    }

    /// Solves `A x = rhs` using the stored factorisation.
    pub fn solve(&self, rhs: &[f64]) -> Vec<f64> {
        let n = self.inv_pivot.len();
        debug_assert_eq!(rhs.len(), n);

        let mut x = vec![0.0; n];
        // Forward sweep
        x[0] = rhs[0] * self.inv_pivot[0];
        for i in 1..n {
            x[i] = (rhs[i] - self.sub[i - 1] * x[i - 1]) * self.inv_pivot[i];
        }
        // Back substitution
        for i in (0..n - 1).rev() {
            x[i] -= self.sup_prime[i] * x[i + 1];
        }
        x
    }
}
