//! Finite-difference PDE engine for the Black-Scholes equation.
//!
//! The solver discretises the stock axis linearly on [0, S_max] with M+1
//! points and steps the value surface backward from maturity over N time
//! steps, using either an explicit or an implicit scheme built from the
//! same tridiagonal interior operator. American exercise is handled with
//! a cellwise intrinsic floor after each step; the final price is read
//! from the time-zero column by linear interpolation at the spot.

use std::fmt;
use std::str::FromStr;

use optionum_core::math::{interp_linear, ThomasSolver, TridiagonalOperator};
use optionum_core::types::{MarketParams, OptionType, PricingError};

/// Time-stepping scheme for the PDE solver.
///
/// # Stability
///
/// The explicit scheme requires Δt small relative to the squared grid
/// spacing (roughly `Δt ≤ 1/(σ²M²)`); violating this produces divergent
/// oscillations. The bound is the caller's responsibility and is not
/// guarded internally. The implicit scheme is unconditionally stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Forward (explicit) time stepping; conditionally stable.
    Explicit,
    /// Backward (implicit) time stepping; one tridiagonal solve per step.
    Implicit,
}

impl Scheme {
    /// Returns the wire token (`explicit`, `implicit`).
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            Scheme::Explicit => "explicit",
            Scheme::Implicit => "implicit",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Scheme {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "explicit" => Ok(Scheme::Explicit),
            "implicit" => Ok(Scheme::Implicit),
            other => Err(PricingError::InvalidMethod {
                kind: "PDE scheme",
                token: other.to_string(),
            }),
        }
    }
}

/// Stock-axis resolution for the finite-difference grid.
///
/// # Examples
/// ```
/// use optionum_engines::pde::GridSpec;
///
/// let grid = GridSpec::new(100.0, 100).unwrap();
/// assert_eq!(grid.stock_steps(), 100);
/// assert!(GridSpec::new(100.0, 1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    max_stock: f64,
    stock_steps: usize,
}

impl GridSpec {
    /// Creates a validated grid specification.
    ///
    /// # Arguments
    /// * `max_stock` - upper edge of the stock axis S_max (must be positive)
    /// * `stock_steps` - number of stock intervals M (must be at least 2)
    pub fn new(max_stock: f64, stock_steps: usize) -> Result<Self, PricingError> {
        if !(max_stock > 0.0) {
            return Err(PricingError::InvalidParameter {
                name: "max_stock",
                value: max_stock,
            });
        }
        if stock_steps < 2 {
            return Err(PricingError::InvalidParameter {
                name: "stock_steps",
                value: stock_steps as f64,
            });
        }
        Ok(Self {
            max_stock,
            stock_steps,
        })
    }

    /// Upper edge of the stock axis.
    #[inline]
    pub fn max_stock(&self) -> f64 {
        self.max_stock
    }

    /// Number of stock intervals M.
    #[inline]
    pub fn stock_steps(&self) -> usize {
        self.stock_steps
    }
}

/// Finite-difference valuation engine.
///
/// The (M+1)×(N+1) grid is rebuilt per pricing call: terminal column set
/// once from the intrinsic payoff, boundary rows set once from the
/// asymptotic closed-form values, interior cells written exactly once per
/// backward step.
///
/// # Examples
/// ```
/// use optionum_core::types::{MarketParams, OptionType};
/// use optionum_engines::pde::{FiniteDifference, GridSpec, Scheme};
///
/// let market = MarketParams::new(50.0, 50.0, 0.4, 0.1, 1.0, 200).unwrap();
/// let engine = FiniteDifference::new(market, GridSpec::new(100.0, 100).unwrap());
/// let price = engine.price(OptionType::EuropeanPut, Scheme::Implicit).unwrap();
/// assert!(price > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct FiniteDifference {
    market: MarketParams,
    grid: GridSpec,
}

impl FiniteDifference {
    /// Builds the engine from validated market parameters and a grid spec.
    pub fn new(market: MarketParams, grid: GridSpec) -> Self {
        Self { market, grid }
    }

    /// Returns the market parameters.
    #[inline]
    pub fn market(&self) -> &MarketParams {
        &self.market
    }

    /// Returns the grid specification.
    #[inline]
    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// Prices an option by backward finite-difference time stepping.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` if the implicit system turns out
    /// singular (degenerate coefficients); validation errors are raised
    /// before any stepping starts.
    pub fn price(&self, option: OptionType, scheme: Scheme) -> Result<f64, PricingError> {
        let m = self.grid.stock_steps();
        let n = self.market.steps();
        let dt = self.market.dt();
        let rate = self.market.rate();
        let sigma = self.market.volatility();
        let strike = self.market.strike();
        let ds = self.grid.max_stock() / m as f64;

        let stock_axis: Vec<f64> = (0..=m).map(|j| j as f64 * ds).collect();
        let intrinsic: Vec<f64> = stock_axis
            .iter()
            .map(|&s| option.payoff(s, strike))
            .collect();

        // Grid columns indexed by time level; column N is the terminal
        // condition, columns 0..N are filled by the backward sweep.
        let mut grid: Vec<Vec<f64>> = vec![vec![0.0; m + 1]; n + 1];
        grid[n] = intrinsic.clone();

        // Asymptotic boundaries, discounted over the remaining time to
        // maturity. At the terminal column the discount is 1, so the
        // corners agree with the intrinsic payoff.
        for (k, column) in grid.iter_mut().enumerate() {
            let remaining = (n - k) as f64;
            let disc = (-rate * dt * remaining).exp();
            if option.is_call() {
                column[0] = 0.0;
                column[m] = self.grid.max_stock() - strike * disc;
            } else {
                column[0] = strike * disc;
                column[m] = 0.0;
            }
        }

        // Interior coefficients for stock level j = 1..M-1.
        let interior = m - 1;
        let mut a = vec![0.0; interior];
        let mut b = vec![0.0; interior];
        let mut c = vec![0.0; interior];
        for j in 1..m {
            let drift = rate * j as f64 * dt;
            let diffusion = (sigma * j as f64).powi(2) * dt;
            a[j - 1] = 0.5 * (diffusion - drift);
            b[j - 1] = match scheme {
                Scheme::Explicit => -diffusion,
                Scheme::Implicit => -(diffusion + rate * dt),
            };
            c[j - 1] = 0.5 * (diffusion + drift);
        }

        let early = option.allows_early_exercise();
        match scheme {
            Scheme::Explicit => {
                let norm = 1.0 / (1.0 + rate * dt);
                let op = TridiagonalOperator::new(
                    a[1..].to_vec(),
                    b.iter().map(|&bj| 1.0 + bj).collect(),
                    c[..interior - 1].to_vec(),
                )?;
                for k in (1..=n).rev() {
                    let mut next = op.apply(&grid[k][1..m]);
                    for value in next.iter_mut() {
                        *value *= norm;
                    }
                    next[0] += grid[k][0] * a[0] * norm;
                    next[interior - 1] += grid[k][m] * c[interior - 1] * norm;
                    self.write_interior(&mut grid, k - 1, next, &intrinsic, early);
                }
            }
            Scheme::Implicit => {
                let op = TridiagonalOperator::new(
                    a[1..].iter().map(|&aj| -aj).collect(),
                    b.iter().map(|&bj| 1.0 - bj).collect(),
                    c[..interior - 1].iter().map(|&cj| -cj).collect(),
                )?;
                // Coefficients are time-homogeneous: factorise once, reuse
                // for every step.
                let solver = ThomasSolver::factorise(&op)?;
                for k in (1..=n).rev() {
                    let mut rhs = grid[k][1..m].to_vec();
                    rhs[0] += a[0] * grid[k - 1][0];
                    rhs[interior - 1] += c[interior - 1] * grid[k - 1][m];
                    let next = solver.solve(&rhs);
                    self.write_interior(&mut grid, k - 1, next, &intrinsic, early);
                }
            }
        }

        interp_linear(&stock_axis, &grid[0], self.market.spot())
    }

    /// Writes a freshly computed interior column, applying the American
    /// intrinsic floor when required.
    fn write_interior(
        &self,
        grid: &mut [Vec<f64>],
        column: usize,
        values: Vec<f64>,
        intrinsic: &[f64],
        early: bool,
    ) {
        for (offset, value) in values.into_iter().enumerate() {
            let j = offset + 1;
            grid[column][j] = if early {
                value.max(intrinsic[j])
            } else {
                value
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn market(steps: usize) -> MarketParams {
        MarketParams::new(50.0, 50.0, 0.4, 0.1, 1.0, steps).unwrap()
    }

    #[test]
    fn test_scheme_tokens() {
        assert_eq!("explicit".parse::<Scheme>().unwrap(), Scheme::Explicit);
        assert_eq!("implicit".parse::<Scheme>().unwrap(), Scheme::Implicit);
        let err = "trapezoid".parse::<Scheme>().unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidMethod {
                kind: "PDE scheme",
                ..
            }
        ));
    }

    #[test]
    fn test_grid_spec_validation() {
        assert!(GridSpec::new(0.0, 100).is_err());
        assert!(GridSpec::new(100.0, 1).is_err());
        assert!(GridSpec::new(100.0, 2).is_ok());
    }

    #[test]
    fn test_implicit_put_positive_and_below_strike() {
        let engine = FiniteDifference::new(market(200), GridSpec::new(100.0, 100).unwrap());
        let price = engine.price(OptionType::EuropeanPut, Scheme::Implicit).unwrap();
        assert!(price > 0.0 && price < 50.0);
    }

    #[test]
    fn test_american_put_dominates_european() {
        let engine = FiniteDifference::new(market(200), GridSpec::new(100.0, 100).unwrap());
        let eu = engine.price(OptionType::EuropeanPut, Scheme::Implicit).unwrap();
        let am = engine.price(OptionType::AmericanPut, Scheme::Implicit).unwrap();
        // The intrinsic floor can only raise cell values.
        assert!(am >= eu);
    }

    #[test]
    fn test_deterministic_repeat() {
        let engine = FiniteDifference::new(market(200), GridSpec::new(100.0, 100).unwrap());
        let a = engine.price(OptionType::AmericanPut, Scheme::Implicit).unwrap();
        let b = engine.price(OptionType::AmericanPut, Scheme::Implicit).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_explicit_matches_implicit_on_stable_grid() {
        // Stability for the explicit scheme: dt = 1/2000 well below
        // 1/(sigma^2 M^2) = 1/(0.16 * 2500) = 2.5e-3.
        let market = MarketParams::new(50.0, 50.0, 0.4, 0.1, 1.0, 2000).unwrap();
        let engine = FiniteDifference::new(market, GridSpec::new(100.0, 50).unwrap());
        let explicit = engine.price(OptionType::EuropeanPut, Scheme::Explicit).unwrap();
        let implicit = engine.price(OptionType::EuropeanPut, Scheme::Implicit).unwrap();
        assert_relative_eq!(explicit, implicit, epsilon = 0.05);
    }

    #[test]
    fn test_minimal_grid_runs() {
        // M = 2 leaves a single interior cell; both schemes must still step.
        let engine = FiniteDifference::new(market(10), GridSpec::new(100.0, 2).unwrap());
        for scheme in [Scheme::Explicit, Scheme::Implicit] {
            let price = engine.price(OptionType::EuropeanPut, scheme).unwrap();
            assert!(price.is_finite());
        }
    }
}
