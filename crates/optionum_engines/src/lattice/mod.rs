//! Binomial lattice engine (Cox-Ross-Rubinstein parameterisation).
//!
//! The underlying moves up by `u = exp(σ√Δt)` or down by `d = 1/u` each
//! step; `u·d = 1` makes the tree recombine, so a step's prices are fully
//! described by one array and the whole valuation runs in O(N²) time and
//! O(N) space. Backward induction discounts the risk-neutral expectation
//! of the two children; American nodes are floored by the intrinsic value
//! at the node's reconstructed stock price.

mod asian;

pub use asian::AsianLattice;

use optionum_core::types::{MarketParams, OptionType};

/// CRR binomial tree for vanilla payoffs.
///
/// Derived constants (`u`, `d`, risk-neutral probability, per-step
/// discount) are computed once at construction; pricing itself is a
/// stateless function of the immutable configuration.
///
/// # Examples
/// ```
/// use optionum_core::types::{MarketParams, OptionType};
/// use optionum_engines::lattice::CrrLattice;
///
/// let market = MarketParams::new(50.0, 50.0, 0.4, 0.1, 1.0, 500).unwrap();
/// let tree = CrrLattice::new(market);
/// let price = tree.price(OptionType::AmericanPut);
/// assert!(price > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct CrrLattice {
    market: MarketParams,
    up: f64,
    prob_up: f64,
    step_discount: f64,
}

impl CrrLattice {
    /// Builds the lattice configuration from validated market parameters.
    pub fn new(market: MarketParams) -> Self {
        let dt = market.dt();
        let up = (market.volatility() * dt.sqrt()).exp();
        let down = 1.0 / up;
        let growth = (market.rate() * dt).exp();
        let prob_up = (growth - down) / (up - down);

        Self {
            market,
            up,
            prob_up,
            step_discount: market.step_discount(),
        }
    }

    /// Returns the market parameters the lattice was built from.
    #[inline]
    pub fn market(&self) -> &MarketParams {
        &self.market
    }

    /// Up-move factor u = exp(σ√Δt).
    #[inline]
    pub fn up_factor(&self) -> f64 {
        self.up
    }

    /// Risk-neutral up probability p = (exp(rΔt) − d)/(u − d).
    #[inline]
    pub fn up_probability(&self) -> f64 {
        self.prob_up
    }

    /// Prices a vanilla option by backward induction.
    ///
    /// Terminal intrinsic payoffs are collapsed one level per iteration:
    /// `f·(p·vᵢ + (1−p)·vᵢ₊₁)`, with the American floor applied at every
    /// interior node including the root. Deterministic: identical inputs
    /// return bit-for-bit identical prices.
    pub fn price(&self, option: OptionType) -> f64 {
        let n = self.market.steps();
        let spot = self.market.spot();
        let strike = self.market.strike();

        // Terminal leaves i = 0..=N at S₀·u^(N−2i)
        let mut values: Vec<f64> = (0..=n)
            .map(|i| {
                let terminal = spot * self.up.powi(n as i32 - 2 * i as i32);
                option.payoff(terminal, strike)
            })
            .collect();

        let early = option.allows_early_exercise();
        while values.len() > 1 {
            let len = values.len();
            for i in 0..len - 1 {
                // Stock price at this node, one level below the leaves of
                // the current array.
                let exponent = len as i32 - 2 - 2 * i as i32;
                let weighted = self.prob_up * values[i] + (1.0 - self.prob_up) * values[i + 1];
                let mut value = self.step_discount * weighted;
                if early {
                    let stock = spot * self.up.powi(exponent);
                    value = value.max(option.payoff(stock, strike));
                }
                values[i] = value;
            }
            values.pop();
        }

        values[0]
    }
}
