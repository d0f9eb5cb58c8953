//! Path-keyed binomial lattice for average-price (Asian) payoffs.
//!
//! An average-price payoff depends on the whole price history, so the
//! recombining trick of the vanilla lattice does not apply: two nodes at
//! the same price are distinct entities when their histories differ. The
//! tree therefore enumerates every path, 2^i nodes at depth i.
//!
//! The running average is a sufficient statistic for both the terminal
//! payoff and the American intrinsic check, so nodes store incrementally
//! updated running means instead of full histories: node `j` at depth `i`
//! has children `2j` (up) and `2j+1` (down) at depth `i+1`, which gives
//! the parent back-reference `j = child / 2` without any explicit path
//! keys. Probability weighting stays keyed to the binary tree structure,
//! not to the averages.
//!
//! # Cost
//!
//! Time and space are O(2^N) by design; this engine is only tractable for
//! small step counts (roughly N ≤ 20). The bound is a documented scope
//! limit for callers, not validated internally.

use optionum_core::types::{AveragingMethod, MarketParams, OptionType};

/// One enumerated path endpoint.
///
/// `arith_mean` is the running arithmetic mean of the `depth + 1` prices
/// observed so far (root included); `log_mean` is the running mean of
/// their logarithms, exponentiated on use for the geometric average.
#[derive(Debug, Clone, Copy)]
struct PathNode {
    price: f64,
    arith_mean: f64,
    log_mean: f64,
}

impl PathNode {
    #[inline]
    fn average(&self, method: AveragingMethod) -> f64 {
        match method {
            AveragingMethod::Arithmetic => self.arith_mean,
            AveragingMethod::Geometric => self.log_mean.exp(),
        }
    }
}

/// Full-path binomial tree for arithmetic/geometric average-price options.
///
/// # Examples
/// ```
/// use optionum_core::types::{AveragingMethod, MarketParams, OptionType};
/// use optionum_engines::lattice::AsianLattice;
///
/// let market = MarketParams::new(50.0, 50.0, 0.4, 0.1, 1.0, 10).unwrap();
/// let tree = AsianLattice::new(market);
/// let arith = tree.price(OptionType::EuropeanCall, AveragingMethod::Arithmetic);
/// let geom = tree.price(OptionType::EuropeanCall, AveragingMethod::Geometric);
/// // AM-GM: the arithmetic average dominates pathwise, so the call does too.
/// assert!(arith >= geom);
/// ```
#[derive(Debug, Clone)]
pub struct AsianLattice {
    market: MarketParams,
    up: f64,
    down: f64,
    prob_up: f64,
    step_discount: f64,
}

impl AsianLattice {
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
            down,
            prob_up,
            step_discount: market.step_discount(),
        }
    }

    /// Returns the market parameters the lattice was built from.
    #[inline]
    pub fn market(&self) -> &MarketParams {
        &self.market
    }

    /// Prices an average-price option by path-keyed backward induction.
    ///
    /// Terminal payoffs are the intrinsic value of each path's final
    /// running average; parents combine their two children with the usual
    /// `f·(p·up + (1−p)·down)` rule, floored by the path's own intrinsic
    /// average value for American exercise. The root combines the two
    /// depth-1 nodes with discounting only.
    pub fn price(&self, option: OptionType, method: AveragingMethod) -> f64 {
        let levels = self.enumerate_paths();
        let n = self.market.steps();
        let strike = self.market.strike();

        let mut values: Vec<f64> = levels[n]
            .iter()
            .map(|node| option.payoff(node.average(method), strike))
            .collect();

        let early = option.allows_early_exercise();
        for depth in (1..n).rev() {
            let nodes = &levels[depth];
            let mut parent_values = Vec::with_capacity(nodes.len());
            for (j, node) in nodes.iter().enumerate() {
                let weighted =
                    self.prob_up * values[2 * j] + (1.0 - self.prob_up) * values[2 * j + 1];
                let mut value = self.step_discount * weighted;
                if early {
                    value = value.max(option.payoff(node.average(method), strike));
                }
                parent_values.push(value);
            }
            values = parent_values;
        }

        self.step_discount * (self.prob_up * values[0] + (1.0 - self.prob_up) * values[1])
    }

    /// Enumerates every path level by level, updating running averages
    /// incrementally from the parent node.
    fn enumerate_paths(&self) -> Vec<Vec<PathNode>> {
        let n = self.market.steps();
        let spot = self.market.spot();

        let root = PathNode {
            price: spot,
            arith_mean: spot,
            log_mean: spot.ln(),
        };
        let mut levels: Vec<Vec<PathNode>> = Vec::with_capacity(n + 1);
        levels.push(vec![root]);

        for depth in 1..=n {
            let parents = &levels[depth - 1];
            let mut nodes = Vec::with_capacity(parents.len() * 2);
            let observed = depth as f64;
            for parent in parents {
                for factor in [self.up, self.down] {
                    let price = parent.price * factor;
                    nodes.push(PathNode {
                        price,
                        arith_mean: (parent.arith_mean * observed + price) / (observed + 1.0),
                        log_mean: (parent.log_mean * observed + price.ln()) / (observed + 1.0),
                    });
                }
            }
            levels.push(nodes);
        }

        levels
    }
}
