//! Monte Carlo simulation engine with Longstaff-Schwartz early exercise.
//!
//! European contracts are priced as the discounted mean payoff over
//! independent terminal draws (vanilla) or simulated running averages
//! (Asian). American contracts simulate full paths and estimate the
//! continuation value at each decision date by regressing realised
//! discounted cash flows on the current state variable over the
//! in-the-money paths (Longstaff-Schwartz, degree-3 polynomial).
//!
//! Prices are statistically convergent only: the standard error shrinks
//! proportionally to 1/√iterations. Payoff evaluation over generated
//! paths is parallelised with order-preserving indexed maps and all
//! reductions are sequential, so a fixed seed gives bit-identical prices
//! regardless of thread count.

mod rng;

pub use rng::SimRng;

use optionum_core::math::{polyfit, polyval};
use optionum_core::types::{AveragingMethod, MarketParams, OptionType, PricingError};
use rayon::prelude::*;

/// Degree of the Longstaff-Schwartz regression polynomial.
pub const POLY_DEGREE: usize = 3;

/// Monte Carlo valuation engine.
///
/// Drift and discount constants are derived once at construction; each
/// pricing call owns its simulated paths exclusively and drops them at
/// return.
///
/// # Examples
/// ```
/// use optionum_core::types::{MarketParams, OptionType};
/// use optionum_engines::mc::{MonteCarlo, SimRng};
///
/// let market = MarketParams::new(50.0, 50.0, 0.4, 0.1, 1.0, 5).unwrap();
/// let engine = MonteCarlo::new(market);
/// let mut rng = SimRng::from_seed(42);
/// let price = engine.price(OptionType::EuropeanPut, 10_000, &mut rng).unwrap();
/// assert!(price > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct MonteCarlo {
    market: MarketParams,
    /// Risk-neutral log-drift μ = r − σ²/2.
    drift: f64,
    dt: f64,
    step_discount: f64,
}

impl MonteCarlo {
    /// Builds the engine from validated market parameters.
    pub fn new(market: MarketParams) -> Self {
        Self {
            market,
            drift: market.rate() - market.volatility().powi(2) / 2.0,
            dt: market.dt(),
            step_discount: market.step_discount(),
        }
    }

    /// Returns the market parameters.
    #[inline]
    pub fn market(&self) -> &MarketParams {
        &self.market
    }

    /// Prices a vanilla option.
    ///
    /// European: single terminal draw per iteration. American: full
    /// N-step paths with Longstaff-Schwartz backward induction.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` if `iterations` is zero.
    pub fn price(
        &self,
        option: OptionType,
        iterations: usize,
        rng: &mut SimRng,
    ) -> Result<f64, PricingError> {
        validate_iterations(iterations)?;

        if option.allows_early_exercise() {
            let paths = self.simulate_paths(iterations, rng);
            Ok(self.longstaff_schwartz(&paths, option))
        } else {
            let terminal = self.terminal_prices(iterations, rng);
            Ok(self.discounted_mean_payoff(&terminal, option))
        }
    }

    /// Prices an average-price option.
    ///
    /// The state variable carried per path is the running average under
    /// the chosen rule; both the payoff and the Longstaff-Schwartz
    /// regression are keyed to it.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` if `iterations` is zero.
    pub fn price_asian(
        &self,
        option: OptionType,
        method: AveragingMethod,
        iterations: usize,
        rng: &mut SimRng,
    ) -> Result<f64, PricingError> {
        validate_iterations(iterations)?;

        let averages = self.simulate_averages(method, iterations, rng);
        if option.allows_early_exercise() {
            Ok(self.longstaff_schwartz(&averages, option))
        } else {
            let terminal = &averages[averages.len() - 1];
            Ok(self.discounted_mean_payoff(terminal, option))
        }
    }

    /// Terminal prices S_T = S₀·exp(μT + σ√T·Z) from one draw each.
    fn terminal_prices(&self, iterations: usize, rng: &mut SimRng) -> Vec<f64> {
        let maturity = self.market.maturity();
        let scale = self.market.volatility() * maturity.sqrt();
        let spot = self.market.spot();

        let mut draws = vec![0.0; iterations];
        rng.fill_normal(&mut draws);
        draws
            .into_par_iter()
            .map(|z| spot * (self.drift * maturity + scale * z).exp())
            .collect()
    }

    /// Full GBM trajectories, level by level: `levels[i][j]` is path j at
    /// time step i, with `levels[0]` pinned at the spot.
    fn simulate_paths(&self, iterations: usize, rng: &mut SimRng) -> Vec<Vec<f64>> {
        let n = self.market.steps();
        let step_scale = self.market.volatility() * self.dt.sqrt();
        let step_drift = self.drift * self.dt;

        let mut levels = Vec::with_capacity(n + 1);
        levels.push(vec![self.market.spot(); iterations]);

        let mut draws = vec![0.0; iterations];
        for _ in 0..n {
            rng.fill_normal(&mut draws);
            let previous = &levels[levels.len() - 1];
            let next: Vec<f64> = previous
                .par_iter()
                .zip(draws.par_iter())
                .map(|(&price, &z)| price * (step_drift + step_scale * z).exp())
                .collect();
            levels.push(next);
        }
        levels
    }

    /// Running averages carried alongside GBM trajectories; the price
    /// levels themselves are not retained.
    fn simulate_averages(
        &self,
        method: AveragingMethod,
        iterations: usize,
        rng: &mut SimRng,
    ) -> Vec<Vec<f64>> {
        let n = self.market.steps();
        let step_scale = self.market.volatility() * self.dt.sqrt();
        let step_drift = self.drift * self.dt;
        let spot = self.market.spot();

        let mut prices = vec![spot; iterations];
        let mut levels = Vec::with_capacity(n + 1);
        levels.push(vec![spot; iterations]);

        let mut draws = vec![0.0; iterations];
        for step in 0..n {
            rng.fill_normal(&mut draws);
            let next_prices: Vec<f64> = prices
                .par_iter()
                .zip(draws.par_iter())
                .map(|(&price, &z)| price * (step_drift + step_scale * z).exp())
                .collect();

            // Incremental update over the step+2 observations seen so far
            // (the spot counts as the first).
            let observed = (step + 1) as f64;
            let current = &levels[levels.len() - 1];
            let next_avg: Vec<f64> = current
                .par_iter()
                .zip(next_prices.par_iter())
                .map(|(&avg, &price)| match method {
                    AveragingMethod::Arithmetic => (avg * observed + price) / (observed + 1.0),
                    AveragingMethod::Geometric => {
                        ((avg.ln() * observed + price.ln()) / (observed + 1.0)).exp()
                    }
                })
                .collect();

            prices = next_prices;
            levels.push(next_avg);
        }
        levels
    }

    /// Discounted mean payoff over terminal states.
    fn discounted_mean_payoff(&self, terminal: &[f64], option: OptionType) -> f64 {
        let strike = self.market.strike();
        let payoffs: Vec<f64> = terminal
            .par_iter()
            .map(|&state| option.payoff(state, strike))
            .collect();
        let mean = payoffs.iter().sum::<f64>() / payoffs.len() as f64;
        mean * self.market.discount()
    }

    /// Longstaff-Schwartz backward induction over simulated state levels.
    ///
    /// At each decision date the cash-flow vector is discounted one step,
    /// then, if more in-the-money paths exist than the regression degree,
    /// a degree-3 polynomial of discounted cash flow on the state is fitted
    /// over those paths and exercise taken wherever the immediate payoff
    /// beats the fitted continuation value. A degenerate regression (too
    /// few paths, or a singular fit) is absorbed by carrying the cash flow
    /// forward unchanged.
    fn longstaff_schwartz(&self, states: &[Vec<f64>], option: OptionType) -> f64 {
        let n = self.market.steps();
        let strike = self.market.strike();
        let iterations = states[0].len();

        let payoff: Vec<Vec<f64>> = states
            .iter()
            .map(|level| {
                level
                    .par_iter()
                    .map(|&state| option.payoff(state, strike))
                    .collect()
            })
            .collect();

        let mut cash_flow = payoff[n].clone();
        for i in (1..n).rev() {
            for value in cash_flow.iter_mut() {
                *value *= self.step_discount;
            }

            let in_the_money: Vec<usize> =
                (0..iterations).filter(|&j| payoff[i][j] > 0.0).collect();
            if in_the_money.len() <= POLY_DEGREE {
                continue;
            }

            let xs: Vec<f64> = in_the_money.iter().map(|&j| states[i][j]).collect();
            let ys: Vec<f64> = in_the_money.iter().map(|&j| cash_flow[j]).collect();
            let coeffs = match polyfit(&xs, &ys, POLY_DEGREE) {
                Ok(coeffs) => coeffs,
                Err(_) => continue,
            };

            for (&j, &state) in in_the_money.iter().zip(xs.iter()) {
                let continuation = polyval(&coeffs, state);
                if payoff[i][j] > continuation {
                    cash_flow[j] = payoff[i][j];
                }
            }
        }

        // One more discount step from t = 1 to t = 0.
        let mean = cash_flow.iter().sum::<f64>() / iterations as f64;
        mean * self.step_discount
    }
}

fn validate_iterations(iterations: usize) -> Result<(), PricingError> {
    if iterations == 0 {
        return Err(PricingError::InvalidParameter {
            name: "iterations",
            value: 0.0,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn market(steps: usize) -> MarketParams {
        MarketParams::new(50.0, 50.0, 0.4, 0.1, 1.0, steps).unwrap()
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let engine = MonteCarlo::new(market(5));
        let mut rng = SimRng::from_seed(1);
        let result = engine.price(OptionType::EuropeanCall, 0, &mut rng);
        assert!(matches!(
            result,
            Err(PricingError::InvalidParameter {
                name: "iterations",
                ..
            })
        ));
    }

    #[test]
    fn test_seeded_runs_reproduce() {
        let engine = MonteCarlo::new(market(5));
        let a = engine
            .price(OptionType::AmericanPut, 20_000, &mut SimRng::from_seed(42))
            .unwrap();
        let b = engine
            .price(OptionType::AmericanPut, 20_000, &mut SimRng::from_seed(42))
            .unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_path_levels_shape() {
        let engine = MonteCarlo::new(market(5));
        let mut rng = SimRng::from_seed(3);
        let levels = engine.simulate_paths(100, &mut rng);
        assert_eq!(levels.len(), 6);
        assert!(levels.iter().all(|level| level.len() == 100));
        assert!(levels[0].iter().all(|&s| s == 50.0));
        assert!(levels[5].iter().all(|&s| s > 0.0));
    }

    #[test]
    fn test_running_average_between_extremes() {
        let engine = MonteCarlo::new(market(5));
        let mut rng = SimRng::from_seed(3);
        let levels = engine.simulate_averages(AveragingMethod::Arithmetic, 500, &mut rng);
        // An average of positive prices stays positive and smooths the
        // terminal dispersion below the raw path dispersion.
        assert!(levels[5].iter().all(|&avg| avg > 0.0));
    }

    #[test]
    fn test_forward_price_recovered() {
        // The discounted mean of S_T under the risk-neutral measure is S₀;
        // check the simulation drift via a zero-strike call equivalent.
        let engine = MonteCarlo::new(market(5));
        let mut rng = SimRng::from_seed(11);
        let terminal = engine.terminal_prices(400_000, &mut rng);
        let mean = terminal.iter().sum::<f64>() / terminal.len() as f64;
        let forward = 50.0 * (0.1f64).exp();
        assert_relative_eq!(mean, forward, epsilon = 0.3);
    }

    #[test]
    fn test_american_put_dominates_european() {
        let engine = MonteCarlo::new(market(5));
        let eu = engine
            .price(OptionType::EuropeanPut, 100_000, &mut SimRng::from_seed(17))
            .unwrap();
        let am = engine
            .price(OptionType::AmericanPut, 100_000, &mut SimRng::from_seed(18))
            .unwrap();
        // Sampling noise allowance at these iteration counts.
        assert!(am >= eu - 0.1, "american {am} below european {eu}");
    }

    #[test]
    fn test_degenerate_regression_absorbed() {
        // A far out-of-the-money put leaves almost no in-the-money paths:
        // the regression must be skipped, never an error.
        let market = MarketParams::new(50.0, 1.0, 0.2, 0.1, 1.0, 5).unwrap();
        let engine = MonteCarlo::new(market);
        let price = engine
            .price(OptionType::AmericanPut, 2_000, &mut SimRng::from_seed(5))
            .unwrap();
        assert!(price >= 0.0 && price < 0.5);
    }

    #[test]
    fn test_asian_european_call_below_vanilla() {
        let engine = MonteCarlo::new(market(10));
        let vanilla = engine
            .price(OptionType::EuropeanCall, 100_000, &mut SimRng::from_seed(23))
            .unwrap();
        let asian = engine
            .price_asian(
                OptionType::EuropeanCall,
                AveragingMethod::Arithmetic,
                100_000,
                &mut SimRng::from_seed(23),
            )
            .unwrap();
        assert!(asian < vanilla);
    }
}
