//! Market parameter set shared by every engine.

use super::error::PricingError;

/// Immutable market/discretisation parameters for one valuation.
///
/// Validated once at construction; every engine receives the set by value
/// and derives its own discretisation constants from it.
///
/// # Examples
/// ```
/// use optionum_core::types::MarketParams;
///
/// let market = MarketParams::new(50.0, 50.0, 0.4, 0.1, 1.0, 5).unwrap();
/// assert_eq!(market.dt(), 0.2);
/// assert!(MarketParams::new(50.0, 50.0, -0.4, 0.1, 1.0, 5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketParams {
    spot: f64,
    strike: f64,
    volatility: f64,
    rate: f64,
    maturity: f64,
    steps: usize,
}

impl MarketParams {
    /// Creates a validated parameter set.
    ///
    /// # Arguments
    /// * `spot` - current underlying price S₀ (must be positive)
    /// * `strike` - strike price K (must be positive)
    /// * `volatility` - annualised volatility σ (must be positive)
    /// * `rate` - risk-free rate r (unrestricted)
    /// * `maturity` - time to maturity T in years (must be positive)
    /// * `steps` - number of time steps N (must be at least 1)
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` naming the first offending input.
    pub fn new(
        spot: f64,
        strike: f64,
        volatility: f64,
        rate: f64,
        maturity: f64,
        steps: usize,
    ) -> Result<Self, PricingError> {
        if !(spot > 0.0) {
            return Err(PricingError::InvalidParameter {
                name: "spot",
                value: spot,
            });
        }
        if !(strike > 0.0) {
            return Err(PricingError::InvalidParameter {
                name: "strike",
                value: strike,
            });
        }
        if !(volatility > 0.0) {
            return Err(PricingError::InvalidParameter {
                name: "volatility",
                value: volatility,
            });
        }
        if !rate.is_finite() {
            return Err(PricingError::InvalidParameter {
                name: "rate",
                value: rate,
            });
        }
        if !(maturity > 0.0) {
            return Err(PricingError::InvalidParameter {
                name: "maturity",
                value: maturity,
            });
        }
        if steps < 1 {
            return Err(PricingError::InvalidParameter {
                name: "steps",
                value: steps as f64,
            });
        }

        Ok(Self {
            spot,
            strike,
            volatility,
            rate,
            maturity,
            steps,
        })
    }

    /// Returns the spot price S₀.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the strike price K.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the annualised volatility σ.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the risk-free rate r.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the time to maturity T in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Returns the number of time steps N.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Time step size Δt = T / N.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.maturity / self.steps as f64
    }

    /// Per-step discount factor exp(−r·Δt).
    #[inline]
    pub fn step_discount(&self) -> f64 {
        (-self.rate * self.dt()).exp()
    }

    /// Discount factor over the full life, exp(−r·T).
    #[inline]
    pub fn discount(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }
}
