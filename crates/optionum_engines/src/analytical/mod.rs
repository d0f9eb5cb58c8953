//! Closed-form Black-Scholes reference formulas.
//!
//! These are the stateless oracle the numerical engines are validated
//! against; nothing in `lattice`, `pde` or `mc` consumes them. European
//! prices are exact Black-Scholes; average-price contracts use the
//! standard continuous-average approximations: the geometric average of a
//! lognormal is lognormal (volatility σ/√3, drift (r − σ²/6)/2), and the
//! arithmetic average is moment-matched to a lognormal through its first
//! two moments.

use std::fmt;
use std::str::FromStr;

use optionum_core::math::distributions::norm_cdf;
use optionum_core::types::PricingError;

/// Contract space covered by the reference formulas.
///
/// Wire tokens: `EC`, `EP` (European), `AEC-A`, `AEP-A` (Asian
/// arithmetic), `AEC-G`, `AEP-G` (Asian geometric). All are
/// European-exercise; no closed form exists for American contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceOption {
    /// European call.
    EuropeanCall,
    /// European put.
    EuropeanPut,
    /// Asian call, arithmetic average (moment-matched approximation).
    AsianArithmeticCall,
    /// Asian put, arithmetic average (moment-matched approximation).
    AsianArithmeticPut,
    /// Asian call, geometric average (continuous-average adjustment).
    AsianGeometricCall,
    /// Asian put, geometric average (continuous-average adjustment).
    AsianGeometricPut,
}

impl ReferenceOption {
    /// Returns the wire token.
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            ReferenceOption::EuropeanCall => "EC",
            ReferenceOption::EuropeanPut => "EP",
            ReferenceOption::AsianArithmeticCall => "AEC-A",
            ReferenceOption::AsianArithmeticPut => "AEP-A",
            ReferenceOption::AsianGeometricCall => "AEC-G",
            ReferenceOption::AsianGeometricPut => "AEP-G",
        }
    }

    #[inline]
    fn is_call(&self) -> bool {
        matches!(
            self,
            ReferenceOption::EuropeanCall
                | ReferenceOption::AsianArithmeticCall
                | ReferenceOption::AsianGeometricCall
        )
    }
}

impl fmt::Display for ReferenceOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ReferenceOption {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EC" => Ok(ReferenceOption::EuropeanCall),
            "EP" => Ok(ReferenceOption::EuropeanPut),
            "AEC-A" => Ok(ReferenceOption::AsianArithmeticCall),
            "AEP-A" => Ok(ReferenceOption::AsianArithmeticPut),
            "AEC-G" => Ok(ReferenceOption::AsianGeometricCall),
            "AEP-G" => Ok(ReferenceOption::AsianGeometricPut),
            other => Err(PricingError::InvalidOptionType {
                token: other.to_string(),
            }),
        }
    }
}

/// Reference price of a European or average-price option.
///
/// The arithmetic-average approximation divides by the rate and is not
/// defined at r = 0.
///
/// # Examples
/// ```
/// use optionum_engines::analytical::{black_scholes, ReferenceOption};
///
/// let call = black_scholes(ReferenceOption::EuropeanCall, 50.0, 50.0, 1.0, 0.4, 0.1);
/// let put = black_scholes(ReferenceOption::EuropeanPut, 50.0, 50.0, 1.0, 0.4, 0.1);
/// let parity = call - put - (50.0 - 50.0 * (-0.1f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
pub fn black_scholes(
    option: ReferenceOption,
    spot: f64,
    strike: f64,
    maturity: f64,
    volatility: f64,
    rate: f64,
) -> f64 {
    match option {
        ReferenceOption::EuropeanCall | ReferenceOption::EuropeanPut => {
            european(option.is_call(), spot, strike, maturity, volatility, rate)
        }
        ReferenceOption::AsianGeometricCall | ReferenceOption::AsianGeometricPut => {
            // Geometric average of a lognormal is lognormal with adjusted
            // drift and volatility.
            let adj_rate = (rate - volatility.powi(2) / 6.0) / 2.0;
            let adj_vol = volatility * (1.0f64 / 3.0).sqrt();
            ((adj_rate - rate) * maturity).exp()
                * european(option.is_call(), spot, strike, maturity, adj_vol, adj_rate)
        }
        ReferenceOption::AsianArithmeticCall | ReferenceOption::AsianArithmeticPut => {
            arithmetic_asian(option.is_call(), spot, strike, maturity, volatility, rate)
        }
    }
}

/// Exact Black-Scholes European price.
fn european(is_call: bool, spot: f64, strike: f64, maturity: f64, volatility: f64, rate: f64) -> f64 {
    let vol_sqrt_t = volatility * maturity.sqrt();
    let d1 = ((spot / strike).ln() + (rate + volatility.powi(2) / 2.0) * maturity) / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;
    let discount = (-rate * maturity).exp();

    if is_call {
        spot * norm_cdf(d1) - strike * discount * norm_cdf(d2)
    } else {
        strike * discount * norm_cdf(-d2) - spot * norm_cdf(-d1)
    }
}

/// Moment-matched lognormal approximation for the continuous arithmetic
/// average: F₀ = M₁ and σ̃² = ln(M₂/M₁²)/T, priced Black-76 style.
fn arithmetic_asian(
    is_call: bool,
    spot: f64,
    strike: f64,
    maturity: f64,
    volatility: f64,
    rate: f64,
) -> f64 {
    let var = volatility.powi(2);
    let m1 = ((rate * maturity).exp() - 1.0) / (rate * maturity) * spot;
    let m2 = 2.0 * ((2.0 * rate + var) * maturity).exp() * spot.powi(2)
        / ((rate + var) * (2.0 * rate + var) * maturity.powi(2))
        + 2.0 * spot.powi(2) / (rate * maturity.powi(2))
            * (1.0 / (2.0 * rate + var) - (rate * maturity).exp() / (rate + var));

    let forward = m1;
    let avg_vol = ((m2 / m1.powi(2)).ln() / maturity).sqrt();
    let vol_sqrt_t = avg_vol * maturity.sqrt();
    // Guard the log against a zero-forward degenerate limit.
    let d1 = ((forward / strike + 1e-20).ln() + vol_sqrt_t.powi(2) / 2.0) / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;
    let discount = (-rate * maturity).exp();

    if is_call {
        discount * (forward * norm_cdf(d1) - strike * norm_cdf(d2))
    } else {
        discount * (strike * norm_cdf(-d2) - forward * norm_cdf(-d1))
    }
}
