//! Option contract definitions.
//!
//! The supported contract space is exercise style {European, American} ×
//! payoff direction {call, put}, addressed by the wire tokens `EC`, `EP`,
//! `AC`, `AP`. Average-price (Asian) variants are the same four contracts
//! evaluated on a running average; the averaging rule is selected
//! separately via [`AveragingMethod`].

use std::fmt;
use std::str::FromStr;

use super::error::PricingError;

/// Option type: exercise style and payoff direction.
///
/// # Examples
/// ```
/// use optionum_core::types::OptionType;
///
/// let call: OptionType = "EC".parse().unwrap();
/// assert!(call.is_call());
/// assert!(!call.allows_early_exercise());
/// assert_eq!(call.payoff(60.0, 50.0), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
    /// European call (`EC`): exercise at maturity, payoff max(S − K, 0).
    EuropeanCall,
    /// European put (`EP`): exercise at maturity, payoff max(K − S, 0).
    EuropeanPut,
    /// American call (`AC`): early exercise allowed.
    AmericanCall,
    /// American put (`AP`): early exercise allowed.
    AmericanPut,
}

impl OptionType {
    /// All supported option types, in the conventional reporting order.
    pub const ALL: [OptionType; 4] = [
        OptionType::EuropeanPut,
        OptionType::EuropeanCall,
        OptionType::AmericanPut,
        OptionType::AmericanCall,
    ];

    /// Returns the wire token (`EC`, `EP`, `AC`, `AP`).
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            OptionType::EuropeanCall => "EC",
            OptionType::EuropeanPut => "EP",
            OptionType::AmericanCall => "AC",
            OptionType::AmericanPut => "AP",
        }
    }

    /// Returns whether the payoff direction is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::EuropeanCall | OptionType::AmericanCall)
    }

    /// Returns whether the holder may exercise before maturity.
    #[inline]
    pub fn allows_early_exercise(&self) -> bool {
        matches!(self, OptionType::AmericanCall | OptionType::AmericanPut)
    }

    /// Intrinsic payoff against `strike` for a given `state` value.
    ///
    /// The state is the spot price for vanilla contracts and the running
    /// average for average-price contracts.
    #[inline]
    pub fn payoff(&self, state: f64, strike: f64) -> f64 {
        if self.is_call() {
            (state - strike).max(0.0)
        } else {
            (strike - state).max(0.0)
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EC" => Ok(OptionType::EuropeanCall),
            "EP" => Ok(OptionType::EuropeanPut),
            "AC" => Ok(OptionType::AmericanCall),
            "AP" => Ok(OptionType::AmericanPut),
            other => Err(PricingError::InvalidOptionType {
                token: other.to_string(),
            }),
        }
    }
}

/// Averaging rule for average-price (Asian) contracts.
///
/// # Examples
/// ```
/// use optionum_core::types::AveragingMethod;
///
/// let m: AveragingMethod = "geometric".parse().unwrap();
/// assert_eq!(m, AveragingMethod::Geometric);
/// assert!("harmonic".parse::<AveragingMethod>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AveragingMethod {
    /// Arithmetic mean of the observed prices.
    Arithmetic,
    /// Geometric mean of the observed prices.
    Geometric,
}

impl AveragingMethod {
    /// Returns the wire token (`arithmetic`, `geometric`).
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            AveragingMethod::Arithmetic => "arithmetic",
            AveragingMethod::Geometric => "geometric",
        }
    }
}

impl fmt::Display for AveragingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for AveragingMethod {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arithmetic" => Ok(AveragingMethod::Arithmetic),
            "geometric" => Ok(AveragingMethod::Geometric),
            other => Err(PricingError::InvalidMethod {
                kind: "averaging method",
                token: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_tokens() {
        assert_eq!("EC".parse::<OptionType>().unwrap(), OptionType::EuropeanCall);
        assert_eq!("EP".parse::<OptionType>().unwrap(), OptionType::EuropeanPut);
        assert_eq!("AC".parse::<OptionType>().unwrap(), OptionType::AmericanCall);
        assert_eq!("AP".parse::<OptionType>().unwrap(), OptionType::AmericanPut);
    }

    #[test]
    fn test_parse_rejects_unknown_token() {
        let err = "XX".parse::<OptionType>().unwrap_err();
        match err {
            PricingError::InvalidOptionType { token } => assert_eq!(token, "XX"),
            other => panic!("expected InvalidOptionType, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("ec".parse::<OptionType>().is_err());
    }

    #[test]
    fn test_code_round_trip() {
        for option in OptionType::ALL {
            assert_eq!(option.code().parse::<OptionType>().unwrap(), option);
        }
    }

    #[test]
    fn test_call_put_payoff() {
        let call = OptionType::EuropeanCall;
        let put = OptionType::AmericanPut;
        assert_eq!(call.payoff(60.0, 50.0), 10.0);
        assert_eq!(call.payoff(40.0, 50.0), 0.0);
        assert_eq!(put.payoff(40.0, 50.0), 10.0);
        assert_eq!(put.payoff(60.0, 50.0), 0.0);
    }

    #[test]
    fn test_early_exercise_predicate() {
        assert!(!OptionType::EuropeanCall.allows_early_exercise());
        assert!(!OptionType::EuropeanPut.allows_early_exercise());
        assert!(OptionType::AmericanCall.allows_early_exercise());
        assert!(OptionType::AmericanPut.allows_early_exercise());
    }

    #[test]
    fn test_averaging_method_tokens() {
        assert_eq!(
            "arithmetic".parse::<AveragingMethod>().unwrap(),
            AveragingMethod::Arithmetic
        );
        assert_eq!(
            "geometric".parse::<AveragingMethod>().unwrap(),
            AveragingMethod::Geometric
        );

        let err = "median".parse::<AveragingMethod>().unwrap_err();
        match err {
            PricingError::InvalidMethod { kind, token } => {
                assert_eq!(kind, "averaging method");
                assert_eq!(token, "median");
            }
            other => panic!("expected InvalidMethod, got {other:?}"),
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(OptionType::AmericanPut.to_string(), "AP");
        assert_eq!(AveragingMethod::Geometric.to_string(), "geometric");
    }
}
