//! Pricing error types.
//!
//! All validation happens before any numerical work starts, so an error
//! always means the call performed no partial computation.

use thiserror::Error;

/// Errors raised by parameter validation and token parsing.
///
/// # Variants
/// - `InvalidOptionType`: unsupported payoff/exercise token
/// - `InvalidMethod`: unsupported PDE scheme or averaging method token
/// - `InvalidParameter`: non-positive or out-of-range numerical input
///
/// # Examples
/// ```
/// use optionum_core::types::{OptionType, PricingError};
///
/// let err = "XX".parse::<OptionType>().unwrap_err();
/// assert!(matches!(err, PricingError::InvalidOptionType { .. }));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Unsupported option type token.
    #[error("Invalid option type: {token:?}")]
    InvalidOptionType {
        /// The rejected token.
        token: String,
    },

    /// Unsupported method token (PDE scheme or averaging method).
    #[error("Invalid {kind}: {token:?}")]
    InvalidMethod {
        /// Which method family the token belongs to.
        kind: &'static str,
        /// The rejected token.
        token: String,
    },

    /// Numerical parameter outside its valid domain.
    #[error("Invalid parameter: {name} = {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The offending value.
        value: f64,
    },
}
