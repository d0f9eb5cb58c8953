//! Shared parameter, contract, and error types.

mod contract;
mod error;
mod market;

pub use contract::{AveragingMethod, OptionType};
pub use error::PricingError;
pub use market::MarketParams;
