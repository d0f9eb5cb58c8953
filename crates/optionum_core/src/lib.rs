//! # optionum_core: foundation layer of the optionum valuation library
//!
//! Provides the pieces every numerical engine shares:
//! - Validated, immutable parameter and contract types (`types`)
//! - Structured error types: [`types::PricingError`]
//! - Numerical utilities (`math`): tridiagonal operator and Thomas solver,
//!   polynomial least squares, linear interpolation, normal distribution
//!   functions
//!
//! ## Zero dependency principle
//!
//! This layer depends on no other optionum crate and only on minimal
//! external crates (`num-traits`, `thiserror`). All engine-specific logic
//! lives in `optionum_engines`.
//!
//! ## Usage
//!
//! ```rust
//! use optionum_core::types::{MarketParams, OptionType};
//!
//! let market = MarketParams::new(50.0, 50.0, 0.4, 0.1, 1.0, 5).unwrap();
//! let put: OptionType = "EP".parse().unwrap();
//! assert_eq!(put.payoff(45.0, market.strike()), 5.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod math;
pub mod types;
