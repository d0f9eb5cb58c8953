//! # optionum_engines: numerical option-valuation engines
//!
//! Three independent engines price the same contract space (European and
//! American calls/puts, vanilla or average-price) and can be run on
//! identical [`MarketParams`](optionum_core::types::MarketParams) to
//! cross-validate each other:
//!
//! - [`lattice`]: Cox-Ross-Rubinstein binomial tree, with the
//!   path-keyed [`lattice::AsianLattice`] extension for average-price
//!   payoffs
//! - [`pde`]: finite-difference Black-Scholes solver, explicit and
//!   implicit schemes, American early-exercise floor
//! - [`mc`]: Monte Carlo simulation with Longstaff-Schwartz regression
//!   for early exercise
//!
//! [`analytical`] holds the closed-form Black-Scholes reference formulas
//! (including the Asian approximations). The engines never consume them;
//! they exist for the test harness and the CLI comparison report.
//!
//! Each pricing call is a synchronous pure computation over immutable
//! inputs: all working arrays are owned by the call and dropped at return,
//! so repeated calls with identical inputs (and, for Monte Carlo, an
//! identical seed) return identical results.
//!
//! ## Example
//!
//! ```rust
//! use optionum_core::types::{MarketParams, OptionType};
//! use optionum_engines::lattice::CrrLattice;
//!
//! let market = MarketParams::new(50.0, 50.0, 0.4, 0.1, 1.0, 5).unwrap();
//! let tree = CrrLattice::new(market);
//! let put = tree.price(OptionType::EuropeanPut);
//! let call = tree.price(OptionType::EuropeanCall);
//!
//! // Put-call parity on the same tree
//! let parity = call - put - (50.0 - 50.0 * (-0.1f64).exp());
//! assert!(parity.abs() < 1e-9);
//! ```

pub mod analytical;
pub mod lattice;
pub mod mc;
pub mod pde;

pub use lattice::{AsianLattice, CrrLattice};
pub use mc::{MonteCarlo, SimRng};
pub use pde::{FiniteDifference, GridSpec, Scheme};
