//! Numerical utilities shared by the valuation engines.

pub mod distributions;
pub mod interpolation;
pub mod polyfit;
pub mod tridiagonal;

pub use interpolation::interp_linear;
pub use polyfit::{polyfit, polyval};
pub use tridiagonal::{ThomasSolver, TridiagonalOperator};
