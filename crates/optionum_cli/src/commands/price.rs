//! Price command: one contract, one engine.

use anyhow::bail;
use optionum_core::types::{AveragingMethod, MarketParams, OptionType};
use optionum_engines::analytical::{black_scholes, ReferenceOption};
use optionum_engines::lattice::{AsianLattice, CrrLattice};
use optionum_engines::mc::MonteCarlo;
use optionum_engines::pde::{FiniteDifference, GridSpec, Scheme};
use tracing::info;

#[allow(clippy::too_many_arguments)]
pub fn run(
    market: MarketParams,
    option: &str,
    engine: &str,
    average: Option<&str>,
    iterations: usize,
    seed: Option<u64>,
    max_stock: f64,
    stock_steps: usize,
) -> anyhow::Result<()> {
    let option: OptionType = option.parse()?;
    let average = average
        .map(|token| token.parse::<AveragingMethod>())
        .transpose()?;

    info!("Pricing {option} with the {engine} engine");

    let price = match (engine, average) {
        ("lattice", None) => CrrLattice::new(market).price(option),
        ("lattice", Some(method)) => AsianLattice::new(market).price(option, method),
        ("pde-explicit", None) | ("pde-implicit", None) => {
            let scheme = match engine {
                "pde-explicit" => Scheme::Explicit,
                _ => Scheme::Implicit,
            };
            let grid = GridSpec::new(max_stock, stock_steps)?;
            FiniteDifference::new(market, grid).price(option, scheme)?
        }
        ("pde-explicit", Some(_)) | ("pde-implicit", Some(_)) => {
            bail!("the finite-difference engine does not support average-price contracts")
        }
        ("mc", None) => MonteCarlo::new(market).price(option, iterations, &mut super::sim_rng(seed))?,
        ("mc", Some(method)) => MonteCarlo::new(market).price_asian(
            option,
            method,
            iterations,
            &mut super::sim_rng(seed),
        )?,
        ("closed-form", average) => closed_form(market, option, average)?,
        (other, _) => bail!(
            "unknown engine: {other}. Supported: lattice, pde-explicit, pde-implicit, mc, closed-form"
        ),
    };

    println!("{price:.6}");
    Ok(())
}

fn closed_form(
    market: MarketParams,
    option: OptionType,
    average: Option<AveragingMethod>,
) -> anyhow::Result<f64> {
    let reference = match (option, average) {
        (OptionType::EuropeanCall, None) => ReferenceOption::EuropeanCall,
        (OptionType::EuropeanPut, None) => ReferenceOption::EuropeanPut,
        (OptionType::EuropeanCall, Some(AveragingMethod::Arithmetic)) => {
            ReferenceOption::AsianArithmeticCall
        }
        (OptionType::EuropeanPut, Some(AveragingMethod::Arithmetic)) => {
            ReferenceOption::AsianArithmeticPut
        }
        (OptionType::EuropeanCall, Some(AveragingMethod::Geometric)) => {
            ReferenceOption::AsianGeometricCall
        }
        (OptionType::EuropeanPut, Some(AveragingMethod::Geometric)) => {
            ReferenceOption::AsianGeometricPut
        }
        (OptionType::AmericanCall | OptionType::AmericanPut, _) => {
            bail!("no closed form exists for American contracts")
        }
    };
    Ok(black_scholes(
        reference,
        market.spot(),
        market.strike(),
        market.maturity(),
        market.volatility(),
        market.rate(),
    ))
}
