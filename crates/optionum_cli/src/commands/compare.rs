//! Compare command: every vanilla contract through every engine.

use optionum_core::types::{MarketParams, OptionType};
use optionum_engines::analytical::{black_scholes, ReferenceOption};
use optionum_engines::lattice::CrrLattice;
use optionum_engines::mc::MonteCarlo;
use optionum_engines::pde::{FiniteDifference, GridSpec, Scheme};
use serde::Serialize;
use tracing::info;

/// One contract priced across the engine set. The closed form only
/// exists for European exercise.
#[derive(Debug, Serialize)]
struct ComparisonRow {
    option: &'static str,
    closed_form: Option<f64>,
    lattice: f64,
    pde_implicit: f64,
    monte_carlo: f64,
}

pub fn run(
    market: MarketParams,
    iterations: usize,
    seed: Option<u64>,
    max_stock: f64,
    stock_steps: usize,
    output: Option<&str>,
) -> anyhow::Result<()> {
    info!(
        "Comparing engines: spot {}, strike {}, {} steps, {} iterations",
        market.spot(),
        market.strike(),
        market.steps(),
        iterations
    );

    let tree = CrrLattice::new(market);
    let pde = FiniteDifference::new(market, GridSpec::new(max_stock, stock_steps)?);
    let mc = MonteCarlo::new(market);
    let mut rng = super::sim_rng(seed);

    let mut rows = Vec::with_capacity(OptionType::ALL.len());
    for option in OptionType::ALL {
        let closed_form = match option {
            OptionType::EuropeanCall => Some(ReferenceOption::EuropeanCall),
            OptionType::EuropeanPut => Some(ReferenceOption::EuropeanPut),
            _ => None,
        }
        .map(|reference| {
            black_scholes(
                reference,
                market.spot(),
                market.strike(),
                market.maturity(),
                market.volatility(),
                market.rate(),
            )
        });

        rows.push(ComparisonRow {
            option: option.code(),
            closed_form,
            lattice: tree.price(option),
            pde_implicit: pde.price(option, Scheme::Implicit)?,
            monte_carlo: mc.price(option, iterations, &mut rng)?,
        });
    }

    match output {
        Some(path) => write_csv(path, &rows)?,
        None => print_table(&rows),
    }
    Ok(())
}

fn write_csv(path: &str, rows: &[ComparisonRow]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!("Wrote {} rows to {path}", rows.len());
    Ok(())
}

fn print_table(rows: &[ComparisonRow]) {
    println!("\n┌────────┬─────────────┬────────────┬──────────────┬─────────────┐");
    println!("│ Option │ Closed form │ Lattice    │ PDE implicit │ Monte Carlo │");
    println!("├────────┼─────────────┼────────────┼──────────────┼─────────────┤");
    for row in rows {
        let closed = row
            .closed_form
            .map(|value| format!("{value:11.6}"))
            .unwrap_or_else(|| format!("{:>11}", "-"));
        println!(
            "│ {:6} │ {} │ {:10.6} │ {:12.6} │ {:11.6} │",
            row.option, closed, row.lattice, row.pde_implicit, row.monte_carlo
        );
    }
    println!("└────────┴─────────────┴────────────┴──────────────┴─────────────┘");
}
