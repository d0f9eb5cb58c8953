//! optionum - command-line option valuation.
//!
//! # Commands
//!
//! - `optionum price` - value a single contract with one engine
//! - `optionum compare` - value every vanilla contract with every engine,
//!   as a table or CSV

use clap::{Args, Parser, Subcommand};
use optionum_core::types::MarketParams;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// Shared market inputs for every command.
#[derive(Args, Debug, Clone, Copy)]
struct MarketArgs {
    /// Current price of the underlying
    #[arg(long, default_value_t = 50.0)]
    spot: f64,

    /// Strike price
    #[arg(long, default_value_t = 50.0)]
    strike: f64,

    /// Annualised volatility
    #[arg(long, default_value_t = 0.4)]
    volatility: f64,

    /// Continuously compounded risk-free rate
    #[arg(long, default_value_t = 0.1)]
    rate: f64,

    /// Time to maturity in years
    #[arg(long, default_value_t = 1.0)]
    maturity: f64,

    /// Number of time steps (lattice depth, PDE and path time levels)
    #[arg(long, default_value_t = 5)]
    steps: usize,
}

impl MarketArgs {
    fn build(&self) -> anyhow::Result<MarketParams> {
        Ok(MarketParams::new(
            self.spot,
            self.strike,
            self.volatility,
            self.rate,
            self.maturity,
            self.steps,
        )?)
    }
}

/// Option valuation engines: binomial lattice, finite differences,
/// Monte Carlo simulation and Black-Scholes closed forms.
#[derive(Parser)]
#[command(name = "optionum")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    market: MarketArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Value a single contract with one engine
    Price {
        /// Contract token (EC, EP, AC, AP)
        #[arg(short, long, default_value = "EP")]
        option: String,

        /// Engine (lattice, pde-explicit, pde-implicit, mc, closed-form)
        #[arg(short, long, default_value = "lattice")]
        engine: String,

        /// Average-price contract under the given rule (arithmetic, geometric)
        #[arg(short, long)]
        average: Option<String>,

        /// Monte Carlo sample size
        #[arg(short, long, default_value_t = 100_000)]
        iterations: usize,

        /// Fixed simulation seed; omit for entropy seeding
        #[arg(long)]
        seed: Option<u64>,

        /// Upper edge of the PDE stock axis
        #[arg(long, default_value_t = 100.0)]
        max_stock: f64,

        /// Number of PDE stock intervals
        #[arg(long, default_value_t = 100)]
        stock_steps: usize,
    },

    /// Value every vanilla contract with every engine
    Compare {
        /// Monte Carlo sample size
        #[arg(short, long, default_value_t = 100_000)]
        iterations: usize,

        /// Fixed simulation seed; omit for entropy seeding
        #[arg(long)]
        seed: Option<u64>,

        /// Upper edge of the PDE stock axis
        #[arg(long, default_value_t = 100.0)]
        max_stock: f64,

        /// Number of PDE stock intervals
        #[arg(long, default_value_t = 100)]
        stock_steps: usize,

        /// Write the comparison as CSV to this path instead of a table
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let market = cli.market.build()?;

    match cli.command {
        Commands::Price {
            option,
            engine,
            average,
            iterations,
            seed,
            max_stock,
            stock_steps,
        } => commands::price::run(
            market,
            &option,
            &engine,
            average.as_deref(),
            iterations,
            seed,
            max_stock,
            stock_steps,
        ),
        Commands::Compare {
            iterations,
            seed,
            max_stock,
            stock_steps,
            output,
        } => commands::compare::run(
            market,
            iterations,
            seed,
            max_stock,
            stock_steps,
            output.as_deref(),
        ),
    }
}
