//! sde-pricer CLI - Monte Carlo pricing of a European call
//!
//! Command-line entry point for the Euler-Maruyama pricing engine.
//!
//! # Commands
//!
//! - `sde-pricer price` - Print the discounted Monte Carlo price
//! - `sde-pricer paths --count <n>` - Write sample paths as CSV
//! - `sde-pricer convergence --trials <list>` - Tabulate estimates against Black-Scholes
//!
//! # Configuration
//!
//! Defaults, then `sde_pricer.toml` (or `--config`), then `SDE_PRICER_*`
//! environment variables, then flags such as `--strike` or `--expiry`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

use commands::OutputFormat;
use config::{ConfigOverrides, PricerConfig, DEFAULT_CONFIG_FILE};
pub use error::{CliError, Result};

/// Euler-Maruyama Monte Carlo pricer
#[derive(Parser)]
#[command(name = "sde-pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(flatten)]
    overrides: ConfigOverrides,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price the European call
    Price {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Write sample paths as CSV
    Paths {
        /// Number of paths
        #[arg(long, default_value_t = 10)]
        count: usize,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare estimates at several trial counts with Black-Scholes
    Convergence {
        /// Comma-separated trial counts
        #[arg(long, value_delimiter = ',', default_value = "100,1000,10000,100000")]
        trials: Vec<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = PricerConfig::load_or_default(&cli.config)?
        .with_overrides(&ConfigOverrides::from_env()?)
        .with_overrides(&cli.overrides);
    config.validate()?;
    debug!(?config, "Configuration resolved");

    match cli.command {
        Commands::Price { format } => commands::price::run(&config, format),
        Commands::Paths { count, output } => {
            commands::paths::run(&config, count, output.as_deref())
        }
        Commands::Convergence { trials } => commands::convergence::run(&config, &trials),
    }
}
