//! Convergence command implementation
//!
//! Prices the call at increasing trial counts and tabulates each estimate
//! against the Black-Scholes reference.
//!
//! Rows are independent runs: with a configured seed, row `i` draws from
//! `SeedSequence::new(seed).child(i)`, so a small row is never a prefix of a
//! larger one.

use pricer_models::analytical::BlackScholes;
use pricer_pricing::mc::{EuropeanCallPricer, PricingParams};
use pricer_pricing::rng::SeedSequence;
use std::io::Write;
use tracing::info;

use crate::config::PricerConfig;
use crate::{CliError, Result};

/// One row of the convergence table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceRow {
    /// Trials used
    pub n_trials: usize,
    /// Discounted Monte Carlo estimate
    pub estimate: f64,
    /// Standard error of the estimate
    pub std_error: f64,
    /// Black-Scholes price
    pub reference: f64,
}

impl ConvergenceRow {
    /// Absolute deviation from the reference
    pub fn abs_error(&self) -> f64 {
        (self.estimate - self.reference).abs()
    }
}

/// Run the convergence command
pub fn run(config: &PricerConfig, trials: &[usize]) -> Result<()> {
    let rows = convergence_rows(config, trials)?;
    let stdout = std::io::stdout();
    write_table(&mut stdout.lock(), &rows)
}

/// Prices at each trial count in `trials`.
pub fn convergence_rows(config: &PricerConfig, trials: &[usize]) -> Result<Vec<ConvergenceRow>> {
    if trials.is_empty() {
        return Err(CliError::InvalidArgument(
            "--trials needs at least one value".to_string(),
        ));
    }

    let reference = BlackScholes::new(config.spot, config.rate, config.volatility)?
        .price_call(config.strike, config.expiry);

    let seeds = config.seed.map(SeedSequence::new);

    trials
        .iter()
        .enumerate()
        .map(|(row, &n_trials)| -> Result<ConvergenceRow> {
            let params = PricingParams {
                n_trials,
                seed: seeds.map(|s| s.child(row as u64)),
                ..config.pricing_params()
            };
            let result = EuropeanCallPricer::new(params)?.price(config.expiry)?;
            info!(n_trials, estimate = result.price, "Convergence point");
            Ok(ConvergenceRow {
                n_trials,
                estimate: result.price,
                std_error: result.std_error,
                reference,
            })
        })
        .collect()
}

fn write_table<W: Write>(out: &mut W, rows: &[ConvergenceRow]) -> Result<()> {
    writeln!(
        out,
        "{:>12}  {:>12}  {:>12}  {:>12}  {:>12}",
        "n_trials", "estimate", "std_error", "reference", "abs_error"
    )?;
    for row in rows {
        writeln!(
            out,
            "{:>12}  {:>12.6}  {:>12.6}  {:>12.6}  {:>12.6}",
            row.n_trials,
            row.estimate,
            row.std_error,
            row.reference,
            row.abs_error()
        )?;
    }
    Ok(())
}
