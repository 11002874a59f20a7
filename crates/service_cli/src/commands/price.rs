//! Price command implementation
//!
//! Prices the configured European call and prints the result.

use pricer_pricing::mc::{EuropeanCallPricer, PricingResult};
use serde::Serialize;
use std::io::Write;
use tracing::info;

use super::OutputFormat;
use crate::config::PricerConfig;
use crate::Result;

/// Price report written in JSON mode
#[derive(Debug, Serialize)]
struct PriceReport {
    expiry: f64,
    #[serde(flatten)]
    result: PricingResult,
    confidence_95: f64,
}

/// Run the price command
pub fn run(config: &PricerConfig, format: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout();
    write_price(&mut stdout.lock(), config, format)
}

fn write_price<W: Write>(out: &mut W, config: &PricerConfig, format: OutputFormat) -> Result<()> {
    info!(
        spot = config.spot,
        strike = config.strike,
        expiry = config.expiry,
        n_trials = config.n_trials,
        step_size = config.step_size,
        parallel = config.parallel,
        "Starting pricing"
    );

    let pricer = EuropeanCallPricer::new(config.pricing_params())?;
    let result = pricer.price(config.expiry)?;

    match format {
        OutputFormat::Text => writeln!(out, "{}", result.price)?,
        OutputFormat::Json => {
            let report = PriceReport {
                expiry: config.expiry,
                result,
                confidence_95: result.confidence_95(),
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }

    info!(price = result.price, std_error = result.std_error, "Pricing complete");
    Ok(())
}
