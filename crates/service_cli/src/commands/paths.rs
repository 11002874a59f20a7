//! Paths command implementation
//!
//! Writes sample Euler-Maruyama realisations as CSV, one column per path,
//! for plotting with any external tool.

use pricer_pricing::mc::{EuropeanCallPricer, Path, TimeGrid};
use std::io::Write;
use tracing::info;

use crate::config::PricerConfig;
use crate::{CliError, Result};

/// Run the paths command
pub fn run(config: &PricerConfig, count: usize, output: Option<&std::path::Path>) -> Result<()> {
    if count == 0 {
        return Err(CliError::InvalidArgument(
            "--count must be at least 1".to_string(),
        ));
    }

    info!(count, expiry = config.expiry, step_size = config.step_size, "Simulating paths");
    let pricer = EuropeanCallPricer::new(config.pricing_params())?;
    let paths = pricer.sample_paths(count, config.expiry)?;

    match output {
        Some(file) => {
            write_csv(csv::Writer::from_path(file)?, &paths)?;
            info!(file = %file.display(), "Paths written");
        }
        None => write_csv(csv::Writer::from_writer(std::io::stdout()), &paths)?,
    }
    Ok(())
}

/// Writes `t,path_0,...,path_{n-1}` rows, one per grid point.
fn write_csv<W: Write>(mut writer: csv::Writer<W>, paths: &[(TimeGrid, Path)]) -> Result<()> {
    let Some((grid, _)) = paths.first() else {
        return Ok(());
    };

    let mut header = vec!["t".to_string()];
    header.extend((0..paths.len()).map(|i| format!("path_{}", i)));
    writer.write_record(&header)?;

    for (row, t) in grid.as_slice().iter().enumerate() {
        let mut record = Vec::with_capacity(paths.len() + 1);
        record.push(t.to_string());
        record.extend(paths.iter().map(|(_, path)| path.as_slice()[row].to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
