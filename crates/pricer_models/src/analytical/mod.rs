//! Closed-form reference prices.
//!
//! Used to sanity-check Monte Carlo estimates of GBM dynamics.

pub mod black_scholes;
pub mod distributions;
pub mod error;

pub use black_scholes::BlackScholes;
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
