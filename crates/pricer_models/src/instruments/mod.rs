//! Instrument definitions.

pub mod error;
pub mod payoff;

pub use error::InstrumentError;
pub use payoff::EuropeanCall;
