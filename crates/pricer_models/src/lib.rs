//! # Pricer Models (L2: Business Logic)
//!
//! Stochastic dynamics and the instrument they price.
//!
//! This crate provides:
//! - The [`SdeModel`](models::SdeModel) drift/diffusion contract and its laws
//! - The European call payoff
//! - The Black-Scholes closed form, used as an approximate oracle
//!
//! ## Design Principles
//!
//! - **Coefficients, not schemes**: models expose `drift(t, y)` and
//!   `diffusion(t, y)` only; discretisation lives in `pricer_pricing`
//! - **Immutable parameters**: validated once at construction

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod models;
