//! Simulated-annealing engine.
//!
//! A single-trajectory search with Metropolis acceptance and an
//! exponential cooling schedule. The loop is generic over
//! [`AnnealState`] (deep copy, in-place move, energy); [`HubState`]
//! adapts the hub-location candidate to it, and [`anneal`] wires the
//! two together for the common case.
//!
//! # Key Types
//!
//! - [`SaConfig`]: temperatures, step budget, operator
//! - [`SaRunner`]: the generic annealing loop
//! - [`SaResult`] / [`AnnealOutcome`]: best state plus acceptance
//!   statistics

mod config;
mod runner;
mod types;

pub use config::SaConfig;
pub use runner::{anneal, anneal_with_cancel, AnnealOutcome, SaResult, SaRunner};
pub use types::{AnnealState, HubState};
