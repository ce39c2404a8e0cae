//! Genetic search engine.
//!
//! Evolves a population of hub allocations. Selection replicates
//! members into a mating pool in proportion to fitness (the
//! reciprocal of normalized cost), crossover recombines hub vectors
//! at a single random split point, and allocations are rebuilt with
//! the shared nearest-hub rule before mutation perturbs individual
//! entries. Offspring whose crossed-over hub vector collapses to a
//! duplicate are replaced by fresh random candidates.
//!
//! # Key Types
//!
//! - [`GaConfig`]: population size, mutation rate, termination
//! - [`GaRunner`]: executes the generational loop
//! - [`GaResult`]: best candidate plus convergence metadata

mod config;
mod runner;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner};
