//! Tabu engine configuration.

use crate::error::{Error, Result};
use crate::neighborhood::Neighborhood;

/// Configuration for the tabu search.
///
/// The tabu list remembers the last `capacity` changed nodes; a move
/// touching one of them is only admitted through the aspiration
/// escape, which fires after `aspiration` iterations without a new
/// best. `branching` controls how many neighbors are sampled per
/// iteration.
///
/// # Examples
///
/// ```
/// use hubloc::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_hub_count(4)
///     .with_capacity(5)
///     .with_branching(100)
///     .with_aspiration(4);
/// ```
#[derive(Debug, Clone)]
pub struct TabuConfig {
    /// Number of hubs to place. Checked against the model at run
    /// start.
    pub hub_count: usize,

    /// Tabu-list capacity (recency memory, FIFO).
    pub capacity: usize,

    /// Number of neighbor candidates sampled per iteration.
    pub branching: usize,

    /// Aspiration window: a tabu move is admitted anyway once the
    /// best candidate is older than this many iterations.
    pub aspiration: usize,

    /// Maximum number of iterations.
    pub max_iterations: usize,

    /// Stop once the best candidate is older than this many
    /// iterations. 0 disables stagnation-based termination.
    pub stagnation_limit: usize,

    /// Neighbor operator driving the search.
    pub neighborhood: Neighborhood,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            hub_count: 3,
            capacity: 5,
            branching: 60,
            aspiration: 4,
            max_iterations: 500,
            stagnation_limit: 10_000,
            neighborhood: Neighborhood::default(),
            seed: None,
        }
    }
}

impl TabuConfig {
    /// Sets the number of hubs to place.
    pub fn with_hub_count(mut self, k: usize) -> Self {
        self.hub_count = k;
        self
    }

    /// Sets the tabu-list capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the number of neighbors sampled per iteration.
    pub fn with_branching(mut self, branching: usize) -> Self {
        self.branching = branching;
        self
    }

    /// Sets the aspiration window.
    pub fn with_aspiration(mut self, aspiration: usize) -> Self {
        self.aspiration = aspiration;
        self
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the neighbor operator.
    pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.hub_count < 1 {
            return Err(Error::config("hub_count must be at least 1"));
        }
        if self.capacity < 1 {
            return Err(Error::config("capacity must be at least 1"));
        }
        if self.branching < 1 {
            return Err(Error::config("branching must be at least 1"));
        }
        if self.max_iterations == 0 {
            return Err(Error::config("max_iterations must be at least 1"));
        }
        Ok(())
    }
}
