//! Genetic engine configuration.

use crate::error::{Error, Result};

/// Configuration for the genetic search.
///
/// Defaults mirror the tuning the solver ships with: a population of
/// 300 evolved for up to 200 generations with a 5% per-entry mutation
/// rate, stopping early after 100 generations without improvement.
///
/// # Builder Pattern
///
/// ```
/// use hubloc::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_hub_count(4)
///     .with_population_size(200)
///     .with_mutation_rate(0.1)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// Number of hubs to place. Must satisfy `1 <= hub_count < n`
    /// for the target network; checked against the model at run start.
    pub hub_count: usize,

    /// Number of candidates in the population.
    pub population_size: usize,

    /// Per-entry probability of reassigning an allocation entry to a
    /// random hub of the same candidate (0.0–1.0).
    pub mutation_rate: f64,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    /// Number of generations without a new best-ever candidate before
    /// stopping. 0 disables stagnation-based termination.
    pub stagnation_limit: usize,

    /// Whether to evaluate offspring in parallel using rayon.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            hub_count: 3,
            population_size: 300,
            mutation_rate: 0.05,
            max_generations: 200,
            stagnation_limit: 100,
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the number of hubs to place.
    pub fn with_hub_count(mut self, k: usize) -> Self {
        self.hub_count = k;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Enables or disables parallel offspring evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
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
        if self.population_size < 2 {
            return Err(Error::config("population_size must be at least 2"));
        }
        if self.max_generations == 0 {
            return Err(Error::config("max_generations must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(Error::config(format!(
                "mutation_rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.hub_count, 3);
        assert_eq!(config.population_size, 300);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert_eq!(config.max_generations, 200);
        assert_eq!(config.stagnation_limit, 100);
        assert!(config.parallel);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_hub_count(5)
            .with_population_size(50)
            .with_mutation_rate(0.2)
            .with_max_generations(1000)
            .with_stagnation_limit(0)
            .with_parallel(false)
            .with_seed(99);

        assert_eq!(config.hub_count, 5);
        assert_eq!(config.population_size, 50);
        assert!((config.mutation_rate - 0.2).abs() < 1e-10);
        assert_eq!(config.max_generations, 1000);
        assert_eq!(config.stagnation_limit, 0);
        assert!(!config.parallel);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn test_mutation_rate_clamped() {
        let config = GaConfig::default().with_mutation_rate(1.5);
        assert!((config.mutation_rate - 1.0).abs() < 1e-10);
        let config = GaConfig::default().with_mutation_rate(-0.5);
        assert!(config.mutation_rate.abs() < 1e-10);
    }

    #[test]
    fn test_validate_rejects_tiny_population() {
        assert!(GaConfig::default().with_population_size(1).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_generations() {
        assert!(GaConfig::default().with_max_generations(0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_hubs() {
        assert!(GaConfig::default().with_hub_count(0).validate().is_err());
    }
}
