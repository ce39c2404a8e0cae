//! Annealing configuration.

use crate::error::{Error, Result};
use crate::neighborhood::Neighborhood;

/// Configuration for the simulated-annealing search.
///
/// The cooling schedule is exponential:
/// `T(step) = t_max * exp(ln(t_min / t_max) * step / steps)`,
/// reaching `t_min` exactly when the step budget is exhausted.
///
/// # Examples
///
/// ```
/// use hubloc::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_hub_count(4)
///     .with_t_max(10_000.0)
///     .with_t_min(0.5)
///     .with_steps(100_000);
/// ```
#[derive(Debug, Clone)]
pub struct SaConfig {
    /// Number of hubs to place. Checked against the model at run
    /// start.
    pub hub_count: usize,

    /// Starting temperature. Higher values accept more worsening
    /// moves early on.
    pub t_max: f64,

    /// Final temperature, reached at the end of the step budget.
    pub t_min: f64,

    /// Total number of moves to attempt (the step budget).
    pub steps: usize,

    /// Neighbor operator driving the trajectory.
    pub neighborhood: Neighborhood,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            hub_count: 3,
            t_max: 25_000.0,
            t_min: 1.0,
            steps: 500_000,
            neighborhood: Neighborhood::default(),
            seed: None,
        }
    }
}

impl SaConfig {
    /// Sets the number of hubs to place.
    pub fn with_hub_count(mut self, k: usize) -> Self {
        self.hub_count = k;
        self
    }

    /// Sets the starting temperature.
    pub fn with_t_max(mut self, t: f64) -> Self {
        self.t_max = t;
        self
    }

    /// Sets the final temperature.
    pub fn with_t_min(mut self, t: f64) -> Self {
        self.t_min = t;
        self
    }

    /// Sets the step budget.
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
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
        if self.t_max <= 0.0 {
            return Err(Error::config(format!(
                "t_max must be positive, got {}",
                self.t_max
            )));
        }
        if self.t_min <= 0.0 {
            return Err(Error::config(format!(
                "t_min must be positive, got {}",
                self.t_min
            )));
        }
        if self.t_min >= self.t_max {
            return Err(Error::config(format!(
                "t_min ({}) must be less than t_max ({})",
                self.t_min, self.t_max
            )));
        }
        if self.steps == 0 {
            return Err(Error::config("steps must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SaConfig::default();
        assert_eq!(config.hub_count, 3);
        assert!((config.t_max - 25_000.0).abs() < 1e-10);
        assert!((config.t_min - 1.0).abs() < 1e-10);
        assert_eq!(config.steps, 500_000);
        assert_eq!(config.neighborhood, Neighborhood::HubRelocation);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SaConfig::default()
            .with_hub_count(2)
            .with_t_max(100.0)
            .with_t_min(0.01)
            .with_steps(5000)
            .with_neighborhood(Neighborhood::Reassignment)
            .with_seed(9);

        assert_eq!(config.hub_count, 2);
        assert!((config.t_max - 100.0).abs() < 1e-10);
        assert!((config.t_min - 0.01).abs() < 1e-10);
        assert_eq!(config.steps, 5000);
        assert_eq!(config.neighborhood, Neighborhood::Reassignment);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_validate_rejects_bad_temperatures() {
        assert!(SaConfig::default().with_t_max(-1.0).validate().is_err());
        assert!(SaConfig::default().with_t_min(-1.0).validate().is_err());
        assert!(SaConfig::default()
            .with_t_max(1.0)
            .with_t_min(10.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_zero_steps() {
        assert!(SaConfig::default().with_steps(0).validate().is_err());
    }
}
