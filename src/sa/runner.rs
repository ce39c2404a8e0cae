//! Annealing loop.
//!
//! Single trajectory with Metropolis acceptance over any
//! [`AnnealState`]. The state is snapshotted before every move and
//! the snapshot restored on rejection, so the engine always compares
//! against the untouched previous state.

use super::config::SaConfig;
use super::types::{AnnealState, HubState};
use crate::error::Result;
use crate::model::{Candidate, CostModel};
use crate::neighborhood;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of an annealing run over a generic state.
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// Lowest-energy state seen across the whole trajectory.
    pub best: S,

    /// Energy of the best state.
    pub best_energy: f64,

    /// Number of steps executed.
    pub steps: usize,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Temperature when the run stopped.
    pub final_temperature: f64,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best energy sampled at regular step intervals.
    pub energy_history: Vec<f64>,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

/// Executes the annealing loop.
pub struct SaRunner;

impl SaRunner {
    /// Anneals from `initial` to completion of the step budget.
    pub fn run<S: AnnealState>(initial: S, config: &SaConfig) -> Result<SaResult<S>> {
        Self::run_with_cancel(initial, config, None)
    }

    /// Anneals with an optional cancellation flag, checked once per
    /// step boundary (never mid-evaluation).
    pub fn run_with_cancel<S: AnnealState>(
        initial: S,
        config: &SaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult<S>> {
        config.validate()?;

        let start = Instant::now();
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        // ln(t_min / t_max) < 0; the schedule decays from t_max to
        // exactly t_min over the step budget.
        let t_factor = (config.t_min / config.t_max).ln();
        let total_steps = config.steps as f64;

        let mut current = initial;
        let mut previous = current.clone();
        let mut previous_energy = current.energy();
        let mut best = current.clone();
        let mut best_energy = previous_energy;

        let mut temperature = config.t_max;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cancelled = false;
        let mut steps_done = 0usize;

        let history_interval = (config.steps / 100).max(1);
        let mut energy_history = Vec::with_capacity(config.steps / history_interval + 2);
        energy_history.push(best_energy);

        for step in 1..=config.steps {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            steps_done = step;
            temperature = config.t_max * (t_factor * step as f64 / total_steps).exp();

            current.step(&mut rng);
            let energy = current.energy();
            let delta = energy - previous_energy;

            if acceptance_probability(delta, temperature) > rng.random_range(0.0..1.0) {
                accepted_moves += 1;
                if delta < 0.0 {
                    improving_moves += 1;
                }
                previous = current.clone();
                previous_energy = energy;
                if energy < best_energy {
                    best = current.clone();
                    best_energy = energy;
                }
            } else {
                // Discard the rejected move.
                current = previous.clone();
            }

            if step % history_interval == 0 {
                energy_history.push(best_energy);
            }
        }

        Ok(SaResult {
            best,
            best_energy,
            steps: steps_done,
            accepted_moves,
            improving_moves,
            final_temperature: temperature,
            cancelled,
            energy_history,
            elapsed: start.elapsed(),
        })
    }
}

/// Metropolis criterion: 1 for non-worsening moves, `exp(-dE/T)`
/// otherwise.
pub(crate) fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if delta <= 0.0 {
        1.0
    } else {
        (-delta / temperature).exp()
    }
}

/// Outcome of annealing a hub-location candidate.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealOutcome {
    /// Best candidate found.
    pub best: Candidate,

    /// Number of steps executed.
    pub steps: usize,

    /// Number of accepted moves.
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Wall-clock duration of the run.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub elapsed: Duration,
}

/// Anneals a random initial hub allocation against `model`.
pub fn anneal(model: &CostModel, config: &SaConfig) -> Result<AnnealOutcome> {
    anneal_with_cancel(model, config, None)
}

/// [`anneal`] with an optional cancellation flag.
pub fn anneal_with_cancel(
    model: &CostModel,
    config: &SaConfig,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<AnnealOutcome> {
    config.validate()?;
    model.check_hub_count(config.hub_count)?;

    // One master RNG seeds both the initial draw and the trajectory,
    // keeping the whole run reproducible from a single seed.
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let initial = neighborhood::initial_candidate(model, config.hub_count, &mut rng);
    let state = HubState::new(model, initial, config.neighborhood);
    let trajectory_config = config.clone().with_seed(rng.random());

    let result = SaRunner::run_with_cancel(state, &trajectory_config, cancel)?;
    Ok(AnnealOutcome {
        best: result.best.into_candidate(),
        steps: result.steps,
        accepted_moves: result.accepted_moves,
        improving_moves: result.improving_moves,
        cancelled: result.cancelled,
        elapsed: result.elapsed,
    })
}
