//! Parallel restart orchestration.
//!
//! Metaheuristic trajectories are cheap to restart and embarrassingly
//! parallel: every trajectory only reads the shared [`CostModel`].
//! This module fans out independent seeded trajectories over rayon,
//! joins them, and reports the lowest-cost winner together with
//! per-trajectory metadata. There is no shared mutable state and
//! therefore no locking anywhere.

use crate::error::{Error, Result};
use crate::ga::{GaConfig, GaRunner};
use crate::model::{Candidate, CostModel};
use crate::sa::{self, SaConfig};
use crate::tabu::{TabuConfig, TabuRunner};
use rayon::prelude::*;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// One of the three search engines with its tuning.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Population-based genetic search.
    Genetic(GaConfig),
    /// Single-trajectory simulated annealing.
    Annealing(SaConfig),
    /// Memory-guided tabu search.
    Tabu(TabuConfig),
}

impl Strategy {
    /// Short name for reports.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Genetic(_) => "genetic",
            Strategy::Annealing(_) => "annealing",
            Strategy::Tabu(_) => "tabu",
        }
    }

    /// Validates the wrapped config against the model.
    fn check(&self, model: &CostModel) -> Result<()> {
        match self {
            Strategy::Genetic(config) => {
                config.validate()?;
                model.check_hub_count(config.hub_count)
            }
            Strategy::Annealing(config) => {
                config.validate()?;
                model.check_hub_count(config.hub_count)
            }
            Strategy::Tabu(config) => {
                config.validate()?;
                model.check_hub_count(config.hub_count)
            }
        }
    }

    /// A copy with the seed offset by `offset`, so restarts of a
    /// seeded strategy stay reproducible yet explore independently.
    /// Unseeded strategies stay unseeded.
    fn reseeded(&self, offset: u64) -> Strategy {
        fn shift(seed: Option<u64>, offset: u64) -> Option<u64> {
            seed.map(|s| s.wrapping_add(offset))
        }
        match self {
            Strategy::Genetic(c) => {
                let mut c = c.clone();
                c.seed = shift(c.seed, offset);
                Strategy::Genetic(c)
            }
            Strategy::Annealing(c) => {
                let mut c = c.clone();
                c.seed = shift(c.seed, offset);
                Strategy::Annealing(c)
            }
            Strategy::Tabu(c) => {
                let mut c = c.clone();
                c.seed = shift(c.seed, offset);
                Strategy::Tabu(c)
            }
        }
    }
}

/// Result of one trajectory in a fan-out.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TrajectoryOutcome {
    /// Best candidate this trajectory found.
    pub best: Candidate,

    /// Engine that produced it.
    pub strategy: &'static str,

    /// Generations, steps, or iterations consumed.
    pub work: usize,

    /// Whether the trajectory was cancelled externally.
    pub cancelled: bool,

    /// Wall-clock duration of this trajectory.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub elapsed: Duration,
}

/// Joined result of a parallel fan-out.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PortfolioReport {
    /// Lowest-normalized-cost candidate across all trajectories.
    pub best: Candidate,

    /// Every trajectory's outcome, in spawn order.
    pub trajectories: Vec<TrajectoryOutcome>,

    /// Wall-clock duration of the whole fan-out.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub elapsed: Duration,
}

/// Runs one trajectory per strategy in parallel and picks the winner.
///
/// Every config is validated against the model before anything is
/// spawned; a bad strategy fails the whole call without starting any
/// search. The optional cancellation flag is shared by all
/// trajectories, each of which returns its best-so-far when the flag
/// is raised.
pub fn run_portfolio(
    model: &CostModel,
    strategies: &[Strategy],
    cancel: Option<Arc<AtomicBool>>,
) -> Result<PortfolioReport> {
    if strategies.is_empty() {
        return Err(Error::config("portfolio needs at least one strategy"));
    }
    for strategy in strategies {
        strategy.check(model)?;
    }

    let start = Instant::now();
    let outcomes: Vec<Result<TrajectoryOutcome>> = strategies
        .par_iter()
        .map(|strategy| run_trajectory(model, strategy, cancel.clone()))
        .collect();
    let trajectories = outcomes.into_iter().collect::<Result<Vec<_>>>()?;

    let best = trajectories
        .iter()
        .min_by(|a, b| {
            a.best
                .normalized_cost
                .partial_cmp(&b.best.normalized_cost)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("portfolio has at least one trajectory")
        .best
        .clone();

    Ok(PortfolioReport {
        best,
        trajectories,
        elapsed: start.elapsed(),
    })
}

/// Runs `restarts` independent copies of one strategy in parallel and
/// picks the winner.
///
/// A seeded strategy gets per-restart seed offsets, so the fan-out is
/// reproducible while every restart still walks its own trajectory.
pub fn run_many(
    model: &CostModel,
    strategy: &Strategy,
    restarts: usize,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<PortfolioReport> {
    if restarts == 0 {
        return Err(Error::config("restarts must be at least 1"));
    }
    let strategies: Vec<Strategy> = (0..restarts)
        .map(|i| strategy.reseeded(i as u64))
        .collect();
    run_portfolio(model, &strategies, cancel)
}

fn run_trajectory(
    model: &CostModel,
    strategy: &Strategy,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<TrajectoryOutcome> {
    let name = strategy.name();
    match strategy {
        Strategy::Genetic(config) => {
            let result = GaRunner::run_with_cancel(model, config, cancel)?;
            Ok(TrajectoryOutcome {
                best: result.best,
                strategy: name,
                work: result.generations,
                cancelled: result.cancelled,
                elapsed: result.elapsed,
            })
        }
        Strategy::Annealing(config) => {
            let outcome = sa::anneal_with_cancel(model, config, cancel)?;
            Ok(TrajectoryOutcome {
                best: outcome.best,
                strategy: name,
                work: outcome.steps,
                cancelled: outcome.cancelled,
                elapsed: outcome.elapsed,
            })
        }
        Strategy::Tabu(config) => {
            let result = TabuRunner::run_with_cancel(model, config, cancel)?;
            Ok(TrajectoryOutcome {
                best: result.best,
                strategy: name,
                work: result.iterations,
                cancelled: result.cancelled,
                elapsed: result.elapsed,
            })
        }
    }
}
