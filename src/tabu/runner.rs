//! Tabu search loop.
//!
//! Memory-guided steepest-descent over sampled neighborhoods: each
//! iteration samples a branch of neighbors, sorts them by cost, and
//! accepts the cheapest one whose changed node is not in the recency
//! memory — unless the search has stagnated past the aspiration
//! window, in which case the tabu restriction is overridden to force
//! an escape.

use std::collections::VecDeque;

use super::config::TabuConfig;
use crate::error::Result;
use crate::model::{Candidate, CostModel};
use crate::neighborhood;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of a tabu run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuResult {
    /// Best candidate found.
    pub best: Candidate,

    /// Iteration at which the best candidate was found.
    pub best_iteration: usize,

    /// Total iterations executed.
    pub iterations: usize,

    /// Best normalized cost after each iteration.
    pub cost_history: Vec<f64>,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Wall-clock duration of the run.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub elapsed: Duration,
}

/// Executes the tabu search.
pub struct TabuRunner;

impl TabuRunner {
    /// Runs the tabu search to completion.
    pub fn run(model: &CostModel, config: &TabuConfig) -> Result<TabuResult> {
        Self::run_with_cancel(model, config, None)
    }

    /// Runs the tabu search with an optional cancellation flag,
    /// checked once per iteration boundary.
    pub fn run_with_cancel(
        model: &CostModel,
        config: &TabuConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<TabuResult> {
        config.validate()?;
        model.check_hub_count(config.hub_count)?;

        let start = Instant::now();
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut current = neighborhood::initial_candidate(model, config.hub_count, &mut rng);
        let mut best = current.clone();
        let mut best_iteration = 0usize;

        let mut tabu: VecDeque<usize> = VecDeque::with_capacity(config.capacity);
        let mut cost_history = Vec::with_capacity(config.max_iterations);
        let mut cancelled = false;
        let mut iterations = 0usize;

        for iteration in 0..config.max_iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if config.stagnation_limit > 0 && iteration - best_iteration > config.stagnation_limit
            {
                break;
            }
            iterations = iteration + 1;

            let mut candidates: Vec<Candidate> = (0..config.branching)
                .map(|_| config.neighborhood.neighbor(model, &current, &mut rng))
                .collect();
            candidates.sort_by(|a, b| {
                a.cost.partial_cmp(&b.cost).unwrap_or(std::cmp::Ordering::Equal)
            });

            let chosen = select_admissible(
                &candidates,
                &tabu,
                iteration,
                best_iteration,
                config.aspiration,
            );
            let accepted = candidates.swap_remove(chosen);
            let changed = accepted
                .changed_node
                .expect("operator-produced candidates always carry a changed node");

            push_tabu(&mut tabu, changed, config.capacity);

            if accepted.cost < best.cost {
                best = accepted.clone();
                best_iteration = iteration;
            }
            current = accepted;
            cost_history.push(best.normalized_cost);
        }

        Ok(TabuResult {
            best,
            best_iteration,
            iterations,
            cost_history,
            cancelled,
            elapsed: start.elapsed(),
        })
    }
}

/// Picks the index of the candidate to accept from a cost-sorted
/// branch.
///
/// The cheapest candidate wins unless its changed node is tabu; a
/// tabu move is still admitted once `iteration - best_iteration`
/// exceeds the aspiration window. Failing both, the first non-tabu
/// candidate in cost order is taken; if the entire branch is tabu,
/// the cheapest is accepted regardless.
fn select_admissible(
    candidates: &[Candidate],
    tabu: &VecDeque<usize>,
    iteration: usize,
    best_iteration: usize,
    aspiration: usize,
) -> usize {
    let is_tabu = |c: &Candidate| c.changed_node.is_some_and(|node| tabu.contains(&node));

    if !is_tabu(&candidates[0]) || iteration - best_iteration > aspiration {
        return 0;
    }
    candidates
        .iter()
        .position(|c| !is_tabu(c))
        .unwrap_or(0)
}

/// Appends a node to the recency memory, evicting the oldest entry
/// at capacity.
fn push_tabu(tabu: &mut VecDeque<usize>, node: usize, capacity: usize) {
    if tabu.len() == capacity {
        tabu.pop_front();
    }
    tabu.push_back(node);
}
