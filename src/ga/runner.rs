//! Genetic search loop.
//!
//! Population-based search over hub sets: fitness-proportional mating
//! pool by replication, single-point crossover over the hub vector,
//! nearest-hub reallocation, per-entry mutation, and best-ever
//! tracking (elitism by tracking only — the recorded best is never
//! injected back into the population).

use super::config::GaConfig;
use crate::error::Result;
use crate::model::{Candidate, CostModel};
use crate::neighborhood::{self, nearest_hub_assignment};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of a genetic run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult {
    /// Best candidate found across all generations.
    pub best: Candidate,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run stopped because the best-ever candidate
    /// stopped improving.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best-ever normalized cost after each generation (entry 0 is
    /// the initial population). Monotone non-increasing.
    pub cost_history: Vec<f64>,

    /// Wall-clock duration of the run.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub elapsed: Duration,
}

/// Executes the genetic search.
pub struct GaRunner;

impl GaRunner {
    /// Runs the genetic search to completion.
    pub fn run(model: &CostModel, config: &GaConfig) -> Result<GaResult> {
        Self::run_with_cancel(model, config, None)
    }

    /// Runs the genetic search with an optional cancellation flag.
    ///
    /// The flag is checked once per generation; on cancellation the
    /// best candidate found so far is returned.
    pub fn run_with_cancel(
        model: &CostModel,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult> {
        config.validate()?;
        model.check_hub_count(config.hub_count)?;

        let start = Instant::now();
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let k = config.hub_count;

        let mut population: Vec<Candidate> = (0..config.population_size)
            .map(|_| neighborhood::initial_candidate(model, k, &mut rng))
            .collect();

        let mut best = find_best(&population).clone();
        let mut cost_history = Vec::with_capacity(config.max_generations + 1);
        cost_history.push(best.normalized_cost);

        let mut stagnation = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;
        let mut generations = 0usize;

        for _ in 0..config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            generations += 1;

            // Mating pool: members replicated in proportion to their
            // fitness relative to the generation's best.
            let pool = build_mating_pool(&population);

            // Offspring genotypes are bred serially (they consume the
            // run's RNG); evaluation of the new population happens
            // below, in parallel when configured.
            let offspring: Vec<(Vec<usize>, Vec<usize>)> = (0..config.population_size)
                .map(|_| {
                    let p1 = &population[pool[rng.random_range(0..pool.len())]];
                    let p2 = &population[pool[rng.random_range(0..pool.len())]];
                    breed(model, p1, p2, config.mutation_rate, &mut rng)
                })
                .collect();

            population = if config.parallel {
                offspring
                    .into_par_iter()
                    .map(|(hubs, assignment)| Candidate::new(hubs, assignment, model))
                    .collect()
            } else {
                offspring
                    .into_iter()
                    .map(|(hubs, assignment)| Candidate::new(hubs, assignment, model))
                    .collect()
            };

            let generation_best = find_best(&population);
            if generation_best.normalized_cost < best.normalized_cost {
                best = generation_best.clone();
                stagnation = 0;
            } else {
                stagnation += 1;
            }
            cost_history.push(best.normalized_cost);

            if config.stagnation_limit > 0 && stagnation >= config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        Ok(GaResult {
            best,
            generations,
            stagnated,
            cancelled,
            cost_history,
            elapsed: start.elapsed(),
        })
    }
}

/// Builds the mating pool as population indices, each member
/// replicated `round(100 * fitness / max_fitness)` times.
///
/// Fitness is the reciprocal of normalized cost, so the replica count
/// reduces to `round(100 * best_cost / cost)`: the generation's best
/// gets exactly 100 copies, the rest proportionally fewer.
fn build_mating_pool(population: &[Candidate]) -> Vec<usize> {
    let best_cost = population
        .iter()
        .map(|c| c.normalized_cost)
        .fold(f64::INFINITY, f64::min);

    let mut pool = Vec::with_capacity(population.len() * 8);
    for (index, member) in population.iter().enumerate() {
        let copies = if member.normalized_cost <= 0.0 {
            // Zero-cost member on a zero-flow network: top fitness.
            100
        } else {
            (100.0 * best_cost / member.normalized_cost).round() as usize
        };
        pool.extend(std::iter::repeat(index).take(copies));
    }
    if pool.is_empty() {
        pool.extend(0..population.len());
    }
    pool
}

/// Breeds one offspring genotype: single-point crossover over the hub
/// vectors, nearest-hub reallocation, then per-entry mutation.
///
/// A crossover that duplicates a hub yields an invalid genotype; it
/// is discarded and a freshly drawn hub set takes its place (the
/// recoverable repair path — never an error).
fn breed<R: Rng>(
    model: &CostModel,
    parent1: &Candidate,
    parent2: &Candidate,
    mutation_rate: f64,
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let k = parent1.hubs.len();
    let split = rng.random_range(0..k);
    let mut hubs = Vec::with_capacity(k);
    for i in 0..k {
        hubs.push(if i > split {
            parent1.hubs[i]
        } else {
            parent2.hubs[i]
        });
    }

    if has_duplicates(&hubs) {
        let hubs = neighborhood::random_hub_set(model.node_count(), k, rng);
        let assignment = nearest_hub_assignment(model, &hubs);
        return (hubs, assignment);
    }

    let mut assignment = nearest_hub_assignment(model, &hubs);
    for entry in assignment.iter_mut() {
        if rng.random_range(0.0..1.0) < mutation_rate {
            *entry = hubs[rng.random_range(0..k)];
        }
    }
    (hubs, assignment)
}

fn has_duplicates(hubs: &[usize]) -> bool {
    hubs.iter()
        .enumerate()
        .any(|(i, h)| hubs[..i].contains(h))
}

/// The population member with the lowest normalized cost.
fn find_best(population: &[Candidate]) -> &Candidate {
    population
        .iter()
        .min_by(|a, b| {
            a.normalized_cost
                .partial_cmp(&b.normalized_cost)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("population must not be empty")
}
