//! The candidate solution entity shared by all engines.

use super::cost::CostModel;

/// One complete allocation of spokes to hubs, with its cached cost.
///
/// Candidates follow a copy-on-write discipline: once handed to a
/// caller they are never mutated; every operator clones its parent and
/// returns a fresh candidate, so an engine can compare parent and
/// child costs and keep the untouched parent on rejection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    /// The k hub nodes, pairwise distinct. Order matters: nearest-hub
    /// assignment breaks distance ties toward the earlier entry.
    pub hubs: Vec<usize>,

    /// Serving hub for every node, each entry a member of `hubs`.
    /// Hubs serve themselves.
    pub assignment: Vec<usize>,

    /// Raw total routing cost, cached at creation.
    pub cost: f64,

    /// `cost / total_flow`, cached at creation.
    pub normalized_cost: f64,

    /// Node altered by the operator that produced this candidate;
    /// `None` on freshly generated candidates. The tabu engine keys
    /// its recency memory on this.
    pub changed_node: Option<usize>,
}

impl Candidate {
    /// Builds a candidate from a hub set and allocation, evaluating
    /// and caching its cost.
    pub fn new(hubs: Vec<usize>, assignment: Vec<usize>, model: &CostModel) -> Self {
        let cost = model.evaluate(&assignment);
        Self {
            hubs,
            assignment,
            cost,
            normalized_cost: model.normalized(cost),
            changed_node: None,
        }
    }

    /// Structural invariant check: `hubs.len() == k`, all hubs
    /// distinct and within `[0, n)`, every assignment entry a member
    /// of `hubs`, assignment length `n`.
    ///
    /// Every candidate returned to a caller satisfies this; the GA
    /// uses it to detect crossover offspring that need replacement.
    pub fn is_well_formed(&self, node_count: usize, hub_count: usize) -> bool {
        if self.hubs.len() != hub_count || self.assignment.len() != node_count {
            return false;
        }
        for (i, &h) in self.hubs.iter().enumerate() {
            if h >= node_count || self.hubs[..i].contains(&h) {
                return false;
            }
        }
        self.assignment.iter().all(|a| self.hubs.contains(a))
    }

    /// Whether `node` is currently a hub.
    pub fn is_hub(&self, node: usize) -> bool {
        self.hubs.contains(&node)
    }
}
