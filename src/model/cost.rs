//! Immutable cost model: distance and flow matrices plus the
//! inter-hub discount factor.
//!
//! Constructed once per run and shared by reference across any number
//! of concurrent trajectories; nothing here is ever mutated after
//! construction.

use super::matrix::SquareMatrix;
use crate::error::{Error, Result};

/// Read-only problem data for a single-allocation hub-location run.
///
/// Routing follows the spoke → hub → hub → spoke scheme: every unit of
/// flow from `i` to `j` is collected at `i`'s hub, transferred between
/// the two hubs at a discount of `alpha`, and distributed from `j`'s
/// hub. [`evaluate`](CostModel::evaluate) sums all three legs over
/// every ordered node pair.
#[derive(Debug, Clone)]
pub struct CostModel {
    distance: SquareMatrix,
    flow: SquareMatrix,
    total_flow: f64,
    alpha: f64,
}

impl CostModel {
    /// Validates the problem data and builds the model.
    ///
    /// Fails with [`Error::Configuration`] when the matrices disagree
    /// in dimension, the network is empty, `alpha` lies outside
    /// `[0, 1]`, or the summed flow is not finite.
    pub fn new(distance: SquareMatrix, flow: SquareMatrix, alpha: f64) -> Result<Self> {
        if distance.dim() != flow.dim() {
            return Err(Error::config(format!(
                "distance matrix is {0}x{0} but flow matrix is {1}x{1}",
                distance.dim(),
                flow.dim()
            )));
        }
        if distance.dim() == 0 {
            return Err(Error::config("network must contain at least one node"));
        }
        if !(0.0..=1.0).contains(&alpha) {
            return Err(Error::config(format!(
                "alpha must be within [0, 1], got {alpha}"
            )));
        }
        let total_flow = flow.sum();
        if !total_flow.is_finite() {
            return Err(Error::config(format!(
                "total flow must be finite, got {total_flow}"
            )));
        }
        Ok(Self {
            distance,
            flow,
            total_flow,
            alpha,
        })
    }

    /// Number of nodes in the network.
    pub fn node_count(&self) -> usize {
        self.distance.dim()
    }

    /// Sum of all flow entries, fixed at construction.
    pub fn total_flow(&self) -> f64 {
        self.total_flow
    }

    /// Inter-hub discount factor.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Distance between two nodes.
    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distance.get(from, to)
    }

    /// Total routing cost of an allocation.
    ///
    /// For every ordered pair `(i, j)` accumulates
    /// `flow[i][j] * (d[i][a_i] + alpha * d[a_i][a_j] + d[a_j][j])`
    /// where `a_i` is the hub serving node `i`. Deterministic: the
    /// same allocation and matrices always produce the identical
    /// value. O(n²), no allocation.
    pub fn evaluate(&self, assignment: &[usize]) -> f64 {
        debug_assert_eq!(assignment.len(), self.node_count());
        let n = self.node_count();
        let mut total = 0.0;
        for i in 0..n {
            let hub_i = assignment[i];
            let collection = self.distance.get(i, hub_i);
            for j in 0..n {
                let hub_j = assignment[j];
                let transfer = self.alpha * self.distance.get(hub_i, hub_j);
                let distribution = self.distance.get(hub_j, j);
                total += self.flow.get(i, j) * (collection + transfer + distribution);
            }
        }
        total
    }

    /// Cost divided by total flow, the comparable fitness/energy
    /// measure used by every engine.
    ///
    /// A network with zero total flow has zero cost for every
    /// allocation; normalization degenerates to the raw cost there
    /// rather than dividing by zero.
    pub fn normalized(&self, cost: f64) -> f64 {
        if self.total_flow > 0.0 {
            cost / self.total_flow
        } else {
            cost
        }
    }

    /// Checks that `hub_count` leaves a searchable problem.
    ///
    /// The neighborhood operators all draw a random spoke, so a run
    /// needs `1 <= hub_count < n`. Engines call this before any search
    /// work starts.
    pub fn check_hub_count(&self, hub_count: usize) -> Result<()> {
        let n = self.node_count();
        if hub_count < 1 || hub_count >= n {
            return Err(Error::config(format!(
                "hub count must be within [1, {n}) for an {n}-node network, got {hub_count}"
            )));
        }
        Ok(())
    }
}
