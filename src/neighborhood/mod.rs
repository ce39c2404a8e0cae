//! Candidate construction and the three neighbor operators.
//!
//! All engines draw their moves from here. Every function returns a
//! structurally valid candidate: `hubs` keeps exactly k distinct
//! entries and every assignment entry is a member of `hubs`. Parents
//! are never mutated; operators clone and return a new candidate with
//! its cost already evaluated and its changed node tagged.

use crate::model::{Candidate, CostModel};
use rand::Rng;

/// Neighbor-generation strategy.
///
/// [`HubRelocation`](Neighborhood::HubRelocation) is the default for
/// the annealing and tabu engines; the other two are selectable
/// alternatives on every engine config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Neighborhood {
    /// Rename one hub to a random spoke, keeping all cluster
    /// memberships: the spoke takes over the hub role of the hub
    /// currently serving it.
    #[default]
    HubRelocation,

    /// Swap the assignment entries of two distinct random spokes.
    /// The hub set is unchanged.
    AssignmentSwap,

    /// Re-point one random spoke at a random hub other than its
    /// current one. The hub set is unchanged.
    Reassignment,
}

impl Neighborhood {
    /// Produces a new valid candidate adjacent to `parent`.
    ///
    /// The returned candidate carries its evaluated cost and the id
    /// of the node the move altered.
    pub fn neighbor<R: Rng>(
        &self,
        model: &CostModel,
        parent: &Candidate,
        rng: &mut R,
    ) -> Candidate {
        match self {
            Neighborhood::HubRelocation => relocate_hub(model, parent, rng),
            Neighborhood::AssignmentSwap => swap_assignments(model, parent, rng),
            Neighborhood::Reassignment => reassign_spoke(model, parent, rng),
        }
    }
}

/// Builds a random initial candidate with `hub_count` hubs.
///
/// Hubs are drawn uniformly without replacement (rejection sampling);
/// every node is then allocated to its nearest hub. Callers must have
/// validated `1 <= hub_count < n` via
/// [`CostModel::check_hub_count`].
pub fn initial_candidate<R: Rng>(
    model: &CostModel,
    hub_count: usize,
    rng: &mut R,
) -> Candidate {
    let hubs = random_hub_set(model.node_count(), hub_count, rng);
    let assignment = nearest_hub_assignment(model, &hubs);
    Candidate::new(hubs, assignment, model)
}

/// Draws `hub_count` distinct node indices uniformly at random.
pub(crate) fn random_hub_set<R: Rng>(n: usize, hub_count: usize, rng: &mut R) -> Vec<usize> {
    debug_assert!(hub_count >= 1 && hub_count <= n);
    let mut hubs: Vec<usize> = Vec::with_capacity(hub_count);
    while hubs.len() < hub_count {
        let node = rng.random_range(0..n);
        if !hubs.contains(&node) {
            hubs.push(node);
        }
    }
    hubs
}

/// Allocates every node to the hub minimizing its collection
/// distance.
///
/// Deterministic for a fixed `hubs` sequence: distance ties keep the
/// earlier hub in `hubs` order (strict `<` comparison). Reused by the
/// GA to rebuild allocations after hub crossover.
pub fn nearest_hub_assignment(model: &CostModel, hubs: &[usize]) -> Vec<usize> {
    let n = model.node_count();
    let mut assignment = Vec::with_capacity(n);
    for node in 0..n {
        let mut target = hubs[0];
        for &hub in &hubs[1..] {
            if model.distance(node, hub) < model.distance(node, target) {
                target = hub;
            }
        }
        assignment.push(target);
    }
    assignment
}

/// Draws a uniformly random spoke (non-hub node).
///
/// Terminates because `check_hub_count` guarantees at least one spoke.
fn random_spoke<R: Rng>(candidate: &Candidate, rng: &mut R) -> usize {
    let n = candidate.assignment.len();
    loop {
        let node = rng.random_range(0..n);
        if !candidate.is_hub(node) {
            return node;
        }
    }
}

/// Operator A: hub relocation.
fn relocate_hub<R: Rng>(model: &CostModel, parent: &Candidate, rng: &mut R) -> Candidate {
    let spoke = random_spoke(parent, rng);
    let old_hub = parent.assignment[spoke];

    let mut hubs = parent.hubs.clone();
    let mut assignment = parent.assignment.clone();
    for entry in assignment.iter_mut() {
        if *entry == old_hub {
            *entry = spoke;
        }
    }
    for hub in hubs.iter_mut() {
        if *hub == old_hub {
            *hub = spoke;
        }
    }

    let mut child = Candidate::new(hubs, assignment, model);
    child.changed_node = Some(spoke);
    child
}

/// Operator B: pairwise reassignment swap.
fn swap_assignments<R: Rng>(model: &CostModel, parent: &Candidate, rng: &mut R) -> Candidate {
    let first = random_spoke(parent, rng);
    let mut assignment = parent.assignment.clone();

    // With a single spoke there is no partner to swap with; the move
    // degenerates to a no-op on that spoke.
    if parent.assignment.len() - parent.hubs.len() > 1 {
        let mut second = random_spoke(parent, rng);
        while second == first {
            second = random_spoke(parent, rng);
        }
        assignment.swap(first, second);
    }

    let mut child = Candidate::new(parent.hubs.clone(), assignment, model);
    child.changed_node = Some(first);
    child
}

/// Operator C: single reassignment.
fn reassign_spoke<R: Rng>(model: &CostModel, parent: &Candidate, rng: &mut R) -> Candidate {
    let spoke = random_spoke(parent, rng);
    let current = parent.assignment[spoke];
    let k = parent.hubs.len();

    let mut assignment = parent.assignment.clone();
    if k > 1 {
        // Uniform draw over the k-1 other hubs: sample from the first
        // k-1 positions and remap a hit on the current hub to the last.
        let position = parent
            .hubs
            .iter()
            .position(|&h| h == current)
            .unwrap_or(k - 1);
        let mut idx = rng.random_range(0..k - 1);
        if idx == position {
            idx = k - 1;
        }
        assignment[spoke] = parent.hubs[idx];
    }

    let mut child = Candidate::new(parent.hubs.clone(), assignment, model);
    child.changed_node = Some(spoke);
    child
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SquareMatrix;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn random_model<R: Rng>(n: usize, rng: &mut R) -> CostModel {
        let mut distance = SquareMatrix::filled(n, 0.0);
        let mut flow = SquareMatrix::filled(n, 0.0);
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    *distance.get_mut(i, j) = rng.random_range(1.0..100.0);
                    *flow.get_mut(i, j) = rng.random_range(0.0..50.0);
                }
            }
        }
        CostModel::new(distance, flow, 0.5).unwrap()
    }

    #[test]
    fn test_initial_candidate_well_formed() {
        let mut rng = StdRng::seed_from_u64(7);
        let model = random_model(12, &mut rng);
        for k in 1..12 {
            let c = initial_candidate(&model, k, &mut rng);
            assert!(c.is_well_formed(12, k), "k={k} produced {c:?}");
            assert!(c.changed_node.is_none());
        }
    }

    #[test]
    fn test_nearest_hub_assignment_prefers_closest() {
        let distance = SquareMatrix::from_rows(vec![
            vec![0.0, 1.0, 9.0],
            vec![1.0, 0.0, 9.0],
            vec![9.0, 9.0, 0.0],
        ])
        .unwrap();
        let flow = SquareMatrix::filled(3, 1.0);
        let model = CostModel::new(distance, flow, 0.5).unwrap();
        assert_eq!(nearest_hub_assignment(&model, &[1, 2]), vec![1, 1, 2]);
    }

    #[test]
    fn test_nearest_hub_ties_keep_first_listed() {
        // Both hubs equidistant from node 0; the earlier entry wins.
        let distance = SquareMatrix::from_rows(vec![
            vec![0.0, 5.0, 5.0],
            vec![5.0, 0.0, 5.0],
            vec![5.0, 5.0, 0.0],
        ])
        .unwrap();
        let flow = SquareMatrix::filled(3, 1.0);
        let model = CostModel::new(distance, flow, 0.5).unwrap();
        assert_eq!(nearest_hub_assignment(&model, &[2, 1])[0], 2);
        assert_eq!(nearest_hub_assignment(&model, &[1, 2])[0], 1);
    }

    #[test]
    fn test_hub_relocation_preserves_clusters() {
        let mut rng = StdRng::seed_from_u64(11);
        let model = random_model(10, &mut rng);
        let parent = initial_candidate(&model, 3, &mut rng);
        let child = Neighborhood::HubRelocation.neighbor(&model, &parent, &mut rng);

        let spoke = child.changed_node.expect("operator must tag its node");
        assert!(!parent.is_hub(spoke));
        assert!(child.is_hub(spoke));
        assert!(child.is_well_formed(10, 3));

        // The displaced hub and the spoke swapped roles; every other
        // node kept its cluster.
        let old_hub = parent.assignment[spoke];
        for node in 0..10 {
            if parent.assignment[node] == old_hub {
                assert_eq!(child.assignment[node], spoke);
            } else {
                assert_eq!(child.assignment[node], parent.assignment[node]);
            }
        }
    }

    #[test]
    fn test_hub_relocation_leaves_parent_untouched() {
        let mut rng = StdRng::seed_from_u64(13);
        let model = random_model(8, &mut rng);
        let parent = initial_candidate(&model, 2, &mut rng);
        let snapshot = parent.clone();
        for _ in 0..50 {
            let _ = Neighborhood::HubRelocation.neighbor(&model, &parent, &mut rng);
        }
        assert_eq!(parent, snapshot);
    }

    #[test]
    fn test_assignment_swap_keeps_hub_set() {
        let mut rng = StdRng::seed_from_u64(17);
        let model = random_model(10, &mut rng);
        let parent = initial_candidate(&model, 3, &mut rng);
        for _ in 0..50 {
            let child = Neighborhood::AssignmentSwap.neighbor(&model, &parent, &mut rng);
            assert_eq!(child.hubs, parent.hubs);
            assert!(child.is_well_formed(10, 3));
        }
    }

    #[test]
    fn test_reassignment_changes_one_spoke() {
        let mut rng = StdRng::seed_from_u64(19);
        let model = random_model(10, &mut rng);
        let parent = initial_candidate(&model, 3, &mut rng);
        for _ in 0..50 {
            let child = Neighborhood::Reassignment.neighbor(&model, &parent, &mut rng);
            let spoke = child.changed_node.unwrap();
            assert_ne!(
                child.assignment[spoke], parent.assignment[spoke],
                "spoke must move to a different hub"
            );
            assert_eq!(child.hubs, parent.hubs);
            let differing = (0..10)
                .filter(|&i| child.assignment[i] != parent.assignment[i])
                .count();
            assert_eq!(differing, 1);
            assert!(child.is_well_formed(10, 3));
        }
    }

    #[test]
    fn test_reassignment_single_hub_is_noop() {
        let mut rng = StdRng::seed_from_u64(23);
        let model = random_model(6, &mut rng);
        let parent = initial_candidate(&model, 1, &mut rng);
        let child = Neighborhood::Reassignment.neighbor(&model, &parent, &mut rng);
        assert_eq!(child.assignment, parent.assignment);
        assert!(child.is_well_formed(6, 1));
    }

    #[test]
    fn test_neighbors_carry_evaluated_cost() {
        let mut rng = StdRng::seed_from_u64(29);
        let model = random_model(9, &mut rng);
        let parent = initial_candidate(&model, 2, &mut rng);
        for op in [
            Neighborhood::HubRelocation,
            Neighborhood::AssignmentSwap,
            Neighborhood::Reassignment,
        ] {
            let child = op.neighbor(&model, &parent, &mut rng);
            assert_eq!(child.cost, model.evaluate(&child.assignment));
            assert_eq!(child.normalized_cost, model.normalized(child.cost));
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Every candidate produced by the initializer or any
            /// operator is structurally valid.
            #[test]
            fn prop_all_operators_preserve_validity(
                seed in any::<u64>(),
                n in 3usize..16,
                k_frac in 0.0f64..1.0,
            ) {
                let mut rng = StdRng::seed_from_u64(seed);
                let model = random_model(n, &mut rng);
                // k in [1, n - 2], leaving at least two spokes
                let k = 1 + ((n - 2) as f64 * k_frac) as usize;

                let mut current = initial_candidate(&model, k, &mut rng);
                prop_assert!(current.is_well_formed(n, k));

                for op in [
                    Neighborhood::HubRelocation,
                    Neighborhood::AssignmentSwap,
                    Neighborhood::Reassignment,
                ] {
                    for _ in 0..8 {
                        let child = op.neighbor(&model, &current, &mut rng);
                        prop_assert!(
                            child.is_well_formed(n, k),
                            "{op:?} broke invariants: {child:?}"
                        );
                        prop_assert!(child.changed_node.is_some());
                        current = child;
                    }
                }
            }

            /// Operator A never needs the repair path: the relocated
            /// hub set stays distinct by construction.
            #[test]
            fn prop_hub_relocation_always_valid(
                seed in any::<u64>(),
                n in 3usize..16,
            ) {
                let mut rng = StdRng::seed_from_u64(seed);
                let model = random_model(n, &mut rng);
                let k = (n / 2).max(1);
                let mut current = initial_candidate(&model, k, &mut rng);
                for _ in 0..32 {
                    current = Neighborhood::HubRelocation.neighbor(&model, &current, &mut rng);
                    prop_assert!(current.is_well_formed(n, k));
                }
            }
        }
    }
}
