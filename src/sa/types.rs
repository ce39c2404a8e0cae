//! The annealing state abstraction.

use crate::model::{Candidate, CostModel};
use crate::neighborhood::Neighborhood;
use rand::Rng;

/// A state the annealer can walk over.
///
/// Three capabilities: independent deep copy (`Clone`), one neighbor
/// move applied in place ([`step`](AnnealState::step)), and the
/// current energy ([`energy`](AnnealState::energy), lower is better).
/// The annealer snapshots the state before every move and restores
/// the snapshot when the move is rejected, so `step` does not need to
/// be reversible.
///
/// [`HubState`] implements this for the hub-location candidate;
/// alternative solution representations plug into the same runner by
/// implementing the trait.
pub trait AnnealState: Clone {
    /// Applies one random neighbor move in place.
    fn step<R: Rng>(&mut self, rng: &mut R);

    /// Energy of the current state. Lower is better.
    fn energy(&self) -> f64;
}

/// Annealing state over a hub-location [`Candidate`].
///
/// Energy is the candidate's normalized cost; moves come from the
/// configured [`Neighborhood`] operator.
#[derive(Debug, Clone)]
pub struct HubState<'a> {
    model: &'a CostModel,
    neighborhood: Neighborhood,
    candidate: Candidate,
}

impl<'a> HubState<'a> {
    /// Wraps a candidate for annealing.
    pub fn new(model: &'a CostModel, candidate: Candidate, neighborhood: Neighborhood) -> Self {
        Self {
            model,
            neighborhood,
            candidate,
        }
    }

    /// The wrapped candidate.
    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    /// Unwraps into the candidate.
    pub fn into_candidate(self) -> Candidate {
        self.candidate
    }
}

impl AnnealState for HubState<'_> {
    fn step<R: Rng>(&mut self, rng: &mut R) {
        self.candidate = self
            .neighborhood
            .neighbor(self.model, &self.candidate, rng);
    }

    fn energy(&self) -> f64 {
        self.candidate.normalized_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SquareMatrix;
    use crate::neighborhood;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn model6() -> CostModel {
        let mut distance = SquareMatrix::filled(6, 2.0);
        for i in 0..6 {
            *distance.get_mut(i, i) = 0.0;
        }
        let flow = SquareMatrix::filled(6, 1.0);
        CostModel::new(distance, flow, 0.5).unwrap()
    }

    #[test]
    fn test_energy_is_normalized_cost() {
        let model = model6();
        let mut rng = StdRng::seed_from_u64(5);
        let candidate = neighborhood::initial_candidate(&model, 2, &mut rng);
        let expected = candidate.normalized_cost;
        let state = HubState::new(&model, candidate, Neighborhood::HubRelocation);
        assert_eq!(state.energy(), expected);
    }

    #[test]
    fn test_step_keeps_state_well_formed() {
        let model = model6();
        let mut rng = StdRng::seed_from_u64(5);
        let candidate = neighborhood::initial_candidate(&model, 2, &mut rng);
        let mut state = HubState::new(&model, candidate, Neighborhood::HubRelocation);
        for _ in 0..40 {
            state.step(&mut rng);
            assert!(state.candidate().is_well_formed(6, 2));
        }
    }

    #[test]
    fn test_clone_is_independent() {
        let model = model6();
        let mut rng = StdRng::seed_from_u64(5);
        let candidate = neighborhood::initial_candidate(&model, 2, &mut rng);
        let state = HubState::new(&model, candidate, Neighborhood::HubRelocation);
        let snapshot = state.candidate().clone();

        // Stepping the copy must not disturb the original.
        let mut copy = state.clone();
        copy.step(&mut rng);
        assert_eq!(*state.candidate(), snapshot);
    }
}
