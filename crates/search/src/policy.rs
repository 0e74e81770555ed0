use rand::RngCore;
use rollout_core::{Action, Simulator};

use crate::error::SearchError;

/// Chooses a placement for the current state.
///
/// Implementations never mutate `sim`; any simulation happens on forks.
/// Randomness (tie-breaking, sampling of future pieces) comes only from `rng`.
/// Object-safe so it can be used as `Box<dyn Policy<S>>`.
pub trait Policy<S: Simulator> {
    fn choose_action(&self, sim: &S, rng: &mut dyn RngCore) -> Result<Action, SearchError>;
}

impl<S: Simulator, P: Policy<S> + ?Sized> Policy<S> for Box<P> {
    fn choose_action(&self, sim: &S, rng: &mut dyn RngCore) -> Result<Action, SearchError> {
        (**self).choose_action(sim, rng)
    }
}
