//! The board contract a search needs: legality, cloning, committing, metrics.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::{Action, Rotation};

/// A simulatable game state.
///
/// Searches only ever call the mutating methods on states they obtained from
/// [`Simulator::fork`]; the caller's state is borrowed immutably.
pub trait Simulator: Sized {
    /// Highest legal column for `rotation`; legal columns are `0..=col`.
    /// `None` when the rotation has no legal column at all.
    fn highest_valid_col(&self, rotation: Rotation) -> Option<usize>;

    /// Independent deep copy. Pieces not yet revealed are resampled from `rng`,
    /// so two forks of the same state generally diverge after the current piece.
    fn fork(&self, rng: &mut dyn RngCore) -> Self;

    /// Commit `action`, mutating this state.
    fn play_action(&mut self, action: Action);

    fn lines_cleared(&self) -> u32;
    fn max_height(&self) -> u32;
    fn holes(&self) -> u32;
    fn top_down_blocked(&self) -> u32;
    fn aggregate_top_down_blocked(&self) -> u32;
    fn is_lost(&self) -> bool;

    /// Every legal placement, rotation-major in [`Rotation::ALL`] order, columns ascending.
    fn legal_actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        for rotation in Rotation::ALL {
            if let Some(max_col) = self.highest_valid_col(rotation) {
                actions.extend((0..=max_col).map(|column| Action::new(rotation, column)));
            }
        }
        actions
    }

    fn metrics(&self) -> Metrics {
        Metrics {
            lines: self.lines_cleared(),
            height: self.max_height(),
            holes: self.holes(),
            top_blocked: self.top_down_blocked(),
            agg_blocked: self.aggregate_top_down_blocked(),
            lost: self.is_lost(),
        }
    }
}

/// Snapshot of the metrics a valuation compares before and after a move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Metrics {
    pub lines: u32,
    pub height: u32,
    pub holes: u32,
    pub top_blocked: u32,
    pub agg_blocked: u32,
    pub lost: bool,
}
