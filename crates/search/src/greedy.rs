use rand::RngCore;
use rollout_core::{Action, Simulator};
use rollout_eval::{value_of_action_on_board, ValueWeights};

use crate::candidates::{CandidateList, TieRule};
use crate::error::SearchError;
use crate::policy::Policy;

/// One-ply search: play every legal placement once on a fork and keep the best.
#[derive(Clone, Debug, Default)]
pub struct GreedyPolicy {
    pub weights: ValueWeights,
    pub tie_rule: TieRule,
}

impl GreedyPolicy {
    pub fn new(weights: ValueWeights, tie_rule: TieRule) -> Self {
        Self { weights, tie_rule }
    }

    /// Best-scoring placements and their shared score, before tie-breaking.
    pub fn candidates<S: Simulator>(&self, sim: &S, rng: &mut dyn RngCore) -> CandidateList {
        let mut candidates = CandidateList::new(self.tie_rule);
        for action in sim.legal_actions() {
            let mut scratch = sim.fork(rng);
            let value = value_of_action_on_board(action, &mut scratch, &self.weights);
            candidates.consider(value, action);
        }
        candidates
    }
}

impl<S: Simulator> Policy<S> for GreedyPolicy {
    fn choose_action(&self, sim: &S, rng: &mut dyn RngCore) -> Result<Action, SearchError> {
        self.candidates(sim, rng).pick_random(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use rollout_core::{Board, Piece, Rotation};
    use rollout_engine::{Game, PieceRule};

    fn game_with(rows: &[&str], piece: Piece) -> Game {
        Game::with_board(Board::from_ascii(rows), PieceRule::Uniform, 3).with_current(piece)
    }

    #[test]
    fn test_takes_the_line_clear_when_growth_is_penalized() {
        let game = game_with(&["####....##"], Piece::I);
        let policy = GreedyPolicy::new(
            ValueWeights {
                height_gain: 25.0,
                ..ValueWeights::default()
            },
            TieRule::Exact,
        );
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let candidates = policy.candidates(&game, &mut rng);
        // I North and South cover the same cells
        assert_eq!(
            candidates.actions(),
            &[
                Action::new(Rotation::North, 4),
                Action::new(Rotation::South, 4)
            ]
        );
        assert_eq!(candidates.best_score(), Some(75.0));
    }

    #[test]
    fn test_default_weights_reward_stacking() {
        // height_gain is negative when the stack grows, and its weight is negative
        let game = game_with(&["####....##"], Piece::I);
        let policy = GreedyPolicy::default();
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let action = policy.choose_action(&game, &mut rng).expect("legal move");
        assert!(matches!(action.rotation, Rotation::East | Rotation::West));
        assert!(!(4..=7).contains(&action.column));
    }

    #[test]
    fn test_ties_cover_equal_drops() {
        // every flat O drop on an empty board raises the stack by 2 and blocks nothing
        let game = Game::new(PieceRule::Uniform, 0).with_current(Piece::O);
        let policy = GreedyPolicy::default();
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let candidates = policy.candidates(&game, &mut rng);
        assert_eq!(candidates.len(), 4 * 9);
        assert_eq!(candidates.best_score(), Some(50.0));
    }

    #[test]
    fn test_does_not_touch_caller_state() {
        let game = game_with(&["#.#.#.#.#."], Piece::T);
        let before = game.board().clone();
        let policy = GreedyPolicy::default();
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let _ = policy.choose_action(&game, &mut rng).expect("legal move");
        assert_eq!(game.board(), &before);
        assert_eq!(game.pieces_placed(), 0);
    }

    #[test]
    fn test_same_seed_same_choice() {
        let game = Game::new(PieceRule::Bag7, 17);
        let policy = GreedyPolicy::default();
        let a = policy
            .choose_action(&game, &mut ChaCha20Rng::seed_from_u64(4))
            .expect("legal move");
        let b = policy
            .choose_action(&game, &mut ChaCha20Rng::seed_from_u64(4))
            .expect("legal move");
        assert_eq!(a, b);
    }
}
