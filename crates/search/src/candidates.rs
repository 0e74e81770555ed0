//! Running set of the best-scoring placements seen during a scan.

use rand::seq::SliceRandom;
use rand::RngCore;
use rollout_core::Action;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// How two scores are judged tied.
///
/// `Exact` compares with `==`. Averaged trajectory scores that would tie under
/// exact arithmetic can miss each other by rounding, and then only the larger
/// one is kept. `Tolerance(eps)` treats scores within `eps` of the best as tied
/// and only replaces the best when beaten by more than `eps`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum TieRule {
    #[default]
    Exact,
    Tolerance(f32),
}

impl TieRule {
    fn beats(self, score: f32, best: f32) -> bool {
        match self {
            TieRule::Exact => score > best,
            TieRule::Tolerance(eps) => score > best + eps,
        }
    }

    fn ties(self, score: f32, best: f32) -> bool {
        match self {
            TieRule::Exact => score == best,
            TieRule::Tolerance(eps) => (score - best).abs() <= eps,
        }
    }
}

/// Every entry carries the best score considered so far.
#[derive(Clone, Debug, Default)]
pub struct CandidateList {
    best: Option<f32>,
    actions: Vec<Action>,
    tie_rule: TieRule,
}

impl CandidateList {
    pub fn new(tie_rule: TieRule) -> Self {
        Self {
            best: None,
            actions: Vec::new(),
            tie_rule,
        }
    }

    /// Record `action` if `score` beats or ties the best so far. NaN scores are skipped.
    pub fn consider(&mut self, score: f32, action: Action) {
        if score.is_nan() {
            return;
        }
        match self.best {
            Some(best) if self.tie_rule.ties(score, best) => self.actions.push(action),
            Some(best) if !self.tie_rule.beats(score, best) => {}
            _ => {
                self.best = Some(score);
                self.actions.clear();
                self.actions.push(action);
            }
        }
    }

    /// Uniformly pick one of the tied best placements.
    pub fn pick_random(&self, rng: &mut dyn RngCore) -> Result<Action, SearchError> {
        self.actions
            .choose(rng)
            .copied()
            .ok_or(SearchError::NoCandidates)
    }

    pub fn clear(&mut self) {
        self.best = None;
        self.actions = Vec::new();
    }

    pub fn best_score(&self) -> Option<f32> {
        self.best
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use rollout_core::Rotation;

    fn action(column: usize) -> Action {
        Action::new(Rotation::North, column)
    }

    #[test]
    fn test_keeps_all_ties_of_best() {
        let mut list = CandidateList::default();
        for (i, score) in [3.0, 5.0, 5.0, 2.0, 5.0].into_iter().enumerate() {
            list.consider(score, action(i));
        }
        assert_eq!(list.best_score(), Some(5.0));
        assert_eq!(list.actions(), &[action(1), action(2), action(4)]);
    }

    #[test]
    fn test_strictly_better_replaces() {
        let mut list = CandidateList::default();
        list.consider(1.0, action(0));
        list.consider(1.0, action(1));
        list.consider(1.5, action(2));
        assert_eq!(list.len(), 1);
        assert_eq!(list.actions(), &[action(2)]);
    }

    #[test]
    fn test_loss_sentinel_still_recorded() {
        let mut list = CandidateList::default();
        list.consider(-10000.0, action(3));
        assert_eq!(list.best_score(), Some(-10000.0));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_nan_is_skipped() {
        let mut list = CandidateList::default();
        list.consider(f32::NAN, action(0));
        assert!(list.is_empty());
        list.consider(2.0, action(1));
        list.consider(f32::NAN, action(2));
        assert_eq!(list.actions(), &[action(1)]);
    }

    #[test]
    fn test_pick_from_empty_is_error() {
        let list = CandidateList::default();
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert_eq!(list.pick_random(&mut rng), Err(SearchError::NoCandidates));
    }

    #[test]
    fn test_clear_resets() {
        let mut list = CandidateList::default();
        list.consider(9.0, action(0));
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.best_score(), None);
        list.consider(-1.0, action(1));
        assert_eq!(list.actions(), &[action(1)]);
    }

    #[test]
    fn test_picked_action_is_independent_copy() {
        let mut list = CandidateList::default();
        list.consider(1.0, action(4));
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut picked = list.pick_random(&mut rng).expect("one candidate");
        picked.column = 0;
        picked.rotation = Rotation::West;
        assert_eq!(list.actions(), &[action(4)]);
    }

    #[test]
    fn test_pick_is_uniform_over_ties() {
        let mut list = CandidateList::default();
        for i in 0..4 {
            list.consider(7.0, action(i));
        }
        let mut rng = ChaCha20Rng::seed_from_u64(2024);
        let draws = 40_000;
        let mut counts = [0usize; 4];
        for _ in 0..draws {
            let picked = list.pick_random(&mut rng).expect("ties present");
            counts[picked.column] += 1;
        }
        for count in counts {
            let freq = count as f64 / draws as f64;
            assert!((freq - 0.25).abs() < 0.02, "frequency {freq}");
        }
    }

    #[test]
    fn test_exact_rule_splits_rounding_ties() {
        // 0.6 + 0.1 and 0.7 differ in the last bit
        let a = 0.6f32 + 0.1f32;
        let b = 0.7f32;
        assert_ne!(a, b);

        let mut exact = CandidateList::new(TieRule::Exact);
        exact.consider(a.min(b), action(0));
        exact.consider(a.max(b), action(1));
        assert_eq!(exact.actions(), &[action(1)]);

        let mut tolerant = CandidateList::new(TieRule::Tolerance(1e-5));
        tolerant.consider(a.min(b), action(0));
        tolerant.consider(a.max(b), action(1));
        assert_eq!(tolerant.actions(), &[action(0), action(1)]);
    }

    #[test]
    fn test_tolerance_still_replaces_clear_winner() {
        let mut list = CandidateList::new(TieRule::Tolerance(0.5));
        list.consider(1.0, action(0));
        list.consider(1.4, action(1));
        list.consider(2.0, action(2));
        assert_eq!(list.best_score(), Some(2.0));
        assert_eq!(list.actions(), &[action(2)]);
    }
}
