use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rollout_core::Piece;
use serde::{Deserialize, Serialize};

/// How upcoming pieces are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceRule {
    /// Each piece independently uniform over the seven.
    #[default]
    Uniform,
    /// Shuffled bags of all seven pieces.
    Bag7,
}

/// Seeded piece source. Cloning it clones the RNG state, so a plain clone
/// replays the same sequence; call [`PieceGenerator::reseed`] to diverge.
#[derive(Clone, Debug)]
pub struct PieceGenerator {
    rule: PieceRule,
    rng: ChaCha20Rng,
    bag: Vec<Piece>,
}

impl PieceGenerator {
    pub fn new(rule: PieceRule, seed: u64) -> Self {
        Self {
            rule,
            rng: ChaCha20Rng::seed_from_u64(seed),
            bag: Vec::with_capacity(Piece::ALL.len()),
        }
    }

    pub fn rule(&self) -> PieceRule {
        self.rule
    }

    pub fn next_piece(&mut self) -> Piece {
        match self.rule {
            PieceRule::Uniform => Piece::ALL[self.rng.gen_range(0..Piece::ALL.len())],
            PieceRule::Bag7 => {
                if let Some(piece) = self.bag.pop() {
                    return piece;
                }
                let mut fresh = Piece::ALL;
                fresh.shuffle(&mut self.rng);
                let [first, rest @ ..] = fresh;
                self.bag.extend_from_slice(&rest);
                first
            }
        }
    }

    /// Restart the stream from `seed`; the unrevealed bag remainder is reshuffled
    /// so only its contents, not its order, carry over.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha20Rng::seed_from_u64(seed);
        self.bag.shuffle(&mut self.rng);
    }
}
