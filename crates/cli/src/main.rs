//! rollout-play - drives the reference game with a placement policy and
//! reports how long it survived.

use anyhow::{Context, Result};
use clap::Parser;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rollout_core::{Action, Simulator};
use rollout_engine::Game;
use rollout_search::{GreedyPolicy, Policy, RolloutPolicy};
use tracing::info;

mod config;

use crate::config::{Config, PolicyKind};

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

/// One line per scored placement: every placement for the rollout, the tied
/// best placements for the one-ply policy.
fn explain(
    kind: PolicyKind,
    rollout: &RolloutPolicy,
    greedy: &GreedyPolicy,
    game: &Game,
    rng: &mut dyn RngCore,
) -> Result<Vec<String>> {
    let scored: Vec<(Action, f32)> = match kind {
        PolicyKind::Rollout => rollout
            .evaluate(game, rng)?
            .into_iter()
            .map(|p| (p.action, p.score))
            .collect(),
        PolicyKind::Greedy => {
            let candidates = greedy.candidates(game, rng);
            let best = candidates.best_score().unwrap_or(f32::NAN);
            candidates.actions().iter().map(|&a| (a, best)).collect()
        }
    };
    Ok(scored
        .into_iter()
        .map(|(action, score)| format!("  {:>10} {:>10.2}", action.to_string(), score))
        .collect())
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;
    init_tracing(&config.log_level);

    let rollout = RolloutPolicy::with_config(config.rollout())
        .context("building rollout policy")?;
    let greedy = GreedyPolicy::new(rollout.config().weights, rollout.config().tie_rule);
    let policy: &dyn Policy<Game> = match config.policy {
        PolicyKind::Greedy => &greedy,
        PolicyKind::Rollout => &rollout,
    };

    let mut game = Game::new(config.piece_rule.into(), config.seed);
    let mut rng = ChaCha20Rng::seed_from_u64(config.seed.wrapping_add(999));

    info!(
        policy = ?config.policy,
        rule = ?game.rule(),
        depth = config.depth,
        samples = config.samples,
        discount = config.discount,
        seed = config.seed,
        "starting game"
    );

    while game.pieces_placed() < config.pieces && !game.is_lost() {
        if config.explain {
            // separate stream so explaining does not change the game
            let mut explain_rng = ChaCha20Rng::seed_from_u64(game.pieces_placed() as u64);
            for line in explain(config.policy, &rollout, &greedy, &game, &mut explain_rng)? {
                println!("{line}");
            }
        }

        let piece = game.current_piece();
        let action = policy
            .choose_action(&game, &mut rng)
            .with_context(|| format!("choosing a move at piece {}", game.pieces_placed()))?;
        game.play_action(action);

        if config.render {
            println!("{:?} -> {}", piece, action);
            print!("{}", game.board());
        }
    }

    info!(
        pieces = game.pieces_placed(),
        lines = game.lines_cleared(),
        lost = game.is_lost(),
        "game finished"
    );
    println!(
        "pieces={} lines={} lost={}",
        game.pieces_placed(),
        game.lines_cleared(),
        game.is_lost()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollout_core::{Board, Piece};
    use rollout_engine::PieceRule;
    use rollout_search::RolloutConfig;

    fn policies() -> (RolloutPolicy, GreedyPolicy) {
        let rollout = RolloutPolicy::with_config(RolloutConfig::for_testing()).expect("valid");
        let greedy = GreedyPolicy::new(rollout.config().weights, rollout.config().tie_rule);
        (rollout, greedy)
    }

    #[test]
    fn test_explain_rollout_lists_every_placement() {
        let (rollout, greedy) = policies();
        let game = Game::new(PieceRule::Uniform, 3).with_current(Piece::O);
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let lines = explain(PolicyKind::Rollout, &rollout, &greedy, &game, &mut rng)
            .expect("explained");
        assert_eq!(lines.len(), game.legal_actions().len());
    }

    #[test]
    fn test_explain_greedy_lists_best_placements() {
        let (rollout, greedy) = policies();
        let game = Game::with_board(Board::from_ascii(&["####....##"]), PieceRule::Uniform, 3)
            .with_current(Piece::I);
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let lines = explain(PolicyKind::Greedy, &rollout, &greedy, &game, &mut rng)
            .expect("explained");
        // vertical I on the six filled columns, East and West alike
        assert_eq!(lines.len(), 12);
        assert!(lines.iter().all(|l| l.trim_end().ends_with("100.00")));
    }
}
