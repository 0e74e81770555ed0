//! Command-line configuration.

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use rollout_engine::PieceRule;
use rollout_search::RolloutConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyKind {
    Greedy,
    Rollout,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RuleArg {
    Uniform,
    Bag7,
}

impl From<RuleArg> for PieceRule {
    fn from(rule: RuleArg) -> Self {
        match rule {
            RuleArg::Uniform => PieceRule::Uniform,
            RuleArg::Bag7 => PieceRule::Bag7,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "rollout-play", about = "Play a falling-block game with a rollout policy")]
pub struct Config {
    /// Maximum pieces to place before stopping
    #[arg(long, default_value_t = 200)]
    pub pieces: u32,

    /// Seed for both the game and the policy RNG
    #[arg(long, default_value_t = 12345)]
    pub seed: u64,

    #[arg(long, value_enum, default_value = "rollout")]
    pub policy: PolicyKind,

    /// Continuation plies after each candidate placement
    #[arg(long, default_value_t = 2)]
    pub depth: usize,

    /// Trajectories averaged per placement
    #[arg(long, default_value_t = 1)]
    pub samples: usize,

    /// Per-ply discount in (0, 1]
    #[arg(long, default_value_t = 0.9)]
    pub discount: f32,

    #[arg(long, value_enum, default_value = "uniform")]
    pub piece_rule: RuleArg,

    /// Print the board after every placement
    #[arg(long)]
    pub render: bool,

    /// Print every placement's rollout score before each move
    #[arg(long)]
    pub explain: bool,

    /// Log level, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.pieces == 0 {
            bail!("--pieces must be at least 1");
        }
        self.rollout().validate()?;
        Ok(())
    }

    pub fn rollout(&self) -> RolloutConfig {
        RolloutConfig {
            lookahead_depth: self.depth,
            trajectory_samples: self.samples,
            discount: self.discount,
            ..RolloutConfig::default()
        }
    }
}
