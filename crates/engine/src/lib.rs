//! rollout-engine - reference game implementing the `Simulator` contract.
//!
//! Classic rules: straight drops at a chosen column, line clears, top-out when
//! anything rests above the visible field.

pub mod bag;
pub mod game;

pub use bag::{PieceGenerator, PieceRule};
pub use game::{EngineError, Game};
