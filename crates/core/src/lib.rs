//! Rollout core crate - fundamental types shared by the engine, valuation and search.

mod action;
mod board;
mod piece;
mod sim;

pub use action::Action;
pub use board::Board;
pub use piece::{Piece, Rotation};
pub use sim::{Metrics, Simulator};
