//! Reference falling-block game: straight drops, line clears, top-out.

use rand::RngCore;
use rollout_core::{Action, Board, Piece, Rotation, Simulator};
use thiserror::Error;
use tracing::{debug, warn};

use crate::bag::{PieceGenerator, PieceRule};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("column {column} out of range for {rotation:?} (max {max})")]
    ColumnOutOfRange {
        rotation: Rotation,
        column: usize,
        max: usize,
    },

    #[error("game is already over")]
    GameOver,
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    current: Piece,
    generator: PieceGenerator,
    lines_cleared: u32,
    pieces_placed: u32,
    lost: bool,
}

impl Game {
    pub fn new(rule: PieceRule, seed: u64) -> Self {
        Self::with_board(Board::new(), rule, seed)
    }

    pub fn with_board(board: Board, rule: PieceRule, seed: u64) -> Self {
        let mut generator = PieceGenerator::new(rule, seed);
        let current = generator.next_piece();
        let lost = board.max_height() > Board::VISIBLE_HEIGHT;
        Self {
            board,
            current,
            generator,
            lines_cleared: 0,
            pieces_placed: 0,
            lost,
        }
    }

    /// Replace the active piece, e.g. to set up a known position.
    pub fn with_current(mut self, piece: Piece) -> Self {
        self.current = piece;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_piece(&self) -> Piece {
        self.current
    }

    pub fn pieces_placed(&self) -> u32 {
        self.pieces_placed
    }

    pub fn rule(&self) -> PieceRule {
        self.generator.rule()
    }

    /// Row the piece's bottom-left reference cell would land on when dropped at `column`.
    pub fn landing_row(&self, rotation: Rotation, column: usize) -> usize {
        self.current
            .cells(rotation)
            .iter()
            .map(|&(dx, dy)| {
                self.board
                    .column_height(column + dx as usize)
                    .saturating_sub(dy as usize)
            })
            .max()
            .unwrap_or(0)
    }

    /// Drop the active piece. Returns the number of rows cleared by this placement.
    pub fn place(&mut self, action: Action) -> Result<u32, EngineError> {
        if self.lost {
            return Err(EngineError::GameOver);
        }
        let max = Board::WIDTH - self.current.width(action.rotation);
        if action.column > max {
            return Err(EngineError::ColumnOutOfRange {
                rotation: action.rotation,
                column: action.column,
                max,
            });
        }

        let base = self.landing_row(action.rotation, action.column);
        let mut overflow = false;
        for (dx, dy) in self.current.cells(action.rotation) {
            let x = action.column + dx as usize;
            let y = base + dy as usize;
            if y < Board::HEIGHT {
                self.board.set(x, y, true);
            } else {
                overflow = true;
            }
        }

        let cleared = self.board.clear_lines();
        self.lines_cleared += cleared;
        self.pieces_placed += 1;

        if overflow || self.board.max_height() > Board::VISIBLE_HEIGHT {
            self.lost = true;
            debug!(
                pieces = self.pieces_placed,
                lines = self.lines_cleared,
                "game over"
            );
        }
        self.current = self.generator.next_piece();
        Ok(cleared)
    }
}

impl Simulator for Game {
    fn highest_valid_col(&self, rotation: Rotation) -> Option<usize> {
        Board::WIDTH.checked_sub(self.current.width(rotation))
    }

    fn fork(&self, rng: &mut dyn RngCore) -> Self {
        let mut copy = self.clone();
        copy.generator.reseed(rng.next_u64());
        copy
    }

    fn play_action(&mut self, action: Action) {
        match self.place(action) {
            Ok(_) | Err(EngineError::GameOver) => {}
            Err(err) => {
                warn!(%action, error = %err, "illegal placement forfeits the game");
                self.lost = true;
            }
        }
    }

    fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    fn max_height(&self) -> u32 {
        self.board.max_height() as u32
    }

    fn holes(&self) -> u32 {
        self.board.holes()
    }

    fn top_down_blocked(&self) -> u32 {
        self.board.top_down_blocked()
    }

    fn aggregate_top_down_blocked(&self) -> u32 {
        self.board.aggregate_top_down_blocked()
    }

    fn is_lost(&self) -> bool {
        self.lost
    }
}
