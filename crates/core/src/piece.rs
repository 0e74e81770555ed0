//! Piece types and their rotated cell layouts.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Piece {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Scan order used by every placement enumeration.
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl Piece {
    pub const ALL: [Piece; 7] = [
        Piece::I,
        Piece::O,
        Piece::T,
        Piece::S,
        Piece::Z,
        Piece::J,
        Piece::L,
    ];

    /// Cell offsets for this piece at the given rotation.
    /// Offsets are normalized: the smallest dx and dy are both 0, y grows upward.
    pub fn cells(self, rot: Rotation) -> [(u8, u8); 4] {
        let idx = rot.index();
        match self {
            Piece::I => [
                [(0, 0), (1, 0), (2, 0), (3, 0)],
                [(0, 0), (0, 1), (0, 2), (0, 3)],
                [(0, 0), (1, 0), (2, 0), (3, 0)],
                [(0, 0), (0, 1), (0, 2), (0, 3)],
            ][idx],
            Piece::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
            Piece::T => [
                [(0, 0), (1, 0), (2, 0), (1, 1)],
                [(0, 0), (0, 1), (0, 2), (1, 1)],
                [(1, 0), (0, 1), (1, 1), (2, 1)],
                [(1, 0), (1, 1), (1, 2), (0, 1)],
            ][idx],
            Piece::S => [
                [(0, 0), (1, 0), (1, 1), (2, 1)],
                [(1, 0), (1, 1), (0, 1), (0, 2)],
                [(0, 0), (1, 0), (1, 1), (2, 1)],
                [(1, 0), (1, 1), (0, 1), (0, 2)],
            ][idx],
            Piece::Z => [
                [(1, 0), (2, 0), (0, 1), (1, 1)],
                [(0, 0), (0, 1), (1, 1), (1, 2)],
                [(1, 0), (2, 0), (0, 1), (1, 1)],
                [(0, 0), (0, 1), (1, 1), (1, 2)],
            ][idx],
            Piece::J => [
                [(0, 0), (1, 0), (2, 0), (0, 1)],
                [(0, 0), (0, 1), (0, 2), (1, 2)],
                [(2, 0), (0, 1), (1, 1), (2, 1)],
                [(0, 0), (1, 0), (1, 1), (1, 2)],
            ][idx],
            Piece::L => [
                [(0, 0), (1, 0), (2, 0), (2, 1)],
                [(0, 0), (1, 0), (0, 1), (0, 2)],
                [(0, 0), (0, 1), (1, 1), (2, 1)],
                [(1, 0), (1, 1), (0, 2), (1, 2)],
            ][idx],
        }
    }

    /// Number of columns the rotated piece spans.
    pub fn width(self, rot: Rotation) -> usize {
        self.cells(rot)
            .iter()
            .map(|&(dx, _)| dx as usize + 1)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_are_normalized() {
        for piece in Piece::ALL {
            for rot in Rotation::ALL {
                let cells = piece.cells(rot);
                assert_eq!(cells.iter().map(|c| c.0).min(), Some(0), "{piece:?} {rot:?}");
                assert_eq!(cells.iter().map(|c| c.1).min(), Some(0), "{piece:?} {rot:?}");
            }
        }
    }

    #[test]
    fn test_cells_are_distinct() {
        for piece in Piece::ALL {
            for rot in Rotation::ALL {
                let mut cells = piece.cells(rot).to_vec();
                cells.sort_unstable();
                cells.dedup();
                assert_eq!(cells.len(), 4);
            }
        }
    }

    #[test]
    fn test_widths() {
        assert_eq!(Piece::I.width(Rotation::North), 4);
        assert_eq!(Piece::I.width(Rotation::East), 1);
        assert_eq!(Piece::O.width(Rotation::West), 2);
        assert_eq!(Piece::T.width(Rotation::North), 3);
        assert_eq!(Piece::T.width(Rotation::East), 2);
    }

    #[test]
    fn test_all_pieces() {
        assert_eq!(Piece::ALL.len(), 7);
        assert_eq!(Rotation::ALL.len(), 4);
    }
}
