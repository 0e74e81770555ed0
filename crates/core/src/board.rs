//! board representation - column-major u64s for fast bitwise ops
//! stack metrics (height, holes, blocked cells) are computed from the column masks

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 10x24 board using column-major u64 bitfields.
/// Row 0 is bottom. Rows 0-19 are the playfield, rows 20-23 are spawn buffer;
/// anything resting in the buffer after a placement means the game is over.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Default)]
pub struct Board {
    cols: [u64; Board::WIDTH],
}

impl Board {
    pub const WIDTH: usize = 10;
    pub const HEIGHT: usize = 24;
    pub const VISIBLE_HEIGHT: usize = 20;

    const COLUMN_MASK: u64 = (1u64 << Self::HEIGHT) - 1;

    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from ASCII rows, top row first. `#`/`X` are filled, anything else empty.
    /// Rows are bottom-aligned: the last string is row 0.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let mut board = Self::new();
        for (i, line) in rows.iter().rev().enumerate() {
            if i >= Self::HEIGHT {
                break;
            }
            for (x, ch) in line.chars().take(Self::WIDTH).enumerate() {
                if ch == '#' || ch == 'X' {
                    board.set(x, i, true);
                }
            }
        }
        board
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        (self.cols[x] >> y) & 1 == 1
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, filled: bool) {
        if filled {
            self.cols[x] |= 1u64 << y;
        } else {
            self.cols[x] &= !(1u64 << y);
        }
    }

    /// Remove every full row, shifting the rows above down. Returns rows removed.
    pub fn clear_lines(&mut self) -> u32 {
        let mut cleared = 0u32;
        let mut full_mask = self.full_rows();
        while full_mask != 0 {
            // clear the highest full row first so lower indices stay valid
            let y = 63 - full_mask.leading_zeros() as usize;
            let lower_mask = (1u64 << y) - 1;
            for col in self.cols.iter_mut() {
                let lower = *col & lower_mask;
                let upper = *col >> (y + 1);
                *col = lower | (upper << y);
            }
            full_mask &= lower_mask;
            cleared += 1;
        }
        cleared
    }

    fn full_rows(&self) -> u64 {
        self.cols
            .iter()
            .fold(Self::COLUMN_MASK, |acc, &col| acc & col)
    }

    /// Get raw row data, bit x set when (x, y) is filled
    pub fn row(&self, y: usize) -> u16 {
        (0..Self::WIDTH).fold(0u16, |acc, x| acc | (((self.cols[x] >> y) & 1) as u16) << x)
    }

    /// Index one past the highest filled cell of column x (0 when empty).
    #[inline]
    pub fn column_height(&self, x: usize) -> usize {
        64 - self.cols[x].leading_zeros() as usize
    }

    pub fn max_height(&self) -> usize {
        (0..Self::WIDTH)
            .map(|x| self.column_height(x))
            .max()
            .unwrap_or(0)
    }

    /// Empty cells with at least one filled cell above them in the same column.
    pub fn top_down_blocked(&self) -> u32 {
        (0..Self::WIDTH)
            .map(|x| (!self.cols[x] & Self::below_top(self.column_height(x))).count_ones())
            .sum()
    }

    /// For each top-down blocked cell, the number of filled cells above it; summed.
    pub fn aggregate_top_down_blocked(&self) -> u32 {
        let mut total = 0u32;
        for x in 0..Self::WIDTH {
            let col = self.cols[x];
            let mut empty = !col & Self::below_top(self.column_height(x));
            while empty != 0 {
                let y = empty.trailing_zeros();
                total += (col >> (y + 1)).count_ones();
                empty &= empty - 1;
            }
        }
        total
    }

    /// Empty cells under the stack that no orthogonal path of empty cells
    /// connects to the top row. Overhangs that can be slid into do not count.
    pub fn holes(&self) -> u32 {
        let mut empty = [0u64; Self::WIDTH];
        let mut reach = [0u64; Self::WIDTH];
        let top = 1u64 << (Self::HEIGHT - 1);
        for x in 0..Self::WIDTH {
            empty[x] = !self.cols[x] & Self::COLUMN_MASK;
            reach[x] = empty[x] & top;
        }

        // bitwise flood fill: grow vertically inside a column, horizontally across neighbours
        loop {
            let mut changed = false;
            for x in 0..Self::WIDTH {
                let mut grown = reach[x];
                if x > 0 {
                    grown |= reach[x - 1];
                }
                if x + 1 < Self::WIDTH {
                    grown |= reach[x + 1];
                }
                let mut next = grown & empty[x];
                loop {
                    let spread = (next | (next << 1) | (next >> 1)) & empty[x];
                    if spread == next {
                        break;
                    }
                    next = spread;
                }
                if next != reach[x] {
                    reach[x] = next;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        (0..Self::WIDTH)
            .map(|x| (empty[x] & !reach[x] & Self::below_top(self.column_height(x))).count_ones())
            .sum()
    }

    #[inline]
    fn below_top(height: usize) -> u64 {
        (1u64 << height) - 1
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let rows: Vec<u16> = (0..Board::HEIGHT).map(|y| self.row(y)).collect();
        rows.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows: Vec<u16> = Vec::deserialize(deserializer)?;
        if rows.len() != Board::HEIGHT {
            return Err(serde::de::Error::custom(format!(
                "expected {} rows, got {}",
                Board::HEIGHT,
                rows.len()
            )));
        }
        let mut board = Board::new();
        for (y, &row) in rows.iter().enumerate() {
            for x in 0..Board::WIDTH {
                if (row >> x) & 1 == 1 {
                    board.set(x, y, true);
                }
            }
        }
        Ok(board)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in (0..Self::VISIBLE_HEIGHT).rev() {
            write!(f, "|")?;
            for x in 0..Self::WIDTH {
                write!(f, "{}", if self.get(x, y) { "[]" } else { "  " })?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "+{}+", "--".repeat(Self::WIDTH))
    }
}
