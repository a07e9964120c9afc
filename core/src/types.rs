use serde::{Deserialize, Serialize};

/// Board side length, the board is always `side × side`.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// The eight compass directions around a cell, in traversal order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    West,
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::West,
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
    ];

    /// `(row, column)` displacement, north is up.
    pub const fn delta(self) -> (isize, isize) {
        use Direction::*;
        match self {
            West => (0, -1),
            NorthWest => (-1, -1),
            North => (-1, 0),
            NorthEast => (-1, 1),
            East => (0, 1),
            SouthEast => (1, 1),
            South => (1, 0),
            SouthWest => (1, -1),
        }
    }
}

/// Applies `direction` to the cell at `index`, returning a value only when it stays on a `side × side` board.
pub(crate) fn step(index: usize, direction: Direction, side: usize) -> Option<usize> {
    if index >= side.checked_mul(side)? {
        return None;
    }

    let (row, col) = (index / side, index % side);
    let (dr, dc) = direction.delta();

    let next_row = row.checked_add_signed(dr)?;
    if next_row >= side {
        return None;
    }

    let next_col = col.checked_add_signed(dc)?;
    if next_col >= side {
        return None;
    }

    Some(next_row * side + next_col)
}

#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: usize,
    side: usize,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: usize, side: usize) -> Self {
        Self {
            center,
            side,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let direction = *Direction::ALL.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = step(self.center, direction, self.side) {
                return Some(next_item);
            }
        }
    }
}
