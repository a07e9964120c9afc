use core::fmt;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Neighbor list of a single cell, never more than eight entries.
pub type Neighbors = SmallVec<[usize; 8]>;

/// Square grid of cells addressed by a linear index, `row = index / side`, `column = index % side`.
///
/// The board only knows geometry and storage; game rules live in the generator,
/// [`reveal()`] and [`GameSession`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    side: Coord,
    cells: Array2<Cell>,
}

impl Board {
    /// Allocates a covered, mine-free board after checking that `mines` would fit on it.
    pub fn new(side: Coord, mines: CellCount) -> Result<Self> {
        let config = GameConfig::new(side, mines)?;
        Ok(Self::blank(config.side))
    }

    pub(crate) fn blank(side: Coord) -> Self {
        let side_len = usize::from(side);
        Self {
            side,
            cells: Array2::from_elem((side_len, side_len), Cell::default()),
        }
    }

    /// Hand-placed layout, mostly useful for tests and replays.
    ///
    /// Adjacency counts are filled in, the enclosed-mine rule is not applied.
    pub fn from_mines(side: Coord, mines: &[usize]) -> Result<Self> {
        let config = GameConfig::new(side, mines.len().try_into().unwrap_or(CellCount::MAX))?;
        FixedMinefieldGenerator::new(mines).generate(config)
    }

    pub fn side(&self) -> Coord {
        self.side
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn position(&self, index: usize) -> Option<[usize; 2]> {
        let side = usize::from(self.side);
        (index < self.len()).then(|| [index / side, index % side])
    }

    pub fn get(&self, index: usize) -> Option<&Cell> {
        let position = self.position(index)?;
        self.cells.get(position)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Cell> {
        let position = self.position(index)?;
        self.cells.get_mut(position)
    }

    /// Replaces the cell at `index`, returning the previous one or `None` when `index` is off the board.
    pub fn set(&mut self, index: usize, cell: Cell) -> Option<Cell> {
        self.get_mut(index)
            .map(|slot| core::mem::replace(slot, cell))
    }

    pub fn neighbor(&self, index: usize, direction: Direction) -> Option<usize> {
        step(index, direction, usize::from(self.side))
    }

    pub fn iter_neighbors(&self, index: usize) -> NeighborIter {
        NeighborIter::new(index, usize::from(self.side))
    }

    /// In-bounds neighbors of `index` in compass order, empty when `index` is off the board.
    pub fn neighbors(&self, index: usize) -> Neighbors {
        self.iter_neighbors(index).collect()
    }

    /// Cells in linear index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Cell)> {
        self.cells.iter().enumerate()
    }

    pub fn mine_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.iter()
            .filter(|(_, cell)| cell.is_mine())
            .map(|(index, _)| index)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_indices()
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    /// Counts mines around `index` straight from the grid, ignoring stored kinds of safe cells.
    pub fn count_adjacent_mines(&self, index: usize) -> u8 {
        self.iter_neighbors(index)
            .filter(|&pos| self[pos].is_mine())
            .count()
            .try_into()
            .unwrap_or(u8::MAX)
    }

    /// Whether every in-bounds neighbor of `index` is a mine.
    pub fn is_enclosed(&self, index: usize) -> bool {
        self.iter_neighbors(index).all(|pos| self[pos].is_mine())
    }

    pub fn covered_safe_cells(&self) -> CellCount {
        self.iter()
            .filter(|(_, cell)| cell.is_covered() && !cell.is_mine())
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }
}

impl Index<usize> for Board {
    type Output = Cell;

    fn index(&self, index: usize) -> &Self::Output {
        match self.position(index) {
            Some(position) => &self.cells[position],
            None => panic!("cell {index} is outside a board of {} cells", self.len()),
        }
    }
}

impl IndexMut<usize> for Board {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match self.position(index) {
            Some(position) => &mut self.cells[position],
            None => panic!("cell {index} is outside a board of {} cells", self.len()),
        }
    }
}

/// Layout dump, one row per line: `*` mine, `.` clear, digit for numbered.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for (col, cell) in row.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                match cell.kind() {
                    CellKind::Mine => f.write_str("*")?,
                    CellKind::Clear => f.write_str(".")?,
                    CellKind::Numbered(count) => write!(f, "{count}")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    const SIDE: Coord = 8;

    fn board() -> Board {
        Board::new(SIDE, 15).unwrap()
    }

    fn assert_absent(direction: Direction, indices: &[usize]) {
        let board = board();
        for &index in indices {
            assert_eq!(
                board.neighbor(index, direction),
                None,
                "{direction:?} of {index} should be absent"
            );
        }
    }

    fn assert_present(direction: Direction, pairs: &[(usize, usize)]) {
        let board = board();
        for &(index, expected) in pairs {
            assert_eq!(
                board.neighbor(index, direction),
                Some(expected),
                "{direction:?} of {index}"
            );
        }
    }

    fn indices_where(predicate: impl Fn(usize) -> bool) -> Vec<usize> {
        (0..64).filter(|&index| predicate(index)).collect()
    }

    #[test]
    fn new_board_is_covered_and_clear() {
        let board = board();

        assert_eq!(board.len(), 64);
        assert_eq!(board.side(), 8);
        assert!(board.iter().all(|(_, cell)| *cell == Cell::default()));
        assert!(board.iter().all(|(_, cell)| cell.is_covered() && !cell.is_exploded()));
        assert_eq!(board.mine_count(), 0);
    }

    #[test]
    fn new_board_rejects_invalid_config() {
        assert_eq!(
            Board::new(2, 4),
            Err(GameError::TooManyMines { mines: 4, cells: 4 })
        );
        assert_eq!(Board::new(0, 0), Err(GameError::EmptyBoard));
    }

    #[test]
    fn out_of_range_access_is_absent() {
        let mut board = board();

        assert!(board.get(63).is_some());
        assert!(board.get(64).is_none());
        assert!(board.get(usize::MAX).is_none());
        assert!(board.set(64, Cell::new(CellKind::Mine)).is_none());
        assert!(board.neighbors(64).is_empty());
    }

    #[test]
    fn set_replaces_cell() {
        let mut board = board();

        let previous = board.set(10, Cell::new(CellKind::Mine));

        assert_eq!(previous, Some(Cell::default()));
        assert!(board[10].is_mine());
    }

    #[test]
    fn west_absent_on_first_column() {
        assert_absent(Direction::West, &indices_where(|index| index % 8 == 0));
    }

    #[test]
    fn west_present() {
        assert_present(
            Direction::West,
            &[(1, 0), (4, 3), (7, 6), (9, 8), (12, 11), (15, 14), (17, 16), (31, 30), (41, 40), (47, 46)],
        );
    }

    #[test]
    fn north_west_absent_on_first_row_or_column() {
        assert_absent(
            Direction::NorthWest,
            &indices_where(|index| index < 8 || index % 8 == 0),
        );
    }

    #[test]
    fn north_west_present() {
        assert_present(
            Direction::NorthWest,
            &[(9, 0), (12, 3), (15, 6), (25, 16), (39, 30), (44, 35), (55, 46), (57, 48), (60, 51), (63, 54)],
        );
    }

    #[test]
    fn north_absent_on_first_row() {
        assert_absent(Direction::North, &indices_where(|index| index < 8));
    }

    #[test]
    fn north_present() {
        assert_present(
            Direction::North,
            &[(8, 0), (9, 1), (15, 7), (17, 9), (31, 23), (41, 33), (47, 39), (56, 48), (60, 52), (63, 55)],
        );
    }

    #[test]
    fn north_east_absent_on_first_row_or_last_column() {
        assert_absent(
            Direction::NorthEast,
            &indices_where(|index| index < 8 || index % 8 == 7),
        );
    }

    #[test]
    fn north_east_present() {
        assert_present(
            Direction::NorthEast,
            &[(8, 1), (9, 2), (12, 5), (16, 9), (32, 25), (41, 34), (62, 55)],
        );
    }

    #[test]
    fn east_absent_on_last_column() {
        assert_absent(Direction::East, &indices_where(|index| index % 8 == 7));
    }

    #[test]
    fn east_present() {
        assert_present(
            Direction::East,
            &[(0, 1), (8, 9), (9, 10), (12, 13), (16, 17), (32, 33), (41, 42), (62, 63)],
        );
    }

    #[test]
    fn south_east_absent_on_last_row_or_last_column() {
        assert_absent(
            Direction::SouthEast,
            &indices_where(|index| index >= 56 || index % 8 == 7),
        );
    }

    #[test]
    fn south_east_present() {
        assert_present(
            Direction::SouthEast,
            &[(0, 9), (4, 13), (6, 15), (8, 17), (9, 18), (12, 21), (16, 25), (32, 41), (41, 50), (54, 63)],
        );
    }

    #[test]
    fn south_absent_on_last_row() {
        assert_absent(Direction::South, &indices_where(|index| index >= 56));
    }

    #[test]
    fn south_present() {
        assert_present(
            Direction::South,
            &[(0, 8), (4, 12), (6, 14), (8, 16), (9, 17), (12, 20), (16, 24), (32, 40), (41, 49), (54, 62), (55, 63)],
        );
    }

    #[test]
    fn south_west_absent_on_last_row_or_first_column() {
        assert_absent(
            Direction::SouthWest,
            &indices_where(|index| index >= 56 || index % 8 == 0),
        );
    }

    #[test]
    fn south_west_present() {
        assert_present(
            Direction::SouthWest,
            &[(1, 8), (4, 11), (7, 14), (9, 16), (12, 19), (15, 22), (33, 40), (47, 54), (55, 62)],
        );
    }

    #[test]
    fn neighbor_counts_by_region() {
        let board = board();

        for index in 0..64 {
            let row = index / 8;
            let col = index % 8;
            let edge_rows = usize::from(row == 0 || row == 7);
            let edge_cols = usize::from(col == 0 || col == 7);
            let expected = match edge_rows + edge_cols {
                0 => 8,
                1 => 5,
                _ => 3,
            };
            assert_eq!(board.neighbors(index).len(), expected, "neighbors of {index}");
        }
    }

    #[test]
    fn neighbors_are_mutual() {
        let board = board();

        for index in 0..64 {
            for neighbor in board.neighbors(index) {
                assert!(board.neighbors(neighbor).contains(&index));
            }
        }
    }

    #[test]
    fn display_dumps_layout() {
        let board = Board::from_mines(3, &[0]).unwrap();

        assert_eq!(board.to_string(), "* 1 .\n1 1 .\n. . .\n");
    }
}
