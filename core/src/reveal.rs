use alloc::vec::Vec;

use crate::*;

/// Cells whose `covered` flag flipped, with their state after the change.
pub type Changes = Vec<(usize, Cell)>;

/// Uncovers the cell at `index`, cascading through connected clear cells.
///
/// Absent or already uncovered cells are a no-op. Mines and numbered cells only
/// uncover themselves. A clear cell also reveals its eight neighbors, in
/// west, north-west, north, north-east, east, south-east, south, south-west
/// order, recursing into the ones that are clear themselves. The cascade stops
/// at numbered cells and at the board edge, so it never reaches a mine.
///
/// Each cell is uncovered before its neighbors are queued, the `covered` flag
/// doubles as the visited set.
pub fn reveal(board: &mut Board, index: usize) -> Changes {
    let mut changes = Changes::new();
    let mut to_visit = Vec::from([index]);

    while let Some(visit_index) = to_visit.pop() {
        let Some(cell) = board.get_mut(visit_index) else {
            continue;
        };
        if !cell.uncover() {
            continue;
        }

        let cell = *cell;
        log::trace!("Revealed {} as {:?}", visit_index, cell.kind());
        changes.push((visit_index, cell));

        if cell.kind() == CellKind::Clear {
            // reversed so the first direction is popped first
            let neighbors = board.neighbors(visit_index);
            to_visit.extend(neighbors.iter().rev().copied());
        }
    }

    changes
}

/// Uncovers every mine, flagging the one at `triggering_index` as exploded.
pub fn reveal_all_mines(board: &mut Board, triggering_index: usize) -> Changes {
    let mut changes = Changes::new();

    if let Some(cell) = board.get_mut(triggering_index) {
        if cell.is_mine() {
            cell.explode();
        }
    }

    let mine_indices: Vec<usize> = board.mine_indices().collect();
    for index in mine_indices {
        let cell = &mut board[index];
        if cell.uncover() || index == triggering_index {
            changes.push((index, *cell));
        }
    }

    log::debug!(
        "Revealed {} mines, triggered at {}",
        changes.len(),
        triggering_index
    );
    changes
}
