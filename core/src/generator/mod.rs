use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<Board>;
}

/// Places mines by walking a caller-supplied permutation of the board cells.
///
/// The first `mines` entries are the candidates, the rest is the reserve pool
/// used to re-draw candidates that end up enclosed by other mines.
#[derive(Clone, Debug, PartialEq)]
pub struct ShuffledMinefieldGenerator {
    order: Vec<usize>,
}

impl ShuffledMinefieldGenerator {
    pub fn new(order: Vec<usize>) -> Self {
        Self { order }
    }
}

impl MinefieldGenerator for ShuffledMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<Board> {
        config.validate()?;
        check_permutation(&self.order, config.total_cells())?;

        let mines = choose_mine_positions(config, self.order)?;
        Ok(build_board(config.side, &mines))
    }
}

/// Uses exactly the given mine positions, no enclosed-mine re-draw.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMinefieldGenerator<'a> {
    mines: &'a [usize],
}

impl<'a> FixedMinefieldGenerator<'a> {
    pub fn new(mines: &'a [usize]) -> Self {
        Self { mines }
    }
}

impl MinefieldGenerator for FixedMinefieldGenerator<'_> {
    fn generate(self, config: GameConfig) -> Result<Board> {
        config.validate()?;

        let total = usize::from(config.total_cells());
        if let Some(&index) = self.mines.iter().find(|&&index| index >= total) {
            return Err(GameError::InvalidIndex(index));
        }

        let board = build_board(config.side, self.mines);
        let placed = board.mine_count();
        if placed != config.mines {
            log::warn!(
                "Fixed minefield count mismatch, actual: {}, requested: {}",
                placed,
                config.mines
            );
        }
        Ok(board)
    }
}

fn check_permutation(order: &[usize], total_cells: CellCount) -> Result<()> {
    let total = usize::from(total_cells);
    if order.len() != total {
        return Err(GameError::InvalidOrder);
    }

    let mut seen = alloc::vec![false; total];
    for &index in order {
        match seen.get_mut(index) {
            Some(slot) if !*slot => *slot = true,
            _ => return Err(GameError::InvalidOrder),
        }
    }
    Ok(())
}

/// Takes the first `config.mines` positions of `order` and re-draws every candidate whose
/// in-bounds neighbors are all mines, pulling replacements from the rest of `order` in sequence.
///
/// A re-draw can enclose a candidate that was already accepted, so passes repeat until one
/// finishes without changes. Running out of replacements is [`GameError::MineDensityTooHigh`].
fn choose_mine_positions(config: GameConfig, mut order: Vec<usize>) -> Result<Vec<usize>> {
    let mut reserve: VecDeque<usize> = order.split_off(usize::from(config.mines)).into();
    let mut candidates = order;

    let mut layout = Board::blank(config.side);
    for &index in &candidates {
        layout[index].set_kind(CellKind::Mine);
    }

    let mut passes = 0;
    loop {
        passes += 1;
        let mut redrawn = false;

        for slot in candidates.iter_mut() {
            while layout.is_enclosed(*slot) {
                let replacement = reserve
                    .pop_front()
                    .ok_or(GameError::MineDensityTooHigh)?;
                log::trace!("Mine at {} is enclosed, re-drawn to {}", *slot, replacement);

                layout[*slot].set_kind(CellKind::Clear);
                layout[replacement].set_kind(CellKind::Mine);
                *slot = replacement;
                redrawn = true;
            }
        }

        if !redrawn {
            break;
        }
    }

    if passes > 2 {
        log::warn!("Mine placement needed {} validation passes", passes);
    }
    Ok(candidates)
}

/// Marks `mines` on a fresh board, then bumps the count of every safe neighbor once per adjacent mine.
pub(crate) fn build_board(side: Coord, mines: &[usize]) -> Board {
    let mut board = Board::blank(side);
    for &index in mines {
        board[index].set_kind(CellKind::Mine);
    }

    // collect first, `mines` may contain duplicates
    let mine_indices: Vec<usize> = board.mine_indices().collect();
    for index in mine_indices {
        for neighbor in board.neighbors(index) {
            let cell = &mut board[neighbor];
            if !cell.is_mine() {
                cell.set_kind(cell.kind().incremented());
            }
        }
    }

    log::debug!("Generated board with {} mines:\n{}", board.mine_count(), board);
    board
}
