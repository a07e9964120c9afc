use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board side must be at least 1")]
    EmptyBoard,
    #[error("Too many mines, requested {mines} but the board only has {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Mine density too high, ran out of positions while re-drawing enclosed mines")]
    MineDensityTooHigh,
    #[error("Cell index {0} is outside the board")]
    InvalidIndex(usize),
    #[error("Placement order is not a permutation of the board cells")]
    InvalidOrder,
}

pub type Result<T> = core::result::Result<T, GameError>;
