#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use reveal::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod reveal;
mod session;
mod types;

/// Board side used when the caller does not pick one.
pub const DEFAULT_SIDE: Coord = 8;

/// Mine count used when the caller does not pick one.
pub const DEFAULT_MINES: CellCount = 15;

/// Square board dimensions and mine count for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub side: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(side: Coord, mines: CellCount) -> Self {
        Self { side, mines }
    }

    /// Builds a config, rejecting empty boards and boards without a single safe cell.
    pub fn new(side: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(side, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.side == 0 {
            return Err(GameError::EmptyBoard);
        }
        if self.mines >= self.total_cells() {
            return Err(GameError::TooManyMines {
                mines: self.mines,
                cells: self.total_cells(),
            });
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.side, self.side)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_SIDE, DEFAULT_MINES)
    }
}
