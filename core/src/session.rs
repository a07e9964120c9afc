use alloc::vec::Vec;
use core::num::Saturating;
use core::ops::Index;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
///
/// Only a new [`GameSession::start`] leaves a finished game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Won,
    Lost,
}

impl GamePhase {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GamePhase {
    fn default() -> Self {
        Self::Playing
    }
}

/// Why a game stopped accepting selections.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    /// Every safe cell was uncovered.
    Cleared,
    /// A mine was selected.
    Mine,
    /// The caller ran out of time and forced a loss.
    TimeUp,
}

/// Player-visible board, covered cells carry no kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    side: Coord,
    cells: Vec<CellView>,
}

impl BoardSnapshot {
    pub fn side(&self) -> Coord {
        self.side
    }

    pub fn cells(&self) -> &[CellView] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<CellView> {
        self.cells.get(index).copied()
    }

    /// Rows of the board, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[CellView]> {
        self.cells.chunks(usize::from(self.side).max(1))
    }
}

impl From<&Board> for BoardSnapshot {
    fn from(board: &Board) -> Self {
        Self {
            side: board.side(),
            cells: board.iter().map(|(_, cell)| cell.view()).collect(),
        }
    }
}

impl Index<usize> for BoardSnapshot {
    type Output = CellView;

    fn index(&self, index: usize) -> &Self::Output {
        &self.cells[index]
    }
}

/// What a selection changed, for the caller to re-render.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOutcome {
    pub changed: Vec<(usize, CellView)>,
    pub phase: GamePhase,
    pub score: CellCount,
}

impl SelectOutcome {
    pub fn has_update(&self) -> bool {
        !self.changed.is_empty()
    }
}

/// One game from generation to win or loss.
///
/// The session owns its board exclusively, callers serialize access to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    remaining_safe_cells: Saturating<CellCount>,
    score: Saturating<CellCount>,
    phase: GamePhase,
    end_cause: Option<EndCause>,
    triggered_mine: Option<usize>,
}

impl GameSession {
    /// Generates a fresh random board for a `side × side` game with `mines` mines.
    pub fn new(side: Coord, mines: CellCount, seed: u64) -> Result<Self> {
        let config = GameConfig::new(side, mines)?;
        Self::with_generator(RandomMinefieldGenerator::new(seed), config)
    }

    pub fn with_generator(generator: impl MinefieldGenerator, config: GameConfig) -> Result<Self> {
        config.validate()?;
        let board = generator.generate(config)?;
        let session = Self::from_board(board);
        log::debug!(
            "Game started, {0}x{0} with {1} mines, {2} safe cells",
            config.side,
            session.config.mines,
            session.remaining_safe_cells.0
        );
        Ok(session)
    }

    /// Wraps an already generated board, counting its mines and safe cells as they are.
    ///
    /// Safe cells that are already uncovered count towards the score. A board with
    /// an exploded mine starts lost, one without covered safe cells starts won.
    pub fn from_board(board: Board) -> Self {
        let config = GameConfig::new_unchecked(board.side(), board.mine_count());
        let remaining = board.covered_safe_cells();
        let triggered_mine = board
            .iter()
            .find(|(_, cell)| cell.is_exploded())
            .map(|(index, _)| index);
        let mut session = Self {
            config,
            remaining_safe_cells: Saturating(remaining),
            board,
            score: Saturating(config.safe_cells().saturating_sub(remaining)),
            phase: GamePhase::Playing,
            end_cause: None,
            triggered_mine,
        };
        if triggered_mine.is_some() {
            session.end_game(EndCause::Mine);
        } else if remaining == 0 {
            session.end_game(EndCause::Cleared);
        }
        session
    }

    /// Replaces the whole game with a new random board.
    ///
    /// On error the current game is left untouched.
    pub fn start(&mut self, side: Coord, mines: CellCount, seed: u64) -> Result<BoardSnapshot> {
        *self = Self::new(side, mines, seed)?;
        Ok(self.snapshot())
    }

    pub fn start_with(
        &mut self,
        generator: impl MinefieldGenerator,
        config: GameConfig,
    ) -> Result<BoardSnapshot> {
        *self = Self::with_generator(generator, config)?;
        Ok(self.snapshot())
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from(&self.board)
    }

    pub fn cell_view(&self, index: usize) -> Option<CellView> {
        self.board.get(index).map(Cell::view)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn end_cause(&self) -> Option<EndCause> {
        self.end_cause
    }

    /// Safe cells uncovered so far.
    pub fn score(&self) -> CellCount {
        self.score.0
    }

    pub fn remaining_safe_cells(&self) -> CellCount {
        self.remaining_safe_cells.0
    }

    /// The mine whose selection lost the game.
    pub fn triggered_mine(&self) -> Option<usize> {
        self.triggered_mine
    }

    /// Plays the cell at `index`.
    ///
    /// Finished games, absent cells and uncovered cells yield an empty change set.
    /// A mine uncovers every mine and loses; anything else reveals (cascading on
    /// clear cells) and wins once no safe cell is left covered.
    pub fn select(&mut self, index: usize) -> SelectOutcome {
        if self.phase.is_finished() {
            return self.outcome(Changes::new());
        }

        let Some(cell) = self.board.get(index).copied() else {
            log::trace!("Ignoring selection outside the board at {}", index);
            return self.outcome(Changes::new());
        };
        if !cell.is_covered() {
            return self.outcome(Changes::new());
        }

        let changes = if cell.is_mine() {
            self.triggered_mine = Some(index);
            let changes = reveal_all_mines(&mut self.board, index);
            self.end_game(EndCause::Mine);
            changes
        } else {
            let changes = reveal(&mut self.board, index);
            for (_, changed) in &changes {
                if !changed.is_mine() {
                    self.remaining_safe_cells -= 1;
                    self.score += 1;
                }
            }
            if self.remaining_safe_cells.0 == 0 {
                self.end_game(EndCause::Cleared);
            }
            changes
        };

        self.outcome(changes)
    }

    /// Forces a loss when an outside clock runs out. Nothing is uncovered.
    pub fn expire(&mut self) -> SelectOutcome {
        if !self.phase.is_finished() {
            self.end_game(EndCause::TimeUp);
        }
        self.outcome(Changes::new())
    }

    fn end_game(&mut self, cause: EndCause) {
        if self.phase.is_finished() {
            return;
        }

        self.phase = match cause {
            EndCause::Cleared => GamePhase::Won,
            EndCause::Mine | EndCause::TimeUp => GamePhase::Lost,
        };
        self.end_cause = Some(cause);
        log::debug!(
            "Game ended, {:?} by {:?}, score: {}",
            self.phase,
            cause,
            self.score.0
        );
    }

    fn outcome(&self, changes: Changes) -> SelectOutcome {
        SelectOutcome {
            changed: changes
                .into_iter()
                .map(|(index, cell)| (index, cell.view()))
                .collect(),
            phase: self.phase,
            score: self.score.0,
        }
    }
}
