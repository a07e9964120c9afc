use serde::{Deserialize, Serialize};

/// What a cell holds. Fixed once the board is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Mine,
    Clear,
    Numbered(u8),
}

impl CellKind {
    /// Kind of a safe cell with `count` adjacent mines.
    pub const fn with_count(count: u8) -> Self {
        if count == 0 {
            Self::Clear
        } else {
            Self::Numbered(count)
        }
    }

    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    /// Adjacent mine count, `None` for mines.
    pub const fn adjacent_mines(self) -> Option<u8> {
        match self {
            Self::Mine => None,
            Self::Clear => Some(0),
            Self::Numbered(count) => Some(count),
        }
    }

    /// Promotes a safe cell to the next adjacency count, mines are left alone.
    pub(crate) const fn incremented(self) -> Self {
        match self {
            Self::Mine => Self::Mine,
            Self::Clear => Self::Numbered(1),
            Self::Numbered(count) => Self::Numbered(count.saturating_add(1)),
        }
    }
}

impl Default for CellKind {
    fn default() -> Self {
        Self::Clear
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    kind: CellKind,
    covered: bool,
    exploded: bool,
}

impl Cell {
    pub const fn new(kind: CellKind) -> Self {
        Self {
            kind,
            covered: true,
            exploded: false,
        }
    }

    pub const fn kind(&self) -> CellKind {
        self.kind
    }

    pub const fn is_mine(&self) -> bool {
        self.kind.is_mine()
    }

    pub const fn is_covered(&self) -> bool {
        self.covered
    }

    /// Only set on the mine whose selection lost the game.
    pub const fn is_exploded(&self) -> bool {
        self.exploded
    }

    /// Uncovers the cell, returns whether anything changed.
    pub fn uncover(&mut self) -> bool {
        core::mem::replace(&mut self.covered, false)
    }

    pub(crate) fn explode(&mut self) {
        self.exploded = true;
    }

    pub(crate) fn set_kind(&mut self, kind: CellKind) {
        self.kind = kind;
    }

    /// What a player is allowed to see of this cell.
    pub const fn view(&self) -> CellView {
        if self.covered {
            return CellView::Covered;
        }
        match self.kind {
            CellKind::Mine if self.exploded => CellView::Exploded,
            CellKind::Mine => CellView::Mine,
            CellKind::Clear => CellView::Clear,
            CellKind::Numbered(count) => CellView::Numbered(count),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(CellKind::Clear)
    }
}

/// Player-visible state of a cell, covered cells never expose their kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Covered,
    Clear,
    Numbered(u8),
    Mine,
    Exploded,
}

impl CellView {
    pub const fn is_covered(self) -> bool {
        matches!(self, Self::Covered)
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Covered
    }
}
