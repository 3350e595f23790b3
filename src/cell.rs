use serde::{Deserialize, Serialize};

/// Canonical per-cell state stored by the board engine.
///
/// A `Revealed` cell is never a mine; hitting a mine ends the game and the
/// triggering cell is reported separately instead of being stored here.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Flagged,
    Revealed(u8),
}

impl CellState {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Display value for a cell, derived from the stored state, the mine layout
/// and the game phase. Never stored; recomputed on query.
///
/// `Exploded`, `Mine` and `IncorrectFlag` only appear after a loss, when the
/// full mine layout becomes visible. After a win every remaining mine shows
/// as `Flagged`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TileView {
    Hidden,
    Flagged,
    Revealed(u8),
    Exploded,
    Mine,
    IncorrectFlag,
}

impl TileView {
    /// Whether the tile still renders as an unopened button.
    pub const fn is_closed(self) -> bool {
        use TileView::*;
        match self {
            Hidden => true,
            Flagged => true,
            Revealed(_) => false,
            Exploded => false,
            Mine => false,
            IncorrectFlag => true,
        }
    }
}
