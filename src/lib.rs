//! Board engine for a single-player mine-clearing puzzle.
//!
//! The engine owns the grid and exposes two commands, [`Board::reveal`] and
//! [`Board::toggle_flag`], plus queries a presentation layer uses to redraw
//! after each command. Rendering, timers and difficulty forms live outside
//! this crate.

#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use layout::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod layout;
mod types;

/// Board dimensions and mine count, validated at construction.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const BEGINNER: Self = Self::new_unchecked((9, 9), 10);
    pub const INTERMEDIATE: Self = Self::new_unchecked((16, 16), 40);
    pub const EXPERT: Self = Self::new_unchecked((16, 30), 99);

    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Both dimensions must be positive and the mine count must leave at
    /// least one safe cell.
    pub fn new((rows, cols): Coord2, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 || mines == 0 || mines >= mult(rows, cols) {
            return Err(GameError::InvalidConfig);
        }
        Ok(Self::new_unchecked((rows, cols), mines))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_dimensions() {
        assert_eq!(GameConfig::new((0, 9), 1), Err(GameError::InvalidConfig));
        assert_eq!(GameConfig::new((9, 0), 1), Err(GameError::InvalidConfig));
    }

    #[test]
    fn rejects_bad_mine_counts() {
        assert_eq!(GameConfig::new((3, 3), 0), Err(GameError::InvalidConfig));
        assert_eq!(GameConfig::new((3, 3), 9), Err(GameError::InvalidConfig));
        assert_eq!(GameConfig::new((3, 3), 10), Err(GameError::InvalidConfig));
    }

    #[test]
    fn accepts_the_maximum_mine_count() {
        let config = GameConfig::new((5, 5), 24).unwrap();

        assert_eq!(config.total_cells(), 25);
        assert_eq!(config.safe_cells(), 1);
    }

    #[test]
    fn presets_pass_validation() {
        for preset in [
            GameConfig::BEGINNER,
            GameConfig::INTERMEDIATE,
            GameConfig::EXPERT,
        ] {
            assert_eq!(GameConfig::new(preset.size, preset.mines), Ok(preset));
        }
    }
}
