use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Positions of every mine on a board. Built once, immutable afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mask: Array2<bool>,
    mines: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mask: Array2<bool>) -> Self {
        let mines = mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self { mask, mines }
    }

    /// Builds a layout from explicit mine positions. Deterministic seam for
    /// tests and replays.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mask))
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mines)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.mask.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.mask.len() as CellCount
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Number of mined cells in the Moore neighborhood, clipped at edges.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count() as u8
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mask.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mask[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_mine_coords_rejects_out_of_bounds() {
        let result = MineLayout::from_mine_coords((3, 3), &[(1, 1), (3, 0)]);

        assert_eq!(result.unwrap_err(), GameError::InvalidCoords);
    }

    #[test]
    fn duplicate_coords_count_once() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(1, 1), (1, 1)]).unwrap();

        assert_eq!(layout.mine_count(), 1);
        assert_eq!(layout.safe_cell_count(), 8);
    }

    #[test]
    fn adjacent_counts_match_neighborhood() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(2, 2)]).unwrap();

        assert_eq!(layout.adjacent_mine_count((1, 1)), 1);
        assert_eq!(layout.adjacent_mine_count((1, 2)), 1);
        assert_eq!(layout.adjacent_mine_count((2, 1)), 1);
        assert_eq!(layout.adjacent_mine_count((0, 0)), 0);
        assert_eq!(layout.adjacent_mine_count((0, 2)), 0);
    }

    #[test]
    fn adjacent_counts_clip_at_edges() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(0, 0), (0, 1), (1, 0)]).unwrap();

        assert_eq!(layout.adjacent_mine_count((1, 1)), 3);
    }
}
