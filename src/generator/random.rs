use ndarray::Array2;

use super::*;

/// Uniform random placement that keeps one cell mine-free, used for the
/// first-reveal guarantee. Only the excluded cell itself is protected; its
/// neighbors may still receive mines.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomMineLayoutGenerator {
    seed: u64,
    exclude: Coord2,
}

impl RandomMineLayoutGenerator {
    pub fn new(seed: u64, exclude: Coord2) -> Self {
        Self { seed, exclude }
    }
}

impl MineLayoutGenerator for RandomMineLayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::prelude::*;

        let (rows, cols) = config.size;
        let mut mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut placed: CellCount = 0;

        // Rejection sampling. Terminates because the config guarantees
        // mines < rows*cols, so a free non-excluded cell always remains.
        let mut rng = SmallRng::seed_from_u64(self.seed);
        while placed < config.mines {
            let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
            if coords == self.exclude || mask[coords.to_nd_index()] {
                continue;
            }
            mask[coords.to_nd_index()] = true;
            placed += 1;
        }

        let layout = MineLayout::from_mine_mask(mask);
        if layout.mine_count() != config.mines {
            log::warn!(
                "generated layout mine count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines
            );
        }
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn config(size: Coord2, mines: CellCount) -> GameConfig {
        GameConfig::new(size, mines).unwrap()
    }

    #[test]
    fn places_exact_mine_count_and_spares_excluded_cell() {
        for seed in 0..64 {
            let layout =
                RandomMineLayoutGenerator::new(seed, (4, 4)).generate(config((9, 9), 10));

            assert_eq!(layout.mine_count(), 10);
            assert!(!layout.contains_mine((4, 4)));
        }
    }

    #[test]
    fn fills_every_cell_but_the_excluded_one() {
        let layout = RandomMineLayoutGenerator::new(3, (2, 2)).generate(config((5, 5), 24));

        assert_eq!(layout.mine_count(), 24);
        assert!(!layout.contains_mine((2, 2)));
        assert_eq!(layout.safe_cell_count(), 1);
    }

    #[test]
    fn same_seed_reproduces_the_layout() {
        let a = RandomMineLayoutGenerator::new(42, (0, 0)).generate(config((16, 16), 40));
        let b = RandomMineLayoutGenerator::new(42, (0, 0)).generate(config((16, 16), 40));

        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_usually_differ() {
        let layouts: Vec<_> = (0..8)
            .map(|seed| RandomMineLayoutGenerator::new(seed, (0, 0)).generate(config((16, 16), 40)))
            .collect();

        assert!(layouts.windows(2).any(|pair| pair[0] != pair[1]));
    }
}
