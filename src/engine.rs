use alloc::collections::{BTreeSet, VecDeque};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Pending -> Active (first reveal, after mines are placed)
/// - Active -> Won
/// - Active -> Lost
///
/// Won and Lost are terminal; every later command is a no-op.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No mines placed yet.
    Pending,
    /// Mines placed, game running.
    Active,
    Won,
    Lost,
}

impl GamePhase {
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GamePhase {
    fn default() -> Self {
        Self::Pending
    }
}

/// Outcome of toggling a flag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
    /// Flag budget exhausted; nothing changed.
    Refused,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the board.
    pub const fn has_update(self) -> bool {
        use FlagOutcome::*;
        match self {
            NoChange => false,
            Flagged => true,
            Unflagged => true,
            Refused => false,
        }
    }
}

/// Outcome of revealing a cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    /// Safe cell opened, game continues.
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the board.
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// Represents a single game from construction to win or loss.
///
/// Mine placement is deferred: the board starts in [`GamePhase::Pending`]
/// with no mines, and the first [`Board::reveal`] call places them while
/// keeping the revealed cell mine-free. The board is replaced wholesale for
/// a new game; there is no reset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: GameConfig,
    seed: u64,
    layout: Option<MineLayout>,
    grid: Array2<CellState>,
    revealed_count: CellCount,
    flag_count: CellCount,
    phase: GamePhase,
    triggered_mine: Option<Coord2>,
}

impl Board {
    /// Creates a pending board. `seed` drives mine placement once the first
    /// reveal happens; callers wanting fresh games supply fresh entropy.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            layout: None,
            grid: Array2::default(config.size.to_nd_index()),
            revealed_count: 0,
            flag_count: 0,
            phase: Default::default(),
            triggered_mine: None,
        }
    }

    /// Creates a pending board over a pre-set mine layout, skipping random
    /// placement. Deterministic seam for tests and replays; the first-reveal
    /// safety guarantee is then up to the layout.
    pub fn with_layout(layout: MineLayout) -> Self {
        let config = layout.game_config();
        Self {
            layout: Some(layout),
            ..Self::new(config, 0)
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    /// How many flags the player may still place. Never negative: placing a
    /// flag is refused once the budget is used up.
    pub fn flags_remaining(&self) -> CellCount {
        self.config.mines - self.flag_count
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn cell_at(&self, coords: Coord2) -> CellState {
        self.grid[coords.to_nd_index()]
    }

    /// The mine that ended the game, if it ended in a loss.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// False until mines are placed by the first reveal.
    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.layout
            .as_ref()
            .is_some_and(|layout| layout.contains_mine(coords))
    }

    /// Display value for a cell, derived from phase, stored state and mine
    /// layout. After a loss the full layout shows through: the triggering
    /// mine as [`TileView::Exploded`], the rest as [`TileView::Mine`], and
    /// misplaced flags as [`TileView::IncorrectFlag`]. After a win every
    /// remaining mine shows as [`TileView::Flagged`].
    pub fn view_at(&self, coords: Coord2) -> TileView {
        let cell = self.cell_at(coords);

        match self.phase {
            GamePhase::Lost => match (cell, self.has_mine_at(coords)) {
                (_, true) if self.triggered_mine == Some(coords) => TileView::Exploded,
                (CellState::Flagged, true) => TileView::Flagged,
                (_, true) => TileView::Mine,
                (CellState::Flagged, false) => TileView::IncorrectFlag,
                (CellState::Hidden, false) => TileView::Hidden,
                (CellState::Revealed(count), false) => TileView::Revealed(count),
            },
            GamePhase::Won => match cell {
                CellState::Revealed(count) => TileView::Revealed(count),
                // every unopened cell holds a mine once the game is won
                CellState::Hidden | CellState::Flagged => TileView::Flagged,
            },
            GamePhase::Pending | GamePhase::Active => match cell {
                CellState::Hidden => TileView::Hidden,
                CellState::Flagged => TileView::Flagged,
                CellState::Revealed(count) => TileView::Revealed(count),
            },
        }
    }

    /// Reveals a cell. On a pending board this first places the mines,
    /// keeping `coords` mine-free. Flagged, already-revealed and
    /// post-game targets are ignored.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.phase.is_finished() || !self.cell_at(coords).is_hidden() {
            return Ok(RevealOutcome::NoChange);
        }

        if self.layout.is_none() {
            let layout =
                RandomMineLayoutGenerator::new(self.seed, coords).generate(self.config);
            log::debug!(
                "placed {} mines, first reveal at {:?}",
                layout.mine_count(),
                coords
            );
            self.layout = Some(layout);
        }
        self.mark_started();

        Ok(self.reveal_cell(coords))
    }

    /// Toggles the flag on a hidden cell. Revealed cells and finished games
    /// are ignored; placing a flag is refused once `total_mines` flags are
    /// out. Flagging is allowed before the first reveal.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.phase.is_finished() {
            return Ok(FlagOutcome::NoChange);
        }

        Ok(match self.cell_at(coords) {
            CellState::Hidden if self.flag_count < self.config.mines => {
                self.grid[coords.to_nd_index()] = CellState::Flagged;
                self.flag_count += 1;
                FlagOutcome::Flagged
            }
            CellState::Hidden => FlagOutcome::Refused,
            CellState::Flagged => {
                self.grid[coords.to_nd_index()] = CellState::Hidden;
                self.flag_count -= 1;
                FlagOutcome::Unflagged
            }
            CellState::Revealed(_) => FlagOutcome::NoChange,
        })
    }

    /// Opens a single hidden cell and flood-fills from it when its adjacent
    /// mine count is zero. Mines are placed by the time this runs.
    fn reveal_cell(&mut self, coords: Coord2) -> RevealOutcome {
        if self.has_mine_at(coords) {
            self.triggered_mine = Some(coords);
            self.finish(false);
            return RevealOutcome::HitMine;
        }

        let count = self.adjacent_mines(coords);
        self.grid[coords.to_nd_index()] = CellState::Revealed(count);
        self.revealed_count += 1;
        log::debug!("revealed {:?}, adjacent mines: {}", coords, count);

        if count == 0 {
            self.flood_fill(coords);
        }

        if self.revealed_count == self.config.safe_cells() {
            self.finish(true);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Worklist traversal of the zero-count region around `start`, which is
    /// already revealed. Opens the region plus its numbered border; flagged
    /// and already-revealed cells are skipped untouched. The visited set
    /// keeps the expansion from re-entering cells, so the loop is bounded by
    /// the board area.
    fn flood_fill(&mut self, start: Coord2) {
        let mut visited = BTreeSet::from([start]);
        let mut to_visit: VecDeque<_> = self
            .grid
            .iter_neighbors(start)
            .filter(|&pos| self.cell_at(pos).is_hidden())
            .collect();
        log::trace!("flood fill from {:?}, frontier: {:?}", start, to_visit);

        while let Some(coords) = to_visit.pop_front() {
            if !visited.insert(coords) {
                continue;
            }
            if !self.cell_at(coords).is_hidden() {
                continue;
            }

            let count = self.adjacent_mines(coords);
            self.grid[coords.to_nd_index()] = CellState::Revealed(count);
            self.revealed_count += 1;
            log::trace!("flood revealed {:?}, adjacent mines: {}", coords, count);

            // numbered cells border the region but do not extend it
            if count == 0 {
                to_visit.extend(
                    self.grid
                        .iter_neighbors(coords)
                        .filter(|&pos| self.cell_at(pos).is_hidden())
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    fn mark_started(&mut self) {
        if self.phase.is_pending() {
            log::debug!("game started");
            self.phase = GamePhase::Active;
        }
    }

    fn finish(&mut self, won: bool) {
        if self.phase.is_finished() {
            return;
        }

        self.phase = if won { GamePhase::Won } else { GamePhase::Lost };
        log::debug!("game over, phase: {:?}", self.phase);
    }

    fn adjacent_mines(&self, coords: Coord2) -> u8 {
        self.layout
            .as_ref()
            .map_or(0, |layout| layout.adjacent_mine_count(coords))
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.config.size;
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }
}
