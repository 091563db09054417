//! The match/board engine: fill, group search, clearing, gravity, shuffle.

use std::collections::{HashSet, VecDeque};

use rand::{
    RngExt as _, SeedableRng as _,
    seq::{IndexedRandom as _, SliceRandom as _},
};
use rand_pcg::Pcg64Mcg;
use tilefall_core::{Cell, Coord, Grid, TileColor};

use crate::{BoardConfig, ConfigError, TileDrop};

/// Minimum connected-group size a selection must reach to be cleared.
///
/// A single isolated tile is never clearable.
pub const MIN_GROUP_SIZE: usize = 2;

/// Boards at or below this cell count refill with the matching guarantee.
///
/// Covers 2x2, 2x3, and 3x2 boards, where a purely random refill has a high
/// chance of leaving no clearable group.
const SMALL_BOARD_CELLS: usize = 6;

/// Lifecycle phase of a [`BoardState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum BoardPhase {
    /// The initial whole-grid fill is in progress.
    Filling,
    /// The board is settled and ready for selections.
    Stable,
    /// A group was cleared; the board needs a drop/refill pass.
    Resolving,
    /// Deadlock recovery is redistributing the existing tiles.
    Shuffling,
}

/// The board simulation: a grid of tile colors plus the per-turn drop
/// records.
///
/// Owns the backing grid exclusively; all per-turn collections (drop records,
/// group lists) are replaced every turn, so callers must not retain them
/// across turns. Randomness comes from an internally owned PCG generator
/// seeded at construction, making every game replayable from its seed.
///
/// # Examples
///
/// ```
/// use tilefall_board::{BoardConfig, BoardState};
///
/// let mut board = BoardState::with_seed(BoardConfig::new(8, 8), 42).unwrap();
/// board.start_new_game();
///
/// // A freshly filled board always offers at least one move.
/// assert!(board.has_any_valid_move());
/// ```
#[derive(Debug, Clone)]
pub struct BoardState {
    config: BoardConfig,
    grid: Grid<Cell>,
    rng: Pcg64Mcg,
    seed: u64,
    phase: BoardPhase,
    dropped: Vec<TileDrop>,
}

impl BoardState {
    /// Creates an unfilled board with an entropy-derived seed.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration could never produce a
    /// playable board.
    pub fn new(config: BoardConfig) -> Result<Self, ConfigError> {
        Self::with_seed(config, rand::random())
    }

    /// Creates an unfilled board seeded for deterministic replay.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration could never produce a
    /// playable board.
    pub fn with_seed(config: BoardConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            grid: Grid::new(config.width, config.height),
            rng: Pcg64Mcg::seed_from_u64(seed),
            seed,
            phase: BoardPhase::Filling,
            dropped: Vec::new(),
            config,
        })
    }

    /// Builds a board from a text literal, for tests and deterministic
    /// setups.
    ///
    /// Rows are listed top to bottom; each character is a color `'A'`-`'F'`
    /// or `'.'` for an empty cell. Row count and widths must match the
    /// configured dimensions.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseBoardError`] for an invalid configuration, a row
    /// count or row width mismatch, or an unknown tile character.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilefall_board::{BoardConfig, BoardState};
    ///
    /// // A 3x2 board with an empty top-right cell.
    /// let board = BoardState::from_rows(BoardConfig::new(3, 2), 0, &[
    ///     "AB.",
    ///     "ABC",
    /// ])
    /// .unwrap();
    /// assert!(board.has_any_valid_move());
    /// ```
    pub fn from_rows(
        config: BoardConfig,
        seed: u64,
        rows: &[&str],
    ) -> Result<Self, ParseBoardError> {
        let mut board = Self::with_seed(config, seed)?;
        if rows.len() != config.height as usize {
            return Err(ParseBoardError::RowCount {
                expected: config.height,
                found: rows.len(),
            });
        }
        for (i, row) in (0..config.height).zip(rows) {
            let y = config.height - 1 - i;
            if row.chars().count() != config.width as usize {
                return Err(ParseBoardError::RowWidth {
                    row: (*row).to_owned(),
                    expected: config.width,
                });
            }
            for (x, c) in (0..config.width).zip(row.chars()) {
                let cell = match c {
                    '.' => None,
                    c => Some(
                        TileColor::from_char(c)
                            .ok_or(ParseBoardError::UnknownTile { tile: c })?,
                    ),
                };
                board.grid[Coord::new(x, y)] = cell;
            }
        }
        board.phase = BoardPhase::Stable;
        Ok(board)
    }

    /// Returns the configuration this board was built with.
    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Returns the board width in columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.config.width
    }

    /// Returns the board height in rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.config.height
    }

    /// Returns the seed this board's random generator started from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> BoardPhase {
        self.phase
    }

    /// Returns whether a clear has left holes that a drop/refill pass must
    /// repair before the next selection.
    #[must_use]
    pub fn needs_filling(&self) -> bool {
        self.phase.is_resolving()
    }

    /// Returns the tile grid for read access.
    #[must_use]
    pub const fn grid(&self) -> &Grid<Cell> {
        &self.grid
    }

    /// Returns the cell at `coord`.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is out of range; player-facing callers validate
    /// coordinates first.
    #[must_use]
    pub fn tile(&self, coord: Coord) -> Cell {
        self.grid[coord]
    }

    /// The drop records produced by the most recent refill pass.
    #[must_use]
    pub fn dropped_tiles(&self) -> &[TileDrop] {
        &self.dropped
    }

    fn random_color(&mut self) -> TileColor {
        let palette = self.config.palette();
        palette[self.rng.random_range(0..palette.len())]
    }

    /// Fills the whole grid with uniform-random colors, repeating until at
    /// least one valid move exists.
    ///
    /// The repeat is bounded by the configured fill retry cap; degenerate
    /// geometry/palette combinations that starve the random fill fall back
    /// to forcing one adjacent same-color pair.
    pub fn start_new_game(&mut self) {
        self.phase = BoardPhase::Filling;
        self.dropped.clear();
        for _ in 0..self.config.fill_retry_cap {
            self.fill_grid();
            if self.has_any_valid_move() {
                self.phase = BoardPhase::Stable;
                return;
            }
        }
        self.force_matching_pair();
        log::warn!(
            "random fill produced no valid move in {} attempts; forced a matching pair",
            self.config.fill_retry_cap
        );
        self.phase = BoardPhase::Stable;
    }

    fn fill_grid(&mut self) {
        for coord in self.grid.positions() {
            let color = self.random_color();
            self.grid[coord] = Some(color);
        }
    }

    /// Places one same-color pair on the two bottom-left cells. Config
    /// validation guarantees a second cell exists.
    fn force_matching_pair(&mut self) {
        let color = self.random_color();
        let partner = if self.config.width > 1 {
            Coord::new(1, 0)
        } else {
            Coord::new(0, 1)
        };
        self.grid[Coord::new(0, 0)] = Some(color);
        self.grid[partner] = Some(color);
    }

    /// Returns the connected same-color group containing `start`.
    ///
    /// Breadth-first traversal over 4-neighbors restricted to cells of the
    /// start cell's color. Out-of-range or empty start cells yield an empty
    /// group.
    #[must_use]
    pub fn connected_group(&self, start: Coord) -> Vec<Coord> {
        let Some(&Some(target)) = self.grid.get(start) else {
            return Vec::new();
        };
        let mut group = Vec::new();
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);
        while let Some(current) = queue.pop_front() {
            group.push(current);
            for neighbor in current.neighbors() {
                if self.grid.get(neighbor) == Some(&Some(target)) && visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
        group
    }

    /// Clears the connected group containing `coord`, the sole player-facing
    /// mutation.
    ///
    /// Returns the cleared coordinates and moves the board to the
    /// `Resolving` phase. Out-of-range coordinates, empty cells, and groups
    /// smaller than [`MIN_GROUP_SIZE`] are no-ops returning `None` with no
    /// state change.
    pub fn try_clear(&mut self, coord: Coord) -> Option<Vec<Coord>> {
        let group = self.connected_group(coord);
        if group.len() < MIN_GROUP_SIZE {
            return None;
        }
        for &member in &group {
            self.grid[member] = None;
        }
        self.phase = BoardPhase::Resolving;
        Some(group)
    }

    /// Returns whether any clearable group exists.
    ///
    /// Checking only the right and up neighbor of every cell is sufficient:
    /// the symmetric directions find the same pairs.
    #[must_use]
    pub fn has_any_valid_move(&self) -> bool {
        self.grid.iter().any(|(coord, &cell)| {
            let Some(color) = cell else {
                return false;
            };
            let right = Coord::new(coord.x + 1, coord.y);
            let up = Coord::new(coord.x, coord.y + 1);
            self.grid.get(right) == Some(&Some(color)) || self.grid.get(up) == Some(&Some(color))
        })
    }

    /// Compacts every column downward and refills the vacated top cells with
    /// fresh random colors.
    ///
    /// Compaction is stable: tiles never pass each other within a column.
    /// Every moved and spawned tile is recorded as one [`TileDrop`]. Small
    /// boards route through the matching-guarantee variant instead of the
    /// purely random refill. Clears the `Resolving` phase.
    pub fn drop_tiles(&mut self) -> &[TileDrop] {
        if self.config.cell_count() <= SMALL_BOARD_CELLS {
            self.drop_tiles_with_matching_guarantee();
        } else {
            self.drop_tiles_general();
        }
        self.phase = BoardPhase::Stable;
        &self.dropped
    }

    fn drop_tiles_general(&mut self) {
        self.dropped.clear();
        for x in 0..self.config.width {
            let holes = self.compact_column(x);
            for h in 1..=holes {
                let destination = Coord::new(x, self.config.height - h);
                let color = self.random_color();
                self.grid[destination] = Some(color);
                self.dropped.push(TileDrop::new(destination, holes));
            }
        }
    }

    /// Slides the tiles of column `x` down over its holes, preserving their
    /// relative order, and returns the number of vacated top cells.
    fn compact_column(&mut self, x: u32) -> u32 {
        let mut holes = 0;
        for y in 0..self.config.height {
            let coord = Coord::new(x, y);
            match self.grid[coord] {
                None => holes += 1,
                Some(color) => {
                    if holes > 0 {
                        let destination = Coord::new(x, y - holes);
                        self.grid[destination] = Some(color);
                        self.grid[coord] = None;
                        self.dropped.push(TileDrop::new(destination, holes));
                    }
                }
            }
        }
        holes
    }

    /// Refill variant for very small boards, where a random refill has a
    /// high chance of producing an unclearable state.
    ///
    /// The first tile spawned directly onto the surviving stack reuses a
    /// color that already exists on the board. When the board was fully
    /// emptied, the tiles spawned one row above the bottom in the first two
    /// columns share one freshly picked color, guaranteeing an adjacent
    /// pair.
    fn drop_tiles_with_matching_guarantee(&mut self) {
        self.dropped.clear();
        let mut existing: Vec<TileColor> = Vec::new();
        for &cell in self.grid.cells() {
            if let Some(color) = cell
                && !existing.contains(&color)
            {
                existing.push(color);
            }
        }
        let guaranteed = existing.is_empty().then(|| self.random_color());
        let mut matching_created = false;

        for x in 0..self.config.width {
            let holes = self.compact_column(x);
            for h in 1..=holes {
                let destination = Coord::new(x, self.config.height - h);
                let color = if h == holes
                    && !matching_created
                    && let Some(&color) = existing.as_slice().choose(&mut self.rng)
                {
                    matching_created = true;
                    color
                } else if let Some(color) = guaranteed
                    && x < 2
                    && h == 2
                {
                    color
                } else {
                    self.random_color()
                };
                self.grid[destination] = Some(color);
                self.dropped.push(TileDrop::new(destination, holes));
            }
        }
    }

    /// Redistributes the existing tile colors across their cells without
    /// changing any color's count, retrying random permutations until a
    /// valid move appears.
    ///
    /// Returns `false` when the configured retry cap is exhausted without
    /// producing a valid move; the board then keeps the last attempted
    /// permutation and callers should treat the game as degraded rather
    /// than looping further.
    pub fn shuffle(&mut self) -> bool {
        self.phase = BoardPhase::Shuffling;
        let positions: Vec<Coord> = self
            .grid
            .positions()
            .filter(|&coord| self.grid[coord].is_some())
            .collect();
        let mut colors: Vec<TileColor> =
            positions.iter().filter_map(|&coord| self.grid[coord]).collect();

        for _ in 0..self.config.shuffle_retry_cap {
            colors.shuffle(&mut self.rng);
            for (&coord, &color) in positions.iter().zip(&colors) {
                self.grid[coord] = Some(color);
            }
            if self.has_any_valid_move() {
                self.phase = BoardPhase::Stable;
                return true;
            }
        }
        log::warn!(
            "still no valid move after {} shuffle attempts; leaving the board as is",
            self.config.shuffle_retry_cap
        );
        self.phase = BoardPhase::Stable;
        false
    }

    /// Annotates every cell with the size of its connected group.
    ///
    /// Empty cells annotate as 0. Each cell is traversed once via a visited
    /// mask, so the whole pass is O(width x height).
    #[must_use]
    pub fn group_sizes(&self) -> Grid<usize> {
        let mut sizes: Grid<usize> = Grid::new(self.config.width, self.config.height);
        let mut visited: Grid<bool> = Grid::new(self.config.width, self.config.height);
        for coord in self.grid.positions() {
            if visited[coord] || self.grid[coord].is_none() {
                continue;
            }
            let group = self.connected_group(coord);
            for &member in &group {
                sizes[member] = group.len();
                visited[member] = true;
            }
        }
        sizes
    }

    /// Returns the count of each palette color currently on the board,
    /// indexed by [`TileColor::index`].
    #[must_use]
    pub fn color_counts(&self) -> [usize; 6] {
        let mut counts = [0; 6];
        for &cell in self.grid.cells() {
            if let Some(color) = cell {
                counts[color.index()] += 1;
            }
        }
        counts
    }
}

/// A board literal that does not describe a valid board.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ParseBoardError {
    /// The configuration itself is invalid.
    #[display("invalid board configuration: {_0}")]
    Config(#[from] ConfigError),
    /// The literal has the wrong number of rows.
    #[display("expected {expected} rows, found {found}")]
    RowCount {
        /// Configured board height.
        expected: u32,
        /// Number of rows in the literal.
        found: usize,
    },
    /// A row has the wrong number of cells.
    #[display("row {row:?} does not have width {expected}")]
    RowWidth {
        /// The offending row.
        row: String,
        /// Configured board width.
        expected: u32,
    },
    /// A character is neither a palette color nor `'.'`.
    #[display("unknown tile character {tile:?}")]
    UnknownTile {
        /// The offending character.
        tile: char,
    },
}
