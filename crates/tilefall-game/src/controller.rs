//! Turn orchestration, input gating, and click mapping.

use tilefall_board::{BoardConfig, BoardState, ConfigError};
use tilefall_core::Coord;

use crate::{BoardObserver, GroupThresholds, GroupTier, ThresholdError};

/// Full configuration for a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameConfig {
    /// Board dimensions, palette, and retry caps.
    pub board: BoardConfig,
    /// Group-size breakpoints for icon tiers.
    pub thresholds: GroupThresholds,
}

/// A configuration rejected at session construction, or a board that does
/// not belong to this session.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum GameError {
    /// The board configuration could never produce a playable board.
    #[display("invalid board configuration: {_0}")]
    Board(#[from] ConfigError),
    /// The icon thresholds could never classify a group.
    #[display("invalid icon thresholds: {_0}")]
    Thresholds(#[from] ThresholdError),
    /// A supplied board was built with a different configuration.
    #[display("board configuration does not match the session configuration")]
    BoardMismatch,
}

/// What a selection attempt did.
///
/// Only [`Cleared`](Self::Cleared) mutates the board; every other variant is
/// an ordinary early-return outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SelectionOutcome {
    /// The group cleared and the turn resolved to completion.
    Cleared(TurnReport),
    /// Input is gated while the previous turn's effects play out.
    Busy,
    /// No game has been started yet.
    NotStarted,
    /// The coordinate lies outside the board.
    OutOfBounds,
    /// The selected cell holds no tile.
    EmptyCell,
    /// The selected tile has no same-color neighbor, so it cannot clear.
    GroupTooSmall,
}

/// Summary of one fully resolved turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    /// Number of tiles the selection cleared.
    pub cleared: usize,
    /// Whether deadlock recovery ran after the refill.
    pub shuffled: bool,
    /// Whether the board is still without a valid move after recovery gave
    /// up. The game stays playable in its degraded state.
    pub deadlock_unresolved: bool,
}

/// Drives the turn sequence over one [`BoardState`].
///
/// The controller translates player positions into board coordinates,
/// pre-validates every selection, and runs each accepted turn synchronously
/// to completion: clear, drop/refill, group re-annotation, deadlock check,
/// and shuffle if needed. Observers receive a notification per structural
/// change; the longest announced animation duration becomes a cooldown that
/// gates further input (advance it with [`advance`](Self::advance)).
///
/// The board itself is allocated lazily by the first
/// [`start_new_game`](Self::start_new_game) call.
///
/// # Examples
///
/// ```
/// use tilefall_core::Coord;
/// use tilefall_game::{BoardController, GameConfig, SelectionOutcome};
///
/// let mut controller = BoardController::new(GameConfig::default()).unwrap();
/// assert_eq!(
///     controller.try_select(Coord::new(0, 0), &mut ()),
///     SelectionOutcome::NotStarted
/// );
///
/// controller.start_new_game_with_seed(7, &mut ());
/// let outcome = controller.try_select(Coord::new(0, 0), &mut ());
/// assert!(outcome.is_cleared() || outcome.is_group_too_small());
/// ```
#[derive(Debug)]
pub struct BoardController {
    config: GameConfig,
    board: Option<BoardState>,
    cooldown: f32,
}

impl BoardController {
    /// Creates a controller, validating the whole configuration up front.
    ///
    /// # Errors
    ///
    /// Returns a [`GameError`] for a board configuration or threshold pair
    /// that could never produce a playable game.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.board.validate()?;
        config.thresholds.validate()?;
        Ok(Self {
            config,
            board: None,
            cooldown: 0.0,
        })
    }

    /// Returns the session configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the current board, or `None` before the first game starts.
    #[must_use]
    pub fn board(&self) -> Option<&BoardState> {
        self.board.as_ref()
    }

    /// Returns whether the previous turn's effects are still playing out.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.cooldown > 0.0
    }

    /// Returns the remaining advisory cooldown in seconds.
    #[must_use]
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Advances the advisory cooldown by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.cooldown = (self.cooldown - dt).max(0.0);
    }

    /// Starts (or restarts) a game with an entropy-derived seed.
    ///
    /// Fills the board until it offers a valid move, then notifies the
    /// observer of every spawned tile and the initial group annotation.
    pub fn start_new_game<O>(&mut self, observer: &mut O)
    where
        O: BoardObserver + ?Sized,
    {
        let board =
            BoardState::new(self.config.board).expect("configuration validated at construction");
        self.fill_and_begin(board, observer);
    }

    /// Starts (or restarts) a game from an explicit seed, for deterministic
    /// replay.
    pub fn start_new_game_with_seed<O>(&mut self, seed: u64, observer: &mut O)
    where
        O: BoardObserver + ?Sized,
    {
        let board = BoardState::with_seed(self.config.board, seed)
            .expect("configuration validated at construction");
        self.fill_and_begin(board, observer);
    }

    /// Starts a game from an explicit board state, bypassing the random
    /// fill. Intended for replays and tests; the board is taken as-is, so a
    /// deadlocked setup stays deadlocked until the next turn resolves.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::BoardMismatch`] if the board was built with a
    /// different configuration than this session's.
    pub fn start_from_board<O>(&mut self, board: BoardState, observer: &mut O) -> Result<(), GameError>
    where
        O: BoardObserver + ?Sized,
    {
        if *board.config() != self.config.board {
            return Err(GameError::BoardMismatch);
        }
        self.begin(board, observer);
        Ok(())
    }

    fn fill_and_begin<O>(&mut self, mut board: BoardState, observer: &mut O)
    where
        O: BoardObserver + ?Sized,
    {
        board.start_new_game();
        self.begin(board, observer);
    }

    fn begin<O>(&mut self, board: BoardState, observer: &mut O)
    where
        O: BoardObserver + ?Sized,
    {
        let mut busy: f32 = 0.0;
        for coord in board.grid().positions() {
            if let Some(color) = board.tile(coord) {
                busy = busy.max(observer.tile_spawned(coord, color));
            }
        }
        Self::annotate_groups(&board, self.config.thresholds, observer);
        self.board = Some(board);
        self.cooldown = busy;
    }

    /// Attempts to clear the group at `coord` and, on success, resolves the
    /// whole turn synchronously: clear, drop/refill, group re-annotation,
    /// deadlock check, shuffle if needed.
    ///
    /// Rejected and no-op selections leave the board untouched and emit no
    /// notifications.
    pub fn try_select<O>(&mut self, coord: Coord, observer: &mut O) -> SelectionOutcome
    where
        O: BoardObserver + ?Sized,
    {
        if self.is_busy() {
            return SelectionOutcome::Busy;
        }
        let Some(board) = self.board.as_mut() else {
            return SelectionOutcome::NotStarted;
        };
        if !board.grid().are_valid_coordinates(coord) {
            return SelectionOutcome::OutOfBounds;
        }
        if board.tile(coord).is_none() {
            return SelectionOutcome::EmptyCell;
        }
        let Some(cleared) = board.try_clear(coord) else {
            return SelectionOutcome::GroupTooSmall;
        };

        let mut busy: f32 = 0.0;
        for &member in &cleared {
            busy = busy.max(observer.tile_cleared(member));
        }

        let height = board.height();
        board.drop_tiles();
        for &drop in board.dropped_tiles() {
            if drop.is_spawn(height) {
                if let Some(color) = board.tile(drop.destination) {
                    busy = busy.max(observer.tile_spawned(drop.destination, color));
                }
            } else {
                busy = busy.max(observer.tile_dropped(drop));
            }
        }

        let mut shuffled = false;
        let mut deadlock_unresolved = false;
        if !board.has_any_valid_move() {
            log::debug!("no valid move after refill; shuffling");
            shuffled = true;
            deadlock_unresolved = !board.shuffle();
            busy = busy.max(observer.board_shuffled());
        }

        Self::annotate_groups(board, self.config.thresholds, observer);
        self.cooldown = busy;
        SelectionOutcome::Cleared(TurnReport {
            cleared: cleared.len(),
            shuffled,
            deadlock_unresolved,
        })
    }

    /// Selects the cell under a position in the board's centered coordinate
    /// space (see [`tile_offset`](Self::tile_offset)). Positions outside the
    /// grid are out-of-bounds no-ops.
    pub fn select_at<O>(&mut self, x: f32, y: f32, observer: &mut O) -> SelectionOutcome
    where
        O: BoardObserver + ?Sized,
    {
        if self.is_busy() {
            return SelectionOutcome::Busy;
        }
        match self.position_to_coord(x, y) {
            Some(coord) => self.try_select(coord, observer),
            None => SelectionOutcome::OutOfBounds,
        }
    }

    /// Returns the offset from board coordinates to the centered
    /// presentation space, where the board's midpoint sits at the origin.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn tile_offset(&self) -> (f32, f32) {
        let BoardConfig { width, height, .. } = self.config.board;
        (-0.5 * (width as f32 - 1.0), -0.5 * (height as f32 - 1.0))
    }

    /// Maps a position in the centered presentation space to the cell under
    /// it, or `None` if the position lies outside the grid.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn position_to_coord(&self, x: f32, y: f32) -> Option<Coord> {
        let (offset_x, offset_y) = self.tile_offset();
        let grid_x = (x - offset_x + 0.5).floor();
        let grid_y = (y - offset_y + 0.5).floor();
        if grid_x < 0.0 || grid_y < 0.0 {
            return None;
        }
        let coord = Coord::new(grid_x as u32, grid_y as u32);
        (coord.x < self.config.board.width && coord.y < self.config.board.height).then_some(coord)
    }

    fn annotate_groups<O>(board: &BoardState, thresholds: GroupThresholds, observer: &mut O)
    where
        O: BoardObserver + ?Sized,
    {
        let sizes = board.group_sizes();
        for (coord, &size) in sizes.iter() {
            if size == 0 {
                continue;
            }
            observer.group_annotated(coord, size, GroupTier::classify(size, thresholds));
        }
    }
}

#[cfg(test)]
mod tests {
    use tilefall_board::TileDrop;
    use tilefall_core::TileColor;

    use super::*;

    /// Records every notification and answers with fixed durations.
    #[derive(Debug, Default)]
    struct Recorder {
        cleared: Vec<Coord>,
        dropped: Vec<TileDrop>,
        spawned: Vec<(Coord, TileColor)>,
        annotated: Vec<(Coord, usize, GroupTier)>,
        shuffles: usize,
        clear_duration: f32,
        drop_duration: f32,
    }

    impl BoardObserver for Recorder {
        fn tile_cleared(&mut self, coord: Coord) -> f32 {
            self.cleared.push(coord);
            self.clear_duration
        }

        fn tile_dropped(&mut self, drop: TileDrop) -> f32 {
            self.dropped.push(drop);
            self.drop_duration
        }

        fn tile_spawned(&mut self, coord: Coord, color: TileColor) -> f32 {
            self.spawned.push((coord, color));
            self.drop_duration
        }

        fn group_annotated(&mut self, coord: Coord, group_size: usize, tier: GroupTier) {
            self.annotated.push((coord, group_size, tier));
        }

        fn board_shuffled(&mut self) -> f32 {
            self.shuffles += 1;
            0.0
        }
    }

    fn controller(board: BoardConfig) -> BoardController {
        BoardController::new(GameConfig {
            board,
            ..GameConfig::default()
        })
        .expect("valid test configuration")
    }

    fn start_from_rows(
        controller: &mut BoardController,
        observer: &mut Recorder,
        rows: &[&str],
    ) {
        let board = BoardState::from_rows(controller.config().board, 7, rows)
            .expect("valid board literal");
        controller
            .start_from_board(board, observer)
            .expect("matching configuration");
    }

    #[test]
    fn test_new_rejects_misconfiguration() {
        let bad_board = GameConfig {
            board: BoardConfig::new(1, 1),
            ..GameConfig::default()
        };
        assert!(matches!(
            BoardController::new(bad_board),
            Err(GameError::Board(_))
        ));

        let bad_thresholds = GameConfig {
            thresholds: GroupThresholds {
                medium: 9,
                large: 3,
            },
            ..GameConfig::default()
        };
        assert!(matches!(
            BoardController::new(bad_thresholds),
            Err(GameError::Thresholds(_))
        ));
    }

    #[test]
    fn test_board_is_deferred_until_first_start() {
        let mut controller = controller(BoardConfig::new(8, 8));
        assert!(controller.board().is_none());
        assert_eq!(
            controller.try_select(Coord::new(0, 0), &mut ()),
            SelectionOutcome::NotStarted
        );

        controller.start_new_game_with_seed(3, &mut ());
        assert!(controller.board().is_some());
    }

    #[test]
    fn test_start_spawns_and_annotates_every_cell() {
        let mut controller = controller(BoardConfig::new(8, 8));
        let mut recorder = Recorder::default();
        controller.start_new_game_with_seed(11, &mut recorder);

        assert_eq!(recorder.spawned.len(), 64);
        // Every cell of a full board belongs to some group of size >= 1.
        assert_eq!(recorder.annotated.len(), 64);
        assert!(recorder.annotated.iter().all(|&(_, size, _)| size >= 1));
        // A valid move exists, so at least one cell sits in a group of 2+.
        assert!(recorder.annotated.iter().any(|&(_, size, _)| size >= 2));
    }

    #[test]
    fn test_cooldown_gates_input_until_advanced() {
        let mut controller = controller(BoardConfig::new(8, 8));
        let mut recorder = Recorder {
            drop_duration: 0.3,
            ..Recorder::default()
        };
        controller.start_new_game_with_seed(5, &mut recorder);

        // Spawning announced 0.3s of animation.
        assert!(controller.is_busy());
        assert_eq!(
            controller.try_select(Coord::new(0, 0), &mut recorder),
            SelectionOutcome::Busy
        );

        controller.advance(0.1);
        assert!(controller.is_busy());
        controller.advance(0.25);
        assert!(!controller.is_busy());
        assert_eq!(controller.cooldown(), 0.0);

        let outcome = controller.try_select(Coord::new(0, 0), &mut recorder);
        assert!(!outcome.is_busy());
    }

    #[test]
    fn test_no_op_selections() {
        let mut controller = controller(BoardConfig::new(3, 2));
        let mut recorder = Recorder::default();
        // Isolated tiles everywhere, one empty cell.
        start_from_rows(
            &mut controller,
            &mut recorder,
            &[
                "AB.", //
                "BAC", //
            ],
        );
        recorder.annotated.clear();

        assert_eq!(
            controller.try_select(Coord::new(9, 9), &mut recorder),
            SelectionOutcome::OutOfBounds
        );
        assert_eq!(
            controller.try_select(Coord::new(2, 1), &mut recorder),
            SelectionOutcome::EmptyCell
        );
        assert_eq!(
            controller.try_select(Coord::new(0, 0), &mut recorder),
            SelectionOutcome::GroupTooSmall
        );

        // No-ops emit no notifications and leave the board untouched.
        assert!(recorder.cleared.is_empty());
        assert!(recorder.dropped.is_empty());
        assert!(recorder.annotated.is_empty());
        let board = controller.board().expect("game started");
        assert_eq!(board.tile(Coord::new(2, 1)), None);
        assert!(!board.needs_filling());
    }

    #[test]
    fn test_cleared_turn_reports_and_notifies() {
        let mut controller = controller(BoardConfig::new(4, 4));
        let mut recorder = Recorder::default();
        start_from_rows(
            &mut controller,
            &mut recorder,
            &[
                "ABCD", //
                "BCDA", //
                "BCDA", //
                "ABCD", //
            ],
        );
        recorder.annotated.clear();

        // The B pair in column 0, rows 1-2.
        let outcome = controller.try_select(Coord::new(0, 1), &mut recorder);
        let SelectionOutcome::Cleared(report) = outcome else {
            panic!("expected a cleared turn, got {outcome:?}");
        };
        assert_eq!(report.cleared, 2);
        assert_eq!(recorder.cleared.len(), 2);

        // Refill spawns exactly as many tiles as were cleared, and the
        // annotation pass covers the full board again.
        assert_eq!(recorder.spawned.len(), 2);
        assert_eq!(recorder.annotated.len(), 16);

        let board = controller.board().expect("game started");
        assert!(board.grid().cells().iter().all(|cell| cell.is_some()));
        if report.deadlock_unresolved {
            assert!(report.shuffled);
            assert!(!board.has_any_valid_move());
        } else {
            assert!(board.has_any_valid_move());
        }
    }

    #[test]
    fn test_turn_cooldown_is_the_longest_announced_duration() {
        let mut controller = controller(BoardConfig::new(4, 4));
        let mut recorder = Recorder {
            clear_duration: 0.25,
            drop_duration: 0.4,
            ..Recorder::default()
        };
        start_from_rows(
            &mut controller,
            &mut recorder,
            &[
                "ABCD", //
                "BCDA", //
                "BCDA", //
                "ABCD", //
            ],
        );
        controller.advance(1.0);

        let outcome = controller.try_select(Coord::new(0, 1), &mut recorder);
        assert!(outcome.is_cleared());
        // Drops and spawns announced 0.4s, clears only 0.25s.
        assert!((controller.cooldown() - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn test_shuffle_reporting_over_many_seeds() {
        // On a full-palette 2x1 board every clear empties the whole board
        // and the refill draws two random colors: some seeds deadlock, some
        // do not, and some deadlocks cannot be shuffled away. The report
        // must stay coherent with the final board in every case.
        let mut config = BoardConfig::new(2, 1);
        config.palette_size = 6;
        for seed in 0..40 {
            let mut controller = controller(config);
            let mut recorder = Recorder::default();
            let board = BoardState::from_rows(config, seed, &["AA"]).expect("valid literal");
            controller
                .start_from_board(board, &mut recorder)
                .expect("matching configuration");

            let outcome = controller.try_select(Coord::new(0, 0), &mut recorder);
            let SelectionOutcome::Cleared(report) = outcome else {
                panic!("the AA pair always clears, got {outcome:?}");
            };
            assert_eq!(report.cleared, 2);

            let board = controller.board().expect("game started");
            if report.shuffled {
                assert_eq!(recorder.shuffles, 1);
                assert_eq!(
                    report.deadlock_unresolved,
                    !board.has_any_valid_move(),
                    "seed {seed}"
                );
            } else {
                assert_eq!(recorder.shuffles, 0);
                assert!(board.has_any_valid_move(), "seed {seed}");
            }
        }
    }

    #[test]
    fn test_start_from_board_rejects_mismatched_config() {
        let mut controller = controller(BoardConfig::new(4, 4));
        let board = BoardState::with_seed(BoardConfig::new(5, 4), 1).unwrap();
        assert_eq!(
            controller.start_from_board(board, &mut ()),
            Err(GameError::BoardMismatch)
        );
    }

    #[test]
    fn test_position_mapping_matches_centered_offsets() {
        let controller = controller(BoardConfig::new(3, 2));
        // Offset centers the board: cells sit at x in {-1, 0, 1}, y in
        // {-0.5, 0.5}.
        assert_eq!(controller.tile_offset(), (-1.0, -0.5));

        assert_eq!(
            controller.position_to_coord(0.0, 0.5),
            Some(Coord::new(1, 1))
        );
        assert_eq!(
            controller.position_to_coord(-1.0, -0.5),
            Some(Coord::new(0, 0))
        );
        // Clicks up to half a cell away still land on the edge cell.
        assert_eq!(
            controller.position_to_coord(1.49, 0.99),
            Some(Coord::new(2, 1))
        );
        // Beyond that: outside the grid.
        assert_eq!(controller.position_to_coord(1.51, 0.0), None);
        assert_eq!(controller.position_to_coord(0.0, -1.01), None);
    }

    #[test]
    fn test_select_at_maps_and_delegates() {
        let mut controller = controller(BoardConfig::new(3, 2));
        let mut recorder = Recorder::default();
        start_from_rows(
            &mut controller,
            &mut recorder,
            &[
                "AB.", //
                "BAC", //
            ],
        );

        // (-1.0, 0.5) is the top-left cell (0, 1): an isolated A.
        assert_eq!(
            controller.select_at(-1.0, 0.5, &mut recorder),
            SelectionOutcome::GroupTooSmall
        );
        // Far outside the board.
        assert_eq!(
            controller.select_at(5.0, 5.0, &mut recorder),
            SelectionOutcome::OutOfBounds
        );
    }
}
