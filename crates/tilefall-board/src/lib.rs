//! Board simulation engine for Tilefall.
//!
//! This crate owns all of the game's algorithmic content: whole-grid fill
//! with a valid-move guarantee, breadth-first connected-group search,
//! selection clearing, gravity compaction with random refill (including the
//! small-board matching guarantee), deadlock detection, and the
//! deadlock-breaking shuffle.
//!
//! Randomness is seedable and owned by the board, so every game can be
//! replayed deterministically from its recorded seed.
//!
//! # Overview
//!
//! - [`board`]: The [`BoardState`] engine and its [`BoardPhase`] lifecycle
//! - [`config`]: [`BoardConfig`] and start-of-game validation
//! - [`tile_drop`]: Per-turn [`TileDrop`] records for animation
//!
//! # Examples
//!
//! ```
//! use tilefall_board::{BoardConfig, BoardState};
//! use tilefall_core::Coord;
//!
//! let mut board = BoardState::with_seed(BoardConfig::new(8, 8), 7).unwrap();
//! board.start_new_game();
//!
//! // Clear whatever group the bottom-left corner belongs to, if clearable.
//! if let Some(cleared) = board.try_clear(Coord::new(0, 0)) {
//!     assert!(cleared.len() >= 2);
//!     assert!(board.needs_filling());
//!     board.drop_tiles();
//! }
//! assert!(!board.needs_filling());
//! ```

pub mod board;
pub mod config;
pub mod tile_drop;

// Re-export commonly used types
pub use self::{
    board::{BoardPhase, BoardState, MIN_GROUP_SIZE, ParseBoardError},
    config::{BoardConfig, ConfigError},
    tile_drop::TileDrop,
};
