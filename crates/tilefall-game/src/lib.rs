//! Game orchestration for Tilefall.
//!
//! This crate drives the board engine through complete turns and exposes the
//! boundary a presentation layer plugs into:
//!
//! - [`controller`]: [`BoardController`], the turn sequencer and input gate
//! - [`observer`]: the [`BoardObserver`] notification trait
//! - [`tier`]: group-size icon tiers
//!
//! # Examples
//!
//! ```
//! use tilefall_core::Coord;
//! use tilefall_game::{BoardController, GameConfig};
//!
//! let mut controller = BoardController::new(GameConfig::default()).unwrap();
//! controller.start_new_game_with_seed(42, &mut ());
//!
//! let outcome = controller.try_select(Coord::new(3, 4), &mut ());
//! println!("{outcome:?}");
//! ```

pub mod controller;
pub mod observer;
pub mod tier;

// Re-export commonly used types
pub use self::{
    controller::{BoardController, GameConfig, GameError, SelectionOutcome, TurnReport},
    observer::BoardObserver,
    tier::{GroupThresholds, GroupTier, ThresholdError},
};
