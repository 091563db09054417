//! The notification boundary between the engine and a presentation layer.

use tilefall_board::TileDrop;
use tilefall_core::{Coord, TileColor};

use crate::GroupTier;

/// Receives structural-change notifications while a turn resolves.
///
/// The engine never touches scene objects; instead it reports every cleared,
/// slid, and spawned tile through this trait so a presentation layer can
/// animate them. All methods default to no-ops, so implementors only handle
/// what they render.
///
/// Methods whose effects a presentation layer would animate return the
/// animation's duration in seconds. The [`BoardController`] stays "busy" for
/// the longest duration announced during a turn and rejects selections until
/// that cooldown has elapsed. The timing is advisory: the engine itself is
/// always ready for the next operation.
///
/// The unit type implements the trait as the all-no-op observer for headless
/// simulation and tests.
///
/// [`BoardController`]: crate::BoardController
pub trait BoardObserver {
    /// A tile at `coord` was cleared by a successful selection.
    fn tile_cleared(&mut self, coord: Coord) -> f32 {
        let _ = coord;
        0.0
    }

    /// An existing tile slid down to `drop.destination` during compaction.
    fn tile_dropped(&mut self, drop: TileDrop) -> f32 {
        let _ = drop;
        0.0
    }

    /// A fresh tile entered from above the grid and settled at `coord`.
    fn tile_spawned(&mut self, coord: Coord, color: TileColor) -> f32 {
        let _ = (coord, color);
        0.0
    }

    /// After a full-board recompute, `coord` belongs to a connected group of
    /// `group_size` cells classified as `tier` under the configured
    /// breakpoints.
    fn group_annotated(&mut self, coord: Coord, group_size: usize, tier: GroupTier) {
        let _ = (coord, group_size, tier);
    }

    /// Deadlock recovery redistributed the tiles on the board.
    fn board_shuffled(&mut self) -> f32 {
        0.0
    }
}

impl BoardObserver for () {}
