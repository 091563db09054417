//! Per-turn drop records consumed by the presentation layer.

use tilefall_core::Coord;

/// A record of one tile movement produced by a drop/refill pass.
///
/// Each compacted tile and each freshly spawned tile yields one record,
/// carrying enough information to animate a slide or a fall-in from above.
/// Records are produced fresh every turn and replaced wholesale by the next
/// pass; they are not persisted.
///
/// # Examples
///
/// ```
/// use tilefall_board::TileDrop;
/// use tilefall_core::Coord;
///
/// // A tile that slid two rows down to (3, 1) on an 8-row board.
/// let slide = TileDrop::new(Coord::new(3, 1), 2);
/// assert_eq!(slide.from_row, 3);
/// assert!(!slide.is_spawn(8));
///
/// // A tile spawned into the top row after three cells were vacated.
/// let spawn = TileDrop::new(Coord::new(3, 7), 3);
/// assert_eq!(spawn.from_row, 10);
/// assert!(spawn.is_spawn(8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileDrop {
    /// Where the tile comes to rest.
    pub destination: Coord,
    /// The row the tile logically fell from. At or beyond the board height
    /// this means the tile did not exist before the pass and enters from
    /// off-grid above.
    pub from_row: u32,
    /// How many rows the tile fell.
    pub rows_fallen: u32,
}

impl TileDrop {
    /// Creates a drop record for a tile resting at `destination` after
    /// falling `rows_fallen` rows.
    #[must_use]
    pub const fn new(destination: Coord, rows_fallen: u32) -> Self {
        Self {
            destination,
            from_row: destination.y + rows_fallen,
            rows_fallen,
        }
    }

    /// Returns whether this record describes a freshly spawned tile rather
    /// than an existing tile sliding within the given board height.
    #[must_use]
    pub const fn is_spawn(&self, board_height: u32) -> bool {
        self.from_row >= board_height
    }
}
