//! Tile color representation.

use std::fmt::{self, Display};

/// The contents of one board cell: a colored tile, or empty.
///
/// Cells become `None` when a group is cleared and are repopulated by the
/// drop/refill pass.
pub type Cell = Option<TileColor>;

/// A tile color from the fixed palette.
///
/// This enum provides type-safe representation of the six tile colors,
/// preventing invalid values at compile time. Board configurations may
/// restrict play to a prefix of the palette; see `palette_size` in the board
/// crate.
///
/// # Examples
///
/// ```
/// use tilefall_core::TileColor;
///
/// let color = TileColor::C;
/// assert_eq!(color.index(), 2);
///
/// // Create from a palette index
/// let color = TileColor::from_index(5);
/// assert_eq!(color, TileColor::F);
///
/// // Iterate over the full palette
/// for color in TileColor::ALL {
///     println!("{}", color);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileColor {
    /// The first palette color.
    A,
    /// The second palette color.
    B,
    /// The third palette color.
    C,
    /// The fourth palette color.
    D,
    /// The fifth palette color.
    E,
    /// The sixth palette color.
    F,
}

impl TileColor {
    /// Array containing the full palette in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilefall_core::TileColor;
    ///
    /// assert_eq!(TileColor::ALL.len(), 6);
    /// assert_eq!(TileColor::ALL[0], TileColor::A);
    /// assert_eq!(TileColor::ALL[5], TileColor::F);
    /// ```
    pub const ALL: [Self; 6] = [Self::A, Self::B, Self::C, Self::D, Self::E, Self::F];

    /// Creates a color from a palette index in the range 0-5.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in the range 0-5.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilefall_core::TileColor;
    ///
    /// assert_eq!(TileColor::from_index(0), TileColor::A);
    /// assert_eq!(TileColor::from_index(3), TileColor::D);
    /// ```
    ///
    /// ```should_panic
    /// use tilefall_core::TileColor;
    ///
    /// // This will panic
    /// let _ = TileColor::from_index(6);
    /// ```
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Self::A,
            1 => Self::B,
            2 => Self::C,
            3 => Self::D,
            4 => Self::E,
            5 => Self::F,
            _ => panic!("Invalid color index: {index}"),
        }
    }

    /// Returns the palette index of this color (0-5).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the single-character representation of this color (`'A'`-`'F'`).
    ///
    /// Used by the board-literal text format, together with `'.'` for empty
    /// cells.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
            Self::F => 'F',
        }
    }

    /// Parses a color from its single-character representation.
    ///
    /// Returns `None` for characters outside `'A'`-`'F'`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilefall_core::TileColor;
    ///
    /// assert_eq!(TileColor::from_char('B'), Some(TileColor::B));
    /// assert_eq!(TileColor::from_char('.'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            'E' => Some(Self::E),
            'F' => Some(Self::F),
            _ => None,
        }
    }
}

impl Display for TileColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.as_char(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        // from_index and index() round-trip for boundary values
        assert_eq!(TileColor::from_index(0), TileColor::A);
        assert_eq!(TileColor::from_index(5), TileColor::F);
        assert_eq!(TileColor::A.index(), 0);
        assert_eq!(TileColor::F.index(), 5);

        // ALL constant contains all 6 colors in order
        assert_eq!(TileColor::ALL.len(), 6);
        for (i, color) in TileColor::ALL.into_iter().enumerate() {
            assert_eq!(color.index(), i);
            assert_eq!(TileColor::from_index(i), color);
        }

        // Display matches the char form
        assert_eq!(format!("{}", TileColor::A), "A");
        assert_eq!(format!("{}", TileColor::F), "F");
    }

    #[test]
    fn test_char_round_trip() {
        for color in TileColor::ALL {
            assert_eq!(TileColor::from_char(color.as_char()), Some(color));
        }
        assert_eq!(TileColor::from_char('.'), None);
        assert_eq!(TileColor::from_char('a'), None);
        assert_eq!(TileColor::from_char('G'), None);
    }

    #[test]
    #[should_panic(expected = "Invalid color index: 6")]
    fn test_from_index_out_of_range_panics() {
        let _ = TileColor::from_index(6);
    }
}
