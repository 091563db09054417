//! Board configuration and start-of-game validation.

use tilefall_core::TileColor;

/// Configuration for a [`BoardState`].
///
/// Validated once at construction; a misconfigured board is a setup error
/// and is rejected before play begins rather than discovered mid-game.
///
/// [`BoardState`]: crate::BoardState
///
/// # Examples
///
/// ```
/// use tilefall_board::BoardConfig;
///
/// let config = BoardConfig::default();
/// assert_eq!((config.width, config.height), (8, 8));
/// assert!(config.validate().is_ok());
///
/// let tiny = BoardConfig {
///     width: 1,
///     height: 1,
///     ..BoardConfig::default()
/// };
/// assert!(tiny.validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    /// Board width in columns.
    pub width: u32,
    /// Board height in rows.
    pub height: u32,
    /// Number of distinct colors in play, drawn from the front of
    /// [`TileColor::ALL`]. Must be at least 2 (a single-color palette would
    /// make the matching guarantee meaningless) and at most the full palette.
    pub palette_size: usize,
    /// Maximum whole-grid random fills attempted before forcing a matching
    /// pair onto the board.
    pub fill_retry_cap: u32,
    /// Maximum random permutations attempted when shuffling out of a
    /// deadlock before giving up with a warning.
    pub shuffle_retry_cap: u32,
}

impl BoardConfig {
    /// Creates a configuration for a `width x height` board with the default
    /// palette and retry caps.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            palette_size: TileColor::ALL.len(),
            fill_retry_cap: 64,
            shuffle_retry_cap: 50,
        }
    }

    /// Returns the total number of cells on the board.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Returns the colors in play.
    ///
    /// Only meaningful after [`validate`](Self::validate) has passed.
    #[must_use]
    pub fn palette(&self) -> &'static [TileColor] {
        &TileColor::ALL[..self.palette_size]
    }

    /// Checks the configuration for values that could never produce a
    /// playable board.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PaletteSize`] if the palette is smaller than 2
    /// or larger than [`TileColor::ALL`], [`ConfigError::BoardTooSmall`] if
    /// the board has fewer than 2 cells (no adjacent pair can ever exist),
    /// and [`ConfigError::ZeroRetryCap`] if either retry cap is 0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette_size < 2 || self.palette_size > TileColor::ALL.len() {
            return Err(ConfigError::PaletteSize {
                size: self.palette_size,
            });
        }
        if self.cell_count() < 2 {
            return Err(ConfigError::BoardTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.fill_retry_cap == 0 || self.shuffle_retry_cap == 0 {
            return Err(ConfigError::ZeroRetryCap);
        }
        Ok(())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(8, 8)
    }
}

/// A configuration value that can never produce a playable board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    /// The palette size is outside the supported 2-6 range.
    #[display("palette size {size} is outside the supported range 2-6")]
    PaletteSize {
        /// The rejected palette size.
        size: usize,
    },
    /// The board holds fewer than two cells, so no adjacent pair can exist.
    #[display("{width}x{height} board can never contain a valid move")]
    BoardTooSmall {
        /// The rejected width.
        width: u32,
        /// The rejected height.
        height: u32,
    },
    /// A retry cap was configured as 0, which would disable its repair loop.
    #[display("fill and shuffle retry caps must be at least 1")]
    ZeroRetryCap,
}
