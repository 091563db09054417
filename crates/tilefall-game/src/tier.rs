//! Group-size icon tiers.

/// Group-size breakpoints above which tiles display distinct icons.
///
/// Groups below `medium` use the default icon; groups of at least `medium`
/// and at least `large` cells step up through the remaining tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupThresholds {
    /// Smallest group size that counts as [`GroupTier::Medium`].
    pub medium: usize,
    /// Smallest group size that counts as [`GroupTier::Large`].
    pub large: usize,
}

impl GroupThresholds {
    /// Checks that the breakpoints are ordered and reachable.
    ///
    /// # Errors
    ///
    /// Returns a [`ThresholdError`] unless `2 <= medium < large`: a group
    /// below two cells cannot exist, and an inverted pair would make the
    /// medium tier unreachable.
    pub fn validate(&self) -> Result<(), ThresholdError> {
        if self.medium < 2 || self.medium >= self.large {
            return Err(ThresholdError {
                medium: self.medium,
                large: self.large,
            });
        }
        Ok(())
    }
}

impl Default for GroupThresholds {
    fn default() -> Self {
        Self {
            medium: 5,
            large: 8,
        }
    }
}

/// Icon tier of a connected group, by size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GroupTier {
    /// Below the medium breakpoint; default icon.
    Small,
    /// At or above the medium breakpoint.
    Medium,
    /// At or above the large breakpoint.
    Large,
}

impl GroupTier {
    /// Classifies a group size against the given breakpoints.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilefall_game::{GroupThresholds, GroupTier};
    ///
    /// let thresholds = GroupThresholds::default();
    /// assert_eq!(GroupTier::classify(2, thresholds), GroupTier::Small);
    /// assert_eq!(GroupTier::classify(5, thresholds), GroupTier::Medium);
    /// assert_eq!(GroupTier::classify(11, thresholds), GroupTier::Large);
    /// ```
    #[must_use]
    pub fn classify(group_size: usize, thresholds: GroupThresholds) -> Self {
        if group_size >= thresholds.large {
            Self::Large
        } else if group_size >= thresholds.medium {
            Self::Medium
        } else {
            Self::Small
        }
    }
}

/// Icon breakpoints that could never classify a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("icon thresholds must satisfy 2 <= medium < large, got {medium}/{large}")]
pub struct ThresholdError {
    /// The rejected medium breakpoint.
    pub medium: usize,
    /// The rejected large breakpoint.
    pub large: usize,
}
