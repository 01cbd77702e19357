//! Expansion options, threaded explicitly through every recursive call.

use crate::error::ExpandError;

/// How aggressively tooling markers and comments are removed from output.
///
/// Levels are ordered: everything dropped at a given level is also dropped
/// at every higher level, so monotonicity checks can use plain comparisons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum CleanLevel {
    /// Level 0: keep everything and mark each inclusion with a
    /// `#%include '<name>'` provenance comment.
    #[default]
    None,
    /// Level 1: suppress the inclusion-provenance markers.
    Markers,
    /// Level 2: additionally drop every comment-only line, at any depth.
    Comments,
}

/// Highest supported clean level.
pub const MAX_CLEAN_LEVEL: u8 = 2;

impl CleanLevel {
    /// Maps a counted command-line flag to a level.
    ///
    /// Counts above [`MAX_CLEAN_LEVEL`] are a configuration error and are
    /// rejected before any expansion begins.
    pub fn from_count(count: u8) -> Result<Self, ExpandError> {
        match count {
            0 => Ok(Self::None),
            1 => Ok(Self::Markers),
            2 => Ok(Self::Comments),
            n => Err(ExpandError::CleanLevelOutOfRange(n)),
        }
    }

    /// Whether inclusions are marked with a provenance comment.
    pub fn marks_inclusions(self) -> bool {
        self == Self::None
    }

    /// Whether comment-only lines are dropped outright.
    pub fn strips_comments(self) -> bool {
        self == Self::Comments
    }

    /// The numeric ordinal of this level.
    pub fn as_count(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Markers => 1,
            Self::Comments => 2,
        }
    }
}

/// Configuration for an expansion run.
#[derive(Debug, Clone, Default)]
pub struct ExpandOptions {
    /// Suppression level for tooling markers and comments.
    pub clean: CleanLevel,
    /// Optional ceiling on inclusion nesting, an opt-in guard against
    /// cyclic inclusion trees.
    ///
    /// `None` leaves nesting unbounded: a cyclic inclusion recurses until
    /// the process exhausts its stack. `Some(n)` fails any inclusion
    /// nested more than `n` levels deep instead.
    pub max_depth: Option<usize>,
}

impl ExpandOptions {
    /// Creates options with the default clean level and no depth ceiling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the clean level.
    pub fn clean(mut self, level: CleanLevel) -> Self {
        self.clean = level;
        self
    }

    /// Sets the inclusion depth ceiling.
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_count_maps_levels() {
        assert_eq!(CleanLevel::from_count(0).unwrap(), CleanLevel::None);
        assert_eq!(CleanLevel::from_count(1).unwrap(), CleanLevel::Markers);
        assert_eq!(CleanLevel::from_count(2).unwrap(), CleanLevel::Comments);
    }

    #[test]
    fn test_from_count_rejects_above_max() {
        let err = CleanLevel::from_count(3).unwrap_err();
        assert!(matches!(err, ExpandError::CleanLevelOutOfRange(3)));

        assert!(CleanLevel::from_count(255).is_err());
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(CleanLevel::None < CleanLevel::Markers);
        assert!(CleanLevel::Markers < CleanLevel::Comments);
    }

    #[test]
    fn test_level_predicates() {
        assert!(CleanLevel::None.marks_inclusions());
        assert!(!CleanLevel::Markers.marks_inclusions());
        assert!(!CleanLevel::Comments.marks_inclusions());

        assert!(!CleanLevel::None.strips_comments());
        assert!(!CleanLevel::Markers.strips_comments());
        assert!(CleanLevel::Comments.strips_comments());
    }

    #[test]
    fn test_default_options() {
        let options = ExpandOptions::default();
        assert_eq!(options.clean, CleanLevel::None);
        assert_eq!(options.max_depth, None);
    }

    #[test]
    fn test_builder_setters() {
        let options = ExpandOptions::new()
            .clean(CleanLevel::Comments)
            .max_depth(4);
        assert_eq!(options.clean, CleanLevel::Comments);
        assert_eq!(options.max_depth, Some(4));
    }

    #[test]
    fn test_count_round_trip() {
        for count in 0..=MAX_CLEAN_LEVEL {
            assert_eq!(CleanLevel::from_count(count).unwrap().as_count(), count);
        }
    }
}
