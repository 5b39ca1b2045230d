//! Which record shape a format version uses.

/// First version storing difficulty parameters as `f32` and carrying star ratings.
pub const FLOAT_DIFFICULTY_SINCE: u32 = 20140609;
/// First version without the per-record length prefix.
pub const NO_LENGTH_PREFIX_SINCE: u32 = 20191106;
/// First version storing star ratings as int/float pairs instead of int/double.
pub const FLOAT_STAR_RATINGS_SINCE: u32 = 20250107;

/// On-disk shape of a star-rating entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairShape {
    IntDouble,
    IntFloat,
}

/// The independent layout switches derived from one format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Each record starts with a 4-byte byte count of the rest of the record.
    pub length_prefix: bool,
    /// Difficulty parameters are `f32` rather than one byte each.
    pub float_difficulty: bool,
    /// `None` when the four star-rating lists are absent.
    pub star_ratings: Option<PairShape>,
    /// Two filler bytes after the override flags.
    pub legacy_padding: bool,
}

impl Layout {
    pub fn for_version(version: u32) -> Self {
        let modern = version >= FLOAT_DIFFICULTY_SINCE;
        let star_ratings = match (modern, version >= FLOAT_STAR_RATINGS_SINCE) {
            (false, _) => None,
            (true, false) => Some(PairShape::IntDouble),
            (true, true) => Some(PairShape::IntFloat),
        };
        Self {
            length_prefix: version < NO_LENGTH_PREFIX_SINCE,
            float_difficulty: modern,
            star_ratings,
            legacy_padding: !modern,
        }
    }
}
