//! In-memory shape of one beatmap record.
//!
//! A single struct covers every format version. Fields that a given version
//! does not store (star ratings before 2014-06-09, the legacy padding after
//! it) are simply left at their defaults on decode and skipped on encode.

use super::enums::{GameMode, Grade, RankedStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One cached beatmap entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Beatmap {
    pub artist: String,
    pub artist_unicode: String,
    pub title: String,
    pub title_unicode: String,
    pub creator: String,
    /// Difficulty name, e.g. "Insane".
    pub difficulty: String,
    pub audio_filename: String,
    /// MD5 of the `.osu` file, lowercase hex.
    pub md5_hash: String,
    /// Name of the `.osu` file inside the beatmap folder.
    pub osu_filename: String,
    pub ranked_status: RankedStatus,
    pub hit_circles: u16,
    pub sliders: u16,
    pub spinners: u16,
    pub last_modified: DateTime<Utc>,

    // Stored as whole bytes before 20140609.
    pub approach_rate: f32,
    pub circle_size: f32,
    pub hp_drain: f32,
    pub overall_difficulty: f32,

    pub slider_velocity: f64,

    pub star_ratings_osu: Vec<StarRating>,
    pub star_ratings_taiko: Vec<StarRating>,
    pub star_ratings_catch: Vec<StarRating>,
    pub star_ratings_mania: Vec<StarRating>,

    /// Drain time in seconds.
    pub drain_time: u32,
    /// Total time in milliseconds.
    pub total_time: u32,
    /// Audio preview point in milliseconds, `-1` when unset.
    pub preview_time: i32,
    pub timing_points: Vec<TimingPoint>,

    pub difficulty_id: u32,
    pub beatmap_id: u32,
    pub thread_id: u32,

    pub grade_osu: Grade,
    pub grade_taiko: Grade,
    pub grade_catch: Grade,
    pub grade_mania: Grade,

    pub local_offset: u16,
    pub stack_leniency: f32,
    pub mode: GameMode,
    pub source: String,
    pub tags: String,
    pub online_offset: u16,
    pub font_title: String,
    pub is_unplayed: bool,
    pub last_played: DateTime<Utc>,
    pub is_osz2: bool,
    pub folder_name: String,
    pub last_checked: DateTime<Utc>,

    pub ignore_sound: bool,
    pub ignore_skin: bool,
    pub disable_storyboard: bool,
    pub disable_video: bool,
    pub visual_override: bool,

    /// Two bytes present only before 20140609.
    pub legacy_padding: u16,
    /// Opaque 4-byte field after the override flags; kept for byte-exact re-encoding.
    pub reserved: u32,
    pub mania_scroll_speed: u8,
}

impl Beatmap {
    /// Star ratings recorded for the given mode.
    pub fn star_ratings(&self, mode: GameMode) -> &[StarRating] {
        match mode {
            GameMode::Osu => &self.star_ratings_osu,
            GameMode::Taiko => &self.star_ratings_taiko,
            GameMode::Catch => &self.star_ratings_catch,
            GameMode::Mania => &self.star_ratings_mania,
        }
    }

    /// No-mod star rating for the beatmap's own mode, if cached.
    pub fn nomod_stars(&self) -> Option<f32> {
        self.star_ratings(self.mode)
            .iter()
            .find(|sr| sr.mods == Mods::NONE)
            .map(|sr| sr.stars)
    }

    /// `artist - title [difficulty]`
    pub fn display_name(&self) -> String {
        format!("{} - {} [{}]", self.artist, self.title, self.difficulty)
    }
}

/// A cached star rating for one mod combination.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StarRating {
    pub mods: Mods,
    pub stars: f32,
}

impl StarRating {
    pub fn new(mods: Mods, stars: f32) -> Self {
        Self { mods, stars }
    }
}

/// Uninherited or inherited timing section.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimingPoint {
    pub bpm: f64,
    /// Offset into the song in milliseconds.
    pub offset: f64,
    pub is_inherited: bool,
}

impl TimingPoint {
    pub fn new(bpm: f64, offset: f64, is_inherited: bool) -> Self {
        Self {
            bpm,
            offset,
            is_inherited,
        }
    }
}

/// Mod combination bitmask attached to a star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mods(pub u32);

impl Mods {
    pub const NONE: Mods = Mods(0);
    pub const EASY: Mods = Mods(1 << 1);
    pub const HARD_ROCK: Mods = Mods(1 << 4);
    pub const DOUBLE_TIME: Mods = Mods(1 << 6);
    pub const HALF_TIME: Mods = Mods(1 << 8);

    const NAMED: [(Mods, &'static str); 4] = [
        (Self::EASY, "EZ"),
        (Self::HARD_ROCK, "HR"),
        (Self::DOUBLE_TIME, "DT"),
        (Self::HALF_TIME, "HT"),
    ];

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: Mods) -> bool {
        self.0 & other.0 == other.0
    }

    /// Short acronym form, `NM` for no mods.
    pub fn acronyms(self) -> String {
        if self == Self::NONE {
            return "NM".to_string();
        }
        let mut out: String = Self::NAMED
            .iter()
            .filter(|(m, _)| self.contains(*m))
            .map(|(_, name)| *name)
            .collect();
        let known = Self::NAMED.iter().fold(0, |acc, (m, _)| acc | m.0);
        if self.0 & !known != 0 {
            out.push_str(&format!("+{:#x}", self.0 & !known));
        }
        out
    }
}

impl std::ops::BitOr for Mods {
    type Output = Mods;

    fn bitor(self, rhs: Mods) -> Mods {
        Mods(self.0 | rhs.0)
    }
}
