//! Byte-sized enumerations stored in beatmap records.
//!
//! Each enum maps one-to-one onto its on-disk byte. Bytes outside the
//! defined range are rejected by `TryFrom<u8>`, there is no catch-all
//! variant.

use serde::{Deserialize, Serialize};

/// Ranked status of a beatmap on the online listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum RankedStatus {
    #[default]
    Unknown = 0,
    Unsubmitted = 1,
    /// Pending, WIP or graveyard.
    PendingWipGraveyard = 2,
    Unused = 3,
    Ranked = 4,
    Approved = 5,
    Qualified = 6,
    Loved = 7,
}

impl TryFrom<u8> for RankedStatus {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Unknown,
            1 => Self::Unsubmitted,
            2 => Self::PendingWipGraveyard,
            3 => Self::Unused,
            4 => Self::Ranked,
            5 => Self::Approved,
            6 => Self::Qualified,
            7 => Self::Loved,
            other => return Err(other),
        })
    }
}

impl RankedStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Unsubmitted => "unsubmitted",
            Self::PendingWipGraveyard => "pending",
            Self::Unused => "unused",
            Self::Ranked => "ranked",
            Self::Approved => "approved",
            Self::Qualified => "qualified",
            Self::Loved => "loved",
        }
    }
}

/// Best local grade achieved on a beatmap, per game mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Grade {
    #[default]
    None = 0,
    F = 1,
    D = 2,
    C = 3,
    B = 4,
    A = 5,
    /// Silver S.
    S = 6,
    /// Silver S with hidden/flashlight.
    SH = 7,
    /// Gold SS.
    X = 8,
    /// Gold SS with hidden/flashlight.
    XH = 9,
}

impl TryFrom<u8> for Grade {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::None,
            1 => Self::F,
            2 => Self::D,
            3 => Self::C,
            4 => Self::B,
            5 => Self::A,
            6 => Self::S,
            7 => Self::SH,
            8 => Self::X,
            9 => Self::XH,
            other => return Err(other),
        })
    }
}

/// Gameplay mode a beatmap was authored for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum GameMode {
    #[default]
    Osu = 0,
    Taiko = 1,
    Catch = 2,
    Mania = 3,
}

impl TryFrom<u8> for GameMode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Osu,
            1 => Self::Taiko,
            2 => Self::Catch,
            3 => Self::Mania,
            other => return Err(other),
        })
    }
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [Self::Osu, Self::Taiko, Self::Catch, Self::Mania];

    pub fn label(self) -> &'static str {
        match self {
            Self::Osu => "osu",
            Self::Taiko => "taiko",
            Self::Catch => "catch",
            Self::Mania => "mania",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_status_bytes_match_discriminants() {
        for byte in 0..=7u8 {
            let status = RankedStatus::try_from(byte).unwrap();
            assert_eq!(status as u8, byte);
        }
        assert_eq!(RankedStatus::try_from(8), Err(8));
    }

    #[test]
    fn test_grade_rejects_out_of_range() {
        assert_eq!(Grade::try_from(9), Ok(Grade::XH));
        assert_eq!(Grade::try_from(10), Err(10));
        assert_eq!(Grade::try_from(255), Err(255));
    }

    #[test]
    fn test_game_mode_round_trip() {
        for mode in GameMode::ALL {
            assert_eq!(GameMode::try_from(mode as u8), Ok(mode));
        }
        assert_eq!(GameMode::try_from(4), Err(4));
    }
}
