//! Shared test data.

use super::layout::Layout;
use crate::models::{
    Beatmap, Database, GameMode, Grade, Mods, RankedStatus, StarRating, TimingPoint,
    UserPermissions,
};
use chrono::{DateTime, TimeZone, Utc};

/// Each layout threshold plus one version on either side, and an ancient one.
pub const THRESHOLD_VERSIONS: [u32; 10] = [
    20121008, 20140608, 20140609, 20140610, 20191105, 20191106, 20191107, 20250106, 20250107,
    20250108,
];

fn at(year: i32, month: u32, day: u32, nanos: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 18, 4, 27).unwrap()
        + chrono::TimeDelta::nanoseconds(i64::from(nanos))
}

/// A beatmap whose fields survive a round trip at `version`.
pub fn sample_beatmap(version: u32) -> Beatmap {
    let layout = Layout::for_version(version);
    let ratings = |base: f32| {
        vec![
            StarRating::new(Mods::NONE, base),
            StarRating::new(Mods::HARD_ROCK | Mods::DOUBLE_TIME, base * 1.5),
        ]
    };
    let (osu, taiko, catch, mania) = if layout.star_ratings.is_some() {
        (ratings(5.25), ratings(3.5), ratings(4.75), ratings(2.125))
    } else {
        Default::default()
    };

    Beatmap {
        artist: "xi".into(),
        artist_unicode: "xi".into(),
        title: "Blue Zenith".into(),
        title_unicode: "ブルー・ゼニス".into(),
        creator: "Asphyxia".into(),
        difficulty: "FOUR DIMENSIONS".into(),
        audio_filename: "audio.mp3".into(),
        md5_hash: "a4c6f6e1f2a3b4c5d6e7f8091a2b3c4d".into(),
        osu_filename: "xi - Blue Zenith (Asphyxia) [FOUR DIMENSIONS].osu".into(),
        ranked_status: RankedStatus::Ranked,
        hit_circles: 1548,
        sliders: 593,
        spinners: 2,
        last_modified: at(2016, 4, 2, 123_456_700),
        approach_rate: 9.0,
        circle_size: 4.0,
        hp_drain: 6.0,
        overall_difficulty: 9.0,
        slider_velocity: 1.8,
        star_ratings_osu: osu,
        star_ratings_taiko: taiko,
        star_ratings_catch: catch,
        star_ratings_mania: mania,
        drain_time: 242,
        total_time: 247_000,
        preview_time: -1,
        timing_points: vec![
            TimingPoint::new(200.0, 1_104.0, false),
            TimingPoint::new(-50.0, 33_504.0, true),
        ],
        difficulty_id: 658_127,
        beatmap_id: 292_301,
        thread_id: 412_345,
        grade_osu: Grade::A,
        grade_taiko: Grade::None,
        grade_catch: Grade::None,
        grade_mania: Grade::XH,
        local_offset: 5,
        stack_leniency: 0.7,
        mode: GameMode::Osu,
        source: "".into(),
        tags: "asphyxia blue zenith xi".into(),
        online_offset: 0,
        font_title: "".into(),
        is_unplayed: false,
        last_played: at(2024, 11, 30, 0),
        is_osz2: false,
        folder_name: "292301 xi - Blue Zenith".into(),
        last_checked: at(2025, 1, 7, 9_999_900),
        ignore_sound: false,
        ignore_skin: true,
        disable_storyboard: false,
        disable_video: true,
        visual_override: false,
        legacy_padding: if layout.legacy_padding { 0x0102 } else { 0 },
        reserved: 0,
        mania_scroll_speed: 20,
    }
}

pub fn sample_database(version: u32) -> Database {
    let mut second = sample_beatmap(version);
    second.difficulty = "Extra".into();
    second.mode = GameMode::Mania;
    second.timing_points.clear();

    Database {
        version,
        folder_count: 412,
        account_unlocked: true,
        unlock_date: at(2013, 5, 1, 0),
        player_name: "WubWoofWolf".into(),
        beatmaps: vec![sample_beatmap(version), second],
        user_permissions: UserPermissions(1 | 4),
    }
}
