//! Data structures decoded from `osu!.db`.

pub mod beatmap;
pub mod database;
pub mod enums;

pub use beatmap::{Beatmap, Mods, StarRating, TimingPoint};
pub use database::{Database, UserPermissions};
pub use enums::{GameMode, Grade, RankedStatus};
