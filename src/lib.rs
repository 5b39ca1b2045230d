//! Reader and writer for the osu!stable beatmap cache, `osu!.db`.
//!
//! [`Database::open`] discards the [`EncodingFallback`] diagnostics. Strings
//! that needed the fallback are written back as UTF-8, so call [`decode`]
//! and check [`Decoded::fallbacks`] before saving a file that must stay
//! byte-compatible.
//!
//! ```no_run
//! let mut db = osudb::Database::open("osu!.db")?;
//! db.player_name = "Wanna Accuracy".into();
//! db.save("osu!.db")?;
//! # Ok::<(), osudb::Error>(())
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;

pub use codec::{Decoded, decode, decode_bytes, encode, encode_to_vec};
pub use config::Config;
pub use error::{EncodingFallback, Error, FormatError, FormatErrorKind, Result};
pub use models::{
    Beatmap, Database, GameMode, Grade, Mods, RankedStatus, StarRating, TimingPoint,
    UserPermissions,
};
