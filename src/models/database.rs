//! The whole `osu!.db` file as one value.

use super::beatmap::Beatmap;
use crate::codec;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Decoded beatmap database.
///
/// The beatmap count is not stored separately: it is always
/// `beatmaps.len()` when encoding.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Database {
    /// Format version, a `yyyymmdd` date. Selects the record layout.
    pub version: u32,
    pub folder_count: u32,
    pub account_unlocked: bool,
    /// When the account gets unlocked; only meaningful if `account_unlocked` is false.
    pub unlock_date: DateTime<Utc>,
    pub player_name: String,
    pub beatmaps: Vec<Beatmap>,
    pub user_permissions: UserPermissions,
}

impl Database {
    pub fn new(version: u32) -> Self {
        Self {
            version,
            ..Default::default()
        }
    }

    /// Decode a database file. Encoding fallbacks are logged and dropped;
    /// use [`codec::decode`] to inspect them.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Database> {
        let file = File::open(path)?;
        Ok(codec::decode(BufReader::new(file))?.database)
    }

    /// Encode into `path`, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        // Encode first so a failed encode leaves the existing file alone.
        let bytes = codec::encode_to_vec(self)?;
        let mut out = BufWriter::new(File::create(path)?);
        out.write_all(&bytes)?;
        out.flush()?;
        Ok(())
    }

    pub fn beatmap_count(&self) -> usize {
        self.beatmaps.len()
    }

    /// Find a beatmap by the MD5 of its `.osu` file.
    pub fn find_by_hash(&self, md5_hash: &str) -> Option<&Beatmap> {
        self.beatmaps
            .iter()
            .find(|b| b.md5_hash.eq_ignore_ascii_case(md5_hash))
    }
}

/// User permission bitmask stored at the end of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserPermissions(pub u32);

impl UserPermissions {
    pub const NONE: UserPermissions = UserPermissions(0);
    pub const NORMAL: UserPermissions = UserPermissions(1);
    pub const MODERATOR: UserPermissions = UserPermissions(2);
    pub const SUPPORTER: UserPermissions = UserPermissions(4);
    pub const FRIEND: UserPermissions = UserPermissions(8);
    pub const PEPPY: UserPermissions = UserPermissions(16);
    pub const WORLD_CUP_STAFF: UserPermissions = UserPermissions(32);

    const NAMED: [(UserPermissions, &'static str); 6] = [
        (Self::NORMAL, "normal"),
        (Self::MODERATOR, "moderator"),
        (Self::SUPPORTER, "supporter"),
        (Self::FRIEND, "friend"),
        (Self::PEPPY, "peppy"),
        (Self::WORLD_CUP_STAFF, "world cup staff"),
    ];

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: UserPermissions) -> bool {
        self.0 & other.0 == other.0
    }

    /// Names of the set flags, in bit order.
    pub fn names(self) -> Vec<&'static str> {
        Self::NAMED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_names() {
        let perms = UserPermissions(1 | 4);
        assert!(perms.contains(UserPermissions::SUPPORTER));
        assert!(!perms.contains(UserPermissions::MODERATOR));
        assert_eq!(perms.names(), vec!["normal", "supporter"]);
        assert!(UserPermissions::NONE.names().is_empty());
    }

    #[test]
    fn test_find_by_hash_ignores_case() {
        let mut db = Database::new(20250107);
        db.beatmaps.push(Beatmap {
            md5_hash: "d41d8cd98f00b204e9800998ecf8427e".into(),
            ..Default::default()
        });
        assert!(db.find_by_hash("D41D8CD98F00B204E9800998ECF8427E").is_some());
        assert!(db.find_by_hash("00000000000000000000000000000000").is_none());
    }

    #[test]
    fn test_open_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("osu!.db");

        let mut db = Database::new(20250107);
        db.player_name = "peppy".into();
        db.folder_count = 3;
        db.beatmaps.push(Beatmap {
            title: "Blue Zenith".into(),
            ..Default::default()
        });
        db.save(&path).unwrap();

        let loaded = Database::open(&path).unwrap();
        assert_eq!(loaded, db);
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Database::open(dir.path().join("missing.db")).unwrap_err();
        assert!(matches!(err, crate::error::Error::Io(_)));
    }
}
