//! File header, the record sequence and the trailing permission mask.

use super::beatmap::{decode_beatmap, encode_beatmap};
use super::reader::{ByteReader, DecodeResult};
use super::writer::{ByteWriter, EncodeResult};
use crate::models::{Database, UserPermissions};

/// Smallest encodable record: pre-20140609 layout with every string empty.
const MIN_RECORD_SIZE: usize = 115;

pub fn decode_database(r: &mut ByteReader<'_>) -> DecodeResult<Database> {
    let version = r.read_u32()?;
    let folder_count = r.read_u32()?;
    let account_unlocked = r.read_bool()?;
    let unlock_date = r.read_datetime()?;
    let player_name = r.read_string()?;
    let count = r.read_u32()? as usize;
    log::debug!("CODEC: version {version}, {count} beatmaps declared");

    let mut beatmaps = Vec::with_capacity(count.min(r.remaining() / MIN_RECORD_SIZE));
    for _ in 0..count {
        beatmaps.push(decode_beatmap(r, version)?);
    }
    let user_permissions = UserPermissions(r.read_u32()?);

    if r.remaining() > 0 {
        log::warn!(
            "CODEC: {} trailing bytes after user permissions ignored",
            r.remaining()
        );
    }

    Ok(Database {
        version,
        folder_count,
        account_unlocked,
        unlock_date,
        player_name,
        beatmaps,
        user_permissions,
    })
}

/// The beatmap count is taken from `db.beatmaps.len()`.
pub fn encode_database(w: &mut ByteWriter, db: &Database) -> EncodeResult<()> {
    w.write_u32(db.version);
    w.write_u32(db.folder_count);
    w.write_bool(db.account_unlocked);
    w.write_datetime(&db.unlock_date)?;
    w.write_string(&db.player_name);
    w.write_count("beatmaps", db.beatmaps.len())?;
    for beatmap in &db.beatmaps {
        encode_beatmap(w, beatmap, db.version)?;
    }
    w.write_u32(db.user_permissions.bits());
    Ok(())
}
