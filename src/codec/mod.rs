//! Binary codec for `osu!.db`.
//!
//! All integers are little-endian. The file is decoded from a single
//! in-memory image in one forward pass, and encoded into an in-memory
//! buffer that is only handed to the sink once the whole database has been
//! serialised. Record layout depends on the format version stored in the
//! header, see [`layout::Layout`].

pub mod beatmap;
pub mod composite;
pub mod database;
pub mod layout;
pub mod reader;
pub mod ticks;
pub mod writer;

#[cfg(test)]
pub(crate) mod fixtures;

pub use layout::{
    FLOAT_DIFFICULTY_SINCE, FLOAT_STAR_RATINGS_SINCE, Layout, NO_LENGTH_PREFIX_SINCE, PairShape,
};
pub use reader::ByteReader;
pub use writer::ByteWriter;

use crate::error::{EncodingFallback, Result};
use crate::models::{Beatmap, Database};
use std::io::{Read, Write};

/// String flag for an empty string.
pub const STRING_EMPTY: u8 = 0x00;
/// String flag for a length-prefixed UTF-8 payload.
pub const STRING_PRESENT: u8 = 0x0b;

/// A decoded database plus the non-fatal diagnostics raised while decoding it.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub database: Database,
    pub fallbacks: Vec<EncodingFallback>,
}

/// Read the whole source and decode it.
pub fn decode<R: Read>(mut source: R) -> Result<Decoded> {
    let mut bytes = Vec::new();
    source.read_to_end(&mut bytes)?;
    decode_bytes(&bytes)
}

pub fn decode_bytes(bytes: &[u8]) -> Result<Decoded> {
    let mut reader = ByteReader::new(bytes);
    let database = database::decode_database(&mut reader)?;
    let fallbacks = reader.into_fallbacks();
    log::info!(
        "CODEC: decoded {} beatmaps (version {}, {} bytes)",
        database.beatmaps.len(),
        database.version,
        bytes.len()
    );
    Ok(Decoded {
        database,
        fallbacks,
    })
}

/// Encode `db` and write it to `sink`. Nothing is written if encoding fails.
pub fn encode<W: Write>(db: &Database, mut sink: W) -> Result<()> {
    let bytes = encode_to_vec(db)?;
    sink.write_all(&bytes)?;
    sink.flush()?;
    Ok(())
}

pub fn encode_to_vec(db: &Database) -> Result<Vec<u8>> {
    let mut writer = ByteWriter::new();
    database::encode_database(&mut writer, db)?;
    log::info!(
        "CODEC: encoded {} beatmaps (version {}, {} bytes)",
        db.beatmaps.len(),
        db.version,
        writer.len()
    );
    Ok(writer.into_inner())
}

/// Decode a single record laid out for `version`.
pub fn decode_beatmap(bytes: &[u8], version: u32) -> Result<Beatmap> {
    let mut reader = ByteReader::new(bytes);
    Ok(beatmap::decode_beatmap(&mut reader, version)?)
}

/// Encode a single record laid out for `version`, including its length
/// prefix when the version has one.
pub fn encode_beatmap(beatmap: &Beatmap, version: u32) -> Result<Vec<u8>> {
    let mut writer = ByteWriter::new();
    beatmap::encode_beatmap(&mut writer, beatmap, version)?;
    Ok(writer.into_inner())
}
