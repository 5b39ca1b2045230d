//! Compressed backups of the database file.
//!
//! A backup is the raw `osu!.db` bytes compressed with Zstd and stored next
//! to the original as `<name>.bak.zst`.

use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use zstd::stream::{decode_all, encode_all};

const BACKUP_SUFFIX: &str = ".bak.zst";

/// Get the backup path for a database file.
pub fn backup_path(db_path: &Path) -> PathBuf {
    let mut name = db_path.as_os_str().to_owned();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Compress the current database file into its backup slot.
/// Returns the backup path.
pub fn create_backup(db_path: &Path, level: i32) -> Result<PathBuf> {
    let raw = fs::read(db_path)?;
    let compressed = encode_all(&raw[..], level)
        .map_err(|e| Error::Backup(format!("compression failed: {}", e)))?;

    let path = backup_path(db_path);
    let mut file = File::create(&path)?;
    file.write_all(&compressed)?;

    log::info!(
        "BACKUP: {} -> {} ({} -> {} bytes)",
        db_path.display(),
        path.display(),
        raw.len(),
        compressed.len()
    );
    Ok(path)
}

/// Decompress the backup over the database file.
pub fn restore_backup(db_path: &Path) -> Result<()> {
    let path = backup_path(db_path);
    if !path.exists() {
        return Err(Error::Backup(format!("no backup at {}", path.display())));
    }
    let file = File::open(&path)?;
    let raw = decode_all(file).map_err(|e| Error::Backup(format!("decompression failed: {}", e)))?;
    fs::write(db_path, &raw)?;

    log::info!("BACKUP: restored {} ({} bytes)", db_path.display(), raw.len());
    Ok(())
}

/// Check if a backup exists for this database file.
pub fn backup_exists(db_path: &Path) -> bool {
    backup_path(db_path).exists()
}
