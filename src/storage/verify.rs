//! Checks cached beatmap hashes against the `.osu` files on disk.

use crate::models::Database;
use md5::Context;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Outcome for one beatmap whose file is missing or changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashIssue {
    Missing { path: PathBuf },
    Mismatch {
        path: PathBuf,
        cached: String,
        actual: String,
    },
}

#[derive(Debug, Default)]
pub struct VerifyReport {
    pub checked: usize,
    pub issues: Vec<HashIssue>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Hash `songs/<folder>/<osu file>` for every beatmap and compare with the cache.
pub fn verify_hashes(db: &Database, songs_path: &Path) -> VerifyReport {
    let mut report = VerifyReport::default();

    for beatmap in &db.beatmaps {
        let path = songs_path
            .join(&beatmap.folder_name)
            .join(&beatmap.osu_filename);
        report.checked += 1;

        match calculate_file_hash(&path) {
            Ok(actual) if actual.eq_ignore_ascii_case(&beatmap.md5_hash) => {}
            Ok(actual) => report.issues.push(HashIssue::Mismatch {
                path,
                cached: beatmap.md5_hash.clone(),
                actual,
            }),
            Err(e) => {
                log::debug!("VERIFY: cannot hash {:?}: {}", path, e);
                report.issues.push(HashIssue::Missing { path });
            }
        }
    }

    log::info!(
        "VERIFY: {} beatmaps checked, {} issues",
        report.checked,
        report.issues.len()
    );
    report
}

/// Computes the MD5 hash for an `.osu` chart file.
pub fn calculate_file_hash(file_path: &Path) -> Result<String, std::io::Error> {
    let mut file = fs::File::open(file_path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;

    let mut context = Context::new();
    context.consume(&buffer);
    Ok(format!("{:x}", context.finalize()))
}
