//! Filesystem helpers around the database file: backups and hash checks.

pub mod backup;
pub mod verify;

pub use backup::{backup_exists, backup_path, create_backup, restore_backup};
pub use verify::{HashIssue, VerifyReport, calculate_file_hash, verify_hashes};
