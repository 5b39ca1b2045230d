//! Tool configuration loaded from `osudb.toml`.
//!
//! Every key is optional. A missing default file means all defaults; a
//! missing file given explicitly is an error.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "osudb.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path of the `osu!.db` file to operate on.
    pub database_path: PathBuf,
    /// The osu! `Songs` folder, used by `verify`.
    pub songs_path: PathBuf,
    /// Write a compressed backup before overwriting the database.
    pub backup_on_write: bool,
    /// zstd compression level for backups.
    pub backup_level: i32,
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("osu!.db"),
            songs_path: PathBuf::from("Songs"),
            backup_on_write: true,
            backup_level: 19,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load `path`, or `osudb.toml` from the working directory when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => load_toml(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    load_toml(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("cannot parse {}: {}", path.display(), e)))
}
