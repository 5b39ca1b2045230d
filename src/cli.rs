//! Subcommands of the `osudb` binary.

use clap::{Parser, Subcommand};
use osudb::storage::{self, HashIssue};
use osudb::{Config, Database, Decoded, Error, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "osudb", version, about = "Inspect and edit the osu!stable beatmap database")]
pub struct Cli {
    /// Configuration file (defaults to ./osudb.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file, overriding the configured path
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the header and beatmap count
    Info,
    /// List beatmaps
    List {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Look up a beatmap by the MD5 of its .osu file
    Find { hash: String },
    /// Change the owner name and rewrite the file
    Rename {
        name: String,
        /// Skip the backup normally written first
        #[arg(long)]
        no_backup: bool,
        /// Rewrite even if some strings were decoded as Latin-1
        #[arg(long)]
        force: bool,
    },
    /// Dump the database as JSON
    Export {
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Re-encode in memory and compare against the file
    Check,
    /// Compare cached MD5 hashes against the .osu files
    Verify {
        #[arg(long)]
        songs: Option<PathBuf>,
    },
    /// Write a compressed backup next to the database
    Backup,
    /// Restore the database from its backup
    Restore,
}

pub fn run(cli: Cli, config: &Config) -> Result<()> {
    let db_path = cli.db.unwrap_or_else(|| config.database_path.clone());

    match cli.command {
        Command::Info => info(&db_path),
        Command::List { limit } => list(&db_path, limit),
        Command::Find { hash } => find(&db_path, &hash),
        Command::Rename {
            name,
            no_backup,
            force,
        } => rename(
            &db_path,
            &name,
            config.backup_on_write && !no_backup,
            force,
            config,
        ),
        Command::Export { output } => export(&db_path, output.as_deref()),
        Command::Check => check(&db_path),
        Command::Verify { songs } => {
            let songs = songs.unwrap_or_else(|| config.songs_path.clone());
            verify(&db_path, &songs)
        }
        Command::Backup => {
            let path = storage::create_backup(&db_path, config.backup_level)?;
            println!("Backup written to {}", path.display());
            Ok(())
        }
        Command::Restore => {
            storage::restore_backup(&db_path)?;
            println!("Restored {}", db_path.display());
            Ok(())
        }
    }
}

fn load(path: &Path) -> Result<Decoded> {
    log::info!("CLI: reading {}", path.display());
    let file = File::open(path)?;
    osudb::decode(BufReader::new(file))
}

fn info(path: &Path) -> Result<()> {
    let Decoded {
        database: db,
        fallbacks,
    } = load(path)?;

    println!("Version:          {}", db.version);
    println!("Folders:          {}", db.folder_count);
    println!("Account unlocked: {}", db.account_unlocked);
    println!("Unlock date:      {}", db.unlock_date);
    println!("Player:           {}", db.player_name);
    println!("Beatmaps:         {}", db.beatmap_count());
    let names = db.user_permissions.names();
    let names = if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    };
    println!("Permissions:      {:#x} ({})", db.user_permissions.bits(), names);
    for fallback in &fallbacks {
        println!("Warning: {fallback}");
    }
    Ok(())
}

fn list(path: &Path, limit: Option<usize>) -> Result<()> {
    let db = load(path)?.database;
    let limit = limit.unwrap_or(usize::MAX);
    for beatmap in db.beatmaps.iter().take(limit) {
        let stars = beatmap
            .nomod_stars()
            .map(|s| format!("{s:.2}*"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<6} {:<11} {:>7}  {}",
            beatmap.mode.label(),
            beatmap.ranked_status.label(),
            stars,
            beatmap.display_name()
        );
    }
    Ok(())
}

fn find(path: &Path, hash: &str) -> Result<()> {
    let db = load(path)?.database;
    match db.find_by_hash(hash) {
        Some(beatmap) => {
            println!("{}", beatmap.display_name());
            println!("  {}/{}", beatmap.folder_name, beatmap.osu_filename);
            println!(
                "  {} {} (id {}, set {})",
                beatmap.mode.label(),
                beatmap.ranked_status.label(),
                beatmap.difficulty_id,
                beatmap.beatmap_id
            );
        }
        None => println!("No beatmap with hash {hash}"),
    }
    Ok(())
}

/// Strings decoded as Latin-1 are written back as UTF-8, so the rewrite is
/// refused unless `force` is set.
fn rename(path: &Path, name: &str, backup: bool, force: bool, config: &Config) -> Result<()> {
    let Decoded {
        database: mut db,
        fallbacks,
    } = load(path)?;
    if !fallbacks.is_empty() {
        for fallback in &fallbacks {
            println!("Warning: {fallback}");
        }
        if !force {
            println!("Nothing written; pass --force to rewrite these strings as UTF-8");
            return Err(Error::LossyRewrite(fallbacks.len()));
        }
    }
    let previous = std::mem::replace(&mut db.player_name, name.to_string());

    if backup {
        storage::create_backup(path, config.backup_level)?;
    }
    db.save(path)?;

    log::info!("CLI: owner renamed from {:?} to {:?}", previous, name);
    println!("Renamed {previous:?} -> {name:?}");
    Ok(())
}

fn export(path: &Path, output: Option<&Path>) -> Result<()> {
    let db = load(path)?.database;
    match output {
        Some(out_path) => {
            let mut out = BufWriter::new(File::create(out_path)?);
            write_json(&db, &mut out)?;
            out.flush()?;
            println!("Exported {} beatmaps to {}", db.beatmap_count(), out_path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            write_json(&db, &mut out)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_json<W: Write>(db: &Database, out: W) -> Result<()> {
    serde_json::to_writer_pretty(out, db).map_err(std::io::Error::from)?;
    Ok(())
}

fn check(path: &Path) -> Result<()> {
    let original = fs::read(path)?;
    let decoded = osudb::decode_bytes(&original)?;
    let reencoded = osudb::encode_to_vec(&decoded.database)?;

    match first_difference(&original, &reencoded) {
        None => println!("OK: {} bytes re-encode identically", original.len()),
        Some(offset) => println!(
            "DIFFERENT: first mismatch at offset {:#x} (original {} bytes, re-encoded {} bytes)",
            offset,
            original.len(),
            reencoded.len()
        ),
    }
    if !decoded.fallbacks.is_empty() {
        println!("{} strings used the Latin-1 fallback", decoded.fallbacks.len());
    }
    Ok(())
}

fn verify(path: &Path, songs: &Path) -> Result<()> {
    let db = load(path)?.database;
    let report = storage::verify_hashes(&db, songs);

    for issue in &report.issues {
        match issue {
            HashIssue::Missing { path } => println!("missing   {}", path.display()),
            HashIssue::Mismatch {
                path,
                cached,
                actual,
            } => println!("mismatch  {} (cached {cached}, actual {actual})", path.display()),
        }
    }
    println!("{} checked, {} issues", report.checked, report.issues.len());
    Ok(())
}

/// Offset of the first differing byte, or the shorter length if one is a prefix.
fn first_difference(a: &[u8], b: &[u8]) -> Option<usize> {
    a.iter()
        .zip(b)
        .position(|(x, y)| x != y)
        .or_else(|| (a.len() != b.len()).then(|| a.len().min(b.len())))
}
