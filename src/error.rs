//! Error types for decoding and encoding `osu!.db` files.
//!
//! Structural problems with the byte stream are reported as [`FormatError`],
//! always tagged with the byte offset where they were detected. I/O failures
//! from the underlying source or sink pass through unmodified as
//! [`Error::Io`].

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error returned by the public API.
#[derive(Debug, Error)]
pub enum Error {
    /// The bytes do not follow the database layout.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// The byte source or sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
    /// A backup could not be written or restored.
    #[error("backup error: {0}")]
    Backup(String),
    /// Rewriting would change strings that were decoded with the Latin-1
    /// fallback.
    #[error("{0} strings were not valid UTF-8 and would change if rewritten")]
    LossyRewrite(usize),
}

/// A structural violation at a known byte offset.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("format error at offset {offset:#x}: {kind}")]
pub struct FormatError {
    pub offset: u64,
    pub kind: FormatErrorKind,
}

impl FormatError {
    pub fn new(offset: u64, kind: FormatErrorKind) -> Self {
        Self { offset, kind }
    }
}

/// What went wrong at a [`FormatError`] offset.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatErrorKind {
    #[error("invalid string flag {flag:#04x}, expected 0x00 or 0x0b")]
    InvalidStringFlag { flag: u8 },

    #[error("invalid tag {found:#04x}, expected {expected:#04x}")]
    UnexpectedTag { expected: u8, found: u8 },

    #[error("invalid {field} value {value}")]
    InvalidEnum { field: &'static str, value: u8 },

    #[error("unexpected end of input: {needed} bytes needed, {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    #[error("variable-length integer does not fit in 64 bits")]
    VarintOverflow,

    #[error("timestamp out of range ({ticks} ticks)")]
    TimestampOutOfRange { ticks: i64 },

    #[error("{field} value {value} cannot be stored in this format version")]
    ValueOutOfRange { field: &'static str, value: f64 },

    #[error("{field} has {len} elements, more than a 32-bit count can hold")]
    TooManyElements { field: &'static str, len: usize },
}

/// Non-fatal diagnostic: a string was not valid UTF-8 and was decoded as
/// one byte per character instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingFallback {
    /// Offset of the first byte of the string payload.
    pub offset: u64,
    /// Length of the string payload in bytes.
    pub byte_len: usize,
}

impl std::fmt::Display for EncodingFallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "string of {} bytes at offset {:#x} is not valid UTF-8, decoded as Latin-1",
            self.byte_len, self.offset
        )
    }
}
