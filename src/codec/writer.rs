//! Append-only byte sink mirroring [`ByteReader`](super::reader::ByteReader).

use super::ticks::datetime_to_ticks;
use super::{STRING_EMPTY, STRING_PRESENT};
use crate::error::{FormatError, FormatErrorKind};
use chrono::{DateTime, Utc};

pub type EncodeResult<T> = Result<T, FormatError>;

#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
    /// Absolute offset of `buf[0]` in the final file, for error reporting.
    base: u64,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh writer whose offsets continue from this one's position plus `skip`.
    pub fn nested(&self, skip: u64) -> Self {
        Self {
            buf: Vec::new(),
            base: self.position() + skip,
        }
    }

    pub fn position(&self) -> u64 {
        self.base + self.buf.len() as u64
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    pub fn error(&self, kind: FormatErrorKind) -> FormatError {
        FormatError::new(self.position(), kind)
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_f32(&mut self, value: f32) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.write_bytes(&value.to_le_bytes());
    }

    /// Always `0x01` or `0x00`.
    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(u8::from(value));
    }

    /// Minimal unsigned LEB128.
    pub fn write_uleb128(&mut self, mut value: u64) {
        loop {
            let chunk = (value & 0x7f) as u8;
            value >>= 7;
            if value == 0 {
                self.write_u8(chunk);
                return;
            }
            self.write_u8(chunk | 0x80);
        }
    }

    pub fn write_string(&mut self, value: &str) {
        if value.is_empty() {
            self.write_u8(STRING_EMPTY);
            return;
        }
        self.write_u8(STRING_PRESENT);
        self.write_uleb128(value.len() as u64);
        self.write_bytes(value.as_bytes());
    }

    pub fn write_datetime(&mut self, value: &DateTime<Utc>) -> EncodeResult<()> {
        let ticks = datetime_to_ticks(value).ok_or_else(|| {
            self.error(FormatErrorKind::TimestampOutOfRange {
                ticks: if value.timestamp() < 0 { i64::MIN } else { i64::MAX },
            })
        })?;
        self.write_i64(ticks);
        Ok(())
    }

    /// 4-byte element count for a collection.
    pub fn write_count(&mut self, field: &'static str, len: usize) -> EncodeResult<()> {
        let count = u32::try_from(len)
            .map_err(|_| self.error(FormatErrorKind::TooManyElements { field, len }))?;
        self.write_u32(count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::reader::ByteReader;
    use super::*;

    fn uleb(value: u64) -> Vec<u8> {
        let mut w = ByteWriter::new();
        w.write_uleb128(value);
        w.into_inner()
    }

    #[test]
    fn test_uleb128_minimal_lengths() {
        assert_eq!(uleb(0), vec![0x00]);
        assert_eq!(uleb(127), vec![0x7f]);
        assert_eq!(uleb(128), vec![0x80, 0x01]);
        assert_eq!(uleb(624_485), vec![0xe5, 0x8e, 0x26]);
        assert_eq!(uleb(u32::MAX as u64).len(), 5);
        assert_eq!(uleb(u64::MAX).len(), 10);
    }

    #[test]
    fn test_uleb128_boundaries_decode_back() {
        for shift in 0..64 {
            for value in [(1u64 << shift) - 1, 1u64 << shift] {
                let bytes = uleb(value);
                let minimal = (64 - value.leading_zeros()).max(1).div_ceil(7) as usize;
                assert_eq!(bytes.len(), minimal, "value {value}");
                let mut r = ByteReader::new(&bytes);
                assert_eq!(r.read_uleb128().unwrap(), value);
                assert_eq!(r.remaining(), 0);
            }
        }
        let bytes = uleb(u64::MAX);
        assert_eq!(ByteReader::new(&bytes).read_uleb128().unwrap(), u64::MAX);
    }

    #[test]
    fn test_empty_string_is_single_zero_byte() {
        let mut w = ByteWriter::new();
        w.write_string("");
        assert_eq!(w.into_inner(), vec![0x00]);
    }

    #[test]
    fn test_string_layout() {
        let mut w = ByteWriter::new();
        w.write_string("ÄB");
        assert_eq!(w.into_inner(), vec![0x0b, 0x03, 0xc3, 0x84, b'B']);
    }

    #[test]
    fn test_long_string_uses_multi_byte_length() {
        let text = "あ".repeat(100);
        let mut w = ByteWriter::new();
        w.write_string(&text);
        let bytes = w.into_inner();
        assert_eq!(&bytes[..3], &[0x0b, 0xac, 0x02]);
        assert_eq!(ByteReader::new(&bytes).read_string().unwrap(), text);
    }

    #[test]
    fn test_bool_canonical_bytes() {
        let mut w = ByteWriter::new();
        w.write_bool(true);
        w.write_bool(false);
        assert_eq!(w.into_inner(), vec![0x01, 0x00]);
    }

    #[test]
    fn test_nested_writer_offsets() {
        let mut w = ByteWriter::new();
        w.write_u32(7);
        let mut inner = w.nested(4);
        assert_eq!(inner.position(), 8);
        inner.write_u8(1);
        assert_eq!(inner.error(FormatErrorKind::VarintOverflow).offset, 9);
    }

    #[test]
    fn test_datetime_round_trip() {
        let dt = DateTime::from_timestamp(1_700_000_000, 123_456_700).unwrap();
        let mut w = ByteWriter::new();
        w.write_datetime(&dt).unwrap();
        let bytes = w.into_inner();
        assert_eq!(bytes.len(), 8);
        assert_eq!(ByteReader::new(&bytes).read_datetime().unwrap(), dt);
    }

    #[test]
    fn test_datetime_before_tick_range_fails() {
        // Roughly year -30000, below i64::MIN ticks.
        let dt = DateTime::from_timestamp(-1_000_000_000_000, 0).unwrap();
        let mut w = ByteWriter::new();
        let err = w.write_datetime(&dt).unwrap_err();
        assert!(matches!(err.kind, FormatErrorKind::TimestampOutOfRange { .. }));
        assert!(w.is_empty());
    }
}
