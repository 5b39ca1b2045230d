//! Cursor over an in-memory `osu!.db` image.
//!
//! Every read either consumes exactly the bytes its type needs or fails with
//! a [`FormatError`] at the offset where the field started.

use super::ticks::ticks_to_datetime;
use super::{STRING_EMPTY, STRING_PRESENT};
use crate::error::{EncodingFallback, FormatError, FormatErrorKind};
use chrono::{DateTime, Utc};

pub type DecodeResult<T> = Result<T, FormatError>;

pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
    fallbacks: Vec<EncodingFallback>,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            fallbacks: Vec::new(),
        }
    }

    pub fn position(&self) -> u64 {
        self.pos as u64
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Strings that needed the Latin-1 fallback.
    pub fn into_fallbacks(self) -> Vec<EncodingFallback> {
        self.fallbacks
    }

    pub fn error_at(&self, offset: usize, kind: FormatErrorKind) -> FormatError {
        FormatError::new(offset as u64, kind)
    }

    fn take(&mut self, len: usize) -> DecodeResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(self.error_at(
                self.pos,
                FormatErrorKind::UnexpectedEof {
                    needed: len,
                    available: self.remaining(),
                },
            ));
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        Ok(self.array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> DecodeResult<u16> {
        self.array().map(u16::from_le_bytes)
    }

    pub fn read_u32(&mut self) -> DecodeResult<u32> {
        self.array().map(u32::from_le_bytes)
    }

    pub fn read_i32(&mut self) -> DecodeResult<i32> {
        self.array().map(i32::from_le_bytes)
    }

    pub fn read_u64(&mut self) -> DecodeResult<u64> {
        self.array().map(u64::from_le_bytes)
    }

    pub fn read_i64(&mut self) -> DecodeResult<i64> {
        self.array().map(i64::from_le_bytes)
    }

    pub fn read_f32(&mut self) -> DecodeResult<f32> {
        self.array().map(f32::from_le_bytes)
    }

    pub fn read_f64(&mut self) -> DecodeResult<f64> {
        self.array().map(f64::from_le_bytes)
    }

    /// Any nonzero byte is `true`.
    pub fn read_bool(&mut self) -> DecodeResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Byte that must match `expected`.
    pub fn expect_tag(&mut self, expected: u8) -> DecodeResult<()> {
        let start = self.pos;
        let found = self.read_u8()?;
        if found != expected {
            return Err(self.error_at(start, FormatErrorKind::UnexpectedTag { expected, found }));
        }
        Ok(())
    }

    /// Byte-sized enumeration; out-of-range values are errors.
    pub fn read_enum<T>(&mut self, field: &'static str) -> DecodeResult<T>
    where
        T: TryFrom<u8, Error = u8>,
    {
        let start = self.pos;
        let byte = self.read_u8()?;
        T::try_from(byte)
            .map_err(|value| self.error_at(start, FormatErrorKind::InvalidEnum { field, value }))
    }

    /// Unsigned LEB128.
    pub fn read_uleb128(&mut self) -> DecodeResult<u64> {
        let start = self.pos;
        let mut result = 0u64;
        let mut shift = 0u32;
        loop {
            let byte = self.read_u8()?;
            let chunk = u64::from(byte & 0x7f);
            if shift >= 64 || (chunk << shift) >> shift != chunk {
                return Err(self.error_at(start, FormatErrorKind::VarintOverflow));
            }
            result |= chunk << shift;
            if byte & 0x80 == 0 {
                return Ok(result);
            }
            shift += 7;
        }
    }

    /// Flag byte, then (for `0x0b`) a ULEB128 byte length and the bytes.
    ///
    /// Invalid UTF-8 is decoded one byte per character and recorded as an
    /// [`EncodingFallback`].
    pub fn read_string(&mut self) -> DecodeResult<String> {
        let start = self.pos;
        match self.read_u8()? {
            STRING_EMPTY => Ok(String::new()),
            STRING_PRESENT => {
                let len = self.read_uleb128()?;
                let len = usize::try_from(len).unwrap_or(usize::MAX);
                let payload_offset = self.pos;
                let bytes = self.take(len)?;
                match std::str::from_utf8(bytes) {
                    Ok(s) => Ok(s.to_owned()),
                    Err(_) => {
                        let fallback = EncodingFallback {
                            offset: payload_offset as u64,
                            byte_len: bytes.len(),
                        };
                        log::warn!("CODEC: {}", fallback);
                        self.fallbacks.push(fallback);
                        Ok(bytes.iter().map(|&b| char::from(b)).collect())
                    }
                }
            }
            flag => Err(self.error_at(start, FormatErrorKind::InvalidStringFlag { flag })),
        }
    }

    /// Signed 64-bit tick count since 0001-01-01 UTC.
    pub fn read_datetime(&mut self) -> DecodeResult<DateTime<Utc>> {
        let start = self.pos;
        let ticks = self.read_i64()?;
        ticks_to_datetime(ticks)
            .ok_or_else(|| self.error_at(start, FormatErrorKind::TimestampOutOfRange { ticks }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GameMode;

    #[test]
    fn test_fixed_width_little_endian() {
        let bytes = [
            0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
            0x0f,
        ];
        let mut r = ByteReader::new(&bytes);
        assert_eq!(r.read_u8().unwrap(), 0x01);
        assert_eq!(r.read_u16().unwrap(), 0x0302);
        assert_eq!(r.read_u32().unwrap(), 0x0706_0504);
        assert_eq!(r.read_u64().unwrap(), 0x0f0e_0d0c_0b0a_0908);
        assert_eq!(r.position(), 15);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_floats() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1.5f32.to_le_bytes());
        bytes.extend_from_slice(&(-0.25f64).to_le_bytes());
        let mut r = ByteReader::new(&bytes);
        assert_eq!(r.read_f32().unwrap(), 1.5);
        assert_eq!(r.read_f64().unwrap(), -0.25);
    }

    #[test]
    fn test_bool_nonzero_is_true() {
        let mut r = ByteReader::new(&[0x00, 0x01, 0x7f]);
        assert!(!r.read_bool().unwrap());
        assert!(r.read_bool().unwrap());
        assert!(r.read_bool().unwrap());
    }

    #[test]
    fn test_eof_reports_offset() {
        let mut r = ByteReader::new(&[0xaa, 0xbb, 0xcc]);
        r.read_u8().unwrap();
        let err = r.read_u32().unwrap_err();
        assert_eq!(err.offset, 1);
        assert_eq!(
            err.kind,
            FormatErrorKind::UnexpectedEof {
                needed: 4,
                available: 2
            }
        );
    }

    #[test]
    fn test_uleb128_multi_byte() {
        let mut r = ByteReader::new(&[0xe5, 0x8e, 0x26]);
        assert_eq!(r.read_uleb128().unwrap(), 624_485);
    }

    #[test]
    fn test_uleb128_overflow() {
        let mut bytes = vec![0xff; 10];
        bytes.push(0x01);
        let err = ByteReader::new(&bytes).read_uleb128().unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::VarintOverflow);
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn test_empty_string() {
        let mut r = ByteReader::new(&[0x00]);
        assert_eq!(r.read_string().unwrap(), "");
        assert_eq!(r.position(), 1);
    }

    #[test]
    fn test_utf8_string() {
        let text = "東方 ☆ Project";
        let mut bytes = vec![0x0b, text.len() as u8];
        bytes.extend_from_slice(text.as_bytes());
        let mut r = ByteReader::new(&bytes);
        assert_eq!(r.read_string().unwrap(), text);
        assert!(r.into_fallbacks().is_empty());
    }

    #[test]
    fn test_invalid_string_flag() {
        let mut r = ByteReader::new(&[0x00, 0x05, 0x01, 0x41]);
        r.read_u8().unwrap();
        let err = r.read_string().unwrap_err();
        assert_eq!(err.offset, 1);
        assert_eq!(err.kind, FormatErrorKind::InvalidStringFlag { flag: 0x05 });
    }

    #[test]
    fn test_invalid_utf8_falls_back_to_latin1() {
        let bytes = [0x0b, 0x03, b'a', 0xe9, 0xff];
        let mut r = ByteReader::new(&bytes);
        let s = r.read_string().unwrap();
        assert_eq!(s, "a\u{e9}\u{ff}");
        assert_eq!(
            r.into_fallbacks(),
            vec![EncodingFallback {
                offset: 2,
                byte_len: 3
            }]
        );
    }

    #[test]
    fn test_truncated_string_payload() {
        let err = ByteReader::new(&[0x0b, 0x05, b'a', b'b'])
            .read_string()
            .unwrap_err();
        assert_eq!(err.offset, 2);
        assert!(matches!(err.kind, FormatErrorKind::UnexpectedEof { .. }));
    }

    #[test]
    fn test_enum_out_of_range() {
        let mut r = ByteReader::new(&[0x02, 0x09]);
        assert_eq!(r.read_enum::<GameMode>("mode").unwrap(), GameMode::Catch);
        let err = r.read_enum::<GameMode>("mode").unwrap_err();
        assert_eq!(err.offset, 1);
        assert_eq!(
            err.kind,
            FormatErrorKind::InvalidEnum {
                field: "mode",
                value: 9
            }
        );
    }

    #[test]
    fn test_expect_tag_mismatch() {
        let err = ByteReader::new(&[0x09]).expect_tag(0x08).unwrap_err();
        assert_eq!(
            err.kind,
            FormatErrorKind::UnexpectedTag {
                expected: 0x08,
                found: 0x09
            }
        );
    }
}
