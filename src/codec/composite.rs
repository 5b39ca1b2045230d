//! Tagged pairs and timing points.
//!
//! ```text
//! int/float pair:   0x08 | u32 | 0x0c | f32    (10 bytes)
//! int/double pair:  0x08 | u32 | 0x0d | f64    (14 bytes)
//! timing point:     f64 bpm | f64 offset | u8 (0 = inherited)
//! ```

use super::reader::{ByteReader, DecodeResult};
use super::writer::ByteWriter;
use crate::models::TimingPoint;

pub const TAG_INT: u8 = 0x08;
pub const TAG_FLOAT: u8 = 0x0c;
pub const TAG_DOUBLE: u8 = 0x0d;

pub fn read_int_float_pair(r: &mut ByteReader<'_>) -> DecodeResult<(u32, f32)> {
    r.expect_tag(TAG_INT)?;
    let int = r.read_u32()?;
    r.expect_tag(TAG_FLOAT)?;
    let float = r.read_f32()?;
    Ok((int, float))
}

pub fn write_int_float_pair(w: &mut ByteWriter, int: u32, float: f32) {
    w.write_u8(TAG_INT);
    w.write_u32(int);
    w.write_u8(TAG_FLOAT);
    w.write_f32(float);
}

pub fn read_int_double_pair(r: &mut ByteReader<'_>) -> DecodeResult<(u32, f64)> {
    r.expect_tag(TAG_INT)?;
    let int = r.read_u32()?;
    r.expect_tag(TAG_DOUBLE)?;
    let double = r.read_f64()?;
    Ok((int, double))
}

pub fn write_int_double_pair(w: &mut ByteWriter, int: u32, double: f64) {
    w.write_u8(TAG_INT);
    w.write_u32(int);
    w.write_u8(TAG_DOUBLE);
    w.write_f64(double);
}

/// The stored flag is inverted: `0` means inherited.
pub fn read_timing_point(r: &mut ByteReader<'_>) -> DecodeResult<TimingPoint> {
    let bpm = r.read_f64()?;
    let offset = r.read_f64()?;
    let is_inherited = !r.read_bool()?;
    Ok(TimingPoint {
        bpm,
        offset,
        is_inherited,
    })
}

pub fn write_timing_point(w: &mut ByteWriter, point: &TimingPoint) {
    w.write_f64(point.bpm);
    w.write_f64(point.offset);
    w.write_bool(!point.is_inherited);
}
