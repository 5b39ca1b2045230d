//! One beatmap record, version-gated.
//!
//! ```text
//! [u32 record length]              version < 20191106
//! 9 x string                       artist .. osu filename
//! u8 ranked status, 3 x u16 counts, datetime last modified
//! 4 x (u8 | f32) AR CS HP OD       u8 before 20140609
//! f64 slider velocity
//! 4 x star-rating list             version >= 20140609
//! u32 drain, u32 total, i32 preview, timing points
//! 3 x u32 ids, 4 x u8 grades, u16 local offset, f32 stack leniency, u8 mode
//! string source, string tags, u16 online offset, string font title
//! bool unplayed, datetime last played, bool osz2, string folder, datetime last checked
//! 5 x bool overrides
//! [u16 padding]                    version < 20140609
//! u32 reserved, u8 mania scroll speed
//! ```

use super::composite::{
    read_int_double_pair, read_int_float_pair, read_timing_point, write_int_double_pair,
    write_int_float_pair, write_timing_point,
};
use super::layout::{Layout, PairShape};
use super::reader::{ByteReader, DecodeResult};
use super::writer::{ByteWriter, EncodeResult};
use crate::error::FormatErrorKind;
use crate::models::{Beatmap, Mods, StarRating, TimingPoint};

const TIMING_POINT_SIZE: usize = 17;

pub fn decode_beatmap(r: &mut ByteReader<'_>, version: u32) -> DecodeResult<Beatmap> {
    let layout = Layout::for_version(version);
    if layout.length_prefix {
        // Redundant with the self-delimiting fields that follow.
        r.read_u32()?;
    }

    // Struct fields are evaluated in the order written, which is the on-disk order.
    Ok(Beatmap {
        artist: r.read_string()?,
        artist_unicode: r.read_string()?,
        title: r.read_string()?,
        title_unicode: r.read_string()?,
        creator: r.read_string()?,
        difficulty: r.read_string()?,
        audio_filename: r.read_string()?,
        md5_hash: r.read_string()?,
        osu_filename: r.read_string()?,
        ranked_status: r.read_enum("ranked status")?,
        hit_circles: r.read_u16()?,
        sliders: r.read_u16()?,
        spinners: r.read_u16()?,
        last_modified: r.read_datetime()?,
        approach_rate: read_difficulty(r, layout)?,
        circle_size: read_difficulty(r, layout)?,
        hp_drain: read_difficulty(r, layout)?,
        overall_difficulty: read_difficulty(r, layout)?,
        slider_velocity: r.read_f64()?,
        star_ratings_osu: read_star_ratings(r, layout.star_ratings)?,
        star_ratings_taiko: read_star_ratings(r, layout.star_ratings)?,
        star_ratings_catch: read_star_ratings(r, layout.star_ratings)?,
        star_ratings_mania: read_star_ratings(r, layout.star_ratings)?,
        drain_time: r.read_u32()?,
        total_time: r.read_u32()?,
        preview_time: r.read_i32()?,
        timing_points: read_timing_points(r)?,
        difficulty_id: r.read_u32()?,
        beatmap_id: r.read_u32()?,
        thread_id: r.read_u32()?,
        grade_osu: r.read_enum("osu grade")?,
        grade_taiko: r.read_enum("taiko grade")?,
        grade_catch: r.read_enum("catch grade")?,
        grade_mania: r.read_enum("mania grade")?,
        local_offset: r.read_u16()?,
        stack_leniency: r.read_f32()?,
        mode: r.read_enum("gameplay mode")?,
        source: r.read_string()?,
        tags: r.read_string()?,
        online_offset: r.read_u16()?,
        font_title: r.read_string()?,
        is_unplayed: r.read_bool()?,
        last_played: r.read_datetime()?,
        is_osz2: r.read_bool()?,
        folder_name: r.read_string()?,
        last_checked: r.read_datetime()?,
        ignore_sound: r.read_bool()?,
        ignore_skin: r.read_bool()?,
        disable_storyboard: r.read_bool()?,
        disable_video: r.read_bool()?,
        visual_override: r.read_bool()?,
        legacy_padding: if layout.legacy_padding { r.read_u16()? } else { 0 },
        reserved: r.read_u32()?,
        mania_scroll_speed: r.read_u8()?,
    })
}

fn read_difficulty(r: &mut ByteReader<'_>, layout: Layout) -> DecodeResult<f32> {
    if layout.float_difficulty {
        r.read_f32()
    } else {
        r.read_u8().map(f32::from)
    }
}

fn read_star_ratings(
    r: &mut ByteReader<'_>,
    shape: Option<PairShape>,
) -> DecodeResult<Vec<StarRating>> {
    let Some(shape) = shape else {
        return Ok(Vec::new());
    };
    let count = r.read_u32()? as usize;
    let mut ratings = Vec::with_capacity(count.min(r.remaining() / 10));
    for _ in 0..count {
        let (mods, stars) = match shape {
            PairShape::IntFloat => read_int_float_pair(r)?,
            PairShape::IntDouble => {
                let (mods, stars) = read_int_double_pair(r)?;
                (mods, stars as f32)
            }
        };
        ratings.push(StarRating::new(Mods(mods), stars));
    }
    Ok(ratings)
}

fn read_timing_points(r: &mut ByteReader<'_>) -> DecodeResult<Vec<TimingPoint>> {
    let count = r.read_u32()? as usize;
    let mut points = Vec::with_capacity(count.min(r.remaining() / TIMING_POINT_SIZE));
    for _ in 0..count {
        points.push(read_timing_point(r)?);
    }
    Ok(points)
}

/// Encode one record. Before 20191106 the body is buffered so its length
/// can be written in front of it.
pub fn encode_beatmap(w: &mut ByteWriter, beatmap: &Beatmap, version: u32) -> EncodeResult<()> {
    let layout = Layout::for_version(version);
    if !layout.length_prefix {
        return write_body(w, beatmap, layout);
    }

    let mut body = w.nested(4);
    write_body(&mut body, beatmap, layout)?;
    let body = body.into_inner();
    let len = u32::try_from(body.len()).map_err(|_| {
        w.error(FormatErrorKind::TooManyElements {
            field: "record body",
            len: body.len(),
        })
    })?;
    w.write_u32(len);
    w.write_bytes(&body);
    Ok(())
}

fn write_body(w: &mut ByteWriter, b: &Beatmap, layout: Layout) -> EncodeResult<()> {
    w.write_string(&b.artist);
    w.write_string(&b.artist_unicode);
    w.write_string(&b.title);
    w.write_string(&b.title_unicode);
    w.write_string(&b.creator);
    w.write_string(&b.difficulty);
    w.write_string(&b.audio_filename);
    w.write_string(&b.md5_hash);
    w.write_string(&b.osu_filename);
    w.write_u8(b.ranked_status as u8);
    w.write_u16(b.hit_circles);
    w.write_u16(b.sliders);
    w.write_u16(b.spinners);
    w.write_datetime(&b.last_modified)?;

    write_difficulty(w, "approach rate", b.approach_rate, layout)?;
    write_difficulty(w, "circle size", b.circle_size, layout)?;
    write_difficulty(w, "hp drain", b.hp_drain, layout)?;
    write_difficulty(w, "overall difficulty", b.overall_difficulty, layout)?;
    w.write_f64(b.slider_velocity);

    if let Some(shape) = layout.star_ratings {
        write_star_ratings(w, "osu star ratings", &b.star_ratings_osu, shape)?;
        write_star_ratings(w, "taiko star ratings", &b.star_ratings_taiko, shape)?;
        write_star_ratings(w, "catch star ratings", &b.star_ratings_catch, shape)?;
        write_star_ratings(w, "mania star ratings", &b.star_ratings_mania, shape)?;
    }

    w.write_u32(b.drain_time);
    w.write_u32(b.total_time);
    w.write_i32(b.preview_time);
    w.write_count("timing points", b.timing_points.len())?;
    for point in &b.timing_points {
        write_timing_point(w, point);
    }

    w.write_u32(b.difficulty_id);
    w.write_u32(b.beatmap_id);
    w.write_u32(b.thread_id);
    w.write_u8(b.grade_osu as u8);
    w.write_u8(b.grade_taiko as u8);
    w.write_u8(b.grade_catch as u8);
    w.write_u8(b.grade_mania as u8);
    w.write_u16(b.local_offset);
    w.write_f32(b.stack_leniency);
    w.write_u8(b.mode as u8);
    w.write_string(&b.source);
    w.write_string(&b.tags);
    w.write_u16(b.online_offset);
    w.write_string(&b.font_title);
    w.write_bool(b.is_unplayed);
    w.write_datetime(&b.last_played)?;
    w.write_bool(b.is_osz2);
    w.write_string(&b.folder_name);
    w.write_datetime(&b.last_checked)?;
    w.write_bool(b.ignore_sound);
    w.write_bool(b.ignore_skin);
    w.write_bool(b.disable_storyboard);
    w.write_bool(b.disable_video);
    w.write_bool(b.visual_override);

    if layout.legacy_padding {
        w.write_u16(b.legacy_padding);
    }
    w.write_u32(b.reserved);
    w.write_u8(b.mania_scroll_speed);
    Ok(())
}

/// Old layouts keep each parameter as a whole byte; the fraction is truncated.
fn write_difficulty(
    w: &mut ByteWriter,
    field: &'static str,
    value: f32,
    layout: Layout,
) -> EncodeResult<()> {
    if layout.float_difficulty {
        w.write_f32(value);
        return Ok(());
    }
    if !(0.0..256.0).contains(&value) {
        return Err(w.error(FormatErrorKind::ValueOutOfRange {
            field,
            value: f64::from(value),
        }));
    }
    w.write_u8(value as u8);
    Ok(())
}

fn write_star_ratings(
    w: &mut ByteWriter,
    field: &'static str,
    ratings: &[StarRating],
    shape: PairShape,
) -> EncodeResult<()> {
    w.write_count(field, ratings.len())?;
    for rating in ratings {
        match shape {
            PairShape::IntFloat => write_int_float_pair(w, rating.mods.bits(), rating.stars),
            PairShape::IntDouble => {
                write_int_double_pair(w, rating.mods.bits(), f64::from(rating.stars))
            }
        }
    }
    Ok(())
}
