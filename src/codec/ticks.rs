//! Conversion between 100ns ticks since 0001-01-01 UTC and `DateTime<Utc>`.

use chrono::{DateTime, Utc};

const TICKS_PER_SECOND: i64 = 10_000_000;
const NANOS_PER_TICK: i64 = 100;
/// Seconds from 0001-01-01T00:00:00Z to the Unix epoch.
const UNIX_EPOCH_SECONDS: i64 = 62_135_596_800;

pub fn ticks_to_datetime(ticks: i64) -> Option<DateTime<Utc>> {
    let secs = ticks.div_euclid(TICKS_PER_SECOND) - UNIX_EPOCH_SECONDS;
    let nanos = ticks.rem_euclid(TICKS_PER_SECOND) * NANOS_PER_TICK;
    DateTime::from_timestamp(secs, nanos as u32)
}

/// Sub-tick nanoseconds are dropped. A leap second stays in the second it
/// belongs to, at its last tick.
pub fn datetime_to_ticks(datetime: &DateTime<Utc>) -> Option<i64> {
    let secs = i128::from(datetime.timestamp()) + i128::from(UNIX_EPOCH_SECONDS);
    let nanos = datetime.timestamp_subsec_nanos().min(999_999_999);
    let sub_ticks = i128::from(nanos) / i128::from(NANOS_PER_TICK);
    i64::try_from(secs * i128::from(TICKS_PER_SECOND) + sub_ticks).ok()
}
