//! Julian Day conversions between universal and local civil time.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

use crate::error::EphemerisError;

/// Julian Day of the Unix epoch (1970-01-01 00:00 UT).
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Universal timestamp to Julian Day.
pub fn jd_from_utc(utc: DateTime<Utc>) -> f64 {
    let secs = utc.timestamp() as f64 + f64::from(utc.timestamp_subsec_nanos()) * 1e-9;
    UNIX_EPOCH_JD + secs / SECONDS_PER_DAY
}

/// Julian Day to a universal timestamp, rounded to the millisecond.
pub fn utc_from_jd(jd: f64) -> Result<DateTime<Utc>, EphemerisError> {
    if !jd.is_finite() {
        return Err(EphemerisError::InvalidTime("Julian Day must be finite"));
    }
    let millis = ((jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY * 1000.0).round() as i64;
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or(EphemerisError::InvalidTime("Julian Day outside timestamp range"))
}

/// Local civil time at a fixed UTC offset to Julian Day.
pub fn local_to_jd(local: NaiveDateTime, offset: FixedOffset) -> Result<f64, EphemerisError> {
    let dt = offset
        .from_local_datetime(&local)
        .single()
        .ok_or(EphemerisError::InvalidTime("local time does not map to a single instant"))?;
    Ok(jd_from_utc(dt.with_timezone(&Utc)))
}
