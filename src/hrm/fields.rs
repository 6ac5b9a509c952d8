//! Field codecs for HRM values.
//!
//! HRM files pack numbers without decimal points (the last digit is tenths)
//! and times as `HH:MM:SS.s` strings.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::hrm::types::DecodeError;

/// Hour correction subtracted from the start time. Always zero.
pub const START_HOUR_OFFSET: i64 = 0;

/// Decode an implied-decimal token: `"1234"` is 123.4, `"5"` is 0.5.
///
/// Tokens that already contain a `.` are taken as written.
pub fn implied_decimal(token: &str) -> Option<f64> {
    let token = token.trim();
    if token.contains('.') {
        return token.parse().ok();
    }
    let tenths: i64 = token.parse().ok()?;
    Some(tenths as f64 / 10.0)
}

/// Parse a `HH:MM:SS.s` clock value into whole seconds, rounding any
/// fraction of a second up. One-digit hours are accepted; totals that do
/// not fit in a `u32` are rejected.
pub fn clock_seconds(value: &str) -> Option<u32> {
    let mut parts = value.trim().split(':');
    let hours: u32 = parts.next()?.trim().parse().ok()?;
    let minutes: u32 = parts.next()?.trim().parse().ok()?;
    let seconds: f64 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() || minutes >= 60 || !(0.0..60.0).contains(&seconds) {
        return None;
    }

    hours
        .checked_mul(3600)?
        .checked_add(minutes * 60)?
        .checked_add(seconds.ceil() as u32)
}

/// Parse a `YYYYMMDD` date.
pub fn packed_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y%m%d").ok()
}

/// Combine `Date` and `StartTime` into a UTC instant.
///
/// A start time like `23:59:59.5` rounds up into the next day.
pub fn start_instant(date: NaiveDate, start_seconds: u32) -> DateTime<Utc> {
    let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::default()));
    midnight + Duration::seconds(i64::from(start_seconds)) - Duration::hours(START_HOUR_OFFSET)
}

/// Parse a required integer field.
pub fn integer<T: std::str::FromStr>(field: &str, value: &str) -> Result<T, DecodeError> {
    value
        .trim()
        .parse()
        .map_err(|_| DecodeError::invalid(field, value))
}

/// Parse a required clock field.
pub fn clock(field: &str, value: &str) -> Result<u32, DecodeError> {
    clock_seconds(value).ok_or_else(|| DecodeError::invalid(field, value))
}
