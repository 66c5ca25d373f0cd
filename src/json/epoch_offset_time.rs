//! Codec for offset-qualified epoch dates: `/Date(N±hhmm)/`.
//!
//! Decodes the instant and its UTC offset together into a
//! `DateTime<FixedOffset>`; encoding reproduces the same textual shape with
//! an explicit sign and zero-padded offset components. Use with
//! `#[serde(with = "crate::json::epoch_offset_time")]`.

use chrono::{DateTime, FixedOffset};
use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serializer};

fn parse(formatted: &str) -> Option<DateTime<FixedOffset>> {
    let inner = formatted
        .strip_prefix("/Date(")
        .and_then(|rest| rest.strip_suffix(")/"))?;
    // The offset is always the trailing sign plus four digits; what
    // precedes it is the (possibly signed) millisecond count.
    if inner.len() < 6 || !inner.is_ascii() {
        return None;
    }
    let (millis_part, offset_part) = inner.split_at(inner.len() - 5);
    let sign = match offset_part.as_bytes()[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    if !offset_part[1..].bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = offset_part[1..3].parse().ok()?;
    let minutes: i32 = offset_part[3..5].parse().ok()?;
    let millis: i64 = millis_part.parse().ok()?;

    let offset = FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))?;
    let utc = DateTime::from_timestamp_millis(millis)?;
    Some(utc.with_timezone(&offset))
}

fn format(time: &DateTime<FixedOffset>) -> String {
    let offset_secs = time.offset().local_minus_utc();
    let sign = if offset_secs >= 0 { '+' } else { '-' };
    let abs = offset_secs.abs();
    format!(
        "/Date({}{}{:02}{:02})/",
        time.timestamp_millis(),
        sign,
        abs / 3600,
        (abs % 3600) / 60,
    )
}

pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<DateTime<FixedOffset>, D::Error> {
    let formatted = String::deserialize(deserializer)?;
    parse(&formatted)
        .ok_or_else(|| D::Error::custom(format!("invalid offset epoch date: {formatted}")))
}

pub fn serialize<S: Serializer>(
    time: &DateTime<FixedOffset>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(time))
}
