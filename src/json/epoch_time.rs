//! Codec for the wallet service's ASP.NET-style epoch dates.
//!
//! On read the field is either a bare integer (millis since the epoch) or a
//! string shaped like `Date(±N)`; the `/Date(N)/` wrapper produced on write
//! is accepted as well. Anything else is a decode error. Use with
//! `#[serde(with = "crate::json::epoch_time")]`.

use chrono::{DateTime, Utc};
use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    String(String),
}

/// Extracts the millisecond count from a `Date(N)` or `/Date(N)/` wrapper.
///
/// Leading signs inside the parentheses are ignored; only the magnitude is
/// read, matching the service's own parser.
fn parse_wrapped(formatted: &str) -> Option<i64> {
    let inner = formatted
        .strip_prefix("/Date(")
        .and_then(|rest| rest.strip_suffix(")/"))
        .or_else(|| {
            formatted
                .strip_prefix("Date(")
                .and_then(|rest| rest.strip_suffix(')'))
        })?;
    let digits = inner.trim_start_matches(['+', '-']);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let millis = match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(millis) => millis,
        NumberOrString::String(formatted) => parse_wrapped(&formatted)
            .ok_or_else(|| D::Error::custom(format!("invalid epoch date: {formatted}")))?,
    };
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| D::Error::custom(format!("epoch millis out of range: {millis}")))
}

pub fn serialize<S: Serializer>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("/Date({})/", time.timestamp_millis()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Stamp {
        #[serde(with = "crate::json::epoch_time")]
        at: DateTime<Utc>,
    }

    #[test]
    fn wrapped_string_decodes_to_millis() {
        let decoded: Stamp = serde_json::from_str(r#"{"at":"Date(1610000000000)"}"#).unwrap();
        assert_eq!(decoded.at.timestamp_millis(), 1_610_000_000_000);
    }

    #[test]
    fn bare_number_decodes_as_millis() {
        let decoded: Stamp = serde_json::from_str(r#"{"at":1610000000000}"#).unwrap();
        assert_eq!(decoded.at.timestamp_millis(), 1_610_000_000_000);
    }

    #[test]
    fn round_trip_produces_slashed_wrapper() {
        let decoded: Stamp = serde_json::from_str(r#"{"at":"Date(1610000000000)"}"#).unwrap();
        let encoded = serde_json::to_string(&decoded).unwrap();
        assert_eq!(encoded, r#"{"at":"/Date(1610000000000)/"}"#);
        // and the wrapper itself decodes back to the same instant
        let again: Stamp = serde_json::from_str(&encoded).unwrap();
        assert_eq!(again.at, decoded.at);
    }

    #[test]
    fn unmatched_shape_is_a_decode_error() {
        assert!(serde_json::from_str::<Stamp>(r#"{"at":"last tuesday"}"#).is_err());
        assert!(serde_json::from_str::<Stamp>(r#"{"at":"Date(12x4)"}"#).is_err());
    }

    #[test]
    fn sign_inside_wrapper_is_ignored() {
        let decoded: Stamp = serde_json::from_str(r#"{"at":"Date(-5000)"}"#).unwrap();
        assert_eq!(decoded.at.timestamp_millis(), 5000);
    }
}
