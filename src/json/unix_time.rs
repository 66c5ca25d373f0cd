//! Unix-timestamp codecs with a genesis-block validity floor.
//!
//! Block and transaction timestamps arrive as Unix seconds; date-based
//! block queries use millis. Either may be encoded as a JSON number or a
//! numeric string. Any instant earlier than the genesis block is a decode
//! error, never a silent clamp.

use chrono::{DateTime, Utc};
use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serializer};
use thiserror::Error;

/// Unix seconds of the genesis block (2009-01-03T18:15:05Z).
pub const GENESIS_BLOCK_UNIX_SECS: i64 = 1_231_006_505;

/// Unix millis of the genesis block.
pub const GENESIS_BLOCK_UNIX_MILLIS: i64 = 1_231_006_505_000;

/// The fixed creation instant of the network's first block.
pub fn genesis_block_time() -> DateTime<Utc> {
    DateTime::from_timestamp(GENESIS_BLOCK_UNIX_SECS, 0).expect("genesis timestamp is in range")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no date can be before the genesis block (2009-01-03T18:15:05Z)")]
pub struct BeforeGenesisError;

/// Converts Unix millis to an instant, enforcing the genesis floor.
pub fn datetime_from_unix_millis(millis: i64) -> Result<DateTime<Utc>, BeforeGenesisError> {
    if millis < GENESIS_BLOCK_UNIX_MILLIS {
        return Err(BeforeGenesisError);
    }
    DateTime::from_timestamp_millis(millis).ok_or(BeforeGenesisError)
}

/// Wire form: the service emits numbers or numeric strings interchangeably.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

fn raw_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.parse::<f64>().map_err(D::Error::custom),
    }
}

/// Codec for Unix-seconds fields: `#[serde(with = "unix_time::seconds")]`.
pub mod seconds {
    use super::*;

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let secs = raw_number(deserializer)?;
        datetime_from_unix_millis((secs * 1000.0) as i64).map_err(D::Error::custom)
    }

    pub fn serialize<S: Serializer>(
        time: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(time.timestamp())
    }
}

/// Codec for optional Unix-seconds fields, for timestamps the service may
/// omit. Pair with `#[serde(default)]` so absence decodes as `None`.
pub mod seconds_option {
    use super::*;

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            None => Ok(None),
            Some(NumberOrString::Number(secs)) => datetime_from_unix_millis((secs * 1000.0) as i64)
                .map(Some)
                .map_err(D::Error::custom),
            Some(NumberOrString::String(s)) => {
                let secs = s.parse::<f64>().map_err(D::Error::custom)?;
                datetime_from_unix_millis((secs * 1000.0) as i64)
                    .map(Some)
                    .map_err(D::Error::custom)
            }
        }
    }

    pub fn serialize<S: Serializer>(
        time: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(time) => serializer.serialize_i64(time.timestamp()),
            None => serializer.serialize_none(),
        }
    }
}

/// Codec variant that multiplies by 1000 first: the field carries millis.
pub mod millis {
    use super::*;

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let millis = raw_number(deserializer)?;
        datetime_from_unix_millis(millis as i64).map_err(D::Error::custom)
    }

    pub fn serialize<S: Serializer>(
        time: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(time.timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Seconds {
        #[serde(with = "seconds")]
        time: DateTime<Utc>,
    }

    #[derive(Debug, Deserialize)]
    struct Millis {
        #[serde(with = "millis")]
        time: DateTime<Utc>,
    }

    #[test]
    fn genesis_seconds_decode_exactly() {
        let decoded: Seconds = serde_json::from_str(r#"{"time":1231006505}"#).unwrap();
        assert_eq!(decoded.time, genesis_block_time());
    }

    #[test]
    fn one_second_before_genesis_is_rejected() {
        let result = serde_json::from_str::<Seconds>(r#"{"time":1231006504}"#);
        assert!(result.is_err());
    }

    #[test]
    fn numeric_string_is_accepted() {
        let decoded: Seconds = serde_json::from_str(r#"{"time":"1231006505"}"#).unwrap();
        assert_eq!(decoded.time, genesis_block_time());
    }

    #[test]
    fn millis_variant_does_not_rescale() {
        let decoded: Millis = serde_json::from_str(r#"{"time":1231006505000}"#).unwrap();
        assert_eq!(decoded.time, genesis_block_time());
        assert!(serde_json::from_str::<Millis>(r#"{"time":1231006505}"#).is_err());
    }

    #[test]
    fn datetime_from_unix_millis_enforces_floor() {
        assert_eq!(
            datetime_from_unix_millis(GENESIS_BLOCK_UNIX_MILLIS - 1),
            Err(BeforeGenesisError)
        );
        assert!(datetime_from_unix_millis(GENESIS_BLOCK_UNIX_MILLIS).is_ok());
    }
}
