//! Satoshi-integer wire codec for [`BitcoinValue`].
//!
//! Amounts cross the wire as an integer count of satoshis. A wire value
//! that is not an integer decodes to zero, matching the service's own
//! leniency on malformed amounts.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize, Serializer};

use crate::models::BitcoinValue;

impl Serialize for BitcoinValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.satoshis())
    }
}

impl<'de> Deserialize<'de> for BitcoinValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value
            .as_i64()
            .map(BitcoinValue::from_satoshis)
            .unwrap_or(BitcoinValue::ZERO))
    }
}
