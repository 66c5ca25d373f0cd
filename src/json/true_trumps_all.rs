//! Sticky-true boolean used for main-chain membership on older endpoints.
//!
//! The wire encoding has non-standard truthiness rules: once a field has
//! been observed as `true` it must stay `true` no matter what a later
//! overlaid object says, and an absent field reads as `false`.

use serde::de::Deserializer;
use serde::Deserialize;

/// Merges an incoming reading into the current value. `true` trumps all:
/// a current `true` is never flipped back, an absent incoming value means
/// `false`.
pub fn merge(current: bool, incoming: Option<bool>) -> bool {
    current || incoming.unwrap_or(false)
}

/// serde half of the codec: absent or `null` decodes to `false`. Pair with
/// `#[serde(default)]` so the field may be missing entirely.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn true_is_never_flipped_back() {
        assert!(merge(true, Some(false)));
        assert!(merge(true, None));
        assert!(merge(true, Some(true)));
    }

    #[test]
    fn incoming_value_passes_through_when_not_yet_true() {
        assert!(merge(false, Some(true)));
        assert!(!merge(false, Some(false)));
        assert!(!merge(false, None));
    }

    #[test]
    fn absent_field_reads_as_false() {
        #[derive(Deserialize)]
        struct Flagged {
            #[serde(default, deserialize_with = "super::deserialize")]
            main_chain: bool,
        }

        let absent: Flagged = serde_json::from_str("{}").unwrap();
        assert!(!absent.main_chain);
        let null: Flagged = serde_json::from_str(r#"{"main_chain":null}"#).unwrap();
        assert!(!null.main_chain);
        let present: Flagged = serde_json::from_str(r#"{"main_chain":true}"#).unwrap();
        assert!(present.main_chain);
    }
}
