//! Wire codecs for the API's irregular JSON encodings.
//!
//! The service uses three distinct, non-interchangeable timestamp
//! encodings, a satoshi-integer monetary encoding and a sticky-true
//! boolean. Each codec lives in its own module and is usable with
//! `#[serde(with = "...")]` / `deserialize_with`:
//!
//! - [`unix_time`] - Unix seconds or millis, as a number or numeric string,
//!   rejected when earlier than the genesis block
//! - [`epoch_time`] - bare millis or a `Date(N)` wrapped string, written
//!   back as `/Date(N)/`
//! - [`epoch_offset_time`] - `/Date(N±hhmm)/`, an instant together with a
//!   UTC offset
//! - [`bitcoin_value`] - satoshi integer form of
//!   [`BitcoinValue`](crate::models::BitcoinValue)
//! - [`true_trumps_all`] - boolean that stays `true` once observed `true`

pub mod bitcoin_value;
pub mod epoch_offset_time;
pub mod epoch_time;
pub mod true_trumps_all;
pub mod unix_time;
