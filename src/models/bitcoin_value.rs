use std::fmt;
use std::ops::{Add, Sub};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

const SATOSHIS_PER_BITCOIN: i64 = 100_000_000;
const MILLIBITS_PER_BITCOIN: i64 = 1_000;
const BITS_PER_BITCOIN: i64 = 1_000_000;

/// An amount of bitcoin.
///
/// Stored as an exact decimal BTC value; equality and ordering are by the
/// underlying amount, never floating point. Arithmetic produces a new
/// value. Round-trips losslessly through the satoshi integer
/// representation; conversions to and from BTC may lose precision beyond
/// eight decimal digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitcoinValue {
    btc: Decimal,
}

impl BitcoinValue {
    pub const ZERO: BitcoinValue = BitcoinValue { btc: Decimal::ZERO };

    pub fn from_btc(btc: Decimal) -> Self {
        Self { btc }
    }

    pub fn from_satoshis(satoshis: i64) -> Self {
        Self {
            btc: Decimal::from(satoshis) / Decimal::from(SATOSHIS_PER_BITCOIN),
        }
    }

    pub fn from_millibits(millibits: Decimal) -> Self {
        Self {
            btc: millibits / Decimal::from(MILLIBITS_PER_BITCOIN),
        }
    }

    pub fn from_bits(bits: Decimal) -> Self {
        Self {
            btc: bits / Decimal::from(BITS_PER_BITCOIN),
        }
    }

    /// The amount in whole bitcoin.
    pub fn btc(&self) -> Decimal {
        self.btc
    }

    /// The amount as a count of the smallest unit, truncated. Amounts
    /// beyond the `i64` range saturate at the matching bound.
    pub fn satoshis(&self) -> i64 {
        let bound = if self.btc.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        };
        self.btc
            .checked_mul(Decimal::from(SATOSHIS_PER_BITCOIN))
            .map_or(bound, |scaled| scaled.trunc().to_i64().unwrap_or(bound))
    }

    pub fn millibits(&self) -> Decimal {
        self.btc * Decimal::from(MILLIBITS_PER_BITCOIN)
    }

    pub fn bits(&self) -> Decimal {
        self.btc * Decimal::from(BITS_PER_BITCOIN)
    }
}

impl Add for BitcoinValue {
    type Output = BitcoinValue;

    fn add(self, other: BitcoinValue) -> BitcoinValue {
        BitcoinValue {
            btc: self.btc + other.btc,
        }
    }
}

impl Sub for BitcoinValue {
    type Output = BitcoinValue;

    fn sub(self, other: BitcoinValue) -> BitcoinValue {
        BitcoinValue {
            btc: self.btc - other.btc,
        }
    }
}

impl fmt::Display for BitcoinValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.btc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn satoshi_round_trip_is_exact() {
        for satoshis in [0i64, 1, 546, 100_000_000, 2_100_000_000_000_000] {
            assert_eq!(BitcoinValue::from_satoshis(satoshis).satoshis(), satoshis);
        }
    }

    #[test]
    fn denomination_scales() {
        let one_btc = BitcoinValue::from_btc(Decimal::ONE);
        assert_eq!(one_btc.satoshis(), 100_000_000);
        assert_eq!(one_btc.millibits(), Decimal::from(1_000));
        assert_eq!(one_btc.bits(), Decimal::from(1_000_000));
        assert_eq!(BitcoinValue::from_millibits(Decimal::from(1_000)), one_btc);
        assert_eq!(BitcoinValue::from_bits(Decimal::from(1_000_000)), one_btc);
    }

    #[test]
    fn arithmetic_produces_new_values() {
        let a = BitcoinValue::from_satoshis(150);
        let b = BitcoinValue::from_satoshis(50);
        assert_eq!(a + b, BitcoinValue::from_satoshis(200));
        assert_eq!(a - b, BitcoinValue::from_satoshis(100));
    }

    #[test]
    fn out_of_range_amounts_saturate_as_satoshis() {
        assert_eq!(BitcoinValue::from_btc(Decimal::MAX).satoshis(), i64::MAX);
        assert_eq!(BitcoinValue::from_btc(Decimal::MIN).satoshis(), i64::MIN);
        assert_eq!(
            BitcoinValue::from_btc(Decimal::from(i64::MAX)).satoshis(),
            i64::MAX
        );
    }

    #[test]
    fn equality_and_ordering_are_exact() {
        assert_eq!(
            BitcoinValue::from_btc(Decimal::new(10, 1)),
            BitcoinValue::from_btc(Decimal::new(100, 2))
        );
        assert!(BitcoinValue::from_satoshis(2) > BitcoinValue::from_satoshis(1));
        assert_eq!(BitcoinValue::ZERO, BitcoinValue::from_satoshis(0));
    }
}
