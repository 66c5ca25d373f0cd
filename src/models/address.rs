use serde::Deserialize;
use serde_json::Value;

use crate::client::ApiError;
use crate::models::{BitcoinValue, Transaction};

/// A bitcoin address with its aggregate balances and, optionally, a page
/// of associated transactions.
#[derive(Debug, Clone, Deserialize)]
pub struct Address {
    #[serde(rename = "address")]
    pub base58_check: String,
    pub hash160: Option<String>,
    pub final_balance: BitcoinValue,
    pub total_received: BitcoinValue,
    pub total_sent: BitcoinValue,
    #[serde(rename = "n_tx")]
    pub transaction_count: i64,
    #[serde(default, rename = "txs")]
    pub transactions: Vec<Transaction>,
}

/// Balances of several addresses queried in one call, with their combined
/// transaction page.
#[derive(Debug, Clone, Deserialize)]
pub struct MultiAddress {
    pub addresses: Vec<Address>,
    #[serde(default, rename = "txs")]
    pub transactions: Vec<Transaction>,
}

/// An extended public key summary. Same aggregate fields as [`Address`]
/// plus the derivation state of the account.
#[derive(Debug, Clone, Deserialize)]
pub struct Xpub {
    #[serde(flatten)]
    pub address: Address,
    pub account_index: i32,
    pub change_index: i32,
    pub gap_limit: i32,
}

impl Xpub {
    /// Decodes a `multiaddr` response for a single xpub.
    ///
    /// The response nests the xpub fields inside the first element of an
    /// `addresses` array; that element is hoisted and the top-level `txs`
    /// array copied into it before decoding.
    pub fn from_json(body: &str) -> Result<Xpub, ApiError> {
        let value: Value = serde_json::from_str(body)?;
        let mut xpub = value
            .get("addresses")
            .and_then(Value::as_array)
            .and_then(|addresses| addresses.first())
            .cloned()
            .unwrap_or_else(|| Value::Object(Default::default()));
        if let (Some(fields), Some(txs)) = (xpub.as_object_mut(), value.get("txs")) {
            fields.insert("txs".to_string(), txs.clone());
        }
        Ok(serde_json::from_value(xpub)?)
    }
}

/// Gap between the last used address of an xpub and its gap limit.
#[derive(Debug, Clone, Deserialize)]
pub struct XpubGap {
    pub gap: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xpub_hoists_first_address_and_copies_txs() {
        let body = r#"{
            "addresses": [{
                "address": "xpub6CmZamQcHw2TPtbGmJNEvRgfhLwitarvzFn3fBYEEkFTqztus7W7CNbf48Kxuj1bRRBmZPzQocB6qar9ay6buVkQk73ftKE1z4tt9cPHWRn",
                "final_balance": 0,
                "total_received": 163000,
                "total_sent": 163000,
                "n_tx": 2,
                "account_index": 0,
                "change_index": 0,
                "gap_limit": 20
            }],
            "txs": [{
                "hash": "aa00",
                "tx_index": 1,
                "inputs": [],
                "out": [],
                "size": 226,
                "time": 1322131230,
                "ver": 1
            }]
        }"#;
        let xpub = Xpub::from_json(body).unwrap();
        assert_eq!(xpub.gap_limit, 20);
        assert_eq!(xpub.address.transaction_count, 2);
        assert_eq!(xpub.address.transactions.len(), 1);
        assert_eq!(
            xpub.address.total_received,
            BitcoinValue::from_satoshis(163_000)
        );
    }

    #[test]
    fn multi_address_decodes_with_missing_txs() {
        let body = r#"{
            "addresses": [{
                "address": "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa",
                "hash160": "62e907b15cbf27d5425399ebf6f0fb50ebb88f18",
                "final_balance": 7500000000,
                "total_received": 7500000000,
                "total_sent": 0,
                "n_tx": 1
            }]
        }"#;
        let multi: MultiAddress = serde_json::from_str(body).unwrap();
        assert_eq!(multi.addresses.len(), 1);
        assert!(multi.transactions.is_empty());
        assert_eq!(
            multi.addresses[0].hash160.as_deref(),
            Some("62e907b15cbf27d5425399ebf6f0fb50ebb88f18")
        );
    }
}
