use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::client::ApiError;
use crate::json::unix_time;
use crate::models::BitcoinValue;

/// A single bitcoin transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    /// Whether the transaction is a double spend.
    #[serde(default)]
    pub double_spend: bool,
    pub hash: String,
    #[serde(default)]
    pub inputs: Vec<Input>,
    #[serde(default, rename = "out")]
    pub outputs: Vec<Output>,
    #[serde(default)]
    pub lock_time: i64,
    /// IP address that relayed the transaction.
    #[serde(default)]
    pub relayed_by: String,
    /// Serialized size of the transaction.
    pub size: i64,
    #[serde(with = "unix_time::seconds")]
    pub time: DateTime<Utc>,
    pub tx_index: i64,
    #[serde(rename = "ver")]
    pub version: i32,
    #[serde(default = "unconfirmed_height")]
    block_height: i64,
}

fn unconfirmed_height() -> i64 {
    -1
}

impl Transaction {
    /// Height of the block containing the transaction, or `None` while it
    /// is unconfirmed. The wire encodes unconfirmed as a negative height.
    pub fn block_height(&self) -> Option<i64> {
        (self.block_height >= 0).then_some(self.block_height)
    }

    /// Unwraps the `txs` array of an address or xpub response, defaulting
    /// to an empty list if the key is absent.
    pub fn many_from_json(body: &str) -> Result<Vec<Transaction>, ApiError> {
        let value: Value = serde_json::from_str(body)?;
        match value.get("txs") {
            Some(txs) => Ok(serde_json::from_value(txs.clone())?),
            None => Ok(Vec::new()),
        }
    }
}

/// A transaction input. Coinbase inputs have no previous output.
#[derive(Debug, Clone, Deserialize)]
pub struct Input {
    #[serde(default)]
    pub sequence: i64,
    #[serde(default, rename = "script")]
    pub script_signature: String,
    #[serde(rename = "prev_out")]
    pub previous_output: Option<Output>,
}

impl Input {
    pub fn is_coinbase(&self) -> bool {
        self.previous_output.is_none()
    }
}

/// A transaction output.
#[derive(Debug, Clone, Deserialize)]
pub struct Output {
    /// Index of the output within its transaction.
    pub n: i32,
    pub value: BitcoinValue,
    #[serde(default, rename = "addr")]
    pub address: String,
    pub tx_index: i64,
    pub script: String,
    #[serde(default)]
    pub spent: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const COINBASE_TX: &str = r#"{
        "hash": "5b09bbb8d3cb2f8d4edbcf30664419fb7c9deaeeb1f62cb432e7741c80dbe5ba",
        "tx_index": 12563028,
        "inputs": [{"script": "04", "sequence": 4294967295}],
        "out": [{"addr": "1A1zP1", "n": 0, "script": "76a914", "spent": false, "tx_index": 12563028, "value": 5000300000}],
        "relayed_by": "108.60.208.156",
        "size": 101,
        "time": 1322131230,
        "ver": 1
    }"#;

    #[test]
    fn unconfirmed_transaction_has_no_block_height() {
        let tx: Transaction = serde_json::from_str(COINBASE_TX).unwrap();
        assert_eq!(tx.block_height(), None);
        assert!(!tx.double_spend);
        assert!(tx.inputs[0].is_coinbase());
        assert_eq!(
            tx.outputs[0].value,
            BitcoinValue::from_satoshis(5_000_300_000)
        );
    }

    #[test]
    fn negative_height_reads_as_unconfirmed() {
        let body = COINBASE_TX.replacen("\"ver\": 1", "\"ver\": 1, \"block_height\": -1", 1);
        let tx: Transaction = serde_json::from_str(&body).unwrap();
        assert_eq!(tx.block_height(), None);

        let body = COINBASE_TX.replacen("\"ver\": 1", "\"ver\": 1, \"block_height\": 154595", 1);
        let tx: Transaction = serde_json::from_str(&body).unwrap();
        assert_eq!(tx.block_height(), Some(154595));
    }

    #[test]
    fn spending_input_is_not_coinbase() {
        let body = COINBASE_TX.replacen(
            r#"{"script": "04", "sequence": 4294967295}"#,
            r#"{"script": "47", "sequence": 4294967295, "prev_out": {"addr": "1B", "n": 1, "script": "76", "spent": true, "tx_index": 12563000, "value": 100000}}"#,
            1,
        );
        let tx: Transaction = serde_json::from_str(&body).unwrap();
        assert!(!tx.inputs[0].is_coinbase());
        let prev = tx.inputs[0].previous_output.as_ref().unwrap();
        assert!(prev.spent);
    }

    #[test]
    fn txs_list_unwraps_and_defaults_empty() {
        let body = format!(r#"{{"txs": [{COINBASE_TX}]}}"#);
        assert_eq!(Transaction::many_from_json(&body).unwrap().len(), 1);
        assert!(Transaction::many_from_json("{}").unwrap().is_empty());
    }
}
