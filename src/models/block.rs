use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::client::ApiError;
use crate::json::{true_trumps_all, unix_time};
use crate::models::{BitcoinValue, Transaction};

/// Simple representation of a block, shared by all block variants.
///
/// Blocks are identified primarily by hash; height is not unique because
/// forked blocks may share one.
#[derive(Debug, Clone, Deserialize)]
pub struct SimpleBlock {
    pub hash: String,
    pub height: i64,
    /// Whether the block is on the main chain. Older endpoints encode this
    /// with sticky-true semantics; absence reads as `false`.
    #[serde(default, deserialize_with = "true_trumps_all::deserialize")]
    pub main_chain: bool,
    /// Block timestamp set by the miner.
    #[serde(with = "unix_time::seconds")]
    pub time: DateTime<Utc>,
}

impl SimpleBlock {
    /// Unwraps the `blocks` array of a `blocks/{pool|timestamp}` response,
    /// defaulting to an empty list if the key is absent.
    pub fn many_from_json(body: &str) -> Result<Vec<SimpleBlock>, ApiError> {
        let value: Value = serde_json::from_str(body)?;
        match value.get("blocks") {
            Some(blocks) => Ok(serde_json::from_value(blocks.clone())?),
            None => Ok(Vec::new()),
        }
    }
}

/// Full representation of a block as returned by `rawblock/{hash|index}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    #[serde(flatten)]
    pub summary: SimpleBlock,
    /// Representation of the difficulty target for this block.
    pub bits: i64,
    /// Total transaction fees from this block.
    #[serde(rename = "fee")]
    pub fees: BitcoinValue,
    #[serde(rename = "block_index")]
    pub index: i64,
    #[serde(rename = "mrkl_root")]
    pub merkle_root: String,
    pub nonce: i64,
    #[serde(rename = "prev_block")]
    pub previous_block_hash: String,
    /// IP address that relayed the block.
    #[serde(default = "default_relayed_by")]
    pub relayed_by: String,
    /// Serialized size of this block.
    pub size: i64,
    /// Transactions in the block, in block order.
    #[serde(rename = "tx")]
    pub transactions: Vec<Transaction>,
    #[serde(rename = "ver")]
    pub version: i32,
    #[serde(default, deserialize_with = "unix_time::seconds_option::deserialize")]
    received_time: Option<DateTime<Utc>>,
}

fn default_relayed_by() -> String {
    "0.0.0.0".to_string()
}

impl Block {
    /// The time this block was received by the service, defaulting to the
    /// mined timestamp when the service omits it.
    pub fn received_time(&self) -> DateTime<Utc> {
        self.received_time.unwrap_or(self.summary.time)
    }

    /// Decodes a `rawblock` response.
    ///
    /// The endpoint omits `block_height` and `double_spend` on every
    /// transaction; both are synthesized here before decoding, the height
    /// from the parent block.
    pub fn from_json(body: &str) -> Result<Block, ApiError> {
        let value: Value = serde_json::from_str(body)?;
        Ok(Self::from_value(value)?)
    }

    /// Decodes a fork-height `block-height/{height}` response wrapping an
    /// array under `blocks`.
    ///
    /// Elements that fail to decode are dropped from the result rather than
    /// failing the whole response.
    pub fn many_from_json(body: &str) -> Result<Vec<Block>, ApiError> {
        let value: Value = serde_json::from_str(body)?;
        let blocks = match value.get("blocks").and_then(Value::as_array) {
            Some(list) => list
                .iter()
                .filter_map(|block| Self::from_value(block.clone()).ok())
                .collect(),
            None => Vec::new(),
        };
        Ok(blocks)
    }

    fn from_value(mut value: Value) -> Result<Block, serde_json::Error> {
        let height = value.get("height").cloned();
        if let Some(transactions) = value.get_mut("tx").and_then(Value::as_array_mut) {
            for transaction in transactions {
                if let Some(fields) = transaction.as_object_mut() {
                    if let Some(height) = &height {
                        fields.insert("block_height".to_string(), height.clone());
                    }
                    fields.insert("double_spend".to_string(), Value::Bool(false));
                }
            }
        }
        serde_json::from_value(value)
    }
}

/// Simplified representation of the chain tip returned by `latestblock`.
///
/// Carries only the transaction index list, not full transactions, and is
/// on the main chain by definition.
#[derive(Debug, Clone)]
pub struct LatestBlock {
    pub summary: SimpleBlock,
    pub index: i64,
    /// Indexes of the transactions included in this block.
    pub transaction_indexes: Vec<i64>,
}

#[derive(Deserialize)]
struct LatestBlockWire {
    hash: String,
    height: i64,
    #[serde(default)]
    main_chain: Option<bool>,
    #[serde(with = "unix_time::seconds")]
    time: DateTime<Utc>,
    block_index: i64,
    #[serde(rename = "txIndexes")]
    tx_indexes: Vec<i64>,
}

impl<'de> Deserialize<'de> for LatestBlock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = LatestBlockWire::deserialize(deserializer)?;
        Ok(LatestBlock {
            summary: SimpleBlock {
                hash: wire.hash,
                height: wire.height,
                // tip of the chain: main-chain membership starts out true
                // and the sticky-true rule keeps it that way
                main_chain: true_trumps_all::merge(true, wire.main_chain),
                time: wire.time,
            },
            index: wire.block_index,
            transaction_indexes: wire.tx_indexes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW_BLOCK: &str = r#"{
        "hash": "0000000000000bae09a7a393a8acded75aa67e46cb81f7acaa5ad94f9eacd103",
        "height": 154595,
        "main_chain": true,
        "time": 1322131230,
        "bits": 437129626,
        "fee": 300000,
        "block_index": 818044,
        "mrkl_root": "935aa0ed2e29a4b81e0c995c39e06995ecce7ddbebb26ed32d550a72e8200bf5",
        "nonce": 2964215930,
        "prev_block": "00000000000007d0f98d9edca880a6c124e25095712df8952e0439ac7409738a",
        "relayed_by": "108.60.208.156",
        "size": 9195,
        "ver": 1,
        "tx": [
            {
                "hash": "5b09bbb8d3cb2f8d4edbcf30664419fb7c9deaeeb1f62cb432e7741c80dbe5ba",
                "tx_index": 12563028,
                "inputs": [{"script": "04", "sequence": 4294967295}],
                "out": [{"addr": "1A", "n": 0, "script": "76", "spent": false, "tx_index": 12563028, "value": 5000300000}],
                "relayed_by": "108.60.208.156",
                "size": 101,
                "time": 1322131230,
                "ver": 1
            }
        ]
    }"#;

    #[test]
    fn raw_block_synthesizes_transaction_fields() {
        let block = Block::from_json(RAW_BLOCK).unwrap();
        assert_eq!(block.summary.height, 154595);
        assert_eq!(block.transactions.len(), 1);
        let tx = &block.transactions[0];
        assert_eq!(tx.block_height(), Some(154595));
        assert!(!tx.double_spend);
        assert_eq!(block.fees, BitcoinValue::from_satoshis(300_000));
    }

    #[test]
    fn received_time_defaults_to_mined_time() {
        let block = Block::from_json(RAW_BLOCK).unwrap();
        assert_eq!(block.received_time(), block.summary.time);

        let with_received = RAW_BLOCK.replacen(
            "\"bits\":",
            "\"received_time\": 1322131530, \"bits\":",
            1,
        );
        let block = Block::from_json(&with_received).unwrap();
        assert_eq!(block.received_time().timestamp(), 1322131530);
    }

    #[test]
    fn fork_height_decoding_drops_bad_elements() {
        let bad_element = r#"{"hash": "dead", "height": 1}"#;
        let body = format!(r#"{{"blocks": [{RAW_BLOCK}, {bad_element}]}}"#);
        let blocks = Block::many_from_json(&body).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].summary.height, 154595);
    }

    #[test]
    fn missing_blocks_key_is_an_empty_list() {
        assert!(Block::many_from_json("{}").unwrap().is_empty());
        assert!(SimpleBlock::many_from_json("{}").unwrap().is_empty());
    }

    #[test]
    fn simple_blocks_unwrap_from_blocks_key() {
        let body = r#"{"blocks": [
            {"hash": "aa", "height": 100, "main_chain": true, "time": 1322131230},
            {"hash": "bb", "height": 100, "time": 1322131230}
        ]}"#;
        let blocks = SimpleBlock::many_from_json(body).unwrap();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].main_chain);
        // absent main_chain reads as false
        assert!(!blocks[1].main_chain);
    }

    #[test]
    fn latest_block_is_always_main_chain() {
        let body = r#"{
            "hash": "00cc",
            "height": 500000,
            "main_chain": false,
            "time": 1322131230,
            "block_index": 818044,
            "txIndexes": [12563028, 12563029]
        }"#;
        let latest: LatestBlock = serde_json::from_str(body).unwrap();
        assert!(latest.summary.main_chain);
        assert_eq!(latest.transaction_indexes, vec![12563028, 12563029]);
    }
}
