use serde::Deserialize;
use serde_json::Value;

use crate::client::ApiError;
use crate::models::BitcoinValue;

/// An unspent transaction output.
#[derive(Debug, Clone, Deserialize)]
pub struct UnspentOutput {
    pub confirmations: i64,
    /// Index of the output within its transaction.
    #[serde(rename = "tx_output_n")]
    pub n: i32,
    pub script: String,
    #[serde(rename = "tx_hash")]
    pub transaction_hash: String,
    #[serde(rename = "tx_index")]
    pub transaction_index: i64,
    pub value: BitcoinValue,
}

impl UnspentOutput {
    /// Unwraps the `unspent_outputs` array of an `unspent` response,
    /// defaulting to an empty list if the key is absent.
    pub fn many_from_json(body: &str) -> Result<Vec<UnspentOutput>, ApiError> {
        let value: Value = serde_json::from_str(body)?;
        match value.get("unspent_outputs") {
            Some(outputs) => Ok(serde_json::from_value(outputs.clone())?),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwraps_unspent_outputs_key() {
        let body = r#"{"unspent_outputs": [{
            "tx_hash": "e6452a2cb71aa864aaa959e647e7a4726a22e640560f199f79b56b5502114c37",
            "tx_index": 12563028,
            "tx_output_n": 0,
            "script": "76a914",
            "value": 5000300000,
            "confirmations": 6
        }]}"#;
        let outputs = UnspentOutput::many_from_json(body).unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].n, 0);
        assert_eq!(outputs[0].value, BitcoinValue::from_satoshis(5_000_300_000));
    }

    #[test]
    fn missing_key_is_an_empty_list() {
        assert!(UnspentOutput::many_from_json("{}").unwrap().is_empty());
    }
}
