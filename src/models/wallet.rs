use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::ApiError;
use crate::models::BitcoinValue;

/// An address held by a service wallet.
#[derive(Debug, Clone, Deserialize)]
pub struct WalletAddress {
    pub address: String,
    #[serde(default)]
    pub balance: BitcoinValue,
    pub label: Option<String>,
    #[serde(default)]
    pub total_received: BitcoinValue,
}

impl WalletAddress {
    /// Unwraps the `addresses` array of a wallet `list` response,
    /// defaulting to an empty list if the key is absent.
    pub fn many_from_json(body: &str) -> Result<Vec<WalletAddress>, ApiError> {
        let value: Value = serde_json::from_str(body)?;
        match value.get("addresses") {
            Some(addresses) => Ok(serde_json::from_value(addresses.clone())?),
            None => Ok(Vec::new()),
        }
    }

    /// Extracts the `archived` address of an archive response.
    pub fn archived_from_json(body: &str) -> Result<Option<String>, ApiError> {
        let value: Value = serde_json::from_str(body)?;
        Ok(value
            .get("archived")
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    /// Extracts the `active` address of an unarchive response.
    pub fn unarchived_from_json(body: &str) -> Result<Option<String>, ApiError> {
        let value: Value = serde_json::from_str(body)?;
        Ok(value
            .get("active")
            .and_then(Value::as_str)
            .map(str::to_string))
    }
}

/// Outcome of a wallet payment.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentResponse {
    pub message: String,
    #[serde(default)]
    pub notice: String,
    pub tx_hash: String,
}

/// Parameters for creating a new service wallet.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateWalletRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub password: String,
    /// Optional private key to import into the new wallet.
    #[serde(rename = "privateKey", skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}

/// A freshly created service wallet.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWalletResponse {
    /// First address in the wallet.
    pub address: String,
    #[serde(rename = "guid")]
    pub identifier: String,
    pub label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_response_unwraps_addresses() {
        let body = r#"{"addresses": [
            {"address": "1A8JiWcwvpY7tAopUkSnGuEYHmzGYfZPiq", "balance": 1400000, "label": "savings", "total_received": 5000000}
        ]}"#;
        let addresses = WalletAddress::many_from_json(body).unwrap();
        assert_eq!(addresses.len(), 1);
        assert_eq!(addresses[0].balance, BitcoinValue::from_satoshis(1_400_000));
        assert_eq!(addresses[0].label.as_deref(), Some("savings"));
    }

    #[test]
    fn archive_responses_extract_their_keys() {
        let archived =
            WalletAddress::archived_from_json(r#"{"archived": "1A8Ji"}"#).unwrap();
        assert_eq!(archived.as_deref(), Some("1A8Ji"));
        let active =
            WalletAddress::unarchived_from_json(r#"{"active": "1A8Ji"}"#).unwrap();
        assert_eq!(active.as_deref(), Some("1A8Ji"));
        assert_eq!(WalletAddress::archived_from_json("{}").unwrap(), None);
    }

    #[test]
    fn create_request_uses_camel_case_private_key() {
        let request = CreateWalletRequest {
            password: "hunter2".to_string(),
            private_key: Some("5Hw".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["privateKey"], "5Hw");
        assert!(json.get("email").is_none());
    }

    #[test]
    fn create_response_renames_guid() {
        let body = r#"{"guid": "4b8cd8e9", "address": "1A8Ji", "label": null}"#;
        let wallet: CreateWalletResponse = serde_json::from_str(body).unwrap();
        assert_eq!(wallet.identifier, "4b8cd8e9");
        assert!(wallet.label.is_none());
    }
}
