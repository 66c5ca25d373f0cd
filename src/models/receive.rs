use serde::{Deserialize, Serialize};

/// A payment-receiving address derived from an xpub.
#[derive(Debug, Clone, Deserialize)]
pub struct ReceivePaymentResponse {
    pub address: String,
    /// Callback URL that will be invoked when a payment arrives.
    pub callback: String,
    /// Derivation index of the address within the xpub.
    pub index: i32,
}

/// A recorded attempt to invoke a payment callback.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackLog {
    #[serde(rename = "callback")]
    pub callback_url: Option<String>,
    #[serde(rename = "called_at")]
    pub called_at: Option<String>,
    pub raw_response: Option<String>,
    #[serde(default)]
    pub response_code: i32,
}

/// Parameters for subscribing to balance-update notifications on an
/// address.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceUpdateRequest {
    #[serde(rename = "addr")]
    pub address: String,
    pub callback: String,
    pub key: String,
    /// Number of confirmations before the callback fires.
    #[serde(rename = "confs")]
    pub confirmations: u32,
    /// When to fire: `KEEP` for every matching event or `DELETE` for one
    /// notification only.
    #[serde(rename = "onNotification")]
    pub notification: String,
    /// Which operations to watch, `RECEIVE`, `SPEND` or `ALL`.
    #[serde(rename = "op")]
    pub operation_type: String,
}

/// An active balance-update subscription.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceUpdateResponse {
    pub id: i64,
    #[serde(rename = "addr")]
    pub address: String,
    pub callback: String,
    #[serde(rename = "confs")]
    pub confirmations: i32,
    #[serde(rename = "onNotification")]
    pub notification: String,
    #[serde(rename = "op")]
    pub operation_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_request_serializes_wire_names() {
        let request = BalanceUpdateRequest {
            address: "1A8JiWcwvpY7tAopUkSnGuEYHmzGYfZPiq".to_string(),
            callback: "https://example.org/callback".to_string(),
            key: "abc123".to_string(),
            confirmations: 3,
            notification: "KEEP".to_string(),
            operation_type: "ALL".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["addr"], "1A8JiWcwvpY7tAopUkSnGuEYHmzGYfZPiq");
        assert_eq!(json["confs"], 3);
        assert_eq!(json["onNotification"], "KEEP");
        assert_eq!(json["op"], "ALL");
    }

    #[test]
    fn subscription_response_decodes() {
        let body = r#"{
            "id": 70,
            "addr": "1A8JiWcwvpY7tAopUkSnGuEYHmzGYfZPiq",
            "op": "RECEIVE",
            "confs": 1,
            "callback": "https://example.org/callback",
            "onNotification": "KEEP"
        }"#;
        let response: BalanceUpdateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.id, 70);
        assert_eq!(response.operation_type, "RECEIVE");
    }
}
