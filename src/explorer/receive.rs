use std::sync::Arc;

use crate::client::{ApiError, BlockchainHttpClient, QueryString};
use crate::explorer::server_message_contains;
use crate::models::{
    BalanceUpdateRequest, BalanceUpdateResponse, CallbackLog, ReceivePaymentResponse, XpubGap,
};

/// Notification mode for a balance-update subscription: keep notifying on
/// every matching event.
pub const NOTIFICATION_KEEP: &str = "KEEP";
/// Watch both receive and spend operations.
pub const OPERATION_ALL: &str = "ALL";
/// Default confirmation count before a balance-update callback fires.
pub const DEFAULT_CONFIRMATIONS: u32 = 3;

/// Derives payment-receiving addresses from an xpub and inspects their
/// callback history. Served by the v2 API host.
#[derive(Debug, Clone)]
pub struct ReceiveExplorer {
    http: Arc<BlockchainHttpClient>,
}

impl ReceiveExplorer {
    pub fn new(http: Arc<BlockchainHttpClient>) -> Self {
        Self { http }
    }

    /// Generates the next unused receiving address of `xpub`. A payment to
    /// it triggers a notification to `callback`.
    pub async fn generate_address(
        &self,
        xpub: &str,
        callback: &str,
        key: &str,
        gap_limit: Option<u32>,
    ) -> Result<ReceivePaymentResponse, ApiError> {
        let mut query = QueryString::new();
        query.add("xpub", xpub)?;
        query.add("callback", callback)?;
        query.add("key", key)?;
        if let Some(gap_limit) = gap_limit {
            query.add("gap_limit", gap_limit)?;
        }

        let result = self
            .http
            .get::<ReceivePaymentResponse>("receive", Some(query))
            .await;
        result.map_err(remap_receive_errors)
    }

    /// Gets the gap between the last used address of `xpub` and its gap
    /// limit.
    pub async fn check_address_gap(&self, xpub: &str, key: &str) -> Result<XpubGap, ApiError> {
        let mut query = QueryString::new();
        query.add("xpub", xpub)?;
        query.add("key", key)?;

        let result = self.http.get::<XpubGap>("receive/checkgap", Some(query)).await;
        result.map_err(remap_receive_errors)
    }

    /// Gets the invocation log of a callback URL.
    pub async fn get_callback_logs(
        &self,
        callback: &str,
        key: &str,
    ) -> Result<Vec<CallbackLog>, ApiError> {
        let mut query = QueryString::new();
        query.add("callback", callback)?;
        query.add("key", key)?;

        let result = self
            .http
            .get::<Vec<CallbackLog>>("receive/callback_log", Some(query))
            .await;
        result.map_err(remap_receive_errors)
    }
}

/// Subscribes to balance-change notifications on an address. Served by the
/// v2 API host.
#[derive(Debug, Clone)]
pub struct BalanceUpdateExplorer {
    http: Arc<BlockchainHttpClient>,
}

impl BalanceUpdateExplorer {
    pub fn new(http: Arc<BlockchainHttpClient>) -> Self {
        Self { http }
    }

    /// Subscribes `callback` to balance changes on `address`.
    pub async fn subscribe(
        &self,
        request: &BalanceUpdateRequest,
    ) -> Result<BalanceUpdateResponse, ApiError> {
        let result = self
            .http
            .post::<_, BalanceUpdateResponse>("balance_update", request, false, None)
            .await;
        result.map_err(remap_receive_errors)
    }
}

impl BalanceUpdateRequest {
    /// A subscription with the service defaults: notify on every event for
    /// all operation types after three confirmations.
    pub fn with_defaults(address: &str, callback: &str, key: &str) -> Self {
        Self {
            address: address.to_string(),
            callback: callback.to_string(),
            key: key.to_string(),
            confirmations: DEFAULT_CONFIRMATIONS,
            notification: NOTIFICATION_KEEP.to_string(),
            operation_type: OPERATION_ALL.to_string(),
        }
    }
}

fn remap_receive_errors(err: ApiError) -> ApiError {
    if server_message_contains(&err, "Invalid xpub format") {
        ApiError::InvalidArgument {
            name: "xpub",
            message: "the xpub provided is invalid".to_string(),
        }
    } else if server_message_contains(&err, "API Key is not valid") {
        ApiError::InvalidArgument {
            name: "key",
            message: "the api key provided is invalid".to_string(),
        }
    } else {
        err
    }
}
