use std::sync::Arc;

use crate::client::{ApiError, BlockchainHttpClient};

/// Broadcasts raw transactions to the network.
#[derive(Debug, Clone)]
pub struct TransactionPusher {
    http: Arc<BlockchainHttpClient>,
}

impl TransactionPusher {
    pub fn new(http: Arc<BlockchainHttpClient>) -> Self {
        Self { http }
    }

    /// Broadcasts a hex-encoded transaction via `pushtx`.
    ///
    /// The service acknowledges with plain text rather than JSON, so the
    /// body is discarded and success is signalled by the status alone.
    pub async fn push_transaction(&self, transaction_hex: &str) -> Result<(), ApiError> {
        if transaction_hex.trim().is_empty() {
            return Err(ApiError::MissingArgument("transaction_hex"));
        }
        self.http
            .post_with("pushtx", transaction_hex, true, None, |_| Ok(()))
            .await
    }
}
