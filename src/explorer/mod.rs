//! Typed entry points for each group of service endpoints.
//!
//! Every explorer validates its inputs locally, builds a query, calls the
//! shared HTTP client and maps the service's known error phrases to typed
//! argument errors.

mod block_explorer;
mod exchange_rate_explorer;
mod push_tx;
mod receive;
mod statistics_explorer;
mod wallet;

pub use block_explorer::{
    BlockExplorer, FilterType, MAX_TRANSACTIONS_PER_MULTI_REQUEST, MAX_TRANSACTIONS_PER_REQUEST,
    MAX_UNSPENT_OUTPUTS_PER_REQUEST,
};
pub use exchange_rate_explorer::ExchangeRateExplorer;
pub use push_tx::TransactionPusher;
pub use receive::{BalanceUpdateExplorer, ReceiveExplorer};
pub use statistics_explorer::StatisticsExplorer;
pub use wallet::{Wallet, WalletCreator};

use crate::client::ApiError;

/// True when `err` is a server error whose message contains `needle`.
pub(crate) fn server_message_contains(err: &ApiError, needle: &str) -> bool {
    err.server_message().is_some_and(|msg| msg.contains(needle))
}
