//! Typed response models for the blockchain.info API.
//!
//! All entities are immutable value objects populated entirely from a
//! single decode step; none has a mutation API. Endpoints whose JSON
//! shapes are irregular carry `from_json` / `many_from_json` normalizers
//! next to the model they produce.

mod address;
mod bitcoin_value;
mod block;
mod currency;
mod receive;
mod stats;
mod transaction;
mod unspent_output;
mod wallet;

pub use address::{Address, MultiAddress, Xpub, XpubGap};
pub use bitcoin_value::BitcoinValue;
pub use block::{Block, LatestBlock, SimpleBlock};
pub use currency::Currency;
pub use receive::{
    BalanceUpdateRequest, BalanceUpdateResponse, CallbackLog, ReceivePaymentResponse,
};
pub use stats::{ChartResponse, ChartValue, StatisticsResponse};
pub use transaction::{Input, Output, Transaction};
pub use unspent_output::UnspentOutput;
pub use wallet::{
    CreateWalletRequest, CreateWalletResponse, PaymentResponse, WalletAddress,
};
