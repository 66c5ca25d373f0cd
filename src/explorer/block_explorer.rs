use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::client::{ApiError, BlockchainHttpClient, QueryString};
use crate::explorer::server_message_contains;
use crate::json::unix_time;
use crate::models::{
    Address, Block, LatestBlock, MultiAddress, SimpleBlock, Transaction, UnspentOutput, Xpub,
};

/// Largest transaction page for a single-address query.
pub const MAX_TRANSACTIONS_PER_REQUEST: u32 = 50;
/// Largest transaction page for a multi-address or xpub query.
pub const MAX_TRANSACTIONS_PER_MULTI_REQUEST: u32 = 100;
/// Largest page of unspent outputs per query.
pub const MAX_UNSPENT_OUTPUTS_PER_REQUEST: u32 = 250;

/// Transaction filter applied by the `address` and `multiaddr` endpoints.
///
/// The numeric values are fixed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    All = 4,
    ConfirmedOnly = 5,
    RemoveUnspendable = 6,
}

/// Queries the block chain: blocks, transactions, addresses and unspent
/// outputs.
///
/// Covers the functionality documented at
/// <https://blockchain.info/api/blockchain_api>.
#[derive(Debug, Clone)]
pub struct BlockExplorer {
    http: Arc<BlockchainHttpClient>,
}

impl BlockExplorer {
    pub fn new(http: Arc<BlockchainHttpClient>) -> Self {
        Self { http }
    }

    /// Gets data for a single Base58Check or Hash160 address, with a page
    /// of its transactions.
    pub async fn get_address(
        &self,
        address: &str,
        limit: u32,
        offset: u32,
        filter: FilterType,
    ) -> Result<Address, ApiError> {
        if address.trim().is_empty() {
            return Err(ApiError::MissingArgument("address"));
        }
        let query = transaction_page_query(limit, offset, filter, MAX_TRANSACTIONS_PER_REQUEST)?;

        let result = self
            .http
            .get::<Address>(&format!("address/{address}"), Some(query))
            .await;
        result.map_err(|err| {
            if server_message_contains(&err, "Invalid Bitcoin Address")
                || server_message_contains(&err, "does not validate")
                || server_message_contains(&err, "too short")
            {
                ApiError::InvalidArgument {
                    name: "address",
                    message: "address provided is invalid".to_string(),
                }
            } else {
                err
            }
        })
    }

    /// Gets a single block by its hash.
    pub async fn get_block_by_hash(&self, hash: &str) -> Result<Block, ApiError> {
        if hash.trim().is_empty() {
            return Err(ApiError::MissingArgument("hash"));
        }
        self.get_block(hash).await
    }

    /// Gets a single block by its index. Prefer fetching by hash; indexes
    /// are a legacy addressing scheme.
    pub async fn get_block_by_index(&self, index: u64) -> Result<Block, ApiError> {
        self.get_block(&index.to_string()).await
    }

    /// Gets the blocks at a height. Normally one block, but a chain fork
    /// can put several there.
    pub async fn get_blocks_at_height(&self, height: u64) -> Result<Vec<Block>, ApiError> {
        let query = format_json_query()?;
        self.http
            .get_with(&format!("block-height/{height}"), Some(query), |body| {
                Block::many_from_json(body)
            })
            .await
    }

    /// Gets the blocks mined on the day containing `date_time`. The date
    /// must fall between the genesis block and now.
    pub async fn get_blocks_by_date_time(
        &self,
        date_time: DateTime<Utc>,
    ) -> Result<Vec<SimpleBlock>, ApiError> {
        if date_time < unix_time::genesis_block_time() {
            return Err(ApiError::OutOfRange {
                name: "date_time",
                message:
                    "date must be greater than or equal to the genesis block creation date (2009-01-03T18:15:05+00:00)"
                        .to_string(),
            });
        }
        if date_time > Utc::now() {
            return Err(ApiError::OutOfRange {
                name: "date_time",
                message: "date must be in the past".to_string(),
            });
        }
        self.get_blocks(&date_time.timestamp_millis().to_string())
            .await
    }

    /// Gets the blocks mined on the day containing the millisecond
    /// timestamp.
    pub async fn get_blocks_by_timestamp(
        &self,
        unix_millis: i64,
    ) -> Result<Vec<SimpleBlock>, ApiError> {
        if unix_millis < unix_time::GENESIS_BLOCK_UNIX_MILLIS {
            return Err(ApiError::OutOfRange {
                name: "unix_millis",
                message:
                    "date must be greater than or equal to the genesis block creation date (2009-01-03T18:15:05+00:00)"
                        .to_string(),
            });
        }
        self.get_blocks(&unix_millis.to_string()).await
    }

    /// Gets recent blocks mined by a pool. An empty pool name returns all
    /// blocks mined since midnight.
    pub async fn get_blocks_by_pool_name(
        &self,
        pool_name: &str,
    ) -> Result<Vec<SimpleBlock>, ApiError> {
        self.get_blocks(pool_name).await
    }

    /// Gets the tip of the main chain in simplified form.
    pub async fn get_latest_block(&self) -> Result<LatestBlock, ApiError> {
        self.http.get("latestblock", None).await
    }

    /// Gets combined data for several Base58Check and/or xpub addresses.
    pub async fn get_multi_address(
        &self,
        addresses: &[&str],
        limit: u32,
        offset: u32,
        filter: FilterType,
    ) -> Result<MultiAddress, ApiError> {
        if addresses.is_empty() {
            return Err(ApiError::MissingArgument("addresses"));
        }
        let mut query =
            transaction_page_query(limit, offset, filter, MAX_TRANSACTIONS_PER_MULTI_REQUEST)?;
        query.add("active", addresses.join("|"))?;

        let result = self.http.get::<MultiAddress>("multiaddr", Some(query)).await;
        result.map_err(|err| {
            if server_message_contains(&err, "Invalid Bitcoin Address") {
                ApiError::InvalidArgument {
                    name: "addresses",
                    message: "one or more addresses provided are invalid".to_string(),
                }
            } else {
                err
            }
        })
    }

    /// Gets a single transaction by its hash.
    pub async fn get_transaction_by_hash(&self, hash: &str) -> Result<Transaction, ApiError> {
        if hash.trim().is_empty() {
            return Err(ApiError::MissingArgument("hash"));
        }
        self.get_transaction(hash).await
    }

    /// Gets a single transaction by its index. Prefer fetching by hash;
    /// indexes are a legacy addressing scheme.
    pub async fn get_transaction_by_index(&self, index: u64) -> Result<Transaction, ApiError> {
        self.get_transaction(&index.to_string()).await
    }

    /// Gets the last ten unconfirmed transactions.
    pub async fn get_unconfirmed_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        let query = format_json_query()?;
        self.http
            .get_with("unconfirmed-transactions", Some(query), |body| {
                Transaction::many_from_json(body)
            })
            .await
    }

    /// Gets unspent outputs for one or more Base58Check and/or xpub
    /// addresses with at least `confirmations` confirmations.
    ///
    /// Having no unspent outputs is a legitimate state; the service's
    /// internal error for it decodes to an empty list here.
    pub async fn get_unspent_outputs(
        &self,
        addresses: &[&str],
        limit: u32,
        confirmations: u32,
    ) -> Result<Vec<UnspentOutput>, ApiError> {
        if addresses.is_empty() {
            return Err(ApiError::MissingArgument("addresses"));
        }
        if !(1..=MAX_UNSPENT_OUTPUTS_PER_REQUEST).contains(&limit) {
            return Err(ApiError::OutOfRange {
                name: "limit",
                message: format!(
                    "limit must be greater than 0 and at most {MAX_UNSPENT_OUTPUTS_PER_REQUEST}"
                ),
            });
        }

        let mut query = QueryString::new();
        query.add("active", addresses.join("|"))?;
        query.add("limit", limit)?;
        query.add("confirmations", confirmations)?;
        query.add("format", "json")?;

        let result = self
            .http
            .get_with("unspent", Some(query), |body| UnspentOutput::many_from_json(body))
            .await;
        match result {
            Err(err) if server_message_contains(&err, "outputs to spend") => Ok(Vec::new()),
            Err(err) if server_message_contains(&err, "Invalid Bitcoin Address") => {
                Err(ApiError::InvalidArgument {
                    name: "addresses",
                    message: "one or more addresses provided are invalid".to_string(),
                })
            }
            other => other,
        }
    }

    /// Gets an xpub summary: overall balances, derivation state and a page
    /// of transactions.
    pub async fn get_xpub(
        &self,
        xpub: &str,
        limit: u32,
        offset: u32,
        filter: FilterType,
    ) -> Result<Xpub, ApiError> {
        if xpub.trim().is_empty() {
            return Err(ApiError::MissingArgument("xpub"));
        }
        let mut query =
            transaction_page_query(limit, offset, filter, MAX_TRANSACTIONS_PER_MULTI_REQUEST)?;
        query.add("active", xpub)?;

        let result = self
            .http
            .get_with("multiaddr", Some(query), |body| Xpub::from_json(body))
            .await;
        result.map_err(|err| {
            if server_message_contains(&err, "Invalid Bitcoin Address") {
                ApiError::InvalidArgument {
                    name: "xpub",
                    message: "the xpub provided is invalid".to_string(),
                }
            } else {
                err
            }
        })
    }

    async fn get_block(&self, hash_or_index: &str) -> Result<Block, ApiError> {
        self.http
            .get_with(&format!("rawblock/{hash_or_index}"), None, |body| {
                Block::from_json(body)
            })
            .await
    }

    async fn get_blocks(&self, pool_name_or_timestamp: &str) -> Result<Vec<SimpleBlock>, ApiError> {
        let query = format_json_query()?;
        self.http
            .get_with(&format!("blocks/{pool_name_or_timestamp}"), Some(query), |body| {
                SimpleBlock::many_from_json(body)
            })
            .await
    }

    async fn get_transaction(&self, hash_or_index: &str) -> Result<Transaction, ApiError> {
        self.http
            .get(&format!("rawtx/{hash_or_index}"), None)
            .await
    }
}

fn format_json_query() -> Result<QueryString, ApiError> {
    let mut query = QueryString::new();
    query.add("format", "json")?;
    Ok(query)
}

fn transaction_page_query(
    limit: u32,
    offset: u32,
    filter: FilterType,
    max_limit: u32,
) -> Result<QueryString, ApiError> {
    if !(1..=max_limit).contains(&limit) {
        return Err(ApiError::OutOfRange {
            name: "limit",
            message: format!("transaction limit must be greater than 0 and at most {max_limit}"),
        });
    }
    let mut query = QueryString::new();
    query.add("limit", limit)?;
    query.add("offset", offset)?;
    query.add("filter", filter as i32)?;
    query.add("format", "json")?;
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_query_rejects_out_of_range_limits() {
        for limit in [0, MAX_TRANSACTIONS_PER_REQUEST + 1] {
            let err = transaction_page_query(
                limit,
                0,
                FilterType::RemoveUnspendable,
                MAX_TRANSACTIONS_PER_REQUEST,
            )
            .unwrap_err();
            assert!(matches!(err, ApiError::OutOfRange { name: "limit", .. }));
        }
    }

    #[test]
    fn page_query_encodes_filter_as_service_code() {
        let query =
            transaction_page_query(50, 10, FilterType::ConfirmedOnly, MAX_TRANSACTIONS_PER_REQUEST)
                .unwrap();
        assert_eq!(query.to_string(), "?limit=50&offset=10&filter=5&format=json");
    }
}
