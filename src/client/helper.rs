use std::sync::Arc;

use url::Url;

use super::error::ApiError;
use super::http_client::BlockchainHttpClient;
use crate::explorer::{
    BalanceUpdateExplorer, BlockExplorer, ExchangeRateExplorer, ReceiveExplorer,
    StatisticsExplorer, TransactionPusher, Wallet, WalletCreator,
};

const BASE_URL: &str = "https://blockchain.info/";
const STATISTICS_URL: &str = "https://api.blockchain.info/";
const RECEIVE_URL: &str = "https://api.blockchain.info/v2/";

/// One handle over every explorer, sharing a transport per API host.
///
/// The main host serves the block, exchange-rate and broadcast endpoints;
/// statistics and the v2 receive endpoints each live on their own host. A
/// wallet-service URL is optional and only needed for the `merchant/{id}/*`
/// and wallet-creation operations. An API code given at construction is
/// propagated to every owned transport. Dropping the helper releases all of
/// them.
pub struct BlockchainApiHelper {
    pub block_explorer: BlockExplorer,
    pub exchange_rate_explorer: ExchangeRateExplorer,
    pub statistics_explorer: StatisticsExplorer,
    pub transaction_pusher: TransactionPusher,
    pub receive_explorer: ReceiveExplorer,
    pub balance_update_explorer: BalanceUpdateExplorer,
    service_http: Option<Arc<BlockchainHttpClient>>,
}

impl BlockchainApiHelper {
    /// Creates a helper over the public API hosts, optionally pointing at
    /// a local wallet service.
    pub fn new(api_code: Option<String>, service_url: Option<Url>) -> Result<Self, ApiError> {
        let base = Url::parse(BASE_URL)?;
        let statistics = Url::parse(STATISTICS_URL)?;
        let receive = Url::parse(RECEIVE_URL)?;
        Self::with_urls(api_code, base, statistics, receive, service_url)
    }

    /// Creates a helper with explicit hosts. Used to target mirrors or
    /// test servers.
    pub fn with_urls(
        api_code: Option<String>,
        base_url: Url,
        statistics_url: Url,
        receive_url: Url,
        service_url: Option<Url>,
    ) -> Result<Self, ApiError> {
        let base = Arc::new(BlockchainHttpClient::with_api_code(
            base_url,
            api_code.clone(),
        )?);
        let statistics = Arc::new(BlockchainHttpClient::with_api_code(
            statistics_url,
            api_code.clone(),
        )?);
        let receive = Arc::new(BlockchainHttpClient::with_api_code(
            receive_url,
            api_code.clone(),
        )?);
        let service_http = service_url
            .map(|url| BlockchainHttpClient::with_api_code(url, api_code))
            .transpose()?
            .map(Arc::new);

        Ok(Self {
            block_explorer: BlockExplorer::new(base.clone()),
            exchange_rate_explorer: ExchangeRateExplorer::new(base.clone()),
            statistics_explorer: StatisticsExplorer::new(statistics),
            transaction_pusher: TransactionPusher::new(base),
            receive_explorer: ReceiveExplorer::new(receive.clone()),
            balance_update_explorer: BalanceUpdateExplorer::new(receive),
            service_http,
        })
    }

    /// Opens an existing service wallet by identifier and password.
    pub fn initialize_wallet(
        &self,
        identifier: String,
        password: String,
        second_password: Option<String>,
    ) -> Result<Wallet, ApiError> {
        let Some(http) = &self.service_http else {
            return Err(ApiError::MissingArgument("service_url"));
        };
        Ok(Wallet::new(
            http.clone(),
            identifier,
            password,
            second_password,
        ))
    }

    /// Gets a wallet creator bound to the configured wallet service.
    pub fn wallet_creator(&self) -> Result<WalletCreator, ApiError> {
        let Some(http) = &self.service_http else {
            return Err(ApiError::MissingArgument("service_url"));
        };
        Ok(WalletCreator::new(http.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_operations_need_a_service_url() {
        let helper = BlockchainApiHelper::new(None, None).unwrap();
        let err = helper
            .initialize_wallet("id".to_string(), "pw".to_string(), None)
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingArgument("service_url")));
        assert!(helper.wallet_creator().is_err());
    }

    #[test]
    fn service_url_enables_wallet_operations() {
        let service = Url::parse("http://127.0.0.1:3000").unwrap();
        let helper = BlockchainApiHelper::new(Some("code".to_string()), Some(service)).unwrap();
        assert!(helper.wallet_creator().is_ok());
        let wallet = helper
            .initialize_wallet("id".to_string(), "pw".to_string(), None)
            .unwrap();
        assert_eq!(wallet.identifier(), "id");
    }
}
