use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::client::{ApiError, BlockchainHttpClient, QueryString};
use crate::models::{
    BitcoinValue, CreateWalletRequest, CreateWalletResponse, PaymentResponse, WalletAddress,
};

/// Operations on one service-hosted wallet via the `merchant/{id}/*`
/// endpoints.
///
/// Requires a local wallet-service instance; the service hosts never expose
/// these routes directly.
#[derive(Debug, Clone)]
pub struct Wallet {
    http: Arc<BlockchainHttpClient>,
    identifier: String,
    password: String,
    second_password: Option<String>,
}

impl Wallet {
    pub fn new(
        http: Arc<BlockchainHttpClient>,
        identifier: String,
        password: String,
        second_password: Option<String>,
    ) -> Self {
        Self {
            http,
            identifier,
            password,
            second_password,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Gets the whole-wallet balance.
    pub async fn get_balance(&self) -> Result<BitcoinValue, ApiError> {
        let query = self.build_basic_query()?;
        let route = format!("merchant/{}/balance", self.identifier);
        self.http
            .get_with(&route, Some(query), |body| {
                let value: Value = serde_json::from_str(body)?;
                let satoshis = value
                    .get("balance")
                    .and_then(Value::as_i64)
                    .unwrap_or_default();
                Ok(BitcoinValue::from_satoshis(satoshis))
            })
            .await
    }

    /// Gets the balance of one address in the wallet.
    pub async fn get_address(&self, address: &str) -> Result<WalletAddress, ApiError> {
        if address.trim().is_empty() {
            return Err(ApiError::MissingArgument("address"));
        }
        let mut query = self.build_basic_query()?;
        query.add("address", address)?;
        let route = format!("merchant/{}/address_balance", self.identifier);
        self.http.get(&route, Some(query)).await
    }

    /// Lists all active addresses in the wallet.
    pub async fn list_addresses(&self) -> Result<Vec<WalletAddress>, ApiError> {
        let query = self.build_basic_query()?;
        let route = format!("merchant/{}/list", self.identifier);
        self.http
            .get_with(&route, Some(query), |body| {
                WalletAddress::many_from_json(body)
            })
            .await
    }

    /// Generates a new address in the wallet, optionally labelled.
    pub async fn new_address(&self, label: Option<&str>) -> Result<WalletAddress, ApiError> {
        let mut query = self.build_basic_query()?;
        if let Some(label) = label {
            query.add("label", label)?;
        }
        let route = format!("merchant/{}/new_address", self.identifier);
        self.http.get(&route, Some(query)).await
    }

    /// Archives an address, hiding it from `list`. Returns the archived
    /// address as echoed by the service.
    pub async fn archive_address(&self, address: &str) -> Result<Option<String>, ApiError> {
        if address.trim().is_empty() {
            return Err(ApiError::MissingArgument("address"));
        }
        let mut query = self.build_basic_query()?;
        query.add("address", address)?;
        let route = format!("merchant/{}/archive_address", self.identifier);
        self.http
            .get_with(&route, Some(query), |body| {
                WalletAddress::archived_from_json(body)
            })
            .await
    }

    /// Restores an archived address.
    pub async fn unarchive_address(&self, address: &str) -> Result<Option<String>, ApiError> {
        if address.trim().is_empty() {
            return Err(ApiError::MissingArgument("address"));
        }
        let mut query = self.build_basic_query()?;
        query.add("address", address)?;
        let route = format!("merchant/{}/unarchive_address", self.identifier);
        self.http
            .get_with(&route, Some(query), |body| {
                WalletAddress::unarchived_from_json(body)
            })
            .await
    }

    /// Sends bitcoin to a single address. Amount and fee travel as
    /// satoshis.
    pub async fn send(
        &self,
        to_address: &str,
        amount: BitcoinValue,
        from_address: Option<&str>,
        fee: Option<BitcoinValue>,
    ) -> Result<PaymentResponse, ApiError> {
        if to_address.trim().is_empty() {
            return Err(ApiError::MissingArgument("to_address"));
        }
        if amount <= BitcoinValue::ZERO {
            return Err(ApiError::OutOfRange {
                name: "amount",
                message: "amount sent must be greater than 0".to_string(),
            });
        }
        let mut query = self.build_basic_query()?;
        query.add("to", to_address)?;
        query.add("amount", amount.satoshis())?;
        if let Some(from_address) = from_address {
            query.add("from", from_address)?;
        }
        if let Some(fee) = fee {
            query.add("fee", fee.satoshis())?;
        }
        let route = format!("merchant/{}/payment", self.identifier);
        self.http.get(&route, Some(query)).await
    }

    /// Sends bitcoin to several recipients in one transaction. The
    /// recipient map is keyed by address.
    pub async fn send_many(
        &self,
        recipients: &HashMap<String, BitcoinValue>,
        from_address: Option<&str>,
        fee: Option<BitcoinValue>,
    ) -> Result<PaymentResponse, ApiError> {
        if recipients.is_empty() {
            return Err(ApiError::MissingArgument("recipients"));
        }
        let mut query = self.build_basic_query()?;
        query.add("recipients", serde_json::to_string(recipients)?)?;
        if let Some(from_address) = from_address {
            query.add("from", from_address)?;
        }
        if let Some(fee) = fee {
            query.add("fee", fee.satoshis())?;
        }
        let route = format!("merchant/{}/sendmany", self.identifier);
        self.http.get(&route, Some(query)).await
    }

    fn build_basic_query(&self) -> Result<QueryString, ApiError> {
        let mut query = QueryString::new();
        query.add("password", &self.password)?;
        if let Some(second_password) = &self.second_password {
            query.add("second_password", second_password)?;
        }
        Ok(query)
    }
}

/// Creates new service-hosted wallets. Requires an API code approved for
/// wallet creation.
#[derive(Debug, Clone)]
pub struct WalletCreator {
    http: Arc<BlockchainHttpClient>,
}

impl WalletCreator {
    pub fn new(http: Arc<BlockchainHttpClient>) -> Self {
        Self { http }
    }

    /// Creates a wallet secured by `password`, optionally importing a
    /// private key.
    pub async fn create(
        &self,
        password: &str,
        private_key: Option<&str>,
        label: Option<&str>,
        email: Option<&str>,
    ) -> Result<CreateWalletResponse, ApiError> {
        if password.trim().is_empty() {
            return Err(ApiError::MissingArgument("password"));
        }
        let Some(api_code) = self.http.api_code() else {
            return Err(ApiError::MissingArgument("api_code"));
        };
        let request = CreateWalletRequest {
            api_code: Some(api_code.to_string()),
            email: email.map(str::to_string),
            label: label.map(str::to_string),
            password: password.to_string(),
            private_key: private_key.map(str::to_string),
        };
        self.http
            .post("api/v2/create/", &request, false, Some("application/json"))
            .await
    }
}
