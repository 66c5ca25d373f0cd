use std::collections::HashMap;
use std::sync::Arc;

use crate::client::{ApiError, BlockchainHttpClient, QueryString};
use crate::models::{BitcoinValue, Currency};

/// Converts between bitcoin and fiat currencies at current market rates.
#[derive(Debug, Clone)]
pub struct ExchangeRateExplorer {
    http: Arc<BlockchainHttpClient>,
}

impl ExchangeRateExplorer {
    pub fn new(http: Arc<BlockchainHttpClient>) -> Self {
        Self { http }
    }

    /// Gets current market prices keyed by currency code.
    pub async fn get_ticker(&self) -> Result<HashMap<String, Currency>, ApiError> {
        self.http.get("ticker", None).await
    }

    /// Converts a bitcoin amount to its current value in `currency`.
    ///
    /// The service replies with a bare decimal number, not a JSON object.
    pub async fn from_btc(&self, btc: BitcoinValue, currency: &str) -> Result<f64, ApiError> {
        if btc <= BitcoinValue::ZERO {
            return Err(ApiError::OutOfRange {
                name: "btc",
                message: "amount must represent a value higher than 0".to_string(),
            });
        }
        let mut query = QueryString::new();
        query.add("currency", currency)?;
        query.add("value", btc.satoshis())?;

        self.http
            .get_with("frombtc", Some(query), parse_plain_number)
            .await
    }

    /// Converts a fiat amount in `currency` to bitcoin.
    pub async fn to_btc(&self, currency: &str, value: f64) -> Result<f64, ApiError> {
        if currency.trim().is_empty() {
            return Err(ApiError::MissingArgument("currency"));
        }
        if value <= 0.0 {
            return Err(ApiError::OutOfRange {
                name: "value",
                message: "value must be greater than 0".to_string(),
            });
        }
        let mut query = QueryString::new();
        query.add("currency", currency)?;
        query.add("value", value)?;

        self.http
            .get_with("tobtc", Some(query), parse_plain_number)
            .await
    }
}

fn parse_plain_number(body: &str) -> Result<f64, ApiError> {
    Ok(serde_json::from_str(body.trim())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_number_bodies_parse() {
        assert_eq!(parse_plain_number("478.68").unwrap(), 478.68);
        assert_eq!(parse_plain_number(" 0.0001\n").unwrap(), 0.0001);
        assert!(parse_plain_number("not a number").is_err());
    }
}
