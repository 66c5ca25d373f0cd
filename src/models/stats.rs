use serde::Deserialize;

use crate::models::BitcoinValue;

/// Network-wide statistics from the `stats` endpoint.
///
/// Most figures cover the trailing 24 hours.
#[derive(Debug, Clone, Deserialize)]
pub struct StatisticsResponse {
    pub blocks_size: i64,
    #[serde(rename = "n_btc_mined")]
    pub btc_mined: BitcoinValue,
    pub difficulty: f64,
    pub estimated_btc_sent: BitcoinValue,
    pub estimated_transaction_volume_usd: f64,
    pub hash_rate: f64,
    pub market_price_usd: f64,
    #[serde(rename = "n_blocks_mined")]
    pub mined_blocks: i64,
    pub miners_revenue_btc: f64,
    pub miners_revenue_usd: f64,
    pub minutes_between_blocks: f64,
    #[serde(rename = "nextretarget")]
    pub next_retarget: i64,
    #[serde(rename = "n_tx")]
    pub number_of_transactions: i64,
    /// Millisecond timestamp of the snapshot.
    pub timestamp: f64,
    #[serde(rename = "n_blocks_total")]
    pub total_blocks: i64,
    #[serde(rename = "totalbc")]
    pub total_btc: BitcoinValue,
    pub total_btc_sent: BitcoinValue,
    pub total_fees_btc: BitcoinValue,
    pub trade_volume_btc: f64,
    pub trade_volume_usd: f64,
}

/// A named chart and its data points from `charts/{name}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    #[serde(rename = "name")]
    pub chart_name: String,
    pub description: String,
    #[serde(rename = "period")]
    pub timespan: String,
    pub unit: String,
    pub values: Vec<ChartValue>,
}

/// One chart data point. `x` is a unix timestamp in seconds.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ChartValue {
    pub x: f64,
    pub y: f64,
}
