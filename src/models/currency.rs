use serde::Deserialize;

/// Market prices for one fiat currency from the `ticker` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Currency {
    pub buy: f64,
    pub sell: f64,
    pub last: f64,
    /// Delayed market price, averaged over the last fifteen minutes.
    #[serde(rename = "15m")]
    pub price_15m: f64,
    pub symbol: String,
}
