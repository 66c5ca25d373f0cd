use std::collections::HashMap;
use std::sync::Arc;

use crate::client::{ApiError, BlockchainHttpClient, QueryString};
use crate::explorer::server_message_contains;
use crate::models::{ChartResponse, StatisticsResponse};

/// Timespan bounds for the mining pool summary, in days.
const MIN_POOL_TIMESPAN_DAYS: u32 = 1;
const MAX_POOL_TIMESPAN_DAYS: u32 = 10;

/// Queries network statistics and charts. Served by the
/// `api.blockchain.info` host rather than the main one.
#[derive(Debug, Clone)]
pub struct StatisticsExplorer {
    http: Arc<BlockchainHttpClient>,
}

impl StatisticsExplorer {
    pub fn new(http: Arc<BlockchainHttpClient>) -> Self {
        Self { http }
    }

    /// Gets the current network-wide statistics snapshot.
    pub async fn get_stats(&self) -> Result<StatisticsResponse, ApiError> {
        let mut query = QueryString::new();
        query.add("format", "json")?;
        self.http.get("stats", Some(query)).await
    }

    /// Gets a named chart, optionally restricted to a timespan such as
    /// `"5weeks"` and smoothed with a rolling average such as `"8hours"`.
    pub async fn get_chart(
        &self,
        chart_type: &str,
        timespan: Option<&str>,
        rolling_average: Option<&str>,
    ) -> Result<ChartResponse, ApiError> {
        let mut query = QueryString::new();
        query.add("format", "json")?;
        if let Some(timespan) = timespan {
            query.add("timespan", timespan)?;
        }
        if let Some(rolling_average) = rolling_average {
            query.add("rollingAverage", rolling_average)?;
        }

        let result = self
            .http
            .get::<ChartResponse>(&format!("charts/{chart_type}"), Some(query))
            .await;
        result.map_err(|err| {
            if server_message_contains(&err, "No chart with this name")
                || server_message_contains(&err, "Not Found")
            {
                ApiError::OutOfRange {
                    name: "chart_type",
                    message: "this chart name does not exist".to_string(),
                }
            } else if server_message_contains(&err, "Could not parse timestring") {
                ApiError::OutOfRange {
                    name: "timespan",
                    message: "incorrect timespan format".to_string(),
                }
            } else {
                err
            }
        })
    }

    /// Gets blocks-mined counts per pool over the trailing `timespan_days`
    /// days (1 to 10).
    pub async fn get_pools(&self, timespan_days: u32) -> Result<HashMap<String, i32>, ApiError> {
        if !(MIN_POOL_TIMESPAN_DAYS..=MAX_POOL_TIMESPAN_DAYS).contains(&timespan_days) {
            return Err(ApiError::OutOfRange {
                name: "timespan_days",
                message: format!(
                    "timespan must be between {MIN_POOL_TIMESPAN_DAYS} and {MAX_POOL_TIMESPAN_DAYS}"
                ),
            });
        }
        let mut query = QueryString::new();
        query.add("format", "json")?;
        query.add("timespan", format!("{timespan_days}days"))?;
        self.http.get("pools", Some(query)).await
    }
}
