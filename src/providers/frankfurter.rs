use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument};

use crate::core::rates::{HistoryPoint, HistoryProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.frankfurter.app";

/// Currencies the frankfurter.app timeseries API publishes. Pairs outside
/// this set are reported as unsupported instead of queried.
const SUPPORTED_CODES: &[&str] = &[
    "AUD", "BGN", "BRL", "CAD", "CHF", "CNY", "CZK", "DKK", "EUR", "GBP", "HKD", "HUF", "IDR",
    "ILS", "INR", "ISK", "JPY", "KRW", "MXN", "MYR", "NOK", "NZD", "PHP", "PLN", "RON", "SEK",
    "SGD", "THB", "TRY", "USD", "ZAR",
];

/// Historical-rates provider backed by the frankfurter.app service.
pub struct FrankfurterProvider {
    base_url: String,
}

impl FrankfurterProvider {
    pub fn new(base_url: &str) -> Self {
        FrankfurterProvider {
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FrankfurterResponse {
    /// ISO date to quote-currency rates. ISO date keys sort
    /// chronologically, so iteration is oldest first.
    rates: BTreeMap<String, HashMap<String, f64>>,
}

#[async_trait]
impl HistoryProvider for FrankfurterProvider {
    fn supports_pair(&self, from: &str, to: &str) -> bool {
        SUPPORTED_CODES.contains(&from) && SUPPORTED_CODES.contains(&to)
    }

    #[instrument(
        name = "RateHistoryFetch",
        skip(self),
        fields(from = %from, to = %to)
    )]
    async fn history(&self, from: &str, to: &str, days: u32) -> Result<Vec<HistoryPoint>> {
        // one spare day so weekends at the range edge still yield enough points
        let end = Utc::now().date_naive();
        let start = end - Duration::days(i64::from(days) + 1);
        let url = format!(
            "{}/{}..{}?from={}&to={}",
            self.base_url,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
            from,
            to
        );
        debug!("Requesting rate history from {}", url);

        let client = reqwest::Client::builder().user_agent("kurs/0.2").build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for pair: {}/{}", e, from, to))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for pair: {}/{}",
                response.status(),
                from,
                to
            ));
        }

        let text = response.text().await?;
        let data: FrankfurterResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse history response for {}/{}: {}", from, to, e))?;

        let points: Vec<HistoryPoint> = data
            .rates
            .into_iter()
            .filter_map(|(date, quotes)| {
                let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").ok()?;
                let rate = quotes.get(to).copied()?;
                Some(HistoryPoint { date, rate })
            })
            .collect();

        debug!(points = points.len(), "Received rate history");
        Ok(points)
    }
}
