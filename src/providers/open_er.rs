use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::rates::{LatestRateProvider, LatestRates, SourceRef};
use crate::providers::util::with_retry;

pub const DEFAULT_BASE_URL: &str = "https://open.er-api.com";

/// Latest-rates provider backed by the open.er-api.com service.
pub struct OpenErApiProvider {
    base_url: String,
}

impl OpenErApiProvider {
    pub fn new(base_url: &str) -> Self {
        OpenErApiProvider {
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenErApiResponse {
    rates: HashMap<String, f64>,
    /// RFC 2822 timestamp, e.g. "Sat, 03 Feb 2024 00:02:31 +0000".
    time_last_update_utc: Option<String>,
}

#[async_trait]
impl LatestRateProvider for OpenErApiProvider {
    #[instrument(
        name = "LatestRatesFetch",
        skip(self),
        fields(base = %base)
    )]
    async fn latest(&self, base: &str) -> Result<LatestRates> {
        let url = format!("{}/v6/latest/{}", self.base_url, base);
        debug!("Requesting latest rates from {}", url);

        let client = reqwest::Client::builder().user_agent("kurs/0.2").build()?;
        let response = with_retry(|| client.get(&url).send(), 2, 500)
            .await
            .map_err(|e| anyhow!("Request error: {} for base currency: {}", e, base))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for base currency: {}",
                response.status(),
                base
            ));
        }

        let text = response.text().await?;
        let data: OpenErApiResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse rates response for {}: {}", base, e))?;

        // unparseable timestamps degrade to "recently", not an error
        let as_of = data
            .time_last_update_utc
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc2822(raw).ok())
            .map(|t| t.with_timezone(&Utc));

        debug!(rates = data.rates.len(), ?as_of, "Received rate table");
        Ok(LatestRates {
            rates: data.rates,
            as_of,
        })
    }

    fn source(&self) -> SourceRef {
        SourceRef {
            title: "Open Exchange Rates".to_string(),
            url: "https://open.er-api.com".to_string(),
        }
    }
}
