//! Rate provider abstractions

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;

/// Rounds to two decimal places, the precision shown for converted amounts.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A snapshot of rates for one base currency.
#[derive(Debug, Clone)]
pub struct LatestRates {
    /// Quote currency code to rate in units of quote per one base unit.
    pub rates: HashMap<String, f64>,
    /// Publication time reported by the provider, when it could be parsed.
    pub as_of: Option<DateTime<Utc>>,
}

impl LatestRates {
    /// Rate for `code`, treating zero and negative quotes as unavailable.
    pub fn rate_for(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied().filter(|rate| *rate > 0.0)
    }
}

/// One closing rate in a historical series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub rate: f64,
}

/// Attribution for a rate source, shown alongside results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    pub title: String,
    pub url: String,
}

/// Human-readable context for a refreshed rate.
#[derive(Debug, Clone)]
pub struct MarketSummary {
    pub rate_text: String,
    pub explanation: String,
    pub sources: Vec<SourceRef>,
}

#[async_trait]
pub trait LatestRateProvider: Send + Sync {
    /// Fetches the current rate table for `base`.
    async fn latest(&self, base: &str) -> Result<LatestRates>;

    /// Attribution for this provider's data.
    fn source(&self) -> SourceRef;
}

#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Whether this provider publishes history for the pair. Callers skip
    /// the lookup entirely for unsupported pairs.
    fn supports_pair(&self, from: &str, to: &str) -> bool;

    /// Daily closing rates for the pair covering roughly the last `days`
    /// days, oldest first. May return fewer points than requested around
    /// weekends and holidays.
    async fn history(&self, from: &str, to: &str, days: u32) -> Result<Vec<HistoryPoint>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(158000.0), 158000.0);
        assert_eq!(round2(39500.004), 39500.0);
        assert_eq!(round2(0.125), 0.13);
    }

    #[test]
    fn test_rate_for_ignores_non_positive_quotes() {
        let mut rates = HashMap::new();
        rates.insert("IDR".to_string(), 15800.0);
        rates.insert("XAU".to_string(), 0.0);
        let latest = LatestRates { rates, as_of: None };

        assert_eq!(latest.rate_for("IDR"), Some(15800.0));
        assert_eq!(latest.rate_for("XAU"), None);
        assert_eq!(latest.rate_for("EUR"), None);
    }
}
