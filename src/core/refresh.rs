//! Authoritative refresh of a conversion.
//!
//! One refresh answers everything the view needs for a pair: the converted
//! amount, the effective rate, a weekly trend and a short market summary.
//! The latest rate is load-bearing and its failure fails the refresh; the
//! trend is decoration and quietly falls back to a synthesized series.

use crate::core::converter::RefreshRequest;
use crate::core::rates::{HistoryProvider, LatestRateProvider, MarketSummary, round2};
use crate::core::trend::{self, TREND_DAYS, TrendPoint};
use anyhow::{Result, anyhow};
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

/// The one user-facing message for any failure to obtain a rate.
pub const CONNECTIVITY_ERROR: &str =
    "Unable to reach the exchange-rate service. Check your connection and try again.";

/// Everything a completed refresh produced.
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub converted: f64,
    pub rate: f64,
    pub trend: Vec<TrendPoint>,
    pub summary: MarketSummary,
}

pub struct RefreshEngine {
    latest: Arc<dyn LatestRateProvider>,
    history: Arc<dyn HistoryProvider>,
}

impl RefreshEngine {
    pub fn new(latest: Arc<dyn LatestRateProvider>, history: Arc<dyn HistoryProvider>) -> Self {
        RefreshEngine { latest, history }
    }

    /// Fetches the latest rate and the weekly history concurrently and
    /// combines them. Fails only when no usable rate exists for the pair;
    /// any history problem synthesizes a trend around the latest rate
    /// instead.
    pub async fn refresh(&self, request: &RefreshRequest) -> Result<RefreshOutcome> {
        let from = request.from.code;
        let to = request.to.code;

        let latest_fut = self.latest.latest(from);
        let history_fut = async {
            if self.history.supports_pair(from, to) {
                self.history.history(from, to, TREND_DAYS as u32).await
            } else {
                debug!(from, to, "Pair not covered by history provider");
                Ok(Vec::new())
            }
        };
        let (latest_result, history_result) = futures::join!(latest_fut, history_fut);

        let latest = latest_result?;
        let rate = latest
            .rate_for(to)
            .ok_or_else(|| anyhow!("No rate found for pair: {}/{}", from, to))?;
        let converted = round2(request.amount * rate);

        let trend = match history_result {
            Ok(points) if !points.is_empty() => trend::from_history(&points),
            Ok(_) => {
                debug!(from, to, "History is empty, synthesizing trend");
                trend::synthesize(rate, Utc::now().date_naive(), &mut rand::thread_rng())
            }
            Err(e) => {
                debug!(error = %e, from, to, "History lookup failed, synthesizing trend");
                trend::synthesize(rate, Utc::now().date_naive(), &mut rand::thread_rng())
            }
        };

        let updated = latest
            .as_of
            .map(|t| t.format("%d %b %Y, %H:%M UTC").to_string())
            .unwrap_or_else(|| "recently".to_string());
        let source = self.latest.source();
        let summary = MarketSummary {
            rate_text: format!("1 {} = {:.4} {}", from, rate, to),
            explanation: format!(
                "Mid-market rates published by {}. Last updated: {}.",
                source.title, updated
            ),
            sources: vec![source],
        };

        debug!(from, to, rate, converted, "Refresh complete");
        Ok(RefreshOutcome {
            converted,
            rate,
            trend,
            summary,
        })
    }
}
