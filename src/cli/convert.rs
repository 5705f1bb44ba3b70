use anyhow::{Result, bail};
use tracing::debug;

use crate::cli::ui::{self, StyleType};
use crate::core::converter::Converter;
use crate::core::currency::Currency;
use crate::core::refresh::{CONNECTIVITY_ERROR, RefreshEngine};

/// Converts an amount once and prints the result with a weekly trend.
pub async fn run(
    engine: &RefreshEngine,
    amount: &str,
    from: &'static Currency,
    to: &'static Currency,
) -> Result<()> {
    let mut converter = Converter::new(amount, from, to);
    let Some(request) = converter.begin_refresh() else {
        bail!("'{}' is not a positive amount", amount);
    };

    let spinner = ui::new_spinner("Fetching latest rates...");
    let result = engine.refresh(&request).await;
    spinner.finish_and_clear();

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            println!("{}", ui::style_text(CONNECTIVITY_ERROR, StyleType::Error));
            return Err(e);
        }
    };
    // one-shot flow, the snapshot is always current
    converter.reconcile(&request, outcome.converted);
    debug!(rate = converter.rate(), "Reconciled one-shot conversion");

    println!(
        "{} {} {} = {}",
        from.flag_emoji(),
        converter.amount_text(),
        from.code,
        ui::style_text(
            &format!("{} {:.2} {}", to.flag_emoji(), converter.converted(), to.code),
            StyleType::Value
        )
    );
    println!(
        "{}",
        ui::style_text(&outcome.summary.rate_text, StyleType::Subtle)
    );
    println!(
        "{}",
        ui::style_text(&outcome.summary.explanation, StyleType::Subtle)
    );
    for source in &outcome.summary.sources {
        let line = format!("Source: {} <{}>", source.title, source.url);
        println!("{}", ui::style_text(&line, StyleType::Subtle));
    }

    ui::print_separator();
    println!(
        "{}",
        ui::style_text(
            &format!("Weekly trend, {} to {}", from.code, to.code),
            StyleType::Title
        )
    );
    println!("{}", ui::trend_table(&outcome.trend));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency;
    use crate::core::rates::{
        HistoryPoint, HistoryProvider, LatestRateProvider, LatestRates, SourceRef,
    };
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;

    struct StubLatest;

    #[async_trait]
    impl LatestRateProvider for StubLatest {
        async fn latest(&self, _base: &str) -> Result<LatestRates> {
            let mut rates = HashMap::new();
            rates.insert("IDR".to_string(), 15800.0);
            Ok(LatestRates { rates, as_of: None })
        }

        fn source(&self) -> SourceRef {
            SourceRef {
                title: "Stub".to_string(),
                url: "http://localhost".to_string(),
            }
        }
    }

    struct StubHistory;

    #[async_trait]
    impl HistoryProvider for StubHistory {
        fn supports_pair(&self, _from: &str, _to: &str) -> bool {
            false
        }

        async fn history(&self, _from: &str, _to: &str, _days: u32) -> Result<Vec<HistoryPoint>> {
            Ok(Vec::new())
        }
    }

    fn engine() -> RefreshEngine {
        RefreshEngine::new(Arc::new(StubLatest), Arc::new(StubHistory))
    }

    #[tokio::test]
    async fn test_run_prints_conversion() {
        let usd = currency::find_or_default("USD");
        let idr = currency::find_or_default("IDR");
        assert!(run(&engine(), "10", usd, idr).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_rejects_non_positive_amount() {
        let usd = currency::find_or_default("USD");
        let idr = currency::find_or_default("IDR");

        let result = run(&engine(), "0", usd, idr).await;
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().to_string(), "'0' is not a positive amount");

        assert!(run(&engine(), "abc", usd, idr).await.is_err());
    }
}
