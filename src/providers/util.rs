use anyhow::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Runs an async request, retrying transport failures.
///
/// Makes up to `retries` attempts with `delay_ms` between them, then one
/// final attempt whose error is returned as-is. Total runs are
/// `retries + 1`.
pub async fn with_retry<F, Fut, T>(mut operation: F, retries: usize, delay_ms: u64) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, reqwest::Error>>,
{
    for attempt in 1..=retries {
        match operation().await {
            Ok(val) => return Ok(val),
            Err(err) => {
                debug!(
                    "Attempt {}/{} failed: {}. Retrying...",
                    attempt,
                    retries + 1,
                    err
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
    operation().await.map_err(Error::from)
}
