//! HTTP fetching with bounded concurrency and linear-backoff retries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::{debug, warn};

use lore_core::config::RemoteDocsConfig;
use lore_core::errors::{SourceError, SourceResult};

/// Shared HTTP fetcher for the remote corpus.
///
/// A semaphore bounds in-flight requests; each URL is attempted up to
/// `retry_attempts` times with a linearly growing delay between attempts.
/// A URL that stays unreachable resolves to `None` rather than an error,
/// matching the "missing page" and "gave up" cases.
pub struct Fetcher {
    client: reqwest::Client,
    permits: Arc<Semaphore>,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl Fetcher {
    pub fn new(config: &RemoteDocsConfig) -> SourceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| SourceError::Http {
                url: config.base_url.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            permits: Arc::new(Semaphore::new(config.max_concurrent_requests.max(1))),
            retry_attempts: config.retry_attempts.max(1),
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        })
    }

    /// Fetch a URL as text. `Ok(None)` means not found or all attempts
    /// exhausted; transport problems are retried, a 404 is not.
    pub async fn fetch(&self, url: &str) -> SourceResult<Option<String>> {
        let Ok(_permit) = self.permits.acquire().await else {
            return Ok(None);
        };

        for attempt in 1..=self.retry_attempts {
            match self.client.get(url).send().await {
                Ok(response) if response.status().is_success() => {
                    let body = response.text().await.map_err(|e| SourceError::Http {
                        url: url.to_string(),
                        reason: e.to_string(),
                    })?;
                    return Ok(Some(body));
                }
                Ok(response) if response.status() == reqwest::StatusCode::NOT_FOUND => {
                    debug!(url, "document not found");
                    return Ok(None);
                }
                Ok(response) => {
                    warn!(url, status = %response.status(), attempt, "unexpected status");
                }
                Err(e) => {
                    warn!(url, attempt, error = %e, "fetch failed");
                }
            }

            if attempt < self.retry_attempts {
                tokio::time::sleep(self.retry_delay * attempt).await;
            }
        }

        debug!(url, "giving up after {} attempts", self.retry_attempts);
        Ok(None)
    }
}
