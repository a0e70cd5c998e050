///! NASA NeoWs client for fetching asteroid records
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::types::RawCatalogRecord;
use crate::config::CatalogConfig;
use crate::error::FetchError;

/// Upper bound on a single backoff sleep
const MAX_RETRY_DELAY: Duration = Duration::from_secs(60 * 60);

/// Source of raw catalog records, one per asset id
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self, asset_id: &str) -> Result<RawCatalogRecord, FetchError>;
}

/// NeoWs lookup client with bounded retry
pub struct NeoWsClient {
    client: Client,
    base_url: String,
    api_key: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl NeoWsClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent("asteroid-prospector/0.1")
            .build()
            .map_err(|e| FetchError::Unavailable(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            max_retries: config.max_retries.max(1),
            retry_delay: config.retry_delay(),
        })
    }

    /// Lookup URL without the API key, safe to log
    fn lookup_url(&self, asset_id: &str) -> String {
        if self.base_url.ends_with('/') {
            format!("{}{}", self.base_url, asset_id)
        } else {
            format!("{}/{}", self.base_url, asset_id)
        }
    }

    /// Linear backoff before retry `attempt + 1`, capped at [`MAX_RETRY_DELAY`]
    fn backoff(&self, attempt: u32) -> Duration {
        self.retry_delay
            .checked_mul(attempt)
            .map_or(MAX_RETRY_DELAY, |delay| delay.min(MAX_RETRY_DELAY))
    }

    /// Single fetch attempt
    async fn fetch_attempt(&self, asset_id: &str) -> Result<RawCatalogRecord, FetchError> {
        let url = format!("{}?api_key={}", self.lookup_url(asset_id), self.api_key);

        // Strip the URL from transport errors, it carries the key.
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                asset_id: asset_id.to_string(),
                source: e.without_url(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                asset_id: asset_id.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Transport {
            asset_id: asset_id.to_string(),
            source: e.without_url(),
        })?;

        serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            asset_id: asset_id.to_string(),
            source: e,
        })
    }
}

#[async_trait]
impl CatalogSource for NeoWsClient {
    async fn fetch(&self, asset_id: &str) -> Result<RawCatalogRecord, FetchError> {
        tracing::debug!("Fetching {}", self.lookup_url(asset_id));

        let mut attempt = 1;
        loop {
            match self.fetch_attempt(asset_id).await {
                Ok(record) => {
                    tracing::debug!(
                        "Fetched {} with {} close approaches",
                        asset_id,
                        record.close_approach_data.len()
                    );
                    return Ok(record);
                }
                Err(e) if attempt >= self.max_retries => {
                    tracing::error!(
                        "Failed to fetch {} after {} attempts: {}",
                        asset_id,
                        self.max_retries,
                        e
                    );
                    return Err(e);
                }
                Err(e) => {
                    tracing::warn!(
                        "Attempt {}/{} failed for {}: {}",
                        attempt,
                        self.max_retries,
                        asset_id,
                        e
                    );
                }
            }

            let delay = self.backoff(attempt);
            tracing::debug!(
                "Retrying {} after {:?} (attempt {}/{})",
                asset_id,
                delay,
                attempt + 1,
                self.max_retries
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> NeoWsClient {
        let config = CatalogConfig {
            base_url: base_url.to_string(),
            api_key: "secret".to_string(),
            max_retries: 1,
            retry_delay_secs: 0,
            ..CatalogConfig::default()
        };
        NeoWsClient::new(&config).unwrap()
    }

    #[test]
    fn test_lookup_url_has_no_key() {
        let with_slash = client("https://api.nasa.gov/neo/rest/v1/neo/");
        assert_eq!(
            with_slash.lookup_url("3542519"),
            "https://api.nasa.gov/neo/rest/v1/neo/3542519"
        );

        let without_slash = client("https://api.nasa.gov/neo/rest/v1/neo");
        let url = without_slash.lookup_url("3542519");
        assert_eq!(url, "https://api.nasa.gov/neo/rest/v1/neo/3542519");
        assert!(!url.contains("secret"));
    }

    #[test]
    fn test_backoff_is_linear_and_capped() {
        let config = CatalogConfig {
            retry_delay_secs: 2,
            ..CatalogConfig::default()
        };
        let client = NeoWsClient::new(&config).unwrap();
        assert_eq!(client.backoff(1), Duration::from_secs(2));
        assert_eq!(client.backoff(3), Duration::from_secs(6));

        let config = CatalogConfig {
            retry_delay_secs: u64::MAX,
            ..CatalogConfig::default()
        };
        let client = NeoWsClient::new(&config).unwrap();
        assert_eq!(client.backoff(2), MAX_RETRY_DELAY);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let client = client("http://127.0.0.1:9/neo/");
        let result = client.fetch("3542519").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    #[ignore] // Requires network connection
    async fn test_fetch_live_record() {
        let client = NeoWsClient::new(&CatalogConfig::default()).unwrap();
        let record = client.fetch("3542519").await.unwrap();
        assert_eq!(record.id.as_deref(), Some("3542519"));
    }
}
