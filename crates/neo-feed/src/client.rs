//! HTTP client for the NeoWs `feed` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use neo_core::config::FeedConfig;
use reqwest::Client;
use serde_json::Value;

use crate::error::FetchError;

/// Source of raw feed JSON for a single date.
///
/// The date is sent as both the start and the end of the range.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_feed(&self, date: NaiveDate) -> Result<Value, FetchError>;
}

/// [`FeedSource`] backed by the public NeoWs REST API.
///
/// One request per call; no caching and no retries.
#[derive(Clone)]
pub struct NeoWsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NeoWsClient {
    pub fn new(config: &FeedConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn feed_url(&self) -> String {
        format!("{}/feed", self.base_url)
    }
}

#[async_trait]
impl FeedSource for NeoWsClient {
    async fn fetch_feed(&self, date: NaiveDate) -> Result<Value, FetchError> {
        let day = date.format("%Y-%m-%d").to_string();
        tracing::debug!(date = %day, url = %self.feed_url(), "Fetching NeoWs feed");

        let response = self
            .client
            .get(self.feed_url())
            .query(&[
                ("start_date", day.as_str()),
                ("end_date", day.as_str()),
                ("detailed", "false"),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}
