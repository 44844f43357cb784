//! Apple top-podcasts feed provider
//!
//! Reads the public JSON top-100 chart for one genre. No credentials are
//! needed; every entry is tagged with the source's fixed categories.

use crate::{
    error::{AppError, AppResult},
    models::{ItunesFeedResponse, PodcastRecord},
    services::providers::{CatalogSource, USER_AGENT},
};
use reqwest::Client as HttpClient;
use std::time::Duration;

const SOURCE_NAME: &str = "iTunes";

#[derive(Clone)]
pub struct ItunesSource {
    http_client: HttpClient,
    feed_url: String,
    categories: Vec<String>,
}

impl ItunesSource {
    /// Creates a source whose requests give up after `timeout`
    pub fn new(feed_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http_client,
            feed_url,
            categories: vec!["Business".to_string(), "Top Rated".to_string()],
        })
    }

    fn convert_feed(&self, feed: ItunesFeedResponse) -> Vec<PodcastRecord> {
        feed.feed
            .entry
            .into_iter()
            .map(|entry| entry.into_record(SOURCE_NAME, &self.categories))
            .filter(|record| !record.title.trim().is_empty())
            .collect()
    }

    fn unavailable(reason: impl Into<String>) -> AppError {
        AppError::SourceUnavailable {
            source_name: SOURCE_NAME.to_string(),
            reason: reason.into(),
        }
    }
}

#[async_trait::async_trait]
impl CatalogSource for ItunesSource {
    async fn fetch_candidates(&self) -> AppResult<Vec<PodcastRecord>> {
        let response = self
            .http_client
            .get(&self.feed_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| Self::unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::unavailable(format!("feed returned status {}", status)));
        }

        let feed: ItunesFeedResponse = response
            .json()
            .await
            .map_err(|e| Self::unavailable(format!("unparseable feed: {}", e)))?;
        let podcasts = self.convert_feed(feed);

        tracing::info!(
            podcasts = podcasts.len(),
            provider = SOURCE_NAME,
            "Catalog feed fetched"
        );

        Ok(podcasts)
    }

    fn name(&self) -> &'static str {
        SOURCE_NAME
    }
}
