use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;
use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::jobs::{self, ArbeitnowResponse, JobFeed, JobListing};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid job feed XML: {0}")]
    Xml(#[from] quick_xml::DeError),
}

pub struct Fetcher {
    client: Client,
    arbeitnow_url: String,
    devitjobs_url: String,
}

impl Fetcher {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent("JobFeeds/1.0 (Job Board Aggregator)")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            arbeitnow_url: config.sources.arbeitnow_url.clone(),
            devitjobs_url: config.sources.devitjobs_url.clone(),
        }
    }

    /// Raw body of the JSON job-board API, for proxying verbatim.
    pub async fn arbeitnow_raw(&self) -> Result<Bytes, FetchError> {
        info!("Fetching job-board API: {}", self.arbeitnow_url);

        let response = self
            .client
            .get(&self.arbeitnow_url)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.bytes().await?)
    }

    /// Listings from the JSON job-board API (the envelope's `data` field).
    pub async fn arbeitnow_listings(&self) -> Result<Vec<JobListing>, FetchError> {
        info!("Fetching job-board API: {}", self.arbeitnow_url);

        let response = self
            .client
            .get(&self.arbeitnow_url)
            .send()
            .await?
            .error_for_status()?;
        let envelope: ArbeitnowResponse = response.json().await?;

        Ok(envelope.data)
    }

    /// The XML job feed, fetched and parsed.
    pub async fn devitjobs_feed(&self) -> Result<JobFeed, FetchError> {
        info!("Fetching job feed: {}", self.devitjobs_url);

        let response = self
            .client
            .get(&self.devitjobs_url)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;

        Ok(jobs::parse_job_feed(&body)?)
    }
}
