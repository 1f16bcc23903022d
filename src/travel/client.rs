//! Client for the travel-data endpoint.
//!
//! - `DistanceClient` is the seam the pricing engine depends on.
//! - `HttpDistanceClient` calls `GET {base}/travel-data` and caches
//!   successful lookups in the shared moka cache.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Url};
use thiserror::Error;
use tracing::debug;

use crate::cache::AppCache;

use super::models::TravelData;

const USER_AGENT: &str = concat!("actbook-pricing/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum TravelClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("base URL cannot carry a path: {0}")]
    InvalidBase(String),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("travel api returned status {0}")]
    Status(u16),
    #[error("travel api returned invalid JSON: {0}")]
    Decode(String),
    #[error("malformed travel data: {0}")]
    Malformed(&'static str),
}

/// Round-trip travel lookup between a member and the venue.
#[async_trait]
pub trait DistanceClient: Send + Sync {
    async fn travel_data(
        &self,
        origin: &str,
        destination: &str,
        date: NaiveDate,
    ) -> Result<TravelData, TravelClientError>;
}

#[derive(Clone)]
pub struct HttpDistanceClient {
    http: Client,
    base_url: Url,
    cache: AppCache,
}

impl HttpDistanceClient {
    pub fn new(base: &str, timeout: Duration, cache: AppCache) -> Result<Self, TravelClientError> {
        let base_url = Url::parse(base)?;
        if base_url.cannot_be_a_base() {
            return Err(TravelClientError::InvalidBase(base.to_string()));
        }
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url,
            cache,
        })
    }

    /// `{base}/travel-data?origin=&destination=&date=YYYY-MM-DD`
    pub fn endpoint(
        &self,
        origin: &str,
        destination: &str,
        date: NaiveDate,
    ) -> Result<Url, TravelClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TravelClientError::InvalidBase(self.base_url.to_string()))?
            .pop_if_empty()
            .push("travel-data");
        url.query_pairs_mut()
            .append_pair("origin", origin)
            .append_pair("destination", destination)
            .append_pair("date", &date.format("%Y-%m-%d").to_string());
        Ok(url)
    }

    async fn fetch(&self, url: Url) -> Result<TravelData, TravelClientError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TravelClientError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let payload: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| TravelClientError::Decode(e.to_string()))?;
        TravelData::from_json(&payload)
    }
}

#[async_trait]
impl DistanceClient for HttpDistanceClient {
    async fn travel_data(
        &self,
        origin: &str,
        destination: &str,
        date: NaiveDate,
    ) -> Result<TravelData, TravelClientError> {
        let cache_key = AppCache::travel_key(origin, destination, date);
        if let Some(cached) = self.cache.travel.get(&cache_key).await {
            debug!("Cache HIT for travel data: {}", cache_key);
            return Ok((*cached).clone());
        }
        debug!("Cache MISS for travel data: {}", cache_key);

        let url = self.endpoint(origin, destination, date)?;
        let data = self.fetch(url).await?;

        self.cache
            .travel
            .insert(cache_key, Arc::new(data.clone()))
            .await;

        Ok(data)
    }
}
