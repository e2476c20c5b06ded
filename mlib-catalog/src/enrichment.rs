//! Song metadata enrichment client
//!
//! New catalog entries only carry a group and a title; the release date,
//! lyrics and reference link come from an external info service:
//!
//! `GET {API_URL}/info?group=Muse&song=Supermassive%20Black%20Hole`
//!
//! ```json
//! {"releaseDate": "16.07.2006", "text": "Ooh baby...", "link": "https://..."}
//! ```
//!
//! Lookups are never retried.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use mlib_common::time;

const USER_AGENT: &str = concat!("mlib-catalog/", env!("CARGO_PKG_VERSION"));

/// Enrichment client errors
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("Song info not found")]
    NotFound,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Enrichment API returned status {0}")]
    ApiError(u16),

    #[error("Invalid API response: {0}")]
    ParseError(String),

    #[error("Invalid date format from API: {0:?}")]
    InvalidDate(String),
}

/// Metadata attached to a song at creation time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongDetails {
    pub release_date: NaiveDate,
    pub text: String,
    pub link: String,
}

/// Raw `/info` response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongInfoResponse {
    /// `DD.MM.YYYY`
    pub release_date: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub link: String,
}

impl SongInfoResponse {
    pub fn into_details(self) -> Result<SongDetails, EnrichmentError> {
        let release_date = time::parse_enrichment_date(&self.release_date)
            .ok_or(EnrichmentError::InvalidDate(self.release_date))?;

        Ok(SongDetails {
            release_date,
            text: self.text,
            link: self.link,
        })
    }
}

/// Source of song metadata
#[async_trait]
pub trait MetadataEnricher: Send + Sync {
    async fn lookup(&self, group: &str, title: &str) -> Result<SongDetails, EnrichmentError>;
}

/// HTTP implementation backed by the external info service
pub struct HttpEnricher {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpEnricher {
    /// `timeout` of `None` leaves requests unbounded
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, EnrichmentError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| EnrichmentError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MetadataEnricher for HttpEnricher {
    async fn lookup(&self, group: &str, title: &str) -> Result<SongDetails, EnrichmentError> {
        let url = format!("{}/info", self.base_url);
        tracing::debug!(group = %group, song = %title, url = %url, "Querying enrichment API");

        let response = self
            .http_client
            .get(&url)
            .query(&[("group", group), ("song", title)])
            .send()
            .await
            .map_err(|e| EnrichmentError::NetworkError(e.to_string()))?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(EnrichmentError::NotFound);
        }

        if !status.is_success() {
            return Err(EnrichmentError::ApiError(status.as_u16()));
        }

        let info: SongInfoResponse = response
            .json()
            .await
            .map_err(|e| EnrichmentError::ParseError(e.to_string()))?;

        tracing::debug!(release_date = %info.release_date, link = %info.link, "Enrichment API response");

        info.into_details()
    }
}
