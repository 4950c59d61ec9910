//! REST fetchers for the LG portal endpoints.
//!
//! Wraps the two read endpoints the export flow consumes -- the LG
//! record list and the lifecycle history report -- using [`reqwest`].

use std::time::Duration;

use chrono::NaiveDate;

use lgflow_core::model::{HistoryEvent, LgRecordSummary};
use lgflow_core::types::RecordId;

use crate::config::PortalConfig;
use crate::query::{csv, date_param};
use crate::response::RecordListResponse;

/// Page-size ceiling for the unfiltered record fetch. The portal caps
/// list endpoints, so "all records" is requested as one oversized page.
const RECORD_PAGE_LIMIT: u32 = 9999;

/// HTTP client for the LG portal backend.
pub struct LgPortalApi {
    client: reqwest::Client,
    config: PortalConfig,
}

/// Errors from the portal REST layer.
#[derive(Debug, thiserror::Error)]
pub enum LgApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The portal returned a non-2xx status code.
    #[error("Portal API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl LgPortalApi {
    /// Create a new client for the portal described by `config`.
    pub fn new(config: PortalConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful
    /// for connection pooling across callers).
    pub fn with_client(client: reqwest::Client, config: PortalConfig) -> Self {
        Self { client, config }
    }

    /// Fetch LG summary records.
    ///
    /// Sends `GET /end-user/lg-records/` with the page-size ceiling,
    /// restricted to `ids` when given. Tolerates both the bare-array and
    /// wrapped-object response shapes and normalizes to a list.
    pub async fn fetch_lg_records(
        &self,
        ids: Option<&[RecordId]>,
    ) -> Result<Vec<LgRecordSummary>, LgApiError> {
        let mut url = format!(
            "{}/end-user/lg-records/?skip=0&limit={}",
            self.config.base_url, RECORD_PAGE_LIMIT,
        );
        if let Some(ids) = ids {
            url.push_str("&lg_record_ids=");
            url.push_str(&csv(ids));
        }

        let response: RecordListResponse = self.get_json(&url).await?;
        let records = response.into_records();
        tracing::info!(count = records.len(), "Fetched LG records");
        Ok(records)
    }

    /// Fetch lifecycle history events for the inclusive date range.
    ///
    /// Sends `GET /end-user/reports/lg-lifecycle-history`. When
    /// `action_types` is `None` the filter is omitted and the portal
    /// returns every event type. Event order is whatever the portal
    /// returns; no client-side re-sort is applied.
    pub async fn fetch_lifecycle_history(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        action_types: Option<&[&str]>,
        ids: Option<&[RecordId]>,
    ) -> Result<Vec<HistoryEvent>, LgApiError> {
        let mut url = format!(
            "{}/end-user/reports/lg-lifecycle-history?start_date={}&end_date={}",
            self.config.base_url,
            date_param(start_date),
            date_param(end_date),
        );
        if let Some(codes) = action_types {
            url.push_str("&action_types=");
            url.push_str(&csv(codes));
        }
        if let Some(ids) = ids {
            url.push_str("&lg_record_ids=");
            url.push_str(&csv(ids));
        }

        let events: Vec<HistoryEvent> = self.get_json(&url).await?;
        tracing::info!(
            count = events.len(),
            start = %start_date,
            end = %end_date,
            "Fetched lifecycle history",
        );
        Ok(events)
    }

    // ---- private helpers ----

    /// Issue a GET and parse the JSON body, attaching the bearer token
    /// and per-request timeout from the configuration.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, LgApiError> {
        tracing::debug!(%url, "Portal GET");

        let mut request = self
            .client
            .get(url)
            .timeout(Duration::from_secs(self.config.request_timeout_secs));
        if let Some(token) = &self.config.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`LgApiError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, LgApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(LgApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
