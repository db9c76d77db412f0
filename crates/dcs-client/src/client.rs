//! Chart source HTTP client.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{StatusCode, Url};

use dcs_audit::AuditRecord;
use dcs_model::RawChartRow;

use crate::error::{ClientError, Result};
use crate::feed::Feed;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("dental-chart-studio/", env!("CARGO_PKG_VERSION"));

/// Longest error body kept in [`ClientError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// Client for the row feeds and audit history of the practice server.
#[derive(Debug, Clone)]
pub struct ChartSourceClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ChartSourceClient {
    /// Creates a client for the server at `base_url` (http or https).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let invalid = |reason: &str| ClientError::InvalidUrl {
            url: base_url.to_string(),
            reason: reason.to_string(),
        };

        let base_url = Url::parse(base_url).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if base_url.cannot_be_a_base() {
            return Err(invalid("URL cannot be a base"));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches one feed for a patient.
    pub async fn fetch_feed(&self, patient_id: &str, feed: Feed) -> Result<Vec<RawChartRow>> {
        let url = self.endpoint(&["api", "patients", patient_id, feed.path()])?;
        tracing::debug!(feed = %feed, "fetching chart rows");

        let response = self.client.get(url.clone()).send().await?;
        let body = Self::handle_response(response).await?;
        let rows = dcs_ingest::read_json_rows(&body, url.path())?;

        tracing::debug!(feed = %feed, rows = rows.len(), "fetched chart rows");
        Ok(rows)
    }

    /// Fetches every feed concurrently and concatenates them in [`Feed::all`] order.
    ///
    /// Fails as soon as any feed fails.
    pub async fn fetch_all(&self, patient_id: &str) -> Result<Vec<RawChartRow>> {
        let (procedures, plan, legacy) = tokio::try_join!(
            self.fetch_feed(patient_id, Feed::Procedures),
            self.fetch_feed(patient_id, Feed::TreatmentPlan),
            self.fetch_feed(patient_id, Feed::LegacyImport),
        )?;

        let mut rows = procedures;
        rows.extend(plan);
        rows.extend(legacy);
        Ok(rows)
    }

    /// Fetches the audit history of one entity.
    ///
    /// Records with an incomplete before/after pair are rejected as a decode error.
    pub async fn fetch_audit(
        &self,
        entity_type: &str,
        entity_id: &str,
    ) -> Result<Vec<AuditRecord>> {
        let mut url = self.endpoint(&["api", "audit"])?;
        url.query_pairs_mut()
            .append_pair("entity_type", entity_type)
            .append_pair("entity_id", entity_id);
        tracing::debug!(entity_type, "fetching audit history");

        let response = self.client.get(url).send().await?;
        let body = Self::handle_response(response).await?;
        let records: Vec<AuditRecord> = serde_json::from_str(&body)?;
        Ok(records)
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Checks the status and returns the body text.
    async fn handle_response(response: reqwest::Response) -> Result<String> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: String::new(),
            });
        }

        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|index| body.is_char_boundary(*index))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }
}
