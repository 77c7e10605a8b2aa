//! AssessmentRepository over a Supabase (PostgREST) table.
//!
//! - insert: `POST {url}/rest/v1/{table}` with `Prefer: return=minimal`
//! - list:   `GET {url}/rest/v1/{table}?select=*&order=created_at.desc&limit=N`
//!
//! Every request carries the project key as both `apikey` and bearer token
//! and is bounded by the store timeout.

use crate::dto::AssessmentRow;
use async_trait::async_trait;
use kindred_core::assessment::{AssessmentRecord, AssessmentRepository};
use kindred_core::config::{DEFAULT_STORE_TIMEOUT_SECS, SupabaseConfig};
use kindred_core::error::{KindredError, Result};
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;

pub struct SupabaseAssessmentRepository {
    client: Client,
    base_url: String,
    api_key: String,
    table: String,
    timeout: Duration,
}

impl std::fmt::Debug for SupabaseAssessmentRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseAssessmentRepository")
            .field("base_url", &self.base_url)
            .field("table", &self.table)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl SupabaseAssessmentRepository {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            table: table.into(),
            timeout: Duration::from_secs(DEFAULT_STORE_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_config(config: &SupabaseConfig) -> Result<Self> {
        if config.url.trim().is_empty() || config.api_key.trim().is_empty() {
            return Err(KindredError::config(
                "supabase.url and supabase.api_key must be set in secret.json",
            ));
        }
        Ok(Self::new(&config.url, &config.api_key, config.table_name()))
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .timeout(self.timeout)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn check(response: Response, action: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(KindredError::persistence(format!(
            "{action} failed with HTTP {}: {}",
            status.as_u16(),
            body.trim()
        )))
    }
}

#[async_trait]
impl AssessmentRepository for SupabaseAssessmentRepository {
    async fn insert(&self, record: &AssessmentRecord) -> Result<()> {
        let row = AssessmentRow::from_record(record)?;
        let response = self
            .authorized(self.client.post(self.table_url()))
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await
            .map_err(|e| KindredError::persistence(format!("insert request failed: {e}")))?;

        Self::check(response, "insert").await?;
        tracing::debug!(id = %record.id, table = %self.table, "assessment inserted");
        Ok(())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<AssessmentRecord>> {
        let limit = limit.to_string();
        let response = self
            .authorized(self.client.get(self.table_url()))
            .query(&[
                ("select", "*"),
                ("order", "created_at.desc"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| KindredError::data_access(format!("list request failed: {e}")))?;

        let rows: Vec<AssessmentRow> = Self::check(response, "list")
            .await?
            .json()
            .await
            .map_err(|e| KindredError::data_access(format!("unexpected list response: {e}")))?;

        rows.into_iter().map(AssessmentRecord::try_from).collect()
    }
}
