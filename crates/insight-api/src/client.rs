use anyhow::{bail, Context};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use insight_model::{FeedbackAggregate, FeedbackReceipt, ResponseRecord};

use crate::backend::{Backend, FeedbackRequest};

/// HTTP implementation of [`Backend`] over the service's JSON protocol.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Decode a response body, applying the service error contract: a non-success
/// status is reported via the JSON `error` field when present, otherwise as
/// a generic message carrying the status code.
async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> anyhow::Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        bail!(error_message(status.as_u16(), &body));
    }
    resp.json::<T>().await.context("decoding response body")
}

fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error")?.as_str().map(str::to_string))
        .unwrap_or_else(|| format!("HTTP error, status {status}"))
}

#[async_trait]
impl Backend for HttpBackend {
    async fn create_response(
        &self,
        query: &str,
        user_id: &str,
    ) -> anyhow::Result<ResponseRecord> {
        debug!(query_len = query.len(), "submitting query");
        let resp = self
            .client
            .post(self.url("/query"))
            .json(&json!({ "query": query, "user_id": user_id }))
            .send()
            .await
            .context("query request failed")?;
        handle_response(resp).await
    }

    async fn list_history(&self) -> anyhow::Result<Vec<ResponseRecord>> {
        let resp = self
            .client
            .get(self.url("/history"))
            .send()
            .await
            .context("history request failed")?;
        handle_response(resp).await
    }

    async fn revalidate(&self, response_id: &str) -> anyhow::Result<ResponseRecord> {
        debug!(%response_id, "revalidating response");
        let resp = self
            .client
            .post(self.url("/revalidate"))
            .json(&json!({ "response_id": response_id }))
            .send()
            .await
            .context("revalidate request failed")?;
        handle_response(resp).await
    }

    async fn version_history(&self, response_id: &str) -> anyhow::Result<Vec<ResponseRecord>> {
        let resp = self
            .client
            .get(self.url(&format!("/responses/{response_id}/history")))
            .send()
            .await
            .context("version history request failed")?;
        handle_response(resp).await
    }

    async fn submit_feedback(&self, req: FeedbackRequest) -> anyhow::Result<FeedbackReceipt> {
        debug!(response_id = %req.response_id, "submitting feedback");
        let resp = self
            .client
            .post(self.url("/feedback"))
            .json(&req)
            .send()
            .await
            .context("feedback request failed")?;
        handle_response(resp).await
    }

    async fn feedback_aggregate(&self, response_id: &str) -> anyhow::Result<FeedbackAggregate> {
        let resp = self
            .client
            .get(self.url("/feedback/aggregate"))
            .query(&[("response_id", response_id)])
            .send()
            .await
            .context("aggregate request failed")?;
        handle_response(resp).await
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
