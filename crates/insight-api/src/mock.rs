// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use insight_model::{FeedbackAggregate, FeedbackReceipt, ResponseRecord};

use crate::backend::{Backend, FeedbackRequest};

/// One recorded call against a [`ScriptedBackend`].
#[derive(Debug, Clone)]
pub enum BackendCall {
    CreateResponse { query: String, user_id: String },
    ListHistory,
    Revalidate { response_id: String },
    VersionHistory { response_id: String },
    SubmitFeedback(FeedbackRequest),
    FeedbackAggregate { response_id: String },
}

/// A pre-scripted backend for tests.  Each endpoint pops the next canned
/// result from its own queue, and every call is appended to `calls` so tests
/// can assert on exactly what was sent.
///
/// When a queue runs dry, `list_history` falls back to an empty list and
/// `feedback_aggregate` to zero counts (both are fired automatically by the
/// session on unrelated state changes); the remaining endpoints fail, since
/// an unscripted mutation is a test bug.
#[derive(Default)]
pub struct ScriptedBackend {
    create: Mutex<VecDeque<anyhow::Result<ResponseRecord>>>,
    history: Mutex<VecDeque<anyhow::Result<Vec<ResponseRecord>>>>,
    revalidate: Mutex<VecDeque<anyhow::Result<ResponseRecord>>>,
    versions: Mutex<VecDeque<anyhow::Result<Vec<ResponseRecord>>>>,
    feedback: Mutex<VecDeque<anyhow::Result<FeedbackReceipt>>>,
    aggregate: Mutex<VecDeque<anyhow::Result<FeedbackAggregate>>>,
    calls: Mutex<Vec<BackendCall>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_create(&self, result: anyhow::Result<ResponseRecord>) {
        self.create.lock().unwrap().push_back(result);
    }

    pub fn push_history(&self, result: anyhow::Result<Vec<ResponseRecord>>) {
        self.history.lock().unwrap().push_back(result);
    }

    pub fn push_revalidate(&self, result: anyhow::Result<ResponseRecord>) {
        self.revalidate.lock().unwrap().push_back(result);
    }

    pub fn push_versions(&self, result: anyhow::Result<Vec<ResponseRecord>>) {
        self.versions.lock().unwrap().push_back(result);
    }

    pub fn push_feedback(&self, result: anyhow::Result<FeedbackReceipt>) {
        self.feedback.lock().unwrap().push_back(result);
    }

    pub fn push_aggregate(&self, result: anyhow::Result<FeedbackAggregate>) {
        self.aggregate.lock().unwrap().push_back(result);
    }

    /// Snapshot of the recorded call log.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Count of recorded calls matching `pred`.
    pub fn count_calls(&self, pred: impl Fn(&BackendCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn create_response(
        &self,
        query: &str,
        user_id: &str,
    ) -> anyhow::Result<ResponseRecord> {
        self.record(BackendCall::CreateResponse {
            query: query.to_string(),
            user_id: user_id.to_string(),
        });
        self.create
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow::anyhow!("no scripted create_response result")))
    }

    async fn list_history(&self) -> anyhow::Result<Vec<ResponseRecord>> {
        self.record(BackendCall::ListHistory);
        self.history
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn revalidate(&self, response_id: &str) -> anyhow::Result<ResponseRecord> {
        self.record(BackendCall::Revalidate { response_id: response_id.to_string() });
        self.revalidate
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow::anyhow!("no scripted revalidate result")))
    }

    async fn version_history(&self, response_id: &str) -> anyhow::Result<Vec<ResponseRecord>> {
        self.record(BackendCall::VersionHistory { response_id: response_id.to_string() });
        self.versions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow::anyhow!("no scripted version_history result")))
    }

    async fn submit_feedback(&self, req: FeedbackRequest) -> anyhow::Result<FeedbackReceipt> {
        self.record(BackendCall::SubmitFeedback(req));
        self.feedback
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow::anyhow!("no scripted submit_feedback result")))
    }

    async fn feedback_aggregate(&self, response_id: &str) -> anyhow::Result<FeedbackAggregate> {
        self.record(BackendCall::FeedbackAggregate { response_id: response_id.to_string() });
        self.aggregate
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(FeedbackAggregate::default()))
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_results_pop_in_order() {
        let b = ScriptedBackend::new();
        b.push_aggregate(Ok(FeedbackAggregate { likes: 3, dislikes: 1 }));
        b.push_aggregate(Err(anyhow::anyhow!("down")));

        let first = b.feedback_aggregate("r-1").await.unwrap();
        assert_eq!(first.likes, 3);
        assert!(b.feedback_aggregate("r-1").await.is_err());
        // Queue drained: benign fallback.
        assert_eq!(b.feedback_aggregate("r-1").await.unwrap(), FeedbackAggregate::default());
    }

    #[tokio::test]
    async fn calls_are_recorded() {
        let b = ScriptedBackend::new();
        let _ = b.list_history().await;
        let _ = b.revalidate("r-9").await;
        let calls = b.calls();
        assert!(matches!(calls[0], BackendCall::ListHistory));
        assert!(matches!(&calls[1], BackendCall::Revalidate { response_id } if response_id == "r-9"));
    }

    #[tokio::test]
    async fn unscripted_mutation_fails() {
        let b = ScriptedBackend::new();
        assert!(b.create_response("q", "anonymous").await.is_err());
    }
}
