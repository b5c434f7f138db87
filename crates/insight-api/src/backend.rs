use async_trait::async_trait;
use serde::Serialize;

use insight_model::{FeedbackAggregate, FeedbackReceipt, Rating, ResponseRecord};

/// Body of a feedback submission.
///
/// `comment` is omitted from the JSON entirely when `None`; the backend
/// treats an absent comment as "keep whatever was stored before".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackRequest {
    pub user_id: String,
    pub query_id: String,
    pub response_id: String,
    pub rating: Rating,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// The answer-generation service, one method per endpoint.
///
/// All calls are single-shot: no retry, no timeout, no cancellation below
/// this level.  Retries are user-initiated by repeating the action.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Generate an answer for a new (or repeated) question.
    async fn create_response(&self, query: &str, user_id: &str)
        -> anyhow::Result<ResponseRecord>;

    /// Fetch the full history of initial responses, most recent first.
    async fn list_history(&self) -> anyhow::Result<Vec<ResponseRecord>>;

    /// Regenerate the answer for an existing response identity.  The returned
    /// record shares `response_id` with the original but has a new timestamp.
    async fn revalidate(&self, response_id: &str) -> anyhow::Result<ResponseRecord>;

    /// Fetch all regenerated versions of one response, oldest first.
    async fn version_history(&self, response_id: &str)
        -> anyhow::Result<Vec<ResponseRecord>>;

    /// Store or overwrite the user's rating (and optional comment).
    async fn submit_feedback(&self, req: FeedbackRequest) -> anyhow::Result<FeedbackReceipt>;

    /// Fetch the server-wide like/dislike counts for one response.
    async fn feedback_aggregate(&self, response_id: &str)
        -> anyhow::Result<FeedbackAggregate>;
}
