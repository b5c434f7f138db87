use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Wire types ───────────────────────────────────────────────────────────────

/// A thumbs-up / thumbs-down rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Like,
    Dislike,
}

/// The current user's stored feedback on one response version.
///
/// The history endpoint only echoes the rating back; the comment stays
/// server-side, so `comment` is usually `None` on records read from the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub rating: Rating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// A retrieved source document.
///
/// `id` is the token that appears verbatim inside citation markers.  It is
/// unique only within the owning record's document set, not globally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
}

/// The generated answer body: summary bullets plus supporting facts.
/// Each fact may embed zero or more `[Source: <id>]` citation markers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub summary: Vec<String>,
    pub facts: Vec<String>,
}

/// One generated answer to one query — the unit of history.
///
/// Identified by `(query_id, response_id)`.  `response_id` is the stable
/// identity of "an answer to this query" across revalidations: a regenerated
/// answer shares the id but carries a fresh `timestamp`.
///
/// `docs` is the only valid citation-resolution scope for this record's
/// facts; markers never resolve against another record's documents, even for
/// the same `response_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub query_id: String,
    pub response_id: String,
    pub query: String,
    pub answer: Answer,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub docs: Vec<Document>,
    /// Absent on records from the create-response endpoint, which does not
    /// join against stored feedback.
    #[serde(default)]
    pub feedback: Option<Feedback>,
}

impl ResponseRecord {
    /// Both identifiers present and non-empty (required before submitting
    /// feedback).
    pub fn has_identifiers(&self) -> bool {
        !self.query_id.is_empty() && !self.response_id.is_empty()
    }
}

/// Server-computed like/dislike counts for a response, across all users.
/// Never derived or mutated locally — always replaced by refetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackAggregate {
    pub likes: u64,
    pub dislikes: u64,
}

/// Acknowledgement returned by the feedback endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackReceipt {
    pub status: String,
    pub feedback_id: String,
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_deserializes_backend_shape() {
        let json = r#"{
            "query_id": "q-1",
            "response_id": "r-1",
            "query": "what grew?",
            "answer": { "summary": ["Revenue grew."], "facts": ["Revenue grew [Source: doc-1]."] },
            "timestamp": "2024-06-10T09:00:00Z",
            "docs": [{ "id": "doc-1", "text": "Revenue table." }],
            "feedback": { "rating": "like" }
        }"#;
        let r: ResponseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.response_id, "r-1");
        assert_eq!(r.docs[0].id, "doc-1");
        assert_eq!(r.feedback.as_ref().unwrap().rating, Rating::Like);
        assert!(r.feedback.as_ref().unwrap().comment.is_none());
        assert!(r.has_identifiers());
    }

    #[test]
    fn record_without_feedback_field_defaults_to_none() {
        // The create-response endpoint omits "feedback" entirely.
        let json = r#"{
            "query_id": "q-1",
            "response_id": "r-1",
            "query": "q",
            "answer": { "summary": [], "facts": [] },
            "timestamp": "2024-06-10T09:00:00Z",
            "docs": []
        }"#;
        let r: ResponseRecord = serde_json::from_str(json).unwrap();
        assert!(r.feedback.is_none());
    }

    #[test]
    fn record_with_null_feedback_is_none() {
        let json = r#"{
            "query_id": "q-1",
            "response_id": "r-1",
            "query": "q",
            "answer": { "summary": [], "facts": [] },
            "timestamp": "2024-06-10T09:00:00Z",
            "docs": [],
            "feedback": null
        }"#;
        let r: ResponseRecord = serde_json::from_str(json).unwrap();
        assert!(r.feedback.is_none());
    }

    #[test]
    fn rating_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Rating::Like).unwrap(), r#""like""#);
        assert_eq!(serde_json::to_string(&Rating::Dislike).unwrap(), r#""dislike""#);
    }

    #[test]
    fn missing_identifiers_detected() {
        let json = r#"{
            "query_id": "",
            "response_id": "r-1",
            "query": "q",
            "answer": { "summary": [], "facts": [] },
            "timestamp": "2024-06-10T09:00:00Z",
            "docs": []
        }"#;
        let r: ResponseRecord = serde_json::from_str(json).unwrap();
        assert!(!r.has_identifiers());
    }

    #[test]
    fn aggregate_default_is_zero() {
        let a = FeedbackAggregate::default();
        assert_eq!((a.likes, a.dislikes), (0, 0));
    }
}
