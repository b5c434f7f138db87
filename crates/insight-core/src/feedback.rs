use insight_api::FeedbackRequest;
use insight_model::{FeedbackAggregate, Rating, ResponseRecord};
use tracing::debug;

use crate::error::FeedbackError;

/// Outcome of the last submission attempt for the displayed version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedbackStatus {
    #[default]
    Idle,
    Success,
    Error,
}

/// Per-displayed-version feedback state: the chosen rating, the optional
/// comment draft, the submission status and the server-wide aggregate counts.
///
/// Rating, comment and status are reset whenever the displayed version
/// changes (a version is identified by `(response_id, timestamp)`).  The
/// reset also bumps the submit epoch, so a submission completion that belongs
/// to a previously displayed version can never mark the new one as
/// submitted.  The aggregate counts are keyed by `response_id` alone and
/// survive a reset; the session refetches them when the response id changes
/// or the status transitions.
#[derive(Debug, Default)]
pub struct FeedbackController {
    pub rating: Option<Rating>,
    pub comment_open: bool,
    pub comment: String,
    pub status: FeedbackStatus,
    /// User-facing line shown next to the rating controls ("Thank you for
    /// your feedback!" and friends).  Empty when there is nothing to say.
    pub message: String,
    epoch: u64,
    aggregate: FeedbackAggregate,
    aggregate_loading: bool,
    aggregate_generation: u64,
}

impl FeedbackController {
    /// Re-seed the controller for a newly displayed version.  The rating
    /// starts from whatever the record already carries from the server.
    pub fn reset_for(&mut self, record: &ResponseRecord) {
        self.rating = record.feedback.as_ref().map(|f| f.rating);
        self.comment_open = false;
        self.comment.clear();
        self.status = FeedbackStatus::Idle;
        self.message.clear();
        self.epoch += 1;
    }

    /// Select a rating.  Choosing the already-selected rating while the
    /// comment box is closed unsets it instead; any other choice selects the
    /// rating and opens the comment box.
    pub fn choose(&mut self, rating: Rating) {
        if self.rating == Some(rating) && !self.comment_open {
            self.rating = None;
            self.comment.clear();
        } else {
            self.rating = Some(rating);
            self.comment_open = true;
        }
        self.status = FeedbackStatus::Idle;
        self.message.clear();
    }

    /// Close the comment box and discard the draft.  The chosen rating is
    /// kept: cancel abandons the comment, not the rating.
    pub fn cancel(&mut self) {
        self.comment_open = false;
        self.comment.clear();
    }

    /// Validate and stage a submission for the displayed record.
    ///
    /// Returns `Ok(None)` when no rating is chosen (submitting nothing is a
    /// no-op, not an error).  A record without both identifiers fails with
    /// an error status and no request.  Otherwise returns the epoch token
    /// and the request body for the caller to send.
    pub fn begin_submit(
        &mut self,
        record: &ResponseRecord,
        user_id: &str,
    ) -> Result<Option<(u64, FeedbackRequest)>, FeedbackError> {
        let Some(rating) = self.rating else {
            return Ok(None);
        };
        if !record.has_identifiers() {
            self.status = FeedbackStatus::Error;
            self.message = FeedbackError::MissingIdentifier.to_string();
            return Err(FeedbackError::MissingIdentifier);
        }
        let comment = self.comment.trim();
        let req = FeedbackRequest {
            user_id: user_id.to_owned(),
            query_id: record.query_id.clone(),
            response_id: record.response_id.clone(),
            rating,
            comment: (!comment.is_empty()).then(|| comment.to_owned()),
        };
        Ok(Some((self.epoch, req)))
    }

    /// Record the outcome of a submission.  Returns false when the epoch is
    /// stale, i.e. the displayed version changed while the call was in
    /// flight.
    pub fn complete_submit(&mut self, epoch: u64, ok: bool) -> bool {
        if epoch != self.epoch {
            debug!(epoch, current = self.epoch, "dropping stale feedback completion");
            return false;
        }
        if ok {
            self.status = FeedbackStatus::Success;
            self.message = "Thank you for your feedback!".into();
            self.comment_open = false;
            self.comment.clear();
        } else {
            self.status = FeedbackStatus::Error;
            self.message = "Failed to send feedback. Please try again.".into();
        }
        true
    }

    pub fn aggregate(&self) -> FeedbackAggregate {
        self.aggregate
    }

    pub fn aggregate_loading(&self) -> bool {
        self.aggregate_loading
    }

    /// Start an aggregate fetch, returning its generation token.
    pub fn begin_aggregate(&mut self) -> u64 {
        self.aggregate_loading = true;
        self.aggregate_generation += 1;
        self.aggregate_generation
    }

    /// Apply a fetched aggregate.  A failed fetch falls back to zero counts
    /// rather than surfacing an error.
    pub fn complete_aggregate(
        &mut self,
        generation: u64,
        result: anyhow::Result<FeedbackAggregate>,
    ) -> bool {
        if generation != self.aggregate_generation {
            return false;
        }
        self.aggregate_loading = false;
        self.aggregate = result.unwrap_or_default();
        true
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests_support::record;
    use insight_model::Feedback;

    #[test]
    fn choosing_same_rating_with_box_closed_unsets_it() {
        let mut f = FeedbackController::default();
        f.choose(Rating::Like);
        f.cancel();
        f.choose(Rating::Like);
        assert_eq!(f.rating, None);
        assert!(!f.comment_open);
    }

    #[test]
    fn choosing_same_rating_with_box_open_keeps_it() {
        let mut f = FeedbackController::default();
        f.choose(Rating::Like);
        assert!(f.comment_open);
        f.choose(Rating::Like);
        assert_eq!(f.rating, Some(Rating::Like));
        assert!(f.comment_open);
    }

    #[test]
    fn choosing_other_rating_switches_without_unsetting() {
        let mut f = FeedbackController::default();
        f.choose(Rating::Like);
        f.choose(Rating::Dislike);
        assert_eq!(f.rating, Some(Rating::Dislike));
        assert!(f.comment_open);
    }

    #[test]
    fn choose_clears_an_earlier_error() {
        let mut f = FeedbackController::default();
        f.status = FeedbackStatus::Error;
        f.message = "Failed to send feedback. Please try again.".into();
        f.choose(Rating::Like);
        assert_eq!(f.status, FeedbackStatus::Idle);
        assert!(f.message.is_empty());
    }

    #[test]
    fn submit_without_rating_is_a_no_op() {
        let mut f = FeedbackController::default();
        let staged = f.begin_submit(&record("r-1"), "u-1").unwrap();
        assert!(staged.is_none());
        assert_eq!(f.status, FeedbackStatus::Idle);
    }

    #[test]
    fn submit_without_identifiers_surfaces_an_error_status() {
        let mut f = FeedbackController::default();
        f.choose(Rating::Like);
        let mut rec = record("r-1");
        rec.query_id.clear();
        assert_eq!(
            f.begin_submit(&rec, "u-1"),
            Err(FeedbackError::MissingIdentifier)
        );
        assert_eq!(f.status, FeedbackStatus::Error);
        assert_eq!(f.message, "Query ID or Response ID is missing.");
    }

    #[test]
    fn blank_comment_is_omitted_from_the_request() {
        let mut f = FeedbackController::default();
        f.choose(Rating::Dislike);
        f.comment = "   ".into();
        let (_, req) = f.begin_submit(&record("r-1"), "u-1").unwrap().unwrap();
        assert!(req.comment.is_none());
        assert_eq!(req.rating, Rating::Dislike);
    }

    #[test]
    fn comment_is_trimmed_into_the_request() {
        let mut f = FeedbackController::default();
        f.choose(Rating::Like);
        f.comment = "  too terse  ".into();
        let (_, req) = f.begin_submit(&record("r-1"), "u-1").unwrap().unwrap();
        assert_eq!(req.comment.as_deref(), Some("too terse"));
    }

    #[test]
    fn successful_submit_closes_the_comment_box() {
        let mut f = FeedbackController::default();
        f.choose(Rating::Like);
        f.comment = "good".into();
        let (epoch, _) = f.begin_submit(&record("r-1"), "u-1").unwrap().unwrap();
        assert!(f.complete_submit(epoch, true));
        assert_eq!(f.status, FeedbackStatus::Success);
        assert!(!f.comment_open);
        assert!(f.comment.is_empty());
    }

    #[test]
    fn failed_submit_keeps_the_draft() {
        let mut f = FeedbackController::default();
        f.choose(Rating::Like);
        f.comment = "good".into();
        let (epoch, _) = f.begin_submit(&record("r-1"), "u-1").unwrap().unwrap();
        assert!(f.complete_submit(epoch, false));
        assert_eq!(f.status, FeedbackStatus::Error);
        assert!(f.comment_open);
        assert_eq!(f.comment, "good");
    }

    #[test]
    fn completion_for_a_previous_version_is_dropped() {
        let mut f = FeedbackController::default();
        f.choose(Rating::Like);
        let (epoch, _) = f.begin_submit(&record("r-1"), "u-1").unwrap().unwrap();
        f.reset_for(&record("r-2"));
        assert!(!f.complete_submit(epoch, true));
        assert_eq!(f.status, FeedbackStatus::Idle);
    }

    #[test]
    fn cancel_keeps_the_rating() {
        let mut f = FeedbackController::default();
        f.choose(Rating::Dislike);
        f.comment = "draft".into();
        f.cancel();
        assert_eq!(f.rating, Some(Rating::Dislike));
        assert!(!f.comment_open);
        assert!(f.comment.is_empty());
    }

    #[test]
    fn reset_seeds_rating_from_the_record() {
        let mut f = FeedbackController::default();
        let mut rec = record("r-1");
        rec.feedback = Some(Feedback { rating: Rating::Dislike, comment: None });
        f.reset_for(&rec);
        assert_eq!(f.rating, Some(Rating::Dislike));
        assert_eq!(f.status, FeedbackStatus::Idle);
    }

    #[test]
    fn reset_keeps_the_aggregate_counts() {
        let mut f = FeedbackController::default();
        let gen = f.begin_aggregate();
        f.complete_aggregate(gen, Ok(FeedbackAggregate { likes: 4, dislikes: 1 }));
        f.reset_for(&record("r-1"));
        assert_eq!(f.aggregate().likes, 4);
    }

    #[test]
    fn failed_aggregate_fetch_falls_back_to_zero() {
        let mut f = FeedbackController::default();
        f.aggregate = FeedbackAggregate { likes: 3, dislikes: 1 };
        let gen = f.begin_aggregate();
        assert!(f.aggregate_loading());
        assert!(f.complete_aggregate(gen, Err(anyhow::anyhow!("boom"))));
        assert_eq!(f.aggregate(), FeedbackAggregate::default());
        assert!(!f.aggregate_loading());
    }

    #[test]
    fn stale_aggregate_fetch_is_dropped() {
        let mut f = FeedbackController::default();
        let first = f.begin_aggregate();
        let second = f.begin_aggregate();
        assert!(!f.complete_aggregate(first, Ok(FeedbackAggregate { likes: 9, dislikes: 9 })));
        assert!(f.complete_aggregate(second, Ok(FeedbackAggregate { likes: 2, dislikes: 0 })));
        assert_eq!(f.aggregate().likes, 2);
    }
}
