// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::collections::VecDeque;

use insight_api::FeedbackRequest;
use insight_model::{FeedbackAggregate, FeedbackReceipt, Rating, ResponseRecord};
use tracing::warn;

use crate::cache::HistoryCache;
use crate::feedback::{FeedbackController, FeedbackStatus};
use crate::notice::Notice;
use crate::preview::DocumentPreview;
use crate::query::QueryController;
use crate::revalidate::RevalidationController;
use crate::selection::Selection;
use crate::versions::VersionViewer;

/// A backend call the driver must execute on the session's behalf.
///
/// Calls that can be superseded carry the generation (or epoch) token that
/// the matching `on_*` completion method checks before applying the result.
#[derive(Debug, Clone)]
pub enum Command {
    CreateResponse { generation: u64, query: String, user_id: String },
    RefreshHistory,
    Revalidate { generation: u64, response_id: String },
    FetchVersions { generation: u64, response_id: String },
    SubmitFeedback { epoch: u64, request: FeedbackRequest },
    FetchAggregate { generation: u64, response_id: String },
}

/// The whole client-side state of one running session.
///
/// All methods are synchronous: a user action mutates controller state and
/// returns the [`Command`]s to execute; the driver runs them against the
/// backend and feeds each completion into the matching `on_*` method, which
/// may in turn return follow-up commands.  The session never blocks and
/// never talks to the network itself, so every interleaving of completions
/// can be tested by calling these methods in the interleaved order.
pub struct Session {
    pub cache: HistoryCache,
    pub selection: Selection,
    pub preview: DocumentPreview,
    pub versions: VersionViewer,
    pub feedback: FeedbackController,
    pub query: QueryController,
    pub revalidation: RevalidationController,
    current: Option<ResponseRecord>,
    notices: VecDeque<Notice>,
    user_id: String,
}

impl Session {
    pub fn new(user_id: String) -> Self {
        Self {
            cache: HistoryCache::default(),
            selection: Selection::default(),
            preview: DocumentPreview::default(),
            versions: VersionViewer::default(),
            feedback: FeedbackController::default(),
            query: QueryController::default(),
            revalidation: RevalidationController::default(),
            current: None,
            notices: VecDeque::new(),
            user_id,
        }
    }

    /// The record currently on display, if any.
    pub fn current(&self) -> Option<&ResponseRecord> {
        self.current.as_ref()
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Drain pending user-facing notifications for the driver to display.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    fn push_notice(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }

    /// Commands to run once at startup.
    pub fn startup(&mut self) -> Vec<Command> {
        vec![Command::RefreshHistory]
    }

    // ─── Query submission ────────────────────────────────────────────────────

    /// Submit a new query.  Blank text and an already-running submission are
    /// both silent no-ops.
    pub fn submit_query(&mut self, text: &str) -> Vec<Command> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        let Some(generation) = self.query.begin() else {
            return Vec::new();
        };
        self.selection.clear();
        self.current = None;
        vec![Command::CreateResponse {
            generation,
            query: text.to_owned(),
            user_id: self.user_id.clone(),
        }]
    }

    pub fn on_query_complete(
        &mut self,
        generation: u64,
        result: anyhow::Result<ResponseRecord>,
    ) -> Vec<Command> {
        if !self.query.finish(generation) {
            return Vec::new();
        }
        match result {
            Ok(record) => {
                let mut cmds = self.show(record);
                cmds.push(Command::RefreshHistory);
                cmds
            }
            Err(err) => {
                warn!(error = %err, "query submission failed");
                self.push_notice(Notice::error("Failed to process query. Please try again."));
                Vec::new()
            }
        }
    }

    // ─── History ─────────────────────────────────────────────────────────────

    pub fn on_history_loaded(&mut self, result: anyhow::Result<Vec<ResponseRecord>>) {
        match result {
            Ok(records) => self.cache.replace(records),
            Err(err) => {
                warn!(error = %err, "history refresh failed");
                self.push_notice(Notice::error(
                    "Failed to load history. Please try again later.",
                ));
            }
        }
    }

    /// Pin a history entry and display it.  An id not present in the cache
    /// is a silent no-op.
    pub fn select_history(&mut self, response_id: &str) -> Vec<Command> {
        let Some(record) = self.cache.find(response_id).cloned() else {
            return Vec::new();
        };
        self.selection.set(response_id.to_owned());
        self.show(record)
    }

    // ─── Revalidation ────────────────────────────────────────────────────────

    pub fn revalidate(&mut self, response_id: &str) -> Vec<Command> {
        let generation = self.revalidation.begin(response_id.to_owned());
        vec![Command::Revalidate {
            generation,
            response_id: response_id.to_owned(),
        }]
    }

    pub fn on_revalidate_complete(
        &mut self,
        generation: u64,
        result: anyhow::Result<ResponseRecord>,
    ) -> Vec<Command> {
        if !self.revalidation.finish(generation) {
            return Vec::new();
        }
        match result {
            Ok(record) => {
                // The new version goes on display only when the user is
                // still looking at that response (or at nothing pinned).
                let replace = match self.selection.selected() {
                    Some(selected) => selected == record.response_id,
                    None => true,
                };
                let mut cmds = if replace { self.show(record) } else { Vec::new() };
                self.push_notice(Notice::info("A new response has been generated."));
                cmds.push(Command::RefreshHistory);
                cmds
            }
            Err(err) => {
                warn!(error = %err, "revalidation failed");
                self.push_notice(Notice::error(
                    "Failed to revalidate query. Please try again.",
                ));
                vec![Command::RefreshHistory]
            }
        }
    }

    // ─── Version history ─────────────────────────────────────────────────────

    /// Open the version overlay for a response.  An id not present in the
    /// cache is a silent no-op, mirroring history selection.
    pub fn view_versions(&mut self, response_id: &str) -> Vec<Command> {
        let Some(record) = self.cache.find(response_id) else {
            return Vec::new();
        };
        let generation = self.versions.begin_open(record.query.clone());
        vec![Command::FetchVersions {
            generation,
            response_id: response_id.to_owned(),
        }]
    }

    pub fn on_versions_loaded(
        &mut self,
        generation: u64,
        result: anyhow::Result<Vec<ResponseRecord>>,
    ) {
        match result {
            Ok(list) => {
                self.versions.complete_open(generation, list);
            }
            Err(err) => {
                warn!(error = %err, "version history fetch failed");
                if self.versions.fail_open(generation) {
                    self.push_notice(Notice::error("Failed to load response history."));
                }
            }
        }
    }

    // ─── Feedback ────────────────────────────────────────────────────────────

    pub fn choose_rating(&mut self, rating: Rating) -> Vec<Command> {
        let before = self.feedback.status;
        self.feedback.choose(rating);
        self.refetch_aggregate_if_status_changed(before)
    }

    pub fn submit_feedback(&mut self) -> Vec<Command> {
        let Some(record) = self.current.clone() else {
            return Vec::new();
        };
        let before = self.feedback.status;
        match self.feedback.begin_submit(&record, &self.user_id) {
            Ok(Some((epoch, request))) => vec![Command::SubmitFeedback { epoch, request }],
            Ok(None) => Vec::new(),
            Err(_) => self.refetch_aggregate_if_status_changed(before),
        }
    }

    pub fn cancel_feedback(&mut self) {
        self.feedback.cancel();
    }

    pub fn on_feedback_submitted(
        &mut self,
        epoch: u64,
        result: anyhow::Result<FeedbackReceipt>,
    ) -> Vec<Command> {
        if let Err(err) = &result {
            warn!(error = %err, "feedback submission failed");
        }
        let before = self.feedback.status;
        if !self.feedback.complete_submit(epoch, result.is_ok()) {
            return Vec::new();
        }
        self.refetch_aggregate_if_status_changed(before)
    }

    pub fn on_aggregate_loaded(
        &mut self,
        generation: u64,
        result: anyhow::Result<FeedbackAggregate>,
    ) {
        self.feedback.complete_aggregate(generation, result);
    }

    // ─── Internal ────────────────────────────────────────────────────────────

    /// Put a record on display, resetting feedback state when the displayed
    /// version changed and refetching the aggregate when the response id
    /// changed.
    fn show(&mut self, record: ResponseRecord) -> Vec<Command> {
        let version_changed = self
            .current
            .as_ref()
            .map(|c| (c.response_id.as_str(), c.timestamp) != (record.response_id.as_str(), record.timestamp))
            .unwrap_or(true);
        let id_changed = self
            .current
            .as_ref()
            .map(|c| c.response_id != record.response_id)
            .unwrap_or(true);

        if version_changed {
            self.feedback.reset_for(&record);
        }
        let mut cmds = Vec::new();
        if id_changed {
            cmds.push(Command::FetchAggregate {
                generation: self.feedback.begin_aggregate(),
                response_id: record.response_id.clone(),
            });
        }
        self.current = Some(record);
        cmds
    }

    /// A status transition always refetches the aggregate counts, even when
    /// the transition is into the error state.
    fn refetch_aggregate_if_status_changed(&mut self, before: FeedbackStatus) -> Vec<Command> {
        if self.feedback.status == before {
            return Vec::new();
        }
        let Some(record) = &self.current else {
            return Vec::new();
        };
        vec![Command::FetchAggregate {
            generation: self.feedback.begin_aggregate(),
            response_id: record.response_id.clone(),
        }]
    }
}

// ─── Test fixtures ───────────────────────────────────────────────────────────


// ─── Unit tests ──────────────────────────────────────────────────────────────
