// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Bridge between the synchronous session and the async backend: each
//! [`Command`] is executed on its own task and comes back as an [`ApiEvent`]
//! on the app's channel.

use std::sync::Arc;

use tokio::sync::mpsc;

use insight_api::Backend;
use insight_core::Command;
use insight_model::{FeedbackAggregate, FeedbackReceipt, ResponseRecord};

/// A completed backend call, tagged with the token the session uses to
/// detect supersession.
pub enum ApiEvent {
    QueryDone { generation: u64, result: anyhow::Result<ResponseRecord> },
    HistoryLoaded(anyhow::Result<Vec<ResponseRecord>>),
    RevalidateDone { generation: u64, result: anyhow::Result<ResponseRecord> },
    VersionsLoaded { generation: u64, result: anyhow::Result<Vec<ResponseRecord>> },
    FeedbackDone { epoch: u64, result: anyhow::Result<FeedbackReceipt> },
    AggregateLoaded { generation: u64, result: anyhow::Result<FeedbackAggregate> },
}

/// Execute one command on a background task.  Send failure means the app is
/// shutting down, so the result is simply dropped.
pub fn spawn_command(backend: Arc<dyn Backend>, tx: mpsc::Sender<ApiEvent>, cmd: Command) {
    tokio::spawn(async move {
        let event = match cmd {
            Command::CreateResponse { generation, query, user_id } => ApiEvent::QueryDone {
                generation,
                result: backend.create_response(&query, &user_id).await,
            },
            Command::RefreshHistory => ApiEvent::HistoryLoaded(backend.list_history().await),
            Command::Revalidate { generation, response_id } => ApiEvent::RevalidateDone {
                generation,
                result: backend.revalidate(&response_id).await,
            },
            Command::FetchVersions { generation, response_id } => ApiEvent::VersionsLoaded {
                generation,
                result: backend.version_history(&response_id).await,
            },
            Command::SubmitFeedback { epoch, request } => ApiEvent::FeedbackDone {
                epoch,
                result: backend.submit_feedback(request).await,
            },
            Command::FetchAggregate { generation, response_id } => ApiEvent::AggregateLoaded {
                generation,
                result: backend.feedback_aggregate(&response_id).await,
            },
        };
        let _ = tx.send(event).await;
    });
}
