// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Client-side coordination layer: the controllers that reconcile query
//! submission, history selection, and per-response feedback against the
//! wholesale-replaced history cache.
//!
//! Controllers are synchronous state machines.  An operation *begins* by
//! mutating local state and emitting a [`Command`] for the driver (the TUI
//! event loop) to execute against the backend; the driver later feeds the
//! completion back in.  Async-completing controllers carry a request
//! generation: a completion whose captured generation no longer matches the
//! controller's current one is discarded (cancellation by supersession), so
//! a late response can never clobber state the user has already moved past.

mod cache;
mod error;
mod feedback;
mod notice;
mod preview;
mod query;
mod revalidate;
mod selection;
mod session;
mod versions;

pub use cache::HistoryCache;
pub use error::FeedbackError;
pub use feedback::{FeedbackController, FeedbackStatus};
pub use notice::{Notice, NoticeLevel};
pub use preview::DocumentPreview;
pub use query::QueryController;
pub use revalidate::RevalidationController;
pub use selection::Selection;
pub use session::{Command, Session};
pub use versions::VersionViewer;
