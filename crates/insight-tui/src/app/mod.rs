// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Top-level TUI application state and event loop.

pub(crate) mod api;

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tracing::warn;

use insight_api::Backend;
use insight_core::{Notice, Session};
use insight_model::{fact_segments, group, Document, FactSegment, Rating};

use crate::keys::{map_key, Action, FocusPane, KeyContext};
use crate::layout::AppLayout;
use crate::sidebar;
use crate::widgets::{
    draw_answer, draw_input, draw_notice, draw_preview_overlay, draw_sidebar, draw_status,
    draw_versions_overlay, AnswerView,
};

use api::ApiEvent;

/// How long a notice stays in the notice bar before the next one is shown.
const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Options passed when constructing the TUI app.
pub struct AppOptions {
    pub user_id: String,
    /// Use plain ASCII characters instead of unicode glyphs.
    pub ascii: bool,
}

/// The top-level TUI application state.
pub struct App {
    session: Session,
    backend: Arc<dyn Backend>,
    api_tx: mpsc::Sender<ApiEvent>,
    api_rx: mpsc::Receiver<ApiEvent>,
    focus: FocusPane,
    sidebar_open: bool,
    /// Cursor over the flat entry list of the grouped sidebar.
    sidebar_cursor: usize,
    input_buffer: String,
    scroll_offset: u16,
    /// Which citation of the displayed answer is highlighted.
    citation_cursor: usize,
    /// `(response_id, timestamp)` of the version on display last frame.
    /// Scroll and citation cursor reset when it changes.
    displayed_version: Option<(String, DateTime<Utc>)>,
    active_notice: Option<(Notice, Instant)>,
    pending_notices: VecDeque<Notice>,
    ascii: bool,
    should_quit: bool,
}

impl App {
    pub fn new(backend: Arc<dyn Backend>, opts: AppOptions) -> Self {
        let (api_tx, api_rx) = mpsc::channel(64);
        Self {
            session: Session::new(opts.user_id),
            backend,
            api_tx,
            api_rx,
            focus: FocusPane::Input,
            sidebar_open: true,
            sidebar_cursor: 0,
            input_buffer: String::new(),
            scroll_offset: 0,
            citation_cursor: 0,
            displayed_version: None,
            active_notice: None,
            pending_notices: VecDeque::new(),
            ascii: opts.ascii,
            should_quit: false,
        }
    }

    /// Run the TUI event loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> anyhow::Result<()> {
        let startup = self.session.startup();
        self.dispatch(startup);

        let mut term_events = EventStream::new();
        loop {
            self.pump_notices();
            terminal.draw(|frame| self.draw(frame))?;

            tokio::select! {
                maybe_event = term_events.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(k))) if k.kind == KeyEventKind::Press => {
                            if let Some(action) = map_key(k, self.key_context()) {
                                self.handle_action(action);
                            }
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => warn!(error = %e, "terminal event error"),
                        None => break,
                    }
                }
                Some(event) = self.api_rx.recv() => self.handle_api_event(event),
                // Tick so expired notices are cleared even when idle.
                _ = tokio::time::sleep(Duration::from_millis(250)) => {}
            }

            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    // ── Event handling ────────────────────────────────────────────────────────

    fn key_context(&self) -> KeyContext {
        KeyContext {
            focus: self.focus,
            comment_open: self.session.feedback.comment_open,
            overlay_open: self.session.preview.is_open() || self.session.versions.is_open(),
        }
    }

    pub(crate) fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ToggleSidebar => {
                self.sidebar_open = !self.sidebar_open;
                if !self.sidebar_open && self.focus == FocusPane::Sidebar {
                    self.focus = FocusPane::Input;
                }
            }
            Action::FocusNext => {
                self.focus = match self.focus {
                    FocusPane::Input => FocusPane::Answer,
                    FocusPane::Answer if self.sidebar_open => FocusPane::Sidebar,
                    FocusPane::Answer => FocusPane::Input,
                    FocusPane::Sidebar => FocusPane::Input,
                };
            }
            Action::CloseOverlay => {
                if self.session.preview.is_open() {
                    self.session.preview.close();
                } else {
                    self.session.versions.close();
                }
            }

            Action::InputChar(c) => self.input_buffer.push(c),
            Action::InputBackspace => {
                self.input_buffer.pop();
            }
            Action::Submit => {
                let cmds = self.session.submit_query(&self.input_buffer);
                if !cmds.is_empty() {
                    self.input_buffer.clear();
                }
                self.dispatch(cmds);
            }

            Action::SidebarUp => {
                self.sidebar_cursor = self.sidebar_cursor.saturating_sub(1);
            }
            Action::SidebarDown => {
                let count = self.sidebar_entry_count();
                if count > 0 {
                    self.sidebar_cursor = (self.sidebar_cursor + 1).min(count - 1);
                }
            }
            Action::SelectHistory => {
                if let Some(id) = self.sidebar_entry_id() {
                    let cmds = self.session.select_history(&id);
                    self.dispatch(cmds);
                }
            }
            Action::Revalidate => {
                if let Some(id) = self.sidebar_entry_id() {
                    let cmds = self.session.revalidate(&id);
                    self.dispatch(cmds);
                }
            }
            Action::ViewVersions => {
                if let Some(id) = self.sidebar_entry_id() {
                    let cmds = self.session.view_versions(&id);
                    self.dispatch(cmds);
                }
            }

            Action::ScrollUp => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            Action::ScrollDown => self.scroll_offset = self.scroll_offset.saturating_add(1),
            Action::PrevCitation => {
                self.citation_cursor = self.citation_cursor.saturating_sub(1);
            }
            Action::NextCitation => {
                let count = self.citation_count();
                if count > 0 {
                    self.citation_cursor = (self.citation_cursor + 1).min(count - 1);
                }
            }
            Action::OpenCitation => {
                if let Some(doc) = self.citation_doc(self.citation_cursor) {
                    self.session.preview.open(doc);
                }
            }
            Action::ChooseLike => {
                let cmds = self.session.choose_rating(Rating::Like);
                self.dispatch(cmds);
            }
            Action::ChooseDislike => {
                let cmds = self.session.choose_rating(Rating::Dislike);
                self.dispatch(cmds);
            }

            Action::CommentChar(c) => self.session.feedback.comment.push(c),
            Action::CommentBackspace => {
                self.session.feedback.comment.pop();
            }
            Action::SubmitFeedback => {
                let cmds = self.session.submit_feedback();
                self.dispatch(cmds);
            }
            Action::CancelFeedback => self.session.cancel_feedback(),
        }
        self.sync_display();
    }

    pub(crate) fn handle_api_event(&mut self, event: ApiEvent) {
        let cmds = match event {
            ApiEvent::QueryDone { generation, result } => {
                self.session.on_query_complete(generation, result)
            }
            ApiEvent::HistoryLoaded(result) => {
                self.session.on_history_loaded(result);
                Vec::new()
            }
            ApiEvent::RevalidateDone { generation, result } => {
                self.session.on_revalidate_complete(generation, result)
            }
            ApiEvent::VersionsLoaded { generation, result } => {
                self.session.on_versions_loaded(generation, result);
                Vec::new()
            }
            ApiEvent::FeedbackDone { epoch, result } => {
                self.session.on_feedback_submitted(epoch, result)
            }
            ApiEvent::AggregateLoaded { generation, result } => {
                self.session.on_aggregate_loaded(generation, result);
                Vec::new()
            }
        };
        self.dispatch(cmds);
        self.sync_display();
    }

    fn dispatch(&self, cmds: Vec<insight_core::Command>) {
        for cmd in cmds {
            api::spawn_command(self.backend.clone(), self.api_tx.clone(), cmd);
        }
    }

    /// Reconcile per-record view state after session changes: clamp the
    /// sidebar cursor to the cache and reset scroll/citation cursor when the
    /// displayed version changed.
    fn sync_display(&mut self) {
        let count = self.sidebar_entry_count();
        if count == 0 {
            self.sidebar_cursor = 0;
        } else {
            self.sidebar_cursor = self.sidebar_cursor.min(count - 1);
        }

        let version = self
            .session
            .current()
            .map(|r| (r.response_id.clone(), r.timestamp));
        if version != self.displayed_version {
            self.scroll_offset = 0;
            self.citation_cursor = 0;
            self.displayed_version = version;
        }
    }

    fn pump_notices(&mut self) {
        self.pending_notices.extend(self.session.take_notices());
        if let Some((_, since)) = &self.active_notice {
            if since.elapsed() > NOTICE_TTL {
                self.active_notice = None;
            }
        }
        if self.active_notice.is_none() {
            if let Some(notice) = self.pending_notices.pop_front() {
                self.active_notice = Some((notice, Instant::now()));
            }
        }
    }

    // ── Citation lookup ───────────────────────────────────────────────────────

    fn citation_count(&self) -> usize {
        self.session
            .current()
            .map(|record| {
                record
                    .answer
                    .facts
                    .iter()
                    .flat_map(|f| fact_segments(f, &record.docs))
                    .filter(|s| matches!(s, FactSegment::Citation { .. }))
                    .count()
            })
            .unwrap_or(0)
    }

    /// The resolved document of the `idx`-th citation, in fact order.
    /// Unresolved citations are inert: they occupy a cursor position but
    /// yield nothing to preview.
    fn citation_doc(&self, idx: usize) -> Option<Document> {
        let record = self.session.current()?;
        record
            .answer
            .facts
            .iter()
            .flat_map(|f| fact_segments(f, &record.docs))
            .filter_map(|s| match s {
                FactSegment::Citation { doc, .. } => Some(doc),
                FactSegment::Text(_) => None,
            })
            .nth(idx)?
            .cloned()
    }

    // ── Sidebar lookup ────────────────────────────────────────────────────────

    fn sidebar_entry_count(&self) -> usize {
        group(self.session.cache.records()).total()
    }

    fn sidebar_entry_id(&self) -> Option<String> {
        let grouped = group(self.session.cache.records());
        sidebar::entries(&grouped)
            .get(self.sidebar_cursor)
            .map(|r| r.response_id.clone())
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&self, frame: &mut Frame) {
        let layout = AppLayout::new(frame, self.sidebar_open);

        draw_status(
            frame,
            layout.status_bar,
            self.session.user_id(),
            self.session.query.is_loading(),
            self.session.revalidation.target(),
            self.ascii,
        );

        if self.sidebar_open {
            let grouped = group(self.session.cache.records());
            let rows = sidebar::build_rows(&grouped);
            draw_sidebar(
                frame,
                layout.sidebar,
                &rows,
                self.sidebar_cursor,
                self.session.selection.selected(),
                self.session.revalidation.target(),
                self.focus == FocusPane::Sidebar,
                self.ascii,
            );
        }

        draw_input(
            frame,
            layout.input_pane,
            &self.input_buffer,
            self.session.query.is_loading(),
            self.focus == FocusPane::Input,
            self.ascii,
        );

        let view = AnswerView {
            record: self.session.current(),
            loading: self.session.query.is_loading(),
            history_empty: self.session.cache.is_empty(),
            feedback: &self.session.feedback,
            citation_cursor: self.citation_cursor,
            scroll: self.scroll_offset,
        };
        draw_answer(
            frame,
            layout.answer_pane,
            &view,
            self.focus == FocusPane::Answer,
            self.ascii,
        );

        draw_notice(
            frame,
            layout.notice_bar,
            self.active_notice.as_ref().map(|(n, _)| n),
        );

        if self.session.versions.is_open() {
            draw_versions_overlay(frame, &self.session.versions, self.ascii);
        }
        if let Some(doc) = self.session.preview.previewed() {
            draw_preview_overlay(frame, doc, self.ascii);
        }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
