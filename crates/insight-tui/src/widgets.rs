// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use insight_core::{FeedbackController, FeedbackStatus, Notice, NoticeLevel, VersionViewer};
use insight_model::{fact_segments, Document, FactSegment, Rating, ResponseRecord};

use crate::sidebar::SidebarRow;

// ── Character sets ────────────────────────────────────────────────────────────

fn sep(ascii: bool) -> &'static str {
    if ascii { "|" } else { "│" }
}
fn busy_char(ascii: bool) -> &'static str {
    if ascii { "* " } else { "⠿ " }
}
fn bullet(ascii: bool) -> &'static str {
    if ascii { "- " } else { "• " }
}
fn like_char(ascii: bool) -> &'static str {
    if ascii { "[+]" } else { "👍" }
}
fn dislike_char(ascii: bool) -> &'static str {
    if ascii { "[-]" } else { "👎" }
}
fn border_type(ascii: bool) -> BorderType {
    if ascii { BorderType::Plain } else { BorderType::Rounded }
}

// ── Draw functions ────────────────────────────────────────────────────────────

/// Draw the status bar at the top.
pub fn draw_status(
    frame: &mut Frame,
    area: Rect,
    user_id: &str,
    loading: bool,
    revalidating: Option<&str>,
    ascii: bool,
) {
    let busy_indicator = if loading || revalidating.is_some() { busy_char(ascii) } else { "  " };
    let separator = sep(ascii);

    let activity: Span<'static> = if loading {
        Span::styled(" generating ".to_string(), Style::default().fg(Color::Yellow))
    } else if let Some(id) = revalidating {
        Span::styled(format!(" revalidating {id} "), Style::default().fg(Color::Yellow))
    } else {
        Span::raw("")
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {busy_indicator}"),
            Style::default().fg(if loading || revalidating.is_some() {
                Color::Yellow
            } else {
                Color::DarkGray
            }),
        ),
        Span::styled(" GenAI Insights ", Style::default().fg(Color::LightCyan)),
        Span::styled(separator, Style::default().fg(Color::DarkGray)),
        Span::styled(format!(" {user_id} "), Style::default().fg(Color::Gray)),
        activity,
        Span::styled(
            "  Tab:pane  ^b:history  Enter:ask/select  r:revalidate  v:versions  l/d:rate  ^c:quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}

/// Draw the history sidebar: bucket headers and query entries, with the
/// keyboard cursor and the pinned selection highlighted.
pub fn draw_sidebar(
    frame: &mut Frame,
    area: Rect,
    rows: &[SidebarRow<'_>],
    cursor: usize,
    selected_id: Option<&str>,
    revalidating: Option<&str>,
    focused: bool,
    ascii: bool,
) {
    let block = pane_block("History", focused, ascii);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::with_capacity(rows.len());
    let mut entry_idx = 0usize;
    let mut cursor_row = 0usize;
    for row in rows {
        match row {
            SidebarRow::Header(bucket) => {
                lines.push(Line::from(Span::styled(
                    bucket.to_string(),
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
                )));
            }
            SidebarRow::Entry(record) => {
                let at_cursor = entry_idx == cursor;
                if at_cursor {
                    cursor_row = lines.len();
                }
                let pinned = selected_id == Some(record.response_id.as_str());
                let busy = revalidating == Some(record.response_id.as_str());

                let mut style = Style::default().fg(Color::Gray);
                if pinned {
                    style = style.fg(Color::LightCyan);
                }
                if at_cursor && focused {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                let marker = if busy { busy_char(ascii) } else { "  " };
                let text = truncate_to_width(
                    &format!("{marker}{}", record.query),
                    inner.width.saturating_sub(2) as usize,
                    ascii,
                );
                lines.push(Line::from(Span::styled(text, style)));
                entry_idx += 1;
            }
        }
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "(no history)",
            Style::default().fg(Color::DarkGray),
        )));
    }

    // Scroll so the cursor row stays visible.
    let visible = inner.height as usize;
    let offset = cursor_row.saturating_sub(visible.saturating_sub(1)) as u16;
    let para = Paragraph::new(lines).scroll((offset, 0));
    frame.render_widget(para, inner);
}

/// Draw the query input box.
pub fn draw_input(frame: &mut Frame, area: Rect, buffer: &str, loading: bool, focused: bool, ascii: bool) {
    let title = if loading { "Ask (waiting…)" } else { "Ask" };
    let block = pane_block(title, focused, ascii);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cursor = if focused && !loading { "▏" } else { "" };
    let cursor = if ascii && !cursor.is_empty() { "_" } else { cursor };
    let para = Paragraph::new(Line::from(vec![
        Span::raw(buffer.to_string()),
        Span::styled(cursor, Style::default().fg(Color::LightBlue)),
    ]));
    frame.render_widget(para, inner);
}

/// Everything the answer pane needs from app state for one frame.
pub struct AnswerView<'a> {
    pub record: Option<&'a ResponseRecord>,
    pub loading: bool,
    pub history_empty: bool,
    pub feedback: &'a FeedbackController,
    pub citation_cursor: usize,
    pub scroll: u16,
}

/// Draw the answer pane: query, summary, facts with citation markers turned
/// into highlighted references, and the feedback bar.
pub fn draw_answer(frame: &mut Frame, area: Rect, view: &AnswerView<'_>, focused: bool, ascii: bool) {
    let block = pane_block("Answer", focused, ascii);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if view.loading {
        let para = Paragraph::new(Line::from(Span::styled(
            format!("{}Generating answer...", busy_char(ascii)),
            Style::default().fg(Color::Yellow),
        )));
        frame.render_widget(para, inner);
        return;
    }

    let Some(record) = view.record else {
        let text = if view.history_empty {
            "No queries yet. Start by asking a question!"
        } else {
            "Ask a question, or pick an entry from the history sidebar."
        };
        let para = Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(Color::DarkGray),
        )))
        .wrap(Wrap { trim: false });
        frame.render_widget(para, inner);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        record.query.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        record.timestamp.format("%Y-%m-%d %H:%M UTC").to_string(),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::default());

    lines.push(Line::from(Span::styled(
        "Summary",
        Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD),
    )));
    for item in &record.answer.summary {
        lines.push(Line::from(vec![
            Span::styled(bullet(ascii), Style::default().fg(Color::DarkGray)),
            Span::raw(item.clone()),
        ]));
    }
    lines.push(Line::default());

    lines.push(Line::from(Span::styled(
        "Facts",
        Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD),
    )));
    let mut citation_idx = 0usize;
    for fact in &record.answer.facts {
        let mut spans = vec![Span::styled(bullet(ascii), Style::default().fg(Color::DarkGray))];
        for segment in fact_segments(fact, &record.docs) {
            match segment {
                FactSegment::Text(t) => spans.push(Span::raw(t.to_string())),
                FactSegment::Citation { name, doc } => {
                    let mut style = if doc.is_some() {
                        Style::default().fg(Color::LightBlue).add_modifier(Modifier::UNDERLINED)
                    } else {
                        // Unresolved citations render as inert text.
                        Style::default().fg(Color::DarkGray)
                    };
                    if citation_idx == view.citation_cursor && focused {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    spans.push(Span::styled(format!("[{name}]"), style));
                    citation_idx += 1;
                }
            }
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::default());
    lines.extend(feedback_lines(view.feedback, ascii));

    let para = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((view.scroll, 0));
    frame.render_widget(para, inner);
}

fn feedback_lines(feedback: &FeedbackController, ascii: bool) -> Vec<Line<'static>> {
    let counts = feedback.aggregate();
    let (likes, dislikes) = if feedback.aggregate_loading() {
        ("-".to_string(), "-".to_string())
    } else {
        (counts.likes.to_string(), counts.dislikes.to_string())
    };

    let rating_style = |r: Rating| {
        if feedback.rating == Some(r) {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let mut lines = vec![Line::from(vec![
        Span::styled("Was this response helpful?  ", Style::default().fg(Color::Gray)),
        Span::styled(like_char(ascii), rating_style(Rating::Like)),
        Span::raw(format!(" {likes}   ")),
        Span::styled(dislike_char(ascii), rating_style(Rating::Dislike)),
        Span::raw(format!(" {dislikes}")),
    ])];

    if feedback.comment_open {
        lines.push(Line::from(vec![
            Span::styled("Comment: ", Style::default().fg(Color::Gray)),
            Span::raw(feedback.comment.clone()),
            Span::styled(
                "  (Enter to send, Esc to cancel)",
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    if !feedback.message.is_empty() {
        let color = match feedback.status {
            FeedbackStatus::Error => Color::Red,
            _ => Color::Green,
        };
        lines.push(Line::from(Span::styled(
            feedback.message.clone(),
            Style::default().fg(color),
        )));
    }

    lines
}

/// Draw the single-line notice bar at the bottom.
pub fn draw_notice(frame: &mut Frame, area: Rect, notice: Option<&Notice>) {
    let line = match notice {
        Some(n) => {
            let color = match n.level {
                NoticeLevel::Info => Color::Green,
                NoticeLevel::Error => Color::Red,
            };
            Line::from(Span::styled(format!(" {}", n.message), Style::default().fg(color)))
        }
        None => Line::default(),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the source document preview on top of the layout.
pub fn draw_preview_overlay(frame: &mut Frame, doc: &Document, ascii: bool) {
    let area = centered_rect(frame.area(), 70, 60);
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(Span::styled(
            format!(" Source: {} ", doc.id),
            Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(border_type(ascii))
        .border_style(Style::default().fg(Color::LightBlue));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let para = Paragraph::new(doc.text.clone()).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}

/// Draw the version-history overlay for one response.
pub fn draw_versions_overlay(frame: &mut Frame, viewer: &VersionViewer, ascii: bool) {
    let area = centered_rect(frame.area(), 70, 60);
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(Span::styled(
            format!(" Versions: {} ", viewer.caption()),
            Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(border_type(ascii))
        .border_style(Style::default().fg(Color::LightBlue));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    if viewer.is_loading() {
        lines.push(Line::from(Span::styled(
            format!("{}Loading...", busy_char(ascii)),
            Style::default().fg(Color::Yellow),
        )));
    }
    for (i, version) in viewer.versions().iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("Version {} ", i + 1),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                version.timestamp.format("%Y-%m-%d %H:%M UTC").to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        for item in &version.answer.summary {
            lines.push(Line::from(vec![
                Span::styled(bullet(ascii), Style::default().fg(Color::DarkGray)),
                Span::raw(item.clone()),
            ]));
        }
        lines.push(Line::default());
    }
    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}

// ── Internal helpers ──────────────────────────────────────────────────────────

pub(crate) fn pane_block(title: &str, focused: bool, ascii: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(Color::LightBlue)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .title(Span::styled(
            format!(" {title} "),
            if focused {
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(Color::LightBlue)
            } else {
                Style::default().fg(Color::Gray)
            },
        ))
        .borders(Borders::ALL)
        .border_type(border_type(ascii))
        .border_style(border_style)
}

/// Truncate by display width, not char count (CJK queries are two cells per
/// glyph).
fn truncate_to_width(text: &str, max: usize, ascii: bool) -> String {
    use unicode_width::UnicodeWidthChar;

    if max < 2 {
        return String::new();
    }
    let mut width = 0usize;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max.saturating_sub(1) {
            out.push_str(if ascii { "~" } else { "…" });
            return out;
        }
        width += w;
        out.push(c);
    }
    out
}

fn centered_rect(area: Rect, pct_x: u16, pct_y: u16) -> Rect {
    let w = area.width * pct_x / 100;
    let h = area.height * pct_y / 100;
    Rect::new(
        area.x + (area.width.saturating_sub(w)) / 2,
        area.y + (area.height.saturating_sub(h)) / 2,
        w,
        h,
    )
}
