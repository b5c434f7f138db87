use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// The regions that make up the TUI layout.
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub status_bar: Rect,
    pub sidebar: Rect,
    pub input_pane: Rect,
    pub answer_pane: Rect,
    pub notice_bar: Rect,
}

impl AppLayout {
    /// Calculate layout regions from a `Rect` (terminal area).
    pub fn compute(area: Rect, sidebar_open: bool) -> Self {
        let status_height = 1u16;
        let input_height = 3u16;
        let notice_height = 1u16;
        let sidebar_width = if sidebar_open { 34u16 } else { 0u16 };

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(status_height),
                Constraint::Min(8),
                Constraint::Length(notice_height),
            ])
            .split(area);

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar_width), Constraint::Min(40)])
            .split(vertical[1]);

        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(input_height), Constraint::Min(5)])
            .split(horizontal[1]);

        AppLayout {
            status_bar: vertical[0],
            sidebar: horizontal[0],
            input_pane: main[0],
            answer_pane: main[1],
            notice_bar: vertical[2],
        }
    }

    /// Convenience wrapper that derives the area from the current frame.
    pub fn new(frame: &Frame, sidebar_open: bool) -> Self {
        Self::compute(frame.area(), sidebar_open)
    }

    /// The number of text rows visible inside the answer pane's border.
    pub fn answer_inner_height(&self) -> u16 {
        self.answer_pane.height.saturating_sub(2)
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_sidebar_takes_no_width() {
        let l = AppLayout::compute(Rect::new(0, 0, 120, 40), false);
        assert_eq!(l.sidebar.width, 0);
        assert_eq!(l.answer_pane.width, 120);
    }

    #[test]
    fn open_sidebar_reserves_its_column() {
        let l = AppLayout::compute(Rect::new(0, 0, 120, 40), true);
        assert_eq!(l.sidebar.width, 34);
        assert_eq!(l.input_pane.x, 34);
        assert_eq!(l.status_bar.height, 1);
        assert_eq!(l.notice_bar.y, 39);
    }
}
