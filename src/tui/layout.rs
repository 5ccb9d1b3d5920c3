use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Session browser layout: search box on top, list and preview side by side, status row
pub struct SessionsLayout {
    pub search_area: Rect,
    pub list_area: Rect,
    pub preview_area: Rect,
    pub status_area: Rect,
}

impl SessionsLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);

        Self {
            search_area: rows[0],
            list_area: columns[0],
            preview_area: columns[1],
            status_area: rows[2],
        }
    }
}

/// Session detail layout: metadata header, event filter box, event timeline, status row
pub struct DetailLayout {
    pub header_area: Rect,
    pub filter_area: Rect,
    pub events_area: Rect,
    pub status_area: Rect,
}

impl DetailLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header_area: rows[0],
            filter_area: rows[1],
            events_area: rows[2],
            status_area: rows[3],
        }
    }
}
